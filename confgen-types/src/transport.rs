//! The value-type → transport mapping.
//!
//! One table serves both consumers: the code generator reads the
//! encode/decode *expressions* (Rust source templates over a `{v}`
//! placeholder), while runtime validators and tests use the matching
//! conversion *functions* [`encode_transport`] / [`decode_native`].
//! Absence of both expressions means the transport representation
//! equals the native one.

use crate::descriptor::PropertyDescriptor;
use crate::value::{PropertyValue, TransportType, TransportValue, ValueType};
use crate::TypeError;
use url::Url;

/// Resolved transport mapping for one value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportMapping {
    pub transport: TransportType,
    /// Native → transport, applied by generated setters.
    pub encode_expr: Option<&'static str>,
    /// Transport → native, applied by generated getters.
    pub decode_expr: Option<&'static str>,
}

impl TransportMapping {
    fn identity(transport: TransportType) -> Self {
        Self {
            transport,
            encode_expr: None,
            decode_expr: None,
        }
    }
}

/// Maps a value type to its transport representation. Total over the
/// closed set.
pub fn resolve(value_type: ValueType) -> TransportMapping {
    match value_type {
        ValueType::Boolean => TransportMapping {
            transport: TransportType::Number,
            encode_expr: Some("TransportValue::Number(i64::from({v}).into())"),
            decode_expr: Some("{v}.as_f64().map(|n| n != 0.0)"),
        },
        ValueType::SignedInteger => TransportMapping {
            transport: TransportType::Number,
            encode_expr: Some("TransportValue::Number({v}.into())"),
            decode_expr: Some("{v}.as_i64()"),
        },
        ValueType::UnsignedInteger => TransportMapping {
            transport: TransportType::Number,
            encode_expr: Some("TransportValue::Number({v}.into())"),
            decode_expr: Some("{v}.as_u64()"),
        },
        ValueType::Float => TransportMapping {
            transport: TransportType::Number,
            encode_expr: Some("TransportValue::from_f64({v})"),
            decode_expr: Some("{v}.as_f64()"),
        },
        ValueType::Url => TransportMapping {
            transport: TransportType::String,
            encode_expr: Some("TransportValue::String({v}.as_str().to_owned())"),
            decode_expr: Some("{v}.as_str().and_then(|s| Url::parse(s).ok())"),
        },
        ValueType::String => TransportMapping::identity(TransportType::String),
        ValueType::Date => TransportMapping::identity(TransportType::Date),
        ValueType::Blob => TransportMapping::identity(TransportType::Blob),
        ValueType::List => TransportMapping::identity(TransportType::List),
        ValueType::Map => TransportMapping::identity(TransportType::Map),
        ValueType::Regex => TransportMapping::identity(TransportType::Regex),
    }
}

/// Resolves the mapping for a descriptor, honoring its transport
/// override. The override wins outright: no encode/decode expressions
/// are carried over from the table.
///
/// The error arm is the defensive contract required of this surface;
/// it cannot fire for descriptors built through the typed API.
pub fn resolve_descriptor(descriptor: &PropertyDescriptor) -> Result<TransportMapping, TypeError> {
    match descriptor.transport_override {
        Some(transport) => Ok(TransportMapping::identity(transport)),
        None => Ok(resolve(descriptor.value_type)),
    }
}

/// Runtime form of the encode expressions: native value → transport
/// value. `None` when the value does not fit the value type.
pub fn encode_transport(value_type: ValueType, value: &PropertyValue) -> Option<TransportValue> {
    match (value_type, value) {
        (ValueType::Boolean, PropertyValue::Bool(b)) => {
            Some(TransportValue::Number(i64::from(*b).into()))
        }
        (ValueType::SignedInteger, PropertyValue::Int(n)) => {
            Some(TransportValue::Number((*n).into()))
        }
        (ValueType::UnsignedInteger, PropertyValue::UInt(n)) => {
            Some(TransportValue::Number((*n).into()))
        }
        (ValueType::Float, PropertyValue::Float(n)) => Some(TransportValue::from_f64(*n)),
        (ValueType::Url, PropertyValue::Url(u)) => {
            Some(TransportValue::String(u.as_str().to_owned()))
        }
        (ValueType::String, PropertyValue::Str(s)) => Some(TransportValue::String(s.clone())),
        (ValueType::Date, PropertyValue::Date(d)) => Some(TransportValue::Date(*d)),
        (ValueType::Blob, PropertyValue::Blob(b)) => Some(TransportValue::Blob(b.clone())),
        (ValueType::List, PropertyValue::List(l)) => Some(TransportValue::List(l.clone())),
        (ValueType::Map, PropertyValue::Map(m)) => Some(TransportValue::Map(m.clone())),
        (ValueType::Regex, PropertyValue::Regex(p)) => Some(TransportValue::Regex(p.clone())),
        _ => None,
    }
}

/// Runtime form of the decode expressions: transport value → native
/// value. `None` when the transport shape does not match.
pub fn decode_native(value_type: ValueType, value: &TransportValue) -> Option<PropertyValue> {
    match value_type {
        ValueType::Boolean => value.as_f64().map(|n| PropertyValue::Bool(n != 0.0)),
        ValueType::SignedInteger => value.as_i64().map(PropertyValue::Int),
        ValueType::UnsignedInteger => value.as_u64().map(PropertyValue::UInt),
        ValueType::Float => value.as_f64().map(PropertyValue::Float),
        ValueType::Url => value
            .as_str()
            .and_then(|s| Url::parse(s).ok())
            .map(PropertyValue::Url),
        ValueType::String => value.as_str().map(|s| PropertyValue::Str(s.to_owned())),
        ValueType::Date => value.as_date().map(PropertyValue::Date),
        ValueType::Blob => value.as_blob().map(|b| PropertyValue::Blob(b.to_vec())),
        ValueType::List => value.as_list().map(|l| PropertyValue::List(l.to_vec())),
        ValueType::Map => value.as_map().map(|m| PropertyValue::Map(m.clone())),
        ValueType::Regex => value.as_regex().map(|p| PropertyValue::Regex(p.to_owned())),
    }
}
