use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// The semantic type of a configuration property.
///
/// This is a closed set: transport mapping is resolved by exhaustive
/// match dispatch, never by inspecting type-name strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Boolean,
    SignedInteger,
    UnsignedInteger,
    Float,
    String,
    Url,
    Date,
    Blob,
    List,
    Map,
    Regex,
}

impl ValueType {
    /// The zero value returned when a property is absent from every
    /// applicable layer and has no configured default.
    ///
    /// Primitives zero out; reference-like types (URL, date, regex)
    /// use the explicit [`PropertyValue::Unset`] sentinel.
    pub fn zero(&self) -> PropertyValue {
        match self {
            ValueType::Boolean => PropertyValue::Bool(false),
            ValueType::SignedInteger => PropertyValue::Int(0),
            ValueType::UnsignedInteger => PropertyValue::UInt(0),
            ValueType::Float => PropertyValue::Float(0.0),
            ValueType::String => PropertyValue::Str(String::new()),
            ValueType::Url => PropertyValue::Unset,
            ValueType::Date => PropertyValue::Unset,
            ValueType::Blob => PropertyValue::Blob(Vec::new()),
            ValueType::List => PropertyValue::List(Vec::new()),
            ValueType::Map => PropertyValue::Map(BTreeMap::new()),
            ValueType::Regex => PropertyValue::Unset,
        }
    }
}

/// The representation type a value takes inside a layer.
///
/// Booleans and all numerics travel as [`TransportType::Number`]; URLs
/// travel as strings; everything else transports as itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    Number,
    String,
    Date,
    Blob,
    List,
    Map,
    Regex,
}

impl TransportType {
    /// Name used when rendering the emitted key tables.
    pub fn variant_name(&self) -> &'static str {
        match self {
            TransportType::Number => "Number",
            TransportType::String => "String",
            TransportType::Date => "Date",
            TransportType::Blob => "Blob",
            TransportType::List => "List",
            TransportType::Map => "Map",
            TransportType::Regex => "Regex",
        }
    }
}

/// A value as it sits in a sync or config layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportValue {
    Number(serde_json::Number),
    String(String),
    Date(DateTime<Utc>),
    Blob(Vec<u8>),
    List(Vec<TransportValue>),
    Map(BTreeMap<String, TransportValue>),
    /// A regex pattern. Compilation/matching happens downstream.
    Regex(String),
}

impl TransportValue {
    /// Builds a numeric transport value from a float, mapping
    /// non-finite inputs to zero.
    pub fn from_f64(n: f64) -> Self {
        match serde_json::Number::from_f64(n) {
            Some(num) => TransportValue::Number(num),
            None => TransportValue::Number(0.into()),
        }
    }

    /// The transport type this value satisfies.
    pub fn transport_type(&self) -> TransportType {
        match self {
            TransportValue::Number(_) => TransportType::Number,
            TransportValue::String(_) => TransportType::String,
            TransportValue::Date(_) => TransportType::Date,
            TransportValue::Blob(_) => TransportType::Blob,
            TransportValue::List(_) => TransportType::List,
            TransportValue::Map(_) => TransportType::Map,
            TransportValue::Regex(_) => TransportType::Regex,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TransportValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TransportValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            TransportValue::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TransportValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            TransportValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            TransportValue::Blob(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[TransportValue]> {
        match self {
            TransportValue::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, TransportValue>> {
        match self {
            TransportValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_regex(&self) -> Option<&str> {
        match self {
            TransportValue::Regex(p) => Some(p),
            _ => None,
        }
    }
}

/// A native typed value: a configured default, or the result of
/// decoding a transport value through the precedence chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Url(Url),
    Date(DateTime<Utc>),
    Blob(Vec<u8>),
    List(Vec<TransportValue>),
    Map(BTreeMap<String, TransportValue>),
    /// A regex pattern in native form.
    Regex(String),
    /// The unset sentinel for reference-like types with no value.
    Unset,
}

impl PropertyValue {
    /// Whether this literal is consistent with the given value type.
    ///
    /// `Unset` is consistent with nothing: it is a resolution result,
    /// not a configurable default.
    pub fn matches(&self, value_type: ValueType) -> bool {
        matches!(
            (self, value_type),
            (PropertyValue::Bool(_), ValueType::Boolean)
                | (PropertyValue::Int(_), ValueType::SignedInteger)
                | (PropertyValue::UInt(_), ValueType::UnsignedInteger)
                | (PropertyValue::Float(_), ValueType::Float)
                | (PropertyValue::Str(_), ValueType::String)
                | (PropertyValue::Url(_), ValueType::Url)
                | (PropertyValue::Date(_), ValueType::Date)
                | (PropertyValue::Blob(_), ValueType::Blob)
                | (PropertyValue::List(_), ValueType::List)
                | (PropertyValue::Map(_), ValueType::Map)
                | (PropertyValue::Regex(_), ValueType::Regex)
        )
    }
}
