//! Core type model for the confgen property compiler.
//!
//! This crate defines the vocabulary shared by the registry, the layer
//! runtime, and the code generator:
//! - [`ValueType`] — the closed set of semantic property types
//! - [`TransportType`] / [`TransportValue`] — the shape a value takes
//!   when crossing a layer boundary
//! - [`PropertyValue`] — native typed literals (defaults, decoded reads)
//! - [`PropertyDescriptor`] — the immutable per-property metadata record
//! - [`TransportMapping`] — the value-type → transport mapping, with
//!   optional encode/decode expressions for emission and matching
//!   runtime conversion helpers
//! - [`KeyTable`] — an alias → transport-type validation table
//!
//! Nothing here performs I/O or holds mutable state; descriptors are
//! constructed once and consumed in a single compiler pass.

mod descriptor;
mod table;
mod transport;
mod value;

pub use descriptor::{AccessorKind, PropertyDescriptor};
pub use table::KeyTable;
pub use transport::{decode_native, encode_transport, resolve, resolve_descriptor, TransportMapping};
pub use value::{PropertyValue, TransportType, TransportValue, ValueType};

/// Errors from the type-transport mapping.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// A value type outside the closed set reached the resolver.
    ///
    /// Unreachable for descriptors built through the typed API; kept as
    /// the defensive contract of the fallible resolver surface.
    #[error("no transport mapping for value type: {tag}")]
    UnknownType { tag: String },
}
