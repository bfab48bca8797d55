//! Layer runtime for confgen-generated accessor surfaces.
//!
//! The compiler core never owns sync or config state; it reads and
//! writes through injected capabilities defined here:
//! - [`LayerRead`] / [`LayerWrite`] — get/set-by-key capabilities
//! - [`MemoryLayer`] — lock-guarded in-memory layer with torn-free
//!   snapshots
//! - [`ConfigStore`] — the sync + config layer pair generated
//!   accessors are implemented against
//! - [`resolve_property`] — the runtime form of the layered
//!   precedence algorithm
//! - [`store_inbound`] — the single boundary where untrusted
//!   key/value pairs are validated against an emitted key table
//!
//! Absent keys are never errors here: they fall through the
//! precedence chain to the default or zero value.

mod inbound;
mod layer;
mod resolve;

pub use inbound::store_inbound;
pub use layer::{ConfigStore, LayerKind, LayerRead, LayerSet, LayerSnapshot, LayerWrite, MemoryLayer};
pub use resolve::resolve_property;

/// Errors raised when admitting inbound values into a layer.
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    /// The key is not in the validation table for this layer.
    #[error("key {key:?} is not accepted by this layer")]
    UnknownKey { key: String },

    /// The value's transport shape does not match the table entry.
    #[error("value for {key:?} must be {expected:?}, got {found:?}")]
    TypeMismatch {
        key: String,
        expected: confgen_types::TransportType,
        found: confgen_types::TransportType,
    },
}
