//! Write-once property registry.
//!
//! Descriptors are appended in registration order and validated on the
//! way in: alias collisions (anywhere in the registry, canonical or
//! secondary), empty alias lists, and default/value-type mismatches
//! are all registration-time errors. Registration order is preserved
//! solely so compiler output is deterministic; resolution semantics do
//! not depend on it.

mod registry;

pub use registry::PropertyRegistry;

/// Errors raised while populating a registry. All are fatal: the
/// compiler never runs over a partially valid registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two descriptors (or two aliases of one descriptor) claim the
    /// same key.
    #[error("alias {alias:?} already registered (while registering {property:?})")]
    DuplicateAlias { alias: String, property: String },

    /// A descriptor with no aliases has no canonical key.
    #[error("descriptor has an empty alias list")]
    EmptyAliases,

    /// The configured default literal does not fit the value type.
    #[error("default for {property:?} does not match value type {expected:?}")]
    DefaultTypeMismatch {
        property: String,
        expected: confgen_types::ValueType,
    },

    /// A generated accessor derives its codec from the value type, so
    /// a forced transport type is only honorable alongside a custom
    /// accessor. Without one, the emitted key tables and the generated
    /// getter/setter would disagree on the value's shape.
    #[error("transport override on {property:?} requires a custom accessor")]
    OverrideRequiresCustomAccessor { property: String },

    /// A custom accessor with no getter block would emit an empty
    /// getter body.
    #[error("custom accessor for {property:?} has an empty getter block")]
    EmptyCustomGetter { property: String },
}
