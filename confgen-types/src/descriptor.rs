use crate::value::{PropertyValue, TransportType, ValueType};
use serde::{Deserialize, Serialize};

/// How a property's accessor bodies are produced.
///
/// Modeled as a tagged variant rather than optional logic fields so
/// the compiler dispatches structurally: the generated resolution
/// algorithm and the verbatim override path never mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorKind {
    /// Getter (and setter, if writable) are generated from the layered
    /// resolution algorithm.
    Generated,
    /// Verbatim logic blocks replace the generated bodies entirely.
    /// The descriptor still contributes key-table entries derived from
    /// its value type / transport override.
    Custom {
        getter: String,
        setter: Option<String>,
    },
}

/// The immutable metadata record describing one configuration property.
///
/// `aliases[0]` is the canonical key: it derives the accessor name and
/// is the key the generated setter writes under. Descriptors are built
/// once at tool startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub aliases: Vec<String>,
    pub value_type: ValueType,
    /// Presence is structural: a default of `false`, `0`, or `""` is a
    /// real default, distinct from no default configured.
    pub default: Option<PropertyValue>,
    pub writable: bool,
    /// Explicit transport type, overriding the resolved mapping
    /// outright. No encode/decode is applied when set.
    pub transport_override: Option<TransportType>,
    pub accessor: AccessorKind,
}

impl PropertyDescriptor {
    fn new(aliases: &[&str], value_type: ValueType, writable: bool) -> Self {
        Self {
            aliases: aliases.iter().map(|a| (*a).to_owned()).collect(),
            value_type,
            default: None,
            writable,
            transport_override: None,
            accessor: AccessorKind::Generated,
        }
    }

    /// A property resolved from the config layer and default only.
    pub fn read_only(aliases: &[&str], value_type: ValueType) -> Self {
        Self::new(aliases, value_type, false)
    }

    /// A property that also consults the sync layer and gets a setter.
    pub fn read_write(aliases: &[&str], value_type: ValueType) -> Self {
        Self::new(aliases, value_type, true)
    }

    /// A property whose getter is the given verbatim block.
    pub fn custom(aliases: &[&str], value_type: ValueType, getter: &str) -> Self {
        let mut d = Self::new(aliases, value_type, false);
        d.accessor = AccessorKind::Custom {
            getter: getter.to_owned(),
            setter: None,
        };
        d
    }

    /// Attaches a verbatim setter block. Implies writability.
    ///
    /// Only meaningful on a [`Self::custom`] descriptor: a verbatim
    /// setter needs a verbatim getter, and registration rejects a
    /// custom accessor with an empty getter block.
    pub fn with_setter(mut self, setter: &str) -> Self {
        let getter = match self.accessor {
            AccessorKind::Custom { getter, .. } => getter,
            AccessorKind::Generated => String::new(),
        };
        self.accessor = AccessorKind::Custom {
            getter,
            setter: Some(setter.to_owned()),
        };
        self.writable = true;
        self
    }

    /// Attaches a default literal. Must match the value type; checked
    /// at registration.
    pub fn with_default(mut self, default: PropertyValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Forces the transport type for key-table registration.
    ///
    /// Only meaningful on a [`Self::custom`] descriptor: generated
    /// accessors derive their codec from the value type, so
    /// registration rejects an override on a generated descriptor.
    pub fn with_transport(mut self, transport: TransportType) -> Self {
        self.transport_override = Some(transport);
        self
    }

    /// The canonical key name (`aliases[0]`).
    ///
    /// Panics only on an empty alias list, which registration rejects.
    pub fn canonical(&self) -> &str {
        &self.aliases[0]
    }

    /// Whether a custom getter replaces the generated algorithm.
    pub fn is_custom(&self) -> bool {
        matches!(self.accessor, AccessorKind::Custom { .. })
    }
}
