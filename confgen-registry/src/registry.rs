use crate::RegistryError;
use confgen_types::{AccessorKind, PropertyDescriptor};
use std::collections::HashSet;

/// An ordered, write-once sequence of property descriptors.
///
/// Populated by registration calls at tool startup, then handed to the
/// compiler for a single pass. No removal: a registry is rebuilt from
/// scratch on every run.
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    descriptors: Vec<PropertyDescriptor>,
    seen_aliases: HashSet<String>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor, validating it against the whole registry.
    ///
    /// An alias used as a secondary name of one property must not
    /// reappear anywhere else, so the collision check covers every
    /// alias registered so far, not just canonical names. Accessor
    /// shape is validated here too: a transport override must come
    /// with a custom accessor, and a custom accessor must carry a
    /// getter block.
    pub fn register(&mut self, descriptor: PropertyDescriptor) -> Result<(), RegistryError> {
        if descriptor.aliases.is_empty() {
            return Err(RegistryError::EmptyAliases);
        }

        let canonical = descriptor.canonical().to_owned();

        if let Some(default) = &descriptor.default {
            if !default.matches(descriptor.value_type) {
                return Err(RegistryError::DefaultTypeMismatch {
                    property: canonical,
                    expected: descriptor.value_type,
                });
            }
        }

        match &descriptor.accessor {
            AccessorKind::Generated => {
                if descriptor.transport_override.is_some() {
                    return Err(RegistryError::OverrideRequiresCustomAccessor {
                        property: canonical,
                    });
                }
            }
            AccessorKind::Custom { getter, .. } => {
                if getter.trim().is_empty() {
                    return Err(RegistryError::EmptyCustomGetter {
                        property: canonical,
                    });
                }
            }
        }

        // Check all aliases before inserting any, so a failed
        // registration leaves the registry untouched.
        let mut intra = HashSet::new();
        for alias in &descriptor.aliases {
            if self.seen_aliases.contains(alias) || !intra.insert(alias.as_str()) {
                return Err(RegistryError::DuplicateAlias {
                    alias: alias.clone(),
                    property: canonical,
                });
            }
        }

        for alias in &descriptor.aliases {
            self.seen_aliases.insert(alias.clone());
        }
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Descriptors in registration order.
    pub fn all(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
