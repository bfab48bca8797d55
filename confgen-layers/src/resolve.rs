//! Runtime form of the layered resolution algorithm.
//!
//! Generated getters inline this logic; hosts that interpret
//! descriptors instead of compiling them (and the precedence tests)
//! call it directly.

use crate::layer::LayerSnapshot;
use confgen_types::{decode_native, PropertyDescriptor, PropertyValue};

/// Resolves a property against layer snapshots, in strict precedence:
///
/// 1. writable only — each alias in declared order against the sync
///    snapshot, first decodable hit wins
/// 2. each alias in declared order against the config snapshot
/// 3. the configured default
/// 4. the value type's zero value
///
/// Read-only descriptors skip step 1 entirely: sync-layer state never
/// influences a property that was not declared writable. Values whose
/// transport shape does not decode fall through to the next source.
///
/// Custom descriptors bypass this algorithm; callers dispatch on
/// [`confgen_types::AccessorKind`] before getting here. Registration
/// guarantees a transport override always pairs with a custom
/// accessor, so this algorithm only ever decodes by value type.
pub fn resolve_property(
    descriptor: &PropertyDescriptor,
    sync: &LayerSnapshot,
    config: &LayerSnapshot,
) -> PropertyValue {
    if descriptor.writable {
        for alias in &descriptor.aliases {
            if let Some(value) = sync.get(alias) {
                match decode_native(descriptor.value_type, value) {
                    Some(native) => return native,
                    None => tracing::debug!(alias = %alias, "sync value has wrong shape, skipping"),
                }
            }
        }
    }

    for alias in &descriptor.aliases {
        if let Some(value) = config.get(alias) {
            match decode_native(descriptor.value_type, value) {
                Some(native) => return native,
                None => tracing::debug!(alias = %alias, "config value has wrong shape, skipping"),
            }
        }
    }

    if let Some(default) = &descriptor.default {
        return default.clone();
    }

    descriptor.value_type.zero()
}
