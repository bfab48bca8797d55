use crate::layer::LayerWrite;
use crate::LayerError;
use confgen_types::{KeyTable, TransportValue};

/// Validates an untrusted key/value pair against an emitted key table
/// and stores it.
///
/// This is the single sanctioned validation boundary: the accessor
/// layer above assumes stored values already match their declared
/// transport type and performs no checking of its own.
pub fn store_inbound(
    layer: &impl LayerWrite,
    table: &KeyTable,
    key: &str,
    value: TransportValue,
) -> Result<(), LayerError> {
    let expected = table.get(key).ok_or_else(|| LayerError::UnknownKey {
        key: key.to_owned(),
    })?;

    let found = value.transport_type();
    if found != expected {
        return Err(LayerError::TypeMismatch {
            key: key.to_owned(),
            expected,
            found,
        });
    }

    layer.set(key, value);
    Ok(())
}
