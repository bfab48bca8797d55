use confgen_types::{KeyTable, PropertyDescriptor, TransportMapping};
use std::fmt::Write;

/// Accumulates the two key validation tables during the compiler pass.
///
/// Every alias of a writable descriptor is acceptable from the remote
/// sync channel; every alias of every descriptor is acceptable from
/// the locally enforced profile. Both map to the descriptor's resolved
/// transport type, so a key can never appear with two different types
/// across the tables.
#[derive(Debug, Default)]
pub struct KeyRegistryEmitter {
    sync_writable: KeyTable,
    config_enforceable: KeyTable,
}

impl KeyRegistryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every alias of a descriptor into the applicable tables.
    pub fn record(&mut self, descriptor: &PropertyDescriptor, mapping: &TransportMapping) {
        for alias in &descriptor.aliases {
            if descriptor.writable {
                self.sync_writable.insert(alias, mapping.transport);
            }
            self.config_enforceable.insert(alias, mapping.transport);
        }
    }

    /// Renders both tables as Rust source for the implementation
    /// artifact.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_table(
            &mut out,
            "sync_writable_keys",
            "Keys a remote sync channel may set, with required transport type.",
            &self.sync_writable,
        );
        render_table(
            &mut out,
            "config_enforceable_keys",
            "Keys a locally enforced profile may set, with required transport type.",
            &self.config_enforceable,
        );
        out
    }

    pub fn finish(self) -> (KeyTable, KeyTable) {
        (self.sync_writable, self.config_enforceable)
    }
}

fn render_table(out: &mut String, name: &str, doc: &str, table: &KeyTable) {
    let _ = write!(
        out,
        "\n/// {doc}\npub fn {name}() -> &'static [(&'static str, TransportType)] {{\n    &[\n"
    );
    for (key, transport) in table.iter() {
        let _ = writeln!(
            out,
            "        ({key:?}, TransportType::{}),",
            transport.variant_name()
        );
    }
    out.push_str("    ]\n}\n");
}
