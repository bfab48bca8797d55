use crate::artifact::Artifacts;
use crate::tables::KeyRegistryEmitter;
use crate::CompileError;
use confgen_registry::PropertyRegistry;
use confgen_types::{
    resolve, resolve_descriptor, AccessorKind, PropertyDescriptor, PropertyValue, ValueType,
};
use heck::ToSnakeCase;
use std::collections::BTreeSet;
use std::fmt::Write;

/// Names for the emitted surfaces.
#[derive(Debug, Clone)]
pub struct CompilerOptions {
    /// Name of the emitted declaration trait.
    pub trait_name: String,
    /// Type the implementation surface is emitted for.
    pub store_type: String,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            trait_name: "Properties".to_owned(),
            store_type: "ConfigStore".to_owned(),
        }
    }
}

/// Everything one compiler pass produces.
#[derive(Debug, Clone)]
pub struct CompiledOutput {
    pub artifacts: Artifacts,
    /// Keys a remote sync channel may set, with required transport type.
    pub sync_writable: confgen_types::KeyTable,
    /// Keys a locally enforced profile may set.
    pub config_enforceable: confgen_types::KeyTable,
}

/// Walks the registry once and emits the accessor surface plus the
/// key validation tables.
#[derive(Debug)]
pub struct AccessorCompiler {
    options: CompilerOptions,
}

impl AccessorCompiler {
    pub fn new(options: CompilerOptions) -> Self {
        Self { options }
    }

    pub fn compile(&self, registry: &PropertyRegistry) -> Result<CompiledOutput, CompileError> {
        let mut decl = String::new();
        let mut body = String::new();
        let mut deps: Vec<(String, &'static str)> = Vec::new();
        let mut emitter = KeyRegistryEmitter::new();

        for descriptor in registry.all() {
            let mapping =
                resolve_descriptor(descriptor).map_err(|source| CompileError::Type {
                    alias: descriptor.canonical().to_owned(),
                    source,
                })?;
            tracing::debug!(property = descriptor.canonical(), "emitting accessors");

            self.emit_declaration(&mut decl, descriptor);
            self.emit_getter(&mut body, descriptor);
            if descriptor.writable {
                self.emit_setter(&mut body, descriptor);
            }
            deps.push((
                accessor_name(descriptor),
                if descriptor.writable {
                    "SyncAndConfig"
                } else {
                    "Config"
                },
            ));
            emitter.record(descriptor, &mapping);
        }

        let declaration = self.render_declaration(registry, &decl);
        let implementation = self.render_implementation(registry, &body, &deps, &emitter);
        let (sync_writable, config_enforceable) = emitter.finish();

        tracing::info!(
            properties = registry.len(),
            sync_keys = sync_writable.len(),
            config_keys = config_enforceable.len(),
            "compilation complete"
        );

        Ok(CompiledOutput {
            artifacts: Artifacts {
                declaration,
                implementation,
            },
            sync_writable,
            config_enforceable,
        })
    }

    fn render_declaration(&self, registry: &PropertyRegistry, decl: &str) -> String {
        let mut out = String::new();
        out.push_str(GENERATED_BANNER);
        out.push_str(
            "//\n// Declaration surface: one typed read (and, where writable, write)\n\
             // operation per registered property.\n\n",
        );
        for import in declaration_imports(registry) {
            out.push_str(import);
            out.push('\n');
        }
        let _ = write!(out, "\npub trait {} {{\n{}}}\n", self.options.trait_name, decl);
        out
    }

    fn render_implementation(
        &self,
        registry: &PropertyRegistry,
        body: &str,
        deps: &[(String, &'static str)],
        emitter: &KeyRegistryEmitter,
    ) -> String {
        let mut out = String::new();
        out.push_str(GENERATED_BANNER);
        out.push_str("//\n// Implementation surface: generated resolution bodies, the\n// per-accessor dependency table, and the key validation tables.\n\n");
        out.push_str("use confgen_layers::{ConfigStore, LayerSet};\nuse confgen_types::{TransportType, TransportValue};\n");
        for import in implementation_imports(registry) {
            out.push_str(import);
            out.push('\n');
        }
        let _ = write!(
            out,
            "\nimpl {} for {} {{\n{}}}\n",
            self.options.trait_name, self.options.store_type, body
        );

        out.push_str(
            "\n/// Layer-change dependencies per accessor, for cache invalidation.\n\
             pub fn dependencies() -> &'static [(&'static str, LayerSet)] {\n    &[\n",
        );
        for (name, set) in deps {
            let _ = writeln!(out, "        ({name:?}, LayerSet::{set}),");
        }
        out.push_str("    ]\n}\n");

        out.push_str(&emitter.render());
        out
    }

    fn emit_declaration(&self, out: &mut String, descriptor: &PropertyDescriptor) {
        let name = accessor_name(descriptor);
        let _ = writeln!(
            out,
            "    fn {name}(&self) -> {};",
            native_type(descriptor.value_type)
        );
        if descriptor.writable {
            let _ = writeln!(
                out,
                "    fn set_{name}(&self, v: {});",
                setter_arg_type(descriptor.value_type)
            );
        }
    }

    fn emit_getter(&self, out: &mut String, descriptor: &PropertyDescriptor) {
        let name = accessor_name(descriptor);
        let _ = writeln!(
            out,
            "    fn {name}(&self) -> {} {{",
            native_type(descriptor.value_type)
        );

        if let AccessorKind::Custom { getter, .. } = &descriptor.accessor {
            push_verbatim(out, getter);
            out.push_str("    }\n\n");
            return;
        }

        let decode = decode_template(descriptor.value_type).replace("{v}", "v");
        let hit = if is_option(descriptor.value_type) {
            "return Some(x);"
        } else {
            "return x;"
        };

        if descriptor.writable {
            out.push_str("        let sync = self.sync_snapshot();\n");
            for alias in &descriptor.aliases {
                let _ = writeln!(
                    out,
                    "        if let Some(v) = sync.get({alias:?}) {{\n            if let Some(x) = {decode} {{\n                {hit}\n            }}\n        }}"
                );
            }
        }

        out.push_str("        let config = self.config_snapshot();\n");
        for alias in &descriptor.aliases {
            let _ = writeln!(
                out,
                "        if let Some(v) = config.get({alias:?}) {{\n            if let Some(x) = {decode} {{\n                {hit}\n            }}\n        }}"
            );
        }

        let tail = match &descriptor.default {
            Some(default) => default_literal(default, descriptor.value_type),
            None => zero_literal(descriptor.value_type).to_owned(),
        };
        let _ = writeln!(out, "        {tail}");
        out.push_str("    }\n\n");
    }

    fn emit_setter(&self, out: &mut String, descriptor: &PropertyDescriptor) {
        let name = accessor_name(descriptor);
        let _ = writeln!(
            out,
            "    fn set_{name}(&self, v: {}) {{",
            setter_arg_type(descriptor.value_type)
        );

        if let AccessorKind::Custom {
            setter: Some(setter),
            ..
        } = &descriptor.accessor
        {
            push_verbatim(out, setter);
            out.push_str("    }\n\n");
            return;
        }

        let encode = encode_template(descriptor.value_type).replace("{v}", "v");
        let _ = writeln!(
            out,
            "        self.update_sync_state({:?}, {encode});",
            descriptor.canonical()
        );
        out.push_str("    }\n\n");
    }
}

const GENERATED_BANNER: &str = "// @generated by confgen. Do not edit.\n";

/// Accessor name derived from the canonical alias: first letter
/// lower-cased, rendered in snake_case for the Rust surface.
pub fn accessor_name(descriptor: &PropertyDescriptor) -> String {
    descriptor.canonical().to_snake_case()
}

fn push_verbatim(out: &mut String, block: &str) {
    out.push_str(block);
    if !block.ends_with('\n') {
        out.push('\n');
    }
}

/// Native Rust type exposed by a getter.
fn native_type(value_type: ValueType) -> &'static str {
    match value_type {
        ValueType::Boolean => "bool",
        ValueType::SignedInteger => "i64",
        ValueType::UnsignedInteger => "u64",
        ValueType::Float => "f64",
        ValueType::String => "String",
        ValueType::Url => "Option<Url>",
        ValueType::Date => "Option<DateTime<Utc>>",
        ValueType::Blob => "Vec<u8>",
        ValueType::List => "Vec<TransportValue>",
        ValueType::Map => "BTreeMap<String, TransportValue>",
        ValueType::Regex => "Option<String>",
    }
}

/// Argument type accepted by a setter (never optional: setting a
/// property always supplies a value).
fn setter_arg_type(value_type: ValueType) -> &'static str {
    match value_type {
        ValueType::Boolean => "bool",
        ValueType::SignedInteger => "i64",
        ValueType::UnsignedInteger => "u64",
        ValueType::Float => "f64",
        ValueType::String => "String",
        ValueType::Url => "Url",
        ValueType::Date => "DateTime<Utc>",
        ValueType::Blob => "Vec<u8>",
        ValueType::List => "Vec<TransportValue>",
        ValueType::Map => "BTreeMap<String, TransportValue>",
        ValueType::Regex => "String",
    }
}

fn is_option(value_type: ValueType) -> bool {
    matches!(
        value_type,
        ValueType::Url | ValueType::Date | ValueType::Regex
    )
}

fn zero_literal(value_type: ValueType) -> &'static str {
    match value_type {
        ValueType::Boolean => "false",
        ValueType::SignedInteger => "0",
        ValueType::UnsignedInteger => "0",
        ValueType::Float => "0.0",
        ValueType::String => "String::new()",
        ValueType::Url => "None",
        ValueType::Date => "None",
        ValueType::Blob => "Vec::new()",
        ValueType::List => "Vec::new()",
        ValueType::Map => "BTreeMap::new()",
        ValueType::Regex => "None",
    }
}

/// Transport → native expression over a `{v}` placeholder. Uses the
/// mapping's decode expression where one exists, or the typed
/// extraction for identity-transported types.
fn decode_template(value_type: ValueType) -> String {
    if let Some(expr) = resolve(value_type).decode_expr {
        return expr.to_owned();
    }
    match value_type {
        ValueType::String => "{v}.as_str().map(str::to_owned)",
        ValueType::Date => "{v}.as_date()",
        ValueType::Blob => "{v}.as_blob().map(|b| b.to_vec())",
        ValueType::List => "{v}.as_list().map(|l| l.to_vec())",
        ValueType::Map => "{v}.as_map().cloned()",
        ValueType::Regex => "{v}.as_regex().map(str::to_owned)",
        // Non-identity types always carry a decode expression.
        _ => unreachable!("identity decode requested for converting type"),
    }
    .to_owned()
}

/// Native → transport expression over a `{v}` placeholder.
fn encode_template(value_type: ValueType) -> String {
    if let Some(expr) = resolve(value_type).encode_expr {
        return expr.to_owned();
    }
    match value_type {
        ValueType::String => "TransportValue::String({v})",
        ValueType::Date => "TransportValue::Date({v})",
        ValueType::Blob => "TransportValue::Blob({v})",
        ValueType::List => "TransportValue::List({v})",
        ValueType::Map => "TransportValue::Map({v})",
        ValueType::Regex => "TransportValue::Regex({v})",
        _ => unreachable!("identity encode requested for converting type"),
    }
    .to_owned()
}

/// Renders a configured default as a native literal.
fn default_literal(default: &PropertyValue, value_type: ValueType) -> String {
    match default {
        PropertyValue::Bool(b) => b.to_string(),
        PropertyValue::Int(n) => n.to_string(),
        PropertyValue::UInt(n) => n.to_string(),
        PropertyValue::Float(n) => {
            if n.fract() == 0.0 {
                format!("{n:.1}")
            } else {
                n.to_string()
            }
        }
        PropertyValue::Str(s) => format!("{s:?}.to_owned()"),
        PropertyValue::Url(u) => format!("Url::parse({:?}).ok()", u.as_str()),
        PropertyValue::Date(d) => format!(
            "DateTime::parse_from_rfc3339({:?}).ok().map(|d| d.with_timezone(&Utc))",
            d.to_rfc3339()
        ),
        PropertyValue::Regex(p) => format!("Some({p:?}.to_owned())"),
        PropertyValue::Blob(b) => format!("vec!{b:?}"),
        // Structured defaults are not expressible as literals; the
        // registry only accepts them empty, which is the zero value.
        PropertyValue::List(_) | PropertyValue::Map(_) | PropertyValue::Unset => {
            zero_literal(value_type).to_owned()
        }
    }
}

fn declaration_imports(registry: &PropertyRegistry) -> Vec<&'static str> {
    let types: BTreeSet<ValueType> = registry.all().iter().map(|d| d.value_type).collect();
    let mut imports = Vec::new();
    if types.contains(&ValueType::Map) {
        imports.push("use std::collections::BTreeMap;");
    }
    if types.contains(&ValueType::Date) {
        imports.push("use chrono::{DateTime, Utc};");
    }
    if types.contains(&ValueType::List) || types.contains(&ValueType::Map) {
        imports.push("use confgen_types::TransportValue;");
    }
    if types.contains(&ValueType::Url) {
        imports.push("use url::Url;");
    }
    imports
}

fn implementation_imports(registry: &PropertyRegistry) -> Vec<&'static str> {
    let types: BTreeSet<ValueType> = registry.all().iter().map(|d| d.value_type).collect();
    let mut imports = Vec::new();
    if types.contains(&ValueType::Map) {
        imports.push("use std::collections::BTreeMap;");
    }
    if types.contains(&ValueType::Date) {
        imports.push("use chrono::{DateTime, Utc};");
    }
    if types.contains(&ValueType::Url) {
        imports.push("use url::Url;");
    }
    imports
}
