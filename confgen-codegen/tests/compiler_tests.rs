use confgen_codegen::{AccessorCompiler, CompiledOutput, CompilerOptions};
use confgen_registry::PropertyRegistry;
use confgen_types::{PropertyDescriptor, PropertyValue, TransportType, ValueType};
use pretty_assertions::assert_eq;

fn compile(registry: &PropertyRegistry) -> CompiledOutput {
    AccessorCompiler::new(CompilerOptions::default())
        .compile(registry)
        .unwrap()
}

/// Extracts the body of one emitted `fn` from an artifact.
fn fn_body<'a>(artifact: &'a str, name: &str) -> &'a str {
    let needle = format!("    fn {name}(");
    let start = artifact
        .find(&needle)
        .unwrap_or_else(|| panic!("no fn {name} in artifact:\n{artifact}"));
    let rest = &artifact[start..];
    let end = rest[1..].find("\n    fn ").map(|i| i + 1).unwrap_or_else(|| {
        rest.find("\n}").expect("unterminated artifact")
    });
    &rest[..end]
}

// ── Getter emission ──────────────────────────────────────────────

#[test]
fn writable_getter_checks_sync_before_config() {
    let mut r = PropertyRegistry::new();
    r.register(PropertyDescriptor::read_write(&["BlockUSBMount"], ValueType::Boolean))
        .unwrap();
    let out = compile(&r);

    let body = fn_body(&out.artifacts.implementation, "block_usb_mount");
    let sync_at = body.find("sync.get(\"BlockUSBMount\")").expect("sync lookup");
    let config_at = body
        .find("config.get(\"BlockUSBMount\")")
        .expect("config lookup");
    assert!(sync_at < config_at, "sync must be consulted first:\n{body}");
    assert!(body.contains("v.as_f64().map(|n| n != 0.0)"));
    assert!(body.trim_end().ends_with("false\n    }"));
}

#[test]
fn read_only_getter_never_touches_sync_layer() {
    let mut r = PropertyRegistry::new();
    r.register(
        PropertyDescriptor::read_only(&["EventLogPath"], ValueType::String)
            .with_default(PropertyValue::Str("/var/db/agent/events.log".into())),
    )
    .unwrap();
    let out = compile(&r);

    let body = fn_body(&out.artifacts.implementation, "event_log_path");
    assert!(!body.contains("sync_snapshot"));
    assert!(!body.contains("sync.get"));
    assert!(body.contains("config.get(\"EventLogPath\")"));
    assert!(body.contains("\"/var/db/agent/events.log\".to_owned()"));
}

#[test]
fn aliases_emitted_in_declared_order() {
    let mut r = PropertyRegistry::new();
    r.register(PropertyDescriptor::read_write(
        &["AllowedPathRegex", "WhitelistRegex"],
        ValueType::Regex,
    ))
    .unwrap();
    let out = compile(&r);

    let body = fn_body(&out.artifacts.implementation, "allowed_path_regex");
    let canonical = body.find("sync.get(\"AllowedPathRegex\")").unwrap();
    let legacy = body.find("sync.get(\"WhitelistRegex\")").unwrap();
    assert!(canonical < legacy);
    // Option-typed native: hits are wrapped, misses fall to None.
    assert!(body.contains("return Some(x);"));
    assert!(body.trim_end().ends_with("None\n    }"));
}

#[test]
fn zero_value_tail_when_no_default() {
    let mut r = PropertyRegistry::new();
    r.register(PropertyDescriptor::read_only(&["AboutText"], ValueType::String))
        .unwrap();
    r.register(PropertyDescriptor::read_only(&["SyncProxyConfig"], ValueType::Map))
        .unwrap();
    let out = compile(&r);

    assert!(fn_body(&out.artifacts.implementation, "about_text")
        .trim_end()
        .ends_with("String::new()\n    }"));
    assert!(fn_body(&out.artifacts.implementation, "sync_proxy_config")
        .trim_end()
        .ends_with("BTreeMap::new()\n    }"));
}

// ── Setter emission ──────────────────────────────────────────────

#[test]
fn setter_writes_sync_layer_under_canonical_alias_only() {
    let mut r = PropertyRegistry::new();
    r.register(PropertyDescriptor::read_write(
        &["BlockedPathRegex", "BlacklistRegex"],
        ValueType::Regex,
    ))
    .unwrap();
    let out = compile(&r);

    let body = fn_body(&out.artifacts.implementation, "set_blocked_path_regex");
    assert!(body.contains(
        "self.update_sync_state(\"BlockedPathRegex\", TransportValue::Regex(v));"
    ));
    assert!(!body.contains("BlacklistRegex"));
    assert!(!body.contains("config"));
}

#[test]
fn setter_applies_encode_expression() {
    let mut r = PropertyRegistry::new();
    r.register(PropertyDescriptor::read_write(&["SyncCleanRequired"], ValueType::Boolean))
        .unwrap();
    let out = compile(&r);

    let body = fn_body(&out.artifacts.implementation, "set_sync_clean_required");
    assert!(body.contains(
        "self.update_sync_state(\"SyncCleanRequired\", TransportValue::Number(i64::from(v).into()));"
    ));
}

#[test]
fn read_only_property_gets_no_setter() {
    let mut r = PropertyRegistry::new();
    r.register(PropertyDescriptor::read_only(&["AboutText"], ValueType::String))
        .unwrap();
    let out = compile(&r);

    assert!(!out.artifacts.declaration.contains("set_about_text"));
    assert!(!out.artifacts.implementation.contains("set_about_text"));
}

// ── Custom overrides ─────────────────────────────────────────────

#[test]
fn custom_getter_replaces_generated_algorithm_entirely() {
    let mut r = PropertyRegistry::new();
    r.register(PropertyDescriptor::custom(
        &["AnswerToEverything"],
        ValueType::SignedInteger,
        "        42\n",
    ))
    .unwrap();
    let out = compile(&r);

    let body = fn_body(&out.artifacts.implementation, "answer_to_everything");
    assert!(body.contains("        42"));
    assert!(!body.contains("snapshot"));
    assert!(!body.contains(".get("));
    assert!(!body.contains("AnswerToEverything"), "no layer lookups:\n{body}");
}

#[test]
fn custom_setter_emitted_verbatim() {
    let mut r = PropertyRegistry::new();
    r.register(
        PropertyDescriptor::custom(&["Mode"], ValueType::SignedInteger, "        1\n")
            .with_setter(
                "        if v == 1 || v == 2 {\n            self.update_sync_state(\"Mode\", TransportValue::Number(v.into()));\n        }\n",
            ),
    )
    .unwrap();
    let out = compile(&r);

    let body = fn_body(&out.artifacts.implementation, "set_mode");
    assert!(body.contains("if v == 1 || v == 2 {"));
    // Custom setter implies writability.
    assert!(out.artifacts.declaration.contains("fn set_mode(&self, v: i64);"));
    assert_eq!(out.sync_writable.get("Mode"), Some(TransportType::Number));
}

// ── Declaration surface ──────────────────────────────────────────

#[test]
fn declaration_carries_typed_signatures() {
    let mut r = PropertyRegistry::new();
    r.register(PropertyDescriptor::read_write(&["BlockUSBMount"], ValueType::Boolean))
        .unwrap();
    r.register(PropertyDescriptor::read_only(&["SyncBaseURL"], ValueType::Url))
        .unwrap();
    r.register(PropertyDescriptor::read_write(&["FullSyncLastSuccess"], ValueType::Date))
        .unwrap();
    let out = compile(&r);

    let decl = &out.artifacts.declaration;
    assert!(decl.contains("pub trait Properties {"));
    assert!(decl.contains("fn block_usb_mount(&self) -> bool;"));
    assert!(decl.contains("fn set_block_usb_mount(&self, v: bool);"));
    assert!(decl.contains("fn sync_base_url(&self) -> Option<Url>;"));
    assert!(decl.contains("fn full_sync_last_success(&self) -> Option<DateTime<Utc>>;"));
    assert!(decl.contains("fn set_full_sync_last_success(&self, v: DateTime<Utc>);"));
    assert!(decl.contains("use url::Url;"));
    assert!(decl.contains("use chrono::{DateTime, Utc};"));
}

// ── Dependency notifications ─────────────────────────────────────

#[test]
fn dependencies_reflect_readable_layers() {
    let mut r = PropertyRegistry::new();
    r.register(PropertyDescriptor::read_write(&["EnableBundles"], ValueType::Boolean))
        .unwrap();
    r.register(PropertyDescriptor::read_only(&["AboutText"], ValueType::String))
        .unwrap();
    let out = compile(&r);

    let imp = &out.artifacts.implementation;
    assert!(imp.contains("(\"enable_bundles\", LayerSet::SyncAndConfig),"));
    assert!(imp.contains("(\"about_text\", LayerSet::Config),"));
}

// ── Key tables ───────────────────────────────────────────────────

#[test]
fn transport_override_lands_in_tables() {
    let mut r = PropertyRegistry::new();
    r.register(
        PropertyDescriptor::custom(&["StaticRules"], ValueType::Map, "        BTreeMap::new()\n")
            .with_transport(TransportType::List),
    )
    .unwrap();
    let out = compile(&r);

    assert_eq!(out.config_enforceable.get("StaticRules"), Some(TransportType::List));
    assert_eq!(out.sync_writable.get("StaticRules"), None);
    assert!(out
        .artifacts
        .implementation
        .contains("(\"StaticRules\", TransportType::List),"));
}

#[test]
fn rendered_tables_match_in_memory_tables() {
    let mut r = PropertyRegistry::new();
    r.register(PropertyDescriptor::read_write(&["BlockUSBMount"], ValueType::Boolean))
        .unwrap();
    r.register(PropertyDescriptor::read_only(&["EventLogPath"], ValueType::String))
        .unwrap();
    let out = compile(&r);

    let imp = &out.artifacts.implementation;
    let sync_fn = imp.find("pub fn sync_writable_keys()").unwrap();
    let config_fn = imp.find("pub fn config_enforceable_keys()").unwrap();
    assert!(imp[sync_fn..config_fn].contains("(\"BlockUSBMount\", TransportType::Number),"));
    assert!(!imp[sync_fn..config_fn].contains("EventLogPath"));
    assert!(imp[config_fn..].contains("(\"EventLogPath\", TransportType::String),"));
    assert_eq!(out.sync_writable.len(), 1);
    assert_eq!(out.config_enforceable.len(), 2);
}

// ── Determinism and artifact writing ─────────────────────────────

#[test]
fn identical_registries_compile_to_identical_artifacts() {
    let build = || {
        let mut r = PropertyRegistry::new();
        r.register(PropertyDescriptor::read_write(&["A"], ValueType::Boolean))
            .unwrap();
        r.register(PropertyDescriptor::read_only(&["B"], ValueType::Url))
            .unwrap();
        compile(&r)
    };
    let first = build();
    let second = build();
    assert_eq!(first.artifacts, second.artifacts);
}

#[test]
fn artifacts_written_to_output_directory() {
    let mut r = PropertyRegistry::new();
    r.register(PropertyDescriptor::read_only(&["EventLogPath"], ValueType::String))
        .unwrap();
    let out = compile(&r);

    let dir = tempfile::tempdir().unwrap();
    let (decl_path, impl_path) = out.artifacts.write_to(dir.path()).unwrap();
    assert_eq!(decl_path.file_name().unwrap(), "properties.rs");
    assert_eq!(impl_path.file_name().unwrap(), "properties_impl.rs");
    assert_eq!(
        std::fs::read_to_string(&decl_path).unwrap(),
        out.artifacts.declaration
    );
    assert_eq!(
        std::fs::read_to_string(&impl_path).unwrap(),
        out.artifacts.implementation
    );
}

#[test]
fn custom_trait_and_store_names_respected() {
    let mut r = PropertyRegistry::new();
    r.register(PropertyDescriptor::read_only(&["AboutText"], ValueType::String))
        .unwrap();
    let out = AccessorCompiler::new(CompilerOptions {
        trait_name: "AgentProperties".into(),
        store_type: "AgentStore".into(),
    })
    .compile(&r)
    .unwrap();

    assert!(out.artifacts.declaration.contains("pub trait AgentProperties {"));
    assert!(out
        .artifacts
        .implementation
        .contains("impl AgentProperties for AgentStore {"));
}
