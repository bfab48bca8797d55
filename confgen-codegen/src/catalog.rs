//! Built-in property catalog.
//!
//! A representative endpoint-agent configuration surface, registered
//! the way a driving tool would at startup. Doubles as fixture data
//! for the compiler tests.

use confgen_registry::{PropertyRegistry, RegistryError};
use confgen_types::{PropertyDescriptor, PropertyValue, TransportType, ValueType};

// Operating mode. 1 = monitor, 2 = lockdown; anything else falls back
// to monitor. Settable by the sync server, hence the guarded setter.
const CLIENT_MODE_GETTER: &str = "        let sync = self.sync_snapshot();
        if let Some(m) = sync.get(\"ClientMode\").and_then(|v| v.as_i64()) {
            if m == 1 || m == 2 {
                return m;
            }
        }
        let config = self.config_snapshot();
        if let Some(m) = config.get(\"ClientMode\").and_then(|v| v.as_i64()) {
            if m == 1 || m == 2 {
                return m;
            }
        }
        1
";

const CLIENT_MODE_SETTER: &str = "        if v == 1 || v == 2 {
            self.update_sync_state(\"ClientMode\", TransportValue::Number(v.into()));
        }
";

// Event log destination, normalized to a known tag.
const EVENT_LOG_TYPE_GETTER: &str = "        let config = self.config_snapshot();
        let log_type = config
            .get(\"EventLogType\")
            .and_then(|v| v.as_str())
            .map(str::to_lowercase);
        match log_type.as_deref() {
            Some(t @ (\"syslog\" | \"file\" | \"null\" | \"protobuf\")) => t.to_owned(),
            _ => \"file\".to_owned(),
        }
";

// Static rules arrive as a list of rule maps; the accessor keys them
// by identifier.
const STATIC_RULES_GETTER: &str = "        let config = self.config_snapshot();
        let mut rules = BTreeMap::new();
        if let Some(list) = config.get(\"StaticRules\").and_then(|v| v.as_list().map(|l| l.to_vec())) {
            for rule in list {
                let id = rule
                    .as_map()
                    .and_then(|m| m.get(\"identifier\"))
                    .and_then(|v| v.as_str());
                if let Some(id) = id {
                    rules.insert(id.to_owned(), rule.clone());
                }
            }
        }
        rules
";

const MACHINE_OWNER_GETTER: &str = "        let config = self.config_snapshot();
        match config.get(\"MachineOwner\").and_then(|v| v.as_str()) {
            Some(owner) if !owner.is_empty() => owner.to_owned(),
            _ => String::new(),
        }
";

const MACHINE_ID_GETTER: &str = "        let config = self.config_snapshot();
        match config.get(\"MachineID\").and_then(|v| v.as_str()) {
            Some(id) if !id.is_empty() => id.to_owned(),
            _ => String::new(),
        }
";

const FCM_ENABLED_GETTER: &str = "        !self.fcm_project().is_empty()
            && !self.fcm_entity().is_empty()
            && !self.fcm_api_key().is_empty()
";

const METRIC_FORMAT_GETTER: &str = "        let config = self.config_snapshot();
        let format = config
            .get(\"MetricFormat\")
            .and_then(|v| v.as_str())
            .map(str::to_lowercase);
        match format.as_deref() {
            Some(t @ (\"rawjson\" | \"monarchjson\")) => t.to_owned(),
            _ => \"unknown\".to_owned(),
        }
";

const EXPORT_METRICS_GETTER: &str =
    "        self.metric_url().is_some() && self.metric_format() != \"unknown\"
";

/// Registers the built-in property set, in declaration order.
pub fn builtin_registry() -> Result<PropertyRegistry, RegistryError> {
    use PropertyDescriptor as P;
    use ValueType as V;

    let mut r = PropertyRegistry::new();

    r.register(
        P::custom(&["ClientMode"], V::SignedInteger, CLIENT_MODE_GETTER)
            .with_setter(CLIENT_MODE_SETTER)
            .with_transport(TransportType::Number),
    )?;
    r.register(P::custom(&["EventLogType"], V::String, EVENT_LOG_TYPE_GETTER))?;
    r.register(
        P::read_only(&["EventLogPath"], V::String)
            .with_default(PropertyValue::Str("/var/db/agent/events.log".into())),
    )?;
    r.register(
        P::read_only(&["MailDirectory"], V::String)
            .with_default(PropertyValue::Str("/var/db/agent/mail".into())),
    )?;
    r.register(
        P::read_only(&["MailDirectoryFileSizeThresholdKB"], V::UnsignedInteger)
            .with_default(PropertyValue::UInt(100)),
    )?;
    r.register(
        P::read_only(&["MailDirectorySizeThresholdMB"], V::UnsignedInteger)
            .with_default(PropertyValue::UInt(500)),
    )?;
    r.register(
        P::read_only(&["MailDirectoryEventMaxFlushTimeSec"], V::Float)
            .with_default(PropertyValue::Float(5.0)),
    )?;
    r.register(
        P::custom(&["StaticRules"], V::Map, STATIC_RULES_GETTER)
            .with_transport(TransportType::List),
    )?;
    r.register(P::read_only(&["FileChangesRegex"], V::Regex))?;
    r.register(P::read_only(&["FileChangesPrefixFilters"], V::List))?;
    r.register(
        P::read_only(&["EnablePageZeroProtection"], V::Boolean)
            .with_default(PropertyValue::Bool(true)),
    )?;
    r.register(
        P::read_only(&["EnableBadSignatureProtection"], V::Boolean)
            .with_default(PropertyValue::Bool(false)),
    )?;
    r.register(
        P::read_only(&["EnableMachineIDDecoration"], V::Boolean)
            .with_default(PropertyValue::Bool(false)),
    )?;
    r.register(
        P::read_only(&["EnableSysxCache"], V::Boolean).with_default(PropertyValue::Bool(true)),
    )?;
    r.register(P::read_only(&["AboutText"], V::String))?;
    r.register(P::read_only(&["MoreInfoURL"], V::Url))?;
    // Format string, not a URL: placeholder expansion happens
    // downstream before the value is ever fetched.
    r.register(P::read_only(&["EventDetailURL"], V::String))?;
    r.register(P::read_only(&["EventDetailText"], V::String))?;
    r.register(P::read_only(&["UnknownBlockMessage"], V::String))?;
    r.register(P::read_only(&["BannedBlockMessage"], V::String))?;
    r.register(P::read_only(&["BannedUSBBlockMessage"], V::String))?;
    r.register(P::read_only(&["RemountUSBBlockMessage"], V::String))?;
    r.register(
        P::read_only(&["FailClosed"], V::Boolean).with_default(PropertyValue::Bool(false)),
    )?;
    r.register(P::read_write(
        &["AllowedPathRegex", "WhitelistRegex"],
        V::Regex,
    ))?;
    r.register(P::read_write(
        &["BlockedPathRegex", "BlacklistRegex"],
        V::Regex,
    ))?;
    r.register(P::read_only(&["ModeNotificationMonitor"], V::String))?;
    r.register(P::read_only(&["ModeNotificationLockdown"], V::String))?;
    r.register(P::read_only(&["SyncBaseURL"], V::Url))?;
    r.register(P::read_only(&["SyncProxyConfig"], V::Map))?;
    r.register(P::custom(
        &["MachineOwner", "MachineOwnerPlist", "MachineOwnerKey"],
        V::String,
        MACHINE_OWNER_GETTER,
    ))?;
    r.register(P::read_write(&["FullSyncLastSuccess"], V::Date))?;
    r.register(P::read_write(&["RuleSyncLastSuccess"], V::Date))?;
    r.register(P::read_write(&["SyncCleanRequired"], V::Boolean))?;
    r.register(
        P::read_write(&["BlockUSBMount"], V::Boolean).with_default(PropertyValue::Bool(false)),
    )?;
    r.register(P::read_write(&["RemountUSBMode"], V::List))?;
    r.register(P::read_only(
        &["usbBlockMessage", "USBBlockMessage"],
        V::String,
    ))?;
    r.register(P::custom(
        &["MachineID", "MachineIDPlist", "MachineIDKey"],
        V::String,
        MACHINE_ID_GETTER,
    ))?;
    r.register(
        P::read_write(&["EnableBundles"], V::Boolean).with_default(PropertyValue::Bool(false)),
    )?;
    r.register(
        P::read_write(&["EnableTransitiveRules"], V::Boolean)
            .with_default(PropertyValue::Bool(false)),
    )?;
    r.register(P::read_only(&["SyncServerAuthRootsData"], V::Blob))?;
    r.register(P::read_only(&["SyncServerAuthRootsFile"], V::String))?;
    r.register(P::read_only(&["SyncClientAuthCertificateFile"], V::String))?;
    r.register(P::read_only(&["SyncClientAuthCertificatePassword"], V::String))?;
    r.register(P::read_only(
        &["SyncClientAuthCertificateCn", "SyncClientAuthCertificateCN"],
        V::String,
    ))?;
    r.register(P::read_only(&["SyncClientAuthCertificateIssuer"], V::String))?;
    r.register(
        P::read_only(&["EnableCleanSyncEventUpload"], V::Boolean)
            .with_default(PropertyValue::Bool(false)),
    )?;
    r.register(
        P::read_write(&["EnableAllEventUpload"], V::Boolean)
            .with_default(PropertyValue::Bool(false)),
    )?;
    r.register(
        P::read_write(&["DisableUnknownEventUpload"], V::Boolean)
            .with_default(PropertyValue::Bool(false)),
    )?;
    r.register(
        P::read_only(&["EnableForkAndExitLogging"], V::Boolean)
            .with_default(PropertyValue::Bool(false)),
    )?;
    r.register(
        P::read_only(&["IgnoreOtherEndpointSecurityClients"], V::Boolean)
            .with_default(PropertyValue::Bool(false)),
    )?;
    // Launch-time debug flags are process wiring, not configuration;
    // only the profile-driven toggle lives here.
    r.register(
        P::read_only(&["EnableDebugLogging"], V::Boolean)
            .with_default(PropertyValue::Bool(false)),
    )?;
    r.register(
        P::read_only(&["EnableBackwardsCompatibleContentEncoding"], V::Boolean)
            .with_default(PropertyValue::Bool(false)),
    )?;
    r.register(P::read_only(&["fcmProject", "FCMProject"], V::String))?;
    r.register(P::read_only(&["fcmEntity", "FCMEntity"], V::String))?;
    r.register(P::read_only(&["fcmAPIKey", "FCMAPIKey"], V::String))?;
    r.register(P::custom(&["fcmEnabled"], V::Boolean, FCM_ENABLED_GETTER))?;
    r.register(P::read_only(&["MetricURL"], V::Url))?;
    r.register(P::read_only(&["ExtraMetricLabels"], V::Map))?;
    r.register(
        P::read_only(&["MetricExportInterval"], V::UnsignedInteger)
            .with_default(PropertyValue::UInt(30)),
    )?;
    r.register(
        P::read_only(&["MetricExportTimeout"], V::UnsignedInteger)
            .with_default(PropertyValue::UInt(30)),
    )?;
    r.register(P::custom(&["MetricFormat"], V::String, METRIC_FORMAT_GETTER))?;
    r.register(P::custom(&["ExportMetrics"], V::Boolean, EXPORT_METRICS_GETTER))?;

    Ok(r)
}
