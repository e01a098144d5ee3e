//! Watcher configuration loading from file and environment variables.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level watcher configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP surface network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Room-service endpoint and credentials (opaque to the core).
    #[serde(default)]
    pub livekit: LiveKitConfig,

    /// Incident-tracking API settings.
    #[serde(default)]
    pub incident: IncidentConfig,

    /// Outbound telephony settings.
    #[serde(default)]
    pub telephony: TelephonyConfig,

    /// Trigger detection settings.
    #[serde(default)]
    pub triggers: TriggerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration for the ingestion/health HTTP surface.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Room-service credentials.
#[derive(Clone, Default, Deserialize)]
pub struct LiveKitConfig {
    /// LiveKit server URL (`ws://` or `wss://`).
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub api_secret: String,
}

impl std::fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Incident API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct IncidentConfig {
    /// Base URL of the incident-tracking API.
    #[serde(default = "default_incident_base_url")]
    pub base_url: String,

    /// Per-side-effect timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Outbound telephony settings. The trunk is optional: when absent, call
/// dispatch is skipped, not errored.
#[derive(Debug, Clone, Deserialize)]
pub struct TelephonyConfig {
    /// SIP trunk identifier to dial out from.
    #[serde(default)]
    pub trunk_id: Option<String>,

    /// Room the alert call leg joins.
    #[serde(default = "default_alert_room")]
    pub alert_room: String,

    /// Fixed operator-set destination number.
    #[serde(default = "default_phone_number")]
    pub phone_number: String,
}

/// Trigger detection settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerConfig {
    /// Suppression window in seconds before a `(room, kind)` pair re-arms.
    /// Absent means a single dispatch per room per kind per session.
    #[serde(default)]
    pub suppression_window_secs: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "clearance_watcher=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    3300
}

fn default_incident_base_url() -> String {
    "https://clearance-phi.vercel.app".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_alert_room() -> String {
    "sip-alerts".to_string()
}

fn default_phone_number() -> String {
    "+14083103927".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for IncidentConfig {
    fn default() -> Self {
        Self {
            base_url: default_incident_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for TelephonyConfig {
    fn default() -> Self {
        Self {
            trunk_id: None,
            alert_room: default_alert_room(),
            phone_number: default_phone_number(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required credential or endpoint is missing. Fatal: the watcher
    /// must not proceed to stream processing without it.
    #[error("missing required configuration: {0}")]
    MissingCredentials(&'static str),
}

impl Config {
    /// Checks that the credentials required before stream processing are
    /// present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.livekit.url.trim().is_empty() {
            return Err(ConfigError::MissingCredentials("livekit.url"));
        }
        if self.livekit.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredentials("livekit.api_key"));
        }
        if self.livekit.api_secret.trim().is_empty() {
            return Err(ConfigError::MissingCredentials("livekit.api_secret"));
        }
        if self.incident.base_url.trim().is_empty() {
            return Err(ConfigError::MissingCredentials("incident.base_url"));
        }
        Ok(())
    }
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `CLEARANCE_HOST` overrides `server.host`
/// - `CLEARANCE_PORT` overrides `server.port`
/// - `CLEARANCE_LIVEKIT_URL` overrides `livekit.url`
/// - `CLEARANCE_LIVEKIT_API_KEY` overrides `livekit.api_key`
/// - `CLEARANCE_LIVEKIT_API_SECRET` overrides `livekit.api_secret`
/// - `CLEARANCE_INCIDENT_BASE_URL` overrides `incident.base_url`
/// - `CLEARANCE_SIP_TRUNK_ID` overrides `telephony.trunk_id`
/// - `CLEARANCE_ALERT_ROOM` overrides `telephony.alert_room`
/// - `CLEARANCE_PHONE_NUMBER` overrides `telephony.phone_number`
/// - `CLEARANCE_SUPPRESSION_WINDOW_SECS` overrides
///   `triggers.suppression_window_secs`
/// - `CLEARANCE_LOG_LEVEL` overrides `logging.level`
/// - `CLEARANCE_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(host) = std::env::var("CLEARANCE_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Ok(port) = std::env::var("CLEARANCE_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Ok(url) = std::env::var("CLEARANCE_LIVEKIT_URL") {
        config.livekit.url = url;
    }
    if let Ok(key) = std::env::var("CLEARANCE_LIVEKIT_API_KEY") {
        config.livekit.api_key = key;
    }
    if let Ok(secret) = std::env::var("CLEARANCE_LIVEKIT_API_SECRET") {
        config.livekit.api_secret = secret;
    }
    if let Ok(base_url) = std::env::var("CLEARANCE_INCIDENT_BASE_URL") {
        config.incident.base_url = base_url;
    }
    if let Ok(trunk) = std::env::var("CLEARANCE_SIP_TRUNK_ID") {
        config.telephony.trunk_id = if trunk.is_empty() { None } else { Some(trunk) };
    }
    if let Ok(room) = std::env::var("CLEARANCE_ALERT_ROOM") {
        config.telephony.alert_room = room;
    }
    if let Ok(number) = std::env::var("CLEARANCE_PHONE_NUMBER") {
        config.telephony.phone_number = number;
    }
    if let Ok(window) = std::env::var("CLEARANCE_SUPPRESSION_WINDOW_SECS") {
        if let Ok(parsed) = window.parse() {
            config.triggers.suppression_window_secs = Some(parsed);
        }
    }
    if let Ok(level) = std::env::var("CLEARANCE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("CLEARANCE_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // load_config reads process-global environment variables, so every
    // test that calls it holds this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for var in [
            "CLEARANCE_HOST",
            "CLEARANCE_PORT",
            "CLEARANCE_LIVEKIT_URL",
            "CLEARANCE_LIVEKIT_API_KEY",
            "CLEARANCE_LIVEKIT_API_SECRET",
            "CLEARANCE_INCIDENT_BASE_URL",
            "CLEARANCE_SIP_TRUNK_ID",
            "CLEARANCE_ALERT_ROOM",
            "CLEARANCE_PHONE_NUMBER",
            "CLEARANCE_SUPPRESSION_WINDOW_SECS",
            "CLEARANCE_LOG_LEVEL",
            "CLEARANCE_LOG_JSON",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn defaults_when_no_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = load_config(None).unwrap();
        assert_eq!(config.server.port, 3300);
        assert_eq!(config.incident.base_url, "https://clearance-phi.vercel.app");
        assert_eq!(config.telephony.alert_room, "sip-alerts");
        assert_eq!(config.telephony.phone_number, "+14083103927");
        assert!(config.telephony.trunk_id.is_none());
        assert!(config.triggers.suppression_window_secs.is_none());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = load_config(Some("/nonexistent/clearance.toml")).unwrap();
        assert_eq!(config.server.port, 3300);
    }

    #[test]
    fn file_values_are_loaded() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8200

[livekit]
url = "ws://localhost:7880"
api_key = "devkey"
api_secret = "devsecret"

[telephony]
trunk_id = "ST_abc123"

[triggers]
suppression_window_secs = 120
"#
        )
        .unwrap();

        let config = load_config(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(config.server.port, 8200);
        assert_eq!(config.livekit.url, "ws://localhost:7880");
        assert_eq!(config.telephony.trunk_id.as_deref(), Some("ST_abc123"));
        assert_eq!(config.triggers.suppression_window_secs, Some(120));
        // untouched sections keep defaults
        assert_eq!(config.telephony.alert_room, "sip-alerts");
        config.validate().unwrap();
    }

    #[test]
    fn env_overrides_take_precedence() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        std::env::set_var("CLEARANCE_PORT", "9000");
        std::env::set_var("CLEARANCE_LIVEKIT_API_KEY", "envkey");
        std::env::set_var("CLEARANCE_SIP_TRUNK_ID", "ST_env");
        std::env::set_var("CLEARANCE_SUPPRESSION_WINDOW_SECS", "60");
        std::env::set_var("CLEARANCE_LOG_JSON", "true");

        let config = load_config(None).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.livekit.api_key, "envkey");
        assert_eq!(config.telephony.trunk_id.as_deref(), Some("ST_env"));
        assert_eq!(config.triggers.suppression_window_secs, Some(60));
        assert!(config.logging.json);

        clear_env();
    }

    #[test]
    fn validate_requires_room_service_credentials() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = load_config(None).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials("livekit.url")));

        let mut config = Config::default();
        config.livekit.url = "ws://localhost:7880".to_string();
        config.livekit.api_key = "devkey".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingCredentials("livekit.api_secret")
        ));

        config.livekit.api_secret = "devsecret".to_string();
        config.validate().unwrap();
    }
}
