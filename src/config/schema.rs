use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ── Top-level config ──────────────────────────────────────────────

/// Immutable configuration value, constructed once at startup and passed by
/// reference into the detector and dispatcher constructors. No ambient
/// globals: thresholds, endpoints and credentials all live here.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Path to config.toml - known at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub detector: DetectorConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub channels: ChannelsConfig,
}

// ── Detector ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Frame source identifier: a device index ("0"), an rtsp:// URI, or a
    /// path to a JSONL detection replay file.
    #[serde(default = "default_source")]
    pub source: String,
    /// Model resource handed to the inference collaborator.
    #[serde(default = "default_model_path")]
    pub model_path: String,
    /// Minimum per-detection confidence for a frame to count as a hazard hit.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
    /// Unbroken run of hazard frames required before an alert is confirmed.
    #[serde(default = "default_frame_threshold")]
    pub frame_threshold: u32,
    /// Classifier output classes considered alert-worthy (0 = smoke, 1 = fire).
    #[serde(default = "default_hazard_classes")]
    pub hazard_classes: Vec<u32>,
    /// Dispatcher endpoint that receives the confirmed-event signal.
    #[serde(default = "default_alert_url")]
    pub alert_url: String,
    /// Bound on how long a single alert submission may stall the loop.
    #[serde(default = "default_submit_timeout")]
    pub submit_timeout_secs: u64,
}

fn default_source() -> String {
    "0".into()
}
fn default_model_path() -> String {
    "best.pt".into()
}
fn default_confidence_threshold() -> f32 {
    0.70
}
fn default_frame_threshold() -> u32 {
    3
}
fn default_hazard_classes() -> Vec<u32> {
    vec![0, 1]
}
fn default_alert_url() -> String {
    "http://127.0.0.1:8000/alert".into()
}
fn default_submit_timeout() -> u64 {
    5
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            model_path: default_model_path(),
            confidence_threshold: default_confidence_threshold(),
            frame_threshold: default_frame_threshold(),
            hazard_classes: default_hazard_classes(),
            alert_url: default_alert_url(),
            submit_timeout_secs: default_submit_timeout(),
        }
    }
}

// ── Gateway ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_host")]
    pub host: String,
    #[serde(default = "default_gateway_port")]
    pub port: u16,
    /// Bound on a single channel's delivery attempt, so one slow provider
    /// cannot indefinitely delay the acknowledgement.
    #[serde(default = "default_channel_timeout")]
    pub channel_timeout_secs: u64,
}

fn default_gateway_host() -> String {
    "127.0.0.1".into()
}
fn default_gateway_port() -> u16 {
    8000
}
fn default_channel_timeout() -> u64 {
    15
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
            channel_timeout_secs: default_channel_timeout(),
        }
    }
}

// ── Notification channels ────────────────────────────────────────

/// A channel with no table here is simply not registered. A channel whose
/// table is present but incomplete stays registered and reports a
/// configuration-missing failure at dispatch time instead of aborting the
/// process.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChannelsConfig {
    #[serde(default)]
    pub mail: Option<MailConfig>,
    #[serde(default)]
    pub sms: Option<SmsConfig>,
    #[serde(default)]
    pub voice: Option<VoiceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub sender: String,
    pub recipient: String,
    /// App password; usually supplied via EMBERWATCH_SMTP_PASSWORD instead.
    #[serde(default)]
    pub password: Option<String>,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".into()
}
fn default_smtp_port() -> u16 {
    587
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    #[serde(default)]
    pub account_sid: Option<String>,
    /// Usually supplied via EMBERWATCH_SMS_AUTH_TOKEN instead.
    #[serde(default)]
    pub auth_token: Option<String>,
    pub from_number: String,
    pub to_number: String,
    /// Provider API base; overridable for tests.
    #[serde(default = "default_provider_api_base")]
    pub api_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default)]
    pub account_sid: Option<String>,
    /// Usually supplied via EMBERWATCH_VOICE_AUTH_TOKEN instead.
    #[serde(default)]
    pub auth_token: Option<String>,
    pub from_number: String,
    pub to_number: String,
    /// Remote call-script resource the provider reads to the callee.
    #[serde(default)]
    pub script_url: Option<String>,
    /// Provider API base; overridable for tests.
    #[serde(default = "default_provider_api_base")]
    pub api_base: String,
}

fn default_provider_api_base() -> String {
    "https://api.twilio.com".into()
}

// ── Loading ──────────────────────────────────────────────────────

impl Config {
    /// Load from a TOML file, apply environment-variable secret overrides,
    /// and validate. Threshold misconfiguration fails here, at startup, not
    /// at first frame.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        let mut config: Config =
            toml::from_str(&raw).map_err(|e| ConfigError::Load(e.to_string()))?;
        config.config_path = path.to_path_buf();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Environment variables win over file values so credentials can stay
    /// out of config.toml entirely.
    fn apply_env_overrides(&mut self) {
        if let Some(mail) = self.channels.mail.as_mut() {
            if let Ok(password) = std::env::var("EMBERWATCH_SMTP_PASSWORD") {
                mail.password = Some(password);
            }
        }
        if let Some(sms) = self.channels.sms.as_mut() {
            if let Ok(token) = std::env::var("EMBERWATCH_SMS_AUTH_TOKEN") {
                sms.auth_token = Some(token);
            }
        }
        if let Some(voice) = self.channels.voice.as_mut() {
            if let Ok(token) = std::env::var("EMBERWATCH_VOICE_AUTH_TOKEN") {
                voice.auth_token = Some(token);
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detector.frame_threshold == 0 {
            return Err(ConfigError::Validation(
                "detector.frame_threshold must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.detector.confidence_threshold) {
            return Err(ConfigError::Validation(format!(
                "detector.confidence_threshold must be within [0, 1], got {}",
                self.detector.confidence_threshold
            )));
        }
        Ok(())
    }
}
