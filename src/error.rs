use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for Emberwatch.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum WatchError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Frame source ─────────────────────────────────────────────────────
    #[error("source: {0}")]
    Source(#[from] SourceError),

    // ── Alert transport ──────────────────────────────────────────────────
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    // ── Notification channel ─────────────────────────────────────────────
    #[error("channel: {0}")]
    Channel(#[from] ChannelError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Frame source errors ─────────────────────────────────────────────────────

/// Only `Unavailable` is fatal; it means the source could not be opened at
/// startup. A source that runs out of frames signals that by yielding `None`,
/// which is graceful termination, not an error.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open frame source {source_id}: {message}")]
    Unavailable { source_id: String, message: String },

    #[error("frame read failed: {0}")]
    Read(String),

    #[error("malformed detection record: {0}")]
    Decode(String),
}

// ─── Alert transport errors ──────────────────────────────────────────────────

/// Failures submitting a confirmed-event signal to the dispatcher. These are
/// always recovered locally by the detector loop: logged, never propagated.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("alert endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("alert submission timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("alert endpoint rejected submission: {status}")]
    Rejected { status: u16 },
}

// ─── Notification channel errors ─────────────────────────────────────────────

/// Per-channel delivery failures. The dispatcher contains these within the
/// channel's own outcome; they never cross to sibling channels or to the
/// acknowledgement returned to the caller.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("missing configuration: {field}")]
    ConfigurationMissing { field: &'static str },

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("delivery timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, WatchError>;
