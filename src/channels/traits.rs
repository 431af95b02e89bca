use crate::error::ChannelError;
use async_trait::async_trait;

/// Core channel trait — one independent notification delivery mechanism.
///
/// Every channel carries its own fixed emergency payload and credentials;
/// `send` takes no arguments because a confirmed event is the only thing it
/// ever announces. Failures come back as typed `ChannelError` values rather
/// than differently-shaped panics, so the dispatcher can iterate the
/// capability set homogeneously.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name
    fn name(&self) -> &'static str;

    /// Check configuration completeness without performing any I/O. A
    /// channel that fails here is reported as `ConfigurationMissing` and
    /// never attempts delivery.
    fn validate(&self) -> Result<(), ChannelError>;

    /// Attempt a single delivery of the emergency payload. Returns the
    /// provider-assigned identifier when the provider issues one.
    async fn send(&self) -> Result<Option<String>, ChannelError>;
}
