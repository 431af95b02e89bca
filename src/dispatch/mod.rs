//! Fan-out of one confirmed event to every registered notification channel.
//!
//! Channels run as independent tasks with no shared mutable state; each
//! outcome is captured on its own, so a failing, hanging or even panicking
//! channel cannot prevent its siblings from being attempted, and none of
//! them can change the acknowledgement the gateway returns.

use crate::channels::Channel;
use crate::error::ChannelError;
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;

/// Result of one channel's single delivery attempt. Owned by the dispatcher
/// for the lifetime of one dispatch, consumed only for logging.
#[derive(Debug, Clone)]
pub struct ChannelOutcome {
    pub channel: &'static str,
    pub status: OutcomeStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    Delivered { provider_ref: Option<String> },
    /// Required credentials/parameters absent; no delivery was attempted.
    ConfigurationMissing { field: &'static str },
    Failed { reason: String },
}

impl ChannelOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self.status, OutcomeStatus::Delivered { .. })
    }
}

#[derive(Debug, Default)]
pub struct DispatchSummary {
    pub outcomes: Vec<ChannelOutcome>,
}

impl DispatchSummary {
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_delivered()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.delivered()
    }
}

pub struct Dispatcher {
    channels: Vec<Arc<dyn Channel>>,
    channel_timeout: Duration,
}

impl Dispatcher {
    pub fn new(channels: Vec<Arc<dyn Channel>>, channel_timeout: Duration) -> Self {
        Self {
            channels,
            channel_timeout,
        }
    }

    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    /// Invoke every registered channel once, concurrently, and collect the
    /// outcomes. Always completes; never returns an error — the boundary
    /// contract is "the signal was received and acted upon", not "delivery
    /// succeeded".
    pub async fn dispatch(&self) -> DispatchSummary {
        let attempts = self.channels.iter().map(|channel| {
            let channel = Arc::clone(channel);
            let timeout = self.channel_timeout;
            async move {
                let name = channel.name();
                let status = attempt_channel(channel, timeout).await;
                ChannelOutcome {
                    channel: name,
                    status,
                }
            }
        });

        let outcomes = join_all(attempts).await;

        for outcome in &outcomes {
            match &outcome.status {
                OutcomeStatus::Delivered { provider_ref } => {
                    tracing::info!(
                        channel = outcome.channel,
                        provider_ref = provider_ref.as_deref().unwrap_or("-"),
                        "notification delivered"
                    );
                }
                OutcomeStatus::ConfigurationMissing { field } => {
                    tracing::warn!(
                        channel = outcome.channel,
                        field,
                        "notification skipped: configuration missing"
                    );
                }
                OutcomeStatus::Failed { reason } => {
                    tracing::error!(
                        channel = outcome.channel,
                        reason,
                        "notification delivery failed"
                    );
                }
            }
        }

        DispatchSummary { outcomes }
    }
}

/// One isolated delivery attempt. The channel runs on its own task so a
/// panic inside a channel implementation is contained to that channel's
/// outcome, and a per-channel timeout bounds worst-case dispatch latency.
async fn attempt_channel(channel: Arc<dyn Channel>, timeout: Duration) -> OutcomeStatus {
    if let Err(e) = channel.validate() {
        return match e {
            ChannelError::ConfigurationMissing { field } => {
                OutcomeStatus::ConfigurationMissing { field }
            }
            other => OutcomeStatus::Failed {
                reason: other.to_string(),
            },
        };
    }

    let timeout_secs = timeout.as_secs();
    let task = tokio::spawn(async move { channel.send().await });

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(provider_ref))) => OutcomeStatus::Delivered { provider_ref },
        Ok(Ok(Err(e))) => OutcomeStatus::Failed {
            reason: e.to_string(),
        },
        Ok(Err(join_err)) => OutcomeStatus::Failed {
            reason: format!("channel task aborted: {join_err}"),
        },
        Err(_) => OutcomeStatus::Failed {
            reason: ChannelError::Timeout { timeout_secs }.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StubChannel {
        name: &'static str,
        invoked: Arc<AtomicBool>,
        behavior: Behavior,
    }

    enum Behavior {
        Deliver(Option<&'static str>),
        Fail,
        Panic,
        Hang,
        Unconfigured,
    }

    impl StubChannel {
        fn new(name: &'static str, behavior: Behavior) -> (Arc<dyn Channel>, Arc<AtomicBool>) {
            let invoked = Arc::new(AtomicBool::new(false));
            let ch = Arc::new(Self {
                name,
                invoked: invoked.clone(),
                behavior,
            });
            (ch, invoked)
        }
    }

    #[async_trait]
    impl Channel for StubChannel {
        fn name(&self) -> &'static str {
            self.name
        }

        fn validate(&self) -> Result<(), ChannelError> {
            match self.behavior {
                Behavior::Unconfigured => Err(ChannelError::ConfigurationMissing {
                    field: "auth_token",
                }),
                _ => Ok(()),
            }
        }

        async fn send(&self) -> Result<Option<String>, ChannelError> {
            self.invoked.store(true, Ordering::SeqCst);
            match self.behavior {
                Behavior::Deliver(provider_ref) => Ok(provider_ref.map(str::to_owned)),
                Behavior::Fail => Err(ChannelError::Delivery("provider offline".into())),
                Behavior::Panic => panic!("channel blew up"),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(None)
                }
                Behavior::Unconfigured => unreachable!("gated by validate"),
            }
        }
    }

    fn outcome_for<'a>(summary: &'a DispatchSummary, name: &str) -> &'a ChannelOutcome {
        summary
            .outcomes
            .iter()
            .find(|o| o.channel == name)
            .expect("outcome present for every registered channel")
    }

    #[tokio::test]
    async fn one_failing_channel_does_not_block_siblings() {
        let (mail, mail_hit) = StubChannel::new("mail", Behavior::Deliver(None));
        let (sms, sms_hit) = StubChannel::new("sms", Behavior::Fail);
        let (voice, voice_hit) = StubChannel::new("voice", Behavior::Deliver(Some("CA1")));

        let dispatcher = Dispatcher::new(vec![mail, sms, voice], Duration::from_secs(5));
        let summary = dispatcher.dispatch().await;

        assert!(mail_hit.load(Ordering::SeqCst));
        assert!(sms_hit.load(Ordering::SeqCst));
        assert!(voice_hit.load(Ordering::SeqCst));
        assert_eq!(summary.delivered(), 2);
        assert_eq!(summary.failed(), 1);
    }

    #[tokio::test]
    async fn panicking_channel_is_contained() {
        let (bad, _) = StubChannel::new("sms", Behavior::Panic);
        let (good, good_hit) = StubChannel::new("mail", Behavior::Deliver(None));

        let dispatcher = Dispatcher::new(vec![bad, good], Duration::from_secs(5));
        let summary = dispatcher.dispatch().await;

        assert!(good_hit.load(Ordering::SeqCst));
        assert!(matches!(
            outcome_for(&summary, "sms").status,
            OutcomeStatus::Failed { .. }
        ));
        assert!(outcome_for(&summary, "mail").is_delivered());
    }

    #[tokio::test]
    async fn unconfigured_channel_reports_without_sending() {
        let (unconfigured, hit) = StubChannel::new("voice", Behavior::Unconfigured);
        let dispatcher = Dispatcher::new(vec![unconfigured], Duration::from_secs(5));
        let summary = dispatcher.dispatch().await;

        assert!(!hit.load(Ordering::SeqCst));
        assert_eq!(
            outcome_for(&summary, "voice").status,
            OutcomeStatus::ConfigurationMissing { field: "auth_token" }
        );
    }

    #[tokio::test]
    async fn slow_channel_is_bounded_by_timeout() {
        let (slow, _) = StubChannel::new("sms", Behavior::Hang);
        let (fast, fast_hit) = StubChannel::new("mail", Behavior::Deliver(None));

        let dispatcher = Dispatcher::new(vec![slow, fast], Duration::from_millis(100));
        let summary = dispatcher.dispatch().await;

        assert!(fast_hit.load(Ordering::SeqCst));
        match &outcome_for(&summary, "sms").status {
            OutcomeStatus::Failed { reason } => assert!(reason.contains("timed out")),
            other => panic!("expected timeout failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn provider_reference_is_surfaced_in_outcome() {
        let (voice, _) = StubChannel::new("voice", Behavior::Deliver(Some("CA7")));
        let dispatcher = Dispatcher::new(vec![voice], Duration::from_secs(5));
        let summary = dispatcher.dispatch().await;

        assert_eq!(
            outcome_for(&summary, "voice").status,
            OutcomeStatus::Delivered {
                provider_ref: Some("CA7".into())
            }
        );
    }

    #[tokio::test]
    async fn empty_channel_set_dispatches_cleanly() {
        let dispatcher = Dispatcher::new(Vec::new(), Duration::from_secs(5));
        let summary = dispatcher.dispatch().await;
        assert!(summary.outcomes.is_empty());
        assert_eq!(summary.failed(), 0);
    }
}
