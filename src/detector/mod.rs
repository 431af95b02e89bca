//! Detector loop: pulls per-frame detection sets from a source, reduces each
//! frame to a hazard boolean, runs the confirmation state machine, and
//! submits one alert per confirmed event.
//!
//! Single-threaded by construction — one frame is fully processed before the
//! next is read, and the confirmation state is owned exclusively by the loop.

pub mod classify;
pub mod confirm;
pub mod source;
pub mod types;

pub use classify::HazardClassifier;
pub use confirm::{ConfirmationTrigger, Decision};
pub use source::{DetectionSource, ReplaySource};
pub use types::{BoundingBox, Detection};

use crate::config::DetectorConfig;
use crate::error::Result;
use crate::transport::AlertClient;
use std::time::Duration;

/// Counters surfaced when the loop exits; purely observational.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetectorReport {
    pub frames: u64,
    pub confirmations: u64,
    pub submit_failures: u64,
}

pub struct Detector<S> {
    source: S,
    classifier: HazardClassifier,
    trigger: ConfirmationTrigger,
    alerts: AlertClient,
}

impl<S: DetectionSource> Detector<S> {
    pub fn from_config(config: &DetectorConfig, source: S) -> Result<Self> {
        let classifier = HazardClassifier::new(
            config.hazard_classes.iter().copied(),
            config.confidence_threshold,
        );
        let trigger = ConfirmationTrigger::new(config.frame_threshold)?;
        let alerts = AlertClient::new(
            config.alert_url.clone(),
            Duration::from_secs(config.submit_timeout_secs),
        );
        Ok(Self {
            source,
            classifier,
            trigger,
            alerts,
        })
    }

    /// Process frames until the source ends. Transport failures are logged
    /// and swallowed: the trigger has already re-armed when submission is
    /// attempted, so a dispatcher outage can never turn into an alert storm
    /// once it recovers — nor into a crashed loop.
    pub async fn run(mut self) -> Result<DetectorReport> {
        let mut report = DetectorReport::default();

        loop {
            let detections = match self.source.next_frame() {
                Ok(Some(detections)) => detections,
                Ok(None) => {
                    tracing::info!(frames = report.frames, "stream ended");
                    break;
                }
                Err(e) => {
                    // Mid-stream read failure terminates the loop the same
                    // way end-of-stream does; only failure to open the
                    // source at startup is fatal.
                    tracing::warn!(error = %e, frames = report.frames, "stream error, stopping");
                    break;
                }
            };
            report.frames += 1;

            let hazard_present = self.classifier.classify(&detections);

            if self.trigger.update(hazard_present) == Decision::Confirmed {
                report.confirmations += 1;
                tracing::warn!(
                    frame = report.frames,
                    "hazard confirmed, submitting alert to {}",
                    self.alerts.endpoint()
                );
                match self.alerts.submit().await {
                    Ok(()) => tracing::info!("alert submitted"),
                    Err(e) => {
                        report.submit_failures += 1;
                        tracing::error!(error = %e, "alert submission failed, continuing");
                    }
                }
            }
        }

        Ok(report)
    }
}
