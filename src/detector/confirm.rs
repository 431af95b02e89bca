use crate::error::ConfigError;

/// Verdict of one state-machine update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Nothing to do this frame.
    None,
    /// The hazard has persisted for the full confirmation window. Emitted at
    /// most once per unbroken run; the trigger re-arms immediately.
    Confirmed,
}

/// Debounces noisy per-frame hazard booleans into a single confirmed-event
/// signal.
///
/// Confirmation requires an *unbroken* run of positive frames: any negative
/// frame resets the counter outright rather than decaying it. That rejects a
/// classifier flickering frame-to-frame at the cost of sensitivity to single
/// dropped frames — precision over recall, deliberately. No I/O, no clock;
/// drive it with synthetic sequences in tests.
#[derive(Debug, Clone)]
pub struct ConfirmationTrigger {
    threshold: u32,
    consecutive_hits: u32,
}

impl ConfirmationTrigger {
    /// A zero threshold would confirm on nothing at all; reject it at
    /// construction rather than at first update.
    pub fn new(threshold: u32) -> Result<Self, ConfigError> {
        if threshold == 0 {
            return Err(ConfigError::Validation(
                "confirmation threshold must be at least 1".into(),
            ));
        }
        Ok(Self {
            threshold,
            consecutive_hits: 0,
        })
    }

    /// Advance the machine by one frame.
    ///
    /// On confirmation the counter resets to zero (re-arming), so a hazard
    /// that persists must accumulate a fresh full run before it can confirm
    /// again. This is what keeps a standing fire from emitting an alert on
    /// every subsequent frame.
    pub fn update(&mut self, hazard_present: bool) -> Decision {
        if !hazard_present {
            self.consecutive_hits = 0;
            return Decision::None;
        }

        self.consecutive_hits += 1;
        if self.consecutive_hits >= self.threshold {
            self.consecutive_hits = 0;
            Decision::Confirmed
        } else {
            Decision::None
        }
    }

    pub fn consecutive_hits(&self) -> u32 {
        self.consecutive_hits
    }
}
