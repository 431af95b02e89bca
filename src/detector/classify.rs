use super::types::Detection;
use std::collections::HashSet;

/// Reduces a frame's detection set to the single boolean the confirmation
/// state machine consumes: "did this frame contain a high-confidence hazard".
#[derive(Debug, Clone)]
pub struct HazardClassifier {
    hazard_classes: HashSet<u32>,
    confidence_threshold: f32,
}

impl HazardClassifier {
    pub fn new(hazard_classes: impl IntoIterator<Item = u32>, confidence_threshold: f32) -> Self {
        Self {
            hazard_classes: hazard_classes.into_iter().collect(),
            confidence_threshold,
        }
    }

    /// True iff any detection is of a hazard class at or above the confidence
    /// threshold. An empty frame is simply not a hazard.
    pub fn classify(&self, detections: &[Detection]) -> bool {
        detections.iter().any(|d| {
            self.hazard_classes.contains(&d.class_id) && d.confidence >= self.confidence_threshold
        })
    }
}
