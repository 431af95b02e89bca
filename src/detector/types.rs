use serde::{Deserialize, Serialize};

/// Axis-aligned box in pixel coordinates, as emitted by the detection model.
/// Consumed only by rendering/replay tooling; the confirmation logic never
/// looks at geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// One object detected in one frame by the external inference collaborator.
/// Ephemeral: lives only for that frame's processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_id: u32,
    pub confidence: f32,
    #[serde(default)]
    pub bbox: Option<BoundingBox>,
}

impl Detection {
    pub fn new(class_id: u32, confidence: f32) -> Self {
        Self {
            class_id,
            confidence,
            bbox: None,
        }
    }
}
