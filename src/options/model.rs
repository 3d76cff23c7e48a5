use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Placement of the sphere in world space.
pub struct ModelOptions {
    /// World-space translation applied after scaling.
    pub translation: [f32; 3],
    /// Uniform scale (sphere radius in world units).
    pub scale: f32,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            translation: [0.0, 0.0, -7.0],
            scale: 2.0,
        }
    }
}
