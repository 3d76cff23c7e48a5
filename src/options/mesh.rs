use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Sphere tessellation parameters.
pub struct MeshOptions {
    /// Longitude divisions (vertices per ring).
    pub width_segments: u32,
    /// Latitude divisions, counting both poles.
    pub height_segments: u32,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            width_segments: 32,
            height_segments: 16,
        }
    }
}
