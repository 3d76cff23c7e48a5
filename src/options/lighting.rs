use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// The single point light.
pub struct LightingOptions {
    /// World-space light position.
    pub position: [f32; 3],
    /// Ambient light color.
    pub ambient: [f32; 3],
    /// Diffuse light color.
    pub diffuse: [f32; 3],
    /// Specular light color.
    pub specular: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            position: [-4.0, 4.0, -3.0],
            ambient: [0.2, 0.2, 0.2],
            diffuse: [1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0],
        }
    }
}
