use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Phong surface response of the sphere.
pub struct MaterialOptions {
    /// Ambient reflectance.
    pub ambient: [f32; 3],
    /// Diffuse reflectance.
    pub diffuse: [f32; 3],
    /// Specular reflectance.
    pub specular: [f32; 3],
    /// Specular exponent.
    pub shininess: f32,
}

impl Default for MaterialOptions {
    fn default() -> Self {
        Self {
            ambient: [0.0, 1.0, 0.0],
            diffuse: [0.0, 0.5, 0.0],
            specular: [0.5, 0.5, 0.5],
            shininess: 32.0,
        }
    }
}
