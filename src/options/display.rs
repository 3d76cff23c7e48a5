use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Window and output settings.
pub struct DisplayOptions {
    /// Window title.
    pub title: String,
    /// Initial window width in logical pixels.
    pub width: u32,
    /// Initial window height in logical pixels.
    pub height: u32,
    /// Framebuffer clear color (RGBA).
    pub clear_color: [f32; 4],
    /// Output gamma applied in the fragment shader.
    pub gamma: f32,
    /// Frame rate cap (0 = unlimited, vsync still applies).
    pub target_fps: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            title: "Phong Shading".into(),
            width: 800,
            height: 800,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            gamma: 2.2,
            target_fps: 0,
        }
    }
}

impl DisplayOptions {
    /// Clear color as a wgpu color.
    #[must_use]
    pub fn wgpu_clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color;
        wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: f64::from(a),
        }
    }
}
