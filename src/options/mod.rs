//! Centralized rendering options with TOML preset support.
//!
//! Every tweakable value (tessellation, camera, model placement, light,
//! material, display, keybindings) lives here. Options serialize to/from
//! TOML so a scene variant can be kept in a preset file and passed to the
//! binary on the command line.

mod camera;
mod display;
mod keybindings;
mod lighting;
mod material;
mod mesh;
mod model;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
pub use material::MaterialOptions;
pub use mesh::MeshOptions;
pub use model::ModelOptions;
use serde::{Deserialize, Serialize};

use crate::{error::SphereError, mesh::SphereMesh};

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[material]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Sphere tessellation.
    pub mesh: MeshOptions,
    /// Camera projection.
    pub camera: CameraOptions,
    /// Model transform.
    pub model: ModelOptions,
    /// Point light.
    pub lighting: LightingOptions,
    /// Surface material.
    pub material: MaterialOptions,
    /// Window and output settings.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SphereError::OptionsParse`] for invalid TOML or values of
    /// the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self, SphereError> {
        toml::from_str(content)
            .map_err(|e| SphereError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SphereError::Io`] if the file cannot be read and
    /// [`SphereError::OptionsParse`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, SphereError> {
        let content = std::fs::read_to_string(path).map_err(SphereError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed), creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`SphereError::Io`] on filesystem failure.
    pub fn save(&self, path: &Path) -> Result<(), SphereError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SphereError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SphereError::Io)?;
        }
        std::fs::write(path, content).map_err(SphereError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Values that are accepted but will render something odd.
    ///
    /// Nothing here is fatal; callers are expected to log the messages.
    #[must_use]
    pub fn validate_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let mesh = &self.mesh;
        if mesh.width_segments < 3 || mesh.height_segments < 3 {
            warnings.push(format!(
                "sphere tessellation {}x{} is below 3x3, geometry will be \
                 degenerate",
                mesh.width_segments, mesh.height_segments
            ));
        }
        if !SphereMesh::fits_u32_indices(
            mesh.width_segments,
            mesh.height_segments,
        ) {
            warnings.push(format!(
                "sphere tessellation {}x{} needs more than u32 indices, the \
                 default tessellation will be used",
                mesh.width_segments, mesh.height_segments
            ));
        }
        let cam = &self.camera;
        if cam.znear <= 0.0 || cam.zfar <= cam.znear {
            warnings.push(format!(
                "invalid clip range znear={} zfar={}",
                cam.znear, cam.zfar
            ));
        }
        if !(1.0..179.0).contains(&cam.fovy) {
            warnings.push(format!("field of view {}° out of range", cam.fovy));
        }
        if self.model.scale == 0.0 {
            warnings.push("model scale is zero, normal matrix is singular".into());
        }
        if self.display.gamma <= 0.0 {
            warnings.push(format!(
                "gamma {} must be positive",
                self.display.gamma
            ));
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[material]
shininess = 80.0

[mesh]
width_segments = 48
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.material.shininess, 80.0);
        assert_eq!(opts.mesh.width_segments, 48);
        // Everything else should be default
        assert_eq!(opts.mesh.height_segments, 16);
        assert_eq!(opts.material.diffuse, [0.0, 0.5, 0.0]);
        assert_eq!(opts.lighting.position, [-4.0, 4.0, -3.0]);
        assert_eq!(opts.display.title, "Phong Shading");
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml_str("[mesh]\nwidth_segments = \"many\"")
            .unwrap_err();
        assert!(matches!(err, SphereError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("Escape"), Some(KeyAction::Quit));
        assert_eq!(opts.keybindings.lookup("KeyQ"), Some(KeyAction::Quit));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn keybindings_from_toml() {
        let toml_str = r#"
[keybindings.bindings]
KeyX = "quit"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("KeyX"), Some(KeyAction::Quit));
        assert_eq!(opts.keybindings.lookup("Escape"), None);
    }

    #[test]
    fn defaults_have_no_warnings() {
        assert!(Options::default().validate_warnings().is_empty());
    }

    #[test]
    fn suspicious_values_warn() {
        let mut opts = Options::default();
        opts.mesh.height_segments = 2;
        opts.camera.zfar = 0.05;
        opts.display.gamma = 0.0;
        assert_eq!(opts.validate_warnings().len(), 3);
    }

    #[test]
    fn oversized_tessellation_warns() {
        let mut opts = Options::default();
        opts.mesh.width_segments = 100_000;
        opts.mesh.height_segments = 100_000;
        let warnings = opts.validate_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("u32"));
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("phong-sphere-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.material.shininess = 8.0;
        opts.save(&dir.join("matte.toml")).unwrap();
        Options::default().save(&dir.join("default.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let loaded = Options::load(&dir.join("matte.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["default", "matte"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
