use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor, ShaderLanguage,
    ShaderType,
};

use crate::error::SphereError;

/// The Phong mesh shader.
pub const PHONG_SHADER: &str = include_str!("../../assets/shaders/phong.wgsl");
/// File path the Phong shader is composed under (used in diagnostics).
pub const PHONG_SHADER_PATH: &str = "phong.wgsl";

/// Shared module definition: (source, file_path)
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared WGSL modules, registered in dependency order.
const MODULES: &[ModuleDef] = &[ModuleDef {
    source: include_str!("../../assets/shaders/modules/lighting.wgsl"),
    file_path: "modules/lighting.wgsl",
}];

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Consuming shaders use `#import phong::lighting::{...}` to pull in shared
/// code. The composer produces `naga::Module` IR directly, which is both
/// reflected for uniform layouts and handed to wgpu without a WGSL re-parse.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Create a composer with all shared modules registered.
    ///
    /// # Errors
    ///
    /// Returns [`SphereError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, SphereError> {
        let mut composer = Composer::default();

        for m in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    SphereError::Shader(format!(
                        "failed to register shader module '{}': {e:?}",
                        m.file_path
                    ))
                })?;
        }

        Ok(Self { composer })
    }

    /// Compose a shader source (which may contain `#import` directives) into
    /// a `naga::Module` without touching the GPU.
    ///
    /// # Errors
    ///
    /// Returns [`SphereError::Shader`] with the composer diagnostic.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, SphereError> {
        log::info!("Composing shader: {file_path}");
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                SphereError::Shader(format!(
                    "failed to compose shader '{file_path}': {e}"
                ))
            })
    }

    /// Hand an already composed module to wgpu.
    pub fn create_module(
        device: &wgpu::Device,
        label: &str,
        module: naga::Module,
    ) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(module)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_point_names(module: &naga::Module) -> Vec<&str> {
        module.entry_points.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn phong_shader_composes() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer
            .compose_naga(PHONG_SHADER, PHONG_SHADER_PATH)
            .unwrap_or_else(|e| panic!("{e}"));
        let names = entry_point_names(&module);
        assert!(names.contains(&"vs_main"));
        assert!(names.contains(&"fs_main"));
    }

    #[test]
    fn broken_source_is_a_shader_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let err = composer
            .compose_naga("fn broken( {", "broken.wgsl")
            .unwrap_err();
        assert!(matches!(err, SphereError::Shader(_)));
        assert!(err.to_string().contains("broken.wgsl"));
    }

    #[test]
    fn unknown_import_is_a_shader_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let source = "#import phong::missing::{nothing}\n\
                      @fragment fn fs_main() -> @location(0) vec4<f32> {\n\
                      return vec4<f32>(1.0);\n}\n";
        assert!(composer.compose_naga(source, "missing.wgsl").is_err());
    }
}
