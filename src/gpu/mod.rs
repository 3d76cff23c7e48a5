//! GPU resource management.
//!
//! Provides wgpu device/surface initialization, the depth attachment,
//! WGSL composition, name-addressed uniform blocks, and mesh buffers.

/// Immutable vertex/index buffers for a generated mesh.
pub mod mesh_buffer;
/// Shared wgpu boilerplate for bind group layouts and pipeline state.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Depth texture for the main pass.
pub mod texture;
/// Uniform struct reflection and by-name updates.
pub mod uniform;
