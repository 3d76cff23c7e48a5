// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Procedural UV sphere rendered with per-fragment Phong lighting on wgpu.
//!
//! The sphere is generated on the CPU as separate position and normal
//! streams plus a triangle index list, uploaded once, and drawn every frame
//! with a single point light and a Phong material.
//!
//! # Key entry points
//!
//! - [`mesh::SphereMesh`] - the pure tessellation routine
//! - [`engine::SphereEngine`] - GPU context, renderer and frame loop
//! - [`options::Options`] - runtime configuration (tessellation, camera,
//!   light, material, display) with TOML presets
//! - [`Viewer`] - standalone winit window (`viewer` feature)
//!
//! # Architecture
//!
//! The renderer composes `phong.wgsl` with naga-oil, reflects the uniform
//! struct from the composed IR once, and afterwards writes every shader input
//! by name through a [`gpu::uniform::UniformBlock`]. The window size lives in
//! a [`camera::Viewport`] owned by the engine and passed explicitly to the
//! transform code.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod mesh;
pub mod options;
pub mod renderer;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::SphereEngine;
pub use error::SphereError;
pub use input::KeyAction;
pub use mesh::SphereMesh;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
