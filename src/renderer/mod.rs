//! Rendering passes.
//!
//! A single forward pass draws the sphere with per-fragment Phong lighting
//! straight into the surface texture.

mod phong;

pub use phong::PhongRenderer;
