//! Viewport state and the fixed-camera transforms.
//!
//! There are no camera controls: the eye sits at a configured point looking
//! down -Z and the sphere is placed by the model transform.

/// Model, view, projection and normal matrices for one frame.
pub mod transforms;
/// Explicit viewport size owned by the engine.
pub mod viewport;

pub use transforms::Transforms;
pub use viewport::Viewport;
