//! Shared utilities for the rendering engine.

/// Frame limiting and periodic FPS sampling.
pub mod frame_timing;
