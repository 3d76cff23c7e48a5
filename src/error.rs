//! Crate-level error types.

use std::fmt;

use crate::gpu::{render_context::RenderContextError, uniform::UniformError};

/// Errors produced by the phong-sphere crate.
#[derive(Debug)]
pub enum SphereError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// WGSL composition or module registration failure.
    Shader(String),
    /// Uniform reflection or update failure.
    Uniform(UniformError),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for SphereError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Uniform(e) => write!(f, "uniform error: {e}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for SphereError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Uniform(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for SphereError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<UniformError> for SphereError {
    fn from(e: UniformError) -> Self {
        Self::Uniform(e)
    }
}

impl From<std::io::Error> for SphereError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
