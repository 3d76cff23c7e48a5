//! Procedural mesh generation.
//!
//! The only surface in this crate is a tessellated unit sphere; see
//! [`SphereMesh::generate`].

mod sphere;

pub use sphere::SphereMesh;
