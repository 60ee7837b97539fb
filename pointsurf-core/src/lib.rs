//! Core geometry types for pointsurf
//!
//! This crate provides the fundamental types shared by the rest of the
//! workspace: point clouds with optional per-vertex attributes, triangle
//! meshes, axis-aligned bounds, and the tagged `Model` handle the viewer
//! registry stores.

pub mod point;
pub mod point_cloud;
pub mod mesh;
pub mod bounds;
pub mod model;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use mesh::*;
pub use bounds::*;
pub use model::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
