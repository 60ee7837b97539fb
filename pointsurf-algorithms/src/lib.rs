//! Point cloud processing algorithms for pointsurf
//!
//! Currently this crate provides normal estimation, the preprocessing step
//! surface reconstruction depends on.

pub mod normals;

pub use normals::*;
