//! Surface reconstruction for pointsurf
//!
//! Fits watertight triangle meshes to oriented point clouds. The only
//! backend today is screened Poisson reconstruction.

pub mod poisson;

pub use poisson::*;
