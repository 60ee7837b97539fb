//! Interactive visualization for pointsurf
//!
//! This crate provides a windowed 3D viewer built on wgpu and winit:
//! - a model registry (`Scene`) holding point clouds and meshes
//! - a key-chord dispatch table for user-defined callbacks
//! - camera controls (orbit, pan, zoom, fit-to-bounds)
//! - point and smooth-shaded mesh rendering

pub mod camera;
pub mod scene;
pub mod bindings;
pub mod renderer;
pub mod shaders;
pub mod viewer;

pub use camera::*;
pub use scene::*;
pub use bindings::*;
pub use viewer::*;

/// Re-export so binding callers don't need a winit dependency
pub use winit::keyboard::KeyCode;
