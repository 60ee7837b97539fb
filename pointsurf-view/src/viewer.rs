//! Interactive viewer window and event loop

use crate::bindings::{KeyBindings, KeyChord, Modifiers};
use crate::camera::Camera;
use crate::renderer::Renderer;
use crate::scene::{ModelId, Scene};
use pointsurf_core::{Error, Model, Result};
use std::sync::Arc;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

/// Interactive 3D viewer.
///
/// Owns the model registry and the key-binding table; `run` hands control to
/// the winit event loop, which dispatches bound callbacks synchronously on
/// the render thread.
pub struct Viewer {
    title: String,
    scene: Scene,
    bindings: KeyBindings,
    camera: Camera,
    usage: Vec<String>,
    modifiers: Modifiers,
    last_mouse_pos: Option<PhysicalPosition<f64>>,
    left_pressed: bool,
    right_pressed: bool,
    camera_dirty: bool,
}

impl Viewer {
    /// Create a viewer with a window title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            scene: Scene::new(),
            bindings: KeyBindings::new(),
            camera: Camera::default(),
            usage: Vec::new(),
            modifiers: Modifiers::NONE,
            last_mouse_pos: None,
            left_pressed: false,
            right_pressed: false,
            camera_dirty: false,
        }
    }

    /// Consume the redraw state accumulated by callbacks and camera input.
    /// Returns true at most once per accumulation.
    fn take_needs_redraw(&mut self) -> bool {
        let scene_dirty = self.scene.take_redraw_request();
        let camera_dirty = std::mem::take(&mut self.camera_dirty);
        scene_dirty || camera_dirty
    }

    /// Add a model to the registry
    pub fn add_model(&mut self, model: Model) -> ModelId {
        self.scene.add_model(model)
    }

    /// Remove a model from the registry
    pub fn delete_model(&mut self, id: ModelId) -> bool {
        self.scene.delete_model(id)
    }

    /// The model registry
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the model registry
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Bind a callback to a key chord. `usage` shows up in the startup help.
    pub fn bind<F>(&mut self, key: KeyCode, mods: Modifiers, usage: impl Into<String>, callback: F)
    where
        F: FnMut(&mut Scene) -> bool + 'static,
    {
        self.bindings.bind(KeyChord::new(key, mods), usage, callback);
    }

    /// Add a free-form line to the startup help text
    pub fn set_usage(&mut self, line: impl Into<String>) {
        self.usage.push(line.into());
    }

    fn print_usage(&self) {
        println!("{}", self.title);
        println!("  drag left mouse: orbit, drag right mouse: pan, scroll: zoom");
        println!("  R: reset camera, F: frame scene, Esc: quit");
        for line in self.bindings.usage_lines() {
            println!("  {}", line);
        }
        for line in &self.usage {
            println!("  {}", line);
        }
    }

    /// Open the window and run the blocking event loop
    pub fn run(mut self) -> Result<()> {
        self.print_usage();

        let event_loop = EventLoop::new()
            .map_err(|e| Error::Visualization(format!("failed to create event loop: {}", e)))?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(1200.0, 800.0))
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("failed to create window: {}", e)))?,
        );

        let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;
        self.camera.aspect_ratio = renderer.aspect_ratio();
        if let Some(bounds) = self.scene.bounding_box() {
            self.camera.frame(&bounds);
        }

        tracing::info!(models = self.scene.len(), "viewer started");

        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Wait);

                let Event::WindowEvent { event, .. } = event else {
                    return;
                };
                match event {
                    WindowEvent::CloseRequested => target.exit(),
                    WindowEvent::Resized(new_size) => {
                        renderer.resize(new_size);
                        self.camera.aspect_ratio =
                            new_size.width as f32 / new_size.height.max(1) as f32;
                        self.camera_dirty = true;
                    }
                    WindowEvent::ModifiersChanged(mods) => {
                        let state = mods.state();
                        self.modifiers = Modifiers {
                            ctrl: state.control_key(),
                            shift: state.shift_key(),
                            alt: state.alt_key(),
                        };
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if event.state != ElementState::Pressed || event.repeat {
                            return;
                        }
                        let PhysicalKey::Code(code) = event.physical_key else {
                            return;
                        };
                        let chord = KeyChord::new(code, self.modifiers);
                        // built-in keys apply only when no binding claimed
                        // the chord
                        if !self.bindings.dispatch(chord, &mut self.scene) {
                            match chord {
                                KeyChord {
                                    key: KeyCode::Escape,
                                    ..
                                } => target.exit(),
                                KeyChord {
                                    key: KeyCode::KeyR,
                                    mods: Modifiers::NONE,
                                } => {
                                    self.camera.reset();
                                    self.camera_dirty = true;
                                }
                                KeyChord {
                                    key: KeyCode::KeyF,
                                    mods: Modifiers::NONE,
                                } => {
                                    if let Some(bounds) = self.scene.bounding_box() {
                                        self.camera.frame(&bounds);
                                        self.camera_dirty = true;
                                    }
                                }
                                _ => {}
                            }
                        }
                    }
                    WindowEvent::MouseInput { state, button, .. } => match button {
                        MouseButton::Left => self.left_pressed = state == ElementState::Pressed,
                        MouseButton::Right => self.right_pressed = state == ElementState::Pressed,
                        _ => {}
                    },
                    WindowEvent::CursorMoved { position, .. } => {
                        if let Some(last) = self.last_mouse_pos {
                            let dx = (position.x - last.x) as f32;
                            let dy = (position.y - last.y) as f32;
                            if self.left_pressed {
                                self.camera.orbit(dx * 0.01, dy * 0.01);
                                self.camera_dirty = true;
                            } else if self.right_pressed {
                                self.camera.pan(dx * 0.002, dy * 0.002);
                                self.camera_dirty = true;
                            }
                        }
                        self.last_mouse_pos = Some(position);
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let scroll = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                        };
                        self.camera.zoom(scroll * 0.1);
                        self.camera_dirty = true;
                    }
                    WindowEvent::RedrawRequested => {
                        renderer.update_camera(
                            self.camera.view_matrix(),
                            self.camera.projection_matrix(),
                            self.camera.position.coords,
                        );
                        if let Err(e) = renderer.render(&self.scene) {
                            tracing::error!("render error: {}", e);
                        }
                    }
                    _ => {}
                }
                // redraw on demand: callbacks flag the scene when they
                // mutate it, input handlers flag the camera
                if self.take_needs_redraw() {
                    window.request_redraw();
                }
            })
            .map_err(|e| Error::Visualization(format!("event loop error: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointsurf_core::{Point3f, PointCloud};

    #[test]
    fn redraw_state_is_consumed_once() {
        let mut viewer = Viewer::new("test");
        assert!(!viewer.take_needs_redraw());

        // scene mutations request exactly one redraw
        viewer.add_model(Model::PointCloud(PointCloud::from_points(vec![
            Point3f::origin(),
        ])));
        assert!(viewer.take_needs_redraw());
        assert!(!viewer.take_needs_redraw());

        // camera motion requests exactly one redraw
        viewer.camera_dirty = true;
        assert!(viewer.take_needs_redraw());
        assert!(!viewer.take_needs_redraw());
    }
}
