//! grid-ngin
//!
//! A lightweight, cross-platform instanced-rendering engine that draws a
//! lattice of textured cubes with a single draw call. Every cube is an
//! instance of one shared mesh; per-instance transforms and a texture-array
//! layer index travel in a second vertex stream, and all textures live as
//! layers of one GPU texture array.
//!
//! High-level modules
//! - `app`: winit event loop wiring input to the camera and renderer
//! - `camera`: orbit camera state, input controller, presets and projection
//! - `context`: central GPU and window context that owns device/queue/surface
//! - `data_structures`: engine data models (cube mesh, instances, textures)
//! - `pipelines`: the instanced texture-array render pipeline
//! - `render`: per-frame rendering (the single instanced draw)
//! - `resources`: helpers to decode image files into texture-array sources
//! - `scene`: the hand-authored instance scene and its rotation animation
//!

pub mod app;
pub mod camera;
pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use wgpu::*;
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
