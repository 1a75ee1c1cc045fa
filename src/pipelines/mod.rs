//! Render pipeline definitions.
//!
//! A single pipeline covers the whole engine: the instanced cube pipeline
//! with its texture-array shader.

pub mod cube;
