//! Engine data structures: cube geometry, instances, and textures.
//!
//! - `cube` contains the shared textured cube mesh (the per-vertex stream)
//! - `instance` holds the per-instance transform + texture-layer record
//! - `texture` contains the texture-array builder and the depth texture

pub mod cube;
pub mod instance;
pub mod texture;
