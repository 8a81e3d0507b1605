//! Engine data structures: scene objects, materials, instances, textures.
//!
//! - `scene_graph` holds the scene: camera, lights, shared geometries and
//!   materials, and the objects that reference them
//! - `material` contains material descriptions and colour helpers
//! - `instance` holds per-instance transformation data uploaded to the GPU
//! - `model` contains the vertex layout and GPU meshes
//! - `texture` contains the depth texture wrapper

pub mod instance;
pub mod material;
pub mod model;
pub mod scene_graph;
pub mod texture;
