//! flow-scenes
//!
//! Small classroom scenes on top of a minimal wgpu renderer. Every scene follows
//! the same shape: build a scene once, keep a little interaction state that
//! input mutates, and run a per-frame update that reads that state and the
//! elapsed time to move objects around.
//!
//! High-level modules
//! - `animation`: frame time, sine/orbit helpers, the bounce oscillator and ramps
//! - `camera`: camera, orbit controls and the view/projection uniform
//! - `config`: scene and window configuration
//! - `context`: GPU context that owns device/queue/pipelines, with or without a window
//! - `corpus`: text normalisation, tokenising, term search and population
//! - `data_structures`: scene objects, materials, instances, textures
//! - `demos`: the classroom scenes themselves
//! - `flow`: the flow trait, the frame driver and the event loop
//! - `gui`: the on-screen buttons and panel, laid out with egui
//! - `panel`: control panel widgets bound to interaction state
//! - `pipelines`: the lit triangle, line and overlay pipelines
//! - `render`: per-frame batching of the scene into instanced draws, and the overlay painter
//! - `resources`: procedural primitives and asset loading
//! - `tour`: the guided-tour stage machine
//!

pub mod animation;
pub mod camera;
pub mod config;
pub mod context;
pub mod corpus;
pub mod data_structures;
pub mod demos;
pub mod flow;
pub mod gui;
pub mod panel;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod tour;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use winit::keyboard::KeyCode;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Browser entry point: runs the demo registered under `name`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn run_demo(name: &str) -> Result<(), JsValue> {
    let config = config::RunConfig {
        demo: name.to_string(),
        ..Default::default()
    };
    demos::launch(&config).map_err(|e| JsValue::from_str(&e.to_string()))
}
