use std::path::PathBuf;

use flow_scenes::{animation::FrameTime, flow::FrameDriver};
use rand::{SeedableRng, rngs::StdRng};

/// Bookkeeping state for flows under test.
#[derive(Debug, Default)]
pub(crate) struct State {
    frame_counter: u32,
    init_invocations: u32,
    input_invocations: u32,
    update_invocations: u32,
    pub dummy_state: String,
    pub received_events: u32,
}

#[allow(dead_code)]
impl State {
    pub fn frame(&mut self) {
        self.frame_counter += 1;
    }

    pub fn init(&mut self) {
        self.init_invocations += 1;
    }

    pub fn input(&mut self) {
        self.input_invocations += 1;
    }

    pub fn update(&mut self) {
        self.update_invocations += 1;
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn init_invocations(&self) -> u32 {
        self.init_invocations
    }

    pub fn update_invocations(&self) -> u32 {
        self.update_invocations
    }

    pub fn input_invocations(&self) -> u32 {
        self.input_invocations
    }
}

/// Run `frames` frames spaced `step` seconds apart, starting at `start`.
/// Returns the elapsed time of the last frame.
#[allow(dead_code)]
pub fn run_frames<S, E>(driver: &mut FrameDriver<S, E>, start: f32, step: f32, frames: u32) -> f32 {
    let mut elapsed = start;
    for i in 0..frames {
        elapsed = start + step * i as f32;
        driver.frame(FrameTime {
            elapsed,
            delta: if i == 0 { 0.0 } else { step },
        });
    }
    elapsed
}

#[allow(dead_code)]
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

/// Write `text` to a fresh file in the temp directory.
#[allow(dead_code)]
pub fn write_corpus(name: &str, text: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("flow-scenes-{}-{}.txt", name, std::process::id()));
    std::fs::write(&path, text).expect("failed to write corpus fixture");
    path
}

#[allow(dead_code)]
pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {} to be close to {}",
        actual,
        expected
    );
}

/// Write a one-triangle glTF with an external `.bin` buffer into a fresh
/// temp directory and return the absolute path of the `.gltf` file.
#[allow(dead_code)]
pub fn write_triangle_gltf(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flow-scenes-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).expect("failed to create model fixture directory");

    let positions: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let bytes: Vec<u8> = positions.iter().flat_map(|p| p.to_le_bytes()).collect();
    std::fs::write(dir.join("triangle.bin"), &bytes).expect("failed to write model buffer");

    let gltf = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "mesh": 0 }],
        "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }],
        "buffers": [{ "uri": "triangle.bin", "byteLength": 36 }],
        "bufferViews": [{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }],
        "accessors": [{
            "bufferView": 0,
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [0.0, 0.0, 0.0],
            "max": [1.0, 1.0, 0.0]
        }]
    }"#;
    let path = dir.join("triangle.gltf");
    std::fs::write(&path, gltf).expect("failed to write model fixture");
    path
}
