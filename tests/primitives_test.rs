use flow_scenes::resources::{
    self,
    primitives::{self, MeshData},
};

use crate::common::test_utils::assert_close;

mod common;

fn bounds(mesh: &MeshData) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for vertex in &mesh.vertices {
        for axis in 0..3 {
            min[axis] = min[axis].min(vertex.position[axis]);
            max[axis] = max[axis].max(vertex.position[axis]);
        }
    }
    (min, max)
}

fn indices_in_range(mesh: &MeshData) -> bool {
    let count = mesh.vertices.len() as u32;
    mesh.indices.iter().chain(&mesh.lines).all(|&i| i < count)
}

#[test]
fn cuboid_has_four_vertices_per_face() {
    let cube = primitives::cuboid(1.0, 2.0, 3.0);
    assert_eq!(cube.vertices.len(), 24);
    assert_eq!(cube.triangle_count(), 12);
    assert_eq!(cube.line_count(), 30);
    let (min, max) = bounds(&cube);
    assert_eq!(min, [-0.5, -1.0, -1.5]);
    assert_eq!(max, [0.5, 1.0, 1.5]);
}

#[test]
fn plane_grid_counts() {
    let floor = primitives::plane(10.0, 10.0, 50, 50);
    assert_eq!(floor.vertices.len(), 51 * 51);
    assert_eq!(floor.triangle_count(), 5000);
    assert!(indices_in_range(&floor));

    // 4 horizontal, 3 vertical, 2 diagonal
    let strip = primitives::plane(2.0, 1.0, 2, 1);
    assert_eq!(strip.line_count(), 9);
}

#[test]
fn sphere_collapses_the_poles() {
    let sphere = primitives::sphere(1.0, 32, 16);
    assert_eq!(sphere.triangle_count(), 32 * 16 * 2 - 2 * 32);
    assert!(indices_in_range(&sphere));
    for vertex in &sphere.vertices {
        let [x, y, z] = vertex.position;
        assert_close((x * x + y * y + z * z).sqrt(), 1.0);
    }
}

#[test]
fn torus_and_knot_are_closed_grids() {
    let torus = primitives::torus(2.0, 0.5, 12, 48);
    assert_eq!(torus.triangle_count(), 12 * 48 * 2);
    assert!(indices_in_range(&torus));
    let (min, max) = bounds(&torus);
    assert_close(max[0], 2.5);
    assert_close(min[2], -0.5);

    let knot = primitives::torus_knot(1.0, 0.2, 64, 8, 2, 3);
    assert_eq!(knot.triangle_count(), 64 * 8 * 2);
    assert!(indices_in_range(&knot));
}

#[test]
fn cone_points_up() {
    let cone = primitives::cone(1.5, 3.0, 32);
    assert_eq!(cone.triangle_count(), 64);
    let (min, max) = bounds(&cone);
    assert_close(max[1], 1.5);
    assert_close(min[1], -1.5);
}

#[test]
fn box_lines_is_line_only() {
    let room = primitives::box_lines(2.0, 6.0, 2.0, 10, 30, 10);
    assert_eq!(room.triangle_count(), 0);
    assert_eq!(room.line_count(), (11 + 31 + 11) * 4);
    assert_eq!(room.line_count(), 212);
}

#[test]
fn translate_moves_every_vertex() {
    let room = primitives::box_lines(2.0, 6.0, 2.0, 1, 1, 1).translate(0.0, 3.0, 0.0);
    let (min, max) = bounds(&room);
    assert_close(min[1], 0.0);
    assert_close(max[1], 6.0);
}

#[test]
fn merge_offsets_indices() {
    let mut mesh = primitives::cuboid(1.0, 1.0, 1.0);
    mesh.merge(primitives::cuboid(1.0, 1.0, 1.0).translate(2.0, 0.0, 0.0));
    assert_eq!(mesh.vertices.len(), 48);
    assert_eq!(mesh.triangle_count(), 24);
    assert!(indices_in_range(&mesh));
    assert!(mesh.indices[36..].iter().all(|&i| i >= 24));
}

#[test]
fn edges_are_unique_and_undirected() {
    let lines = primitives::edges(&[0, 1, 2, 2, 1, 3]);
    assert_eq!(lines, vec![0, 1, 0, 2, 1, 2, 1, 3, 2, 3]);
}

#[tokio::test]
async fn assets_are_read_from_the_working_directory() {
    let bytes = resources::load_binary("sample_corpus.txt").await.unwrap();
    assert_eq!(bytes, std::fs::read("assets/sample_corpus.txt").unwrap());

    assert!(resources::load_binary("no/such/asset.bin").await.is_err());
    assert!(resources::load_gltf_mesh("no/such/model.gltf").await.is_err());
}
