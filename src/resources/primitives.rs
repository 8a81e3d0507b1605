//! Procedural meshes.
//!
//! Parametrisations follow the usual three-dimensional primitive conventions:
//! boxes and spheres are centred at the origin, planes lie in the xy-plane
//! facing +z, tori lie in the xy-plane around the z axis and cones point up
//! the y axis.

use std::{
    collections::BTreeSet,
    f32::consts::{PI, TAU},
};

use cgmath::{InnerSpace, Vector3};

use crate::data_structures::model::ModelVertex;

/// CPU-side mesh: shared vertices, a triangle list and an edge list.
///
/// Line-only geometries leave `indices` empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
    pub lines: Vec<u32>,
}

impl MeshData {
    /// A triangle mesh; its edge list is derived from the triangles.
    pub fn triangles(vertices: Vec<ModelVertex>, indices: Vec<u32>) -> Self {
        let lines = edges(&indices);
        Self {
            vertices,
            indices,
            lines,
        }
    }

    pub fn line_segments(vertices: Vec<ModelVertex>, lines: Vec<u32>) -> Self {
        Self {
            vertices,
            indices: Vec::new(),
            lines,
        }
    }

    pub fn translate(mut self, x: f32, y: f32, z: f32) -> Self {
        for vertex in &mut self.vertices {
            vertex.position[0] += x;
            vertex.position[1] += y;
            vertex.position[2] += z;
        }
        self
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn line_count(&self) -> usize {
        self.lines.len() / 2
    }

    /// Append `other`, offsetting its indices.
    pub fn merge(&mut self, other: MeshData) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.indices.extend(other.indices.into_iter().map(|i| i + offset));
        self.lines.extend(other.lines.into_iter().map(|i| i + offset));
    }
}

/// Unique undirected edges of a triangle list, as index pairs.
pub fn edges(indices: &[u32]) -> Vec<u32> {
    let mut seen = BTreeSet::new();
    for triangle in indices.chunks_exact(3) {
        for (a, b) in [
            (triangle[0], triangle[1]),
            (triangle[1], triangle[2]),
            (triangle[2], triangle[0]),
        ] {
            if a != b {
                seen.insert((a.min(b), a.max(b)));
            }
        }
    }
    seen.into_iter().flat_map(|(a, b)| [a, b]).collect()
}

fn normalized(v: Vector3<f32>) -> [f32; 3] {
    if v.magnitude2() > 0.0 {
        v.normalize().into()
    } else {
        [0.0, 1.0, 0.0]
    }
}

/// Two triangles per grid cell. `row` is the number of vertices per row.
fn grid_indices(columns: u32, rows: u32, row: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity((columns * rows * 6) as usize);
    for iy in 0..rows {
        for ix in 0..columns {
            let a = ix + row * iy;
            let b = ix + row * (iy + 1);
            let c = (ix + 1) + row * (iy + 1);
            let d = (ix + 1) + row * iy;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    indices
}

pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let half = Vector3::new(width / 2.0, height / 2.0, depth / 2.0);
    // normal, u, v with u x v = normal
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let (n, u, v): (Vector3<f32>, Vector3<f32>, Vector3<f32>) = (normal.into(), u.into(), v.into());
        let base = vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let corner = n + u * su + v * sv;
            let position = Vector3::new(corner.x * half.x, corner.y * half.y, corner.z * half.z);
            vertices.push(ModelVertex::new(position.into(), normal));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    MeshData::triangles(vertices, indices)
}

pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let row = width_segments + 1;
    let mut vertices = Vec::with_capacity((row * (height_segments + 1)) as usize);
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let direction = Vector3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            vertices.push(ModelVertex::new(
                (direction * radius).into(),
                normalized(direction),
            ));
        }
    }
    let mut indices = Vec::new();
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = row * iy + ix + 1;
            let b = row * iy + ix;
            let c = row * (iy + 1) + ix;
            let d = row * (iy + 1) + ix + 1;
            // the pole rows collapse into fans
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    MeshData::triangles(vertices, indices)
}

pub fn plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let columns = width_segments.max(1);
    let rows = height_segments.max(1);
    let (cell_w, cell_h) = (width / columns as f32, height / rows as f32);
    let mut vertices = Vec::with_capacity(((columns + 1) * (rows + 1)) as usize);
    for iy in 0..=rows {
        let y = iy as f32 * cell_h - height / 2.0;
        for ix in 0..=columns {
            let x = ix as f32 * cell_w - width / 2.0;
            vertices.push(ModelVertex::new([x, -y, 0.0], [0.0, 0.0, 1.0]));
        }
    }
    MeshData::triangles(vertices, grid_indices(columns, rows, columns + 1))
}

pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let mut vertices = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let position = Vector3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let centre = Vector3::new(radius * u.cos(), radius * u.sin(), 0.0);
            vertices.push(ModelVertex::new(position.into(), normalized(position - centre)));
        }
    }
    MeshData::triangles(vertices, grid_indices(tubular, radial, tubular + 1))
}

fn knot_curve(u: f32, p: f32, q: f32, radius: f32) -> Vector3<f32> {
    let qu_over_p = q / p * u;
    let cs = qu_over_p.cos();
    Vector3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * qu_over_p.sin() * 0.5,
    )
}

pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> MeshData {
    let tubular = tubular_segments.max(3);
    let radial = radial_segments.max(3);
    let (p, q) = (p.max(1) as f32, q as f32);
    let mut vertices = Vec::with_capacity(((tubular + 1) * (radial + 1)) as usize);
    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * p * TAU;
        let p1 = knot_curve(u, p, q, radius);
        let p2 = knot_curve(u + 0.01, p, q, radius);
        let tangent = p2 - p1;
        let binormal = tangent.cross(p2 + p1);
        let normal = binormal.cross(tangent);
        let (binormal, normal) = (binormal.normalize(), normal.normalize());
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let position = p1 + normal * cx + binormal * cy;
            vertices.push(ModelVertex::new(position.into(), normalized(position - p1)));
        }
    }
    MeshData::triangles(vertices, grid_indices(radial, tubular, radial + 1))
}

/// Cone with its apex at `height / 2` and a closed base at `-height / 2`.
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> MeshData {
    let radial = radial_segments.max(3);
    let half = height / 2.0;
    let slope = radius / height;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // two rings: apex (radius 0) and base
    for (ring_radius, y) in [(0.0, half), (radius, -half)] {
        for x in 0..=radial {
            let theta = x as f32 / radial as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            vertices.push(ModelVertex::new(
                [ring_radius * sin, y, ring_radius * cos],
                normalized(Vector3::new(sin, slope, cos)),
            ));
        }
    }
    let row = radial + 1;
    for x in 0..radial {
        let (b, c, d) = (row + x, row + x + 1, x + 1);
        indices.extend_from_slice(&[b, c, d]);
    }

    let centre = vertices.len() as u32;
    vertices.push(ModelVertex::new([0.0, -half, 0.0], [0.0, -1.0, 0.0]));
    for x in 0..=radial {
        let theta = x as f32 / radial as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        vertices.push(ModelVertex::new([radius * sin, -half, radius * cos], [0.0, -1.0, 0.0]));
    }
    for x in 0..radial {
        indices.extend_from_slice(&[centre + x + 2, centre + x + 1, centre]);
    }
    MeshData::triangles(vertices, indices)
}

/// Grid lines on the walls, floor and ceiling of a box, centred at the origin.
pub fn box_lines(
    width: f32,
    height: f32,
    depth: f32,
    width_segments: u32,
    height_segments: u32,
    depth_segments: u32,
) -> MeshData {
    let (w, h, d) = (width / 2.0, height / 2.0, depth / 2.0);
    let mut points: Vec<[f32; 3]> = Vec::new();
    let mut ring = |corners: [[f32; 3]; 4]| {
        for i in 0..4 {
            points.push(corners[i]);
            points.push(corners[(i + 1) % 4]);
        }
    };
    for i in 0..=width_segments.max(1) {
        let x = -w + i as f32 * width / width_segments.max(1) as f32;
        ring([[x, -h, -d], [x, h, -d], [x, h, d], [x, -h, d]]);
    }
    for i in 0..=height_segments.max(1) {
        let y = -h + i as f32 * height / height_segments.max(1) as f32;
        ring([[-w, y, -d], [w, y, -d], [w, y, d], [-w, y, d]]);
    }
    for i in 0..=depth_segments.max(1) {
        let z = -d + i as f32 * depth / depth_segments.max(1) as f32;
        ring([[-w, -h, z], [-w, h, z], [w, h, z], [w, -h, z]]);
    }
    let vertices: Vec<_> = points
        .into_iter()
        .map(|p| ModelVertex::new(p, [0.0, 1.0, 0.0]))
        .collect();
    let lines = (0..vertices.len() as u32).collect();
    MeshData::line_segments(vertices, lines)
}
