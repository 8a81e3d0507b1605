use std::io::{BufReader, Cursor};

use cgmath::{Matrix, Matrix3, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::{data_structures::model::ModelVertex, resources::primitives::MeshData};

/**
 * This module contains all logic for loading meshes from external files
 * as well as the procedural primitives.
 */
pub mod primitives;

/// Resolve an asset path against the page origin.
#[cfg(target_arch = "wasm32")]
pub fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| anyhow::anyhow!("page origin is unavailable"))?;
    let base = reqwest::Url::parse(&format!("{}/assets/", origin))?;
    Ok(base.join(file_name)?)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name)?;
        reqwest::get(url).await?.error_for_status()?.bytes().await?.to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let path = std::path::Path::new("./").join("assets").join(file_name);
        std::fs::read(path)?
    };

    Ok(data)
}

/// Load every mesh of a glTF file into one [`MeshData`], baking the node
/// transforms into the vertices. Materials and textures are ignored; the
/// caller shades the result with a scene material.
pub async fn load_gltf_mesh(file_name: &str) -> anyhow::Result<MeshData> {
    let gltf_bytes = load_binary(file_name).await?;
    let gltf_reader = BufReader::new(Cursor::new(gltf_bytes));
    let gltf = gltf::Gltf::from_reader(gltf_reader)?;

    // Buffer uris are relative to the glTF file
    let directory = file_name
        .rsplit_once('/')
        .map(|(dir, _)| format!("{}/", dir))
        .unwrap_or_default();
    let mut buffer_data = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let blob = gltf
                    .blob
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("{} has no binary chunk", file_name))?;
                buffer_data.push(blob.to_vec());
            }
            gltf::buffer::Source::Uri(uri) => {
                buffer_data.push(load_binary(&format!("{}{}", directory, uri)).await?);
            }
        }
    }

    let mut mesh = MeshData::default();
    for scene in gltf.scenes() {
        for node in scene.nodes() {
            collect_node(&node, Matrix4::identity(), &buffer_data, &mut mesh);
        }
    }
    if mesh.vertices.is_empty() {
        anyhow::bail!("{} contains no triangle meshes", file_name);
    }
    log::info!(
        "loaded {}: {} vertices, {} triangles",
        file_name,
        mesh.vertices.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

fn collect_node(
    node: &gltf::scene::Node,
    parent: Matrix4<f32>,
    buffers: &[Vec<u8>],
    out: &mut MeshData,
) {
    let world = parent * Matrix4::from(node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        let normal_matrix = Matrix3::from_cols(
            world.x.truncate(),
            world.y.truncate(),
            world.z.truncate(),
        )
        .invert()
        .map(|m| m.transpose())
        .unwrap_or_else(Matrix3::identity);

        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!("skipping non-triangle primitive in {:?}", mesh.name());
                continue;
            }
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let mut vertices: Vec<ModelVertex> = positions
                .map(|p| {
                    let p = world * Vector4::new(p[0], p[1], p[2], 1.0);
                    ModelVertex::new([p.x, p.y, p.z], [0.0, 1.0, 0.0])
                })
                .collect();
            if let Some(normals) = reader.read_normals() {
                for (vertex, n) in vertices.iter_mut().zip(normals) {
                    let n = normal_matrix * Vector3::from(n);
                    vertex.normal = n.into();
                }
            }
            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..vertices.len() as u32).collect(),
            };
            out.merge(MeshData::triangles(vertices, indices));
        }
    }
    for child in node.children() {
        collect_node(&child, world, buffers, out);
    }
}
