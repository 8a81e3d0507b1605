//! Per-frame batching of the scene into instanced draws, and the overlay
//! painter drawn on top of it.
//!
//! The scene renderer keeps GPU copies of every geometry and one growable
//! instance buffer per batch. Each frame it asks the scene for its batches,
//! uploads the instance data and records one draw per batch: filled
//! triangles go through the basic pipeline, edge lists through the line
//! pipeline. Both renderers record into any colour view of the [`Gpu`]'s
//! format, so the same code serves the window surface and offscreen targets.

use std::{collections::HashMap, iter};

use egui::{ClippedPrimitive, TextureId, TexturesDelta, epaint::Primitive};
use wgpu::util::DeviceExt;

use crate::{
    context::Gpu,
    data_structures::{
        instance::InstanceRaw,
        model::{DrawMesh, GpuMesh},
        scene_graph::{BatchKey, GeometryId, Scene},
    },
    pipelines::gui::{self, GuiVertex},
};

/// Instance storage for one batch. Grows to the largest batch seen.
#[derive(Debug)]
struct InstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
}

impl InstanceBuffer {
    fn with_capacity(device: &wgpu::Device, capacity: usize) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (capacity.max(1) * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self { buffer, capacity }
    }

    fn write(&mut self, gpu: &Gpu, instances: &[InstanceRaw]) {
        if instances.len() > self.capacity {
            *self = Self::with_capacity(&gpu.device, instances.len().next_power_of_two());
        }
        gpu.queue
            .write_buffer(&self.buffer, 0, bytemuck::cast_slice(instances));
    }
}

#[derive(Debug, Default)]
pub struct SceneRenderer {
    meshes: HashMap<GeometryId, GpuMesh>,
    instances: HashMap<BatchKey, InstanceBuffer>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload geometries added since the last frame.
    fn sync_meshes(&mut self, gpu: &Gpu, scene: &Scene) {
        for (id, mesh) in scene.geometries() {
            self.meshes.entry(id).or_insert_with(|| {
                log::debug!(
                    "uploading geometry {:?}: {} triangles, {} lines",
                    id,
                    mesh.triangle_count(),
                    mesh.line_count()
                );
                GpuMesh::upload(&gpu.device, &format!("{:?}", id), mesh)
            });
        }
    }

    /// Clear `view` to the scene background and draw every batch into it.
    pub fn draw(&mut self, gpu: &Gpu, view: &wgpu::TextureView, scene: &Scene) {
        self.sync_meshes(gpu, scene);

        let mut camera_uniform = gpu.camera.uniform;
        camera_uniform.update_view_proj(&scene.camera, &gpu.projection);
        gpu.queue
            .write_buffer(&gpu.camera.buffer, 0, bytemuck::cast_slice(&[camera_uniform]));

        let light_uniform = crate::pipelines::light::LightUniform::from_lights(scene.lights());
        gpu.queue
            .write_buffer(&gpu.light.buffer, 0, bytemuck::cast_slice(&[light_uniform]));

        let batches = scene.batches();
        for (key, instances) in &batches {
            self.instances
                .entry(*key)
                .or_insert_with(|| InstanceBuffer::with_capacity(&gpu.device, instances.len()))
                .write(gpu, instances);
        }

        let [r, g, b] = scene.background;
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &gpu.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            for (key, instances) in &batches {
                let (Some(mesh), Some(buffer)) =
                    (self.meshes.get(&key.geometry), self.instances.get(key))
                else {
                    continue;
                };
                let range = 0..instances.len() as u32;
                render_pass.set_vertex_buffer(1, buffer.buffer.slice(..));
                if key.lines {
                    render_pass.set_pipeline(&gpu.pipelines.lines);
                    render_pass.draw_lines_instanced(
                        mesh,
                        range,
                        &gpu.camera.bind_group,
                        &gpu.light.bind_group,
                    );
                } else {
                    render_pass.set_pipeline(&gpu.pipelines.basic);
                    render_pass.draw_mesh_instanced(
                        mesh,
                        range,
                        &gpu.camera.bind_group,
                        &gpu.light.bind_group,
                    );
                }
            }
        }

        gpu.queue.submit(iter::once(encoder.finish()));
    }
}

/// Let `draw` record into an offscreen texture the size of the depth buffer
/// and read the result back as tightly packed RGBA8 rows.
#[cfg(feature = "integration-tests")]
pub async fn capture(gpu: &Gpu, draw: impl FnOnce(&wgpu::TextureView)) -> anyhow::Result<Vec<u8>> {
    let size = gpu.depth_texture.texture.size();
    let target = gpu.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("capture target"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: gpu.format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());
    draw(&view);

    let unpadded = 4 * size.width;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    let padded = unpadded.div_ceil(align) * align;
    let output = gpu.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("capture buffer"),
        size: (padded * size.height) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });
    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Capture Encoder"),
        });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: &target,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &output,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: Some(size.height),
            },
        },
        size,
    );
    gpu.queue.submit(iter::once(encoder.finish()));

    // Map first, then poll, then await: awaiting before the poll never
    // resolves.
    let slice = output.slice(..);
    let (tx, rx) = futures::channel::oneshot::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    gpu.device.poll(wgpu::PollType::Wait {
        submission_index: None,
        timeout: Some(std::time::Duration::from_secs(3)),
    })?;
    rx.await??;

    let pixels = {
        let data = slice.get_mapped_range();
        data.chunks(padded as usize)
            .flat_map(|row| &row[..unpadded as usize])
            .copied()
            .collect()
    };
    output.unmap();
    Ok(pixels)
}

/// Size of the target the overlay is painted on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
    pub pixels_per_point: f32,
}

impl ScreenSize {
    /// Map an egui vertex from points to clip space.
    pub fn vertex(&self, v: &egui::epaint::Vertex) -> GuiVertex {
        let x = v.pos.x * self.pixels_per_point / self.width.max(1) as f32;
        let y = v.pos.y * self.pixels_per_point / self.height.max(1) as f32;
        let [r, g, b, a] = v.color.to_array();
        GuiVertex {
            position: [x * 2.0 - 1.0, 1.0 - y * 2.0],
            tex_coords: [v.uv.x, v.uv.y],
            colour: [
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
                a as f32 / 255.0,
            ],
        }
    }

    /// Scissor rectangle in pixels for a clip rectangle in points, clamped
    /// to the target. `None` when nothing of it is visible.
    pub fn scissor(&self, clip: egui::Rect) -> Option<[u32; 4]> {
        let ppp = self.pixels_per_point;
        let min_x = ((clip.min.x * ppp).round().max(0.0) as u32).min(self.width);
        let min_y = ((clip.min.y * ppp).round().max(0.0) as u32).min(self.height);
        let max_x = ((clip.max.x * ppp).round().max(0.0) as u32).min(self.width);
        let max_y = ((clip.max.y * ppp).round().max(0.0) as u32).min(self.height);
        (max_x > min_x && max_y > min_y).then(|| [min_x, min_y, max_x - min_x, max_y - min_y])
    }
}

#[derive(Debug)]
struct GuiTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// Paints tessellated egui output over whatever is already in the target.
#[derive(Debug)]
pub struct GuiRenderer {
    sampler: wgpu::Sampler,
    textures: HashMap<TextureId, GuiTexture>,
}

impl GuiRenderer {
    pub fn new(gpu: &Gpu) -> Self {
        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("gui sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        Self {
            sampler,
            textures: HashMap::new(),
        }
    }

    fn set_texture(&mut self, gpu: &Gpu, id: TextureId, delta: &egui::epaint::ImageDelta) {
        let egui::ImageData::Color(image) = &delta.image;
        let [width, height] = [image.width() as u32, image.height() as u32];
        if width == 0 || height == 0 {
            return;
        }
        let pixels: Vec<u8> = image.pixels.iter().flat_map(|c| c.to_array()).collect();
        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let origin = match delta.pos {
            Some([x, y]) => {
                if !self.textures.contains_key(&id) {
                    log::warn!("partial update of unknown gui texture {:?}", id);
                    return;
                }
                wgpu::Origin3d {
                    x: x as u32,
                    y: y as u32,
                    z: 0,
                }
            }
            None => {
                let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
                    label: Some("gui texture"),
                    size: extent,
                    mip_level_count: 1,
                    sample_count: 1,
                    dimension: wgpu::TextureDimension::D2,
                    format: wgpu::TextureFormat::Rgba8UnormSrgb,
                    usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                    view_formats: &[],
                });
                let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
                let bind_group = gui::mk_bind_group(&gpu.device, &gpu.gui_layout, &view, &self.sampler);
                self.textures.insert(id, GuiTexture { texture, bind_group });
                wgpu::Origin3d::ZERO
            }
        };

        let Some(target) = self.textures.get(&id) else {
            return;
        };
        gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &target.texture,
                mip_level: 0,
                origin,
                aspect: wgpu::TextureAspect::All,
            },
            &pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            extent,
        );
    }

    /// Create or patch the textures egui changed this pass.
    pub fn update_textures(&mut self, gpu: &Gpu, textures: &TexturesDelta) {
        for (id, delta) in &textures.set {
            self.set_texture(gpu, *id, delta);
        }
    }

    /// Drop the textures egui no longer needs. Call after the pass that
    /// last used them was drawn.
    pub fn free_textures(&mut self, textures: &TexturesDelta) {
        for id in &textures.free {
            self.textures.remove(id);
        }
    }

    /// Draw `primitives` over the current contents of `view`.
    pub fn draw(
        &self,
        gpu: &Gpu,
        view: &wgpu::TextureView,
        primitives: &[ClippedPrimitive],
        screen: ScreenSize,
    ) {
        let mut vertices: Vec<GuiVertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut draws = Vec::new();
        for ClippedPrimitive {
            clip_rect,
            primitive,
        } in primitives
        {
            let Primitive::Mesh(mesh) = primitive else {
                log::warn!("gui paint callbacks are not supported");
                continue;
            };
            let Some(scissor) = screen.scissor(*clip_rect) else {
                continue;
            };
            if mesh.indices.is_empty() || !self.textures.contains_key(&mesh.texture_id) {
                continue;
            }
            let base_vertex = vertices.len() as i32;
            let first_index = indices.len() as u32;
            vertices.extend(mesh.vertices.iter().map(|v| screen.vertex(v)));
            indices.extend_from_slice(&mesh.indices);
            draws.push((mesh.texture_id, scissor, first_index..indices.len() as u32, base_vertex));
        }

        if !draws.is_empty() {
            let vertex_buffer = gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Gui Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Gui Index Buffer"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });

            let mut encoder = gpu
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Gui Encoder"),
                });
            {
                let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Gui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    ..Default::default()
                });
                render_pass.set_pipeline(&gpu.pipelines.gui);
                render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                for (texture, [x, y, w, h], range, base_vertex) in draws {
                    let Some(texture) = self.textures.get(&texture) else {
                        continue;
                    };
                    render_pass.set_scissor_rect(x, y, w, h);
                    render_pass.set_bind_group(0, &texture.bind_group, &[]);
                    render_pass.draw_indexed(range, base_vertex, 0..1);
                }
            }
            gpu.queue.submit(iter::once(encoder.finish()));
        }
    }
}
