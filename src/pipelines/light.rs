use wgpu::util::DeviceExt;

use crate::data_structures::scene_graph::{Light, LightKind};

/// Directional lights beyond this count are ignored by the shader.
pub const MAX_DIRECTIONAL: usize = 4;

#[derive(Debug)]
pub struct LightResources {
    pub uniform: LightUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    pub fn new(uniform: LightUniform, device: &wgpu::Device) -> Self {
        let buffer = mk_buffer(device, uniform);
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer);
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }
}

/// Summed light contributions as the shader sees them.
///
/// Every field is a vec4 so the layout needs no manual padding. The `w` of
/// `ambient` holds the number of active directional lights.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub ambient: [f32; 4],
    pub sky: [f32; 4],
    pub ground: [f32; 4],
    /// Unit vectors pointing from the surface towards each light.
    pub directions: [[f32; 4]; MAX_DIRECTIONAL],
    pub colours: [[f32; 4]; MAX_DIRECTIONAL],
}

fn scaled(colour: [f32; 3], intensity: f32) -> [f32; 3] {
    colour.map(|c| c * intensity)
}

fn accumulate(target: &mut [f32; 4], rgb: [f32; 3]) {
    for (t, c) in target.iter_mut().zip(rgb) {
        *t += c;
    }
}

impl LightUniform {
    pub fn from_lights(lights: &[Light]) -> Self {
        use cgmath::InnerSpace;

        let mut uniform = Self::default();
        let mut directional = 0;
        for light in lights {
            let rgb = scaled(light.colour, light.intensity);
            match light.kind {
                LightKind::Ambient => accumulate(&mut uniform.ambient, rgb),
                LightKind::Hemisphere { ground } => {
                    accumulate(&mut uniform.sky, rgb);
                    accumulate(&mut uniform.ground, scaled(ground, light.intensity));
                }
                LightKind::Directional => {
                    if directional == MAX_DIRECTIONAL {
                        log::warn!("more than {} directional lights, ignoring the rest", MAX_DIRECTIONAL);
                        continue;
                    }
                    // a light sitting on the origin shines straight down
                    let direction = if light.position.magnitude2() > f32::EPSILON {
                        light.position.normalize()
                    } else {
                        cgmath::Vector3::unit_y()
                    };
                    uniform.directions[directional] = [direction.x, direction.y, direction.z, 0.0];
                    let [r, g, b] = rgb;
                    uniform.colours[directional] = [r, g, b, 1.0];
                    directional += 1;
                }
            }
        }
        uniform.ambient[3] = directional as f32;
        uniform
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Uniform Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("light_bind_group_layout"),
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: light_buffer.as_entire_binding(),
        }],
        label: Some("light_bind_group"),
    })
}
