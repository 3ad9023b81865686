use crate::shaders;
use bytemuck::{Pod, Zeroable};
use carousel_common::{Animal, MeshId};
use carousel_geometry::Mesh;
use carousel_render::{Renderer, ViewFrame};
use std::collections::BTreeMap;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct DrawUniforms {
    projection: [[f32; 4]; 4],
    model_view: [[f32; 4]; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

/// Flat colour for each mesh.
pub fn mesh_color(mesh: MeshId) -> [f32; 4] {
    match mesh {
        MeshId::Roof => [0.75, 0.2, 0.2, 1.0],
        MeshId::Ground => [0.55, 0.5, 0.45, 1.0],
        MeshId::Poles => [0.85, 0.7, 0.25, 1.0],
        MeshId::Animal(Animal::Skeleton) => [0.9, 0.9, 0.85, 1.0],
        MeshId::Animal(_) => [0.8, 0.8, 0.8, 1.0],
    }
}

/// Interleave positions and normals for the vertex buffer.
fn interleave(mesh: &Mesh) -> Vec<Vertex> {
    mesh.positions
        .iter()
        .zip(&mesh.normals)
        .map(|(p, n)| Vertex {
            position: p.to_array(),
            normal: n.to_array(),
        })
        .collect()
}

fn align_up(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment) * alignment
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// wgpu-based carousel renderer.
pub struct WgpuRenderer {
    pipeline: wgpu::RenderPipeline,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    /// Byte distance between uniform slots, padded to the device's offset alignment.
    draw_stride: u64,
    max_draws: u32,
    meshes: BTreeMap<MeshId, GpuMesh>,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_size = std::mem::size_of::<DrawUniforms>() as u64;
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let draw_stride = align_up(uniform_size, alignment);
        let max_draws = 64u32;

        let draw_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("draw_uniform_buffer"),
            size: draw_stride * max_draws as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(uniform_size),
                },
                count: None,
            }],
        });

        let draw_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("draw_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &draw_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(uniform_size),
                }),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("carousel_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::CAROUSEL_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("carousel_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            // Poles are single panels seen from both sides.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipeline,
            draw_buffer,
            draw_bind_group,
            draw_stride,
            max_draws,
            meshes: BTreeMap::new(),
            depth_texture,
            surface_format,
        }
    }

    /// Upload (or replace) the GPU buffers for `id`.
    pub fn upload_mesh(&mut self, device: &wgpu::Device, id: MeshId, mesh: &Mesh) {
        let label = id.to_string();
        let vertices = interleave(mesh);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertex_buffer")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_index_buffer")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        tracing::debug!(
            mesh = %id,
            vertices = vertices.len(),
            indices = mesh.indices.len(),
            "uploaded mesh"
        );
        self.meshes.insert(
            id,
            GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: mesh.indices.len() as u32,
            },
        );
    }

    pub fn has_mesh(&self, id: MeshId) -> bool {
        self.meshes.contains_key(&id)
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame: clear, then every view's draw list in order.
    /// Returns the number of draw calls issued.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        frames: &[ViewFrame],
    ) -> u32 {
        // One uniform slot per (view, item), in draw order.
        let mut slots: Vec<(MeshId, DrawUniforms)> = Vec::new();
        for frame in frames {
            let projection = frame.eye.projection.to_cols_array_2d();
            for item in &frame.draws {
                slots.push((
                    item.mesh,
                    DrawUniforms {
                        projection,
                        model_view: item.model_view.to_cols_array_2d(),
                        color: mesh_color(item.mesh),
                    },
                ));
            }
        }
        if slots.len() > self.max_draws as usize {
            tracing::warn!(
                requested = slots.len(),
                max = self.max_draws,
                "too many draws; truncating frame"
            );
            slots.truncate(self.max_draws as usize);
        }

        if !slots.is_empty() {
            let mut bytes = vec![0u8; slots.len() * self.draw_stride as usize];
            for (i, (_, uniforms)) in slots.iter().enumerate() {
                let start = i * self.draw_stride as usize;
                let src = bytemuck::bytes_of(uniforms);
                bytes[start..start + src.len()].copy_from_slice(src);
            }
            queue.write_buffer(&self.draw_buffer, 0, &bytes);
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        let mut draw_calls = 0;
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.2,
                            g: 0.2,
                            b: 0.2,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            pass.set_pipeline(&self.pipeline);

            let mut slot = 0usize;
            for frame in frames {
                let vp = frame.eye.viewport;
                if vp.width == 0 || vp.height == 0 {
                    slot += frame.draws.len();
                    continue;
                }
                pass.set_viewport(
                    vp.x as f32,
                    vp.y as f32,
                    vp.width as f32,
                    vp.height as f32,
                    0.0,
                    1.0,
                );
                pass.set_scissor_rect(vp.x, vp.y, vp.width, vp.height);

                for _ in frame.draws.iter() {
                    let Some((mesh_id, _)) = slots.get(slot) else {
                        break;
                    };
                    let offset = (slot as u64 * self.draw_stride) as u32;
                    slot += 1;
                    let Some(mesh) = self.meshes.get(mesh_id) else {
                        tracing::trace!(mesh = %mesh_id, "no GPU mesh; skipping draw");
                        continue;
                    };
                    pass.set_bind_group(0, &self.draw_bind_group, &[offset]);
                    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                    draw_calls += 1;
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        draw_calls
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

/// Binds a renderer to a device and a target texture so it can be driven
/// through the [`Renderer`] trait.
pub struct GpuTarget<'a> {
    pub renderer: &'a WgpuRenderer,
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub view: &'a wgpu::TextureView,
}

impl Renderer for GpuTarget<'_> {
    /// Draw calls issued.
    type Output = u32;

    fn render(&mut self, frames: &[ViewFrame]) -> u32 {
        self.renderer
            .render(self.device, self.queue, self.view, frames)
    }
}
