use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use super::{DrawContext, Fill, RenderCtx, RenderTarget};

/// Owner of the shared quad pipeline and its GPU resources.
///
/// Resources are created lazily and rebuilt when the surface format changes.
/// Per-draw data lives in one uniform buffer addressed with dynamic offsets,
/// one aligned slot per draw.
#[derive(Default)]
pub struct QuadRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    object_ubo: Option<wgpu::Buffer>,
    slot_stride: u64,
    slot_capacity: usize,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,
}

impl QuadRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a load-preserving render pass able to hold `max_draws` draws.
    ///
    /// Returns `None` when there is nothing to draw or resources are missing.
    pub fn begin_pass<'p>(
        &'p mut self,
        ctx: &RenderCtx<'p>,
        target: &'p mut RenderTarget<'_>,
        max_draws: usize,
    ) -> Option<QuadPass<'p>> {
        if max_draws == 0 {
            return None;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_uniform_capacity(ctx, max_draws);

        let pipeline = self.pipeline.as_ref()?;
        let bind_group = self.bind_group.as_ref()?;
        let object_ubo = self.object_ubo.as_ref()?;
        let quad_vbo = self.quad_vbo.as_ref()?;
        let quad_ibo = self.quad_ibo.as_ref()?;

        let rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tableau quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        Some(QuadPass {
            rpass,
            queue: ctx.queue,
            pipeline,
            bind_group,
            object_ubo,
            quad_vbo,
            quad_ibo,
            stride: self.slot_stride,
            capacity: self.slot_capacity.min(max_draws),
            staged: Vec::with_capacity(max_draws * self.slot_stride as usize),
            pending: ObjectUniform::zeroed(),
            drawn: 0,
        })
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tableau quad shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/quad.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("tableau quad bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(OBJECT_UNIFORM_SIZE),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("tableau quad pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tableau quad pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("quad pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.object_ubo = None;
        self.slot_capacity = 0;
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tableau quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tableau quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_uniform_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.slot_capacity && self.object_ubo.is_some() && self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let alignment = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = slot_stride(alignment);
        let new_cap = required.next_power_of_two().max(64);

        let object_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tableau quad object ubo"),
            size: stride * new_cap as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tableau quad bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &object_ubo,
                    offset: 0,
                    size: wgpu::BufferSize::new(OBJECT_UNIFORM_SIZE),
                }),
            }],
        });

        self.object_ubo = Some(object_ubo);
        self.bind_group = Some(bind_group);
        self.slot_stride = stride;
        self.slot_capacity = new_cap;
    }
}

/// An open quad pass. Implements [`DrawContext`].
///
/// Per-draw uniforms are staged on the CPU and written to the queue when the
/// pass is dropped, before the encoder is submitted.
pub struct QuadPass<'p> {
    rpass: wgpu::RenderPass<'p>,
    queue: &'p wgpu::Queue,
    pipeline: &'p wgpu::RenderPipeline,
    bind_group: &'p wgpu::BindGroup,
    object_ubo: &'p wgpu::Buffer,
    quad_vbo: &'p wgpu::Buffer,
    quad_ibo: &'p wgpu::Buffer,

    stride: u64,
    capacity: usize,
    staged: Vec<u8>,
    pending: ObjectUniform,
    drawn: usize,
}

impl DrawContext for QuadPass<'_> {
    fn use_program(&mut self) {
        self.rpass.set_pipeline(self.pipeline);
    }

    fn bind_quad(&mut self) {
        self.rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        self.rpass
            .set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
    }

    fn upload_transform(&mut self, model: &Mat4) {
        self.pending.model = model.to_cols_array_2d();
    }

    fn set_fill(&mut self, fill: Fill) {
        let (color, params) = fill_uniform(fill);
        self.pending.color = color;
        self.pending.params = params;
    }

    fn draw_quad(&mut self) {
        if self.drawn >= self.capacity {
            log::warn!("quad pass full ({} draws); dropping draw", self.capacity);
            return;
        }

        let offset = self.drawn as u64 * self.stride;
        self.staged.resize(offset as usize, 0);
        self.staged.extend_from_slice(bytemuck::bytes_of(&self.pending));

        self.rpass.set_bind_group(0, self.bind_group, &[offset as u32]);
        self.rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
        self.drawn += 1;
    }
}

impl Drop for QuadPass<'_> {
    fn drop(&mut self) {
        if !self.staged.is_empty() {
            self.queue.write_buffer(self.object_ubo, 0, &self.staged);
        }
    }
}

fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

fn slot_stride(alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    OBJECT_UNIFORM_SIZE.div_ceil(alignment) * alignment
}

const FILL_KIND_DISC: f32 = 0.0;
const FILL_KIND_SPRITE: f32 = 1.0;

fn fill_uniform(fill: Fill) -> ([f32; 4], [f32; 4]) {
    match fill {
        Fill::GradientDisc { color } => (color.to_array(), [FILL_KIND_DISC, 0.0, 0.0, 0.0]),
        Fill::SpriteFrame { tint, cell, phase } => (
            tint.to_array(),
            [FILL_KIND_SPRITE, phase, cell[0] as f32, cell[1] as f32],
        ),
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Per-draw uniform (96 bytes):
///
///  offset  0  model   mat4x4<f32>
///  offset 64  color   [f32; 4]  (premultiplied)
///  offset 80  params  [f32; 4]  (.x = fill kind, .y = phase, .zw = sheet cell)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ObjectUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

const OBJECT_UNIFORM_SIZE: u64 = std::mem::size_of::<ObjectUniform>() as u64;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    pos: [f32; 2],   // -0.5..0.5
    local: [f32; 2], // -1..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [-0.5, -0.5], local: [-1.0, -1.0] },
    QuadVertex { pos: [0.5, -0.5], local: [1.0, -1.0] },
    QuadVertex { pos: [0.5, 0.5], local: [1.0, 1.0] },
    QuadVertex { pos: [-0.5, 0.5], local: [-1.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];
