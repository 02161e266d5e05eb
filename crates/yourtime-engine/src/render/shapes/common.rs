//! Shared GPU types and the instanced-quad pipeline used by the solid shape renderers.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) fn from_ctx(ctx: &RenderCtx<'_>) -> Self {
        Self {
            viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }

    /// Minimum binding size for the uniform; the struct is 16 bytes.
    pub(super) fn min_binding_size() -> Option<std::num::NonZeroU64> {
        std::num::NonZeroU64::new(std::mem::size_of::<Self>() as u64)
    }
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

pub(super) fn create_quad_buffers(
    device: &wgpu::Device,
    label: &str,
) -> (wgpu::Buffer, wgpu::Buffer) {
    let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} quad vbo")),
        contents: bytemuck::cast_slice(&QUAD_VERTICES),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} quad ibo")),
        contents: bytemuck::cast_slice(&QUAD_INDICES),
        usage: wgpu::BufferUsages::INDEX,
    });
    (vbo, ibo)
}

/// Grows `buffer` to hold at least `required` instances of `stride` bytes.
///
/// Capacity doubles (min 64) so steady-state frames never reallocate.
pub(super) fn ensure_instance_buffer(
    device: &wgpu::Device,
    label: &str,
    buffer: &mut Option<wgpu::Buffer>,
    capacity: &mut usize,
    required: usize,
    stride: usize,
) {
    if required <= *capacity && buffer.is_some() {
        return;
    }

    let new_cap = required.next_power_of_two().max(64);
    *buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("{label} instance vbo")),
        size: (new_cap * stride) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    }));
    *capacity = new_cap;
}

// ── instanced quad pipeline ───────────────────────────────────────────────

/// Pipeline + buffers for shapes drawn as one instanced unit quad each.
///
/// Owners supply the WGSL source and their instance layout; the shader must
/// expose `vs_main`/`fs_main` and read the viewport uniform at group 0,
/// binding 0. A textured pipeline additionally binds a filterable 2D texture
/// and sampler at group 1, bindings 0 and 1; the owner creates that group from
/// [`QuadPipeline::texture_layout`].
pub(super) struct QuadPipeline {
    label: &'static str,
    shader_src: &'static str,
    textured: bool,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    viewport_group: Option<(wgpu::Buffer, wgpu::BindGroup)>,
    texture_layout: Option<wgpu::BindGroupLayout>,

    quad: Option<(wgpu::Buffer, wgpu::Buffer)>,
    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl QuadPipeline {
    pub(super) fn new(label: &'static str, shader_src: &'static str) -> Self {
        Self {
            label,
            shader_src,
            textured: false,
            pipeline_format: None,
            pipeline: None,
            viewport_group: None,
            texture_layout: None,
            quad: None,
            instance_vbo: None,
            instance_capacity: 0,
        }
    }

    pub(super) fn textured(label: &'static str, shader_src: &'static str) -> Self {
        Self { textured: true, ..Self::new(label, shader_src) }
    }

    pub(super) fn label(&self) -> &'static str {
        self.label
    }

    /// Layout of the group-1 texture bind group; `None` until prepared or
    /// for untextured pipelines.
    pub(super) fn texture_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.texture_layout.as_ref()
    }

    /// Builds GPU objects for the current surface format.
    ///
    /// Returns `true` when they were (re)built; texture bind groups made from
    /// an earlier layout must then be recreated.
    pub(super) fn prepare(
        &mut self,
        ctx: &RenderCtx<'_>,
        instance_layout: wgpu::VertexBufferLayout<'static>,
    ) -> bool {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return false;
        }
        self.build(ctx, instance_layout);
        true
    }

    /// Uploads `instances` and draws them in one instanced call.
    pub(super) fn draw<I: Pod>(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        instance_layout: wgpu::VertexBufferLayout<'static>,
        instances: &[I],
        texture: Option<&wgpu::BindGroup>,
    ) {
        if instances.is_empty() {
            return;
        }
        if self.textured && texture.is_none() {
            log::warn!("{}: textured draw without a texture group, skipping", self.label);
            return;
        }

        self.prepare(ctx, instance_layout);
        if self.quad.is_none() {
            self.quad = Some(create_quad_buffers(ctx.device, self.label));
        }
        ensure_instance_buffer(
            ctx.device,
            self.label,
            &mut self.instance_vbo,
            &mut self.instance_capacity,
            instances.len(),
            std::mem::size_of::<I>(),
        );

        let (Some(pipeline), Some((ubo, viewport_group)), Some((quad_vbo, quad_ibo)), Some(instance_vbo)) = (
            self.pipeline.as_ref(),
            self.viewport_group.as_ref(),
            self.quad.as_ref(),
            self.instance_vbo.as_ref(),
        ) else {
            return;
        };

        ctx.queue
            .write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(instances));

        let mut rpass = target.begin_load_pass(self.label);
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, viewport_group, &[]);
        if let Some(texture) = texture {
            rpass.set_bind_group(1, texture, &[]);
        }
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..instances.len() as u32);
    }

    fn build(&mut self, ctx: &RenderCtx<'_>, instance_layout: wgpu::VertexBufferLayout<'static>) {
        let device = ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.label),
            source: wgpu::ShaderSource::Wgsl(self.shader_src.into()),
        });

        let viewport_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(self.label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: ViewportUniform::min_binding_size(),
                },
                count: None,
            }],
        });

        let texture_layout = self.textured.then(|| {
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(self.label),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            })
        });

        let mut group_layouts = vec![&viewport_layout];
        group_layouts.extend(texture_layout.as_ref());

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(self.label),
            bind_group_layouts: &group_layouts,
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), instance_layout],
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
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(self.label),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let viewport_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(self.label),
            layout: &viewport_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        log::debug!("{}: pipeline built for {:?}", self.label, ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.viewport_group = Some((ubo, viewport_group));
        self.texture_layout = texture_layout;
    }
}
