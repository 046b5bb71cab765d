use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Mat4;
use crate::render::shader::{
    CameraUniform, ModelUniform, ShaderProgram, FRAGMENT_ENTRY, POSITION_LOCATION,
    TEX_COORD_LOCATION, VERTEX_ENTRY,
};
use crate::render::texture::{Texture, TextureImage};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawList, TextureId};

// ── quad geometry ─────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct Vertex2 {
    v: [f32; 2],
}

const fn v2(x: f32, y: f32) -> Vertex2 {
    Vertex2 { v: [x, y] }
}

/// Unit quad centered on the origin, two triangles, counter-clockwise.
pub const QUAD_VERTEX_COUNT: u32 = 6;

const QUAD_POSITIONS: [Vertex2; 6] = [
    v2(-0.5, -0.5), v2(0.5, -0.5), v2(0.5, 0.5),
    v2(-0.5, -0.5), v2(0.5, 0.5), v2(-0.5, 0.5),
];

// Image rows run top to bottom, so v = 0 is the top edge of the quad.
const QUAD_TEX_COORDS: [Vertex2; 6] = [
    v2(0.0, 1.0), v2(1.0, 1.0), v2(1.0, 0.0),
    v2(0.0, 1.0), v2(1.0, 0.0), v2(0.0, 0.0),
];

impl Vertex2 {
    const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: POSITION_LOCATION,
    }];

    const TEX_COORD_ATTRS: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: TEX_COORD_LOCATION,
    }];

    fn layout(attributes: &'static [wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex2>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

// ── blend ─────────────────────────────────────────────────────────────────

/// `SrcAlpha, OneMinusSrcAlpha` on both color and alpha.
fn straight_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

// ── draw planning ─────────────────────────────────────────────────────────

/// One resolved draw: which texture to bind and which model slot to read.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SpriteDraw {
    pub texture: TextureId,
    pub slot: u32,
}

/// Resolves a draw list into per-draw texture bindings and model matrices,
/// in paint order.
///
/// Commands referencing a texture the renderer does not know are dropped.
pub fn plan_draws(list: &DrawList, texture_count: usize) -> Vec<(SpriteDraw, Mat4)> {
    let mut out = Vec::with_capacity(list.len());
    for cmd in list.sprites() {
        if cmd.texture.0 as usize >= texture_count {
            continue;
        }
        let slot = out.len() as u32;
        out.push((SpriteDraw { texture: cmd.texture, slot }, cmd.model));
    }
    out
}

fn align_up(value: u64, alignment: u64) -> u64 {
    value.div_ceil(alignment) * alignment
}

// ── renderer ──────────────────────────────────────────────────────────────

struct TextureSlot {
    pending: Option<TextureImage>,
    texture: Option<Texture>,
    bind_group: Option<wgpu::BindGroup>,
}

/// Textured-quad renderer.
///
/// Draws every `DrawCmd::Sprite` in paint order: bind the sprite's texture,
/// upload its model matrix, draw six vertices. Textures are registered as
/// decoded images up front and uploaded on the first frame.
pub struct SpriteRenderer {
    program: ShaderProgram,
    slots: Vec<TextureSlot>,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    camera_bgl: Option<wgpu::BindGroupLayout>,
    texture_bgl: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,

    camera_ubo: Option<wgpu::Buffer>,
    model_ubo: Option<wgpu::Buffer>,
    model_stride: u64,
    model_capacity: usize,
    camera_bind_group: Option<wgpu::BindGroup>,

    position_vbo: Option<wgpu::Buffer>,
    tex_coord_vbo: Option<wgpu::Buffer>,

    warned_unknown_texture: bool,
}

impl SpriteRenderer {
    pub fn new(program: ShaderProgram) -> Self {
        Self {
            program,
            slots: Vec::new(),
            pipeline_format: None,
            pipeline: None,
            camera_bgl: None,
            texture_bgl: None,
            sampler: None,
            camera_ubo: None,
            model_ubo: None,
            model_stride: 0,
            model_capacity: 0,
            camera_bind_group: None,
            position_vbo: None,
            tex_coord_vbo: None,
            warned_unknown_texture: false,
        }
    }

    /// Registers a decoded image and returns its handle.
    pub fn register(&mut self, image: TextureImage) -> TextureId {
        let id = TextureId(self.slots.len() as u32);
        log::debug!("registered texture {} as {id:?}", image.label);
        self.slots.push(TextureSlot {
            pending: Some(image),
            texture: None,
            bind_group: None,
        });
        id
    }

    pub fn texture_count(&self) -> usize {
        self.slots.len()
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    /// Renders the sprites in `draw_list` into `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        self.ensure_layouts(ctx);
        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_textures(ctx);

        let draws = plan_draws(draw_list, self.slots.len());
        if draws.len() != draw_list.len() && !self.warned_unknown_texture {
            log::warn!("SpriteRenderer: draw list references unregistered textures; skipped");
            self.warned_unknown_texture = true;
        }
        if draws.is_empty() {
            return;
        }

        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        self.ensure_uniforms(ctx, draws.len());
        self.write_uniforms(ctx, &draws);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(camera_bind_group) = self.camera_bind_group.as_ref() else { return };
        let Some(position_vbo) = self.position_vbo.as_ref() else { return };
        let Some(tex_coord_vbo) = self.tex_coord_vbo.as_ref() else { return };

        let mut rpass = target.load_pass("tandem sprite pass");

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, position_vbo.slice(..));
        rpass.set_vertex_buffer(1, tex_coord_vbo.slice(..));

        for (draw, _) in &draws {
            let Some(texture_bind_group) = self.slots[draw.texture.0 as usize].bind_group.as_ref()
            else {
                continue;
            };
            let offset = (draw.slot as u64 * self.model_stride) as u32;

            rpass.set_bind_group(0, camera_bind_group, &[offset]);
            rpass.set_bind_group(1, texture_bind_group, &[]);
            rpass.draw(0..QUAD_VERTEX_COUNT, 0..1);
        }
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_layouts(&mut self, ctx: &RenderCtx<'_>) {
        if self.camera_bgl.is_some() && self.texture_bgl.is_some() {
            return;
        }

        let camera_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tandem sprite camera bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(std::mem::size_of::<CameraUniform>() as u64),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: NonZeroU64::new(std::mem::size_of::<ModelUniform>() as u64),
                    },
                    count: None,
                },
            ],
        });

        let texture_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tandem sprite texture bgl"),
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
        });

        self.camera_bgl = Some(camera_bgl);
        self.texture_bgl = Some(texture_bgl);

        // Anything bound against old layouts is stale.
        self.pipeline = None;
        self.camera_bind_group = None;
        for slot in &mut self.slots {
            slot.bind_group = None;
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let Some(camera_bgl) = self.camera_bgl.as_ref() else { return };
        let Some(texture_bgl) = self.texture_bgl.as_ref() else { return };

        let (vertex_module, fragment_module) = self.program.create_modules(ctx.device);

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tandem sprite pipeline layout"),
            bind_group_layouts: &[camera_bgl, texture_bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tandem sprite pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[
                    Vertex2::layout(&Vertex2::POSITION_ATTRS),
                    Vertex2::layout(&Vertex2::TEX_COORD_ATTRS),
                ],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(straight_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Accumulated transforms may mirror the quad; never cull.
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

        log::debug!("sprite pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.position_vbo.is_some() && self.tex_coord_vbo.is_some() {
            return;
        }

        self.position_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tandem sprite position vbo"),
            contents: bytemuck::cast_slice(&QUAD_POSITIONS),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.tex_coord_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tandem sprite tex coord vbo"),
            contents: bytemuck::cast_slice(&QUAD_TEX_COORDS),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }

    fn ensure_textures(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_none() {
            self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("tandem sprite sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Nearest,
                min_filter: wgpu::FilterMode::Nearest,
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            }));
        }

        let Some(texture_bgl) = self.texture_bgl.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        for slot in &mut self.slots {
            if let Some(image) = slot.pending.take() {
                slot.texture = Some(Texture::upload(ctx.device, ctx.queue, &image));
                log::debug!("uploaded texture {} ({}x{})", image.label, image.width, image.height);
            }

            if slot.bind_group.is_some() {
                continue;
            }
            let Some(texture) = slot.texture.as_ref() else { continue };

            slot.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("tandem sprite texture bind group"),
                layout: texture_bgl,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            }));
        }
    }

    /// Grows the model uniform buffer to hold `required` slots and rebuilds
    /// the camera bind group when buffers change.
    fn ensure_uniforms(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if self.camera_bind_group.is_some()
            && self.model_ubo.is_some()
            && required <= self.model_capacity
        {
            return;
        }
        let Some(camera_bgl) = self.camera_bgl.as_ref() else { return };

        self.model_stride = align_up(
            std::mem::size_of::<ModelUniform>() as u64,
            ctx.uniform_offset_alignment(),
        );

        let capacity = required.next_power_of_two().max(4);

        let camera_ubo = match self.camera_ubo.take() {
            Some(ubo) => ubo,
            None => ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("tandem sprite camera ubo"),
                size: std::mem::size_of::<CameraUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
        };

        let model_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tandem sprite model ubo"),
            size: self.model_stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tandem sprite camera bind group"),
            layout: camera_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &model_ubo,
                        offset: 0,
                        size: NonZeroU64::new(std::mem::size_of::<ModelUniform>() as u64),
                    }),
                },
            ],
        });

        self.camera_ubo = Some(camera_ubo);
        self.model_ubo = Some(model_ubo);
        self.model_capacity = capacity;
        self.camera_bind_group = Some(camera_bind_group);
    }

    fn write_uniforms(&mut self, ctx: &RenderCtx<'_>, draws: &[(SpriteDraw, Mat4)]) {
        let (Some(camera_ubo), Some(model_ubo)) = (self.camera_ubo.as_ref(), self.model_ubo.as_ref())
        else {
            return;
        };

        ctx.queue
            .write_buffer(camera_ubo, 0, bytemuck::bytes_of(&self.program.camera_uniform()));

        for (draw, model) in draws {
            self.program.set_model(*model);
            ctx.queue.write_buffer(
                model_ubo,
                draw.slot as u64 * self.model_stride,
                bytemuck::bytes_of(&self.program.model_uniform()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec3;

    #[test]
    fn quad_spans_unit_square_centered_on_origin() {
        for p in QUAD_POSITIONS {
            assert!(p.v[0].abs() == 0.5 && p.v[1].abs() == 0.5);
        }
        assert_eq!(QUAD_POSITIONS.len() as u32, QUAD_VERTEX_COUNT);
        assert_eq!(QUAD_TEX_COORDS.len() as u32, QUAD_VERTEX_COUNT);
    }

    #[test]
    fn tex_coords_flip_vertically() {
        // Bottom of the quad samples the last image row, top samples the first.
        for (p, uv) in QUAD_POSITIONS.iter().zip(QUAD_TEX_COORDS.iter()) {
            assert_eq!(uv.v[0], p.v[0] + 0.5);
            assert_eq!(uv.v[1], 0.5 - p.v[1]);
        }
    }

    #[test]
    fn draws_follow_list_order_with_own_texture() {
        let mut list = DrawList::new();
        let a = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let b = Mat4::from_translation(Vec3::new(-1.0, 0.0, 0.0));
        list.push_sprite(TextureId(1), a);
        list.push_sprite(TextureId(0), b);

        let draws = plan_draws(&list, 2);
        assert_eq!(
            draws,
            vec![
                (SpriteDraw { texture: TextureId(1), slot: 0 }, a),
                (SpriteDraw { texture: TextureId(0), slot: 1 }, b),
            ]
        );
    }

    #[test]
    fn unknown_textures_are_skipped() {
        let mut list = DrawList::new();
        list.push_sprite(TextureId(5), Mat4::IDENTITY);
        list.push_sprite(TextureId(0), Mat4::IDENTITY);

        let draws = plan_draws(&list, 1);
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].0, SpriteDraw { texture: TextureId(0), slot: 0 });
    }

    #[test]
    fn model_stride_respects_alignment() {
        assert_eq!(align_up(64, 256), 256);
        assert_eq!(align_up(64, 64), 64);
        assert_eq!(align_up(65, 64), 128);
    }

    #[test]
    fn register_assigns_sequential_handles() {
        let mut r = SpriteRenderer::new(ShaderProgram::from_sources("", ""));
        let img = TextureImage::from_rgba8("px", 1, 1, vec![255; 4]).unwrap();
        assert_eq!(r.register(img.clone()), TextureId(0));
        assert_eq!(r.register(img), TextureId(1));
        assert_eq!(r.texture_count(), 2);
    }
}
