use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use super::batch::{InstanceRecord, SpriteBatches};
use super::camera::Camera2d;
use super::error::{InitError, RenderError};
use super::sprite::Sprite;
use crate::device::{BufferAllocator, GraphicsContext, TextureEntry, TextureHandle, TexturePool};
use crate::math::Mat4;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// Tunables for [`SpriteBatchRenderer::new`].
#[derive(Debug, Clone)]
pub struct SpriteRendererOptions {
    /// Capacity of the shared instance buffer, in sprites per frame.
    pub max_sprite_count: u32,
    /// Color the frame clears to before any sprite draws.
    pub clear_color: wgpu::Color,
}

impl Default for SpriteRendererOptions {
    fn default() -> Self {
        Self {
            max_sprite_count: 10_000,
            clear_color: wgpu::Color {
                r: 0.13,
                g: 0.13,
                b: 0.13,
                a: 1.0,
            },
        }
    }
}

/// Texture dimensions uniform the vertex stage uses to normalize frame
/// rectangles into UV space.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TextureDimsUniform {
    size: [f32; 2],
    /// Padding to satisfy 16-byte uniform sizing.
    _pad: [f32; 2],
}

/// Batched sprite renderer.
///
/// One pipeline, one fixed-capacity instance storage buffer, one draw call
/// per distinct texture per frame. All pipeline state, layouts, the depth
/// target, and the instance buffer are created eagerly at construction;
/// per-texture bind groups are built on first use and cached per pool slot.
pub struct SpriteBatchRenderer {
    pipeline: wgpu::RenderPipeline,
    sampler: wgpu::Sampler,

    camera_bind_group: wgpu::BindGroup,
    texture_bgl: wgpu::BindGroupLayout,
    instance_bind_group: wgpu::BindGroup,

    instance_buffer: wgpu::Buffer,
    capacity: usize,

    depth_view: wgpu::TextureView,

    // Keyed by pool slot index; the stored handle carries the generation, so
    // a replaced texture misses the cache and rebuilds its entry.
    texture_bind_groups: HashMap<u32, (TextureHandle, wgpu::BindGroup)>,

    clear_color: wgpu::Color,
}

impl SpriteBatchRenderer {
    pub fn new(
        gfx: &GraphicsContext<'_>,
        camera: &Camera2d,
        options: SpriteRendererOptions,
    ) -> Result<Self, InitError> {
        if options.max_sprite_count == 0 {
            return Err(InitError::ZeroSpriteCapacity);
        }
        let capacity = options.max_sprite_count as usize;
        let required = capacity as u64 * std::mem::size_of::<InstanceRecord>() as u64;
        let limit = u64::from(gfx.device().limits().max_storage_buffer_binding_size);
        if required > limit {
            return Err(InitError::InstanceBufferTooLarge { required, limit });
        }

        let device = gfx.device();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sigil sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sigil camera bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(mat4_binding_size()),
                },
                count: None,
            }],
        });

        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sigil texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(dims_binding_size()),
                    },
                    count: None,
                },
            ],
        });

        let instance_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sigil instance bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sigil sprite pipeline layout"),
            bind_group_layouts: &[&camera_bgl, &texture_bgl, &instance_bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sigil sprite pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                // Geometry is synthesized from the instance records; no
                // vertex buffers are bound.
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gfx.surface_format(),
                    blend: Some(premultiplied_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                // Depth clears to 0.0; greater z wins the fragment.
                depth_compare: wgpu::CompareFunction::Greater,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sigil sprite sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            // Nearest keeps pixel art crisp under scaling.
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let (width, height) = gfx.size();
        let depth_view = create_depth_view(device, width, height);

        let allocator = BufferAllocator::new(device, gfx.queue());
        let instance_buffer = allocator.storage_buffer::<InstanceRecord>(capacity);

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sigil camera bind group"),
            layout: &camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera.buffer().as_entire_binding(),
            }],
        });

        let instance_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sigil instance bind group"),
            layout: &instance_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: instance_buffer.as_entire_binding(),
            }],
        });

        log::debug!("sprite renderer ready: {capacity} instance slots, {width}x{height} depth target");

        Ok(Self {
            pipeline,
            sampler,
            camera_bind_group,
            texture_bgl,
            instance_bind_group,
            instance_buffer,
            capacity,
            depth_view,
            texture_bind_groups: HashMap::new(),
            clear_color: options.clear_color,
        })
    }

    /// Draws `sprites` over a cleared frame.
    ///
    /// Sprites are grouped by texture; each batch is validated against the
    /// pool and the remaining capacity, written to the instance buffer at
    /// its cumulative offset, and drawn with one instanced call inside a
    /// single render pass and submit. An empty list still clears and
    /// presents. On error nothing is drawn and the surface is left alone.
    pub fn render(
        &mut self,
        gfx: &GraphicsContext<'_>,
        textures: &TexturePool,
        sprites: &[Sprite],
    ) -> Result<(), RenderError> {
        let batches = SpriteBatches::group(sprites);

        // Validation, instance writes, and bind group cache fills all happen
        // before the frame is acquired, so a failed frame leaves no pass.
        let mut draws: Vec<(TextureHandle, u32, u32)> = Vec::with_capacity(batches.len());
        let mut used = 0usize;
        for (handle, records) in batches.iter() {
            let Some(entry) = textures.get(handle) else {
                return Err(RenderError::UnknownTexture(handle));
            };
            if used + records.len() > self.capacity {
                return Err(RenderError::CapacityExceeded {
                    texture: handle,
                    batch_len: records.len(),
                    remaining: self.capacity - used,
                    capacity: self.capacity,
                });
            }

            self.ensure_texture_bind_group(gfx, handle, entry);

            let offset = used as u64 * std::mem::size_of::<InstanceRecord>() as u64;
            gfx.queue()
                .write_buffer(&self.instance_buffer, offset, bytemuck::cast_slice(records));

            draws.push((handle, used as u32, records.len() as u32));
            used += records.len();
        }

        let mut frame = gfx.begin_frame()?;

        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sigil sprite pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0),
                        store: wgpu::StoreOp::Store,
                    }),
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.camera_bind_group, &[]);
            rpass.set_bind_group(2, &self.instance_bind_group, &[]);

            for (handle, start, len) in draws {
                let Some((_, bind_group)) = self.texture_bind_groups.get(&handle.index()) else {
                    continue;
                };
                rpass.set_bind_group(1, bind_group, &[]);
                // Six vertices expand to the quad; the instance range points
                // the shader at this batch's slice of the shared buffer.
                rpass.draw(0..6, start..start + len);
            }
        }

        gfx.submit(frame);
        Ok(())
    }

    /// Recreates the depth target for a new drawable size. Call alongside
    /// surface reconfiguration; nothing resizes automatically.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("ignoring zero-sized depth target resize");
            return;
        }
        self.depth_view = create_depth_view(device, width, height);
    }

    /// Number of sprites one frame can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn ensure_texture_bind_group(
        &mut self,
        gfx: &GraphicsContext<'_>,
        handle: TextureHandle,
        entry: &TextureEntry,
    ) {
        if let Some((cached, _)) = self.texture_bind_groups.get(&handle.index()) {
            if *cached == handle {
                return;
            }
            log::debug!("rebuilding bind group for regenerated texture {handle:?}");
        }

        let dims_buffer =
            BufferAllocator::new(gfx.device(), gfx.queue()).uniform_buffer::<TextureDimsUniform>();
        let dims = TextureDimsUniform {
            size: [entry.width as f32, entry.height as f32],
            _pad: [0.0; 2],
        };
        gfx.queue()
            .write_buffer(&dims_buffer, 0, bytemuck::bytes_of(&dims));

        let bind_group = gfx.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sigil texture bind group"),
            layout: &self.texture_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&entry.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: dims_buffer.as_entire_binding(),
                },
            ],
        });

        self.texture_bind_groups
            .insert(handle.index(), (handle, bind_group));
    }
}

fn mat4_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<Mat4>() as u64)
        .expect("Mat4 has non-zero size by construction")
}

fn dims_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<TextureDimsUniform>() as u64)
        .expect("TextureDimsUniform has non-zero size by construction")
}

/// Premultiplied alpha over-blend for both color and alpha channels.
fn premultiplied_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("sigil depth texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
