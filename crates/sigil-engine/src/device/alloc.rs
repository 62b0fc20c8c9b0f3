use bytemuck::Pod;
use wgpu::util::DeviceExt;

use super::textures::ImageData;

/// Buffer and texture factory over borrowed device handles.
///
/// Construction is free and the allocator carries no state, so one can be
/// made on the spot wherever the device and queue are visible. Sizes are
/// derived from the element type, keeping byte arithmetic in one place.
pub struct BufferAllocator<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
}

impl<'a> BufferAllocator<'a> {
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> Self {
        Self { device, queue }
    }

    /// Vertex buffer with `data` uploaded at creation.
    pub fn vertex_buffer<T: Pod>(&self, data: &[T]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("sigil vertex buffer"),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::VERTEX,
            })
    }

    /// Index buffer with `data` uploaded at creation.
    pub fn index_buffer<T: Pod>(&self, data: &[T]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("sigil index buffer"),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::INDEX,
            })
    }

    /// Uniform buffer sized for one `T`, uninitialized.
    ///
    /// Uniform and storage contents are rewritten from the queue as they
    /// change, so unlike the vertex/index factories nothing is uploaded
    /// here.
    pub fn uniform_buffer<T: Pod>(&self) -> wgpu::Buffer {
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sigil uniform buffer"),
            size: std::mem::size_of::<T>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Storage buffer sized for `len` records of `T`, uninitialized.
    pub fn storage_buffer<T: Pod>(&self, len: usize) -> wgpu::Buffer {
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sigil storage buffer"),
            size: len as u64 * std::mem::size_of::<T>() as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// 2D RGBA8 texture sized to `image`, with the pixels copied in through
    /// the queue.
    pub fn texture(&self, image: &ImageData<'_>) -> wgpu::Texture {
        debug_assert_eq!(
            image.rgba.len(),
            image.width as usize * image.height as usize * 4,
            "pixel data does not match the declared dimensions"
        );

        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("sigil sprite texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        texture
    }
}
