use wgpu::SurfaceError;

/// Owns the wgpu handles the embedder initialized and the surface
/// configuration that goes with them.
///
/// This type is the low-level rendering context:
/// - stores Device/Queue/Surface handed over at construction
/// - reconfigures the surface on explicit resize
/// - acquires frames and provides an encoder + view for rendering
///
/// Surface lifetime is tied to the window; architecture must ensure the
/// window outlives the `GraphicsContext` instance.
pub struct GraphicsContext<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

/// Represents a single acquired frame.
///
/// This object is short-lived and must be finalized promptly. Holding the
/// surface texture prevents acquisition of subsequent frames.
pub struct SurfaceFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl<'w> GraphicsContext<'w> {
    /// Wraps pre-initialized handles.
    ///
    /// `config` must already have been applied to `surface` with `device`;
    /// no configuration happens here.
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        surface: wgpu::Surface<'w>,
        config: wgpu::SurfaceConfiguration,
    ) -> Self {
        Self {
            surface,
            device,
            queue,
            config,
        }
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface after a resize.
    ///
    /// wgpu does not support configuring a surface with a 0x0 size; such
    /// resizes are ignored and the previous configuration stays active.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("ignoring zero-sized surface resize");
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquires the next surface texture and creates an encoder.
    ///
    /// The returned frame owns the surface texture; pass it back to
    /// [`submit`](GraphicsContext::submit) to present it.
    pub fn begin_frame(&self) -> Result<SurfaceFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sigil frame encoder"),
            });

        Ok(SurfaceFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands for the given frame and presents it.
    pub fn submit(&self, frame: SurfaceFrame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        frame.surface_texture.present();
    }
}
