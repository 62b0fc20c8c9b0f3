use crate::device::{BufferAllocator, GraphicsContext, ImageData, TextureInfo, TexturePool};
use crate::math::Vec2;
use crate::render::{
    Camera2d, CameraOptions, InitError, RenderError, SpriteBatchRenderer, SpriteRendererOptions,
};
use crate::time::FrameClock;

use super::app::App;
use super::ctx::{CameraCtx, FrameCtx};

/// Construction options for [`Engine2d`].
#[derive(Debug, Clone)]
pub struct Engine2dOptions {
    pub clear_color: wgpu::Color,
    pub max_sprite_count: u32,
    pub camera_scale: Option<Vec2>,
    pub camera_position: Option<Vec2>,
}

impl Default for Engine2dOptions {
    fn default() -> Self {
        let renderer = SpriteRendererOptions::default();
        Self {
            clear_color: renderer.clear_color,
            max_sprite_count: renderer.max_sprite_count,
            camera_scale: None,
            camera_position: None,
        }
    }
}

/// Frame-driven 2D runtime owning the clock, camera, texture pool, and
/// sprite renderer.
///
/// The app is injected at construction and called back once per
/// [`frame`](Engine2d::frame); the embedder owns the loop and the
/// timestamps that drive it.
pub struct Engine2d<'w, A: App> {
    gfx: GraphicsContext<'w>,
    app: A,
    clock: FrameClock,
    camera: Camera2d,
    renderer: SpriteBatchRenderer,
    textures: TexturePool,
    started: bool,
}

impl<'w, A: App> Engine2d<'w, A> {
    pub fn new(
        gfx: GraphicsContext<'w>,
        app: A,
        options: Engine2dOptions,
    ) -> Result<Self, InitError> {
        let (width, height) = gfx.size();

        let camera = {
            let allocator = BufferAllocator::new(gfx.device(), gfx.queue());
            Camera2d::new(
                &allocator,
                gfx.queue(),
                width,
                height,
                CameraOptions {
                    scale: options.camera_scale,
                    position: options.camera_position,
                },
            )
        };

        let renderer = SpriteBatchRenderer::new(
            &gfx,
            &camera,
            SpriteRendererOptions {
                max_sprite_count: options.max_sprite_count,
                clear_color: options.clear_color,
            },
        )?;

        Ok(Self {
            gfx,
            app,
            clock: FrameClock::new(),
            camera,
            renderer,
            textures: TexturePool::new(),
            started: false,
        })
    }

    /// Uploads `image` and registers it in the texture pool.
    pub fn load_texture(&mut self, image: &ImageData<'_>) -> TextureInfo {
        let allocator = BufferAllocator::new(self.gfx.device(), self.gfx.queue());
        let texture = allocator.texture(image);
        self.textures.insert(texture)
    }

    /// Runs one frame at timestamp `now_ms` (milliseconds, monotonic):
    /// advances the clock, calls `App::update` then `App::render`, and
    /// draws the returned sprites.
    ///
    /// The first call only re-baselines the clock, so the gap between
    /// construction and the loop's first iteration never becomes a frame
    /// delta.
    pub fn frame(&mut self, now_ms: f64) -> Result<(), RenderError> {
        if self.started {
            self.clock.update(now_ms);
        } else {
            self.clock.reset(now_ms);
            self.started = true;
        }

        let sprites = {
            let mut ctx = FrameCtx {
                time: self.clock.sample(),
                camera: CameraCtx {
                    camera: &mut self.camera,
                    queue: self.gfx.queue(),
                },
            };
            self.app.update(&mut ctx);
            self.app.render(&mut ctx)
        };

        self.renderer.render(&self.gfx, &self.textures, &sprites)
    }

    /// Adopts a new drawable size: surface, depth target, and camera
    /// bounds together.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gfx.resize(width, height);
        self.renderer.resize(self.gfx.device(), width, height);
        self.camera.resize(self.gfx.queue(), width, height);
    }

    pub fn graphics(&self) -> &GraphicsContext<'w> {
        &self.gfx
    }

    pub fn textures(&self) -> &TexturePool {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TexturePool {
        &mut self.textures
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }
}
