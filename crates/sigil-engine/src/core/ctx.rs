use crate::math::Vec2;
use crate::render::Camera2d;
use crate::time::FrameTime;

/// Camera operations exposed to app callbacks.
///
/// Each mutation recomposes the projection-view matrix and re-uploads it
/// immediately, so the change is visible to the draw that follows the
/// callback.
pub struct CameraCtx<'a> {
    pub(crate) camera: &'a mut Camera2d,
    pub(crate) queue: &'a wgpu::Queue,
}

impl CameraCtx<'_> {
    pub fn set_scale(&mut self, scale: Vec2) {
        self.camera.set_scale(self.queue, scale);
    }

    /// Anchors the view's top-left corner at `position`.
    pub fn move_anchor_to(&mut self, position: Vec2) {
        self.camera.move_anchor_to(self.queue, position);
    }

    /// Pans by `delta`: camera right/down moves the world left/up.
    pub fn translate_by(&mut self, delta: Vec2) {
        self.camera.translate_by(self.queue, delta);
    }

    pub fn scale(&self) -> Vec2 {
        self.camera.scale()
    }

    pub fn position(&self) -> Vec2 {
        self.camera.position()
    }
}

/// Per-frame context handed to [`App`](crate::core::App) callbacks.
pub struct FrameCtx<'a> {
    /// Timing snapshot for the current frame.
    pub time: FrameTime,
    /// Camera control.
    pub camera: CameraCtx<'a>,
}
