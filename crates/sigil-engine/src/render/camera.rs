use crate::device::BufferAllocator;
use crate::math::{Mat4, Vec2, Vec3};

/// Initial camera pose for [`Camera2d::new`].
#[derive(Debug, Copy, Clone, Default)]
pub struct CameraOptions {
    /// Zoom per axis, default `(1, 1)`.
    pub scale: Option<Vec2>,
    /// World position of the view's top-left corner, default `(0, 0)`.
    pub position: Option<Vec2>,
}

/// Pose and projection state behind [`Camera2d`], free of GPU handles.
///
/// The matrix is recomposed in place as projection, then scale, then
/// translate, over a top-left-origin view volume with depth bounds 100 to
/// -100 (usable sprite depth is `0 < z <= 100`; larger z draws on top).
/// The stored translation is the negation of the requested camera
/// position, so moving the camera right shifts the rendered world left.
#[derive(Debug)]
struct CameraPose {
    matrix: Mat4,
    scale: Vec3,
    translation: Vec3,
    width: f32,
    height: f32,
}

impl CameraPose {
    fn new(width: u32, height: u32, options: CameraOptions) -> Self {
        let scale = options
            .scale
            .map_or(Vec3::new(1.0, 1.0, 1.0), |s| Vec3::new(s.x, s.y, 1.0));
        let translation = options
            .position
            .map_or(Vec3::zero(), |p| Vec3::new(-p.x, -p.y, 0.0));

        let mut pose = Self {
            matrix: Mat4::IDENTITY,
            scale,
            translation,
            width: width as f32,
            height: height as f32,
        };
        pose.recompose();
        pose
    }

    fn set_scale(&mut self, scale: Vec2) {
        self.scale.x = scale.x;
        self.scale.y = scale.y;
        self.recompose();
    }

    fn move_anchor_to(&mut self, position: Vec2) {
        self.translation.x = -position.x;
        self.translation.y = -position.y;
        self.recompose();
    }

    fn translate_by(&mut self, delta: Vec2) {
        self.translation.x -= delta.x;
        self.translation.y -= delta.y;
        self.recompose();
    }

    /// Adopts a new drawable size for the projection bounds. Zero-sized
    /// bounds would divide the projection by zero and poison the matrix
    /// with non-finite cells, so they are rejected and the pose is left
    /// unchanged.
    fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.width = width as f32;
        self.height = height as f32;
        self.recompose();
        true
    }

    fn recompose(&mut self) {
        compose_projection_view(
            self.width,
            self.height,
            self.scale,
            self.translation,
            &mut self.matrix,
        );
    }
}

/// Orthographic projection-view state and the uniform buffer it feeds.
///
/// Every mutation recomposes the matrix (see [`CameraPose`]) and re-uploads
/// it immediately; nothing touches the buffer between mutations.
pub struct Camera2d {
    pose: CameraPose,
    buffer: wgpu::Buffer,
}

impl Camera2d {
    pub fn new(
        allocator: &BufferAllocator<'_>,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        options: CameraOptions,
    ) -> Self {
        let camera = Self {
            pose: CameraPose::new(width, height, options),
            buffer: allocator.uniform_buffer::<Mat4>(),
        };
        camera.upload(queue);
        camera
    }

    /// The uniform buffer holding the current projection-view matrix.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.pose.matrix
    }

    pub fn scale(&self) -> Vec2 {
        Vec2::new(self.pose.scale.x, self.pose.scale.y)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(-self.pose.translation.x, -self.pose.translation.y)
    }

    pub fn set_scale(&mut self, queue: &wgpu::Queue, scale: Vec2) {
        self.pose.set_scale(scale);
        self.upload(queue);
    }

    /// Anchors the view's top-left corner at `position`.
    pub fn move_anchor_to(&mut self, queue: &wgpu::Queue, position: Vec2) {
        self.pose.move_anchor_to(position);
        self.upload(queue);
    }

    /// Pans by `delta`: camera right/down moves the world left/up.
    pub fn translate_by(&mut self, queue: &wgpu::Queue, delta: Vec2) {
        self.pose.translate_by(delta);
        self.upload(queue);
    }

    /// Adopts a new drawable size for the projection bounds. Zero-sized
    /// resizes are ignored and the uploaded matrix stays as it was.
    pub fn resize(&mut self, queue: &wgpu::Queue, width: u32, height: u32) {
        if !self.pose.resize(width, height) {
            log::warn!("ignoring zero-sized camera resize");
            return;
        }
        self.upload(queue);
    }

    fn upload(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&self.pose.matrix));
    }
}

/// Rebuilds the projection-view matrix in `out`: orthographic over the
/// top-left-origin drawable, then scale, then translate.
fn compose_projection_view(width: f32, height: f32, scale: Vec3, translation: Vec3, out: &mut Mat4) {
    Mat4::orthographic_into(0.0, width, height, 0.0, 100.0, -100.0, out);
    out.scale_assign(scale);
    out.translate_assign(translation);
}
