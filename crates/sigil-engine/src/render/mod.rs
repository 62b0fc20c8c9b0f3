//! GPU sprite rendering.
//!
//! Conventions:
//! - sprite geometry is in world units with a top-left origin, y growing
//!   downward
//! - the vertex stage reads per-sprite records from a storage buffer and
//!   maps them to clip space with the camera's projection-view matrix
//! - depth clears to 0.0 and the test passes greater values, so a larger
//!   sprite `z` draws on top

mod batch;
mod camera;
mod error;
mod renderer;
mod sprite;

pub use batch::InstanceRecord;
pub use camera::{Camera2d, CameraOptions};
pub use error::{FrameAction, InitError, RenderError};
pub use renderer::{SpriteBatchRenderer, SpriteRendererOptions};
pub use sprite::{Sprite, SpriteOptions, TextureFrame, DEFAULT_SPRITE_DEPTH};
