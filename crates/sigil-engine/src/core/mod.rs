//! The frame-driven runtime: the [`App`] contract, the per-frame context
//! handed to it, and the engine that owns clock, camera, textures, and
//! renderer.

mod app;
mod ctx;
mod engine;

pub use app::App;
pub use ctx::{CameraCtx, FrameCtx};
pub use engine::{Engine2d, Engine2dOptions};
