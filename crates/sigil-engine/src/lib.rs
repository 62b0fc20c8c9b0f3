//! Sigil engine crate.
//!
//! A small real-time 2D sprite core: sprites are grouped by texture into
//! batches, serialized into one fixed-capacity storage buffer, and drawn
//! with a single instanced draw call per texture. Depth testing orders
//! layers, an orthographic camera maps world units to clip space, and a
//! frame clock normalizes per-frame deltas to a 60 fps baseline.
//!
//! The crate owns no window and no event loop. The embedder initializes
//! wgpu, wraps the handles in a [`device::GraphicsContext`], and drives
//! [`core::Engine2d::frame`] from whatever loop it runs.

pub mod device;
pub mod math;
pub mod time;

pub mod core;
pub mod logging;
pub mod render;
