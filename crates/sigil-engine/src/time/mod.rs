//! Frame timing.
//!
//! The clock consumes host-supplied millisecond timestamps instead of
//! reading a system clock, so frame pacing stays deterministic under test
//! and under whatever loop the embedder runs.

mod frame_clock;
mod timer;

pub use frame_clock::{FrameClock, FrameTime};
pub use timer::Timer;

/// Baseline frame rate that deltas normalize against.
pub const TARGET_FRAME_RATE: f32 = 60.0;

/// Milliseconds-to-delta factor (`TARGET_FRAME_RATE / 1000`): a frame of
/// about 16.67 ms yields a delta of 1.0.
pub const TARGET_FRAME_RATE_FACTOR: f32 = 0.06;
