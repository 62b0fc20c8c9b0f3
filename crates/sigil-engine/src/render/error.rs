use thiserror::Error;

use crate::device::TextureHandle;

/// Renderer construction failures, all detectable before any GPU work is
/// recorded.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("maximum sprite count must be non-zero")]
    ZeroSpriteCapacity,

    #[error(
        "instance buffer of {required} bytes exceeds the device storage binding limit of {limit}"
    )]
    InstanceBufferTooLarge { required: u64, limit: u64 },
}

/// Per-frame failures. A failed frame records no draws; the caller decides
/// what to do next via [`RenderError::action`].
#[derive(Debug, Error)]
pub enum RenderError {
    /// A batch would overflow the fixed-capacity instance buffer.
    #[error(
        "batch for {texture:?} holds {batch_len} sprites but only {remaining} of {capacity} instance slots remain"
    )]
    CapacityExceeded {
        texture: TextureHandle,
        batch_len: usize,
        remaining: usize,
        capacity: usize,
    },

    /// A sprite referenced a handle the pool does not currently hold.
    #[error("sprite references unknown or stale texture {0:?}")]
    UnknownTexture(TextureHandle),

    /// Frame acquisition failed.
    #[error("surface frame unavailable: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// High-level response after a failed frame. Advice only; no reconfigure
/// or retry happens inside the renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameAction {
    /// Transient error; skip the current frame.
    SkipFrame,
    /// The surface no longer matches the window; reconfigure, then resume.
    Reconfigure,
    /// Fatal error (commonly OOM or a broken draw contract); terminate
    /// gracefully or rebuild the GPU state from scratch.
    Fatal,
}

impl RenderError {
    /// Maps this error to the action the embedder should take.
    pub fn action(&self) -> FrameAction {
        match self {
            RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                FrameAction::Reconfigure
            }
            RenderError::Surface(wgpu::SurfaceError::OutOfMemory) => FrameAction::Fatal,
            RenderError::Surface(_) => FrameAction::SkipFrame,
            RenderError::CapacityExceeded { .. } | RenderError::UnknownTexture(_) => {
                FrameAction::Fatal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_errors_map_to_their_actions() {
        let lost = RenderError::Surface(wgpu::SurfaceError::Lost);
        assert_eq!(lost.action(), FrameAction::Reconfigure);

        let outdated = RenderError::Surface(wgpu::SurfaceError::Outdated);
        assert_eq!(outdated.action(), FrameAction::Reconfigure);

        let timeout = RenderError::Surface(wgpu::SurfaceError::Timeout);
        assert_eq!(timeout.action(), FrameAction::SkipFrame);

        let oom = RenderError::Surface(wgpu::SurfaceError::OutOfMemory);
        assert_eq!(oom.action(), FrameAction::Fatal);
    }

    #[test]
    fn contract_violations_are_fatal() {
        let unknown = RenderError::UnknownTexture(TextureHandle::from_parts(3, 1));
        assert_eq!(unknown.action(), FrameAction::Fatal);

        let overflow = RenderError::CapacityExceeded {
            texture: TextureHandle::from_parts(1, 0),
            batch_len: 500,
            remaining: 100,
            capacity: 1000,
        };
        assert_eq!(overflow.action(), FrameAction::Fatal);
    }

    #[test]
    fn messages_name_the_offending_texture() {
        let err = RenderError::UnknownTexture(TextureHandle::from_parts(9, 4));
        assert!(err.to_string().contains("TextureHandle(9:4)"));
    }
}
