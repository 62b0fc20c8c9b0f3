//! GPU plumbing: the wrapped device/surface handles, resource factories,
//! and the texture pool.
//!
//! Adapter and device negotiation stay with the embedder; everything here
//! works against handles it was given.

mod alloc;
mod context;
mod textures;

pub use alloc::BufferAllocator;
pub use context::{GraphicsContext, SurfaceFrame};
pub use textures::{ImageData, TextureHandle, TextureInfo, TexturePool};

pub(crate) use textures::TextureEntry;
