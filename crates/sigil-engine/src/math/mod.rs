//! Math primitives for sprite transforms and camera composition.
//!
//! Everything here is plain value math with no GPU coupling; [`Mat4`] is
//! additionally `Pod` so a composed matrix uploads to a uniform buffer
//! as-is.

mod mat4;
mod scalar;
mod vec2;
mod vec3;

pub use mat4::Mat4;
pub use scalar::{clamp, decay, lerp};
pub use vec2::Vec2;
pub use vec3::Vec3;
