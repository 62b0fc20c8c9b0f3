use super::ctx::FrameCtx;
use crate::render::Sprite;

/// Game-side contract driven by the engine loop.
///
/// The engine calls `update` then `render` once per frame, in that order,
/// with the same frame context. Implementations hold their own state; the
/// engine never inspects it.
pub trait App {
    /// Advances game state by the frame's delta.
    fn update(&mut self, ctx: &mut FrameCtx<'_>);

    /// Produces this frame's sprites in submission order.
    fn render(&mut self, ctx: &mut FrameCtx<'_>) -> Vec<Sprite>;
}
