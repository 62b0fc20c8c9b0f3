use crate::device::{TextureHandle, TextureInfo};

/// Depth assigned when a sprite is created with an unset (zero) `z`,
/// keeping it just above the cleared background plane.
pub const DEFAULT_SPRITE_DEPTH: f32 = 0.001;

/// Sub-rectangle of a texture in pixel coordinates.
///
/// Staying inside the owning texture's bounds is the caller's contract;
/// out-of-range rectangles sample clamped edge texels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextureFrame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Optional fields for [`Sprite::new`]; anything unset takes its
/// documented default.
#[derive(Debug, Copy, Clone, Default)]
pub struct SpriteOptions {
    pub x: f32,
    pub y: f32,
    /// Depth key. Exactly zero means unset and falls back to
    /// [`DEFAULT_SPRITE_DEPTH`]; usable values lie in `0 < z <= 100`.
    pub z: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub frame: Option<TextureFrame>,
}

/// One drawable quad for the current frame.
///
/// Sprites are plain values the game rebuilds every frame; the texture
/// handle is resolved against the pool at render time.
#[derive(Debug, Copy, Clone)]
pub struct Sprite {
    pub texture: TextureHandle,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub width: f32,
    pub height: f32,
    pub frame: TextureFrame,
}

impl Sprite {
    /// Builds a sprite over `texture` with defaulted geometry: the size
    /// falls back to the frame's, then the full texture's, dimensions; the
    /// frame defaults to the whole texture; zero depth becomes
    /// [`DEFAULT_SPRITE_DEPTH`].
    pub fn new(texture: &TextureInfo, options: SpriteOptions) -> Sprite {
        let frame = options.frame.unwrap_or(TextureFrame {
            x: 0.0,
            y: 0.0,
            width: texture.width as f32,
            height: texture.height as f32,
        });

        Sprite {
            texture: texture.handle,
            x: options.x,
            y: options.y,
            z: if options.z == 0.0 {
                DEFAULT_SPRITE_DEPTH
            } else {
                options.z
            },
            width: options
                .width
                .or(options.frame.map(|f| f.width))
                .unwrap_or(texture.width as f32),
            height: options
                .height
                .or(options.frame.map(|f| f.height))
                .unwrap_or(texture.height as f32),
            frame,
        }
    }
}
