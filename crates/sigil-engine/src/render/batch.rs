use bytemuck::{Pod, Zeroable};
use indexmap::IndexMap;

use super::sprite::Sprite;
use crate::device::TextureHandle;

/// Per-sprite GPU record, 48 bytes:
///
///  offset  0: x, y
///  offset  8: width, height
///  offset 16: frame rect (x, y, width, height)
///  offset 32: depth
///  offset 36: padding
///
/// The layout is the binary contract with the shader's `Instance` struct;
/// the stride must stay a multiple of 16 for storage array addressing.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceRecord {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub frame: [f32; 4],
    pub z: f32,
    pub _pad: [f32; 3],
}

const _: () = assert!(std::mem::size_of::<InstanceRecord>() % 16 == 0);

impl From<&Sprite> for InstanceRecord {
    fn from(sprite: &Sprite) -> Self {
        Self {
            x: sprite.x,
            y: sprite.y,
            width: sprite.width,
            height: sprite.height,
            frame: [
                sprite.frame.x,
                sprite.frame.y,
                sprite.frame.width,
                sprite.frame.height,
            ],
            z: sprite.z,
            _pad: [0.0; 3],
        }
    }
}

/// Sprites grouped by texture, serialized to instance records in a single
/// pass. Batches keep first-seen texture order and sprites keep their
/// submission order inside each batch.
pub(crate) struct SpriteBatches {
    batches: IndexMap<TextureHandle, Vec<InstanceRecord>>,
}

impl SpriteBatches {
    pub(crate) fn group(sprites: &[Sprite]) -> Self {
        let mut batches: IndexMap<TextureHandle, Vec<InstanceRecord>> = IndexMap::new();
        for sprite in sprites {
            batches
                .entry(sprite.texture)
                .or_default()
                .push(InstanceRecord::from(sprite));
        }
        Self { batches }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (TextureHandle, &[InstanceRecord])> {
        self.batches
            .iter()
            .map(|(handle, records)| (*handle, records.as_slice()))
    }

    pub(crate) fn len(&self) -> usize {
        self.batches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::sprite::TextureFrame;

    fn sprite(texture: TextureHandle, x: f32) -> Sprite {
        Sprite {
            texture,
            x,
            y: 0.0,
            z: 0.001,
            width: 16.0,
            height: 16.0,
            frame: TextureFrame { x: 0.0, y: 0.0, width: 16.0, height: 16.0 },
        }
    }

    // ── grouping ────────────────────────────────────────────────────────────

    #[test]
    fn interleaved_textures_group_in_first_seen_order() {
        let a = TextureHandle::from_parts(1, 0);
        let b = TextureHandle::from_parts(2, 0);
        let sprites = [
            sprite(a, 0.0),
            sprite(b, 1.0),
            sprite(a, 2.0),
            sprite(a, 3.0),
            sprite(b, 4.0),
            sprite(a, 5.0),
            sprite(b, 6.0),
            sprite(a, 7.0),
        ];

        let batches = SpriteBatches::group(&sprites);
        assert_eq!(batches.len(), 2);

        let grouped: Vec<_> = batches.iter().collect();
        assert_eq!(grouped[0].0, a);
        assert_eq!(grouped[0].1.len(), 5);
        assert_eq!(grouped[1].0, b);
        assert_eq!(grouped[1].1.len(), 3);
    }

    #[test]
    fn sprites_keep_submission_order_inside_a_batch() {
        let a = TextureHandle::from_parts(1, 0);
        let b = TextureHandle::from_parts(2, 0);
        let sprites = [
            sprite(a, 10.0),
            sprite(b, 99.0),
            sprite(a, 20.0),
            sprite(a, 30.0),
        ];

        let batches = SpriteBatches::group(&sprites);
        let grouped: Vec<_> = batches.iter().collect();
        let xs: Vec<f32> = grouped[0].1.iter().map(|record| record.x).collect();
        assert_eq!(xs, [10.0, 20.0, 30.0]);
    }

    #[test]
    fn stale_and_live_handles_to_one_slot_stay_separate_batches() {
        let live = TextureHandle::from_parts(1, 1);
        let stale = TextureHandle::from_parts(1, 0);
        let batches = SpriteBatches::group(&[sprite(live, 0.0), sprite(stale, 1.0)]);
        assert_eq!(batches.len(), 2);
    }

    // ── record layout ───────────────────────────────────────────────────────

    #[test]
    fn record_is_48_bytes() {
        assert_eq!(std::mem::size_of::<InstanceRecord>(), 48);
    }

    #[test]
    fn record_serializes_field_order_and_padding() {
        let s = Sprite {
            texture: TextureHandle::from_parts(1, 0),
            x: 1.5,
            y: -2.25,
            z: 7.0,
            width: 32.0,
            height: 48.0,
            frame: TextureFrame { x: 8.0, y: 16.0, width: 24.0, height: 40.0 },
        };

        let record = InstanceRecord::from(&s);
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&record));
        assert_eq!(
            floats,
            &[1.5, -2.25, 32.0, 48.0, 8.0, 16.0, 24.0, 40.0, 7.0, 0.0, 0.0, 0.0][..]
        );
    }

    #[test]
    fn batch_bytes_are_bit_exact() {
        let a = TextureHandle::from_parts(1, 0);
        let sprites = [sprite(a, 0.125), sprite(a, 1e-7)];
        let batches = SpriteBatches::group(&sprites);
        let (_, records) = batches.iter().next().unwrap();

        let bytes: &[u8] = bytemuck::cast_slice(records);
        assert_eq!(bytes.len(), 96);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats[0].to_bits(), 0.125f32.to_bits());
        assert_eq!(floats[12].to_bits(), 1e-7f32.to_bits());
    }
}
