use core::fmt;

/// Decoded pixels handed over by the embedder's image loader.
#[derive(Debug, Copy, Clone)]
pub struct ImageData<'a> {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows, `width * height * 4` bytes.
    pub rgba: &'a [u8],
}

/// Opaque generational texture identifier.
///
/// Packed as a `u64`: low 32 bits hold the slot index (0 is the nil
/// handle), high 32 bits the slot generation. Replacing or removing a
/// texture bumps the slot's generation, so handles to the old contents
/// stop resolving instead of silently aliasing the new ones.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(u64);

impl TextureHandle {
    pub const fn nil() -> Self {
        Self(0)
    }

    pub const fn from_parts(index: u32, generation: u32) -> Self {
        Self((index as u64) | ((generation as u64) << 32))
    }

    pub const fn index(self) -> u32 {
        (self.0 & 0xFFFF_FFFF) as u32
    }

    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }
}

impl Default for TextureHandle {
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureHandle({}:{})", self.index(), self.generation())
    }
}

/// Handle plus pixel dimensions, as sprite construction needs them.
#[derive(Debug, Copy, Clone)]
pub struct TextureInfo {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
}

pub(crate) struct TextureEntry {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

struct Slot<T> {
    generation: u32,
    entry: Option<T>,
}

/// Generation-checked slot arena behind [`TexturePool`].
///
/// Handles index slots one-based (index 0 stays reserved for nil) and are
/// validated against the slot generation on every lookup, so stale handles
/// resolve to `None` rather than to whichever entry reused the slot. The
/// arena is generic over its payload, which keeps the bookkeeping
/// exercisable without a GPU entry type.
struct SlotArena<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> SlotArena<T> {
    /// Stores `entry` and returns its handle. Freed slots are reused before
    /// the arena grows.
    fn insert(&mut self, entry: T) -> TextureHandle {
        match self.slots.iter().position(|slot| slot.entry.is_none()) {
            Some(free) => {
                self.slots[free].entry = Some(entry);
                TextureHandle::from_parts(free as u32 + 1, self.slots[free].generation)
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                TextureHandle::from_parts(self.slots.len() as u32, 0)
            }
        }
    }

    /// Swaps the entry behind `handle`, returning the fresh handle. The old
    /// handle is invalidated by the generation bump.
    fn replace(&mut self, handle: TextureHandle, entry: T) -> Option<TextureHandle> {
        let slot = self.slot_mut(handle)?;
        slot.generation = slot.generation.wrapping_add(1);
        slot.entry = Some(entry);
        Some(TextureHandle::from_parts(handle.index(), slot.generation))
    }

    /// Takes the entry behind `handle`. The slot becomes reusable under a
    /// new generation.
    fn remove(&mut self, handle: TextureHandle) -> Option<T> {
        let slot = self.slot_mut(handle)?;
        slot.generation = slot.generation.wrapping_add(1);
        slot.entry.take()
    }

    fn get(&self, handle: TextureHandle) -> Option<&T> {
        let index = handle.index();
        if index == 0 {
            return None;
        }
        let slot = self.slots.get(index as usize - 1)?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.entry.as_ref()
    }

    fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.entry.is_some()).count()
    }

    fn slot_mut(&mut self, handle: TextureHandle) -> Option<&mut Slot<T>> {
        let index = handle.index();
        if index == 0 {
            return None;
        }
        let slot = self.slots.get_mut(index as usize - 1)?;
        if slot.generation != handle.generation() || slot.entry.is_none() {
            return None;
        }
        Some(slot)
    }
}

/// Slot arena owning sprite textures and their views.
#[derive(Default)]
pub struct TexturePool {
    arena: SlotArena<TextureEntry>,
}

impl TexturePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `texture`, creating its default view, and returns the new
    /// handle with the texture's dimensions.
    pub fn insert(&mut self, texture: wgpu::Texture) -> TextureInfo {
        let width = texture.width();
        let height = texture.height();
        let handle = self.arena.insert(TextureEntry {
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            texture,
            width,
            height,
        });

        TextureInfo {
            handle,
            width,
            height,
        }
    }

    /// Swaps the texture behind `handle` for a new one, returning the fresh
    /// handle. The old handle (and anything cached against it) is
    /// invalidated by the generation bump.
    pub fn replace(&mut self, handle: TextureHandle, texture: wgpu::Texture) -> Option<TextureInfo> {
        let width = texture.width();
        let height = texture.height();
        let entry = TextureEntry {
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            texture,
            width,
            height,
        };

        self.arena.replace(handle, entry).map(|handle| TextureInfo {
            handle,
            width,
            height,
        })
    }

    /// Removes the texture behind `handle`, returning it. The slot becomes
    /// reusable under a new generation.
    pub fn remove(&mut self, handle: TextureHandle) -> Option<wgpu::Texture> {
        self.arena.remove(handle).map(|entry| entry.texture)
    }

    /// Dimensions for a live handle.
    pub fn info(&self, handle: TextureHandle) -> Option<TextureInfo> {
        self.get(handle).map(|entry| TextureInfo {
            handle,
            width: entry.width,
            height: entry.height,
        })
    }

    /// Number of live textures.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn get(&self, handle: TextureHandle) -> Option<&TextureEntry> {
        self.arena.get(handle)
    }
}
