//! Read-only access to per-tile collision flags.

use crate::flags::TileFlags;

/// Supplies the finder with a tile's flag word by absolute coordinate.
///
/// Implementations must tolerate any coordinate the finder's search window
/// can reach (`baseX..baseX+SEARCH_SIZE`, same for `z`); the finder performs
/// no bounds check of its own before calling `get`. Out-of-range tiles
/// should report a fully-blocking value so the search simply treats them as
/// walls rather than panicking.
pub trait CollisionFlagMap {
    fn get(&self, x: i32, z: i32, level: u8) -> TileFlags;
}

/// A flat, fixed-size grid of flags for one level — the simplest possible
/// `CollisionFlagMap`, handy for tests and small standalone maps.
#[derive(Debug, Clone)]
pub struct FlatCollisionMap {
    width: i32,
    height: i32,
    level: u8,
    tiles: Vec<TileFlags>,
}

impl FlatCollisionMap {
    pub fn new(width: i32, height: i32, level: u8) -> Self {
        assert!(width > 0 && height > 0, "map dimensions must be positive");
        Self {
            width,
            height,
            level,
            tiles: vec![TileFlags::empty(); (width * height) as usize],
        }
    }

    fn index(&self, x: i32, z: i32) -> Option<usize> {
        if x < 0 || z < 0 || x >= self.width || z >= self.height {
            return None;
        }
        Some((z * self.width + x) as usize)
    }

    pub fn set(&mut self, x: i32, z: i32, flags: TileFlags) {
        if let Some(i) = self.index(x, z) {
            self.tiles[i] = flags;
        }
    }

    pub fn insert(&mut self, x: i32, z: i32, flags: TileFlags) {
        if let Some(i) = self.index(x, z) {
            self.tiles[i].insert(flags);
        }
    }
}

impl CollisionFlagMap for FlatCollisionMap {
    fn get(&self, x: i32, z: i32, level: u8) -> TileFlags {
        if level != self.level {
            return TileFlags::BLOCK_WALK;
        }
        match self.index(x, z) {
            Some(i) => self.tiles[i],
            None => TileFlags::BLOCK_WALK,
        }
    }
}
