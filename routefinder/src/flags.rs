//! Per-tile collision flag word and the composite masks derived from it.
//!
//! Bit layout (32 bits total, 12 spare for future use):
//!
//! ```text
//! 0      BLOCK_WALK
//! 1      ROOF
//! 2      LOC
//! 3..10  WALL_NORTH .. WALL_NORTHWEST   (movement wall blockers)
//! 11     LOC_ROUTE_BLOCKER
//! 12..19 WALL_NORTH_ROUTE_BLOCKER .. WALL_NORTHWEST_ROUTE_BLOCKER
//! ```
use bitflags::bitflags;

use crate::direction::Direction;

bitflags! {
    /// A tile's 32-bit collision flag word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TileFlags: u32 {
        const BLOCK_WALK = 1 << 0;
        const ROOF       = 1 << 1;
        const LOC        = 1 << 2;

        const WALL_NORTH     = 1 << 3;
        const WALL_NORTHEAST = 1 << 4;
        const WALL_EAST      = 1 << 5;
        const WALL_SOUTHEAST = 1 << 6;
        const WALL_SOUTH     = 1 << 7;
        const WALL_SOUTHWEST = 1 << 8;
        const WALL_WEST      = 1 << 9;
        const WALL_NORTHWEST = 1 << 10;

        const LOC_ROUTE_BLOCKER = 1 << 11;

        const WALL_NORTH_ROUTE_BLOCKER     = 1 << 12;
        const WALL_NORTHEAST_ROUTE_BLOCKER = 1 << 13;
        const WALL_EAST_ROUTE_BLOCKER      = 1 << 14;
        const WALL_SOUTHEAST_ROUTE_BLOCKER = 1 << 15;
        const WALL_SOUTH_ROUTE_BLOCKER     = 1 << 16;
        const WALL_SOUTHWEST_ROUTE_BLOCKER = 1 << 17;
        const WALL_WEST_ROUTE_BLOCKER      = 1 << 18;
        const WALL_NORTHWEST_ROUTE_BLOCKER = 1 << 19;

        /// Every wall bit, either family. Used to isolate sight-blocking
        /// bits for the `LineOfSight` strategy.
        const ALL_WALLS = Self::WALL_NORTH.bits() | Self::WALL_NORTHEAST.bits()
            | Self::WALL_EAST.bits() | Self::WALL_SOUTHEAST.bits()
            | Self::WALL_SOUTH.bits() | Self::WALL_SOUTHWEST.bits()
            | Self::WALL_WEST.bits() | Self::WALL_NORTHWEST.bits()
            | Self::WALL_NORTH_ROUTE_BLOCKER.bits() | Self::WALL_NORTHEAST_ROUTE_BLOCKER.bits()
            | Self::WALL_EAST_ROUTE_BLOCKER.bits() | Self::WALL_SOUTHEAST_ROUTE_BLOCKER.bits()
            | Self::WALL_SOUTH_ROUTE_BLOCKER.bits() | Self::WALL_SOUTHWEST_ROUTE_BLOCKER.bits()
            | Self::WALL_WEST_ROUTE_BLOCKER.bits() | Self::WALL_NORTHWEST_ROUTE_BLOCKER.bits()
            | Self::LOC.bits() | Self::LOC_ROUTE_BLOCKER.bits();
    }
}

/// Selects which flag family (`WALL_*` vs `WALL_*_ROUTE_BLOCKER`, and the
/// matching `LOC`/`LOC_ROUTE_BLOCKER` bit) a search should honour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagFamily {
    /// The ordinary wall/loc bits.
    Walk,
    /// The stricter twins, used so agents cannot take player-only shortcuts.
    RouteBlocker,
}

impl FlagFamily {
    fn wall_bit(self, dir: Direction) -> TileFlags {
        use Direction::*;
        match (self, dir) {
            (FlagFamily::Walk, North) => TileFlags::WALL_NORTH,
            (FlagFamily::Walk, NorthEast) => TileFlags::WALL_NORTHEAST,
            (FlagFamily::Walk, East) => TileFlags::WALL_EAST,
            (FlagFamily::Walk, SouthEast) => TileFlags::WALL_SOUTHEAST,
            (FlagFamily::Walk, South) => TileFlags::WALL_SOUTH,
            (FlagFamily::Walk, SouthWest) => TileFlags::WALL_SOUTHWEST,
            (FlagFamily::Walk, West) => TileFlags::WALL_WEST,
            (FlagFamily::Walk, NorthWest) => TileFlags::WALL_NORTHWEST,
            (FlagFamily::RouteBlocker, North) => TileFlags::WALL_NORTH_ROUTE_BLOCKER,
            (FlagFamily::RouteBlocker, NorthEast) => TileFlags::WALL_NORTHEAST_ROUTE_BLOCKER,
            (FlagFamily::RouteBlocker, East) => TileFlags::WALL_EAST_ROUTE_BLOCKER,
            (FlagFamily::RouteBlocker, SouthEast) => TileFlags::WALL_SOUTHEAST_ROUTE_BLOCKER,
            (FlagFamily::RouteBlocker, South) => TileFlags::WALL_SOUTH_ROUTE_BLOCKER,
            (FlagFamily::RouteBlocker, SouthWest) => TileFlags::WALL_SOUTHWEST_ROUTE_BLOCKER,
            (FlagFamily::RouteBlocker, West) => TileFlags::WALL_WEST_ROUTE_BLOCKER,
            (FlagFamily::RouteBlocker, NorthWest) => TileFlags::WALL_NORTHWEST_ROUTE_BLOCKER,
        }
    }

    fn loc_bit(self) -> TileFlags {
        match self {
            FlagFamily::Walk => TileFlags::LOC,
            FlagFamily::RouteBlocker => TileFlags::LOC_ROUTE_BLOCKER,
        }
    }

    /// `BLOCK_<dir>`: the mask guarding entry into a tile from `dir`. For a
    /// cardinal direction this is just that wall's bit; for a diagonal it is
    /// the two flanking cardinal walls plus the diagonal wall itself, e.g.
    /// `BLOCK_SOUTH_WEST = WALL_S | WALL_W | WALL_SW | LOC`. `LOC` and
    /// `BLOCK_WALK` are always included: a loc occupying the tile or the
    /// tile itself being un-standable blocks entry from every side, not
    /// just the direction being tested. (`CollisionStrategy::Blocked`
    /// relies on `BLOCK_WALK` being part of this mask — it strips it back
    /// out before testing the rest, then requires it set on its own.)
    pub fn corner_mask(self, dir: Direction) -> TileFlags {
        let mut mask = self.wall_bit(dir) | self.loc_bit() | TileFlags::BLOCK_WALK;
        if let Some((a, b)) = dir.cardinal_components() {
            mask |= self.wall_bit(a) | self.wall_bit(b);
        }
        mask
    }

    /// Mask for an interior leading-edge tile of a size-N cardinal sweep:
    /// the wall facing the direction of travel plus both walls orthogonal
    /// to it (so a wall on either flank still clips the actor's side).
    pub fn triple_mask(self, travel: Direction, orth_a: Direction, orth_b: Direction) -> TileFlags {
        self.wall_bit(travel)
            | self.wall_bit(orth_a)
            | self.wall_bit(orth_b)
            | self.loc_bit()
            | TileFlags::BLOCK_WALK
    }

    /// Restricts `mask` to the bits that matter for sight: walls and locs,
    /// not `BLOCK_WALK`/`ROOF`. Used by `CollisionStrategy::LineOfSight`.
    pub fn sight_mask(mask: TileFlags) -> TileFlags {
        mask & TileFlags::ALL_WALLS
    }
}
