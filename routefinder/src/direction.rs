//! The eight compass directions used by BFS expansion, and the 4-bit
//! "arrived from" nibble stored per cell of the direction grid.

/// One of the eight directions a step can be taken in. `x` increases East,
/// `z` increases North.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Neighbour-expansion order, reproduced exactly per the search contract:
    /// east-to-west, west-to-east, north-to-south, south-to-north, then the
    /// four diagonals NE, NW, SE, SW.
    pub const EXPANSION_ORDER: [Direction; 8] = [
        Direction::West,
        Direction::East,
        Direction::South,
        Direction::North,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// `(dx, dz)` of a single step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::SouthEast
                | Direction::SouthWest
                | Direction::NorthWest
        )
    }

    /// The two cardinal directions a diagonal step is composed of, used to
    /// test the orthogonal intermediates that prevent corner-cutting.
    /// `None` for a direction that is already cardinal.
    pub fn cardinal_components(self) -> Option<(Direction, Direction)> {
        match self {
            Direction::NorthEast => Some((Direction::North, Direction::East)),
            Direction::SouthEast => Some((Direction::South, Direction::East)),
            Direction::SouthWest => Some((Direction::South, Direction::West)),
            Direction::NorthWest => Some((Direction::North, Direction::West)),
            _ => None,
        }
    }

    /// The direction that points back toward where a step in `self` came from.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// Bit(s) set in the direction grid when a cell is first reached by a
    /// step in this direction. A diagonal sets both of its cardinal bits.
    pub fn bits(self) -> u8 {
        match self {
            Direction::North => dirbits::NORTH,
            Direction::East => dirbits::EAST,
            Direction::South => dirbits::SOUTH,
            Direction::West => dirbits::WEST,
            Direction::NorthEast => dirbits::NORTH | dirbits::EAST,
            Direction::SouthEast => dirbits::SOUTH | dirbits::EAST,
            Direction::SouthWest => dirbits::SOUTH | dirbits::WEST,
            Direction::NorthWest => dirbits::NORTH | dirbits::WEST,
        }
    }
}

/// Bit constants for the 4-bit "arrived from" nibble.
pub mod dirbits {
    pub const NORTH: u8 = 1 << 0;
    pub const EAST: u8 = 1 << 1;
    pub const SOUTH: u8 = 1 << 2;
    pub const WEST: u8 = 1 << 3;

    /// Marks the source cell. Distinguishable from any real combination of
    /// the four direction bits above (those only ever span `0..=15`).
    pub const SOURCE_SENTINEL: u8 = 99;
}

/// Steps `(x, z)` one cell in the reverse of the direction(s) recorded in
/// `bits`, used when walking the direction grid back toward the source.
pub fn step_reverse(bits: u8, x: &mut i32, z: &mut i32) {
    if bits & dirbits::EAST != 0 {
        *x -= 1;
    }
    if bits & dirbits::WEST != 0 {
        *x += 1;
    }
    if bits & dirbits::NORTH != 0 {
        *z -= 1;
    }
    if bits & dirbits::SOUTH != 0 {
        *z += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_bits_combine_both_cardinals() {
        assert_eq!(Direction::NorthEast.bits(), dirbits::NORTH | dirbits::EAST);
    }

    #[test]
    fn opposite_is_involutive() {
        for d in Direction::EXPANSION_ORDER {
            assert_eq!(d.opposite().opposite().bits(), d.bits());
        }
    }

    #[test]
    fn step_reverse_undoes_a_forward_step() {
        let dir = Direction::NorthEast;
        let (dx, dz) = dir.delta();
        let (mut x, mut z) = (10i32, 10i32);
        x += dx;
        z += dz;
        step_reverse(dir.bits(), &mut x, &mut z);
        assert_eq!((x, z), (10, 10));
    }
}
