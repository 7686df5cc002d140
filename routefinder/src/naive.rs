//! A map-free heuristic: the south-west-ish contact tile between two
//! axis-aligned rectangles. Callers that just want *a* destination tile
//! (e.g. to hand to [`crate::finder::RouteFinder::find_route`] as `dest`)
//! without walking the collision map can use this instead.

use crate::reach::LocAngle;

/// One of the four sides of the target rectangle the source rectangle is
/// classified as approaching from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    North,
    East,
    South,
    West,
}

/// Classifies which side of the target rectangle `src` is on, using the
/// two diagonal dot-products `diagonal = (sx-tx) + (sz-tz)` and
/// `anti = (sx-tx) - (sz-tz)` evaluated against rectangle centers (doubled
/// to stay in integer arithmetic). The sign of each splits the plane into
/// the four compass quadrants around the target.
fn classify_side(src_cx2: i32, src_cz2: i32, dest_cx2: i32, dest_cz2: i32) -> Side {
    let dx2 = src_cx2 - dest_cx2;
    let dz2 = src_cz2 - dest_cz2;
    let diagonal = dx2 + dz2;
    let anti = dx2 - dz2;
    match (diagonal >= 0, anti >= 0) {
        (true, true) => Side::East,
        (true, false) => Side::North,
        (false, false) => Side::West,
        (false, true) => Side::South,
    }
}

fn clamp(v: i32, lo: i32, hi: i32) -> i32 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Computes a contact tile between a `src_size`-square source rectangle
/// anchored at `(src_x, src_z)` and a `dest_width`x`dest_length` (rotated by
/// `loc_angle`) target rectangle anchored at `(dest_x, dest_z)`. Does not
/// touch the collision map: the result may be blocked, submerged in a wall,
/// or otherwise unwalkable — it is only a heuristic starting point for
/// callers that don't want to run a full BFS.
pub fn naive_destination(
    src_x: i32,
    src_z: i32,
    src_size: i32,
    dest_x: i32,
    dest_z: i32,
    dest_width: u16,
    dest_length: u16,
    loc_angle: LocAngle,
) -> (i32, i32) {
    let (w, l) = loc_angle.rotate_dims(dest_width, dest_length);
    let (w, l) = (w as i32, l as i32);

    let tx0 = dest_x;
    let tx1 = dest_x + w - 1;
    let tz0 = dest_z;
    let tz1 = dest_z + l - 1;

    // Centers doubled (`2*center = lo + hi`) to stay in integer arithmetic.
    let src_cx2 = 2 * src_x + src_size - 1;
    let src_cz2 = 2 * src_z + src_size - 1;
    let dest_cx2 = tx0 + tx1;
    let dest_cz2 = tz0 + tz1;

    match classify_side(src_cx2, src_cz2, dest_cx2, dest_cz2) {
        Side::East => (tx1 + 1, clamp(src_z, tz0, tz1)),
        Side::West => (tx0 - 1, clamp(src_z, tz0, tz1)),
        Side::North => (clamp(src_x, tx0, tx1), tz1 + 1),
        Side::South => (clamp(src_x, tx0, tx1), tz0 - 1),
    }
}
