//! End-to-end scenarios against literal tile grids, mirroring the documented
//! worked examples: a straight line, a detour around a wall, a fully walled
//! destination with and without the closest-approach fallback, a size-2
//! actor refusing a one-tile-wide gap, and a diagonal corner-clip rejection.

use routefinder::{
    CollisionStrategy, FlatCollisionMap, RouteFinder, RouteFinderConfig, RouteRequest, SimpleReach,
    TileCoord, TileFlags,
};

fn small_finder() -> RouteFinder {
    RouteFinder::new(RouteFinderConfig {
        search_size: 32,
        ring_buffer_size: 1024,
        use_route_blocker_flags: false,
    })
}

// ── Straight line ───────────────────────────────────────────────────

#[test]
fn straight_line_reaches_destination_in_one_corner() {
    let map = FlatCollisionMap::new(20, 20, 0);
    let mut finder = small_finder();
    let req = RouteRequest::new(TileCoord::new(10, 10, 0), 14, 10);

    let route = finder.find_route(&map, &SimpleReach, &req);

    assert!(route.success);
    assert!(!route.alternative);
    assert_eq!(route.waypoints, vec![TileCoord::new(14, 10, 0)]);
}

// ── Detour around a wall ─────────────────────────────────────────────

#[test]
fn detour_routes_around_a_solid_wall() {
    // A solid wall of BLOCK_WALK tiles spans the whole row between source
    // and destination except for nothing — the actor must detour through
    // the open row above it.
    // . . . .   z=2 (detour row)
    // # # # #   z=1 (wall, fully closed)
    // S . . D   z=0
    let mut map = FlatCollisionMap::new(20, 20, 0);
    for x in 0..4 {
        map.set(x, 1, TileFlags::BLOCK_WALK);
    }

    let mut finder = small_finder();
    let req = RouteRequest::new(TileCoord::new(0, 0, 0), 3, 0);

    let route = finder.find_route(&map, &SimpleReach, &req);

    assert!(route.success);
    assert!(!route.alternative);
    assert_eq!(route.waypoints.last(), Some(&TileCoord::new(3, 0, 0)));
    // Must detour (more than the single direct waypoint a clear line would take).
    assert!(route.waypoints.len() > 1);
}

// ── Fully walled destination ────────────────────────────────────────

fn walled_destination_map() -> FlatCollisionMap {
    // S . . .
    // . # # #
    // . # D #
    // . # # #
    let mut map = FlatCollisionMap::new(20, 20, 0);
    for (x, z) in [
        (1, 1),
        (2, 1),
        (3, 1),
        (1, 2),
        (3, 2),
        (1, 3),
        (2, 3),
        (3, 3),
    ] {
        map.set(x, z, TileFlags::BLOCK_WALK);
    }
    map
}

#[test]
fn walled_destination_with_move_near_returns_alternative() {
    let map = walled_destination_map();
    let mut finder = small_finder();
    let mut req = RouteRequest::new(TileCoord::new(0, 3, 0), 2, 2);
    req.move_near = true;

    let route = finder.find_route(&map, &SimpleReach, &req);

    assert!(route.success);
    assert!(route.alternative);
    assert!(!route.waypoints.is_empty());
}

#[test]
fn walled_destination_without_move_near_fails() {
    let map = walled_destination_map();
    let mut finder = small_finder();
    let mut req = RouteRequest::new(TileCoord::new(0, 3, 0), 2, 2);
    req.move_near = false;

    let route = finder.find_route(&map, &SimpleReach, &req);

    assert!(!route.success);
    assert!(!route.alternative);
    assert!(route.waypoints.is_empty());
}

// ── Size-2 actor refuses a one-tile gap ─────────────────────────────

#[test]
fn size_two_actor_cannot_squeeze_through_a_one_tile_gap() {
    // A wall spans the full map width along z=5 except for a single open
    // column at x=10. A 1x1 actor slips through; no two adjacent columns
    // are ever both open, so a 2x2 actor can never clear the row.
    let mut map = FlatCollisionMap::new(24, 24, 0);
    for x in 0..24 {
        if x != 10 {
            map.set(x, 5, TileFlags::BLOCK_WALK);
        }
    }

    let mut finder = small_finder();
    let mut req = RouteRequest::new(TileCoord::new(10, 2, 0), 10, 8);
    req.src_size = 1;
    let one_wide = finder.find_route(&map, &SimpleReach, &req);
    assert!(one_wide.success, "a 1x1 actor must fit through the single-tile gap");

    let mut finder = small_finder();
    req.src_size = 2;
    req.move_near = false;
    let two_wide = finder.find_route(&map, &SimpleReach, &req);
    assert!(!two_wide.success, "a 2x2 actor must not fit through a 1-tile gap");
}

// ── Diagonal corner-clip rejection ──────────────────────────────────

#[test]
fn diagonal_step_rejected_by_a_destination_corner_wall() {
    // S .
    // . D
    // The destination tile carries a south-west corner wall, so the direct
    // NE diagonal into it is rejected; the actor must detour orthogonally.
    let mut map = FlatCollisionMap::new(20, 20, 0);
    map.insert(6, 6, TileFlags::WALL_SOUTHWEST);

    let mut finder = small_finder();
    let req = RouteRequest::new(TileCoord::new(5, 5, 0), 6, 6);

    let route = finder.find_route(&map, &SimpleReach, &req);

    assert!(route.success);
    // A direct diagonal would produce a single waypoint; the detour must
    // produce at least one intermediate corner.
    assert!(route.waypoints.len() >= 2);
}

#[test]
fn diagonal_step_allowed_when_corner_is_clear() {
    let map = FlatCollisionMap::new(20, 20, 0);
    let mut finder = small_finder();
    let req = RouteRequest::new(TileCoord::new(5, 5, 0), 6, 6);

    let route = finder.find_route(&map, &SimpleReach, &req);

    assert!(route.success);
    assert_eq!(route.waypoints, vec![TileCoord::new(6, 6, 0)]);
}

// ── Strategy variants ───────────────────────────────────────────────

#[test]
fn indoors_strategy_refuses_a_tile_without_a_roof() {
    let map = FlatCollisionMap::new(20, 20, 0);
    let mut finder = small_finder();
    let mut req = RouteRequest::new(TileCoord::new(10, 10, 0), 11, 10);
    req.collision = CollisionStrategy::Indoors;
    req.move_near = false;

    let route = finder.find_route(&map, &SimpleReach, &req);

    assert!(!route.success, "no tile carries ROOF, so Indoors must fail everywhere");
}

#[test]
fn outdoors_strategy_refuses_a_roofed_tile() {
    let mut map = FlatCollisionMap::new(20, 20, 0);
    map.insert(11, 10, TileFlags::ROOF);

    let mut finder = small_finder();
    let mut req = RouteRequest::new(TileCoord::new(10, 10, 0), 11, 10);
    req.collision = CollisionStrategy::Outdoors;
    req.move_near = false;

    let route = finder.find_route(&map, &SimpleReach, &req);

    assert!(!route.success, "the only candidate tile is roofed, so Outdoors must fail");
}

// ── Route-blocker flag family ────────────────────────────────────────

#[test]
fn route_blocker_family_rejects_a_step_an_ordinary_walk_would_take() {
    // A wall built only from the stricter *_ROUTE_BLOCKER bits, never the
    // ordinary WALL_* bits, spanning the full width of the (20-wide) map at
    // z=1: a plain walk search sails straight through it since it never
    // looks at those bits, but a route-blocker search must treat it exactly
    // like a real wall and, with nowhere else in the map to cross, fail.
    let mut map = FlatCollisionMap::new(20, 20, 0);
    for x in 0..20 {
        map.set(x, 1, TileFlags::WALL_SOUTH_ROUTE_BLOCKER | TileFlags::WALL_NORTH_ROUTE_BLOCKER);
    }

    let mut walk_finder = small_finder();
    // Pure NE diagonal so a clear path needs exactly one waypoint.
    let req = RouteRequest::new(TileCoord::new(0, 0, 0), 2, 2);
    let walk_route = walk_finder.find_route(&map, &SimpleReach, &req);
    assert!(walk_route.success);
    assert!(
        !walk_route.alternative,
        "an ordinary walk search ignores route-blocker bits, so it crosses the row directly"
    );
    assert_eq!(
        walk_route.waypoints,
        vec![TileCoord::new(2, 2, 0)],
        "no detour needed: route-blocker bits are invisible to the walk family"
    );

    let mut blocker_finder = RouteFinder::new(RouteFinderConfig {
        search_size: 32,
        ring_buffer_size: 1024,
        use_route_blocker_flags: true,
    });
    let mut blocked_req = req.clone();
    blocked_req.move_near = false;
    let blocker_route = blocker_finder.find_route(&map, &SimpleReach, &blocked_req);
    assert!(
        !blocker_route.success,
        "the route-blocker family must treat the same row as an impassable wall"
    );
}

// ── Determinism / idempotence ───────────────────────────────────────

#[test]
fn identical_calls_produce_identical_routes() {
    let map = walled_destination_map();
    let req = RouteRequest::new(TileCoord::new(0, 3, 0), 2, 2);

    let mut finder_a = small_finder();
    let route_a = finder_a.find_route(&map, &SimpleReach, &req);

    let mut finder_b = small_finder();
    let route_b = finder_b.find_route(&map, &SimpleReach, &req);

    assert_eq!(route_a, route_b);
}

// ── Window confinement ──────────────────────────────────────────────

#[test]
fn waypoints_never_leave_the_search_window() {
    let map = FlatCollisionMap::new(64, 64, 0);
    let mut finder = small_finder();
    let req = RouteRequest::new(TileCoord::new(16, 16, 0), 20, 16);

    let route = finder.find_route(&map, &SimpleReach, &req);

    let half = 32 / 2;
    let (base_x, base_z) = (16 - half, 16 - half);
    for wp in &route.waypoints {
        assert!(wp.x as i32 >= base_x && (wp.x as i32) < base_x + 32);
        assert!(wp.z as i32 >= base_z && (wp.z as i32) < base_z + 32);
    }
}

// ── Waypoint cap ─────────────────────────────────────────────────────

#[test]
fn waypoint_cap_is_respected_on_a_zigzag_path() {
    // Alternating single-tile wall stubs force a new corner waypoint
    // roughly every couple of tiles, comfortably exceeding a small cap.
    let mut map = FlatCollisionMap::new(40, 40, 0);
    for i in 0..15i32 {
        let x = 2 + i * 2;
        if i % 2 == 0 {
            map.set(x, 0, TileFlags::BLOCK_WALK);
        } else {
            map.set(x, 2, TileFlags::BLOCK_WALK);
        }
    }

    let mut finder = RouteFinder::new(RouteFinderConfig {
        search_size: 64,
        ring_buffer_size: 4096,
        use_route_blocker_flags: false,
    });
    let mut req = RouteRequest::new(TileCoord::new(0, 1, 0), 32, 1);
    req.max_waypoints = 3;

    let route = finder.find_route(&map, &SimpleReach, &req);

    assert!(route.waypoints.len() <= 3);
}

// ── Shortest-in-steps (independent brute-force BFS) ─────────────────

/// The single wall bit for a unit step `(dx, dz)` in any of the 8 directions,
/// built straight from the raw flag bits rather than by calling into the
/// crate's own `FlagFamily`: a from-scratch reference so the property test
/// below isn't just checking the production code against itself.
fn reference_wall_bit(dx: i32, dz: i32) -> TileFlags {
    match (dx, dz) {
        (0, 1) => TileFlags::WALL_NORTH,
        (1, 1) => TileFlags::WALL_NORTHEAST,
        (1, 0) => TileFlags::WALL_EAST,
        (1, -1) => TileFlags::WALL_SOUTHEAST,
        (0, -1) => TileFlags::WALL_SOUTH,
        (-1, -1) => TileFlags::WALL_SOUTHWEST,
        (-1, 0) => TileFlags::WALL_WEST,
        (-1, 1) => TileFlags::WALL_NORTHWEST,
        _ => panic!("not a unit step"),
    }
}

/// `BLOCK_<dir>` for a cardinal step `(dx, dz)`.
fn reference_cardinal_mask(dx: i32, dz: i32) -> TileFlags {
    reference_wall_bit(dx, dz) | TileFlags::LOC | TileFlags::BLOCK_WALK
}

/// `BLOCK_<opposite-quadrant-corner>` for a diagonal step `(dx, dz)`, tested
/// against the destination tile per §4.3.2's worked example (a NE step
/// tests `BLOCK_SOUTH_WEST` at the destination, not `BLOCK_NORTH_EAST`).
fn reference_diagonal_corner_mask(dx: i32, dz: i32) -> TileFlags {
    reference_wall_bit(-dx, -dz)
        | TileFlags::LOC
        | TileFlags::BLOCK_WALK
        | reference_cardinal_mask(-dx, 0)
        | reference_cardinal_mask(0, -dz)
}

fn reference_step_allowed(map: &FlatCollisionMap, level: u8, x: i32, z: i32, dx: i32, dz: i32) -> bool {
    let (nx, nz) = (x + dx, z + dz);
    if dx != 0 && dz != 0 {
        let target = map.get(nx, nz, level);
        if !(target & reference_diagonal_corner_mask(dx, dz)).is_empty() {
            return false;
        }
        let horiz = map.get(x + dx, z, level);
        if !(horiz & reference_cardinal_mask(dx, 0)).is_empty() {
            return false;
        }
        let vert = map.get(x, z + dz, level);
        if !(vert & reference_cardinal_mask(0, dz)).is_empty() {
            return false;
        }
        true
    } else {
        let target = map.get(nx, nz, level);
        (target & reference_cardinal_mask(dx, dz)).is_empty()
    }
}

/// Unweighted 8-direction BFS over a bounded region, written independently
/// of `RouteFinder`'s own expansion code, used only to cross-check the
/// shortest-path length it reports.
fn reference_shortest_steps(
    map: &FlatCollisionMap,
    level: u8,
    bound: i32,
    src: (i32, i32),
    dest: (i32, i32),
) -> Option<u32> {
    use std::collections::VecDeque;

    let size = (bound * bound) as usize;
    let idx = |x: i32, z: i32| (z * bound + x) as usize;
    let mut dist = vec![None; size];
    let mut queue = VecDeque::new();
    dist[idx(src.0, src.1)] = Some(0u32);
    queue.push_back(src);

    const STEPS: [(i32, i32); 8] = [
        (-1, 0),
        (1, 0),
        (0, -1),
        (0, 1),
        (1, 1),
        (-1, 1),
        (1, -1),
        (-1, -1),
    ];

    while let Some((x, z)) = queue.pop_front() {
        if (x, z) == dest {
            return dist[idx(x, z)];
        }
        let d = dist[idx(x, z)].unwrap();
        for (dx, dz) in STEPS {
            let (nx, nz) = (x + dx, z + dz);
            if nx < 0 || nz < 0 || nx >= bound || nz >= bound {
                continue;
            }
            if dist[idx(nx, nz)].is_some() {
                continue;
            }
            if !reference_step_allowed(map, level, x, z, dx, dz) {
                continue;
            }
            dist[idx(nx, nz)] = Some(d + 1);
            queue.push_back((nx, nz));
        }
    }
    dist[idx(dest.0, dest.1)]
}

/// Sums the per-segment Chebyshev distance across a route's waypoints
/// (each segment is a straight run in one of the 8 directions, so its step
/// count equals `max(|dx|, |dz|)`), giving the total number of BFS steps
/// the reconstructed path represents.
fn route_step_count(src: (i32, i32), waypoints: &[TileCoord]) -> u32 {
    let mut total = 0u32;
    let (mut px, mut pz) = src;
    for wp in waypoints {
        let dx = (wp.x as i32 - px).unsigned_abs();
        let dz = (wp.z as i32 - pz).unsigned_abs();
        total += dx.max(dz);
        px = wp.x as i32;
        pz = wp.z as i32;
    }
    total
}

#[test]
fn route_length_matches_an_independent_brute_force_shortest_path() {
    let mut map = FlatCollisionMap::new(24, 24, 0);
    // A handful of scattered obstacles between source and destination,
    // including a stub that forces at least one detour.
    for (x, z) in [(5, 5), (5, 6), (6, 5), (10, 2), (10, 3), (10, 4)] {
        map.set(x, z, TileFlags::BLOCK_WALK);
    }

    let mut finder = small_finder();
    let src = TileCoord::new(1, 1, 0);
    let mut req = RouteRequest::new(src, 14, 8);
    req.move_near = false;

    let route = finder.find_route(&map, &SimpleReach, &req);
    assert!(route.success, "destination must be reachable for this grid");

    let expected = reference_shortest_steps(&map, 0, 24, (1, 1), (14, 8))
        .expect("brute-force reference must also find the destination reachable");
    let actual = route_step_count((1, 1), &route.waypoints);

    assert_eq!(
        actual, expected,
        "RouteFinder's step count must match the independently computed shortest path"
    );
}
