//! The BFS route-finding engine.
//!
//! One `RouteFinder` instance owns a fixed-size search window (direction
//! grid, distance grid, frontier ring buffer) that is reset and reused on
//! every `find_route` call. Instances are not `Sync`/shareable across
//! threads performing concurrent searches — callers keep a pool, one
//! instance per worker, as described in the crate's concurrency notes.

use std::collections::VecDeque;

use crate::coord::{TileCoord, MAX_ORDINATE};
use crate::direction::{dirbits, step_reverse, Direction};
use crate::flags::FlagFamily;
use crate::map::CollisionFlagMap;
use crate::reach::{LocAngle, ReachQuery, ReachStrategy, NO_SHAPE};
use crate::route::Route;
use crate::strategy::CollisionStrategy;

const DISTANCE_SENTINEL: u32 = 99_999_999;
const APPROACH_RANGE: i32 = 10;
const APPROACH_SEEK: u32 = 100;
const APPROACH_LOWEST: i64 = 1000;

/// Constructor-time options for a [`RouteFinder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteFinderConfig {
    /// Edge length, in tiles, of the BFS search window. Must be positive
    /// and even (the source sits exactly at its center).
    pub search_size: i32,
    /// Frontier ring capacity. Must be a power of two.
    pub ring_buffer_size: usize,
    /// Selects the `*_ROUTE_BLOCKER` flag family in every expansion.
    pub use_route_blocker_flags: bool,
}

impl Default for RouteFinderConfig {
    fn default() -> Self {
        RouteFinderConfig {
            search_size: 128,
            ring_buffer_size: 4096,
            use_route_blocker_flags: false,
        }
    }
}

impl RouteFinderConfig {
    fn validate(&self) {
        assert!(
            self.search_size > 0 && self.search_size % 2 == 0,
            "search_size must be a positive even number, got {}",
            self.search_size
        );
        assert!(
            self.ring_buffer_size.is_power_of_two(),
            "ring_buffer_size must be a power of two, got {}",
            self.ring_buffer_size
        );
    }
}

/// A single `find_route` call's parameters. Construct with [`RouteRequest::new`]
/// and override only the fields that differ from the spec's defaults.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub src: TileCoord,
    pub dest_x: u16,
    pub dest_z: u16,
    pub src_size: u16,
    pub dest_width: u16,
    pub dest_length: u16,
    pub loc_angle: u8,
    pub loc_shape: i8,
    pub move_near: bool,
    pub block_access_flags: u8,
    pub max_waypoints: usize,
    pub collision: CollisionStrategy,
}

impl RouteRequest {
    pub fn new(src: TileCoord, dest_x: u16, dest_z: u16) -> Self {
        RouteRequest {
            src,
            dest_x,
            dest_z,
            src_size: 1,
            dest_width: 1,
            dest_length: 1,
            loc_angle: 0,
            loc_shape: NO_SHAPE,
            move_near: true,
            block_access_flags: 0,
            max_waypoints: 25,
            collision: CollisionStrategy::Normal,
        }
    }

    fn validate(&self) {
        assert!(self.dest_x <= MAX_ORDINATE, "dest_x out of range");
        assert!(self.dest_z <= MAX_ORDINATE, "dest_z out of range");
        assert!(self.src_size >= 1, "src_size must be >= 1");
        assert!(self.dest_width >= 1, "dest_width must be >= 1");
        assert!(self.dest_length >= 1, "dest_length must be >= 1");
        assert!(self.max_waypoints >= 1, "max_waypoints must be >= 1");
    }
}

/// The BFS engine. Owns all of its working storage; reset at the start of
/// every [`RouteFinder::find_route`] call.
pub struct RouteFinder {
    config: RouteFinderConfig,
    directions: Vec<u8>,
    distances: Vec<u32>,
    ring_x: Vec<i32>,
    ring_z: Vec<i32>,
    read_idx: usize,
    write_idx: usize,
    curr_x: i32,
    curr_z: i32,
    base_x: i32,
    base_z: i32,
}

impl RouteFinder {
    pub fn new(config: RouteFinderConfig) -> Self {
        config.validate();
        let cells = (config.search_size * config.search_size) as usize;
        log::debug!(
            "constructing RouteFinder search_size={} ring_buffer_size={} use_route_blocker_flags={}",
            config.search_size,
            config.ring_buffer_size,
            config.use_route_blocker_flags
        );
        RouteFinder {
            directions: vec![0; cells],
            distances: vec![DISTANCE_SENTINEL; cells],
            ring_x: vec![0; config.ring_buffer_size],
            ring_z: vec![0; config.ring_buffer_size],
            read_idx: 0,
            write_idx: 0,
            curr_x: 0,
            curr_z: 0,
            base_x: 0,
            base_z: 0,
            config,
        }
    }

    fn reset(&mut self) {
        for d in &mut self.directions {
            *d = 0;
        }
        for d in &mut self.distances {
            *d = DISTANCE_SENTINEL;
        }
        self.read_idx = 0;
        self.write_idx = 0;
    }

    fn index(&self, x: i32, z: i32) -> usize {
        (z * self.config.search_size + x) as usize
    }

    fn in_window(&self, x: i32, z: i32) -> bool {
        x >= 0 && x < self.config.search_size && z >= 0 && z < self.config.search_size
    }

    fn enqueue(&mut self, x: i32, z: i32) {
        let mask = self.config.ring_buffer_size - 1;
        self.ring_x[self.write_idx] = x;
        self.ring_z[self.write_idx] = z;
        self.write_idx = (self.write_idx + 1) & mask;
    }

    fn dequeue(&mut self) -> (i32, i32) {
        let mask = self.config.ring_buffer_size - 1;
        let x = self.ring_x[self.read_idx];
        let z = self.ring_z[self.read_idx];
        self.read_idx = (self.read_idx + 1) & mask;
        (x, z)
    }

    fn family(&self) -> FlagFamily {
        if self.config.use_route_blocker_flags {
            FlagFamily::RouteBlocker
        } else {
            FlagFamily::Walk
        }
    }

    /// Tests every tile a cardinal step of `size` must keep clear, sweeping
    /// the leading edge perpendicular to `travel`. `size == 1` falls back to
    /// the single-direction mask from the spec's worked example.
    ///
    /// `anchor` is the actor's south-west footprint corner; the footprint
    /// spans `[anchor, anchor+size-1]` on each axis. The edge newly entered
    /// by a step depends on which side of the footprint `anchor` already
    /// sits on: stepping south/west, `anchor` is already the leading corner
    /// so the new edge is one tile beyond it; stepping north/east, `anchor`
    /// is the *trailing* corner, so the new edge is a full `size` beyond it
    /// (one past the footprint's far side), not just one tile.
    fn cardinal_step_allowed<M: CollisionFlagMap>(
        &self,
        map: &M,
        level: u8,
        family: FlagFamily,
        collision: CollisionStrategy,
        travel: Direction,
        size: i32,
        anchor_x: i32,
        anchor_z: i32,
    ) -> bool {
        let (dx, dz) = travel.delta();
        let (orth_low, orth_high) = perpendicular_axis(travel);
        let (hdx, hdz) = orth_high.delta();
        let edge_dx = if dx < 0 { dx } else { dx * size };
        let edge_dz = if dz < 0 { dz } else { dz * size };

        for k in 0..size {
            let ox = anchor_x + edge_dx + hdx * k;
            let oz = anchor_z + edge_dz + hdz * k;
            if !self.in_window(ox, oz) {
                return false;
            }
            let mask = if size == 1 {
                family.corner_mask(travel)
            } else if k == 0 {
                family.corner_mask(combine(travel, orth_low))
            } else if k == size - 1 {
                family.corner_mask(combine(travel, orth_high))
            } else {
                family.triple_mask(travel, orth_low, orth_high)
            };
            let tile = map.get(self.base_x + ox, self.base_z + oz, level);
            if !collision.can_move(tile, mask) {
                return false;
            }
        }
        true
    }

    /// A diagonal step reduces to its two cardinal components (the
    /// corner-cut guard, generalised to `size`) plus a check that the new
    /// leading corner tile itself is clear.
    #[allow(clippy::too_many_arguments)]
    fn diagonal_step_allowed<M: CollisionFlagMap>(
        &self,
        map: &M,
        level: u8,
        family: FlagFamily,
        collision: CollisionStrategy,
        travel: Direction,
        size: i32,
        anchor_x: i32,
        anchor_z: i32,
    ) -> bool {
        let (ca, cb) = travel
            .cardinal_components()
            .expect("diagonal_step_allowed called with a cardinal direction");

        if !self.cardinal_step_allowed(map, level, family, collision, ca, size, anchor_x, anchor_z)
        {
            return false;
        }
        if !self.cardinal_step_allowed(map, level, family, collision, cb, size, anchor_x, anchor_z)
        {
            return false;
        }

        let (dx, dz) = travel.delta();
        let new_anchor_x = anchor_x + dx;
        let new_anchor_z = anchor_z + dz;
        let corner_x = if dx > 0 {
            new_anchor_x + size - 1
        } else {
            new_anchor_x
        };
        let corner_z = if dz > 0 {
            new_anchor_z + size - 1
        } else {
            new_anchor_z
        };
        if !self.in_window(new_anchor_x, new_anchor_z) || !self.in_window(corner_x, corner_z) {
            return false;
        }
        let tile = map.get(self.base_x + corner_x, self.base_z + corner_z, level);
        collision.can_move(tile, family.corner_mask(travel.opposite()))
    }

    fn try_step<M: CollisionFlagMap>(
        &self,
        map: &M,
        level: u8,
        family: FlagFamily,
        collision: CollisionStrategy,
        size: i32,
        dir: Direction,
    ) -> Option<(i32, i32)> {
        let (dx, dz) = dir.delta();
        let new_x = self.curr_x + dx;
        let new_z = self.curr_z + dz;
        if !self.in_window(new_x, new_z) {
            return None;
        }
        let allowed = if dir.is_diagonal() {
            self.diagonal_step_allowed(
                map,
                level,
                family,
                collision,
                dir,
                size,
                self.curr_x,
                self.curr_z,
            )
        } else {
            self.cardinal_step_allowed(
                map,
                level,
                family,
                collision,
                dir,
                size,
                self.curr_x,
                self.curr_z,
            )
        };
        if allowed {
            Some((new_x, new_z))
        } else {
            None
        }
    }

    /// Runs a single `findRoute` call end-to-end: reset, BFS, optional
    /// closest-approach fallback, reconstruction.
    pub fn find_route<M: CollisionFlagMap, R: ReachStrategy>(
        &mut self,
        map: &M,
        reach: &R,
        req: &RouteRequest,
    ) -> Route {
        req.validate();
        self.reset();

        let size = self.config.search_size;
        self.base_x = req.src.x as i32 - size / 2;
        self.base_z = req.src.z as i32 - size / 2;
        let local_src = size / 2;

        let src_idx = self.index(local_src, local_src);
        self.directions[src_idx] = dirbits::SOURCE_SENTINEL;
        self.distances[src_idx] = 0;
        self.enqueue(local_src, local_src);

        let family = self.family();
        let level = req.src.level;
        let loc_angle = LocAngle::from_index(req.loc_angle);

        let mut terminal = None;
        while self.read_idx != self.write_idx {
            let (cx, cz) = self.dequeue();
            self.curr_x = cx;
            self.curr_z = cz;

            let abs_x = self.base_x + cx;
            let abs_z = self.base_z + cz;
            let flags = map.get(abs_x, abs_z, level);

            let query = ReachQuery {
                flags,
                level,
                src_x: abs_x,
                src_z: abs_z,
                dest_x: req.dest_x as i32,
                dest_z: req.dest_z as i32,
                dest_width: req.dest_width,
                dest_length: req.dest_length,
                src_size: req.src_size,
                loc_angle,
                loc_shape: req.loc_shape,
                block_access_flags: req.block_access_flags,
            };
            if reach.reached(&query) {
                terminal = Some((cx, cz));
                break;
            }

            let cur_dist = self.distances[self.index(cx, cz)];
            for dir in Direction::EXPANSION_ORDER {
                if let Some((nx, nz)) =
                    self.try_step(map, level, family, req.collision, req.src_size as i32, dir)
                {
                    let nidx = self.index(nx, nz);
                    if self.directions[nidx] == 0 {
                        self.directions[nidx] = dir.bits();
                        self.distances[nidx] = cur_dist + 1;
                        self.enqueue(nx, nz);
                    }
                }
            }
        }

        match terminal {
            Some((cx, cz)) => self.reconstruct(cx, cz, local_src, req.max_waypoints, level, false),
            None if req.move_near => match self.find_approach(req) {
                Some((cx, cz)) => {
                    self.reconstruct(cx, cz, local_src, req.max_waypoints, level, true)
                }
                None => Route::failed(),
            },
            None => Route::failed(),
        }
    }

    /// Scans the visited cells around the rotated target footprint for the
    /// closest reachable approach point (§4.4).
    fn find_approach(&self, req: &RouteRequest) -> Option<(i32, i32)> {
        let (w, l) = LocAngle::from_index(req.loc_angle)
            .rotate_dims(req.dest_width, req.dest_length);
        let dest_x = req.dest_x as i32;
        let dest_z = req.dest_z as i32;
        let tx0 = dest_x;
        let tx1 = dest_x + w as i32 - 1;
        let tz0 = dest_z;
        let tz1 = dest_z + l as i32 - 1;

        let scan_x0 = tx0 - APPROACH_RANGE;
        let scan_x1 = tx1 + APPROACH_RANGE;
        let scan_z0 = tz0 - APPROACH_RANGE;
        let scan_z1 = tz1 + APPROACH_RANGE;

        let mut best: Option<(i32, i32)> = None;
        let mut best_cost: i64 = APPROACH_LOWEST;
        let mut best_dist: u32 = u32::MAX;

        for abs_x in scan_x0..=scan_x1 {
            let lx = abs_x - self.base_x;
            if lx < 0 || lx >= self.config.search_size {
                continue;
            }
            for abs_z in scan_z0..=scan_z1 {
                let lz = abs_z - self.base_z;
                if lz < 0 || lz >= self.config.search_size {
                    continue;
                }
                let dist = self.distances[self.index(lx, lz)];
                if dist >= APPROACH_SEEK {
                    continue;
                }

                let dx = if abs_x < tx0 {
                    tx0 - abs_x
                } else if abs_x > tx1 {
                    abs_x - tx1
                } else {
                    0
                };
                let dz = if abs_z < tz0 {
                    tz0 - abs_z
                } else if abs_z > tz1 {
                    abs_z - tz1
                } else {
                    0
                };
                let cost = (dx as i64) * (dx as i64) + (dz as i64) * (dz as i64);

                let improves = match best {
                    None => cost < best_cost,
                    Some(_) => cost < best_cost || (cost == best_cost && dist < best_dist),
                };
                if improves {
                    best_cost = cost;
                    best_dist = dist;
                    best = Some((lx, lz));
                }
            }
        }

        best
    }

    /// Walks the direction grid backward from the terminal cell to the
    /// source, emitting one waypoint per straight segment. When the
    /// waypoint budget is exhausted, the destination-side entry is dropped
    /// to make room for the next (source-side) one — see the crate's design
    /// notes for why this surprising order is intentional.
    ///
    /// A terminal cell that *is* the source (the reach predicate already
    /// satisfied at the seed, or an approach scan that picked the source
    /// itself) still needs a waypoint: §4.2 guarantees the last waypoint of
    /// any non-failed route is the reached/approach cell, so the source's
    /// own coordinate is emitted as the sole entry in that case.
    fn reconstruct(
        &self,
        term_x: i32,
        term_z: i32,
        local_src: i32,
        max_waypoints: usize,
        level: u8,
        alternative: bool,
    ) -> Route {
        let mut waypoints: VecDeque<TileCoord> = VecDeque::new();
        let mut cx = term_x;
        let mut cz = term_z;
        let mut last_dir: u8 = 0xFF;

        if cx == local_src && cz == local_src {
            waypoints.push_front(TileCoord::new(
                (self.base_x + cx) as u16,
                (self.base_z + cz) as u16,
                level,
            ));
        }

        while !(cx == local_src && cz == local_src) {
            let dir = self.directions[self.index(cx, cz)];
            if dir != last_dir {
                if waypoints.len() >= max_waypoints {
                    waypoints.pop_back();
                }
                let abs_x = self.base_x + cx;
                let abs_z = self.base_z + cz;
                debug_assert!(abs_x >= 0 && abs_z >= 0, "waypoint fell outside the world");
                waypoints.push_front(TileCoord::new(abs_x as u16, abs_z as u16, level));
                last_dir = dir;
            }
            step_reverse(dir, &mut cx, &mut cz);
        }

        let waypoints: Vec<TileCoord> = waypoints.into_iter().collect();
        if alternative {
            Route::approached(waypoints)
        } else {
            Route::reached(waypoints)
        }
    }
}

/// The two directions perpendicular to a cardinal travel direction, ordered
/// `(low, high)` along that perpendicular axis (low = the axis's origin
/// side, matching a footprint anchored at its south-west corner).
fn perpendicular_axis(travel: Direction) -> (Direction, Direction) {
    match travel {
        Direction::East | Direction::West => (Direction::South, Direction::North),
        Direction::North | Direction::South => (Direction::West, Direction::East),
        _ => panic!("perpendicular_axis called with a diagonal direction"),
    }
}

/// The diagonal direction formed by combining a cardinal travel direction
/// with one of its perpendiculars, e.g. `combine(West, South) == SouthWest`.
fn combine(main: Direction, orth: Direction) -> Direction {
    use Direction::*;
    match (main, orth) {
        (West, North) | (North, West) => NorthWest,
        (West, South) | (South, West) => SouthWest,
        (East, North) | (North, East) => NorthEast,
        (East, South) | (South, East) => SouthEast,
        _ => panic!("combine called with non-perpendicular directions {main:?}/{orth:?}"),
    }
}
