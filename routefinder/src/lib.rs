//! Tile-grid BFS route finder for a 2.5D game world.
//!
//! [`finder::RouteFinder`] is the entry point: construct one per worker
//! (see the module docs for why instances are not shareable across
//! threads), then call [`finder::RouteFinder::find_route`] with a
//! [`map::CollisionFlagMap`] and a [`reach::ReachStrategy`] once per
//! movement tick.

pub mod coord;
pub mod direction;
pub mod finder;
pub mod flags;
pub mod map;
pub mod naive;
pub mod reach;
pub mod route;
pub mod strategy;

pub use coord::TileCoord;
pub use finder::{RouteFinder, RouteFinderConfig, RouteRequest};
pub use flags::TileFlags;
pub use map::{CollisionFlagMap, FlatCollisionMap};
pub use reach::{LocAngle, ReachQuery, ReachStrategy, SimpleReach, NO_SHAPE};
pub use route::Route;
pub use strategy::CollisionStrategy;
