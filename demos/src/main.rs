//! Minimal end-to-end example: build a small collision map, initialize
//! logging the way a real host process would, and run one route.

use std::process;

use routefinder::{
    CollisionStrategy, FlatCollisionMap, RouteFinder, RouteFinderConfig, RouteRequest, SimpleReach,
    TileCoord, TileFlags,
};

fn main() {
    engine_core::initialize_logger(log::LevelFilter::Info, None).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logger: {}. Exiting.", e);
        process::exit(1);
    });

    log::info!("routefinder demo starting");

    let mut map = FlatCollisionMap::new(32, 32, 0);
    for z in 5..10 {
        map.set(10, z, TileFlags::BLOCK_WALK);
    }

    let mut finder = RouteFinder::new(RouteFinderConfig::default());
    let mut request = RouteRequest::new(TileCoord::new(5, 7, 0), 15, 7);
    request.collision = CollisionStrategy::Normal;

    let route = finder.find_route(&map, &SimpleReach, &request);

    if route.success {
        log::info!(
            "route found ({} waypoints, alternative={})",
            route.waypoints.len(),
            route.alternative
        );
        for wp in &route.waypoints {
            log::info!("  -> ({}, {}, {})", wp.x, wp.z, wp.level);
        }
    } else {
        log::warn!("no route found");
    }
}
