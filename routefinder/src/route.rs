//! The finder's output structure.

use crate::coord::TileCoord;

/// The result of a `find_route` call.
///
/// A canonical failure is `Route { waypoints: vec![], success: false,
/// alternative: false }` — use [`Route::failed`] to build it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
    /// Waypoints in travel order: index 0 is nearest the source, the last
    /// entry is the reached (or closest-approach) cell.
    pub waypoints: Vec<TileCoord>,
    /// `true` iff a path was produced at all.
    pub success: bool,
    /// `true` iff the route stops at a closest-approach point rather than a
    /// cell where the target was actually reached.
    pub alternative: bool,
}

impl Route {
    pub fn failed() -> Self {
        Route {
            waypoints: Vec::new(),
            success: false,
            alternative: false,
        }
    }

    pub fn reached(waypoints: Vec<TileCoord>) -> Self {
        Route {
            waypoints,
            success: true,
            alternative: false,
        }
    }

    pub fn approached(waypoints: Vec<TileCoord>) -> Self {
        Route {
            waypoints,
            success: true,
            alternative: true,
        }
    }
}
