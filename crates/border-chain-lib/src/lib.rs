//! Border Chain - Region Graph and Path Engine
//!
//! This library derives a region-adjacency graph from raw polygon boundary
//! data and answers shortest-path queries over it. It is the engine behind a
//! geography-guessing game in which a player connects a start region to a
//! target region by naming the regions in between.
//!
//! # Architecture
//!
//! - **[`RegionCatalog`]**: Immutable region storage with name-based lookup
//! - **[`AdjacencyGraph`]**: Symmetric adjacency derived from shared boundary edges
//! - **[`shortest_path`]**: Breadth-first search, optionally restricted to an allowed subset
//! - **[`pick_challenge`]**: Start/target selection with graceful degradation
//! - **[`GameSession`]**: Immutable per-game state with guess grading
//!
//! # Performance Characteristics
//!
//! - **Build Time**: O(P) over all polygon points, parallelizable per region
//! - **Query Time**: O(R + E) worst case for R regions and E adjacency links
//! - **Memory**: O(R + E) for the graph; queries allocate only local search state

mod adjacency;
mod catalog;
mod challenge;
mod pathfind;
mod session;

// Public API exports
pub use adjacency::AdjacencyGraph;
pub use catalog::{Region, RegionCatalog, RegionEntry, RegionId, Ring, normalize_for_search};
pub use challenge::{Challenge, pick_challenge};
pub use pathfind::shortest_path;
pub use session::{GameReport, GameSession, GuessOutcome};

/// Error types for the game engine
///
/// Malformed geometry never errors: bad polygon points degrade connectivity
/// instead of aborting (regions without valid edges end up isolated).
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("region catalog is empty")]
    EmptyCatalog,
}

pub type Result<T> = std::result::Result<T, GameError>;
