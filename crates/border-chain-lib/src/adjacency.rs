//! Adjacency graph construction from polygon boundary data
//!
//! Two regions are adjacent when they share at least one boundary edge.
//! Sharing is detected by keying every ring edge on its quantized endpoints:
//! two independently-specified polygons that describe the same physical
//! border produce the same edge keys, without any computational-geometry
//! intersection test.

use crate::catalog::{Region, RegionCatalog, RegionId};
use geo::Coord;
use rayon::prelude::*;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Coordinates are rounded to five decimal places (about a meter at the
/// equator) before keying. Boundary polygons of neighboring regions rarely
/// agree bit-for-bit; quantization makes their shared edges coincide.
const QUANTIZE_SCALE: f64 = 1e5;

/// Quantized coordinate pair identifying a graph vertex.
type PointKey = (i64, i64);

/// Direction- and region-independent identifier for a boundary segment:
/// the two endpoint keys with the smaller one first.
type EdgeKey = (PointKey, PointKey);

/// Region ids owning an edge. Almost always exactly two for a real border.
type EdgeOwners = SmallVec<[RegionId; 2]>;

/// Symmetric region adjacency derived from shared boundary edges.
///
/// Built once after catalog load and immutable thereafter. Every catalog
/// region has an entry (possibly empty); there are no self-loops. Neighbor
/// lists are kept sorted by id, so iteration order, and therefore
/// shortest-path tie-breaking, is deterministic for a given catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    neighbors: Vec<SmallVec<[RegionId; 8]>>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl AdjacencyGraph {
    /// Build the adjacency graph for the whole catalog.
    ///
    /// Malformed polygon points (wrong arity, non-finite coordinates) are
    /// skipped edge by edge and logged; they degrade connectivity instead of
    /// failing the build. A region whose polygons are entirely malformed
    /// simply ends up isolated.
    pub fn build(catalog: &RegionCatalog) -> Self {
        #[cfg(feature = "profiling")]
        profiling::scope!("adjacency::build");

        let owners = merge_edge_owners(
            catalog
                .regions()
                .iter()
                .map(|region| (region.id(), region_edge_keys(region))),
        );
        Self::link_shared_edges(catalog.len(), owners)
    }

    /// Build the adjacency graph with per-region edge extraction fanned out
    /// across threads.
    ///
    /// The merge stays sequential, so the result is identical to [`build`]
    /// for the same catalog.
    ///
    /// [`build`]: AdjacencyGraph::build
    pub fn build_parallel(catalog: &RegionCatalog) -> Self {
        #[cfg(feature = "profiling")]
        profiling::scope!("adjacency::build_parallel");

        let extracted: Vec<(RegionId, Vec<EdgeKey>)> = catalog
            .regions()
            .par_iter()
            .map(|region| (region.id(), region_edge_keys(region)))
            .collect();
        let owners = merge_edge_owners(extracted);
        Self::link_shared_edges(catalog.len(), owners)
    }

    /// Link every pair of regions that own a common edge key.
    fn link_shared_edges(region_count: usize, owners: HashMap<EdgeKey, EdgeOwners>) -> Self {
        let mut neighbors = vec![SmallVec::new(); region_count];

        for ids in owners.into_values() {
            // A border edge is normally shared by exactly two regions, but
            // the data is not trusted to guarantee that.
            if ids.len() < 2 {
                continue;
            }
            for left in 0..ids.len() {
                for right in (left + 1)..ids.len() {
                    insert_sorted(&mut neighbors[ids[left]], ids[right]);
                    insert_sorted(&mut neighbors[ids[right]], ids[left]);
                }
            }
        }

        let graph = Self { neighbors };
        tracing::debug!(
            "adjacency graph built: {} regions, {} links",
            graph.region_count(),
            graph.edge_count()
        );
        graph
    }

    /// Number of regions the graph was built over.
    #[inline]
    pub fn region_count(&self) -> usize {
        self.neighbors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Neighbors of `id` in ascending id order.
    ///
    /// Ids outside the catalog get an empty slice, not an error.
    #[inline]
    pub fn neighbors(&self, id: RegionId) -> &[RegionId] {
        self.neighbors.get(id).map_or(&[], |ids| ids.as_slice())
    }

    #[inline]
    pub fn are_adjacent(&self, a: RegionId, b: RegionId) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Number of undirected adjacency links.
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(SmallVec::len).sum::<usize>() / 2
    }
}

/// Edge keys of every valid ring edge of one region, ring closure included.
fn region_edge_keys(region: &Region) -> Vec<EdgeKey> {
    let mut keys = Vec::new();

    for ring in region.polygons() {
        if ring.len() < 2 {
            continue;
        }
        for index in 0..ring.len() {
            let a = checked_coord(&ring[index]);
            let b = checked_coord(&ring[(index + 1) % ring.len()]);
            let (Some(a), Some(b)) = (a, b) else {
                tracing::warn!(
                    "region {}: skipping ring edge with malformed point",
                    region.id()
                );
                continue;
            };
            if let Some(key) = edge_key(a, b) {
                keys.push(key);
            }
        }
    }

    keys
}

/// Collect edge owners, each region counted at most once per edge however
/// many of its rings trace it.
fn merge_edge_owners<I>(extracted: I) -> HashMap<EdgeKey, EdgeOwners>
where
    I: IntoIterator<Item = (RegionId, Vec<EdgeKey>)>,
{
    let mut owners: HashMap<EdgeKey, EdgeOwners> = HashMap::new();
    for (id, keys) in extracted {
        for key in keys {
            let ids = owners.entry(key).or_default();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    owners
}

/// Validate a raw polygon point: at least two finite components.
#[inline]
fn checked_coord(point: &[f64]) -> Option<Coord<f64>> {
    match *point {
        [x, y, ..] if x.is_finite() && y.is_finite() => Some(Coord { x, y }),
        _ => None,
    }
}

#[inline]
fn quantize(value: f64) -> i64 {
    (value * QUANTIZE_SCALE).round() as i64
}

#[inline]
fn point_key(coord: Coord<f64>) -> PointKey {
    (quantize(coord.x), quantize(coord.y))
}

/// Key for the edge `a`-`b`, or `None` when both endpoints quantize to the
/// same vertex. Zero-length edges arise from explicitly closed rings and
/// from repeated points; keeping them would turn a shared corner point into
/// a shared border.
#[inline]
fn edge_key(a: Coord<f64>, b: Coord<f64>) -> Option<EdgeKey> {
    let (p, q) = (point_key(a), point_key(b));
    match p.cmp(&q) {
        std::cmp::Ordering::Less => Some((p, q)),
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Greater => Some((q, p)),
    }
}

#[inline]
fn insert_sorted(ids: &mut SmallVec<[RegionId; 8]>, id: RegionId) {
    if let Err(position) = ids.binary_search(&id) {
        ids.insert(position, id);
    }
}
