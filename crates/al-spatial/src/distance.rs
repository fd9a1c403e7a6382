//! Distance model: a dense symmetric matrix over hub + spokes.
//!
//! # Data layout
//!
//! Nodes are numbered with the hub first (`NodeRef::node_index`):
//!
//! ```text
//! node 0      = hub
//! node i + 1  = spoke i
//! ```
//!
//! The matrix is row-major, `n × n` with `n = spoke_count + 1`, so a lookup
//! is a single multiply-add.  Layouts are small (tens of nodes), so the dense
//! form costs nothing and avoids any hashing on the dispatch hot path.
//!
//! # Normalizer
//!
//! `normalized_distance` divides by the 90th percentile of every off-diagonal
//! entry (both directions), taken as `sorted[floor(0.9 × len)]`.  Scores then
//! compare across layouts of any size: a typical hop sits in `[0, ~1]`.

use al_core::{LayoutSpec, NodeRef, Point, SpokeId};

use crate::{SpatialError, SpatialResult};

/// Percentile used for the automatic normalizer.
const NORMALIZER_PERCENTILE: f64 = 0.9;

/// Static pairwise distances between hub and spokes.
///
/// Immutable after construction.  Build with [`DistanceModel::build`] or
/// [`DistanceModel::from_layout`].
#[derive(Clone, Debug)]
pub struct DistanceModel {
    positions: Vec<Point>,
    matrix: Vec<f64>,
    normalizer: f64,
}

impl DistanceModel {
    /// Compute the matrix from node positions.
    ///
    /// `normalizer_override` replaces the percentile normalizer when set.
    /// Fails on non-finite positions and when the normalizer is not positive
    /// (every pair at distance zero, or too few distinct positions).
    pub fn build(
        hub: Point,
        spokes: &[Point],
        normalizer_override: Option<f64>,
    ) -> SpatialResult<Self> {
        let mut positions = Vec::with_capacity(spokes.len() + 1);
        positions.push(hub);
        positions.extend_from_slice(spokes);

        for (i, p) in positions.iter().enumerate() {
            if !p.is_finite() {
                return Err(SpatialError::NonFinite(node_ref(i)));
            }
        }

        let n = positions.len();
        let mut matrix = vec![0.0; n * n];
        let mut off_diagonal = Vec::with_capacity(n * n.saturating_sub(1));
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = positions[i].distance(positions[j]);
                matrix[i * n + j] = d;
                off_diagonal.push(d);
            }
        }

        let normalizer = match normalizer_override {
            Some(v) => v,
            None => percentile(&mut off_diagonal, NORMALIZER_PERCENTILE),
        };
        if !(normalizer.is_finite() && normalizer > 0.0) {
            return Err(SpatialError::Degenerate(normalizer));
        }

        Ok(Self { positions, matrix, normalizer })
    }

    /// Build from a configured layout.
    pub fn from_layout(layout: &LayoutSpec, normalizer_override: Option<f64>) -> SpatialResult<Self> {
        let (hub, spokes) = layout.positions();
        Self::build(hub, &spokes, normalizer_override)
    }

    /// Number of nodes including the hub.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn spoke_count(&self) -> usize {
        self.positions.len() - 1
    }

    /// Iterator over all spoke ids in ascending order.
    pub fn spokes(&self) -> impl Iterator<Item = SpokeId> + '_ {
        (0..self.spoke_count() as u32).map(SpokeId)
    }

    #[inline]
    pub fn contains(&self, node: NodeRef) -> bool {
        node.node_index() < self.positions.len()
    }

    /// Fallible position lookup.
    pub fn try_position(&self, node: NodeRef) -> SpatialResult<Point> {
        self.positions
            .get(node.node_index())
            .copied()
            .ok_or(SpatialError::NodeNotFound(node))
    }

    /// Position of `node`.  Unknown nodes map to the hub position; callers
    /// that cannot guarantee validity use [`try_position`](Self::try_position).
    #[inline]
    pub fn position(&self, node: NodeRef) -> Point {
        self.positions.get(node.node_index()).copied().unwrap_or(self.positions[0])
    }

    /// Distance between two nodes in layout units.  Unknown nodes are
    /// treated as infinitely far away so they never win a comparison.
    #[inline]
    pub fn distance(&self, a: NodeRef, b: NodeRef) -> f64 {
        let n = self.positions.len();
        let (i, j) = (a.node_index(), b.node_index());
        if i >= n || j >= n {
            return f64::INFINITY;
        }
        self.matrix[i * n + j]
    }

    /// `distance(a, b) / normalizer`.
    #[inline]
    pub fn normalized_distance(&self, a: NodeRef, b: NodeRef) -> f64 {
        self.distance(a, b) / self.normalizer
    }

    #[inline]
    pub fn normalizer(&self) -> f64 {
        self.normalizer
    }

    /// Total distance of a route visiting `stops` in order.
    pub fn route_length(&self, stops: &[NodeRef]) -> f64 {
        stops.windows(2).map(|w| self.distance(w[0], w[1])).sum()
    }
}

#[inline]
fn node_ref(index: usize) -> NodeRef {
    if index == 0 {
        NodeRef::Hub
    } else {
        NodeRef::Spoke(SpokeId(index as u32 - 1))
    }
}

/// `sorted[floor(p × len)]`, clamped to the last element.  Zero for an
/// empty slice.
fn percentile(values: &mut [f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let idx = ((p * values.len() as f64) as usize).min(values.len() - 1);
    values[idx]
}
