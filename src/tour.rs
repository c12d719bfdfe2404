//! Nearest-neighbour tour construction.
//!
//! Starts at the active stop (or the first stop when none is active) and
//! repeatedly drives to the closest unvisited stop. Equidistant candidates
//! resolve to the one that appears first in the input, so the same input
//! always yields the same tour.
//!
//! The greedy tour is not distance-optimal; it can leave a long final leg.
//! That is accepted for crews with a few dozen stops and is left as is.

use crate::haversine::HaversineMatrix;
use crate::traits::DistanceMatrixProvider;
use crate::types::Stop;

/// A visiting order together with the matrix it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    /// Indices into the input stops, in visiting order.
    pub order: Vec<usize>,
    /// Pairwise miles, indexed like the input stops.
    pub matrix: Vec<Vec<f64>>,
}

impl Tour {
    /// Miles driven to reach the stop at tour position `position`; 0 for the first.
    pub fn leg_miles(&self, position: usize) -> f64 {
        match position.checked_sub(1) {
            Some(previous) => self.matrix[self.order[previous]][self.order[position]],
            None => 0.0,
        }
    }
}

/// Index of the stop the tour starts from: the first active stop, else the first stop.
pub fn start_index(stops: &[Stop]) -> usize {
    stops.iter().position(|stop| stop.is_active).unwrap_or(0)
}

/// Orders the stops with the nearest-neighbour heuristic.
pub fn plan_tour<M>(stops: &[Stop], matrix_provider: &M) -> Tour
where
    M: DistanceMatrixProvider,
{
    let locations: Vec<(f64, f64)> = stops.iter().map(|stop| stop.coordinate.as_tuple()).collect();

    let mut matrix = matrix_provider.matrix_for(&locations);
    if !is_square(&matrix, locations.len()) {
        tracing::warn!(
            stops = locations.len(),
            rows = matrix.len(),
            "distance matrix has the wrong shape, using great-circle distances"
        );
        matrix = HaversineMatrix::default().matrix_for(&locations);
    }

    let order = if stops.is_empty() {
        Vec::new()
    } else {
        nearest_neighbor(start_index(stops), &matrix)
    };

    Tour { order, matrix }
}

/// Returns the same stops reordered into a visiting tour.
pub fn build_tour<M>(stops: &[Stop], matrix_provider: &M) -> Vec<Stop>
where
    M: DistanceMatrixProvider,
{
    plan_tour(stops, matrix_provider)
        .order
        .into_iter()
        .map(|index| stops[index].clone())
        .collect()
}

/// Greedy walk over a square distance matrix from `start`.
pub fn nearest_neighbor(start: usize, matrix: &[Vec<f64>]) -> Vec<usize> {
    let n = matrix.len();
    if start >= n {
        return Vec::new();
    }

    let mut placed = vec![false; n];
    let mut order = Vec::with_capacity(n);
    placed[start] = true;
    order.push(start);

    let mut current = start;
    while order.len() < n {
        let mut best: Option<(usize, f64)> = None;
        for (candidate, is_placed) in placed.iter().enumerate() {
            if *is_placed {
                continue;
            }
            let miles = matrix[current][candidate];
            // Strict `<` keeps the earliest candidate on ties.
            if best.is_none_or(|(_, best_miles)| miles < best_miles) {
                best = Some((candidate, miles));
            }
        }

        let Some((next, _)) = best else { break };
        placed[next] = true;
        order.push(next);
        current = next;
    }

    order
}

fn is_square(matrix: &[Vec<f64>], n: usize) -> bool {
    matrix.len() == n && matrix.iter().all(|row| row.len() == n)
}
