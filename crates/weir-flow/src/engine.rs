// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Minimum-cost maximum-flow engine.
//!
//! `MinCostFlow` drives the successive shortest-path computation: the
//! potential table is Bellman–Ford-initialized on the first query, then
//! each iteration runs a Dijkstra pass over reduced costs, folds the
//! distances back into the potentials, and pushes the bottleneck amount
//! along the found path until the sink becomes unreachable or the flow
//! budget is exhausted. The slope recorder observes every augmentation
//! and produces the convex breakpoint curve.
//!
//! Residual state persists across queries on the same instance, so a
//! second `flow` call pushes further units on top of what earlier calls
//! routed; each call's totals and curve start at `(0, 0)`. A query from
//! the source the potentials are rooted at reuses them as-is; a query
//! from a new source re-runs the Bellman–Ford initialization, since the
//! incremental update keeps reduced costs non-negative only along arcs
//! reachable from the root. Edge insertion after the first query is not
//! supported.
//!
//! The engine owns its search buffers and path scratch space; repeated
//! queries do not allocate beyond what the largest pass needed.

use crate::{
    edge::EdgeView,
    index::{EdgeIndex, VertexIndex},
    network::{Edges, ResidualNetwork},
    num::FlowNumeric,
    potential::PotentialTable,
    search::ShortestPathSearch,
    slope::{SlopePoint, SlopeRecorder},
};
use log::{debug, trace};
use smallvec::SmallVec;

/// Why a flow computation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Termination {
    /// No augmenting path remains; the current total is the maximum flow.
    SinkUnreachable,
    /// The requested flow budget was reached.
    LimitReached,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::SinkUnreachable => write!(f, "sink unreachable"),
            Termination::LimitReached => write!(f, "flow limit reached"),
        }
    }
}

/// A minimum-cost maximum-flow solver over a fixed vertex set.
///
/// `F` is the capacity/flow width, `C` the cost width; `C: From<F>` is
/// required so pushed amounts can enter the cost accumulation losslessly.
///
/// # Examples
///
/// ```rust
/// use weir_flow::engine::MinCostFlow;
/// use weir_flow::index::VertexIndex;
/// use weir_flow::slope::SlopePoint;
///
/// let mut graph = MinCostFlow::<i64, i64>::new(3);
/// graph.add_edge(VertexIndex::new(0), VertexIndex::new(1), 2, 1);
/// graph.add_edge(VertexIndex::new(1), VertexIndex::new(2), 2, 1);
///
/// let curve = graph.slope(VertexIndex::new(0), VertexIndex::new(2));
/// assert_eq!(curve, vec![
///     SlopePoint { flow: 0, cost: 0 },
///     SlopePoint { flow: 2, cost: 4 },
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct MinCostFlow<F, C>
where
    F: FlowNumeric,
    C: FlowNumeric,
{
    network: ResidualNetwork<F, C>,
    potentials: PotentialTable<C>,
    search: ShortestPathSearch<C>,
    path: SmallVec<[usize; 32]>,
    queried: bool,
}

impl<F, C> MinCostFlow<F, C>
where
    F: FlowNumeric,
    C: FlowNumeric + From<F>,
{
    /// Creates a solver over `num_vertices` vertices and no edges.
    #[inline]
    pub fn new(num_vertices: usize) -> Self {
        Self {
            network: ResidualNetwork::new(num_vertices),
            potentials: PotentialTable::new(num_vertices),
            search: ShortestPathSearch::new(),
            path: SmallVec::new(),
            queried: false,
        }
    }

    /// Number of vertices the solver was constructed with.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.network.num_vertices()
    }

    /// Number of edges inserted so far.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.network.num_edges()
    }

    /// Inserts an edge and returns its insertion index.
    ///
    /// Must not be called once a flow query has executed on this
    /// instance.
    ///
    /// # Panics
    ///
    /// Panics if an endpoint is out of bounds or `cap`/`cost` is
    /// negative; no partial mutation occurs in that case. In debug
    /// builds, also panics when called after a flow query.
    #[inline]
    pub fn add_edge(&mut self, from: VertexIndex, to: VertexIndex, cap: F, cost: C) -> EdgeIndex {
        debug_assert!(
            !self.queried,
            "called `MinCostFlow::add_edge` after a flow query"
        );
        self.network.add_edge(from, to, cap, cost)
    }

    /// Returns a snapshot of the edge inserted as `index`, reflecting the
    /// current residual state.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn get_edge(&self, index: EdgeIndex) -> EdgeView<F, C> {
        self.network.get_edge(index)
    }

    /// Returns an iterator of edge snapshots in insertion order. The
    /// iterator is restartable; every call walks the current state fresh.
    #[inline]
    pub fn edges(&self) -> Edges<'_, F, C> {
        self.network.edges()
    }

    /// Pushes as much flow as possible from `source` to `sink` and
    /// returns `(total_flow, total_cost)` for this call.
    ///
    /// # Panics
    ///
    /// Panics if `source == sink` or either endpoint is out of bounds.
    #[inline]
    pub fn flow(&mut self, source: VertexIndex, sink: VertexIndex) -> (F, C) {
        self.flow_within(source, sink, F::max_value())
    }

    /// Like [`MinCostFlow::flow`], but pushes at most `limit` units.
    pub fn flow_within(&mut self, source: VertexIndex, sink: VertexIndex, limit: F) -> (F, C) {
        let points = self.slope_within(source, sink, limit);
        let last = points
            .last()
            .expect("slope curve always contains the origin");
        (last.flow, last.cost)
    }

    /// Computes the full cost/flow trade-off curve from `source` to
    /// `sink` as a breakpoint sequence starting at `(0, 0)`.
    ///
    /// # Panics
    ///
    /// Panics if `source == sink` or either endpoint is out of bounds.
    #[inline]
    pub fn slope(&mut self, source: VertexIndex, sink: VertexIndex) -> Vec<SlopePoint<F, C>> {
        self.slope_within(source, sink, F::max_value())
    }

    /// Like [`MinCostFlow::slope`], but pushes at most `limit` units.
    pub fn slope_within(
        &mut self,
        source: VertexIndex,
        sink: VertexIndex,
        limit: F,
    ) -> Vec<SlopePoint<F, C>> {
        assert!(
            source.get() < self.num_vertices(),
            "flow query with `source` out of bounds: the vertex count is {} but the index is {}",
            self.num_vertices(),
            source
        );
        assert!(
            sink.get() < self.num_vertices(),
            "flow query with `sink` out of bounds: the vertex count is {} but the index is {}",
            self.num_vertices(),
            sink
        );
        assert!(
            source != sink,
            "flow query with equal source and sink {}",
            source
        );

        self.queried = true;
        if !self.potentials.is_rooted_at(source) {
            self.potentials.initialize(&self.network, source);
            debug!("potentials initialized from {}", source);
        }

        let mut recorder = SlopeRecorder::new();
        let mut total_flow = F::ZERO;
        let mut total_cost = C::ZERO;

        let termination = loop {
            if total_flow >= limit {
                break Termination::LimitReached;
            }
            if !self.search.run(&self.network, &self.potentials, source, sink) {
                break Termination::SinkUnreachable;
            }
            self.potentials
                .absorb(self.search.distances(), self.search.settled());
            let marginal = self.potentials.value(sink.get()) - self.potentials.value(source.get());

            self.path.clear();
            self.search
                .collect_path(&self.network, source, sink, &mut self.path);
            let pushed = self.network.augment_path(&self.path, limit - total_flow);

            total_flow = total_flow + pushed;
            let pushed_units: C = pushed.into();
            total_cost = pushed_units
                .checked_mul_val(marginal)
                .and_then(|step| total_cost.checked_add_val(step))
                .expect("cost accumulation overflowed the cost type");

            trace!(
                "augmented {} units at marginal cost {} (totals: {} units, cost {})",
                pushed,
                marginal,
                total_flow,
                total_cost
            );
            recorder.record(total_flow, total_cost, marginal);
        };

        debug!(
            "flow query terminated: {} ({} units, cost {})",
            termination, total_flow, total_cost
        );
        recorder.into_points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maxflow::MaxFlow;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn v(i: usize) -> VertexIndex {
        VertexIndex::new(i)
    }

    fn sp(flow: i64, cost: i64) -> SlopePoint<i64, i64> {
        SlopePoint { flow, cost }
    }

    /// Checks conservation, capacity bounds, and cost consistency over
    /// the edge snapshots of a completed flow call.
    fn assert_flow_properties(
        graph: &MinCostFlow<i64, i64>,
        source: usize,
        sink: usize,
        flow: i64,
        cost: i64,
    ) {
        let n = graph.num_vertices();
        let mut balance = vec![0_i64; n];
        let mut recomputed_cost = 0_i64;
        for edge in graph.edges() {
            assert!(0 <= edge.flow && edge.flow <= edge.cap);
            balance[edge.from.get()] -= edge.flow;
            balance[edge.to.get()] += edge.flow;
            recomputed_cost += edge.flow * edge.cost;
        }
        assert_eq!(recomputed_cost, cost);
        for (i, &net) in balance.iter().enumerate() {
            if i == source {
                assert_eq!(net, -flow);
            } else if i == sink {
                assert_eq!(net, flow);
            } else {
                assert_eq!(net, 0);
            }
        }
    }

    /// Verifies that the residual graph left behind contains no
    /// negative-cost cycle, i.e. the flow is cost-optimal.
    fn assert_no_negative_residual_cycle(graph: &MinCostFlow<i64, i64>) {
        let n = graph.num_vertices();
        let edges: Vec<_> = graph.edges().collect();
        let mut dist = vec![0_i64; n];
        let mut rounds = 0;
        loop {
            let mut updated = false;
            for edge in &edges {
                if edge.flow < edge.cap && dist[edge.from.get()] + edge.cost < dist[edge.to.get()] {
                    dist[edge.to.get()] = dist[edge.from.get()] + edge.cost;
                    updated = true;
                }
                if edge.flow > 0 && dist[edge.to.get()] - edge.cost < dist[edge.from.get()] {
                    dist[edge.from.get()] = dist[edge.to.get()] - edge.cost;
                    updated = true;
                }
            }
            if !updated {
                return;
            }
            rounds += 1;
            assert!(rounds <= n, "residual graph contains a negative-cost cycle");
        }
    }

    fn assert_convex(points: &[SlopePoint<i64, i64>]) {
        assert_eq!(points[0], sp(0, 0));
        for pair in points.windows(2) {
            assert!(pair[1].flow > pair[0].flow);
        }
        for triple in points.windows(3) {
            let first_flow = triple[1].flow - triple[0].flow;
            let first_cost = triple[1].cost - triple[0].cost;
            let second_flow = triple[2].flow - triple[1].flow;
            let second_cost = triple[2].cost - triple[1].cost;
            // slope_1 <= slope_2, cross-multiplied (flow deltas are positive).
            assert!(first_cost * second_flow <= second_cost * first_flow);
        }
    }

    #[test]
    fn test_diamond_slope_and_edge_snapshots() {
        let mut graph = MinCostFlow::<i64, i64>::new(4);
        graph.add_edge(v(0), v(1), 1, 1);
        graph.add_edge(v(0), v(2), 1, 1);
        graph.add_edge(v(1), v(3), 1, 1);
        graph.add_edge(v(2), v(3), 1, 1);
        graph.add_edge(v(1), v(2), 1, 1);

        let curve = graph.slope_within(v(0), v(3), 10);
        assert_eq!(curve, vec![sp(0, 0), sp(2, 4)]);

        let expected = [
            (0, 1, 1, 1, 1),
            (0, 2, 1, 1, 1),
            (1, 3, 1, 1, 1),
            (2, 3, 1, 1, 1),
            (1, 2, 1, 0, 1),
        ];
        for (i, &(from, to, cap, flow, cost)) in expected.iter().enumerate() {
            let edge = graph.get_edge(EdgeIndex::new(i));
            assert_eq!(edge.from, v(from));
            assert_eq!(edge.to, v(to));
            assert_eq!(edge.cap, cap);
            assert_eq!(edge.flow, flow);
            assert_eq!(edge.cost, cost);
        }
    }

    #[test]
    fn test_single_edge_flow_and_slope() {
        let mut graph = MinCostFlow::<i64, i64>::new(2);
        graph.add_edge(v(0), v(1), 1, 2);
        assert_eq!(graph.flow(v(0), v(1)), (1, 2));

        let mut graph = MinCostFlow::<i64, i64>::new(2);
        graph.add_edge(v(0), v(1), 1, 2);
        assert_eq!(graph.slope(v(0), v(1)), vec![sp(0, 0), sp(1, 2)]);
    }

    #[test]
    fn test_self_loop_carries_no_flow() {
        let mut graph = MinCostFlow::<i64, i64>::new(3);
        assert_eq!(graph.add_edge(v(0), v(0), 100, 123), EdgeIndex::new(0));

        let edge = graph.get_edge(EdgeIndex::new(0));
        assert_eq!(edge.from, v(0));
        assert_eq!(edge.to, v(0));
        assert_eq!(edge.cap, 100);
        assert_eq!(edge.flow, 0);
        assert_eq!(edge.cost, 123);
    }

    #[test]
    fn test_self_loop_does_not_change_results() {
        let mut plain = MinCostFlow::<i64, i64>::new(3);
        plain.add_edge(v(0), v(1), 2, 3);
        plain.add_edge(v(1), v(2), 2, 1);

        let mut looped = MinCostFlow::<i64, i64>::new(3);
        looped.add_edge(v(0), v(1), 2, 3);
        let loop_edge = looped.add_edge(v(1), v(1), 100, 123);
        looped.add_edge(v(1), v(2), 2, 1);

        assert_eq!(plain.slope(v(0), v(2)), looped.slope(v(0), v(2)));
        assert_eq!(looped.get_edge(loop_edge).flow, 0);
    }

    #[test]
    fn test_equal_cost_paths_collapse_to_one_segment() {
        let mut graph = MinCostFlow::<i64, i64>::new(3);
        assert_eq!(graph.add_edge(v(0), v(1), 1, 1), EdgeIndex::new(0));
        assert_eq!(graph.add_edge(v(1), v(2), 1, 0), EdgeIndex::new(1));
        assert_eq!(graph.add_edge(v(0), v(2), 2, 1), EdgeIndex::new(2));
        assert_eq!(graph.slope(v(0), v(2)), vec![sp(0, 0), sp(3, 3)]);
    }

    #[test]
    fn test_parallel_edges_produce_increasing_marginals() {
        let mut graph = MinCostFlow::<i64, i64>::new(2);
        graph.add_edge(v(0), v(1), 4, 1);
        graph.add_edge(v(0), v(1), 4, 2);
        graph.add_edge(v(0), v(1), 4, 3);

        let curve = graph.slope(v(0), v(1));
        assert_eq!(curve, vec![sp(0, 0), sp(4, 4), sp(8, 12), sp(12, 24)]);
        assert_convex(&curve);
    }

    #[test]
    fn test_flow_within_respects_limit_and_resumes() {
        let mut graph = MinCostFlow::<i64, i64>::new(2);
        graph.add_edge(v(0), v(1), 5, 3);

        assert_eq!(graph.flow_within(v(0), v(1), 2), (2, 6));
        // The second call continues from the residual state and pushes
        // the remaining capacity; its totals start from zero again.
        assert_eq!(graph.flow(v(0), v(1)), (3, 9));
        // A third call finds no remaining augmenting path.
        assert_eq!(graph.flow(v(0), v(1)), (0, 0));
    }

    #[test]
    fn test_second_query_with_new_source_rebuilds_potentials() {
        let mut graph = MinCostFlow::<i64, i64>::new(4);
        graph.add_edge(v(0), v(1), 2, 2);
        graph.add_edge(v(1), v(2), 4, 1);
        graph.add_edge(v(3), v(1), 3, 1);

        assert_eq!(graph.flow(v(0), v(2)), (2, 6));
        // Vertex 3 was unreachable from the first root; querying from it
        // re-roots the potentials before searching.
        assert_eq!(graph.flow(v(3), v(2)), (2, 4));

        assert_eq!(graph.get_edge(EdgeIndex::new(1)).flow, 4);
        assert_no_negative_residual_cycle(&graph);
    }

    #[test]
    fn test_flow_limit_beyond_capacity_is_harmless() {
        let mut graph = MinCostFlow::<i64, i64>::new(2);
        graph.add_edge(v(0), v(1), 5, 3);
        assert_eq!(graph.flow_within(v(0), v(1), 100), (5, 15));
    }

    #[test]
    fn test_zero_limit_returns_origin() {
        let mut graph = MinCostFlow::<i64, i64>::new(2);
        graph.add_edge(v(0), v(1), 5, 3);
        assert_eq!(graph.slope_within(v(0), v(1), 0), vec![sp(0, 0)]);
    }

    #[test]
    fn test_unreachable_sink_yields_zero_flow() {
        let mut graph = MinCostFlow::<i64, i64>::new(3);
        graph.add_edge(v(0), v(1), 4, 1);
        assert_eq!(graph.flow(v(0), v(2)), (0, 0));
    }

    #[test]
    fn test_flow_properties_on_layered_network() {
        let mut graph = MinCostFlow::<i64, i64>::new(6);
        graph.add_edge(v(0), v(1), 5, 2);
        graph.add_edge(v(0), v(2), 8, 1);
        graph.add_edge(v(1), v(3), 4, 1);
        graph.add_edge(v(2), v(3), 3, 3);
        graph.add_edge(v(2), v(4), 6, 2);
        graph.add_edge(v(3), v(5), 7, 1);
        graph.add_edge(v(4), v(5), 9, 1);

        let (flow, cost) = graph.flow(v(0), v(5));
        assert!(flow > 0);
        assert_flow_properties(&graph, 0, 5, flow, cost);
        assert_no_negative_residual_cycle(&graph);
    }

    #[test]
    fn test_distinct_cost_types_for_capacity_and_cost() {
        let mut graph = MinCostFlow::<i32, i64>::new(2);
        graph.add_edge(v(0), v(1), 3, 1_000_000_000);
        let (flow, cost) = graph.flow(v(0), v(1));
        assert_eq!(flow, 3);
        assert_eq!(cost, 3_000_000_000);
    }

    #[test]
    #[should_panic(expected = "equal source and sink")]
    fn test_query_rejects_equal_source_and_sink() {
        let mut graph = MinCostFlow::<i64, i64>::new(10);
        graph.slope(v(3), v(3));
    }

    #[test]
    #[should_panic(expected = "`source` out of bounds")]
    fn test_query_rejects_source_out_of_bounds() {
        let mut graph = MinCostFlow::<i64, i64>::new(2);
        graph.flow(v(2), v(1));
    }

    #[test]
    #[should_panic(expected = "`sink` out of bounds")]
    fn test_query_rejects_sink_out_of_bounds() {
        let mut graph = MinCostFlow::<i64, i64>::new(2);
        graph.flow(v(0), v(7));
    }

    #[test]
    #[should_panic(expected = "negative capacity")]
    fn test_add_edge_rejects_negative_capacity() {
        let mut graph = MinCostFlow::<i64, i64>::new(2);
        graph.add_edge(v(0), v(0), -1, 0);
    }

    #[test]
    fn test_rejected_add_edge_leaves_graph_untouched() {
        let mut graph = MinCostFlow::<i64, i64>::new(2);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            graph.add_edge(v(0), v(0), -1, 0);
        }));
        assert!(result.is_err());
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn test_stress_against_max_flow() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut rng = StdRng::seed_from_u64(0x5EED_CAFE);
        for _ in 0..300 {
            let n = rng.gen_range(2..=10);
            let m = rng.gen_range(1..=60);
            let source = rng.gen_range(0..n);
            let mut sink = rng.gen_range(0..n);
            while sink == source {
                sink = rng.gen_range(0..n);
            }

            let mut mincost = MinCostFlow::<i64, i64>::new(n);
            let mut reference = MaxFlow::<i64>::new(n);
            for _ in 0..m {
                let from = rng.gen_range(0..n);
                let to = rng.gen_range(0..n);
                let cap = rng.gen_range(0..=10);
                let cost = rng.gen_range(0..=10_000);
                mincost.add_edge(v(from), v(to), cap, cost);
                reference.add_edge(v(from), v(to), cap);
            }

            let mut for_slope = mincost.clone();
            let curve = for_slope.slope(v(source), v(sink));
            assert_convex(&curve);

            let (flow, cost) = mincost.flow(v(source), v(sink));
            assert_eq!(flow, reference.flow(v(source), v(sink)));
            assert_flow_properties(&mincost, source, sink, flow, cost);
            assert_no_negative_residual_cycle(&mincost);
        }
    }
}
