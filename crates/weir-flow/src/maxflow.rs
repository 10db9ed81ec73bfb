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

//! Maximum flow via Dinic's blocking-flow algorithm.
//!
//! The residual representation matches the min-cost engine: each logical
//! edge is a pair of arena arcs, partner found by flipping the lowest
//! index bit. Each phase assigns BFS levels from the source, then sends
//! blocking flow along level-increasing arcs with a per-vertex cursor so
//! exhausted arcs are never rescanned within a phase.
//!
//! Residual state persists across calls; `min_cut` reads the final
//! residual graph and `change_edge` rewrites a single edge for re-solving
//! under modified capacities.

use crate::{
    index::{EdgeIndex, VertexIndex},
    num::FlowNumeric,
};
use fixedbitset::FixedBitSet;
use log::debug;
use std::collections::VecDeque;

/// A caller-facing snapshot of one capacity-only edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowEdgeView<F> {
    /// Tail vertex the edge leaves.
    pub from: VertexIndex,
    /// Head vertex the edge enters.
    pub to: VertexIndex,
    /// Capacity the edge was inserted with (or rewritten to).
    pub cap: F,
    /// Flow currently routed through the edge.
    pub flow: F,
}

#[derive(Debug, Clone, Copy)]
struct CapArc<F> {
    head: usize,
    residual: F,
}

/// A maximum-flow solver over a fixed vertex set.
///
/// # Examples
///
/// ```rust
/// use weir_flow::maxflow::MaxFlow;
/// use weir_flow::index::VertexIndex;
///
/// let mut graph = MaxFlow::<i64>::new(3);
/// graph.add_edge(VertexIndex::new(0), VertexIndex::new(1), 2);
/// graph.add_edge(VertexIndex::new(1), VertexIndex::new(2), 1);
/// assert_eq!(graph.flow(VertexIndex::new(0), VertexIndex::new(2)), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MaxFlow<F>
where
    F: FlowNumeric,
{
    arcs: Vec<CapArc<F>>,
    adjacency: Vec<Vec<usize>>,
    level: Vec<i32>,
    cursor: Vec<usize>,
    queue: VecDeque<usize>,
}

impl<F> MaxFlow<F>
where
    F: FlowNumeric,
{
    /// Creates a solver over `num_vertices` vertices and no edges.
    #[inline]
    pub fn new(num_vertices: usize) -> Self {
        Self {
            arcs: Vec::new(),
            adjacency: vec![Vec::new(); num_vertices],
            level: vec![-1; num_vertices],
            cursor: vec![0; num_vertices],
            queue: VecDeque::new(),
        }
    }

    /// Number of vertices the solver was constructed with.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges inserted so far.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.arcs.len() / 2
    }

    /// Inserts an edge and returns its insertion index.
    ///
    /// # Panics
    ///
    /// Panics if an endpoint is out of bounds or `cap` is negative; no
    /// partial mutation occurs in that case.
    pub fn add_edge(&mut self, from: VertexIndex, to: VertexIndex, cap: F) -> EdgeIndex {
        assert!(
            from.get() < self.num_vertices(),
            "called `MaxFlow::add_edge` with `from` out of bounds: the vertex count is {} but the index is {}",
            self.num_vertices(),
            from
        );
        assert!(
            to.get() < self.num_vertices(),
            "called `MaxFlow::add_edge` with `to` out of bounds: the vertex count is {} but the index is {}",
            self.num_vertices(),
            to
        );
        assert!(
            cap >= F::ZERO,
            "called `MaxFlow::add_edge` with negative capacity {}",
            cap
        );

        let forward_id = self.arcs.len();
        self.arcs.push(CapArc {
            head: to.get(),
            residual: cap,
        });
        self.arcs.push(CapArc {
            head: from.get(),
            residual: F::ZERO,
        });
        self.adjacency[from.get()].push(forward_id);
        self.adjacency[to.get()].push(forward_id + 1);

        EdgeIndex::new(forward_id / 2)
    }

    /// Returns a snapshot of the edge inserted as `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn get_edge(&self, index: EdgeIndex) -> FlowEdgeView<F> {
        assert!(
            index.get() < self.num_edges(),
            "called `MaxFlow::get_edge` with edge index out of bounds: the edge count is {} but the index is {}",
            self.num_edges(),
            index
        );

        let forward = &self.arcs[index.get() * 2];
        let backward = &self.arcs[index.get() * 2 + 1];
        FlowEdgeView {
            from: VertexIndex::new(backward.head),
            to: VertexIndex::new(forward.head),
            cap: forward.residual + backward.residual,
            flow: backward.residual,
        }
    }

    /// Returns an iterator of edge snapshots in insertion order.
    #[inline]
    pub fn edges(&self) -> impl Iterator<Item = FlowEdgeView<F>> + '_ {
        (0..self.num_edges()).map(move |i| self.get_edge(EdgeIndex::new(i)))
    }

    /// Rewrites the capacity and flow of the edge inserted as `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or `new_flow` is not within
    /// `0..=new_cap`.
    pub fn change_edge(&mut self, index: EdgeIndex, new_cap: F, new_flow: F) {
        assert!(
            index.get() < self.num_edges(),
            "called `MaxFlow::change_edge` with edge index out of bounds: the edge count is {} but the index is {}",
            self.num_edges(),
            index
        );
        assert!(
            F::ZERO <= new_flow && new_flow <= new_cap,
            "called `MaxFlow::change_edge` with flow {} outside of 0..={}",
            new_flow,
            new_cap
        );

        self.arcs[index.get() * 2].residual = new_cap - new_flow;
        self.arcs[index.get() * 2 + 1].residual = new_flow;
    }

    /// Pushes as much flow as possible from `source` to `sink` and
    /// returns the amount pushed by this call.
    ///
    /// # Panics
    ///
    /// Panics if `source == sink` or either endpoint is out of bounds.
    #[inline]
    pub fn flow(&mut self, source: VertexIndex, sink: VertexIndex) -> F {
        self.flow_within(source, sink, F::max_value())
    }

    /// Like [`MaxFlow::flow`], but pushes at most `limit` units.
    pub fn flow_within(&mut self, source: VertexIndex, sink: VertexIndex, limit: F) -> F {
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

        let mut total = F::ZERO;
        let mut phases = 0_u32;
        while total < limit {
            if !self.assign_levels(source.get(), sink.get()) {
                break;
            }
            phases += 1;
            self.cursor.iter_mut().for_each(|c| *c = 0);
            loop {
                let pushed = self.blocking_dfs(source.get(), sink.get(), limit - total);
                if pushed == F::ZERO {
                    break;
                }
                total = total + pushed;
                if total >= limit {
                    break;
                }
            }
        }
        debug!("max flow finished after {} phases: {} units", phases, total);
        total
    }

    /// Vertices reachable from `source` through arcs with remaining
    /// residual capacity. After a completed [`MaxFlow::flow`] call this
    /// is a minimum cut: the saturated edges leaving the set carry
    /// exactly the maximum flow.
    ///
    /// # Panics
    ///
    /// Panics if `source` is out of bounds.
    pub fn min_cut(&self, source: VertexIndex) -> FixedBitSet {
        assert!(
            source.get() < self.num_vertices(),
            "called `MaxFlow::min_cut` with `source` out of bounds: the vertex count is {} but the index is {}",
            self.num_vertices(),
            source
        );

        let mut visited = FixedBitSet::with_capacity(self.num_vertices());
        let mut queue = VecDeque::new();
        visited.insert(source.get());
        queue.push_back(source.get());
        while let Some(u) = queue.pop_front() {
            for &arc_id in &self.adjacency[u] {
                let arc = &self.arcs[arc_id];
                if arc.residual > F::ZERO && !visited.contains(arc.head) {
                    visited.insert(arc.head);
                    queue.push_back(arc.head);
                }
            }
        }
        visited
    }

    /// Assigns BFS levels from `source`; returns whether `sink` is
    /// reachable through arcs with remaining residual capacity.
    fn assign_levels(&mut self, source: usize, sink: usize) -> bool {
        self.level.iter_mut().for_each(|l| *l = -1);
        self.level[source] = 0;
        self.queue.clear();
        self.queue.push_back(source);

        while let Some(u) = self.queue.pop_front() {
            for idx in 0..self.adjacency[u].len() {
                let arc_id = self.adjacency[u][idx];
                let arc = self.arcs[arc_id];
                if arc.residual > F::ZERO && self.level[arc.head] < 0 {
                    self.level[arc.head] = self.level[u] + 1;
                    self.queue.push_back(arc.head);
                }
            }
        }
        self.level[sink] >= 0
    }

    /// Sends one unit bundle of blocking flow from `v` towards `sink`,
    /// bounded by `limit`. Returns the amount sent, zero when `v` is a
    /// dead end for this phase.
    fn blocking_dfs(&mut self, v: usize, sink: usize, limit: F) -> F {
        if v == sink {
            return limit;
        }
        while self.cursor[v] < self.adjacency[v].len() {
            let arc_id = self.adjacency[v][self.cursor[v]];
            let arc = self.arcs[arc_id];
            if arc.residual > F::ZERO && self.level[arc.head] == self.level[v] + 1 {
                let pushed = self.blocking_dfs(arc.head, sink, limit.min(arc.residual));
                if pushed > F::ZERO {
                    self.arcs[arc_id].residual = self.arcs[arc_id].residual - pushed;
                    self.arcs[arc_id ^ 1].residual = self.arcs[arc_id ^ 1].residual + pushed;
                    return pushed;
                }
            }
            self.cursor[v] += 1;
        }
        self.level[v] = -1;
        F::ZERO
    }
}
