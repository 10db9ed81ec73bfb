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

//! Shortest augmenting-path search over reduced costs.
//!
//! Dijkstra keyed by tentative reduced distance, relaxing only arcs with
//! positive residual capacity. The search runs the reachable set to
//! exhaustion rather than stopping at the sink, so the subsequent
//! potential update covers every labeled vertex and keeps reduced costs
//! non-negative for the next pass.
//!
//! The search state (`dist`, predecessor arcs, bitsets, heap) is owned by
//! the struct and reused across passes to avoid per-augmentation
//! allocation.

use crate::{
    index::VertexIndex,
    network::ResidualNetwork,
    num::FlowNumeric,
    potential::PotentialTable,
};
use fixedbitset::FixedBitSet;
use smallvec::SmallVec;
use std::{cmp::Ordering, collections::BinaryHeap};

/// A heap entry ordered by ascending tentative distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry<C> {
    dist: C,
    vertex: usize,
}

impl<C> Ord for QueueEntry<C>
where
    C: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .cmp(&self.dist)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl<C> PartialOrd for QueueEntry<C>
where
    C: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reusable Dijkstra state for augmenting-path searches.
#[derive(Debug, Clone)]
pub struct ShortestPathSearch<C> {
    dist: Vec<C>,
    labeled: FixedBitSet,
    settled: FixedBitSet,
    prev_arc: Vec<Option<usize>>,
    heap: BinaryHeap<QueueEntry<C>>,
}

impl<C> Default for ShortestPathSearch<C>
where
    C: FlowNumeric,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ShortestPathSearch<C>
where
    C: FlowNumeric,
{
    /// Creates an empty search; buffers grow on first use.
    #[inline]
    pub fn new() -> Self {
        Self {
            dist: Vec::new(),
            labeled: FixedBitSet::new(),
            settled: FixedBitSet::new(),
            prev_arc: Vec::new(),
            heap: BinaryHeap::new(),
        }
    }

    fn prepare(&mut self, num_vertices: usize) {
        self.dist.clear();
        self.dist.resize(num_vertices, C::ZERO);
        self.prev_arc.clear();
        self.prev_arc.resize(num_vertices, None);
        self.labeled.grow(num_vertices);
        self.labeled.clear();
        self.settled.grow(num_vertices);
        self.settled.clear();
        self.heap.clear();
    }

    /// Runs one Dijkstra pass from `source` over the open residual arcs,
    /// reweighted by `potentials`. Returns whether `sink` was reached.
    pub fn run<F>(
        &mut self,
        network: &ResidualNetwork<F, C>,
        potentials: &PotentialTable<C>,
        source: VertexIndex,
        sink: VertexIndex,
    ) -> bool
    where
        F: FlowNumeric,
    {
        self.prepare(network.num_vertices());
        self.dist[source.get()] = C::ZERO;
        self.labeled.insert(source.get());
        self.heap.push(QueueEntry {
            dist: C::ZERO,
            vertex: source.get(),
        });

        while let Some(QueueEntry { vertex: u, .. }) = self.heap.pop() {
            if self.settled.contains(u) {
                continue;
            }
            self.settled.insert(u);

            for &arc_id in network.arcs_from(u) {
                let arc = network.arc(arc_id);
                if !arc.is_open() {
                    continue;
                }
                let head = arc.head();
                if self.settled.contains(head) {
                    continue;
                }

                let weight = potentials.reduce(u, head, arc.cost());
                debug_assert!(
                    weight >= C::ZERO,
                    "reduced arc cost must be non-negative, got {}",
                    weight
                );

                let next = self.dist[u] + weight;
                if !self.labeled.contains(head) || next < self.dist[head] {
                    self.dist[head] = next;
                    self.prev_arc[head] = Some(arc_id);
                    self.labeled.insert(head);
                    self.heap.push(QueueEntry {
                        dist: next,
                        vertex: head,
                    });
                }
            }
        }

        self.settled.contains(sink.get())
    }

    /// Reduced distances of the last pass; valid for settled vertices.
    #[inline]
    pub fn distances(&self) -> &[C] {
        &self.dist
    }

    /// Vertices the last pass settled.
    #[inline]
    pub fn settled(&self) -> &FixedBitSet {
        &self.settled
    }

    /// Appends the arc ids of the found source-to-sink path to `path`, in
    /// path order. Must only be called after [`ShortestPathSearch::run`]
    /// returned `true` for the same endpoints.
    pub fn collect_path<F>(
        &self,
        network: &ResidualNetwork<F, C>,
        source: VertexIndex,
        sink: VertexIndex,
        path: &mut SmallVec<[usize; 32]>,
    ) where
        F: FlowNumeric,
    {
        debug_assert!(
            self.settled.contains(sink.get()),
            "called `ShortestPathSearch::collect_path` for an unreached sink {}",
            sink
        );

        let start = path.len();
        let mut current = sink.get();
        while current != source.get() {
            let arc_id = self.prev_arc[current]
                .expect("settled non-source vertex must have a predecessor arc");
            path.push(arc_id);
            current = network.tail_of(arc_id);
        }
        path[start..].reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VertexIndex {
        VertexIndex::new(i)
    }

    fn zero_potentials(n: usize) -> PotentialTable<i64> {
        PotentialTable::new(n)
    }

    #[test]
    fn test_run_finds_cheapest_path() {
        let mut network: ResidualNetwork<i64, i64> = ResidualNetwork::new(4);
        network.add_edge(v(0), v(1), 1, 5);
        network.add_edge(v(0), v(2), 1, 1);
        network.add_edge(v(2), v(1), 1, 1);
        network.add_edge(v(1), v(3), 1, 2);

        let mut search: ShortestPathSearch<i64> = ShortestPathSearch::new();
        assert!(search.run(&network, &zero_potentials(4), v(0), v(3)));
        assert_eq!(search.distances()[3], 4); // 0 -> 2 -> 1 -> 3
        assert!(search.settled().contains(3));
    }

    #[test]
    fn test_run_reports_unreachable_sink() {
        let mut network: ResidualNetwork<i64, i64> = ResidualNetwork::new(3);
        network.add_edge(v(0), v(1), 1, 1);

        let mut search: ShortestPathSearch<i64> = ShortestPathSearch::new();
        assert!(!search.run(&network, &zero_potentials(3), v(0), v(2)));
    }

    #[test]
    fn test_run_ignores_arcs_without_residual_capacity() {
        let mut network: ResidualNetwork<i64, i64> = ResidualNetwork::new(2);
        network.add_edge(v(0), v(1), 0, 1);

        let mut search: ShortestPathSearch<i64> = ShortestPathSearch::new();
        assert!(!search.run(&network, &zero_potentials(2), v(0), v(1)));
    }

    #[test]
    fn test_collect_path_orders_arcs_from_source() {
        let mut network: ResidualNetwork<i64, i64> = ResidualNetwork::new(3);
        let first = network.add_edge(v(0), v(1), 1, 1);
        let second = network.add_edge(v(1), v(2), 1, 1);

        let mut search: ShortestPathSearch<i64> = ShortestPathSearch::new();
        assert!(search.run(&network, &zero_potentials(3), v(0), v(2)));

        let mut path: SmallVec<[usize; 32]> = SmallVec::new();
        search.collect_path(&network, v(0), v(2), &mut path);
        assert_eq!(path.as_slice(), &[first.get() * 2, second.get() * 2]);
    }

    #[test]
    fn test_run_is_reusable_across_passes() {
        let mut network: ResidualNetwork<i64, i64> = ResidualNetwork::new(2);
        let edge = network.add_edge(v(0), v(1), 1, 3);

        let mut search: ShortestPathSearch<i64> = ShortestPathSearch::new();
        assert!(search.run(&network, &zero_potentials(2), v(0), v(1)));

        network.augment_path(&[edge.get() * 2], 1);
        assert!(!search.run(&network, &zero_potentials(2), v(0), v(1)));
    }

    #[test]
    fn test_run_with_potentials_uses_reduced_costs() {
        let mut network: ResidualNetwork<i64, i64> = ResidualNetwork::new(3);
        network.add_edge(v(0), v(1), 1, 4);
        network.add_edge(v(1), v(2), 1, 6);

        let mut potentials: PotentialTable<i64> = PotentialTable::new(3);
        potentials.initialize(&network, v(0));

        let mut search: ShortestPathSearch<i64> = ShortestPathSearch::new();
        assert!(search.run(&network, &potentials, v(0), v(2)));
        // All reduced costs collapse to zero along shortest paths.
        assert_eq!(search.distances()[2], 0);
    }
}
