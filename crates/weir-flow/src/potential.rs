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

//! Vertex potentials for reduced-cost search.
//!
//! Potentials keep the reweighted arc costs non-negative so Dijkstra can
//! replace Bellman–Ford after the first pass (Johnson's technique applied
//! incrementally). The table is initialized once per network by a
//! source-rooted Bellman–Ford over the open residual arcs, then updated
//! after every Dijkstra pass by adding the pass's distances to the
//! potentials of the vertices it settled.
//!
//! Invariant maintained: `potential[head] <= potential[tail] + cost` for
//! every residual arc with remaining capacity.

use crate::{index::VertexIndex, network::ResidualNetwork, num::FlowNumeric};
use fixedbitset::FixedBitSet;

/// Per-vertex potentials, stored as a plain array of derived state.
///
/// The table remembers the source it was rooted at: the incremental
/// update only preserves the reduced-cost invariant along arcs reachable
/// from that root, so a query from a different source must re-initialize.
#[derive(Debug, Clone)]
pub struct PotentialTable<C> {
    values: Vec<C>,
    root: Option<usize>,
}

impl<C> PotentialTable<C>
where
    C: FlowNumeric,
{
    /// Creates an all-zero table for `num_vertices` vertices.
    #[inline]
    pub fn new(num_vertices: usize) -> Self {
        Self {
            values: vec![C::ZERO; num_vertices],
            root: None,
        }
    }

    /// Whether the table has been through Bellman–Ford initialization.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.root.is_some()
    }

    /// Whether the table is initialized and rooted at `source`.
    #[inline]
    pub fn is_rooted_at(&self, source: VertexIndex) -> bool {
        self.root == Some(source.get())
    }

    /// The potential of vertex `v`.
    #[inline(always)]
    pub fn value(&self, v: usize) -> C {
        self.values[v]
    }

    /// The cost of an arc from `tail` to `head` reweighted by the current
    /// potentials. Non-negative for every open residual arc once the
    /// table is maintained.
    #[inline(always)]
    pub fn reduce(&self, tail: usize, head: usize, cost: C) -> C {
        cost + self.values[tail] - self.values[head]
    }

    /// Initializes the table by a single-source Bellman–Ford rooted at
    /// `source`, relaxing the open residual arcs to fixpoint. Vertices
    /// unreachable from `source` keep their prior potential.
    ///
    /// # Panics
    ///
    /// Panics if a relaxation still succeeds after `num_vertices` rounds,
    /// which means a negative-cost cycle is reachable from `source`.
    pub fn initialize<F>(&mut self, network: &ResidualNetwork<F, C>, source: VertexIndex)
    where
        F: FlowNumeric,
    {
        let n = network.num_vertices();
        debug_assert_eq!(
            self.values.len(),
            n,
            "potential table sized for {} vertices but the network has {}",
            self.values.len(),
            n
        );

        let mut dist = vec![C::ZERO; n];
        let mut reached = FixedBitSet::with_capacity(n);
        reached.insert(source.get());

        for round in 0..n {
            let mut updated = false;
            for arc_id in 0..network.num_arcs() {
                let arc = network.arc(arc_id);
                if !arc.is_open() {
                    continue;
                }
                let tail = network.tail_of(arc_id);
                if !reached.contains(tail) {
                    continue;
                }
                let next = dist[tail] + arc.cost();
                if !reached.contains(arc.head()) || next < dist[arc.head()] {
                    dist[arc.head()] = next;
                    reached.insert(arc.head());
                    updated = true;
                }
            }
            if !updated {
                break;
            }
            assert!(
                round + 1 < n,
                "called `PotentialTable::initialize` on a residual graph with a negative-cost cycle reachable from {}",
                source
            );
        }

        for v in reached.ones() {
            self.values[v] = dist[v];
        }
        self.root = Some(source.get());
    }

    /// Folds a Dijkstra pass into the table: `potential[v] += distance[v]`
    /// for every settled vertex. Unsettled vertices keep their prior
    /// potential.
    pub fn absorb(&mut self, distances: &[C], settled: &FixedBitSet) {
        debug_assert_eq!(
            distances.len(),
            self.values.len(),
            "distance array sized for {} vertices but the table has {}",
            distances.len(),
            self.values.len()
        );
        for v in settled.ones() {
            self.values[v] = self.values[v] + distances[v];
        }
    }
}
