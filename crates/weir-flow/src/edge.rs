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

use crate::index::VertexIndex;

/// A caller-facing snapshot of one logical edge.
///
/// `flow` reflects the residual state at the time the snapshot was taken;
/// `0 <= flow <= cap` always holds. Snapshots are plain values and do not
/// observe later mutations of the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeView<F, C> {
    /// Tail vertex the edge leaves.
    pub from: VertexIndex,
    /// Head vertex the edge enters.
    pub to: VertexIndex,
    /// Capacity the edge was inserted with.
    pub cap: F,
    /// Flow currently routed through the edge.
    pub flow: F,
    /// Cost per unit of flow.
    pub cost: C,
}

impl<F, C> std::fmt::Display for EdgeView<F, C>
where
    F: std::fmt::Display,
    C: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} (flow {}/{}, cost {})",
            self.from, self.to, self.flow, self.cap, self.cost
        )
    }
}
