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

//! # Weir Flow
//!
//! Network-flow solvers over residual graphs. The centerpiece is
//! [`engine::MinCostFlow`], a minimum-cost maximum-flow engine that
//! computes the full piecewise-linear trade-off curve between flow pushed
//! and cost incurred via successive shortest augmenting paths with vertex
//! potentials (Bellman–Ford once, Dijkstra thereafter). A standalone
//! Dinic maximum-flow solver, [`maxflow::MaxFlow`], complements it.
//!
//! ## Modules
//!
//! - `index`: Typed `VertexIndex` / `EdgeIndex` handles.
//! - `num`: The `FlowNumeric` trait alias bounding capacity and cost types.
//! - `edge`: Caller-facing edge snapshots.
//! - `network`: The residual network (arc arena + adjacency) and the
//!   atomic path-augmentation primitive.
//! - `potential`: Vertex potentials — Bellman–Ford initialization and
//!   incremental reweighting after each search pass.
//! - `search`: Dijkstra over reduced costs with reusable buffers.
//! - `slope`: Breakpoints of the convex cost/flow curve.
//! - `engine`: The `MinCostFlow` driver tying the components together.
//! - `maxflow`: Dinic blocking-flow maximum flow with min-cut extraction.
//!
//! ## Usage
//!
//! ```rust
//! use weir_flow::engine::MinCostFlow;
//! use weir_flow::index::VertexIndex;
//!
//! let mut graph = MinCostFlow::<i64, i64>::new(2);
//! graph.add_edge(VertexIndex::new(0), VertexIndex::new(1), 1, 2);
//! let (flow, cost) = graph.flow(VertexIndex::new(0), VertexIndex::new(1));
//! assert_eq!((flow, cost), (1, 2));
//! ```

pub mod edge;
pub mod engine;
pub mod index;
pub mod maxflow;
pub mod network;
pub mod num;
pub mod potential;
pub mod search;
pub mod slope;
