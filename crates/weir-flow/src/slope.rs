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

//! Breakpoints of the convex cost/flow trade-off curve.
//!
//! Successive shortest-path augmentation yields non-decreasing marginal
//! costs, so the curve of cumulative cost over cumulative flow is convex
//! and piecewise linear. The recorder keeps one breakpoint per marginal
//! cost: a run of augmentations at the same marginal collapses to its
//! final point.

use crate::num::FlowNumeric;

/// One breakpoint of the cost/flow curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlopePoint<F, C> {
    /// Cumulative flow pushed when the breakpoint was recorded.
    pub flow: F,
    /// Cumulative cost incurred when the breakpoint was recorded.
    pub cost: C,
}

impl<F, C> std::fmt::Display for SlopePoint<F, C>
where
    F: std::fmt::Display,
    C: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.flow, self.cost)
    }
}

/// Accumulates breakpoints as the engine augments.
///
/// Starts at `(0, 0)`; [`SlopeRecorder::record`] is called once per
/// augmentation with the running totals and that augmentation's marginal
/// cost per unit.
#[derive(Debug, Clone)]
pub struct SlopeRecorder<F, C> {
    points: Vec<SlopePoint<F, C>>,
    last_marginal: Option<C>,
}

impl<F, C> Default for SlopeRecorder<F, C>
where
    F: FlowNumeric,
    C: FlowNumeric,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<F, C> SlopeRecorder<F, C>
where
    F: FlowNumeric,
    C: FlowNumeric,
{
    /// Creates a recorder holding only the origin point.
    #[inline]
    pub fn new() -> Self {
        Self {
            points: vec![SlopePoint {
                flow: F::ZERO,
                cost: C::ZERO,
            }],
            last_marginal: None,
        }
    }

    /// Records the state after an augmentation. If the marginal cost is
    /// unchanged from the previous augmentation, the last breakpoint is
    /// replaced instead of a new one being appended.
    pub fn record(&mut self, total_flow: F, total_cost: C, marginal: C) {
        if self.last_marginal == Some(marginal) {
            self.points.pop();
        }
        self.points.push(SlopePoint {
            flow: total_flow,
            cost: total_cost,
        });
        self.last_marginal = Some(marginal);
    }

    /// The most recently recorded point (the origin if nothing was
    /// recorded).
    #[inline]
    pub fn last(&self) -> SlopePoint<F, C> {
        *self
            .points
            .last()
            .expect("slope recorder always holds the origin point")
    }

    /// Consumes the recorder and returns the breakpoint sequence.
    #[inline]
    pub fn into_points(self) -> Vec<SlopePoint<F, C>> {
        self.points
    }
}
