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

//! # Flow Numeric Trait
//!
//! Unified numeric bounds for capacities and costs. `FlowNumeric`
//! collects the integer capabilities the flow solvers rely on — intrinsic
//! traits (`PrimInt`, `Signed`), the associated-constant traits from
//! `weir_core`, and by-value checked arithmetic — into a single alias so
//! generic signatures stay readable and every instantiation resolves at
//! compile time.
//!
//! Capacity and cost widths are chosen independently by the caller
//! (e.g., `i32` capacities with `i64` costs); accumulating a cost total
//! additionally requires `Cost: From<Cap>` at the engine boundary.

use std::hash::Hash;

use num_traits::{PrimInt, Signed};
use weir_core::num::{
    constants::{MinusOne, PlusOne, Zero},
    ops::checked_arithmetic::{CheckedAddVal, CheckedMulVal, CheckedNegVal, CheckedSubVal},
};

/// A trait alias for signed integer types usable as flow capacities and
/// costs. These are usually `i8`, `i16`, `i32`, `i64`, `i128` and `isize`.
pub trait FlowNumeric:
    PrimInt
    + Signed
    + std::fmt::Debug
    + std::fmt::Display
    + Zero
    + PlusOne
    + MinusOne
    + CheckedAddVal
    + CheckedSubVal
    + CheckedMulVal
    + CheckedNegVal
    + Send
    + Sync
    + Hash
{
}

impl<T> FlowNumeric for T where
    T: PrimInt
        + Signed
        + std::fmt::Debug
        + std::fmt::Display
        + Zero
        + PlusOne
        + MinusOne
        + CheckedAddVal
        + CheckedSubVal
        + CheckedMulVal
        + CheckedNegVal
        + Send
        + Sync
        + Hash
{
}
