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

//! # Numeric Foundations
//!
//! Traits for integer-centric generic programming. The submodules provide
//! uniform, by-value APIs that mirror the intrinsic behavior of Rust's
//! primitive integers while staying usable in generic bounds.
//!
//! ## Submodules
//!
//! - `constants`: Associated-constant traits (`Zero`, `PlusOne`,
//!   `MinusOne`) implemented for the core integer types, giving generic
//!   code access to sentinel values without `num_traits` function calls.
//! - `ops`: Checked arithmetic traits (by value) for addition,
//!   subtraction, multiplication, and negation, returning `Option<T>` so
//!   overflow is an explicit, testable outcome.
//!
//! Flow accounting multiplies per-unit costs by pushed capacities and sums
//! the products; the checked variants let that accumulation fail loudly
//! instead of wrapping.

pub mod constants;
pub mod ops;
