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

//! # Weir Core
//!
//! Foundational numeric and indexing primitives for the weir family of
//! graph-algorithm crates. This crate consolidates the reusable building
//! blocks that higher-level solver crates share, with a focus on
//! correctness and zero runtime overhead.
//!
//! ## Modules
//!
//! - `num`: Integer-centric utilities, including associated-constant
//!   traits (`Zero`, `PlusOne`, `MinusOne`) and by-value checked
//!   arithmetic traits returning `Option<T>`.
//! - `utils`: Phantom-tagged, strongly typed indices (`TypedIndex<T>`)
//!   that prevent mixing index spaces such as vertices and edges.
//!
//! ## Purpose
//!
//! Flow solvers and related graph algorithms are generic over their
//! capacity and cost widths and manipulate several index spaces at once.
//! These primitives keep that code generic and type-safe without ad hoc
//! per-type duplication.
//!
//! Refer to each module for detailed APIs and examples.

pub mod num;
pub mod utils;
