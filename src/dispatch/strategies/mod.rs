//! Dispatch Strategies
//!
//! Exact strategies backed by a solver live here:
//! - LP: linear-programming dispatcher (cost-optimal solution)
//!
//! The merit-order heuristic needs no solver and sits beside the shared types.

pub mod lp;

pub use lp::*;
