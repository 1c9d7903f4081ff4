//! Rollup computation.
//!
//! This module contains the aggregation engine that folds agent records
//! into global and per-suite summaries.

pub mod engine;

pub use engine::*;
