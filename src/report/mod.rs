//! Report generation.
//!
//! This module renders computed rollups for human and machine consumers.

pub mod generator;

pub use generator::*;
