//! supergemlock benchmarking suite
//!
//! Benchmarks for manifest parsing, resolution, and input digesting.

pub mod common;

pub use common::*;
