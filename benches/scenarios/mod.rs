//! Real-world scenario benchmarks.
//!
//! These model how a host drives the engine: a full pool of voices rendered
//! block by block while the parameter store is read every sample.

mod voices;

pub use voices::bench_voices;
