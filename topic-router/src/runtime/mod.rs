//! Runtime integration layer.
//!
//! Isolates thread and async-runtime boundaries so each shard worker's execution
//! model stays localized and predictable for the rest of the crate.

pub(crate) mod worker_runtime;
