//! Structured logging vocabulary.
//!
//! Library code emits `tracing` events keyed by the names in [`events`] and the
//! field keys in [`fields`]. Installing a subscriber is left to binaries and tests.

pub mod events;
pub mod fields;
