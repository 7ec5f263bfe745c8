//! In-memory backend for the Wanderly caching layer.
//!
//! Backed by a concurrent hash map. Data is process-local and lost on
//! restart; use `wanderly-mongo` when entries must survive the process or
//! be shared across hosts.

mod backend;

pub use backend::InMemoryBackend;
