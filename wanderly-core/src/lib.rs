#![warn(missing_docs)]
//! # wanderly-core
//!
//! Core traits and types for the Wanderly read-through caching layer.
//!
//! This crate provides the foundational abstractions shared by every other
//! Wanderly crate. It defines the types that storage backends (like
//! `wanderly-mongo`, `wanderly-memory`) and upstream providers (like
//! `wanderly-providers`) are built around:
//!
//! - **Identify** cached payloads ([`CacheKey`], [`KeyPart`])
//! - **Wrap** cached payloads with their creation time ([`CacheValue`])
//! - **Call** upstream providers ([`Upstream`])
//! - **Detach** best-effort side effects ([`Offload`])

pub mod key;
pub mod offload;
pub mod upstream;
pub mod value;

pub use key::{CacheKey, KeyPart};
pub use offload::{DisabledOffload, Offload};
pub use upstream::Upstream;
pub use value::CacheValue;

/// Raw byte data type used for serialized cache payloads.
/// Using `Bytes` provides efficient zero-copy cloning via reference counting.
pub type Raw = bytes::Bytes;
