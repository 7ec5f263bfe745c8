//! Cache key types and construction.
//!
//! This module provides types for building and representing cache keys:
//!
//! - [`CacheKey`] - The complete cache key with collection prefix and parts
//! - [`KeyPart`] - A single key-value component of a cache key
//!
//! ## Key Structure
//!
//! Cache keys have two components:
//!
//! 1. **Prefix** - The collection namespace the entry lives in
//!    (e.g. `geocodeCache`, `weatherCache`, `aiResponseCache`)
//! 2. **Parts** - List of key-value pairs derived from the request parameters
//!
//! ## Format
//!
//! When rendered to a storage string, the parts are joined as
//! `key1=value1&key2=value2`; [`std::fmt::Display`] prepends the prefix:
//!
//! ```
//! use wanderly_core::{CacheKey, KeyPart};
//!
//! let key = CacheKey::new("weatherCache", vec![
//!     KeyPart::new("lat", "31.5204"),
//!     KeyPart::new("lon", "74.3587"),
//! ]);
//! assert_eq!(key.render(), "lat=31.5204&lon=74.3587");
//! assert_eq!(format!("{}", key), "weatherCache:lat=31.5204&lon=74.3587");
//! ```
//!
//! ## Determinism
//!
//! A cache key is a pure function of its inputs: parts are stored in the
//! order given, with no normalization performed here. Normalization (case
//! folding, coordinate rounding, digesting) is the responsibility of the
//! lookup-specific key derivation functions that construct keys.
//!
//! ## Performance
//!
//! [`CacheKey`] uses `Arc` internally for cheap cloning, and [`KeyPart`]
//! uses [`SmolStr`] so short components stay inline without heap allocation.

use smol_str::SmolStr;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Inner structure containing the actual cache key data.
/// Wrapped in Arc for cheap cloning.
#[derive(Debug, Eq, PartialEq, Hash, serde::Serialize)]
struct CacheKeyInner {
    prefix: SmolStr,
    parts: Vec<KeyPart>,
}

/// A cache key identifying a cached entry.
///
/// Cache keys are composed of:
/// - A **prefix** naming the collection the entry belongs to
/// - A list of **parts** (key-value pairs) derived from request parameters
///
/// # Cheap Cloning
///
/// `CacheKey` wraps its data in [`Arc`], making `clone()` an O(1) operation
/// that only increments a reference count. Keys are passed around on every
/// cache operation, so this matters.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(into = "CacheKeyInner")]
pub struct CacheKey {
    inner: Arc<CacheKeyInner>,
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        // Fast path: same Arc pointer
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl From<CacheKey> for CacheKeyInner {
    fn from(key: CacheKey) -> Self {
        // Try to unwrap Arc, or clone if shared
        Arc::try_unwrap(key.inner).unwrap_or_else(|arc| (*arc).clone())
    }
}

impl Clone for CacheKeyInner {
    fn clone(&self) -> Self {
        CacheKeyInner {
            prefix: self.prefix.clone(),
            parts: self.parts.clone(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.inner.prefix.is_empty() {
            write!(f, "{}:", self.inner.prefix)?;
        }
        for (i, part) in self.inner.parts.iter().enumerate() {
            if i > 0 {
                write!(f, "&")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

impl CacheKey {
    /// Creates a new cache key with the given collection prefix and parts.
    pub fn new(prefix: impl Into<SmolStr>, parts: Vec<KeyPart>) -> Self {
        CacheKey {
            inner: Arc::new(CacheKeyInner {
                prefix: prefix.into(),
                parts,
            }),
        }
    }

    /// Creates a cache key with a single key-value part.
    pub fn from_part(
        prefix: impl Into<SmolStr>,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Self {
        Self::new(prefix, vec![KeyPart::new(key, value)])
    }

    /// Returns the collection prefix.
    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }

    /// Returns an iterator over the key parts.
    pub fn parts(&self) -> impl Iterator<Item = &KeyPart> {
        self.inner.parts.iter()
    }

    /// Renders the parts to the storage key string, without the prefix.
    ///
    /// The prefix selects *where* an entry is stored (the collection); the
    /// rendered parts identify the entry *within* that collection.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, part) in self.inner.parts.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            out.push_str(part.key());
            out.push('=');
            out.push_str(part.value());
        }
        out
    }
}

/// A single component of a cache key.
///
/// Each part is a key-value pair derived from a request parameter, e.g.
/// `query=Lahore` or `lat=31.5204`.
///
/// # String Optimization
///
/// Both key and value use [`SmolStr`] which stores small strings (≤23 bytes)
/// inline without heap allocation. Typical components like `query`, `lat`,
/// or a 32-character digest fit the common case well.
#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct KeyPart {
    key: SmolStr,
    value: SmolStr,
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl KeyPart {
    /// Creates a new key part.
    pub fn new(key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        KeyPart {
            key: SmolStr::new(key),
            value: SmolStr::new(value),
        }
    }

    /// Returns the key name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_joins_parts() {
        let key = CacheKey::new(
            "weatherCache",
            vec![KeyPart::new("lat", "31.5204"), KeyPart::new("lon", "74.3587")],
        );
        assert_eq!(key.render(), "lat=31.5204&lon=74.3587");
    }

    #[test]
    fn test_display_includes_prefix() {
        let key = CacheKey::from_part("geocodeCache", "query", "Lahore");
        assert_eq!(format!("{}", key), "geocodeCache:query=Lahore");
    }

    #[test]
    fn test_equality_is_structural() {
        let a = CacheKey::from_part("geocodeCache", "query", "Lahore");
        let b = CacheKey::from_part("geocodeCache", "query", "Lahore");
        let c = CacheKey::from_part("geocodeCache", "query", "lahore");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_prefix_distinguishes_collections() {
        let a = CacheKey::from_part("geocodeCache", "query", "Lahore");
        let b = CacheKey::from_part("weatherCache", "query", "Lahore");
        assert_ne!(a, b);
        assert_eq!(a.render(), b.render());
    }

    #[test]
    fn test_clone_is_cheap() {
        let a = CacheKey::from_part("geocodeCache", "query", "Lahore");
        let b = a.clone();
        assert_eq!(a, b);
    }
}
