//! Cache key derivation for the three lookup kinds.
//!
//! Every function here is pure: identical parameters always produce an
//! identical key, within and across process runs. Each key's prefix names
//! the collection its entries live in.

use sha2::{Digest, Sha256};
use wanderly_core::{CacheKey, KeyPart};

/// Collection for cached geocode candidate lists.
pub const GEOCODE_CACHE: &str = "geocodeCache";
/// Collection for cached current-conditions payloads.
pub const WEATHER_CACHE: &str = "weatherCache";
/// Collection for cached generated plans.
pub const AI_RESPONSE_CACHE: &str = "aiResponseCache";

const DIGEST_LEN: usize = 32;

/// Key for a geocode lookup: the place-name string as-is.
///
/// Case-sensitive and unnormalized: `"Lahore"` and `"lahore"` are distinct
/// entries. The key is purely a function of the input string.
pub fn geocode_key(place: &str) -> CacheKey {
    CacheKey::from_part(GEOCODE_CACHE, "query", place)
}

/// Key for a weather lookup: coordinates rounded to 4 decimal places.
///
/// Four decimals is ~11 m of position, far below the resolution of a
/// city-level conditions request, and it makes numerically equal inputs
/// map to one entry regardless of how many trailing digits they carried.
/// The provider still receives the unrounded coordinates.
pub fn weather_key(lat: f64, lon: f64) -> CacheKey {
    CacheKey::new(
        WEATHER_CACHE,
        vec![
            KeyPart::new("lat", format!("{lat:.4}")),
            KeyPart::new("lon", format!("{lon:.4}")),
        ],
    )
}

/// Key for a plan-generation lookup: a 32-character hex digest of the
/// trip parameters.
///
/// The digest input is `"{destination}-{days}-{style}-{budget}"`, hashed
/// with SHA-256 and truncated to 32 hex characters.
pub fn plan_key(destination: &str, days: u32, style: &str, budget: &str) -> CacheKey {
    let mut hasher = Sha256::new();
    hasher.update(format!("{destination}-{days}-{style}-{budget}"));
    let digest = format!("{:x}", hasher.finalize());
    CacheKey::from_part(AI_RESPONSE_CACHE, "digest", &digest[..DIGEST_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocode_key_is_the_raw_place_name() {
        let key = geocode_key("Lahore");
        assert_eq!(key.prefix(), GEOCODE_CACHE);
        assert_eq!(key.render(), "query=Lahore");
    }

    #[test]
    fn test_geocode_key_is_case_sensitive() {
        assert_ne!(geocode_key("Lahore"), geocode_key("lahore"));
    }

    #[test]
    fn test_weather_key_unifies_equal_coordinates() {
        // textually different, numerically equal representations agree
        assert_eq!(weather_key(31.5204, 74.3587), weather_key(31.52040, 74.35870));
    }

    #[test]
    fn test_weather_key_separates_beyond_precision() {
        assert_ne!(weather_key(31.5204, 74.3587), weather_key(31.5205, 74.3587));
    }

    #[test]
    fn test_weather_key_renders_rounded() {
        let key = weather_key(31.52043, 74.3587);
        assert_eq!(key.render(), "lat=31.5204&lon=74.3587");
    }

    #[test]
    fn test_plan_key_is_a_32_char_hex_digest() {
        let key = plan_key("Lahore", 3, "Cultural", "Mid-range");
        let digest = key.render();
        let digest = digest.strip_prefix("digest=").unwrap();
        assert_eq!(digest.len(), 32);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_plan_key_is_stable_across_invocations() {
        let a = plan_key("Lahore", 3, "Cultural", "Mid-range");
        let b = plan_key("Lahore", 3, "Cultural", "Mid-range");
        assert_eq!(a, b);
    }

    #[test]
    fn test_plan_key_distinguishes_parameters() {
        let base = plan_key("Lahore", 3, "Cultural", "Mid-range");
        assert_ne!(base, plan_key("Lahore", 4, "Cultural", "Mid-range"));
        assert_ne!(base, plan_key("Lahore", 3, "Adventure", "Mid-range"));
        assert_ne!(base, plan_key("Lahore", 3, "Cultural", "Luxury"));
        assert_ne!(base, plan_key("Karachi", 3, "Cultural", "Mid-range"));
    }
}
