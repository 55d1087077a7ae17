//! djb2 string hash used to place keys.

/// Seed of the djb2 accumulator.
const SEED: u32 = 5381;

/// Hash a key with djb2 (`h = h * 33 + c`) over its UTF-16 code units.
///
/// Arithmetic wraps at 32 bits on every step, so the result is stable
/// across platforms and matches tables built by other djb2 implementations
/// that hash UTF-16 character codes.
#[inline]
pub fn hash_str(key: &str) -> u32 {
    key.encode_utf16().fold(SEED, |h, unit| {
        (h << 5).wrapping_add(h).wrapping_add(u32::from(unit))
    })
}

#[cfg(test)]
mod tests {
    use super::hash_str;

    /// Invariant: the empty key hashes to the seed.
    #[test]
    fn empty_key_is_seed() {
        assert_eq!(hash_str(""), 5381);
    }

    /// Invariant: known keys hash to fixed values; lookups stay compatible
    /// with tables that were laid out by the same function elsewhere.
    #[test]
    fn known_values() {
        assert_eq!(hash_str("a"), 177_670);
        assert_eq!(hash_str("Hobbit"), 3_085_073_917);
        assert_eq!(hash_str("hobbit"), 42_439_197);
        assert_eq!(hash_str("Wizard"), 3_665_850_966);
        assert_eq!(hash_str("LadyOfLight"), 3_949_716_796);
    }

    /// Invariant: hashing is case-sensitive and repeatable.
    #[test]
    fn deterministic_and_case_sensitive() {
        let a = hash_str("Hobbit");
        let b = hash_str("hobbit");
        assert_ne!(a, b);
        for _ in 0..4 {
            assert_eq!(hash_str("Hobbit"), a);
            assert_eq!(hash_str("hobbit"), b);
        }
    }

    /// Invariant: characters outside the BMP contribute both surrogate
    /// units, not the scalar value or the UTF-8 bytes.
    #[test]
    fn hashes_utf16_code_units() {
        assert_eq!(hash_str("\u{e9}"), 177_806);
        assert_eq!(hash_str("\u{1F600}"), 7_743_522);
    }
}
