//! Field variation hash
//!
//! A polynomial rolling hash over a field identifier, used to give each
//! field a stable bias in the generated data. Not cryptographic.

/// `hash = hash * 31 + code_unit` over UTF-16 code units, wrapping in 32 bits
pub fn field_hash(field_id: &str) -> i32 {
    field_id
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
}

/// Field offset in `[-1.0, 1.0]`
pub fn unit_offset(field_id: &str) -> f64 {
    let bucket = field_hash(field_id).rem_euclid(201) - 100;
    f64::from(bucket) / 100.0
}

/// Field offset scaled to `[-scale, scale]`
pub fn field_variation(field_id: &str, scale: f64) -> f64 {
    unit_offset(field_id) * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_rolling_hash_by_hand() {
        // "ab" = 97 * 31 + 98
        assert_eq!(field_hash("ab"), 3105);
        assert_eq!(field_hash(""), 0);
    }

    #[test]
    fn wraps_instead_of_overflowing() {
        let long_id = "field-".repeat(64);
        // Deterministic and does not panic in debug builds
        assert_eq!(field_hash(&long_id), field_hash(&long_id));
    }

    #[test]
    fn offsets_stay_in_bounds() {
        for id in ["field-1", "north-plot", "खेत-7", "", "zzzzzzzzzzzzzzzzzzzz"] {
            let unit = unit_offset(id);
            assert!((-1.0..=1.0).contains(&unit), "{} -> {}", id, unit);
            let scaled = field_variation(id, 10.0);
            assert!((-10.0..=10.0).contains(&scaled));
        }
    }
}
