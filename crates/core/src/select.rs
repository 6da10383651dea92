//! Deterministic selection: same (profile, date, field) always picks the same item.
//!
//! Replaces random draws wherever a choice between equivalent phrasings
//! is needed, so identical requests produce byte-identical output.

use chrono::{Datelike, NaiveDate};
use sha2::{Digest, Sha256};

/// A stable 64-bit key derived from SHA-256 of `(profile_id, date, field)`.
pub fn selection_key(profile_id: &str, date: NaiveDate, field: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(profile_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(date.to_string().as_bytes());
    hasher.update([0u8]);
    hasher.update(field.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Pick one item keyed by `(profile_id, date, field)`. `None` only for an empty pool.
pub fn pick<'a, T>(pool: &'a [T], profile_id: &str, date: NaiveDate, field: &str) -> Option<&'a T> {
    if pool.is_empty() {
        return None;
    }
    let index = (selection_key(profile_id, date, field) % pool.len() as u64) as usize;
    pool.get(index)
}

/// Pick by day of month: index = day % pool length.
pub fn pick_by_day<T>(pool: &[T], date: NaiveDate) -> Option<&T> {
    if pool.is_empty() {
        return None;
    }
    pool.get(date.day() as usize % pool.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn pick_is_deterministic() {
        let pool = ["a", "b", "c", "d", "e"];
        let first = pick(&pool, "u1", date(3), "summary");
        for _ in 0..10 {
            assert_eq!(pick(&pool, "u1", date(3), "summary"), first);
        }
    }

    #[test]
    fn different_fields_use_different_keys() {
        assert_ne!(
            selection_key("u1", date(3), "summary"),
            selection_key("u1", date(3), "question")
        );
    }

    #[test]
    fn pick_on_empty_pool_is_none() {
        let pool: [&str; 0] = [];
        assert!(pick(&pool, "u1", date(1), "x").is_none());
        assert!(pick_by_day(&pool, date(1)).is_none());
    }

    #[test]
    fn pick_by_day_uses_day_of_month() {
        let pool = ["q0", "q1", "q2"];
        assert_eq!(pick_by_day(&pool, date(4)), Some(&"q1"));
        assert_eq!(pick_by_day(&pool, date(6)), Some(&"q0"));
    }
}
