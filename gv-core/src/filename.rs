//! File names for new outlines

use crate::persist::EXTENSION;
use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;
use std::time::{SystemTime, UNIX_EPOCH};

/// Longest title-derived prefix
const PREFIX_LEN: usize = 10;

const SUFFIX_LEN: usize = 5;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Derive a file name from an outline title, e.g. `groceries_kQzPa.gv`
pub fn generate(title: &str) -> String {
    format!("{}{}.{}", prefix(title), random_suffix(), EXTENSION)
}

/// Sanitized, truncated title
fn prefix(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|&c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .take(PREFIX_LEN)
        .collect()
}

fn random_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    // RandomState is seeded per process, so two runs in the same instant differ
    let mut seed = RandomState::new().hash_one(nanos);
    (0..SUFFIX_LEN)
        .map(|_| {
            let letter = LETTERS[(seed % LETTERS.len() as u64) as usize] as char;
            seed /= LETTERS.len() as u64;
            letter
        })
        .collect()
}
