//! Hashing System - Seed Expansion and Fingerprints
//!
//! `SeedHasher` turns a seed string into the words that drive the random
//! stream. It is NOT a cryptographic hash.
//! SHA-256 is only used to fingerprint finished descriptions and exports.

use sha2::{Sha256, Digest};
use serde::Serialize;
use serde_json::{Value, to_string};

/// String hash that yields a fresh 32-bit word on every call.
///
/// The seed is consumed as UTF-16 code units so that seeds hash the same way
/// they did in deployments that index strings by code unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedHasher {
    state: u32,
}

impl SeedHasher {
    const INIT: u32 = 1_779_033_703;
    const ABSORB: u32 = 3_432_918_353;
    const AVALANCHE_1: u32 = 2_246_822_507;
    const AVALANCHE_2: u32 = 3_266_489_909;

    pub fn new(seed: &str) -> Self {
        let len = seed.encode_utf16().count() as u32;
        let mut h = Self::INIT ^ len;
        for unit in seed.encode_utf16() {
            h = (h ^ u32::from(unit)).wrapping_mul(Self::ABSORB);
            h = h.rotate_left(13);
        }
        Self { state: h }
    }

    /// Mix the accumulator and return the next word.
    pub fn next_word(&mut self) -> u32 {
        let mut h = self.state;
        h = (h ^ (h >> 16)).wrapping_mul(Self::AVALANCHE_1);
        h = (h ^ (h >> 13)).wrapping_mul(Self::AVALANCHE_2);
        h ^= h >> 16;
        self.state = h;
        h
    }

    /// The four words used to seed a `SeededRandomStream`.
    pub fn seed_words(&mut self) -> [u32; 4] {
        [self.next_word(), self.next_word(), self.next_word(), self.next_word()]
    }
}

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    let sorted = sort_value(&v);
    to_string(&sorted)
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            let sorted_map: serde_json::Map<String, Value> = sorted
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_value(v)))
                .collect();
            Value::Object(sorted_map)
        }
        Value::Array(arr) => {
            Value::Array(arr.iter().map(sort_value).collect())
        }
        _ => v.clone()
    }
}

/// Fingerprint of any serializable value: sha256 of its canonical JSON.
///
/// Two descriptions share a fingerprint exactly when they are equal.
pub fn compute_fingerprint<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(value)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}
