//! Opaque entity identifiers.
//!
//! IDs are random 64-bit values rendered in base62, e.g. `"39eWdE8hZJ"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const BASE62_CHARS: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// An opaque unique entity ID.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    /// Create an EntityId from an existing string.
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Generate a fresh random ID (64 random bits, base62 encoded).
    pub fn generate() -> Self {
        let bytes = Uuid::new_v4().into_bytes();
        let mut n = 0u64;
        for b in &bytes[..8] {
            n = (n << 8) | u64::from(*b);
        }
        Self(to_base62(n))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn to_base62(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE62_CHARS[(n % 62) as usize] as char);
        n /= 62;
    }
    digits.iter().rev().collect()
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Type alias for player IDs
pub type PlayerId = EntityId;

/// Type alias for play record (score) IDs
pub type ScoreId = EntityId;
