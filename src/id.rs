//! Quiz identifiers
//!
//! Format: `<base36 millis><16 hex chars>`, e.g. `m2f8x1k0` + `9c1e4b7a2d3f5061`.
//!
//! Ids are opaque. Nothing parses them back; they only need to be unique
//! within one stored collection.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of the random suffix appended to the timestamp prefix
const RANDOM_SUFFIX_LEN: usize = 16;

/// Opaque, immutable identifier of a stored quiz.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizId(String);

impl QuizId {
    /// Generate a fresh id from the current time and a random UUID suffix
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let random = Uuid::new_v4().simple().to_string();
        Self(format!("{}{}", to_base36(millis), &random[..RANDOM_SUFFIX_LEN]))
    }

    /// Generate an id that does not collide with any of `taken`
    pub fn generate_unique<'a>(taken: impl IntoIterator<Item = &'a QuizId> + Clone) -> Self {
        loop {
            let candidate = Self::generate();
            if !taken.clone().into_iter().any(|id| *id == candidate) {
                return candidate;
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for QuizId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for QuizId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for QuizId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for QuizId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for QuizId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
