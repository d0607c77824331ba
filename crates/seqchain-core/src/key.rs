//! Keys of an ordered keyed sequence.
//!
//! A key is either an integer position-like key or a string name. Keys are
//! carried through operators unchanged; no operator re-indexes them.
//!
//! Converting a string that is a canonical decimal integer (`"5"`, `"-3"`)
//! yields `Key::Int`, so `Key::from("5") == Key::from(5)`. Strings such as
//! `"05"`, `"+5"` or `"-0"` stay `Key::Str`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    fn parse_int(s: &str) -> Option<i64> {
        let i = s.parse::<i64>().ok()?;
        // Only the canonical spelling round-trips, which rules out "05" and "+5".
        (i.to_string() == s).then_some(i)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{i}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        // Sequences never get anywhere near i64::MAX pairs.
        Key::Int(i as i64)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        match Key::parse_int(s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s.to_owned()),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match Key::parse_int(&s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s),
        }
    }
}
