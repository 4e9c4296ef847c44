//! Array keys.
//!
//! A [`Key`] is either an integer or a string. String keys that spell a
//! canonical decimal integer are stored as integers, so `"3"` and `3` address
//! the same entry.

use std::fmt;

use crate::error::{MosaicError, Result};
use crate::value::Value;

/// Key of an [`Array`](crate::Array) entry.
///
/// The representation is private so every key is canonical: there is no way
/// to build a string key that spells an integer.
///
/// # Example
///
/// ```
/// use mosaic_array::Key;
///
/// assert_eq!(Key::from("42"), Key::int(42));
/// assert!(Key::from("042").is_str());
/// assert_eq!(Key::from("name").to_string(), "name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(pub(crate) Repr);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Repr {
    Int(i64),
    /// Never a canonical integer.
    Str(String),
}

impl Key {
    /// Integer key.
    pub fn int(n: i64) -> Self {
        Key(Repr::Int(n))
    }

    /// Returns `true` if this is an integer key.
    pub fn is_int(&self) -> bool {
        matches!(self.0, Repr::Int(_))
    }

    /// Returns `true` if this is a string key.
    pub fn is_str(&self) -> bool {
        matches!(self.0, Repr::Str(_))
    }

    /// Extracts the integer, if this is an integer key.
    pub fn as_int(&self) -> Option<i64> {
        match self.0 {
            Repr::Int(n) => Some(n),
            Repr::Str(_) => None,
        }
    }

    /// Extracts the string, if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match &self.0 {
            Repr::Int(_) => None,
            Repr::Str(s) => Some(s),
        }
    }
}

/// Parses `s` as an integer key if it is the canonical decimal form of an
/// `i64`: no sign other than a leading `-`, no leading zeros, no `-0`.
pub(crate) fn canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if digits == "0" && s.len() > 1 {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Int(n) => write!(f, "{n}"),
            Repr::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        match canonical_int(s) {
            Some(n) => Key::int(n),
            None => Key(Repr::Str(s.to_string())),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match canonical_int(&s) {
            Some(n) => Key::int(n),
            None => Key(Repr::Str(s)),
        }
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::from(s.as_str())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::int(b as i64)
    }
}

macro_rules! key_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(n: $t) -> Self {
                    Key::int(n as i64)
                }
            }
        )*
    };
}

key_from_int!(i8, i16, i32, i64, isize, u8, u16, u32);

/// Integers past `i64::MAX` keep their decimal spelling as a string key.
macro_rules! key_from_wide_uint {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(n: $t) -> Self {
                    i64::try_from(n).map_or_else(|_| Key(Repr::Str(n.to_string())), Key::int)
                }
            }
        )*
    };
}

key_from_wide_uint!(u64, usize);

/// Casts a value to a key the way array subscripts do: booleans become 0/1,
/// null becomes `""`, floats are truncated. Arrays cannot be keys.
impl TryFrom<&Value> for Key {
    type Error = MosaicError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Key(Repr::Str(String::new()))),
            Value::Bool(b) => Ok(Key::from(*b)),
            Value::Int(n) => Ok(Key::int(*n)),
            Value::Float(f) if f.is_finite() => Ok(Key::int(f.trunc() as i64)),
            Value::Float(_) => Err(MosaicError::InvalidKey("non-finite float")),
            Value::String(s) => Ok(Key::from(s.as_str())),
            Value::Array(_) => Err(MosaicError::InvalidKey("array")),
        }
    }
}

impl TryFrom<Value> for Key {
    type Error = MosaicError;

    fn try_from(value: Value) -> Result<Self> {
        Key::try_from(&value)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key.0 {
            Repr::Int(n) => Value::Int(n),
            Repr::Str(s) => Value::String(s),
        }
    }
}
