//! Container capability traits.
//!
//! Each trait covers one protocol a container takes part in: keyed access
//! ([`Indexed`]), ordered iteration ([`Sequence`]), size ([`Countable`]) and
//! text encoding ([`Codec`]). [`Container`](crate::Container) implements all
//! four; [`Array`] implements the first three directly.

use indexmap::map::{Iter, Values};
use indexmap::IndexMap;

use crate::codec::Format;
use crate::error::Result;
use crate::key::Key;
use crate::value::{Array, Value};

/// Keyed read/write access.
///
/// # Example
///
/// ```
/// use mosaic_array::{list, Container, Indexed, Key, Value};
///
/// let mut c = Container::new(list![1, 2, 3]);
/// let key = c.offset_set(None, Value::from(4));
/// assert_eq!(key, Key::int(3));
/// assert!(c.offset_exists(&Key::int(3)));
///
/// c.offset_set(Some(Key::from("name")), Value::Null);
/// assert!(!c.offset_exists(&Key::from("name")));
/// ```
pub trait Indexed {
    /// Returns the value at `key`, or `None` if it is absent or null.
    fn offset_get(&self, key: &Key) -> Option<&Value>;

    /// Stores `value` at `key`, or appends it when `key` is `None`.
    ///
    /// Returns the key the value was stored under.
    fn offset_set(&mut self, key: Option<Key>, value: Value) -> Key;

    /// Removes `key`, keeping the order of the remaining entries.
    fn offset_unset(&mut self, key: &Key) -> Option<Value>;

    /// Returns `true` if `key` holds a non-null value.
    fn offset_exists(&self, key: &Key) -> bool {
        self.offset_get(key).is_some()
    }
}

/// Ordered, restartable iteration.
///
/// Iterators borrow the live array, so every new iteration sees the
/// entries as they are at that moment.
pub trait Sequence {
    /// Iterates over `(key, value)` pairs in insertion order.
    fn iter(&self) -> Iter<'_, Key, Value>;

    /// Iterates over values in insertion order.
    fn values(&self) -> Values<'_, Key, Value>;
}

/// Entry count.
pub trait Countable {
    /// Returns the number of entries.
    fn count(&self) -> usize;
}

/// Encoding to and from text.
pub trait Codec: Sized {
    /// Encodes the full state in the given format.
    fn encode(&self, format: Format) -> Result<String>;

    /// Rebuilds a value from text produced by [`Codec::encode`].
    fn decode(input: &str, format: Format) -> Result<Self>;
}

/// The key an append lands on: one past the greatest integer key, and never
/// below zero.
pub fn next_index(array: &Array) -> i64 {
    array
        .keys()
        .filter_map(Key::as_int)
        .max()
        .map_or(0, |max| max.saturating_add(1).max(0))
}

impl Indexed for Array {
    fn offset_get(&self, key: &Key) -> Option<&Value> {
        self.get(key).filter(|value| !value.is_null())
    }

    fn offset_set(&mut self, key: Option<Key>, value: Value) -> Key {
        let key = key.unwrap_or_else(|| Key::int(next_index(self)));
        self.insert(key.clone(), value);
        key
    }

    fn offset_unset(&mut self, key: &Key) -> Option<Value> {
        self.shift_remove(key)
    }
}

impl Sequence for Array {
    fn iter(&self) -> Iter<'_, Key, Value> {
        IndexMap::iter(self)
    }

    fn values(&self) -> Values<'_, Key, Value> {
        IndexMap::values(self)
    }
}

impl Countable for Array {
    fn count(&self) -> usize {
        self.len()
    }
}
