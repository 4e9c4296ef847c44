//! The [`Container`] type and its array operations.

use std::borrow::Cow;
use std::collections::HashSet;
use std::ops::{Index, IndexMut};

use indexmap::map::{IntoIter, Iter, Keys, Values};
use tracing::{debug, trace};

use crate::codec::{self, Format};
use crate::compare::{contains_value, loose_eq, Equality};
use crate::error::{MosaicError, Result};
use crate::key::Key;
use crate::pattern::{GrepFlags, Pattern};
use crate::traits::{Countable, Indexed, Sequence};
use crate::value::{Array, Value};

static NULL: Value = Value::Null;

/// An ordered associative array with lookup, filtering and reordering
/// helpers.
///
/// Operations that derive a new array never modify the container. Those
/// that can hand back the target unchanged (`except`, `sort_by_array_keys`
/// and `sort_by_array_values` with an empty argument) return
/// [`Cow::Borrowed`].
///
/// # Example
///
/// ```
/// use mosaic_array::{array, list, Container, Equality, Key, Value};
///
/// let c = Container::make(array! {
///     "numbers" => list![1, 2, 3],
///     "name" => "mosaic",
/// });
///
/// assert_eq!(c.get_item("name"), Some(&Value::from("mosaic")));
/// assert_eq!(c.get_item("missing"), None);
///
/// let other = array! {"n" => list!["1", "2", "3"]};
/// assert!(c.has_intersections(&other, Equality::Loose));
/// assert!(!c.has_intersections(&other, Equality::Strict));
///
/// let only_name = c.only(&[Key::from("name")]);
/// assert_eq!(only_name.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    target: Array,
}

impl Container {
    /// Creates a container around `target`.
    pub fn new(target: Array) -> Self {
        Container { target }
    }

    /// Same as [`Container::new`], for call chains.
    pub fn make(target: Array) -> Self {
        Container::new(target)
    }

    /// Replaces the whole target array.
    pub fn replace_target(&mut self, target: Array) -> &mut Self {
        debug!(
            previous = self.target.len(),
            entries = target.len(),
            "replacing target"
        );
        self.target = target;
        self
    }

    /// Returns the target array.
    pub fn to_array(&self) -> &Array {
        &self.target
    }

    /// Returns the value at `key`.
    ///
    /// Unlike [`Container::get_item`] there is no default: a missing key is
    /// an error. A key holding `Null` is returned as `Null`.
    pub fn to_array_at(&self, key: impl Into<Key>) -> Result<&Value> {
        let key = key.into();
        match self.target.get(&key) {
            Some(value) => Ok(value),
            None => Err(MosaicError::MissingKey(key)),
        }
    }

    /// Consumes the container, returning the target array.
    pub fn into_array(self) -> Array {
        self.target
    }

    /// Returns the value at `key` if the key exists and its value is not
    /// `Null`.
    ///
    /// Falsy values such as `false`, `0`, `""` and empty arrays are present.
    pub fn get_item(&self, key: impl Into<Key>) -> Option<&Value> {
        self.target.offset_get(&key.into())
    }

    /// Returns the value at `key`, or `default` when
    /// [`Container::get_item`] finds nothing.
    pub fn get_item_or<'a>(&'a self, key: impl Into<Key>, default: &'a Value) -> &'a Value {
        self.get_item(key).unwrap_or(default)
    }

    /// Returns `true` if any value of the target is also a value of `other`.
    pub fn has_intersections(&self, other: &Array, mode: Equality) -> bool {
        self.first_intersection(other, mode).is_some()
    }

    /// Returns the first value of the target, in target order, that is also
    /// a value of `other`. Stops at the first hit.
    pub fn first_intersection(&self, other: &Array, mode: Equality) -> Option<&Value> {
        let hit = self
            .target
            .values()
            .find(|value| contains_value(other, value, mode));
        trace!(%mode, found = hit.is_some(), "intersection scan");
        hit
    }

    /// Returns the first truthy value (see [`Value::is_truthy`]).
    pub fn find(&self) -> Option<&Value> {
        self.target.values().find(|value| value.is_truthy())
    }

    /// Returns the first truthy value, or `default` if there is none.
    pub fn find_or<'a>(&'a self, default: &'a Value) -> &'a Value {
        self.find().unwrap_or(default)
    }

    /// Returns the keys whose string form matches `pattern`, in target order.
    ///
    /// Returns `Ok(None)` when no key is selected. See [`Pattern`] for the
    /// pattern syntax.
    pub fn preg_keys(&self, pattern: &str, flags: GrepFlags) -> Result<Option<Vec<Key>>> {
        let pattern = Pattern::parse(pattern)?;
        Ok(self.grep_keys(&pattern, flags))
    }

    /// Returns the selected keys, or `default` when [`Container::preg_keys`]
    /// selects nothing.
    pub fn preg_keys_or(
        &self,
        pattern: &str,
        flags: GrepFlags,
        default: Vec<Key>,
    ) -> Result<Vec<Key>> {
        Ok(self.preg_keys(pattern, flags)?.unwrap_or(default))
    }

    /// Like [`Container::preg_keys`] with an already compiled pattern.
    pub fn grep_keys(&self, pattern: &Pattern, flags: GrepFlags) -> Option<Vec<Key>> {
        let keys: Vec<Key> = self
            .target
            .keys()
            .filter(|key| pattern.selects(&key.to_string(), flags))
            .cloned()
            .collect();
        trace!(pattern = pattern.as_str(), matched = keys.len(), "grep keys");
        non_empty(keys)
    }

    /// Returns the values whose string form (see [`Value::to_string_form`])
    /// matches `pattern`, in target order.
    ///
    /// Values are returned as stored, not as their string form. Returns
    /// `Ok(None)` when no value is selected.
    pub fn preg_values(&self, pattern: &str, flags: GrepFlags) -> Result<Option<Vec<Value>>> {
        let pattern = Pattern::parse(pattern)?;
        Ok(self.grep_values(&pattern, flags))
    }

    /// Returns the selected values, or `default` when
    /// [`Container::preg_values`] selects nothing.
    pub fn preg_values_or(
        &self,
        pattern: &str,
        flags: GrepFlags,
        default: Vec<Value>,
    ) -> Result<Vec<Value>> {
        Ok(self.preg_values(pattern, flags)?.unwrap_or(default))
    }

    /// Like [`Container::preg_values`] with an already compiled pattern.
    pub fn grep_values(&self, pattern: &Pattern, flags: GrepFlags) -> Option<Vec<Value>> {
        let values: Vec<Value> = self
            .target
            .values()
            .filter(|value| pattern.selects(&value.to_string_form(), flags))
            .cloned()
            .collect();
        trace!(pattern = pattern.as_str(), matched = values.len(), "grep values");
        non_empty(values)
    }

    /// Returns the target without `keys`.
    ///
    /// An empty `keys` slice returns the target itself, borrowed. Keys that
    /// are not in the target are ignored.
    pub fn except(&self, keys: &[Key]) -> Cow<'_, Array> {
        if keys.is_empty() {
            return Cow::Borrowed(&self.target);
        }
        let excluded: HashSet<&Key> = keys.iter().collect();
        Cow::Owned(
            self.target
                .iter()
                .filter(|(key, _)| !excluded.contains(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    /// Returns the entries of the target whose keys are in `keys`, in target
    /// order.
    ///
    /// An empty `keys` slice gives an empty array.
    pub fn only(&self, keys: &[Key]) -> Array {
        let wanted: HashSet<&Key> = keys.iter().collect();
        self.target
            .iter()
            .filter(|(key, _)| wanted.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Reorders the target so the keys listed in `order_by` come first, in
    /// that order, followed by the remaining entries in their original order.
    ///
    /// Listed keys missing from the target are skipped. An empty `order_by`
    /// returns the target itself, borrowed.
    pub fn sort_by_array_keys(&self, order_by: &[Key]) -> Cow<'_, Array> {
        if order_by.is_empty() {
            return Cow::Borrowed(&self.target);
        }

        let mut rest = self.target.clone();
        let mut ordered = Array::with_capacity(rest.len());
        for key in order_by {
            if let Some(value) = rest.shift_remove(key) {
                ordered.insert(key.clone(), value);
            }
        }
        ordered.extend(rest);
        Cow::Owned(ordered)
    }

    /// Builds an array ordered by `order_by` values.
    ///
    /// For each value `v` of `order_by`, every key whose target value loosely
    /// equals `v` is inserted, mapped to `v`, in target order. Entries that
    /// match no listed value are left out. A key matched again by a later
    /// value keeps its first position and takes the later value. An empty
    /// `order_by` returns the target itself, borrowed.
    pub fn sort_by_array_values(&self, order_by: &[Value]) -> Cow<'_, Array> {
        if order_by.is_empty() {
            return Cow::Borrowed(&self.target);
        }

        let mut result = Array::new();
        for wanted in order_by {
            for (key, value) in &self.target {
                if loose_eq(value, wanted) {
                    result.insert(key.clone(), wanted.clone());
                }
            }
        }
        trace!(
            entries = self.target.len(),
            kept = result.len(),
            "sorted by values"
        );
        Cow::Owned(result)
    }

    /// Returns a copy of the target without the entries for which
    /// `rule(key, value)` returns `true`. Keys are kept as they are.
    pub fn exclude_by_rule<F>(&self, mut rule: F) -> Array
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        self.target
            .iter()
            .filter(|(key, value)| !rule(*key, *value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Replaces the target with an array decoded from `input`.
    pub fn decode_into(&mut self, input: &str, format: Format) -> Result<&mut Self> {
        let decoded: Container = codec::decode(input, format)?;
        Ok(self.replace_target(decoded.target))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.target.len()
    }

    /// Returns `true` if the target has no entries.
    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// Iterates over `(key, value)` pairs in target order.
    pub fn iter(&self) -> Iter<'_, Key, Value> {
        self.target.iter()
    }

    /// Iterates over keys in target order.
    pub fn keys(&self) -> Keys<'_, Key, Value> {
        self.target.keys()
    }

    /// Iterates over values in target order.
    pub fn values(&self) -> Values<'_, Key, Value> {
        self.target.values()
    }

    /// Appends `value` under the next free integer key and returns that key.
    pub fn push(&mut self, value: impl Into<Value>) -> Key {
        self.target.offset_set(None, value.into())
    }

    /// Stores `value` under `key`, replacing any previous value in place.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.target.insert(key.into(), value.into())
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.target.shift_remove(&key.into())
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

impl Indexed for Container {
    fn offset_get(&self, key: &Key) -> Option<&Value> {
        self.target.offset_get(key)
    }

    fn offset_set(&mut self, key: Option<Key>, value: Value) -> Key {
        self.target.offset_set(key, value)
    }

    fn offset_unset(&mut self, key: &Key) -> Option<Value> {
        self.target.offset_unset(key)
    }
}

impl Sequence for Container {
    fn iter(&self) -> Iter<'_, Key, Value> {
        self.target.iter()
    }

    fn values(&self) -> Values<'_, Key, Value> {
        self.target.values()
    }
}

impl Countable for Container {
    fn count(&self) -> usize {
        self.target.len()
    }
}

/// Missing keys read as `Null`.
impl<K: Into<Key>> Index<K> for Container {
    type Output = Value;

    fn index(&self, key: K) -> &Value {
        self.target.get(&key.into()).unwrap_or(&NULL)
    }
}

/// Missing keys are inserted as `Null` before being handed out.
impl<K: Into<Key>> IndexMut<K> for Container {
    fn index_mut(&mut self, key: K) -> &mut Value {
        self.target.entry(key.into()).or_insert(Value::Null)
    }
}

impl From<Array> for Container {
    fn from(target: Array) -> Self {
        Container::new(target)
    }
}

impl From<Container> for Array {
    fn from(container: Container) -> Self {
        container.target
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Container {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Container::new(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for Container {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.target.extend(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.target.iter()
    }
}

impl IntoIterator for Container {
    type Item = (Key, Value);
    type IntoIter = IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.target.into_iter()
    }
}
