//! Serde support and text encoding.
//!
//! Arrays whose keys are exactly `0..n` serialize as sequences; every other
//! array serializes as a map. Integer keys are emitted as integers (JSON
//! quotes them, as it does all object keys) and map keys are canonicalised
//! again on the way back in, so encoding and decoding reproduces the same
//! keys, values and order.
//!
//! JSON has no representation for NaN or infinities, so encoding a value
//! that holds one as JSON fails with [`MosaicError::Json`]. YAML writes them
//! as `.nan` and `.inf`.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, DeserializeOwned, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::container::Container;
use crate::error::{MosaicError, Result};
use crate::key::{Key, Repr};
use crate::traits::Codec;
use crate::value::{float_to_string, is_list, Array, Value};

/// Text format used by [`Codec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// Compact JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

impl Format {
    /// Returns the display name of this format.
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = MosaicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            _ => Err(MosaicError::UnknownFormat(s.to_string())),
        }
    }
}

/// Serializes any serde value in the given format.
pub(crate) fn encode<T: Serialize + ?Sized>(data: &T, format: Format) -> Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string(data)?),
        Format::Yaml => Ok(serde_yaml::to_string(data)?),
    }
}

/// Deserializes a serde value from text in the given format.
pub(crate) fn decode<T: DeserializeOwned>(input: &str, format: Format) -> Result<T> {
    debug!(%format, bytes = input.len(), "decoding");
    match format {
        Format::Json => Ok(serde_json::from_str(input)?),
        Format::Yaml => Ok(serde_yaml::from_str(input)?),
    }
}

/// serde_json writes non-finite floats as `null`; refuse them instead.
fn reject_non_finite<'a>(mut values: impl Iterator<Item = &'a Value>) -> Result<()> {
    values.try_for_each(|value| match value {
        Value::Float(f) if !f.is_finite() => Err(MosaicError::Json(
            <serde_json::Error as serde::ser::Error>::custom(format!(
                "{} cannot be encoded as JSON",
                float_to_string(*f)
            )),
        )),
        Value::Array(array) => reject_non_finite(array.values()),
        _ => Ok(()),
    })
}

impl Codec for Container {
    fn encode(&self, format: Format) -> Result<String> {
        if format == Format::Json {
            reject_non_finite(self.values())?;
        }
        encode(self, format)
    }

    fn decode(input: &str, format: Format) -> Result<Self> {
        decode(input, format)
    }
}

impl Codec for Value {
    fn encode(&self, format: Format) -> Result<String> {
        if format == Format::Json {
            reject_non_finite(std::iter::once(self))?;
        }
        encode(self, format)
    }

    fn decode(input: &str, format: Format) -> Result<Self> {
        decode(input, format)
    }
}

// ============================================================================
// Key
// ============================================================================

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.0 {
            Repr::Int(n) => serializer.serialize_i64(*n),
            Repr::Str(s) => serializer.serialize_str(s),
        }
    }
}

struct KeyVisitor;

impl Visitor<'_> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or string key")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Key, E> {
        Ok(Key::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Key, E> {
        Ok(Key::int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Key, E> {
        Ok(Key::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Key, E> {
        Key::try_from(&Value::Float(v)).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Key, E> {
        Ok(Key::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Key, E> {
        Ok(Key::from(v))
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(KeyVisitor)
    }
}

// ============================================================================
// Value and Array
// ============================================================================

fn serialize_array<S: Serializer>(array: &Array, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if is_list(array) {
        serializer.collect_seq(array.values())
    } else {
        serializer.collect_map(array.iter())
    }
}

fn array_from_seq<'de, A: SeqAccess<'de>>(mut seq: A) -> std::result::Result<Array, A::Error> {
    let mut array = Array::with_capacity(seq.size_hint().unwrap_or(0));
    while let Some(value) = seq.next_element::<Value>()? {
        let index = array.len() as i64;
        array.insert(Key::int(index), value);
    }
    Ok(array)
}

fn array_from_map<'de, A: MapAccess<'de>>(mut map: A) -> std::result::Result<Array, A::Error> {
    let mut array = Array::with_capacity(map.size_hint().unwrap_or(0));
    while let Some((key, value)) = map.next_entry::<Key, Value>()? {
        array.insert(key, value);
    }
    Ok(array)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(array) => serialize_array(array, serializer),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> std::result::Result<Value, A::Error> {
        array_from_seq(seq).map(Value::Array)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> std::result::Result<Value, A::Error> {
        array_from_map(map).map(Value::Array)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

// ============================================================================
// Container
// ============================================================================

impl Serialize for Container {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_array(self.to_array(), serializer)
    }
}

struct ContainerVisitor;

impl<'de> Visitor<'de> for ContainerVisitor {
    type Value = Container;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence or map")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Container, E> {
        Ok(Container::default())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> std::result::Result<Container, A::Error> {
        array_from_seq(seq).map(Container::new)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> std::result::Result<Container, A::Error> {
        array_from_map(map).map(Container::new)
    }
}

impl<'de> Deserialize<'de> for Container {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ContainerVisitor)
    }
}
