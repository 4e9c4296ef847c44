//! Mosaic Array - ordered associative array container with helpers.
//!
//! A [`Container`] wraps an [`Array`] (insertion-ordered map from [`Key`] to
//! [`Value`]) and provides:
//!
//! - Lookups with defaults: `get_item`, `find`, strict `to_array_at`
//! - Intersection detection with loose or strict equality
//! - Regex filtering of keys and values with delimited patterns
//! - Subsets: `except`, `only`, `exclude_by_rule`
//! - Reordering by an external list of keys or values
//! - Keyed access, iteration, counting and JSON/YAML encoding
//!
//! # Quick Start
//!
//! ```rust
//! use mosaic_array::{array, list, Container, GrepFlags, Key, Value};
//!
//! let c = Container::make(array! {
//!     "second" => "2",
//!     "first" => "1",
//!     0 => "last",
//! });
//!
//! // Reorder by keys
//! let sorted = c.sort_by_array_keys(&[Key::int(0), Key::from("second")]);
//! let keys: Vec<String> = sorted.keys().map(|k| k.to_string()).collect();
//! assert_eq!(keys, ["0", "second", "first"]);
//!
//! // Filter keys by pattern
//! let keys = c.preg_keys("/^.*s.*$/", GrepFlags::NONE).unwrap();
//! assert_eq!(keys, Some(vec![Key::from("second"), Key::from("first")]));
//!
//! // First truthy value
//! assert_eq!(c.find(), Some(&Value::from("2")));
//! ```
//!
//! # Equality
//!
//! | Mode | `3 == "3"` | `1 == 1.0` | `[1, 2] == ["1", "2"]` |
//! |------|-----------|-----------|------------------------|
//! | [`Equality::Loose`] | yes | yes | yes |
//! | [`Equality::Strict`] | no | no | no |
//!
//! See the [`compare`] module for the full coercion table.
//!
//! # Truthiness
//!
//! [`Container::find`] uses [`Value::is_truthy`]: null, `false`, `0`, `0.0`,
//! `""`, `"0"` and empty arrays are falsy. A non-empty array is truthy even
//! when every element inside it is falsy.

mod macros;

mod codec;
pub mod compare;
mod container;
mod error;
mod key;
mod pattern;
mod traits;
mod value;

// Re-export public API
pub use codec::Format;
pub use compare::{loose_eq, strict_eq, strict_eq_arrays, Equality};
pub use container::Container;
pub use error::{MosaicError, Result};
pub use key::Key;
pub use pattern::{GrepFlags, Modifiers, Pattern};
pub use traits::{next_index, Codec, Countable, Indexed, Sequence};
pub use value::{is_list, list_from, Array, Number, Value};
