//! Array literals.

/// Builds an [`Array`](crate::Array) from `key => value` pairs.
///
/// Keys go through [`Key::from`](crate::Key) and values through
/// [`Value::from`](crate::Value). A repeated key keeps its first position
/// and takes the last value.
///
/// ```
/// use mosaic_array::{array, list, Key, Value};
///
/// let a = array! {
///     "name" => "mosaic",
///     0 => list![1, 2],
/// };
/// assert_eq!(a[&Key::from("name")], Value::from("mosaic"));
/// assert_eq!(a.len(), 2);
/// ```
#[macro_export]
macro_rules! array {
    () => {
        $crate::Array::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut array = $crate::Array::new();
        $(
            array.insert($crate::Key::from($key), $crate::Value::from($value));
        )+
        array
    }};
}

/// Builds a densely indexed [`Array`](crate::Array) (keys `0..n`).
///
/// ```
/// use mosaic_array::{list, Key, Value};
///
/// let l = list![1, "two", 3.0];
/// assert_eq!(l[&Key::int(1)], Value::from("two"));
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::Array::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::list_from([$($crate::Value::from($value)),+])
    };
}
