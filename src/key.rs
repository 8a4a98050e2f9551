//! Canonical key values used for grouping, indexing, joining and pairing.
//!
//! Rows are free-form, but keys must be comparable and hashable. [`Key`] is the
//! canonical form every selector result is converted into:
//!
//! - numbers compare by value (`1` and `1.0` are the same key) and integers
//!   are exact, so ids beyond 2^53 do not collide,
//! - composite keys are a list of `(name, key)` pairs sorted by name, so two
//!   composite keys built from the same fields in a different order are equal,
//! - a missing field and an explicit `null` are both [`Key::Null`], which sorts
//!   after every other key.
//!
//! ```
//! use ironquery::Key;
//! use serde_json::json;
//!
//! assert_eq!(Key::from(&json!(1)), Key::from(1.0));
//! assert_eq!(
//!     Key::composite([("b", Key::from(2)), ("a", Key::from(1))]),
//!     Key::from(&json!({"a": 1, "b": 2})),
//! );
//! assert_eq!(Key::from("x").to_string(), "x");
//! ```

use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;

/// 2^127: integral floats at or above this magnitude stay floats.
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// A hashable, totally ordered key.
///
/// Variant order is the sort order across kinds; `Null` is last.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Bool(bool),
    Number(Numeric),
    Str(String),
    List(Vec<Key>),
    /// Named fields, sorted by name.
    Composite(Vec<(String, Key)>),
    Null,
}

/// A numeric key value.
///
/// Integral values are held exactly as integers, whatever their source type,
/// so `1`, `1u64` and `1.0` are one key while `2^53` and `2^53 + 1` stay
/// distinct. Other values are ordered floats. Ordering is numeric across both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Numeric(Repr);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Repr {
    Int(i128),
    /// Never integral within the `i128` range.
    Float(OrderedFloat<f64>),
}

impl Numeric {
    /// Normalize a float: integral values become exact integers.
    #[must_use]
    pub fn from_f64(f: f64) -> Self {
        if f.is_finite() && f.fract() == 0.0 && (-I128_BOUND..I128_BOUND).contains(&f) {
            Numeric(Repr::Int(f as i128))
        } else {
            Numeric(Repr::Float(OrderedFloat(f)))
        }
    }

    /// The exact integer value, for integral numbers.
    #[must_use]
    pub fn as_i128(self) -> Option<i128> {
        match self.0 {
            Repr::Int(i) => Some(i),
            Repr::Float(_) => None,
        }
    }

    /// The value as a float; large integers may round.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self.0 {
            Repr::Int(i) => i as f64,
            Repr::Float(f) => f.0,
        }
    }

    fn to_value(self) -> Value {
        match self.0 {
            Repr::Int(i) => i64::try_from(i)
                .map(Value::from)
                .or_else(|_| u64::try_from(i).map(Value::from))
                .unwrap_or_else(|_| float_to_value(i as f64)),
            Repr::Float(f) => float_to_value(f.0),
        }
    }
}

fn float_to_value(f: f64) -> Value {
    serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
}

/// Compare an integer with a float that is NaN, infinite, non-integral or
/// outside the `i128` range.
fn cmp_int_float(i: i128, f: f64) -> Ordering {
    if f.is_nan() {
        // NaN sorts above every number, as in `OrderedFloat`.
        return Ordering::Less;
    }
    let floor = f.floor();
    if floor >= I128_BOUND {
        Ordering::Less
    } else if floor < -I128_BOUND {
        Ordering::Greater
    } else if i <= floor as i128 {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

impl Ord for Numeric {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Repr::Int(a), Repr::Int(b)) => a.cmp(&b),
            (Repr::Float(a), Repr::Float(b)) => a.cmp(&b),
            (Repr::Int(a), Repr::Float(b)) => cmp_int_float(a, b.0),
            (Repr::Float(a), Repr::Int(b)) => cmp_int_float(b, a.0).reverse(),
        }
    }
}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Int(i) => write!(f, "{i}"),
            Repr::Float(x) if x.0.is_nan() => f.write_str("NaN"),
            Repr::Float(x) if x.0.is_infinite() => {
                f.write_str(if x.0 > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Repr::Float(x) => write!(f, "{}", x.0),
        }
    }
}

impl From<&serde_json::Number> for Numeric {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Numeric(Repr::Int(i128::from(i)))
        } else if let Some(u) = n.as_u64() {
            Numeric(Repr::Int(i128::from(u)))
        } else {
            Numeric::from_f64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl Key {
    /// Build a composite key, sorting the fields by name.
    ///
    /// The sort is stable, so repeated names keep their relative order.
    pub fn composite<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Key)>,
        S: Into<String>,
    {
        let mut fields: Vec<(String, Key)> = fields
            .into_iter()
            .map(|(name, key)| (name.into(), key))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        Key::Composite(fields)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Key::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Key::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// Look up one field of a composite key.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Key> {
        match self {
            Key::Composite(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, k)| k),
            _ => None,
        }
    }

    /// Convert back into a JSON value.
    ///
    /// Integers within the `i64`/`u64` range become JSON integers; non-finite
    /// numbers become `null`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Key::Null => Value::Null,
            Key::Bool(b) => Value::Bool(*b),
            Key::Number(n) => n.to_value(),
            Key::Str(s) => Value::String(s.clone()),
            Key::List(items) => Value::Array(items.iter().map(Key::to_value).collect()),
            Key::Composite(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(name, key)| (name.clone(), key.to_value()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

/// Renders the key the way it would appear as a record property name.
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Null => f.write_str("null"),
            Key::Bool(b) => write!(f, "{b}"),
            Key::Number(n) => write!(f, "{n}"),
            Key::Str(s) => f.write_str(s),
            Key::List(_) | Key::Composite(_) => write!(f, "{}", self.to_value()),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl From<&Value> for Key {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Key::Null,
            Value::Bool(b) => Key::Bool(*b),
            Value::Number(n) => Key::Number(Numeric::from(n)),
            Value::String(s) => Key::Str(s.clone()),
            Value::Array(items) => Key::List(items.iter().map(Key::from).collect()),
            Value::Object(fields) => {
                Key::composite(fields.iter().map(|(name, v)| (name.as_str(), Key::from(v))))
            }
        }
    }
}

impl From<Value> for Key {
    fn from(value: Value) -> Self {
        Key::from(&value)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Str(s.clone())
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

impl<K: Into<Key>> From<Option<K>> for Key {
    fn from(opt: Option<K>) -> Self {
        opt.map_or(Key::Null, Into::into)
    }
}

macro_rules! int_key {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(n: $t) -> Self {
                    Key::Number(Numeric(Repr::Int(n as i128)))
                }
            }
        )*
    };
}

int_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<f64> for Key {
    fn from(n: f64) -> Self {
        Key::Number(Numeric::from_f64(n))
    }
}

impl From<f32> for Key {
    fn from(n: f32) -> Self {
        Key::Number(Numeric::from_f64(f64::from(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn integers_and_floats_are_one_key() {
        let mut seen = HashSet::new();
        seen.insert(Key::from(&json!(3)));
        assert!(seen.contains(&Key::from(3.0)));
        assert!(seen.contains(&Key::from(3u8)));
    }

    #[test]
    fn null_sorts_last() {
        let mut keys = vec![Key::Null, Key::from("b"), Key::from(2), Key::from(true)];
        keys.sort();
        assert_eq!(
            keys,
            vec![Key::from(true), Key::from(2), Key::from("b"), Key::Null]
        );
    }

    #[test]
    fn composite_is_order_insensitive() {
        let a = Key::composite([("x", Key::from(1)), ("y", Key::from("q"))]);
        let b = Key::composite([("y", Key::from("q")), ("x", Key::from(1))]);
        assert_eq!(a, b);
        assert_eq!(a.field("y"), Some(&Key::from("q")));
        assert_eq!(a.to_string(), r#"{"x":1,"y":"q"}"#);
    }

    #[test]
    fn display_matches_property_names() {
        assert_eq!(Key::from(1).to_string(), "1");
        assert_eq!(Key::from(1.5).to_string(), "1.5");
        assert_eq!(Key::Null.to_string(), "null");
        assert_eq!(Key::from(f64::INFINITY).to_string(), "Infinity");
    }

    #[test]
    fn large_integers_stay_distinct() {
        let a = Key::from(&json!(9_007_199_254_740_992u64));
        let b = Key::from(&json!(9_007_199_254_740_993u64));
        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(b.to_string(), "9007199254740993");
        assert_eq!(Key::from(&json!(u64::MAX)).to_value(), json!(u64::MAX));
    }

    #[test]
    fn ints_and_floats_order_numerically() {
        let mut keys = vec![
            Key::from(3),
            Key::from(f64::NAN),
            Key::from(1.5),
            Key::from(-2),
            Key::from(f64::NEG_INFINITY),
            Key::from(2.0),
        ];
        keys.sort();
        let shown: Vec<String> = keys.iter().map(Key::to_string).collect();
        assert_eq!(shown, vec!["-Infinity", "-2", "1.5", "2", "3", "NaN"]);
    }

    #[test]
    fn round_trips_to_json() {
        let v = json!({"a": 1, "b": [true, "s", null], "c": 2.5});
        assert_eq!(Key::from(&v).to_value(), v);
    }
}
