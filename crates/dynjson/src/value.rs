//! The dynamically-typed JSON tree.
//!
//! A [`Value`] owns its whole subtree: arrays and objects hold their children by
//! value, so cloning is a deep copy and dropping releases every nested container.
//! Objects are [`BTreeMap`]s, which is why iteration and serialization always visit
//! keys in ascending order.
//!
//! # Auto-vivification
//!
//! Mutable indexed access creates what it touches. `v[3]` on a non-Array discards the
//! old content, makes `v` an empty Array and pads it with Null up to index 3;
//! `v["k"]` on a non-Object discards the old content and inserts `"k": null`.
//! Read-only indexing (`&v[3]`, `&v["k"]` through [`Index`]) never mutates, and
//! [`Value::has_index`] / [`Value::has_key`] are the presence tests.

use crate::encoder;
use crate::error::{JsonError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Object storage. Keys are unique and iterate in ascending byte order.
pub type Map = BTreeMap<String, Value>;

static NULL: Value = Value::Null;

/// The variant tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Double,
    String,
    Array,
    Object,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Double => "double",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A JSON value. Integral literals are `Int`, literals with a fraction or exponent
/// are `Double`; the two never compare equal to each other.
///
/// Equality is structural. Arrays compare element-wise in order, objects compare by
/// key set and per-key value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// The zero value of `kind`: `false`, `0`, `0.0`, `""`, `[]` or `{}`.
    pub fn of_kind(kind: Kind) -> Value {
        match kind {
            Kind::Null => Value::Null,
            Kind::Bool => Value::Bool(false),
            Kind::Int => Value::Int(0),
            Kind::Double => Value::Double(0.0),
            Kind::String => Value::String(String::new()),
            Kind::Array => Value::Array(Vec::new()),
            Kind::Object => Value::Object(Map::new()),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Double(_) => Kind::Double,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    // ------------------------------------------------------------------
    // Narrowing accessors. No numeric coercion: an Int is not a Double.
    // ------------------------------------------------------------------

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(JsonError::mismatch(Kind::Bool, other.kind())),
        }
    }

    pub fn as_i64(&self) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(JsonError::mismatch(Kind::Int, other.kind())),
        }
    }

    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Value::Double(d) => Ok(*d),
            other => Err(JsonError::mismatch(Kind::Double, other.kind())),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(JsonError::mismatch(Kind::String, other.kind())),
        }
    }

    pub fn as_array(&self) -> Result<&Vec<Value>> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(JsonError::mismatch(Kind::Array, other.kind())),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(JsonError::mismatch(Kind::Array, other.kind())),
        }
    }

    pub fn as_object(&self) -> Result<&Map> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(JsonError::mismatch(Kind::Object, other.kind())),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Map> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(JsonError::mismatch(Kind::Object, other.kind())),
        }
    }

    // ------------------------------------------------------------------
    // Auto-vivifying access
    // ------------------------------------------------------------------

    /// Mutable slot at `index`, turning `self` into an Array and padding it with
    /// Null as needed.
    ///
    /// The retyping happens before the sign check, so a negative index on a
    /// non-Array still leaves `self` as an empty Array.
    pub fn at_mut(&mut self, index: i64) -> Result<&mut Value> {
        let items = self.vivify_array();
        let index = usize::try_from(index)
            .map_err(|_| JsonError::InvalidArgument(format!("array index {index} < 0")))?;
        Ok(slot(items, index))
    }

    /// Mutable slot for `key`, turning `self` into an Object and inserting
    /// `key: null` if it is absent.
    pub fn entry(&mut self, key: &str) -> &mut Value {
        self.vivify_object().entry(key.to_owned()).or_default()
    }

    /// Appends `value`, turning `self` into an Array first if it is not one.
    pub fn append(&mut self, value: impl Into<Value>) {
        self.vivify_array().push(value.into());
    }

    fn vivify_array(&mut self) -> &mut Vec<Value> {
        match self {
            Value::Array(items) => items,
            other => {
                *other = Value::Array(Vec::new());
                other.vivify_array()
            }
        }
    }

    fn vivify_object(&mut self) -> &mut Map {
        match self {
            Value::Object(map) => map,
            other => {
                *other = Value::Object(Map::new());
                other.vivify_object()
            }
        }
    }

    // ------------------------------------------------------------------
    // Non-mutating lookup, presence and removal
    // ------------------------------------------------------------------

    pub fn get(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }

    pub fn get_key(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// True iff `self` is an Array and `index` is in range.
    pub fn has_index(&self, index: i64) -> bool {
        match (self, usize::try_from(index)) {
            (Value::Array(items), Ok(index)) => index < items.len(),
            _ => false,
        }
    }

    /// True iff `self` is an Object containing `key`.
    pub fn has_key(&self, key: &str) -> bool {
        matches!(self, Value::Object(map) if map.contains_key(key))
    }

    /// Removes the element at `index`, shifting later elements down.
    /// A no-op returning `None` for non-Arrays and out-of-range indices.
    pub fn remove_index(&mut self, index: i64) -> Option<Value> {
        match (self, usize::try_from(index)) {
            (Value::Array(items), Ok(index)) if index < items.len() => Some(items.remove(index)),
            _ => None,
        }
    }

    /// Removes `key`. A no-op returning `None` for non-Objects and absent keys.
    pub fn remove_key(&mut self, key: &str) -> Option<Value> {
        match self {
            Value::Object(map) => map.remove(key),
            _ => None,
        }
    }

    /// Moves the payload out, leaving `self` as Null.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Drops the payload (and every nested child), leaving `self` as Null.
    pub fn clear(&mut self) {
        *self = Value::Null;
    }

    /// Number of array elements or object entries; 0 for every other kind.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the elements of an Array. Any other kind is a type mismatch.
    pub fn iter(&self) -> Result<std::slice::Iter<'_, Value>> {
        self.as_array().map(|items| items.iter())
    }

    pub fn iter_mut(&mut self) -> Result<std::slice::IterMut<'_, Value>> {
        self.as_array_mut().map(|items| items.iter_mut())
    }

    /// Canonical compact JSON text. Same output as the `Display` impl.
    pub fn to_json_string(&self) -> String {
        encoder::serialize(self)
    }
}

/// Grows `items` so `index` is in range. An index past any possible length fails
/// the allocation and leaves the existing elements in place.
fn slot(items: &mut Vec<Value>, index: usize) -> &mut Value {
    if index >= items.len() {
        let len = index.checked_add(1).unwrap_or(usize::MAX);
        items.resize_with(len, Value::default);
    }
    &mut items[index]
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encoder::serialize(self))
    }
}

// ----------------------------------------------------------------------
// Indexing
// ----------------------------------------------------------------------

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get(index).unwrap_or(&NULL)
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        slot(self.vivify_array(), index)
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get_key(key).unwrap_or(&NULL)
    }
}

impl IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.entry(key)
    }
}

// ----------------------------------------------------------------------
// Conversions
// ----------------------------------------------------------------------

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl From<Kind> for Value {
    fn from(kind: Kind) -> Self {
        Value::of_kind(kind)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}

impl TryFrom<&Value> for bool {
    type Error = JsonError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_bool()
    }
}

impl TryFrom<&Value> for i64 {
    type Error = JsonError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_i64()
    }
}

impl TryFrom<&Value> for f64 {
    type Error = JsonError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_f64()
    }
}

impl TryFrom<&Value> for String {
    type Error = JsonError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_str().map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_kind_builds_zero_values() {
        assert_eq!(Value::of_kind(Kind::Bool), Value::Bool(false));
        assert_eq!(Value::of_kind(Kind::Int), Value::Int(0));
        assert_eq!(Value::of_kind(Kind::Double), Value::Double(0.0));
        assert_eq!(Value::of_kind(Kind::String), Value::from(""));
        assert_eq!(Value::of_kind(Kind::Array).len(), 0);
        assert!(Value::of_kind(Kind::Object).is_object());
    }

    #[test]
    fn kind_matches_variant() {
        for kind in [
            Kind::Null,
            Kind::Bool,
            Kind::Int,
            Kind::Double,
            Kind::String,
            Kind::Array,
            Kind::Object,
        ] {
            assert_eq!(Value::of_kind(kind).kind(), kind);
        }
    }

    #[test]
    fn read_only_index_does_not_vivify() {
        let v = Value::Null;
        assert!(v[5].is_null());
        assert!(v["missing"].is_null());
        assert!(v.is_null());
    }

    #[test]
    fn take_leaves_null_behind() {
        let mut v = Value::from("moved");
        let taken = v.take();
        assert!(v.is_null());
        assert_eq!(taken.as_str().unwrap(), "moved");
    }
}
