use std::fmt;

/// An object entry: an owned key string paired with an owned child value.
/// Duplicate keys are permitted and retained in insertion order — lookups
/// return the first match.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub key: String,
    pub value: Value,
}

impl Member {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// A node in the JSON tree. Each variant exclusively owns its payload;
/// arrays own their elements and objects own their members, so dropping a
/// `Value` recursively drops every descendant with no sharing or cycles.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// A finite IEEE-754 double. Parsing and the `set_number` mutator both
    /// reject `NaN`/`±inf`; constructing one directly via `Value::Number` is
    /// a caller error the accessors do not guard against.
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Vec<Member>),
}

/// The seven JSON kinds, exposed separately from `Value` so callers can
/// switch on `type_of()` without matching out payloads they don't need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Value {
    /// Builds an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Builds an empty object.
    pub fn object() -> Self {
        Value::Object(Vec::new())
    }

    pub fn type_of(&self) -> Type {
        match self {
            Value::Null => Type::Null,
            Value::Bool(_) => Type::Bool,
            Value::Number(_) => Type::Number,
            Value::String(_) => Type::String,
            Value::Array(_) => Type::Array,
            Value::Object(_) => Type::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Reads the boolean payload. Panics if `self` is not `Bool` — reading
    /// the wrong variant is a programming error, not a recoverable one.
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            other => panic!("as_bool called on {:?}", other.type_of()),
        }
    }

    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            other => panic!("as_number called on {:?}", other.type_of()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Value::String(s) => s,
            other => panic!("as_str called on {:?}", other.type_of()),
        }
    }

    pub fn as_array(&self) -> &[Value] {
        match self {
            Value::Array(a) => a,
            other => panic!("as_array called on {:?}", other.type_of()),
        }
    }

    pub fn as_array_mut(&mut self) -> &mut Vec<Value> {
        match self {
            Value::Array(a) => a,
            other => panic!("as_array_mut called on {:?}", other.type_of()),
        }
    }

    pub fn as_object(&self) -> &[Member] {
        match self {
            Value::Object(o) => o,
            other => panic!("as_object called on {:?}", other.type_of()),
        }
    }

    pub fn as_object_mut(&mut self) -> &mut Vec<Member> {
        match self {
            Value::Object(o) => o,
            other => panic!("as_object_mut called on {:?}", other.type_of()),
        }
    }

    pub fn array_len(&self) -> usize {
        self.as_array().len()
    }

    pub fn array_at(&self, index: usize) -> &Value {
        &self.as_array()[index]
    }

    pub fn object_len(&self) -> usize {
        self.as_object().len()
    }

    pub fn object_key_at(&self, index: usize) -> &str {
        &self.as_object()[index].key
    }

    pub fn object_value_at(&self, index: usize) -> &Value {
        &self.as_object()[index].value
    }

    /// Releases the current payload and installs `Null`.
    pub fn set_null(&mut self) {
        *self = Value::Null;
    }

    pub fn set_bool(&mut self, b: bool) {
        *self = Value::Bool(b);
    }

    /// Releases the current payload and installs `Number(n)`. `n` must be
    /// finite; upholding that outside the parser (which enforces it via
    /// `NumberOverflow`) is the caller's responsibility.
    pub fn set_number(&mut self, n: f64) {
        *self = Value::Number(n);
    }

    pub fn set_string(&mut self, s: impl Into<String>) {
        *self = Value::String(s.into());
    }

    pub fn set_array(&mut self) {
        *self = Value::array();
    }

    pub fn set_object(&mut self) {
        *self = Value::object();
    }

    /// Appends `element` to an existing array. Requires `self` already be
    /// `Array`.
    pub fn append_element(&mut self, element: Value) {
        self.as_array_mut().push(element);
    }

    /// Removes and returns the last array element, if any.
    pub fn array_pop(&mut self) -> Option<Value> {
        self.as_array_mut().pop()
    }

    /// Removes and returns the array element at `index`, shifting later
    /// elements down.
    pub fn array_remove(&mut self, index: usize) -> Value {
        self.as_array_mut().remove(index)
    }

    /// Appends `(key, value)` to an existing object. Duplicate keys are
    /// retained, not merged or rejected.
    pub fn append_member(&mut self, key: impl Into<String>, value: Value) {
        self.as_object_mut().push(Member::new(key, value));
    }

    /// Looks up the first member with a matching key. `None` if `self` is
    /// not an object or no member matches.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(members) => members.iter().find(|m| m.key == key).map(|m| &m.value),
            _ => None,
        }
    }

    /// Looks up the array element at `index`. `None` if `self` is not an
    /// array or `index` is out of bounds.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// Removes every member matching `key`, returning the removed values in
    /// order.
    pub fn remove_member(&mut self, key: &str) -> Vec<Value> {
        let members = self.as_object_mut();
        let mut removed = Vec::new();
        members.retain_mut(|m| {
            if m.key == key {
                removed.push(std::mem::replace(&mut m.value, Value::Null));
                false
            } else {
                true
            }
        });
        removed
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
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

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

/// Fails if `value` is not `Number`, or is not finite.
impl TryFrom<&Value> for f64 {
    type Error = ();

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) if n.is_finite() => Ok(*n),
            _ => Err(()),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = ();

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s.as_str()),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::stringify::to_string(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_null() {
        assert_eq!(Value::default(), Value::Null);
    }

    #[test]
    fn set_then_get_roundtrips() {
        let mut v = Value::Null;
        v.set_number(42.0);
        assert_eq!(v.as_number(), 42.0);
        v.set_string("hi");
        assert_eq!(v.as_str(), "hi");
    }

    #[test]
    fn object_retains_duplicate_keys_in_order() {
        let mut v = Value::object();
        v.append_member("a", Value::from(1.0));
        v.append_member("a", Value::from(2.0));
        assert_eq!(v.object_len(), 2);
        assert_eq!(v.object_value_at(0).as_number(), 1.0);
        assert_eq!(v.object_value_at(1).as_number(), 2.0);
    }

    #[test]
    fn get_returns_first_match() {
        let mut v = Value::object();
        v.append_member("a", Value::from(1.0));
        v.append_member("a", Value::from(2.0));
        assert_eq!(v.get("a").unwrap().as_number(), 1.0);
        assert!(v.get("missing").is_none());
    }

    #[test]
    fn remove_member_drops_all_matches() {
        let mut v = Value::object();
        v.append_member("a", Value::from(1.0));
        v.append_member("b", Value::from(2.0));
        v.append_member("a", Value::from(3.0));
        let removed = v.remove_member("a");
        assert_eq!(removed.len(), 2);
        assert_eq!(v.object_len(), 1);
        assert_eq!(v.object_key_at(0), "b");
    }

    #[test]
    fn array_pop_and_remove() {
        let mut v = Value::from(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.array_pop().unwrap().as_number(), 3.0);
        assert_eq!(v.array_remove(0).as_number(), 1.0);
        assert_eq!(v.array_len(), 1);
    }

    #[test]
    fn from_conversions() {
        let v: Value = 1.5.into();
        assert_eq!(f64::try_from(&v), Ok(1.5));
        let v: Value = "s".into();
        assert_eq!(<&str>::try_from(&v), Ok("s"));
    }
}
