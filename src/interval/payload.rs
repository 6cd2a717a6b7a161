//! Payloads attached to intervals and the policy for combining them.
//!
//! When several intervals contribute to a single fragment (for example, when
//! a regional constraint region is intersected with a coding exon), their
//! payloads are combined with [`Overlay::overlay()`]. Contributions are
//! applied in list order, so a later payload overwrites an earlier one
//! wherever the two collide.

use std::collections::BTreeMap;

/// A payload that can absorb the fields of another payload of the same type.
pub trait Overlay {
    /// Writes the fields of `other` over the fields of `self`.
    ///
    /// On a collision, the value from `other` wins.
    fn overlay(&mut self, other: &Self);
}

impl Overlay for () {
    fn overlay(&mut self, _: &Self) {}
}

impl<T: Clone> Overlay for Option<T> {
    fn overlay(&mut self, other: &Self) {
        if other.is_some() {
            self.clone_from(other);
        }
    }
}

impl<K: Ord + Clone, V: Clone> Overlay for BTreeMap<K, V> {
    fn overlay(&mut self, other: &Self) {
        for (key, value) in other {
            self.insert(key.clone(), value.clone());
        }
    }
}

/// A single annotation value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A numeric value (e.g., an observed/expected ratio).
    Number(f64),

    /// A textual value (e.g., a feature type).
    Text(String),

    /// A boolean flag.
    Flag(bool),
}

impl Value {
    /// Gets the inner number if this is a [`Value::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Gets the inner text if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(value) => write!(f, "{value}"),
            Value::Text(value) => write!(f, "{value}"),
            Value::Flag(value) => write!(f, "{value}"),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Flag(value)
    }
}

/// Named annotation fields attached to an interval.
///
/// # Examples
///
/// ```
/// use regionview::interval::Fields;
/// use regionview::interval::Overlay as _;
/// use regionview::interval::Value;
///
/// let mut constraint = Fields::from([
///     (String::from("obs_exp"), Value::from(0.4)),
///     (String::from("source"), Value::from("constraint")),
/// ]);
///
/// let exon = Fields::from([
///     (String::from("feature_type"), Value::from("CDS")),
///     (String::from("source"), Value::from("exon")),
/// ]);
///
/// constraint.overlay(&exon);
///
/// assert_eq!(constraint.len(), 3);
/// assert_eq!(constraint["source"], Value::from("exon"));
/// ```
pub type Fields = BTreeMap<String, Value>;
