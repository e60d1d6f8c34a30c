//! Canonicalization of the props and children a component is called with.

#[cfg(feature = "no_std")]
use alloc::boxed::Box;
#[cfg(feature = "no_std")]
use alloc::string::String;
#[cfg(feature = "no_std")]
use alloc::vec;
#[cfg(feature = "no_std")]
use alloc::vec::Vec;

use serde_json::{Map, Value};

use crate::{ComponentError, InvalidArgument};

/// Attribute mapping handed to a component. Always an object.
pub type Props = Map<String, Value>;

/// Key under which normalized children are stored in [`Props`].
pub const CHILDREN_KEY: &str = "children";

/// The `children` argument of a component call.
///
/// Convert from a [`Value`] (a single child, or an array of children), a
/// `Vec<Value>`, an `Option<Value>`, or build a lazily computed child with
/// [`Children::lazy`].
#[derive(Default)]
pub enum Children {
    #[default]
    Absent,
    Value(Value),
    Lazy(Box<dyn FnOnce() -> Value + Send>),
}

impl Children {
    /// Children computed on demand when the component normalizes them.
    pub fn lazy<F>(compute: F) -> Self
    where
        F: FnOnce() -> Value + Send + 'static,
    {
        Self::Lazy(Box::new(compute))
    }

    /// Whether this argument counts as "not supplied".
    ///
    /// Falsy values are treated the same as an omitted argument; a lazy
    /// child is always considered supplied.
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Value(value) => !is_truthy(value),
            Self::Lazy(_) => false,
        }
    }
}

impl From<Value> for Children {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Vec<Value>> for Children {
    fn from(children: Vec<Value>) -> Self {
        Self::Value(Value::Array(children))
    }
}

impl From<Option<Value>> for Children {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::Absent, Self::Value)
    }
}

/// Truthiness of a dynamic value.
///
/// `null`, `false`, numeric zero and the empty string are falsy. Everything
/// else, including empty arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Canonicalize a children argument into an ordered sequence.
///
/// A lazy child is evaluated first. Falsy or absent children become an empty
/// sequence, a single child is wrapped, and an array is used as-is.
pub fn normalize_children(children: Children) -> Vec<Value> {
    let candidate = match children {
        Children::Absent => return Vec::new(),
        Children::Value(value) => value,
        Children::Lazy(compute) => compute(),
    };

    if !is_truthy(&candidate) {
        return Vec::new();
    }

    match candidate {
        Value::Array(children) => children,
        child => vec![child],
    }
}

/// Check that supplied props are a plain object.
///
/// Omitted and falsy props pass; arrays, strings, numbers and `true` do not.
pub fn validate_props(props: Option<&Value>) -> Result<(), ComponentError> {
    match props {
        Some(value) if is_truthy(value) && !value.is_object() => {
            Err(InvalidArgument::InvalidProps.into())
        }
        _ => Ok(()),
    }
}

/// Validate props and unwrap them into a mapping, `None` when not supplied.
pub(crate) fn resolve_props(props: Option<Value>) -> Result<Option<Props>, ComponentError> {
    validate_props(props.as_ref())?;

    Ok(match props {
        Some(Value::Object(props)) => Some(props),
        _ => None,
    })
}
