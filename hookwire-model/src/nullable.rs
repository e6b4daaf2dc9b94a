use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::schema::FieldState;

/// A field value that can be absent, explicitly null, or set to a value.
///
/// `Option<T>` alone cannot tell "the key was never sent" apart from
/// "the key was sent as `null`". `Nullable<T>` keeps both pieces of
/// information: the optional payload, and whether the field was touched
/// at all.
///
/// On the wire this is used together with
/// `#[serde(default, skip_serializing_if = "Nullable::is_unset")]`
/// (the `#[record]` attribute adds those for every `Nullable` field):
/// a missing key decodes to [`Nullable::absent`] through `Default`,
/// a present key always goes through the [`Deserialize`] impl below and
/// therefore always ends up set.
///
/// The null state is only kept apart from a value if `T` never serializes
/// as `null` itself. `Nullable<serde_json::Value>` set to `Value::Null`
/// encodes as `null` and decodes back in the null state.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Nullable<T> {
    value: Option<T>,
    is_set: bool,
}

impl<T> Nullable<T> {
    /// The initial state: never set, omitted on output.
    pub const fn absent() -> Self {
        Nullable {
            value: None,
            is_set: false,
        }
    }

    /// Set, with an explicit null payload.
    pub const fn null() -> Self {
        Nullable {
            value: None,
            is_set: true,
        }
    }

    /// Set, with a concrete value.
    pub const fn new(value: T) -> Self {
        Nullable {
            value: Some(value),
            is_set: true,
        }
    }

    /// Returns the value if the field is set and not null.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Marks the field as set. `None` stores an explicit null.
    pub fn set(&mut self, value: Option<T>) {
        self.value = value;
        self.is_set = true;
    }

    pub fn set_value(&mut self, value: T) {
        self.set(Some(value))
    }

    pub fn set_nil(&mut self) {
        self.set(None)
    }

    /// Returns the field to the absent state, as if it was never set.
    pub fn unset(&mut self) {
        self.value = None;
        self.is_set = false;
    }

    pub fn is_set(&self) -> bool {
        self.is_set
    }

    pub fn is_unset(&self) -> bool {
        !self.is_set
    }

    /// True only for the explicit null state.
    pub fn is_null(&self) -> bool {
        self.is_set && self.value.is_none()
    }

    pub fn state(&self) -> FieldState {
        match (self.is_set, &self.value) {
            (false, _) => FieldState::Absent,
            (true, None) => FieldState::Null,
            (true, Some(_)) => FieldState::Value,
        }
    }

    /// Drops the absent/null distinction.
    pub fn into_option(self) -> Option<T> {
        self.value
    }

    /// Takes the value out, leaving the field absent.
    pub fn take(&mut self) -> Option<T> {
        self.is_set = false;
        self.value.take()
    }

    pub fn as_ref(&self) -> Nullable<&T> {
        Nullable {
            value: self.value.as_ref(),
            is_set: self.is_set,
        }
    }

    /// Maps the value, keeping the absent and null states as they are.
    pub fn map<U, F>(self, f: F) -> Nullable<U>
    where
        F: FnOnce(T) -> U,
    {
        Nullable {
            value: self.value.map(f),
            is_set: self.is_set,
        }
    }
}

// manual impl: deriving would require `T: Default`
impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Nullable::new(value)
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        Nullable {
            value,
            is_set: true,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Nullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_set, &self.value) {
            (false, _) => f.write_str("Absent"),
            (true, None) => f.write_str("Null"),
            (true, Some(v)) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    /// An absent wrapper serializes as `null` when it is not skipped by the
    /// containing struct; the containing struct is expected to skip it.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.value {
            Some(v) => serializer.serialize_some(v),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // only reached when the key is present, so the field is set either way
        let value = Option::<T>::deserialize(deserializer)?;
        Ok(Nullable {
            value,
            is_set: true,
        })
    }
}
