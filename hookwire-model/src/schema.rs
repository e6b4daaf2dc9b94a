use std::fmt::Display;

/// How a record field behaves on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Always present, always serialized.
    Required,
    /// `Option<T>`: omitted when `None`, never serialized as `null`.
    Optional,
    /// `Nullable<T>`: omitted when absent, `null` when explicitly nulled.
    Nullable,
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FieldKind::Required => "required",
            FieldKind::Optional => "optional",
            FieldKind::Nullable => "nullable",
        })
    }
}

/// The observed state of a single field on a record instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldState {
    /// never set; the key is omitted on output
    Absent,
    /// explicitly set to null; the key is written with a `null` value
    Null,
    /// holds a value
    Value,
}

impl FieldState {
    pub fn of_option<T>(value: &Option<T>) -> Self {
        match value {
            Some(_) => FieldState::Value,
            None => FieldState::Absent,
        }
    }

    /// Whether a field in this state produces a key in the encoded object.
    pub fn is_present(&self) -> bool {
        !matches!(self, FieldState::Absent)
    }
}

/// One row of a record's field-classification table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Rust field name
    pub name: &'static str,
    /// JSON object key
    pub key: &'static str,
    pub kind: FieldKind,
    /// Declared default, as JSON text.
    pub default: Option<&'static str>,
}

impl FieldSpec {
    pub fn default_value(&self) -> Option<serde_json::Value> {
        // tables are emitted by `#[record]` from literals, so this only fails
        // for hand-written tables carrying invalid JSON
        self.default.and_then(|d| serde_json::from_str(d).ok())
    }
}

/// The static description of a record type: its name and ordered field table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordSchema {
    /// Looks up a field by its JSON key.
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields_of_kind(&self, kind: FieldKind) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(move |f| f.kind == kind)
    }

    pub fn required_keys(&self) -> impl Iterator<Item = &'static str> {
        self.fields_of_kind(FieldKind::Required).map(|f| f.key)
    }
}
