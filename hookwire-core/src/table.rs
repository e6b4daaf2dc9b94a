use std::fmt::Display;

use hookwire_model::{FieldKind, RecordSchema};
use indexmap::IndexMap;

/// A field classification as derived from an API document.
#[derive(Clone, Debug, PartialEq)]
pub struct TableEntry {
    pub key: String,
    /// The Rust field name a record would use for `key`.
    pub name: String,
    pub kind: FieldKind,
    pub default: Option<serde_json::Value>,
}

/// An owned, ordered field-classification table, keyed by JSON key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SchemaTable {
    name: String,
    entries: IndexMap<String, TableEntry>,
}

/// A difference between an expected table and a record's compiled table.
#[derive(Clone, Debug, PartialEq)]
pub enum TableMismatch {
    MissingField(String),
    UnexpectedField(String),
    Kind {
        key: String,
        expected: FieldKind,
        actual: FieldKind,
    },
    Default {
        key: String,
        expected: Option<serde_json::Value>,
        actual: Option<serde_json::Value>,
    },
}

impl Display for TableMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableMismatch::MissingField(key) => write!(f, "field '{key}' is missing"),
            TableMismatch::UnexpectedField(key) => write!(f, "field '{key}' is not in the schema"),
            TableMismatch::Kind {
                key,
                expected,
                actual,
            } => write!(f, "field '{key}' is {actual}, schema says {expected}"),
            TableMismatch::Default {
                key,
                expected,
                actual,
            } => write!(
                f,
                "field '{key}' defaults to {}, schema says {}",
                display_default(actual),
                display_default(expected)
            ),
        }
    }
}

fn display_default(value: &Option<serde_json::Value>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "nothing".to_string())
}

impl SchemaTable {
    pub fn new(name: &str) -> Self {
        SchemaTable {
            name: name.to_string(),
            entries: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts an entry, replacing one with the same key.
    pub fn insert(&mut self, entry: TableEntry) {
        self.entries.insert(entry.key.clone(), entry);
    }

    pub fn get(&self, key: &str) -> Option<&TableEntry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copies a record's compiled table.
    pub fn from_record_schema(schema: &RecordSchema) -> Self {
        let mut table = SchemaTable::new(schema.name);
        for f in schema.fields {
            table.insert(TableEntry {
                key: f.key.to_string(),
                name: f.name.to_string(),
                kind: f.kind,
                default: f.default_value(),
            });
        }
        table
    }

    /// Compares this table, taken as the expectation, with a record's
    /// compiled table. Fields are matched by JSON key; Rust names are not
    /// compared.
    pub fn diff(&self, actual: &RecordSchema) -> Vec<TableMismatch> {
        let mut mismatches = Vec::new();
        for expected in self.iter() {
            let Some(field) = actual.field(&expected.key) else {
                mismatches.push(TableMismatch::MissingField(expected.key.clone()));
                continue;
            };
            if field.kind != expected.kind {
                mismatches.push(TableMismatch::Kind {
                    key: expected.key.clone(),
                    expected: expected.kind,
                    actual: field.kind,
                });
            }
            let actual_default = field.default_value();
            if actual_default != expected.default {
                mismatches.push(TableMismatch::Default {
                    key: expected.key.clone(),
                    expected: expected.default.clone(),
                    actual: actual_default,
                });
            }
        }
        for field in actual.fields {
            if self.get(field.key).is_none() {
                mismatches.push(TableMismatch::UnexpectedField(field.key.to_string()));
            }
        }
        mismatches
    }
}

#[cfg(test)]
mod tests {
    use hookwire_model::FieldSpec;
    use serde_json::json;

    use super::*;

    const DASHBOARD_ACCESS_OUT: RecordSchema = RecordSchema {
        name: "DashboardAccessOut",
        fields: &[
            FieldSpec {
                name: "token",
                key: "token",
                kind: FieldKind::Required,
                default: None,
            },
            FieldSpec {
                name: "url",
                key: "url",
                kind: FieldKind::Optional,
                default: Some("\"https://app.example.com\""),
            },
        ],
    };

    fn entry(key: &str, kind: FieldKind, default: Option<serde_json::Value>) -> TableEntry {
        TableEntry {
            key: key.to_string(),
            name: key.to_string(),
            kind,
            default,
        }
    }

    #[test]
    fn test_from_record_schema_matches_itself() {
        let table = SchemaTable::from_record_schema(&DASHBOARD_ACCESS_OUT);
        assert_eq!(2, table.len());
        assert_eq!(
            Some(json!("https://app.example.com")),
            table.get("url").unwrap().default
        );
        assert!(table.diff(&DASHBOARD_ACCESS_OUT).is_empty());
    }

    #[test]
    fn test_diff() {
        let mut table = SchemaTable::new("DashboardAccessOut");
        table.insert(entry("token", FieldKind::Required, None));
        table.insert(entry("url", FieldKind::Required, None));
        table.insert(entry("expiresAt", FieldKind::Optional, None));

        let mismatches = table.diff(&DASHBOARD_ACCESS_OUT);
        assert_eq!(
            vec![
                TableMismatch::Kind {
                    key: "url".to_string(),
                    expected: FieldKind::Required,
                    actual: FieldKind::Optional,
                },
                TableMismatch::Default {
                    key: "url".to_string(),
                    expected: None,
                    actual: Some(json!("https://app.example.com")),
                },
                TableMismatch::MissingField("expiresAt".to_string()),
            ],
            mismatches
        );
        assert_eq!(
            "field 'url' is optional, schema says required",
            mismatches[0].to_string()
        );
    }

    #[test]
    fn test_unexpected_field() {
        let mut table = SchemaTable::new("DashboardAccessOut");
        table.insert(entry("token", FieldKind::Required, None));
        assert_eq!(
            vec![TableMismatch::UnexpectedField("url".to_string())],
            table.diff(&DASHBOARD_ACCESS_OUT)
        );
    }
}
