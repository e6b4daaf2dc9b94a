use std::collections::HashMap;

use hookwire::{Nullable, record};
use serde_json::{Map, Value};

/// JSON schemas of an event type, keyed by schema version.
pub type EventSchemas = HashMap<String, Map<String, Value>>;

#[record]
#[derive(Clone, Debug, PartialEq)]
pub struct EventTypeIn {
    #[record(default = false)]
    pub archived: Option<bool>,
    #[record(default = false)]
    pub deprecated: Option<bool>,
    pub description: String,
    pub feature_flag: Nullable<String>,
    /// The event type group's name
    pub group_name: Nullable<String>,
    pub name: String,
    pub schemas: Option<EventSchemas>,
}

#[record]
#[derive(Clone, Debug, PartialEq)]
pub struct EventTypeUpdate {
    #[record(default = false)]
    pub archived: Option<bool>,
    #[record(default = false)]
    pub deprecated: Option<bool>,
    pub description: String,
    pub feature_flag: Nullable<String>,
    pub group_name: Nullable<String>,
    /// The schema for the event type for a specific version as a JSON schema.
    pub schemas: Option<EventSchemas>,
}
