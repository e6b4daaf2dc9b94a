use std::collections::HashMap;

use hookwire::{Nullable, record};

/// Sent when an endpoint is created.
#[record]
#[derive(Clone, Debug, PartialEq)]
pub struct EndpointCreatedEvent {
    pub data: EndpointCreatedEventData,
    #[record(default = "endpoint.created")]
    pub r#type: String,
}

#[record]
#[derive(Clone, Debug, PartialEq)]
pub struct EndpointCreatedEventData {
    /// The app's ID
    pub app_id: String,
    /// The app's UID
    pub app_uid: Nullable<String>,
    /// The endpoint's ID
    pub endpoint_id: String,
    /// The endpoint's UID
    pub endpoint_uid: Nullable<String>,
}

#[record]
#[derive(Clone, Debug, PartialEq)]
pub struct EndpointUpdate {
    pub channels: Nullable<Vec<String>>,
    #[record(default = "")]
    pub description: Option<String>,
    #[record(default = false)]
    pub disabled: Option<bool>,
    pub filter_types: Nullable<Vec<String>>,
    pub metadata: Option<HashMap<String, String>>,
    pub rate_limit: Nullable<u16>,
    pub uid: Nullable<String>,
    pub url: String,
    #[record(default = 1)]
    pub version: Option<u16>,
}
