use std::collections::HashMap;

use hookwire::{Nullable, record};

#[record]
#[derive(Clone, Debug, PartialEq)]
pub struct ApplicationIn {
    pub metadata: Option<HashMap<String, String>>,
    pub name: String,
    pub rate_limit: Nullable<u16>,
    /// Optional unique identifier for the application.
    pub uid: Nullable<String>,
}
