//! Records of the webhook platform's REST API.
//!
//! Request payloads decode strictly: a missing required key is an error.
//! Response payloads the server may trim are declared `lenient`.

pub mod models;
