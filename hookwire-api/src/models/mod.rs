mod application;
mod dashboard;
mod endpoint;
mod event_type;

pub use application::ApplicationIn;
pub use dashboard::DashboardAccessOut;
pub use endpoint::{EndpointCreatedEvent, EndpointCreatedEventData, EndpointUpdate};
pub use event_type::{EventSchemas, EventTypeIn, EventTypeUpdate};
