//! Network address plumbing shared by the gateway clients.

pub mod endpoint;

pub use endpoint::{parse_endpoint, parse_endpoints, EndpointError};
