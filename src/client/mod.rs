// Client module - HTTP access to the validate endpoint
pub mod api;

pub use api::{HeaderProfile, RawResponse, ValidateClient, ValidateTransport};
