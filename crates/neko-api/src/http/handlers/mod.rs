//! HTTP request handlers for the REST API.

pub mod provider;
pub mod session;
