//! REST API plumbing.
//!
//! - [`client`]: builds [`ApiRequest`]s for each endpoint
//! - [`request`]: request identity and the latest-request-wins guard
//! - [`response`]: decoding of status and body into typed results
//! - [`trace`]: `traceparent` propagation

pub mod client;
pub mod request;
pub mod response;
pub mod trace;

pub use client::{ApiClient, ApiRequest, HttpMethod};
pub use request::{RequestContext, RequestKind, RequestTracker};
