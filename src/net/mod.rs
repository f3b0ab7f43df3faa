//! Networking for the billing API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the [`api::SessionApi`] seam and its HTTP implementation,
//! `headers` builds the request headers every call carries, and `types`
//! defines the wire schema.

pub mod api;
pub mod headers;
pub mod types;
