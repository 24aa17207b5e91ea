//! Shared service plumbing: tracing setup, health endpoints, request-id
//! middleware.

pub mod health;
pub mod middleware;
pub mod tracing;
