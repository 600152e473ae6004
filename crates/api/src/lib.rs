//! HTTP surface of the progression & gamification engine.
//!
//! Thin handlers over the `edura-engine` services: extract the caller,
//! deserialize the request, delegate, serialize the result. No business
//! rules live here.

pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod router;
pub mod routes;
pub mod state;
