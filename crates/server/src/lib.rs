//! Jaki server library.
//!
//! Serves the published Jaki Global site at `/` and the builder/shop JSON
//! API under `/api`. Exposed as a library so the integration tests can
//! assemble the router without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;
