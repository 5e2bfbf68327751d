//! Tathya fraud case management API server library.
//!
//! Exposes config, state, error handling, extractors, handlers and routes so
//! integration tests and the binary entrypoint share the same building
//! blocks.

pub mod activity;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod reports;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod upload;
