//! Menu configuration API server library.
//!
//! Exposes the building blocks (config, state, error handling, form
//! parsing, routes) so integration tests and the binary entrypoint can
//! both access them.

pub mod config;
pub mod error;
pub mod form;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;
