//! Dealership API server library.
//!
//! Exposes the building blocks (config, state, error handling, storage,
//! routes, mailer) so tests and the binary entrypoint can both access
//! them.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod inventory;
pub mod mailer;
pub mod models;
pub mod routes;
pub mod state;
