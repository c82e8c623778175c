//! Application layer
//!
//! Use cases that orchestrate domain services for the HTTP adapters.

pub mod auth;
pub mod users;
