//! SnowLink REST API — library crate for the Axum front end.
//!
//! Re-exports all modules so the binary (`main.rs`) and the e2e test
//! crate can access `AppState`, `build_router`, and the request shapes.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
