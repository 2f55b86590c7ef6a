//! Plinko HTTP API
//!
//! `POST /play` plus health, config and metrics endpoints.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod monitoring;
pub mod routes;
pub mod server;

pub use server::{build_app, ApiServer};
