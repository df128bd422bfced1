//! HTTP layer: axum handlers, routing, auth extractors, and server state.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
pub mod storage;
