//! HTTP layer of the Storefront backend
//!
//! Actix-web routes for registration, login, sessions and the email/phone
//! verification flow. Handlers stay thin: they validate the request body,
//! call a core service and map the outcome to JSON.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
