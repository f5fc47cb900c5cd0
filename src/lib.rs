//! Inventário
//!
//! Equipment and employee inventory across regional núcleos: a REST JSON API
//! over a hosted document store, plus the list, form and session controllers
//! used by client screens.

use std::sync::Arc;

pub mod api;
pub mod backend;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod session;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
