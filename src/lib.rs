//! Bookshelf Library Catalog
//!
//! Books, authors, genres and reader comments stored in PostgreSQL, with a
//! service layer that answers every catalog operation with a status message.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
    pub repository: repository::Repository,
}
