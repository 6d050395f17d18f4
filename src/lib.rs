pub mod aggregator;
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod observability;
pub mod render;
pub mod session;
pub mod validation;

pub use api::NewsApi;
pub use config::AppConfig;
pub use errors::{AppError, AppResult};
