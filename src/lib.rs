pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use app::{build_router, start_server, AppState};
pub use config::AppConfig;
pub use crate::core::{RefreshCache, CACHE_TTL};
pub use domain::model::{ReleaseRecord, Source};
pub use utils::error::{AppError, RefreshError, RenderError, Result};
