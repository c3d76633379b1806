// HTTP surface: axum router, handlers and server lifecycle over the refresh cache.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

use crate::core::RefreshCache;

/// 路由共用的狀態，內含唯一的快取控制器
#[derive(Clone)]
pub struct AppState {
    pub cache: RefreshCache,
}

impl AppState {
    pub fn new(cache: RefreshCache) -> Self {
        Self { cache }
    }
}

pub use router::build_router;
pub use server::start_server;
