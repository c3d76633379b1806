// Adapters layer: concrete page renderers for the PageRenderer port.

pub mod http_renderer;
pub mod table;

#[cfg(feature = "headless")]
pub mod headless_renderer;

use crate::config::{RendererConfig, RendererKind};
use crate::domain::ports::PageRenderer;
use crate::utils::error::Result;
use std::sync::Arc;

pub use http_renderer::HttpRenderer;
pub use table::{extract_rows, SERVICING_TABLE_SELECTOR};

#[cfg(feature = "headless")]
pub use headless_renderer::HeadlessRenderer;

/// 依設定建立渲染器
pub fn build_renderer(config: &RendererConfig) -> Result<Arc<dyn PageRenderer>> {
    match config.kind {
        RendererKind::Http => Ok(Arc::new(HttpRenderer::new(
            config.timeout(),
            &config.user_agent,
        )?)),
        #[cfg(feature = "headless")]
        RendererKind::Headless => Ok(Arc::new(HeadlessRenderer::new(config.timeout()))),
        #[cfg(not(feature = "headless"))]
        RendererKind::Headless => Err(crate::utils::error::AppError::ConfigError {
            message: "headless renderer requires the 'headless' feature".to_string(),
        }),
    }
}
