use crate::config::toml_config::TomlConfig;
use crate::config::{AppConfig, RendererKind};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "windows-release-health")]
#[command(about = "Serves cached Windows release-health servicing tables over HTTP")]
pub struct CliConfig {
    /// Address to bind (default 0.0.0.0)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (default 6000)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Bound on a single page render, in seconds (default 30)
    #[arg(long)]
    pub render_timeout_secs: Option<u64>,

    /// Page renderer implementation
    #[arg(long, value_enum)]
    pub renderer: Option<RendererKind>,

    /// User-Agent sent when fetching pages
    #[arg(long)]
    pub user_agent: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 預設值 ← TOML 檔 ← 命令列參數
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = AppConfig::default();

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(kind) = self.renderer {
            config.renderer.kind = kind;
        }
        if let Some(timeout) = self.render_timeout_secs {
            config.renderer.timeout_seconds = timeout;
        }
        if let Some(user_agent) = &self.user_agent {
            config.renderer.user_agent = user_agent.clone();
        }

        Ok(config)
    }
}
