use clap::Parser;
use windows_release_health::adapters::build_renderer;
use windows_release_health::utils::{logger, validation::Validate};
use windows_release_health::{start_server, AppState, CliConfig, RefreshCache};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(cli.verbose, cli.json_logs);

    tracing::info!("Starting windows-release-health");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Using {:?} renderer with {}s timeout",
        config.renderer.kind,
        config.renderer.timeout_seconds
    );

    let renderer = build_renderer(&config.renderer)?;
    let cache = RefreshCache::new(renderer);

    start_server(&config.server, AppState::new(cache)).await?;

    Ok(())
}
