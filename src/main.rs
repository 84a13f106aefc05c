use clap::Parser;
use sticky_notes::app;
use sticky_notes::utils::{logger, validation::Validate};
use sticky_notes::CliConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = CliConfig::parse();

    let config = match cli.args.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(cli.args.verbose, config.logging.json);

    tracing::info!("Starting sticky-notes API");
    if cli.args.verbose {
        tracing::debug!("Effective config: {:?}", config.server);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let pipeline = Arc::new(app::build_pipeline(&config)?);
    tracing::info!(
        "📚 {} notes loaded, writing documents to {}",
        pipeline.repository().len(),
        config.output.directory
    );

    app::serve(&config, pipeline).await?;
    Ok(())
}
