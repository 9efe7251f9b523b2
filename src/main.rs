use checkout_address::utils::{logger, validation::Validate};
use checkout_address::CliConfig;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 先載入 .env，讓 TOML 中的 ${VAR} 可以取得值
    dotenvy::dotenv().ok();

    let cli = CliConfig::parse();

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting checkout-address");
    if cli.verbose {
        tracing::debug!("Service config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if let Err(e) = checkout_address::serve(&config).await {
        tracing::error!("❌ Server failed: {} (Category: {:?})", e, e.category());
        return Err(e.into());
    }

    Ok(())
}
