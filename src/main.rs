use clap::Parser;
use trend_fetch::utils::error::{ErrorSeverity, TrendError};
use trend_fetch::utils::{logger, validation::Validate};
use trend_fetch::{CliConfig, OutputFormat, TrendCrawl, TrendFeed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting trend-fetch CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    let crawl = TrendCrawl::new(config);

    match crawl.fetch().await {
        Ok(Some(feed)) => {
            tracing::info!("✅ Fetched {} trending items", feed.len());
            if let Err(e) = print_feed(&feed, cli.format) {
                exit_with(e);
            }
        }
        Ok(None) => {
            // 沒有資料不視為錯誤
            tracing::warn!("No trending data right now");
            if cli.format == OutputFormat::Json {
                println!("null");
            }
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn print_feed(feed: &TrendFeed, format: OutputFormat) -> trend_fetch::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(feed)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for item in &feed.items {
                writer.serialize(item)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn exit_with(e: TrendError) -> ! {
    tracing::error!(
        "❌ trend-fetch failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
