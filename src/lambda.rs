#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use trend_fetch::utils::{error::Result, logger, validation::Validate};
#[cfg(feature = "lambda")]
use trend_fetch::{handle_invocation, EnvConfig, InvocationResponse, TrendCrawl};

#[cfg(feature = "lambda")]
fn load_config() -> Result<EnvConfig> {
    let config = EnvConfig::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(feature = "lambda")]
async fn function_handler(
    _event: LambdaEvent<serde_json::Value>,
) -> std::result::Result<InvocationResponse, Error> {
    tracing::info!("Starting trend crawl function");

    // 配置錯誤也要回傳 500 回應，而不是讓函數本身失敗
    let response = match load_config() {
        Ok(config) => handle_invocation(&TrendCrawl::new(config)).await,
        Err(e) => trend_fetch::app::handler::response_for(Err(e)),
    };

    tracing::info!("Trend crawl function finished with status {}", response.status_code);
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> std::result::Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
