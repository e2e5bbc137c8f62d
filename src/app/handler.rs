use crate::core::CrawlJob;
use crate::utils::error::{Result, TrendError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;

/// Response shape handed back to the function host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl InvocationResponse {
    fn json(status_code: u16, body: serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }
}

/// Run the job to completion and map its outcome to a response.
pub async fn handle_invocation<J: CrawlJob + ?Sized>(job: &J) -> InvocationResponse {
    response_for(job.run().await)
}

pub fn response_for(outcome: Result<String>) -> InvocationResponse {
    match outcome {
        Ok(message) => InvocationResponse::json(
            200,
            serde_json::json!({
                "success": true,
                "message": message,
            }),
        ),
        Err(e) if e.is_configuration() => {
            tracing::error!("❌ Configuration error: {}", e);
            InvocationResponse::json(
                500,
                serde_json::json!({
                    "success": false,
                    "error": format!("Configuration error: {}", e),
                    "message": e.recovery_suggestion(),
                }),
            )
        }
        Err(e) => {
            tracing::error!("❌ Crawl failed: {} (Category: {:?})", e, e.category());
            InvocationResponse::json(
                500,
                serde_json::json!({
                    "success": false,
                    "error": e.to_string(),
                    "traceback": traceback(&e),
                }),
            )
        }
    }
}

fn traceback(err: &TrendError) -> String {
    let mut lines = vec![format!("{:?}", err)];
    let mut source = err.source();
    while let Some(cause) = source {
        lines.push(format!("caused by: {}", cause));
        source = cause.source();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedJob(fn() -> Result<String>);

    #[async_trait]
    impl CrawlJob for FixedJob {
        async fn run(&self) -> Result<String> {
            (self.0)()
        }
    }

    fn body(response: &InvocationResponse) -> serde_json::Value {
        serde_json::from_str(&response.body).unwrap()
    }

    #[tokio::test]
    async fn test_success_response() {
        let job = FixedJob(|| Ok("Crawl completed: 3 trending items".to_string()));
        let response = handle_invocation(&job).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Content-Type"], "application/json");
        let body = body(&response);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Crawl completed: 3 trending items");
    }

    #[tokio::test]
    async fn test_configuration_failure_response() {
        let job = FixedJob(|| {
            Err(TrendError::MissingConfigError {
                field: "X_API_BEARER_TOKEN".to_string(),
            })
        });
        let response = handle_invocation(&job).await;

        assert_eq!(response.status_code, 500);
        let body = body(&response);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("X_API_BEARER_TOKEN"));
        assert!(body.get("message").is_some());
        assert!(body.get("traceback").is_none());
    }

    #[tokio::test]
    async fn test_other_failure_includes_traceback() {
        let job = FixedJob(|| {
            Err(TrendError::QueryFailure {
                status: 500,
                detail: "boom".to_string(),
            })
        });
        let response = handle_invocation(&job).await;

        assert_eq!(response.status_code, 500);
        let body = body(&response);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Search query failed (500): boom");
        assert!(body["traceback"].as_str().unwrap().contains("QueryFailure"));
        assert!(body.get("message").is_none());
    }

    #[test]
    fn test_response_uses_host_field_names() {
        let response = response_for(Ok("ok".to_string()));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["statusCode"], 200);
    }
}
