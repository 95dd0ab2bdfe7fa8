//! Outbound calls to HR systems. Credentials come with each request and are
//! never stored.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::hr::HrSystem;

const SEND_TIMEOUT: Duration = Duration::from_secs(30);
const VALIDATE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Serialize)]
pub struct HrSendResult {
    pub success: bool,
    pub system: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HrSendResult {
    /// Set when the request never got an HTTP answer.
    pub fn is_transport_failure(&self) -> bool {
        !self.success && self.status_code.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HrConnectionStatus {
    pub valid: bool,
    pub system: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct HrClient {
    client: Client,
}

impl HrClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("screener/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// POSTs `payload` to the system's candidates endpoint.
    ///
    /// Upstream rejections come back as `success: false`; only missing
    /// credentials are an error.
    pub async fn send(
        &self,
        system: HrSystem,
        payload: &Value,
        api_key: &str,
        api_url: &str,
    ) -> Result<HrSendResult, AppError> {
        let base = require_credentials(api_key, api_url)?;
        let url = format!("{base}{}", system.candidates_endpoint());

        let result = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(payload)
            .timeout(SEND_TIMEOUT)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(system = system.key(), "HR send failed: {e}");
                return Ok(HrSendResult {
                    success: false,
                    system: system.display_name().to_string(),
                    status_code: None,
                    response: None,
                    error: Some(e.to_string()),
                });
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::OK || status == StatusCode::CREATED {
            info!(system = system.key(), status = status.as_u16(), "Candidate sent to HR system");
            Ok(HrSendResult {
                success: true,
                system: system.display_name().to_string(),
                status_code: Some(status.as_u16()),
                response: Some(serde_json::from_str(&body).unwrap_or(Value::Null)),
                error: None,
            })
        } else {
            warn!(system = system.key(), status = status.as_u16(), "HR system rejected candidate");
            Ok(HrSendResult {
                success: false,
                system: system.display_name().to_string(),
                status_code: Some(status.as_u16()),
                response: None,
                error: Some(body),
            })
        }
    }

    /// GETs `{api_url}/health`; valid only on a 200.
    pub async fn validate_connection(
        &self,
        system: HrSystem,
        api_key: &str,
        api_url: &str,
    ) -> Result<HrConnectionStatus, AppError> {
        let base = require_credentials(api_key, api_url)?;

        let status = match self
            .client
            .get(format!("{base}/health"))
            .bearer_auth(api_key)
            .timeout(VALIDATE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => HrConnectionStatus {
                valid: response.status() == StatusCode::OK,
                system: system.display_name().to_string(),
                status_code: Some(response.status().as_u16()),
                error: None,
            },
            Err(e) => HrConnectionStatus {
                valid: false,
                system: system.display_name().to_string(),
                status_code: None,
                error: Some(e.to_string()),
            },
        };
        Ok(status)
    }
}

/// Returns the API base without a trailing slash.
fn require_credentials<'a>(api_key: &str, api_url: &'a str) -> Result<&'a str, AppError> {
    if api_key.trim().is_empty() || api_url.trim().is_empty() {
        return Err(AppError::Validation(
            "API key and URL are required".to_string(),
        ));
    }
    Ok(api_url.trim().trim_end_matches('/'))
}
