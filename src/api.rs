//! Tip service client

use serde::{Deserialize, Serialize};

/// Body of `POST /api/tips`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TipsRequest {
    pub location: String,
    pub habits: String,
}

#[derive(Debug, Deserialize)]
struct TipsResponse {
    tips: Vec<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum TipsError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("service returned {0}")]
    Status(reqwest::StatusCode),
    #[error("response parse error: {0}")]
    Parse(String),
}

pub struct TipsClient {
    client: reqwest::Client,
    endpoint: String,
}

impl TipsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: tips_endpoint(base_url),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the service for tips; returns the raw markdown lines in order
    pub async fn fetch_tips(&self, request: &TipsRequest) -> Result<Vec<String>, TipsError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TipsError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TipsError::Status(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TipsError::Request(e.to_string()))?;
        parse_tips(&body)
    }
}

/// `<base>/api/tips`, tolerating a trailing slash on the base
pub fn tips_endpoint(base_url: &str) -> String {
    format!("{}/api/tips", base_url.trim_end_matches('/'))
}

/// Decode a response body; a missing `tips` field is a parse error
pub fn parse_tips(body: &str) -> Result<Vec<String>, TipsError> {
    let data: TipsResponse =
        serde_json::from_str(body).map_err(|e| TipsError::Parse(e.to_string()))?;
    Ok(data.tips)
}
