//! Rewrite service HTTP client
//!
//! Thin client for the two service endpoints: text processing and feedback
//! submission. The wire shapes live in `restyle_core::api`; this module only
//! handles transport and turns unsuccessful responses into errors.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::debug;

use restyle_core::api::{FEEDBACK_PATH, PROCESS_TEXT_PATH};
use restyle_core::{Config, FeedbackRequest, FeedbackResponse, ProcessTextRequest, ProcessTextResponse};

/// Client for the rewrite service
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Build a client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("restyle/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.service_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit text for processing and return the service's result
    pub async fn process_text(&self, request: &ProcessTextRequest) -> Result<ProcessTextResponse> {
        let url = format!("{}{}", self.base_url, PROCESS_TEXT_PATH);
        debug!(%url, action = ?request.action, "sending process-text request");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to reach rewrite service at {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "Rewrite service returned {}: {}",
                status,
                if body.is_empty() { "(no body)" } else { &body }
            );
        }

        let result: ProcessTextResponse = response
            .json()
            .await
            .context("Failed to parse rewrite service response")?;

        if !result.success {
            bail!(
                "Rewrite request failed: {}",
                result.message.as_deref().unwrap_or("unknown error")
            );
        }

        Ok(result)
    }

    /// Submit feedback (fire-and-forget; failures are reported, not retried)
    pub async fn submit_feedback(&self, request: &FeedbackRequest) -> Result<FeedbackResponse> {
        let url = format!("{}{}", self.base_url, FEEDBACK_PATH);
        debug!(%url, rating = request.rating, "sending feedback");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to reach feedback endpoint at {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "Feedback endpoint returned {}: {}",
                status,
                if body.is_empty() { "(no body)" } else { &body }
            );
        }

        response
            .json()
            .await
            .context("Failed to parse feedback response")
    }
}
