//! Feedback command handler

use anyhow::{bail, Result};

use restyle_core::FeedbackRequest;

use crate::client::ServiceClient;
use crate::output::Output;

/// Submit a rating and optional message to the feedback endpoint
pub async fn run(
    client: &ServiceClient,
    rating: u8,
    feedback_type: String,
    message: Option<String>,
    email: Option<String>,
    output: &Output,
) -> Result<()> {
    if !(1..=5).contains(&rating) {
        bail!("Rating must be between 1 and 5");
    }

    let request = FeedbackRequest {
        feedback_type,
        rating,
        message,
        allow_contact: email.is_some(),
        email,
        client_version: env!("CARGO_PKG_VERSION").to_string(),
        session_id: None,
    };

    let response = client.submit_feedback(&request).await?;

    if response.success {
        output.success(&response.message);
        if !output.is_quiet() && !response.feedback_id.is_empty() {
            output.message(&format!("Feedback ID: {}", response.feedback_id));
        }
    } else {
        bail!("Feedback was not accepted: {}", response.message);
    }

    Ok(())
}
