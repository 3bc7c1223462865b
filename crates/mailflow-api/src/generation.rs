//! AI content generation for campaign copy.

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use mailflow_core::CampaignId;
use serde::{Deserialize, Serialize};

/// Payload for generating campaign content.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// Instruction the content is generated from
    pub prompt: String,
    /// Desired tone, falling back to the server default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    /// Campaign context to draft for, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<CampaignId>,
    /// Token cap for the generated content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl GenerationRequest {
    /// Create a generation request from a prompt.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            tone: None,
            campaign_id: None,
            max_tokens: None,
        }
    }

    /// Set the tone.
    #[must_use]
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    /// Generate in the context of an existing campaign.
    #[must_use]
    pub fn for_campaign(mut self, campaign_id: CampaignId) -> Self {
        self.campaign_id = Some(campaign_id);
        self
    }

    /// Cap the generated content length.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Generated campaign content.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedContent {
    /// Drafted subject line
    pub subject: String,
    /// Drafted body
    pub body: String,
    /// Model that produced the draft, when reported
    #[serde(default)]
    pub model: Option<String>,
}

impl ApiClient {
    /// Generate campaign content from a prompt.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`] if the prompt is empty.
    pub async fn generate_content(&self, request: &GenerationRequest) -> Result<GeneratedContent> {
        if request.prompt.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "generation prompt must not be empty".to_string(),
            ));
        }
        self.post_json("/generate", request).await
    }
}
