//! Campaign CRUD and AI-assisted ("smart") campaign creation.

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::submit::SubmitOutcome;
use mailflow_core::{CampaignId, Timestamp};
use serde::{Deserialize, Serialize};

/// A campaign as returned by the platform API.
#[derive(Debug, Clone, Deserialize)]
pub struct Campaign {
    /// Campaign id
    pub id: CampaignId,
    /// Display name
    pub name: String,
    /// Email subject line, if set
    #[serde(default)]
    pub subject: Option<String>,
    /// Email body, if set
    #[serde(default)]
    pub body: Option<String>,
    /// Current lifecycle status
    pub status: CampaignStatus,
    /// Creation time
    pub created_at: Timestamp,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Lifecycle status of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    /// Being edited, never dispatched
    Draft,
    /// Enqueued for a later send window
    Scheduled,
    /// Dispatch in progress
    Sending,
    /// Dispatch finished
    Sent,
    /// Dispatch failed
    Failed,
}

/// Payload for creating a campaign.
#[derive(Debug, Clone, Serialize)]
pub struct NewCampaign {
    /// Display name
    pub name: String,
    /// Email subject line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Email body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl NewCampaign {
    /// Create a campaign payload with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subject: None,
            body: None,
        }
    }

    /// Set the subject line.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Partial update for an existing campaign. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CampaignUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New subject line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// New body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Payload for AI-assisted campaign creation.
///
/// The server drafts subject and body from the prompt; generation may run
/// asynchronously, in which case the response is a processing
/// acknowledgment correlated by campaign id.
#[derive(Debug, Clone, Serialize)]
pub struct SmartCampaignRequest {
    /// Display name for the new campaign
    pub name: String,
    /// Instruction the content is generated from
    pub prompt: String,
    /// Desired tone, falling back to the server default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

impl SmartCampaignRequest {
    /// Create a smart campaign request.
    #[must_use]
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            tone: None,
        }
    }

    /// Set the tone.
    #[must_use]
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct CampaignList {
    campaigns: Vec<Campaign>,
}

impl ApiClient {
    /// List all campaigns.
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let list: CampaignList = self.get_json("/campaigns").await?;
        Ok(list.campaigns)
    }

    /// Get a single campaign by id.
    pub async fn get_campaign(&self, id: CampaignId) -> Result<Campaign> {
        self.get_json(&format!("/campaigns/{id}")).await
    }

    /// Create a campaign.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`] if the name is empty.
    pub async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Campaign> {
        if campaign.name.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "campaign name must not be empty".to_string(),
            ));
        }
        self.post_json("/campaigns", campaign).await
    }

    /// Update a campaign.
    pub async fn update_campaign(
        &self,
        id: CampaignId,
        update: &CampaignUpdate,
    ) -> Result<Campaign> {
        self.put_json(&format!("/campaigns/{id}"), update).await
    }

    /// Delete a campaign.
    pub async fn delete_campaign(&self, id: CampaignId) -> Result<()> {
        self.delete(&format!("/campaigns/{id}")).await
    }

    /// Create a campaign with AI-generated content.
    ///
    /// Content generation may finish inline or run asynchronously; only the
    /// asynchronous acknowledgment engages operation tracking.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`] if the name or prompt is empty.
    pub async fn smart_create_campaign(
        &self,
        request: &SmartCampaignRequest,
    ) -> Result<SubmitOutcome<Campaign>> {
        if request.name.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "campaign name must not be empty".to_string(),
            ));
        }
        if request.prompt.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "generation prompt must not be empty".to_string(),
            ));
        }
        self.submit_job("/campaigns/smart", request).await
    }
}
