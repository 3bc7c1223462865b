//! Dispatch sending.
//!
//! A dispatch pairs a campaign with a set of sending mailboxes and a
//! delivery mode. Immediate dispatches go out right away; scheduled
//! dispatches are enqueued for a send window and confirmed through
//! `sequence_*` notifications.

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::submit::SubmitOutcome;
use mailflow_core::{CampaignId, DispatchMode, MailboxId, Timestamp};
use serde::{Deserialize, Serialize};

/// Payload for sending a dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchRequest {
    /// Campaign to send
    pub campaign_id: CampaignId,
    /// Mailboxes to send from
    pub mailbox_ids: Vec<MailboxId>,
    /// Delivery mode
    pub mode: DispatchMode,
    /// Send window start, required for scheduled dispatches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<Timestamp>,
}

impl DispatchRequest {
    /// Create an immediate dispatch for the given campaign.
    #[must_use]
    pub fn immediate(campaign_id: CampaignId) -> Self {
        Self {
            campaign_id,
            mailbox_ids: Vec::new(),
            mode: DispatchMode::Immediate,
            scheduled_at: None,
        }
    }

    /// Create a scheduled dispatch for the given campaign and send window.
    #[must_use]
    pub fn scheduled(campaign_id: CampaignId, scheduled_at: Timestamp) -> Self {
        Self {
            campaign_id,
            mailbox_ids: Vec::new(),
            mode: DispatchMode::Scheduled,
            scheduled_at: Some(scheduled_at),
        }
    }

    /// Add a sending mailbox.
    #[must_use]
    pub fn with_mailbox(mut self, mailbox_id: MailboxId) -> Self {
        self.mailbox_ids.push(mailbox_id);
        self
    }

    /// Validate the request before submission.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`] if no mailboxes are selected or
    /// a scheduled dispatch is missing its send window.
    pub fn validate(&self) -> Result<()> {
        if self.mailbox_ids.is_empty() {
            return Err(ApiError::InvalidRequest(
                "dispatch requires at least one mailbox".to_string(),
            ));
        }
        if self.mode == DispatchMode::Scheduled && self.scheduled_at.is_none() {
            return Err(ApiError::InvalidRequest(
                "scheduled dispatch requires a send window".to_string(),
            ));
        }
        Ok(())
    }
}

/// Terminal result of a dispatch that finished inline.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchReceipt {
    /// Campaign that was sent
    pub campaign_id: CampaignId,
    /// Number of recipients the dispatch reached
    pub recipients_count: u32,
    /// When the send completed
    #[serde(default)]
    pub sent_at: Option<Timestamp>,
}

impl ApiClient {
    /// Send a dispatch.
    ///
    /// Small sends may complete inline; larger ones are acknowledged with a
    /// processing token and surface their outcome on the notifications feed.
    pub async fn send_dispatch(
        &self,
        request: &DispatchRequest,
    ) -> Result<SubmitOutcome<DispatchReceipt>> {
        request.validate()?;
        self.submit_job("/dispatches", request).await
    }
}
