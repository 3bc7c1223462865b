//! Notifications feed bindings.
//!
//! The platform surfaces completion/failure events for long-running jobs
//! through a notifications feed. The wire `notification_type` string tag is
//! decoded into a closed [`NotificationKind`] enum at the boundary; kinds
//! introduced server-side that this client does not know yet land in
//! [`NotificationKind::Unknown`] and are ignored by the tracker.

use crate::client::ApiClient;
use crate::error::Result;
use async_trait::async_trait;
use mailflow_core::{CampaignId, ResearchId, Timestamp};
use serde::{Deserialize, Serialize};

/// A single entry from the notifications feed.
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    /// Feed entry id
    pub id: i64,
    /// Decoded notification kind
    #[serde(rename = "notification_type")]
    pub kind: NotificationKind,
    /// Correlation metadata
    #[serde(default)]
    pub metadata: NotificationMetadata,
    /// When the notification was raised
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Closed set of notification kinds relevant to tracked operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Smart campaign creation finished
    CampaignCreated,
    /// Smart campaign creation failed
    CampaignCreateFailed,
    /// Immediate dispatch delivered to all recipients
    CampaignSent,
    /// Immediate dispatch delivered to some recipients
    CampaignPartiallySent,
    /// Immediate dispatch failed
    CampaignFailed,
    /// Scheduled dispatch confirmed for its send window
    SequenceScheduled,
    /// Scheduled dispatch could not be enqueued
    SequenceScheduleFailed,
    /// Contact research finished
    ResearchCompleted,
    /// Contact research failed
    ResearchFailed,
    /// Any kind this client does not recognize
    #[serde(other)]
    Unknown,
}

/// Correlation metadata carried by a notification.
///
/// The feed is free-form; the conventional subject keys are typed and the
/// rest is kept as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationMetadata {
    /// Campaign the notification refers to
    #[serde(default)]
    pub campaign_id: Option<CampaignId>,
    /// Research run the notification refers to
    #[serde(default)]
    pub research_id: Option<ResearchId>,
    /// Remaining metadata fields, untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Source of notification feed entries.
///
/// Implemented by [`ApiClient`] against the live feed; tests substitute a
/// scripted fake so poller behavior can be exercised without a server.
#[async_trait]
pub trait NotificationsFeed: Send + Sync {
    /// Fetch the current notification list.
    ///
    /// # Errors
    /// Returns error if the feed cannot be reached or the response cannot
    /// be decoded.
    async fn fetch_notifications(&self) -> Result<Vec<Notification>>;
}

#[derive(Debug, Deserialize)]
struct NotificationList {
    notifications: Vec<Notification>,
}

#[async_trait]
impl NotificationsFeed for ApiClient {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>> {
        let list: NotificationList = self.get_json("/notifications").await?;
        Ok(list.notifications)
    }
}
