//! Connected mailboxes and inbox browsing.
//!
//! Mailbox access (Gmail and friends) is handled server-side; the client
//! only lists connected mailboxes and pages through their inboxes.

use crate::client::ApiClient;
use crate::error::Result;
use mailflow_core::{MailboxId, Timestamp};
use serde::Deserialize;

/// A mailbox connected to the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct Mailbox {
    /// Mailbox id
    pub id: MailboxId,
    /// Email address of the mailbox
    pub email: String,
    /// Provider tag, e.g. `gmail`
    pub provider: String,
    /// Whether the connection is currently healthy
    pub connected: bool,
}

/// A message from a mailbox inbox.
#[derive(Debug, Clone, Deserialize)]
pub struct InboxMessage {
    /// Provider-assigned message id
    pub id: String,
    /// Mailbox the message belongs to
    pub mailbox_id: MailboxId,
    /// Sender address
    pub from: String,
    /// Subject line
    #[serde(default)]
    pub subject: Option<String>,
    /// Short preview of the body
    #[serde(default)]
    pub snippet: Option<String>,
    /// When the message arrived
    pub received_at: Timestamp,
    /// Whether the message is unread
    pub unread: bool,
}

/// One page of inbox messages.
#[derive(Debug, Clone, Deserialize)]
pub struct InboxPage {
    /// Messages on this page
    pub messages: Vec<InboxMessage>,
    /// Page number, 1-based
    pub page: u32,
    /// Total number of pages
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct MailboxList {
    mailboxes: Vec<Mailbox>,
}

impl ApiClient {
    /// List connected mailboxes.
    pub async fn list_mailboxes(&self) -> Result<Vec<Mailbox>> {
        let list: MailboxList = self.get_json("/mailboxes").await?;
        Ok(list.mailboxes)
    }

    /// Page through a mailbox inbox.
    pub async fn list_inbox(&self, mailbox_id: MailboxId, page: u32) -> Result<InboxPage> {
        self.get_json(&format!("/mailboxes/{mailbox_id}/inbox?page={page}"))
            .await
    }
}
