//! Mailflow API - Typed bindings for the campaign platform HTTP API.
//!
//! All business logic (campaign persistence, email sending, AI generation,
//! research) runs server-side; this crate is the client's typed surface for
//! it: campaign CRUD, dispatch sending, contact research, contact/company
//! lists, mailbox inbox browsing, content generation, and the notifications
//! feed that reports on long-running jobs.
//!
//! Job submission endpoints may answer synchronously or hand back a
//! processing acknowledgment; see [`SubmitOutcome`]. The notifications feed
//! is exposed behind the [`NotificationsFeed`] trait so the operation
//! tracker can be tested against a fake.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod campaigns;
pub mod client;
pub mod contacts;
pub mod dispatch;
pub mod error;
pub mod generation;
pub mod mailboxes;
pub mod notifications;
pub mod research;
pub mod submit;

// Re-export commonly used types
pub use campaigns::{Campaign, CampaignStatus, CampaignUpdate, NewCampaign, SmartCampaignRequest};
pub use client::ApiClient;
pub use contacts::{Company, CompanyPage, Contact, ContactPage, NewContact};
pub use dispatch::{DispatchReceipt, DispatchRequest};
pub use error::{ApiError, Result};
pub use generation::{GeneratedContent, GenerationRequest};
pub use mailboxes::{InboxMessage, InboxPage, Mailbox};
pub use notifications::{
    Notification, NotificationKind, NotificationMetadata, NotificationsFeed,
};
pub use research::{ResearchReport, ResearchRequest};
pub use submit::{ProcessingAck, SubmitOutcome};
