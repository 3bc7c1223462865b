//! Shared types used across the Mailflow client.
//!
//! This module defines common newtypes and enums that provide type safety
//! and clear domain modeling.

use crate::error::MailflowError;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new id from a raw value.
            #[must_use]
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw id value.
            #[must_use]
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

id_newtype! {
    /// Identifier of a campaign, assigned by the platform API.
    CampaignId
}

id_newtype! {
    /// Identifier of a research run, assigned by the platform API.
    ResearchId
}

id_newtype! {
    /// Identifier of a contact or company record.
    ContactId
}

id_newtype! {
    /// Identifier of a connected sending mailbox.
    MailboxId
}

/// Correlation key for tracked long-running operations.
///
/// Notifications reference the domain entity a job acts on (a campaign or a
/// research run), not the job token, so in-flight operations are keyed and
/// looked up by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(i64);

impl SubjectId {
    /// Create a subject id from a raw value.
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CampaignId> for SubjectId {
    fn from(id: CampaignId) -> Self {
        Self(id.value())
    }
}

impl From<ResearchId> for SubjectId {
    fn from(id: ResearchId) -> Self {
        Self(id.value())
    }
}

/// How a dispatch is delivered.
///
/// The mode is chosen at submission time and determines which notification
/// kinds confirm or fail the operation while it is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Send to all recipients right away
    Immediate,
    /// Enqueue the sequence for a later send window
    Scheduled,
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => write!(f, "immediate"),
            Self::Scheduled => write!(f, "scheduled"),
        }
    }
}

/// Kind of contact a research run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    /// An individual person
    Person,
    /// A company record
    Company,
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Person => write!(f, "person"),
            Self::Company => write!(f, "company"),
        }
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
///
/// Operation records carry epoch-millisecond timestamps; the wrapper provides
/// both RFC3339 and epoch accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from milliseconds since the Unix epoch.
    pub fn from_epoch_millis(millis: i64) -> Result<Self, MailflowError> {
        Utc.timestamp_millis_opt(millis)
            .single()
            .map(Self)
            .ok_or_else(|| {
                MailflowError::Validation(format!("invalid epoch milliseconds: {millis}"))
            })
    }

    /// Parse a timestamp from an RFC3339 string.
    pub fn from_rfc3339(s: &str) -> Result<Self, MailflowError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| MailflowError::Validation(format!("invalid timestamp: {e}")))
    }

    /// Format as RFC3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Get milliseconds since the Unix epoch.
    #[must_use]
    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Get the inner `DateTime<Utc>`.
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}
