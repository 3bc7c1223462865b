//! Operation record types.
//!
//! One record exists per in-flight (or recently finished) long-running job.
//! Records are created exactly once, at job submission, and only when the
//! server answered with an asynchronous processing acknowledgment.

use mailflow_core::{ContactId, ContactType, DispatchMode, MailboxId, SubjectId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a tracked operation.
///
/// Transitions are monotonic: `Processing`/`Scheduled` move to `Completed`
/// or `Failed` exactly once, and terminal states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    /// The server is working on the job
    Processing,
    /// The job is a scheduled dispatch awaiting its send window confirmation
    Scheduled,
    /// The job finished successfully (including partial sends)
    Completed,
    /// The job failed, or no notification arrived within the poll budget
    Failed,
}

impl OperationStatus {
    /// Whether this status is terminal.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processing => write!(f, "processing"),
            Self::Scheduled => write!(f, "scheduled"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// The category of job a record tracks, with its job-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationKind {
    /// AI-assisted campaign creation
    CampaignCreate {
        /// Name of the campaign being created
        name: String,
    },
    /// Dispatch send
    DispatchSend {
        /// Mailboxes the dispatch sends from
        mailbox_ids: Vec<MailboxId>,
        /// Delivery mode, which selects the notification kinds that
        /// confirm or fail the operation
        mode: DispatchMode,
    },
    /// Contact research
    Research {
        /// Contact being researched
        contact_id: ContactId,
        /// Whether the target is a person or a company
        contact_type: ContactType,
    },
}

impl OperationKind {
    /// The status a fresh record of this kind starts in.
    ///
    /// Scheduled dispatches await a schedule confirmation rather than a
    /// send result, and start in [`OperationStatus::Scheduled`].
    #[must_use]
    pub fn initial_status(&self) -> OperationStatus {
        match self {
            Self::DispatchSend {
                mode: DispatchMode::Scheduled,
                ..
            } => OperationStatus::Scheduled,
            _ => OperationStatus::Processing,
        }
    }
}

/// A tracked long-running operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRecord {
    /// Server-issued correlation token from the submission acknowledgment
    pub token: String,
    /// Domain entity the job acts on; records are keyed and looked up by
    /// this id, not by token
    pub subject_id: SubjectId,
    /// Job category and payload
    pub kind: OperationKind,
    /// Current status
    pub status: OperationStatus,
    /// When the job was submitted
    pub started_at: Timestamp,
    /// When a terminal state was observed
    pub completed_at: Option<Timestamp>,
}

impl OperationRecord {
    /// Create a record for a freshly acknowledged job.
    #[must_use]
    pub fn new(token: impl Into<String>, subject_id: SubjectId, kind: OperationKind) -> Self {
        let status = kind.initial_status();
        Self {
            token: token.into(),
            subject_id,
            kind,
            status,
            started_at: Timestamp::now(),
            completed_at: None,
        }
    }

    /// Whether the operation is still awaiting a terminal notification.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.status.is_terminal()
    }
}
