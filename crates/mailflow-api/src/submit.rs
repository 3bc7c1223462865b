//! Sync-or-async job submission decoding.
//!
//! Job submission endpoints (smart campaign creation, dispatch send,
//! research start) may answer either synchronously with the terminal
//! payload inline, or asynchronously with a processing acknowledgment
//! carrying a correlation token. The two shapes are told apart at the
//! decode boundary so callers never inspect raw status strings.

use mailflow_core::{CampaignId, ResearchId, SubjectId};
use serde::Deserialize;

/// Outcome of submitting a long-running job.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SubmitOutcome<T> {
    /// The server accepted the job and will finish it asynchronously.
    /// Only this shape engages operation tracking.
    Processing(ProcessingAck),
    /// The server finished the job inline and returned the result.
    Completed(T),
}

impl<T> SubmitOutcome<T> {
    /// Whether the job was accepted for asynchronous processing.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing(_))
    }

    /// The processing acknowledgment, if the job runs asynchronously.
    #[must_use]
    pub fn processing(&self) -> Option<&ProcessingAck> {
        match self {
            Self::Processing(ack) => Some(ack),
            Self::Completed(_) => None,
        }
    }
}

/// Asynchronous acknowledgment returned at job submission.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingAck {
    /// Literal `"processing"` status tag; anything else fails the decode
    /// and falls through to the synchronous shape.
    #[allow(dead_code)]
    status: ProcessingTag,
    /// Server-issued correlation token, unique per job instance
    pub token: String,
    /// Campaign the job acts on, when applicable
    #[serde(default)]
    pub campaign_id: Option<CampaignId>,
    /// Research run the job acts on, when applicable
    #[serde(default)]
    pub research_id: Option<ResearchId>,
    /// Recipient count for dispatch sends
    #[serde(default)]
    pub recipients_count: Option<u32>,
}

impl ProcessingAck {
    /// The subject id used to correlate notifications with this job.
    ///
    /// Returns `None` if the acknowledgment names neither a campaign nor a
    /// research run, in which case the job cannot be tracked.
    #[must_use]
    pub fn subject_id(&self) -> Option<SubjectId> {
        self.campaign_id
            .map(SubjectId::from)
            .or_else(|| self.research_id.map(SubjectId::from))
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
enum ProcessingTag {
    #[serde(rename = "processing")]
    Processing,
}
