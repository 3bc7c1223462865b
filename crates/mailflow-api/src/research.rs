//! AI-assisted contact research.

use crate::client::ApiClient;
use crate::error::Result;
use crate::submit::SubmitOutcome;
use mailflow_core::{ContactId, ContactType, ResearchId, Timestamp};
use serde::{Deserialize, Serialize};

/// Payload for starting a research run on a contact or company.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchRequest {
    /// Contact or company to research
    pub contact_id: ContactId,
    /// Whether the target is a person or a company
    pub contact_type: ContactType,
}

impl ResearchRequest {
    /// Create a research request.
    #[must_use]
    pub fn new(contact_id: ContactId, contact_type: ContactType) -> Self {
        Self {
            contact_id,
            contact_type,
        }
    }
}

/// Finished research output.
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchReport {
    /// Research run id
    pub research_id: ResearchId,
    /// Contact the report is about
    pub contact_id: ContactId,
    /// Generated summary
    pub summary: String,
    /// When the research finished
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
}

impl ApiClient {
    /// Start a research run.
    ///
    /// Research usually runs asynchronously; the acknowledgment is
    /// correlated by research id on the notifications feed.
    pub async fn start_research(
        &self,
        request: &ResearchRequest,
    ) -> Result<SubmitOutcome<ResearchReport>> {
        self.submit_job("/research", request).await
    }

    /// Fetch a finished research report.
    pub async fn get_research(&self, id: ResearchId) -> Result<ResearchReport> {
        self.get_json(&format!("/research/{id}")).await
    }
}
