//! Pure status transition logic.
//!
//! Maps a raw notification list plus the current record to the next status,
//! isolated from fetch and timer mechanics for testability. At most one
//! terminal notification is expected per subject, so the mapping is
//! order-independent.

use crate::record::{OperationKind, OperationRecord, OperationStatus};
use mailflow_api::notifications::{Notification, NotificationKind};
use mailflow_core::{DispatchMode, SubjectId};

/// Determine the next status for a tracked record given the current
/// notification list.
///
/// Returns `Some(terminal status)` when a matching completion or failure
/// notification is present, and `None` when the record should keep its
/// current status (terminal records are ignored; pending records without a
/// match keep polling).
#[must_use]
pub fn next_status(
    record: &OperationRecord,
    notifications: &[Notification],
) -> Option<OperationStatus> {
    if record.status.is_terminal() {
        return None;
    }

    for notification in notifications {
        if !matches_subject(record, notification) {
            continue;
        }
        if success_kinds(&record.kind).contains(&notification.kind) {
            return Some(OperationStatus::Completed);
        }
        if failure_kinds(&record.kind).contains(&notification.kind) {
            return Some(OperationStatus::Failed);
        }
    }

    None
}

/// Whether a notification's metadata correlates with the record's subject.
///
/// Campaign jobs match on `campaign_id`, research jobs on `research_id`.
fn matches_subject(record: &OperationRecord, notification: &Notification) -> bool {
    let subject = match record.kind {
        OperationKind::CampaignCreate { .. } | OperationKind::DispatchSend { .. } => {
            notification.metadata.campaign_id.map(SubjectId::from)
        }
        OperationKind::Research { .. } => notification.metadata.research_id.map(SubjectId::from),
    };
    subject == Some(record.subject_id)
}

/// Notification kinds that complete an operation of the given kind.
///
/// A partial send still completes the dispatch; the partial outcome remains
/// visible on the notification itself.
fn success_kinds(kind: &OperationKind) -> &'static [NotificationKind] {
    match kind {
        OperationKind::CampaignCreate { .. } => &[NotificationKind::CampaignCreated],
        OperationKind::DispatchSend {
            mode: DispatchMode::Immediate,
            ..
        } => &[
            NotificationKind::CampaignSent,
            NotificationKind::CampaignPartiallySent,
        ],
        OperationKind::DispatchSend {
            mode: DispatchMode::Scheduled,
            ..
        } => &[NotificationKind::SequenceScheduled],
        OperationKind::Research { .. } => &[NotificationKind::ResearchCompleted],
    }
}

/// Notification kinds that fail an operation of the given kind.
fn failure_kinds(kind: &OperationKind) -> &'static [NotificationKind] {
    match kind {
        OperationKind::CampaignCreate { .. } => &[NotificationKind::CampaignCreateFailed],
        OperationKind::DispatchSend {
            mode: DispatchMode::Immediate,
            ..
        } => &[NotificationKind::CampaignFailed],
        OperationKind::DispatchSend {
            mode: DispatchMode::Scheduled,
            ..
        } => &[NotificationKind::SequenceScheduleFailed],
        OperationKind::Research { .. } => &[NotificationKind::ResearchFailed],
    }
}
