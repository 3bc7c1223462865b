//! Integration tests for the notification poller against a scripted feed.

use async_trait::async_trait;
use mailflow_api::error::ApiError;
use mailflow_api::notifications::{
    Notification, NotificationKind, NotificationMetadata, NotificationsFeed,
};
use mailflow_api::submit::ProcessingAck;
use mailflow_core::{
    CampaignId, ContactId, ContactType, DispatchMode, MailboxId, ResearchId, SubjectId,
};
use mailflow_tracker::record::OperationRecord;
use mailflow_tracker::{
    NotificationPoller, OperationKind, OperationStatus, OperationStore, PollerConfig, TrackerError,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Feed returning a scripted sequence of responses, then empty lists.
struct FakeFeed {
    responses: Mutex<VecDeque<mailflow_api::Result<Vec<Notification>>>>,
    calls: AtomicU32,
}

impl FakeFeed {
    fn scripted(
        responses: impl IntoIterator<Item = mailflow_api::Result<Vec<Notification>>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: AtomicU32::new(0),
        })
    }

    fn empty() -> Arc<Self> {
        Self::scripted([])
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationsFeed for FakeFeed {
    async fn fetch_notifications(&self) -> mailflow_api::Result<Vec<Notification>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .expect("lock scripted responses")
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("mailflow_tracker=debug")
        .with_test_writer()
        .try_init();
}

fn fast_config(max_attempts: u32) -> PollerConfig {
    PollerConfig {
        interval: Duration::from_millis(10),
        max_attempts,
    }
}

fn campaign_notification(kind: NotificationKind, campaign_id: i64) -> Notification {
    Notification {
        id: 1,
        kind,
        metadata: NotificationMetadata {
            campaign_id: Some(CampaignId::new(campaign_id)),
            ..NotificationMetadata::default()
        },
        created_at: None,
    }
}

fn research_notification(kind: NotificationKind, research_id: i64) -> Notification {
    Notification {
        id: 2,
        kind,
        metadata: NotificationMetadata {
            research_id: Some(ResearchId::new(research_id)),
            ..NotificationMetadata::default()
        },
        created_at: None,
    }
}

fn dispatch_kind(mode: DispatchMode) -> OperationKind {
    OperationKind::DispatchSend {
        mailbox_ids: vec![MailboxId::new(1)],
        mode,
    }
}

#[tokio::test]
async fn test_dispatch_resolves_on_sent_notification() -> anyhow::Result<()> {
    init_tracing();

    // Submission answered with a processing acknowledgment for campaign 42
    let ack: ProcessingAck = serde_json::from_str(
        r#"{"status":"processing","token":"abc","campaign_id":42,"recipients_count":10}"#,
    )?;

    // First poll finds nothing, second finds the send confirmation
    let feed = FakeFeed::scripted([
        Ok(Vec::new()),
        Ok(vec![campaign_notification(
            NotificationKind::CampaignSent,
            42,
        )]),
    ]);

    let store = OperationStore::new();
    let poller = NotificationPoller::new(feed.clone(), store.clone()).with_config(fast_config(10));

    let handle = poller.track(&ack, dispatch_kind(DispatchMode::Immediate))?;

    let subject = SubjectId::new(42);
    let record = store.get(subject).expect("record created at submission");
    assert_eq!(record.status, OperationStatus::Processing);
    assert_eq!(record.token, "abc");

    handle.wait().await;

    let record = store.get(subject).expect("record still present");
    assert_eq!(record.status, OperationStatus::Completed);
    assert!(record.completed_at.is_some());
    assert_eq!(feed.calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_scheduled_dispatch_ignores_send_confirmation() {
    init_tracing();

    // A send confirmation for the same campaign must not resolve a
    // scheduled dispatch; only the schedule confirmation does.
    let feed = FakeFeed::scripted([
        Ok(vec![campaign_notification(
            NotificationKind::CampaignSent,
            42,
        )]),
        Ok(vec![campaign_notification(
            NotificationKind::SequenceScheduled,
            42,
        )]),
    ]);

    let store = OperationStore::new();
    let subject = SubjectId::new(42);
    store.add(OperationRecord::new(
        "abc",
        subject,
        dispatch_kind(DispatchMode::Scheduled),
    ));
    assert_eq!(
        store.get(subject).expect("record present").status,
        OperationStatus::Scheduled
    );

    let poller = NotificationPoller::new(feed.clone(), store.clone()).with_config(fast_config(10));
    poller.watch(subject).wait().await;

    let record = store.get(subject).expect("record present");
    assert_eq!(record.status, OperationStatus::Completed);
    assert_eq!(feed.calls(), 2);
}

#[tokio::test]
async fn test_schedule_failure_fails_scheduled_dispatch() {
    init_tracing();

    let feed = FakeFeed::scripted([Ok(vec![campaign_notification(
        NotificationKind::SequenceScheduleFailed,
        42,
    )])]);

    let store = OperationStore::new();
    let subject = SubjectId::new(42);
    store.add(OperationRecord::new(
        "abc",
        subject,
        dispatch_kind(DispatchMode::Scheduled),
    ));

    let poller = NotificationPoller::new(feed, store.clone()).with_config(fast_config(10));
    poller.watch(subject).wait().await;

    assert_eq!(
        store.get(subject).expect("record present").status,
        OperationStatus::Failed
    );
}

#[tokio::test]
async fn test_transient_fetch_error_does_not_stop_polling() {
    init_tracing();

    let feed = FakeFeed::scripted([
        Err(ApiError::Status {
            endpoint: "/notifications".to_string(),
            status: 503,
            message: "Service Unavailable".to_string(),
        }),
        Ok(vec![campaign_notification(
            NotificationKind::CampaignSent,
            42,
        )]),
    ]);

    let store = OperationStore::new();
    let subject = SubjectId::new(42);
    store.add(OperationRecord::new(
        "abc",
        subject,
        dispatch_kind(DispatchMode::Immediate),
    ));

    let poller = NotificationPoller::new(feed.clone(), store.clone()).with_config(fast_config(10));
    poller.watch(subject).wait().await;

    // The error tick neither failed the record nor stopped the loop
    assert_eq!(
        store.get(subject).expect("record present").status,
        OperationStatus::Completed
    );
    assert_eq!(feed.calls(), 2);
}

#[tokio::test]
async fn test_timeout_forces_failed_and_stops() {
    init_tracing();

    let feed = FakeFeed::empty();
    let store = OperationStore::new();
    let subject = SubjectId::new(42);
    store.add(OperationRecord::new(
        "abc",
        subject,
        dispatch_kind(DispatchMode::Immediate),
    ));

    let poller = NotificationPoller::new(feed.clone(), store.clone()).with_config(fast_config(3));
    poller.watch(subject).wait().await;

    let record = store.get(subject).expect("record present");
    assert_eq!(record.status, OperationStatus::Failed);
    assert!(record.completed_at.is_some());
    assert_eq!(feed.calls(), 3);

    // No further fetches after the budget is exhausted
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(feed.calls(), 3);
}

#[tokio::test]
async fn test_stop_cancels_polling() {
    init_tracing();

    let feed = FakeFeed::empty();
    let store = OperationStore::new();
    let subject = SubjectId::new(42);
    store.add(OperationRecord::new(
        "abc",
        subject,
        dispatch_kind(DispatchMode::Immediate),
    ));

    let poller =
        NotificationPoller::new(feed.clone(), store.clone()).with_config(fast_config(1_000));
    let handle = poller.watch(subject);

    // Let a few ticks happen, then tear down
    tokio::time::sleep(Duration::from_millis(35)).await;
    handle.stop();
    handle.wait().await;

    // Cancellation leaves the record as-is
    assert_eq!(
        store.get(subject).expect("record present").status,
        OperationStatus::Processing
    );

    let calls_after_stop = feed.calls();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(feed.calls(), calls_after_stop);
}

#[tokio::test]
async fn test_dismissed_record_stops_polling() {
    init_tracing();

    let feed = FakeFeed::empty();
    let store = OperationStore::new();
    let subject = SubjectId::new(42);
    store.add(OperationRecord::new(
        "abc",
        subject,
        dispatch_kind(DispatchMode::Immediate),
    ));

    let poller =
        NotificationPoller::new(feed.clone(), store.clone()).with_config(fast_config(1_000));
    let handle = poller.watch(subject);

    assert!(store.remove(subject));

    // The loop notices the dismissal on its next tick and exits
    handle.wait().await;
    assert!(store.get(subject).is_none());
}

#[tokio::test]
async fn test_ack_without_subject_is_rejected() -> anyhow::Result<()> {
    init_tracing();

    let ack: ProcessingAck =
        serde_json::from_str(r#"{"status":"processing","token":"abc"}"#)?;

    let store = OperationStore::new();
    let poller = NotificationPoller::new(FakeFeed::empty(), store.clone());

    let err = poller
        .track(&ack, dispatch_kind(DispatchMode::Immediate))
        .expect_err("untrackable acknowledgment rejected");
    assert!(matches!(err, TrackerError::MissingSubject { .. }));

    // No record was created, so nothing polls
    assert_eq!(store.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_research_failure_resolution() {
    init_tracing();

    let feed = FakeFeed::scripted([Ok(vec![research_notification(
        NotificationKind::ResearchFailed,
        7,
    )])]);

    let store = OperationStore::new();
    let subject = SubjectId::new(7);
    store.add(OperationRecord::new(
        "xyz",
        subject,
        OperationKind::Research {
            contact_id: ContactId::new(9),
            contact_type: ContactType::Person,
        },
    ));

    let poller = NotificationPoller::new(feed, store.clone()).with_config(fast_config(10));
    poller.watch(subject).wait().await;

    assert_eq!(
        store.get(subject).expect("record present").status,
        OperationStatus::Failed
    );
}
