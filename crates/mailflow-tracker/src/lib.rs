//! Mailflow Tracker - Client-side tracking of long-running platform jobs.
//!
//! Smart campaign creation, dispatch sends, and contact research may be
//! acknowledged asynchronously with a correlation token. This crate keeps
//! one record per in-flight job, polls the notifications feed until a
//! terminal outcome is observed (or an attempt budget runs out), and
//! exposes the current status list for a UI to render.
//!
//! # Modules
//!
//! - [`record`] - Operation records and statuses
//! - [`store`] - Injectable in-memory record store
//! - [`reducer`] - Pure notification-to-status transition logic
//! - [`poller`] - Interval polling with cancellable handles
//!
//! # Example
//!
//! ```rust,ignore
//! use mailflow_tracker::{NotificationPoller, OperationKind, OperationStore};
//! use std::sync::Arc;
//!
//! let store = OperationStore::new();
//! let poller = NotificationPoller::new(Arc::new(api_client), store.clone());
//!
//! if let SubmitOutcome::Processing(ack) = client.send_dispatch(&request).await? {
//!     let handle = poller.track(&ack, OperationKind::DispatchSend {
//!         mailbox_ids: request.mailbox_ids.clone(),
//!         mode: request.mode,
//!     })?;
//!     // handle.stop() on view teardown
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod poller;
pub mod record;
pub mod reducer;
pub mod store;

// Re-export commonly used types
pub use error::{Result, TrackerError};
pub use poller::{NotificationPoller, PollHandle, PollerConfig};
pub use record::{OperationKind, OperationRecord, OperationStatus};
pub use store::OperationStore;
