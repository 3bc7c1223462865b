//! Mailflow Core - Foundation crate for the Mailflow campaign client.
//!
//! This crate provides the shared types, error handling, and configuration
//! management that the API bindings and the operation tracker depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes and enums (`CampaignId`, `SubjectId`, `Timestamp`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{ApiConfig, AppConfig, GenerationConfig, PollingConfig};
pub use error::{ConfigError, ConfigResult, MailflowError, Result};
pub use types::{
    CampaignId, ContactId, ContactType, DispatchMode, MailboxId, ResearchId, SubjectId, Timestamp,
};
