//! # vkpack
//!
//! Export a VK conversation's full message history and render it as a
//! WhatsApp-style plain-text transcript that Telegram's chat importer
//! accepts, optionally saving attached photos and documents next to it.
//!
//! ## Overview
//!
//! A run walks one fixed pipeline:
//!
//! 1. resolve the chat title ([`api::VkApi::conversation_info`])
//! 2. enrich the member directory with fetched profile names
//!    ([`export::MemberDirectory`])
//! 3. page through the complete history, oldest first
//!    ([`export::HistoryPaginator`])
//! 4. transform every message into transcript lines, rewriting inline
//!    mentions and downloading attachments ([`export::transform`])
//! 5. write the newline-joined transcript into `backup/<peer id>/`
//!
//! Everything is synchronous and blocking on a single execution context;
//! the only scheduling-relevant wait is a fixed inter-page delay that keeps
//! the client under the VK rate limit.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vkpack::api::VkClient;
//! use vkpack::config::Settings;
//! use vkpack::export::{ContentSelection, Exporter};
//!
//! fn main() -> vkpack::Result<()> {
//!     let settings = Settings::from_env()?;
//!     let client = VkClient::new(settings.token.clone());
//!
//!     let summary = Exporter::new(&client, &settings, ContentSelection::all()).run()?;
//!     match summary.output {
//!         Some(path) => println!("transcript written to {}", path.display()),
//!         None => println!("the chat has no messages"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`api`] — VK API boundary: the [`api::VkApi`] capability trait, typed
//!   payload records, and the blocking [`api::VkClient`]
//! - [`export`] — the retrieval and assembly pipeline
//! - [`config`] — [`config::Settings`], constructed once and passed around
//! - [`cli`] — clap argument definitions for the binary
//! - [`error`] — [`ExportError`] and the crate [`Result`] alias

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;

// Re-export the main types at the crate root for convenience
pub use error::{ExportError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use vkpack::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{ApiFailure, ExportError, Result};

    // API boundary
    pub use crate::api::{Attachment, HistoryItem, Profile, VkApi, VkClient};

    // Settings
    pub use crate::config::Settings;

    // Pipeline
    pub use crate::export::{
        ContentSelection, ExportSummary, Exporter, HistoryPaginator, MemberDirectory,
        rewrite_mentions,
    };
}
