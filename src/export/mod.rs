//! The history retrieval and transcript assembly pipeline.
//!
//! Components, leaf-first:
//!
//! - [`attachments`] — attachment resolution and idempotent file download
//! - [`mentions`] — inline mention rewriting
//! - [`members`] — [`MemberDirectory`] and its API enrichment
//! - [`transform`] — per-message transcript line generation
//! - [`history`] — [`HistoryPaginator`], paged history retrieval
//! - [`exporter`] — [`Exporter`], the orchestrator tying it all together

pub mod attachments;
pub mod exporter;
pub mod history;
pub mod members;
pub mod mentions;
pub mod transform;

pub use attachments::FileFetcher;
pub use exporter::{ExportSummary, Exporter};
pub use history::HistoryPaginator;
pub use members::MemberDirectory;
pub use mentions::rewrite_mentions;
pub use transform::ContentSelection;
