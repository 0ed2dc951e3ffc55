//! Transcript assembly: the top-level export pipeline.
//!
//! [`Exporter::run`] drives the whole flow: validate settings, resolve the
//! chat title, enrich the member directory, page through the full history,
//! transform every item in order and serialize the line sequence to the
//! backup directory. Any fetch failure aborts the run; only attachment
//! downloads are allowed to fail quietly.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::api::{HistoryItem, PeerKind, VkApi};
use crate::config::Settings;
use crate::error::{ExportError, Result};
use crate::export::attachments::FileFetcher;
use crate::export::history::HistoryPaginator;
use crate::export::members::MemberDirectory;
use crate::export::transform::{ContentSelection, format_timestamp, transform_message};

/// File name prefix of the transcript, matching WhatsApp's own export
/// naming so Telegram's importer accepts the file.
pub const TRANSCRIPT_PREFIX: &str = "Чат WhatsApp с ";

/// Content of the synthetic first line. Telegram's importer expects a
/// non-empty first entry.
pub const PLACEHOLDER_TEXT: &str = "Ожидание сообщения";

/// What an export run produced.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Number of history items fetched.
    pub messages: usize,

    /// Number of transcript lines written, including the placeholder.
    pub lines: usize,

    /// Path of the transcript file; `None` when the chat had no messages.
    pub output: Option<PathBuf>,

    /// Total elapsed wall-clock time of the run.
    pub elapsed: Duration,
}

/// Drives a complete export of one conversation.
///
/// # Example
///
/// ```rust,no_run
/// use vkpack::api::VkClient;
/// use vkpack::config::Settings;
/// use vkpack::export::{ContentSelection, Exporter};
///
/// let settings = Settings::from_env()?;
/// let client = VkClient::new(settings.token.clone());
///
/// let summary = Exporter::new(&client, &settings, ContentSelection::all()).run()?;
/// println!("exported {} messages", summary.messages);
/// # Ok::<(), vkpack::ExportError>(())
/// ```
pub struct Exporter<'a> {
    api: &'a dyn VkApi,
    settings: &'a Settings,
    selection: ContentSelection,
    paginator: HistoryPaginator,
}

impl<'a> Exporter<'a> {
    /// Creates an exporter with the standard paginator.
    pub fn new(api: &'a dyn VkApi, settings: &'a Settings, selection: ContentSelection) -> Self {
        Self {
            api,
            settings,
            selection,
            paginator: HistoryPaginator::new(),
        }
    }

    /// Replaces the history paginator. Tests use a zero-delay one.
    #[must_use]
    pub fn with_paginator(mut self, paginator: HistoryPaginator) -> Self {
        self.paginator = paginator;
        self
    }

    /// Runs the export to completion.
    ///
    /// An empty history is not an error: the run completes without creating
    /// the backup directory or writing any file, and the summary's `output`
    /// is `None`.
    pub fn run(&self) -> Result<ExportSummary> {
        let start = Instant::now();

        if self.settings.token.is_empty() {
            return Err(ExportError::config("access token is empty"));
        }
        if self.settings.peer_id == 0 {
            return Err(ExportError::config("peer id is not set"));
        }

        let title = self.chat_title()?;
        tracing::info!(%title, "exporting conversation");

        let mut directory = MemberDirectory::from_overrides(self.settings.member_names.clone());
        directory.enrich(self.api, self.settings.peer_id)?;

        let history = self.paginator.fetch_all(self.api, self.settings.peer_id)?;
        if history.is_empty() {
            tracing::warn!("the chat has no messages, nothing to export");
            return Ok(ExportSummary {
                messages: 0,
                lines: 0,
                output: None,
                elapsed: start.elapsed(),
            });
        }

        let backup_dir = self.settings.backup_dir();
        fs::create_dir_all(&backup_dir)?;
        let fetcher = FileFetcher::new(self.api, &backup_dir);

        tracing::info!(
            messages = history.len(),
            "transforming messages and downloading files; this may take a while"
        );

        let mut lines = Vec::with_capacity(history.len() + 1);
        lines.push(self.placeholder_line(&history[0], &directory));
        for item in &history {
            lines.extend(transform_message(
                item,
                &directory,
                self.selection,
                &fetcher,
                self.settings.timezone,
            ));
        }

        let output = backup_dir.join(format!("{TRANSCRIPT_PREFIX}{title}.txt"));
        tracing::info!(path = %output.display(), "writing transcript");
        fs::write(&output, lines.join("\n"))
            .map_err(|source| ExportError::file_write(output.clone(), source))?;

        Ok(ExportSummary {
            messages: history.len(),
            lines: lines.len(),
            output: Some(output),
            elapsed: start.elapsed(),
        })
    }

    /// Resolves a human-readable chat title for the transcript file name.
    ///
    /// Group chats use their title; direct conversations use the override
    /// name for the peer id. Everything else falls back to `id<peer_id>`.
    fn chat_title(&self) -> Result<String> {
        let peer_id = self.settings.peer_id;
        let fallback = || format!("id{peer_id}");

        let info = self.api.conversation_info(peer_id)?;
        let title = match info.kind {
            PeerKind::Chat => info.title.unwrap_or_else(fallback),
            PeerKind::User => self
                .settings
                .member_names
                .get(&peer_id)
                .cloned()
                .unwrap_or_else(fallback),
            PeerKind::Other => fallback(),
        };
        Ok(title)
    }

    fn placeholder_line(
        &self,
        first: &HistoryItem,
        directory: &MemberDirectory,
    ) -> String {
        format!(
            "{} - {}: {PLACEHOLDER_TEXT}",
            format_timestamp(first.date, self.settings.timezone),
            directory.resolve(first.from_id)
        )
    }
}
