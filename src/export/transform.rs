//! Message-to-line transformation.
//!
//! Converts one raw history item into zero or more transcript lines in the
//! WhatsApp export format Telegram's importer understands:
//!
//! ```text
//! 14.11.2023, 01:13 - Alice: hello
//! 14.11.2023, 01:14 - Bob: 42_7.jpg (файл добавлен)
//! ```
//!
//! Within one item the ordering is fixed: the text line first, then one line
//! per resolved photo, then one line per resolved document.

use chrono::{FixedOffset, LocalResult, TimeZone};

use crate::api::{Attachment, HistoryItem};
use crate::export::attachments::{FileFetcher, resolve_document, resolve_photo};
use crate::export::members::MemberDirectory;
use crate::export::mentions::rewrite_mentions;

/// Timestamp format of the WhatsApp transcript.
pub const DATE_FORMAT: &str = "%d.%m.%Y, %H:%M";

/// Suffix appended to every attachment reference line.
pub const FILE_ADDED_SUFFIX: &str = "(файл добавлен)";

/// Which content classes of a message make it into the transcript.
///
/// Mirrors the CLI flags; at least one class must be selected, which the CLI
/// validates before any I/O.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentSelection {
    /// Include message text.
    pub text: bool,
    /// Download photos and reference them.
    pub photos: bool,
    /// Download recognized documents and reference them.
    pub documents: bool,
}

impl ContentSelection {
    /// Selects every content class.
    pub fn all() -> Self {
        Self {
            text: true,
            photos: true,
            documents: true,
        }
    }

    /// Selects message text only.
    pub fn text_only() -> Self {
        Self {
            text: true,
            ..Self::default()
        }
    }

    /// Returns `true` if no content class is selected.
    pub fn is_empty(&self) -> bool {
        !(self.text || self.photos || self.documents)
    }
}

/// Formats a unix timestamp in the transcript's date format, rendered in the
/// given fixed offset.
pub fn format_timestamp(timestamp: i64, timezone: FixedOffset) -> String {
    match timezone.timestamp_opt(timestamp, 0) {
        LocalResult::Single(datetime) => datetime.format(DATE_FORMAT).to_string(),
        // Unreachable for valid unix timestamps; keep the raw value rather
        // than lose the line.
        _ => timestamp.to_string(),
    }
}

/// Transforms one history item into its transcript lines.
///
/// Emits, subject to `selection`: one line with mention-rewritten text, then
/// one `"<file> (файл добавлен)"` line per resolved photo, then one per
/// resolved document, preserving upstream attachment order within each
/// class. An item with no qualifying content emits nothing.
pub fn transform_message(
    item: &HistoryItem,
    directory: &MemberDirectory,
    selection: ContentSelection,
    fetcher: &FileFetcher<'_>,
    timezone: FixedOffset,
) -> Vec<String> {
    let date = format_timestamp(item.date, timezone);
    let member = directory.resolve(item.from_id);

    let mut images = Vec::new();
    let mut docs = Vec::new();
    for attachment in &item.attachments {
        match attachment {
            Attachment::Photo(photo) if selection.photos => {
                if let Some(file_name) = resolve_photo(photo, fetcher) {
                    images.push(file_name);
                }
            }
            Attachment::Document(doc) if selection.documents => {
                if let Some(file_name) = resolve_document(doc, fetcher) {
                    docs.push(file_name);
                }
            }
            _ => {}
        }
    }

    let mut lines = Vec::new();
    if selection.text && !item.text.is_empty() {
        let text = rewrite_mentions(&item.text, directory);
        lines.push(format!("{date} - {member}: {text}"));
    }
    for file_name in images.into_iter().chain(docs) {
        lines.push(format!("{date} - {member}: {file_name} {FILE_ADDED_SUFFIX}"));
    }
    lines
}
