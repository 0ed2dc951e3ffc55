//! Attachment resolution and idempotent file download.
//!
//! Photos and recognized document types are saved under the backup directory
//! with names derived deterministically from `(owner_id, id, extension)`.
//! Re-running an export therefore never re-fetches a file that is already
//! present under that name, even if the remote content changed.
//!
//! A failed download is logged and skipped, but the derived file name is
//! still returned so the transcript keeps its reference line. The transcript
//! stays complete at the cost of possibly missing bytes on disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::api::{Document, Photo, VkApi};
use crate::error::Result;

/// Maps a VK document type code to a file extension.
///
/// Only gif (3) and image (4) documents are downloadable; every other code
/// resolves to `None` and the attachment is silently skipped.
pub fn doc_extension(doc_type: u8) -> Option<&'static str> {
    match doc_type {
        3 => Some(".gif"),
        4 => Some(".jpg"),
        _ => None,
    }
}

/// Derives the on-disk name of a photo: `<owner_id>_<id>.jpg`.
pub fn photo_file_name(photo: &Photo) -> String {
    format!("{}_{}.jpg", photo.owner_id, photo.id)
}

/// Derives the on-disk name of a document: `<owner_id>_<id><extension>`.
///
/// Returns `None` for unrecognized document types.
pub fn document_file_name(doc: &Document) -> Option<String> {
    let extension = doc_extension(doc.doc_type)?;
    Some(format!("{}_{}{}", doc.owner_id, doc.id, extension))
}

/// Downloads attachment bytes into the backup directory, at most once per
/// file name.
pub struct FileFetcher<'a> {
    api: &'a dyn VkApi,
    backup_dir: PathBuf,
}

impl<'a> FileFetcher<'a> {
    /// Creates a fetcher writing into `backup_dir`.
    ///
    /// The directory must already exist; the orchestrator creates it before
    /// any transformation starts.
    pub fn new(api: &'a dyn VkApi, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            api,
            backup_dir: backup_dir.into(),
        }
    }

    /// Fetches `url` into `<backup_dir>/<file_name>` and returns the name.
    ///
    /// If the file already exists no network access happens at all. A
    /// download or write failure is logged and the name is returned anyway,
    /// so the caller's transcript line is emitted regardless.
    pub fn fetch(&self, url: &str, file_name: &str) -> String {
        let path = self.backup_dir.join(file_name);
        if !path.exists() {
            if let Err(error) = self.download(url, &path) {
                tracing::warn!(file_name, %error, "attachment download failed, skipping bytes");
            }
        }
        file_name.to_owned()
    }

    fn download(&self, url: &str, path: &Path) -> Result<()> {
        let bytes = self.api.fetch_bytes(url)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

/// Resolves a photo attachment: picks the largest size variant by width,
/// downloads it and returns the derived file name.
///
/// Returns `None` for photos without any size entry.
pub fn resolve_photo(photo: &Photo, fetcher: &FileFetcher<'_>) -> Option<String> {
    let best = photo.sizes.iter().max_by_key(|size| size.width)?;
    Some(fetcher.fetch(&best.url, &photo_file_name(photo)))
}

/// Resolves a document attachment: downloads it if its type is recognized
/// and returns the derived file name, `None` otherwise.
pub fn resolve_document(doc: &Document, fetcher: &FileFetcher<'_>) -> Option<String> {
    let file_name = document_file_name(doc)?;
    Some(fetcher.fetch(&doc.url, &file_name))
}
