//! VK API boundary: the capability trait and its typed payloads.
//!
//! The exporter consumes the remote platform through the [`VkApi`] trait.
//! Production code uses [`VkClient`], a blocking HTTP implementation; tests
//! substitute in-memory fakes.

pub mod client;
pub mod types;

pub use client::VkClient;
pub use types::{
    Attachment, ConversationInfo, Document, HistoryItem, PeerKind, Photo, PhotoSize, Profile,
};

use crate::error::Result;

/// VK API version every request is pinned to.
pub const API_VERSION: &str = "5.131";

/// The external capability surface the export pipeline consumes.
///
/// All methods are synchronous and blocking; the pipeline runs on a single
/// execution context (see the crate docs).
pub trait VkApi {
    /// Fetches metadata of the conversation: peer kind and group title.
    fn conversation_info(&self, peer_id: i64) -> Result<ConversationInfo>;

    /// Fetches member profiles of the conversation.
    fn conversation_members(&self, peer_id: i64) -> Result<Vec<Profile>>;

    /// Fetches one page of chat history in ascending chronological order.
    fn history_page(&self, peer_id: i64, offset: u32, count: u32) -> Result<Vec<HistoryItem>>;

    /// Fetches raw bytes from an attachment URL.
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}
