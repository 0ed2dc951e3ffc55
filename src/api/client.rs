//! Blocking HTTP implementation of the [`VkApi`] trait.
//!
//! Requests go to `https://api.vk.com/method/<method>` with the access token
//! and API version appended as query parameters. VK wraps every reply in an
//! envelope holding either a `response` payload or an `error` object; the
//! envelope is decoded here so that callers only ever see typed records.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::api::types::{ConversationInfo, HistoryItem, PeerKind, Profile};
use crate::api::{API_VERSION, VkApi};
use crate::error::{ApiFailure, ExportError, Result};

/// Base URL for VK API method calls.
pub const VK_API_BASE: &str = "https://api.vk.com/method";

/// Blocking VK API client.
///
/// # Example
///
/// ```rust,no_run
/// use vkpack::api::{VkApi, VkClient};
///
/// let client = VkClient::new("my-access-token");
/// let info = client.conversation_info(2000000001)?;
/// # Ok::<(), vkpack::ExportError>(())
/// ```
pub struct VkClient {
    http: Client,
    token: String,
}

impl VkClient {
    /// Creates a client that authenticates with the given access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            token: token.into(),
        }
    }

    /// Calls a VK API method and decodes the `response` payload.
    fn call<T: DeserializeOwned>(
        &self,
        context: &'static str,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        self.call_inner(method, params)
            .map_err(|source| ExportError::remote_fetch(context, source))
    }

    fn call_inner<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> std::result::Result<T, ApiFailure> {
        let envelope: Envelope<T> = self
            .http
            .get(format!("{VK_API_BASE}/{method}"))
            .query(params)
            .query(&[("access_token", self.token.as_str()), ("v", API_VERSION)])
            .send()?
            .error_for_status()?
            .json()?;

        match envelope {
            Envelope {
                response: Some(response),
                ..
            } => Ok(response),
            Envelope {
                error: Some(error), ..
            } => Err(ApiFailure::Api {
                code: error.error_code,
                message: error.error_msg,
            }),
            Envelope { .. } => Err(ApiFailure::Malformed(format!(
                "{method}: envelope carries neither response nor error"
            ))),
        }
    }
}

impl VkApi for VkClient {
    fn conversation_info(&self, peer_id: i64) -> Result<ConversationInfo> {
        let context = "chat metadata fetch";
        let response: ConversationsResponse = self.call(
            context,
            "messages.getConversationsById",
            &[("peer_ids", peer_id.to_string())],
        )?;

        let conversation = response.items.into_iter().next().ok_or_else(|| {
            ExportError::remote_fetch(
                context,
                ApiFailure::Malformed("no conversation returned for peer".into()),
            )
        })?;

        Ok(ConversationInfo {
            kind: conversation.peer.kind,
            title: conversation.chat_settings.map(|settings| settings.title),
        })
    }

    fn conversation_members(&self, peer_id: i64) -> Result<Vec<Profile>> {
        let response: MembersResponse = self.call(
            "member profiles fetch",
            "messages.getConversationMembers",
            &[("peer_id", peer_id.to_string())],
        )?;
        Ok(response.profiles)
    }

    fn history_page(&self, peer_id: i64, offset: u32, count: u32) -> Result<Vec<HistoryItem>> {
        let response: HistoryResponse = self.call(
            "history page fetch",
            "messages.getHistory",
            &[
                ("peer_id", peer_id.to_string()),
                ("offset", offset.to_string()),
                ("count", count.to_string()),
                // Ascending chronological order, oldest first.
                ("rev", "1".to_string()),
            ],
        )?;
        Ok(response.items)
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let fetch = || -> std::result::Result<Vec<u8>, ApiFailure> {
            let bytes = self.http.get(url).send()?.error_for_status()?.bytes()?;
            Ok(bytes.to_vec())
        };
        fetch().map_err(|source| ExportError::remote_fetch("attachment download", source))
    }
}

/// VK response envelope: exactly one of `response` / `error` is present.
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    #[serde(default)]
    response: Option<T>,
    #[serde(default)]
    error: Option<EnvelopeError>,
}

#[derive(Deserialize)]
struct EnvelopeError {
    error_code: i64,
    error_msg: String,
}

#[derive(Deserialize)]
struct ConversationsResponse {
    #[serde(default)]
    items: Vec<Conversation>,
}

#[derive(Deserialize)]
struct Conversation {
    peer: Peer,
    #[serde(default)]
    chat_settings: Option<ChatSettings>,
}

#[derive(Deserialize)]
struct Peer {
    #[serde(rename = "type")]
    kind: PeerKind,
}

#[derive(Deserialize)]
struct ChatSettings {
    title: String,
}

#[derive(Deserialize)]
struct MembersResponse {
    #[serde(default)]
    profiles: Vec<Profile>,
}

#[derive(Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    items: Vec<HistoryItem>,
}
