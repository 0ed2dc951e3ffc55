//! Typed records for the VK API boundary.
//!
//! Every payload the exporter consumes is deserialized into one of these
//! explicit structures at the API adapter. Core logic never sees untyped
//! JSON maps.

use serde::Deserialize;

/// One raw message record from the chat history.
///
/// Ordering of a fetched history is chronological ascending (oldest first),
/// because pagination requests reverse order explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryItem {
    /// Message identifier within the conversation.
    pub id: i64,

    /// Unix timestamp of the message.
    pub date: i64,

    /// Identifier of the author.
    pub from_id: i64,

    /// Message text; empty for attachment-only messages.
    #[serde(default)]
    pub text: String,

    /// Attachments in the order VK returned them.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// One attachment entry of a message.
///
/// VK wraps every attachment in an object carrying a `type` discriminator
/// next to a field of the same name. Anything that is not a photo or a
/// document is collapsed into [`Attachment::Other`] and ignored downstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawAttachment")]
pub enum Attachment {
    /// A photo with its size variants.
    Photo(Photo),
    /// A document (file) with a direct download URL.
    Document(Document),
    /// Any other attachment kind (sticker, audio, wall post, ...).
    Other,
}

/// Wire shape of an attachment entry before classification.
#[derive(Debug, Clone, Deserialize)]
struct RawAttachment {
    #[serde(default)]
    photo: Option<Photo>,
    #[serde(default)]
    doc: Option<Document>,
}

impl From<RawAttachment> for Attachment {
    fn from(raw: RawAttachment) -> Self {
        match raw {
            RawAttachment { photo: Some(photo), .. } => Attachment::Photo(photo),
            RawAttachment { doc: Some(doc), .. } => Attachment::Document(doc),
            RawAttachment { .. } => Attachment::Other,
        }
    }
}

/// A photo attachment.
#[derive(Debug, Clone, Deserialize)]
pub struct Photo {
    /// Photo identifier.
    pub id: i64,

    /// Identifier of the photo owner; negative for communities.
    pub owner_id: i64,

    /// Available size variants, in the order VK returned them.
    #[serde(default)]
    pub sizes: Vec<PhotoSize>,
}

/// One size variant of a photo.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    /// VK size label (`"s"`, `"m"`, `"x"`, `"w"`, ...).
    #[serde(rename = "type")]
    pub label: String,

    /// Width in pixels; zero for some legacy photos.
    #[serde(default)]
    pub width: u32,

    /// Direct URL of this variant.
    pub url: String,
}

/// A document attachment.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Document identifier.
    pub id: i64,

    /// Identifier of the document owner.
    pub owner_id: i64,

    /// Direct download URL.
    pub url: String,

    /// VK document type code (3 = gif, 4 = image, ...).
    #[serde(rename = "type")]
    pub doc_type: u8,
}

/// A member profile returned by the members listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    /// Member identifier.
    pub id: i64,

    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,
}

impl Profile {
    /// Returns `"<first_name> <last_name>"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The kind of peer a conversation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeerKind {
    /// Multi-member group chat.
    Chat,
    /// Direct conversation with a user.
    User,
    /// Community, email or any future peer kind.
    #[serde(other)]
    Other,
}

/// Metadata of the conversation being exported.
#[derive(Debug, Clone)]
pub struct ConversationInfo {
    /// Kind of the peer.
    pub kind: PeerKind,

    /// Group chat title; `None` for direct conversations.
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_item_minimal() {
        let json = r#"{"id": 1, "date": 1700000000, "from_id": 42}"#;
        let item: HistoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 1);
        assert_eq!(item.date, 1700000000);
        assert_eq!(item.from_id, 42);
        assert!(item.text.is_empty());
        assert!(item.attachments.is_empty());
    }

    #[test]
    fn test_attachment_photo() {
        let json = r#"{
            "type": "photo",
            "photo": {
                "id": 7,
                "owner_id": 42,
                "sizes": [{"type": "m", "width": 130, "url": "https://example.com/m.jpg"}]
            }
        }"#;
        let attachment: Attachment = serde_json::from_str(json).unwrap();
        match attachment {
            Attachment::Photo(photo) => {
                assert_eq!(photo.id, 7);
                assert_eq!(photo.sizes.len(), 1);
                assert_eq!(photo.sizes[0].label, "m");
            }
            other => panic!("expected photo, got {other:?}"),
        }
    }

    #[test]
    fn test_attachment_document() {
        let json = r#"{
            "type": "doc",
            "doc": {"id": 9, "owner_id": -5, "url": "https://example.com/d.gif", "type": 3}
        }"#;
        let attachment: Attachment = serde_json::from_str(json).unwrap();
        match attachment {
            Attachment::Document(doc) => {
                assert_eq!(doc.owner_id, -5);
                assert_eq!(doc.doc_type, 3);
            }
            other => panic!("expected document, got {other:?}"),
        }
    }

    #[test]
    fn test_attachment_other() {
        let json = r#"{"type": "sticker", "sticker": {"sticker_id": 1}}"#;
        let attachment: Attachment = serde_json::from_str(json).unwrap();
        assert!(matches!(attachment, Attachment::Other));
    }

    #[test]
    fn test_profile_full_name() {
        let profile = Profile {
            id: 42,
            first_name: "Alice".into(),
            last_name: "Liddell".into(),
        };
        assert_eq!(profile.full_name(), "Alice Liddell");
    }

    #[test]
    fn test_peer_kind_deserialization() {
        assert_eq!(
            serde_json::from_str::<PeerKind>("\"chat\"").unwrap(),
            PeerKind::Chat
        );
        assert_eq!(
            serde_json::from_str::<PeerKind>("\"user\"").unwrap(),
            PeerKind::User
        );
        assert_eq!(
            serde_json::from_str::<PeerKind>("\"email\"").unwrap(),
            PeerKind::Other
        );
    }
}
