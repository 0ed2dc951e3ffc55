//! Member directory: mapping from member ids to display names.
//!
//! The directory is seeded from user-supplied overrides and enriched once
//! with names fetched from the API. Overrides always win; ids never observed
//! anywhere resolve to a deterministic `id<member_id>` fallback.

use std::collections::HashMap;

use crate::api::VkApi;
use crate::error::Result;

/// Display names of conversation members, keyed by member id.
///
/// Mutated only during [`enrich`](MemberDirectory::enrich); read-only
/// thereafter.
///
/// # Example
///
/// ```rust
/// use vkpack::export::MemberDirectory;
///
/// let mut directory = MemberDirectory::new();
/// directory.insert(42, "Alice");
///
/// assert_eq!(directory.resolve(42), "Alice");
/// assert_eq!(directory.resolve(7), "id7");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemberDirectory {
    names: HashMap<i64, String>,
}

impl MemberDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory seeded with user-supplied overrides.
    pub fn from_overrides(overrides: HashMap<i64, String>) -> Self {
        Self { names: overrides }
    }

    /// Inserts a display name for a member id, replacing any existing entry.
    pub fn insert(&mut self, id: i64, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    /// Returns `true` if the directory has a name for this id.
    pub fn contains(&self, id: i64) -> bool {
        self.names.contains_key(&id)
    }

    /// Resolves a member id to a display name.
    ///
    /// Unknown ids yield the deterministic fallback `id<member_id>`.
    pub fn resolve(&self, id: i64) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("id{id}"))
    }

    /// Returns the number of known members.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no names are known.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Fills in names for every conversation member not already present.
    ///
    /// Fetches the member-profile list once and inserts
    /// `"<first_name> <last_name>"` for each profile whose id is absent.
    /// Existing entries are never overwritten. A failed fetch is fatal,
    /// since display names are required downstream.
    pub fn enrich(&mut self, api: &dyn VkApi, peer_id: i64) -> Result<()> {
        tracing::info!(peer_id, "fetching missing member profiles");
        for profile in api.conversation_members(peer_id)? {
            if !self.contains(profile.id) {
                let name = profile.full_name();
                self.names.insert(profile.id, name);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{ConversationInfo, HistoryItem, Profile};
    use crate::error::{ApiFailure, ExportError};

    struct FakeMembersApi {
        profiles: Vec<Profile>,
        fail: bool,
    }

    impl VkApi for FakeMembersApi {
        fn conversation_info(&self, _peer_id: i64) -> crate::Result<ConversationInfo> {
            unreachable!("not used by enrichment")
        }

        fn conversation_members(&self, _peer_id: i64) -> crate::Result<Vec<Profile>> {
            if self.fail {
                return Err(ExportError::remote_fetch(
                    "member profiles fetch",
                    ApiFailure::Api {
                        code: 5,
                        message: "User authorization failed".into(),
                    },
                ));
            }
            Ok(self.profiles.clone())
        }

        fn history_page(
            &self,
            _peer_id: i64,
            _offset: u32,
            _count: u32,
        ) -> crate::Result<Vec<HistoryItem>> {
            unreachable!("not used by enrichment")
        }

        fn fetch_bytes(&self, _url: &str) -> crate::Result<Vec<u8>> {
            unreachable!("not used by enrichment")
        }
    }

    fn profile(id: i64, first: &str, last: &str) -> Profile {
        Profile {
            id,
            first_name: first.into(),
            last_name: last.into(),
        }
    }

    #[test]
    fn test_resolve_fallback() {
        let directory = MemberDirectory::new();
        assert_eq!(directory.resolve(123), "id123");
        assert_eq!(directory.resolve(-77), "id-77");
    }

    #[test]
    fn test_enrich_adds_missing_members() {
        let api = FakeMembersApi {
            profiles: vec![profile(1, "Alice", "Liddell"), profile(2, "Bob", "Stone")],
            fail: false,
        };
        let mut directory = MemberDirectory::new();
        directory.enrich(&api, 100).unwrap();

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.resolve(1), "Alice Liddell");
        assert_eq!(directory.resolve(2), "Bob Stone");
    }

    #[test]
    fn test_enrich_never_overwrites_overrides() {
        let api = FakeMembersApi {
            profiles: vec![profile(1, "Alice", "Liddell")],
            fail: false,
        };
        let mut overrides = HashMap::new();
        overrides.insert(1, "Алиса".to_string());

        let mut directory = MemberDirectory::from_overrides(overrides);
        directory.enrich(&api, 100).unwrap();

        assert_eq!(directory.resolve(1), "Алиса");
    }

    #[test]
    fn test_enrich_propagates_fetch_failure() {
        let api = FakeMembersApi {
            profiles: vec![],
            fail: true,
        };
        let mut directory = MemberDirectory::new();
        let err = directory.enrich(&api, 100).unwrap_err();
        assert!(err.is_remote_fetch());
    }
}
