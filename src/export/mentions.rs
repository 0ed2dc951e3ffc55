//! Inline mention rewriting.
//!
//! VK embeds user references in message text as bracketed tokens of the form
//! `[id12345|@handle]`. For a readable transcript each token is replaced with
//! the member's display name.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::export::members::MemberDirectory;

/// `[id<digits>|@<handle>]`
static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[id(\d+)\|@\w*\]").unwrap());

/// Replaces every inline mention token with the member's display name.
///
/// Unknown ids resolve to the directory's `id<member_id>` fallback;
/// non-matching text is returned unchanged. Pure function: no side effects,
/// no network access.
///
/// # Example
///
/// ```rust
/// use vkpack::export::{MemberDirectory, rewrite_mentions};
///
/// let mut directory = MemberDirectory::new();
/// directory.insert(42, "Alice");
///
/// assert_eq!(
///     rewrite_mentions("привет, [id42|@alice]!", &directory),
///     "привет, Alice!"
/// );
/// ```
pub fn rewrite_mentions(text: &str, directory: &MemberDirectory) -> String {
    MENTION
        .replace_all(text, |caps: &Captures<'_>| {
            caps[1]
                .parse::<i64>()
                .map_or_else(|_| caps[0].to_string(), |id| directory.resolve(id))
        })
        .into_owned()
}
