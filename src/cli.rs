//! Command-line interface definition using clap.
//!
//! The three flags select which content classes of a message make it into
//! the transcript. At least one must be given; the combination is validated
//! before any network or file-system access.

use clap::Parser;

use crate::error::{ExportError, Result};
use crate::export::ContentSelection;

/// Export VK chat history into a WhatsApp-style transcript for Telegram
/// import. Credentials and the peer id are read from the environment; the
/// backup lands in `backup/<peer id>/`.
#[derive(Parser, Debug, Clone)]
#[command(name = "vkpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    vkpack --text
    vkpack --text --photo
    vkpack --text --photo --doc

ENVIRONMENT:
    VK_TOKEN           VK API access token (required)
    VK_PEER_ID         conversation peer id (required)
    VK_TIMEZONE        UTC offset in hours, default 3
    VK_MEMBER_NAMES    JSON object mapping member id to contact name")]
pub struct Args {
    /// Include message text in the transcript
    #[arg(long)]
    pub text: bool,

    /// Download photos and reference them in the transcript
    #[arg(long)]
    pub photo: bool,

    /// Download documents (.jpg, .gif) and reference them in the transcript
    #[arg(long)]
    pub doc: bool,
}

impl Args {
    /// Converts the flags into a validated [`ContentSelection`].
    ///
    /// Rejects the run when no content class was selected.
    pub fn selection(&self) -> Result<ContentSelection> {
        let selection = ContentSelection {
            text: self.text,
            photos: self.photo,
            documents: self.doc,
        };
        if selection.is_empty() {
            return Err(ExportError::config(
                "no content class selected; pass at least one of --text, --photo, --doc",
            ));
        }
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(text: bool, photo: bool, doc: bool) -> Args {
        Args { text, photo, doc }
    }

    #[test]
    fn test_selection_requires_at_least_one_flag() {
        let err = args(false, false, false).selection().unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("--text"));
    }

    #[test]
    fn test_selection_maps_flags() {
        let selection = args(true, false, true).selection().unwrap();
        assert!(selection.text);
        assert!(!selection.photos);
        assert!(selection.documents);
    }

    #[test]
    fn test_all_flags() {
        let selection = args(true, true, true).selection().unwrap();
        assert_eq!(selection, ContentSelection::all());
    }
}
