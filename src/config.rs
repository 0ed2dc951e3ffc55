//! Runtime settings for an export run.
//!
//! [`Settings`] is constructed once — either from environment variables via
//! [`Settings::from_env`] or programmatically with the builder methods — and
//! passed by reference into every component. There is no global configuration
//! state.
//!
//! # Environment variables
//!
//! | Variable          | Required | Meaning                                          |
//! |-------------------|----------|--------------------------------------------------|
//! | `VK_TOKEN`        | yes      | VK API access token                              |
//! | `VK_PEER_ID`      | yes      | Conversation peer id (group chats: id + 2000000000) |
//! | `VK_TIMEZONE`     | no       | Offset from UTC in whole hours, default `3`      |
//! | `VK_MEMBER_NAMES` | no       | JSON object mapping member id to contact name    |
//!
//! # Example
//!
//! ```rust
//! use vkpack::config::Settings;
//!
//! let settings = Settings::new("token", 2000000001)
//!     .with_timezone_hours(5)?
//!     .with_backup_root("exports");
//!
//! assert!(settings.backup_dir().ends_with("2000000001"));
//! # Ok::<(), vkpack::ExportError>(())
//! ```

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use chrono::FixedOffset;

use crate::error::{ExportError, Result};

/// Environment variable holding the VK access token.
pub const ENV_TOKEN: &str = "VK_TOKEN";
/// Environment variable holding the conversation peer id.
pub const ENV_PEER_ID: &str = "VK_PEER_ID";
/// Environment variable holding the UTC offset in whole hours.
pub const ENV_TIMEZONE: &str = "VK_TIMEZONE";
/// Environment variable holding the member-name override map as JSON.
pub const ENV_MEMBER_NAMES: &str = "VK_MEMBER_NAMES";

/// Default UTC offset in hours (Moscow time).
pub const DEFAULT_TIMEZONE_HOURS: i32 = 3;

const SECONDS_PER_HOUR: i32 = 3600;

/// All settings an export run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct Settings {
    /// VK API access token.
    pub token: String,

    /// Identifier of the conversation to export.
    pub peer_id: i64,

    /// Timezone used when rendering message timestamps.
    pub timezone: FixedOffset,

    /// User-supplied member-name overrides; these always take precedence
    /// over names fetched from the API.
    pub member_names: HashMap<i64, String>,

    /// Root directory backups are placed under.
    pub backup_root: PathBuf,
}

impl Settings {
    /// Creates settings with the given token and peer id and defaults for
    /// everything else (UTC+3, no overrides, `backup/` root).
    pub fn new(token: impl Into<String>, peer_id: i64) -> Self {
        Self {
            token: token.into(),
            peer_id,
            timezone: default_timezone(),
            member_names: HashMap::new(),
            backup_root: PathBuf::from("backup"),
        }
    }

    /// Builds settings from environment variables.
    ///
    /// Fails with a [`Config`](ExportError::Config) error when a required
    /// variable is missing or any variable is malformed, before any network
    /// call is made.
    pub fn from_env() -> Result<Self> {
        let token = env::var(ENV_TOKEN)
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ExportError::config(format!("{ENV_TOKEN} is not set")))?;

        let peer_id = env::var(ENV_PEER_ID)
            .map_err(|_| ExportError::config(format!("{ENV_PEER_ID} is not set")))?
            .parse::<i64>()
            .map_err(|_| ExportError::config(format!("{ENV_PEER_ID} is not a valid integer")))?;

        let timezone = match env::var(ENV_TIMEZONE) {
            Ok(raw) => {
                let hours = raw.parse::<i32>().map_err(|_| {
                    ExportError::config(format!("{ENV_TIMEZONE} is not a valid integer"))
                })?;
                timezone_from_hours(hours)?
            }
            Err(_) => default_timezone(),
        };

        let member_names = match env::var(ENV_MEMBER_NAMES) {
            Ok(raw) => parse_member_names(&raw)?,
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            token,
            peer_id,
            timezone,
            member_names,
            backup_root: PathBuf::from("backup"),
        })
    }

    /// Sets the timestamp rendering timezone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: FixedOffset) -> Self {
        self.timezone = timezone;
        self
    }

    /// Sets the timestamp rendering timezone from a whole-hour UTC offset.
    pub fn with_timezone_hours(mut self, hours: i32) -> Result<Self> {
        self.timezone = timezone_from_hours(hours)?;
        Ok(self)
    }

    /// Sets the member-name override map.
    #[must_use]
    pub fn with_member_names(mut self, member_names: HashMap<i64, String>) -> Self {
        self.member_names = member_names;
        self
    }

    /// Sets the backup root directory.
    #[must_use]
    pub fn with_backup_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.backup_root = root.into();
        self
    }

    /// Returns the backup directory for this conversation:
    /// `<backup_root>/<peer_id>/`.
    pub fn backup_dir(&self) -> PathBuf {
        self.backup_root.join(self.peer_id.to_string())
    }
}

/// Converts a whole-hour UTC offset into a [`FixedOffset`].
pub fn timezone_from_hours(hours: i32) -> Result<FixedOffset> {
    FixedOffset::east_opt(hours.saturating_mul(SECONDS_PER_HOUR)).ok_or_else(|| {
        ExportError::config(format!("timezone offset {hours} is out of range (-23..=23)"))
    })
}

/// Parses the member-name override map from its JSON representation,
/// e.g. `{"42": "Alice", "198": "Bob"}`.
pub fn parse_member_names(raw: &str) -> Result<HashMap<i64, String>> {
    let parsed: HashMap<String, String> = serde_json::from_str(raw).map_err(|error| {
        ExportError::config(format!("{ENV_MEMBER_NAMES} is not a valid JSON object: {error}"))
    })?;

    parsed
        .into_iter()
        .map(|(id, name)| {
            let id = id.parse::<i64>().map_err(|_| {
                ExportError::config(format!("{ENV_MEMBER_NAMES} key \"{id}\" is not a member id"))
            })?;
            Ok((id, name))
        })
        .collect()
}

fn default_timezone() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_TIMEZONE_HOURS * SECONDS_PER_HOUR)
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is always valid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::new("token", 42);
        assert_eq!(settings.peer_id, 42);
        assert_eq!(settings.timezone.local_minus_utc(), 3 * 3600);
        assert!(settings.member_names.is_empty());
        assert_eq!(settings.backup_dir(), PathBuf::from("backup/42"));
    }

    #[test]
    fn test_settings_builder() {
        let mut names = HashMap::new();
        names.insert(42, "Alice".to_string());

        let settings = Settings::new("token", 7)
            .with_timezone_hours(-5)
            .unwrap()
            .with_member_names(names)
            .with_backup_root("exports");

        assert_eq!(settings.timezone.local_minus_utc(), -5 * 3600);
        assert_eq!(settings.member_names.get(&42).unwrap(), "Alice");
        assert_eq!(settings.backup_dir(), PathBuf::from("exports/7"));
    }

    #[test]
    fn test_timezone_from_hours_bounds() {
        assert!(timezone_from_hours(0).is_ok());
        assert!(timezone_from_hours(23).is_ok());
        assert!(timezone_from_hours(-23).is_ok());
        assert!(timezone_from_hours(24).is_err());
        assert!(timezone_from_hours(-24).is_err());
    }

    #[test]
    fn test_parse_member_names() {
        let names = parse_member_names(r#"{"42": "Alice", "198": "Bob"}"#).unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names.get(&42).unwrap(), "Alice");
        assert_eq!(names.get(&198).unwrap(), "Bob");
    }

    #[test]
    fn test_parse_member_names_empty_object() {
        assert!(parse_member_names("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_member_names_invalid_json() {
        let err = parse_member_names("{42: Alice}").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_parse_member_names_non_numeric_key() {
        let err = parse_member_names(r#"{"alice": "Alice"}"#).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("alice"));
    }
}
