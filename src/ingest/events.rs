use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::parser::Attempts;

/// An inbound chat-message event as delivered by the chat-platform
/// collaborator. The text is untrusted input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEvent {
    pub author_id: String,
    /// Display name as last seen by the platform; falls back to the id
    /// when the collaborator does not supply one.
    #[serde(default)]
    pub author_name: String,
    pub guild_id: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl MessageEvent {
    pub fn display_name(&self) -> &str {
        if self.author_name.is_empty() {
            &self.author_id
        } else {
            &self.author_name
        }
    }
}

/// A streak-summary line after the collaborator has resolved the mention
/// into a platform user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedStreakEntry {
    pub player_id: String,
    #[serde(default)]
    pub display_name: String,
    pub attempts: Attempts,
}

impl ResolvedStreakEntry {
    pub fn display_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.player_id
        } else {
            &self.display_name
        }
    }
}

/// Tally of a bulk import over a fetched message history.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Events inspected.
    pub scanned: usize,
    /// New results recorded; everything else was ignored.
    pub recorded: usize,
}
