use chrono::{DateTime, TimeZone, Utc};

use wordcade::MessageEvent;

// ============================================================================
// Share-text builders
// ============================================================================

const WIN_ROW: &str = "🟩🟩🟩🟩🟩";
const MISS_ROW: &str = "⬜⬜⬜⬜⬜";
const PARTIAL_ROW: &str = "🟨🟩⬜⬜🟨";

/// Builds a winning share with the given attempt count: partial rows
/// followed by a solved row.
pub fn share_text(puzzle_number: u32, attempts: u8) -> String {
    let mut rows = vec![PARTIAL_ROW; (attempts as usize).saturating_sub(1)];
    rows.push(WIN_ROW);

    format!("Wordle {} {}/6\n\n{}", puzzle_number, attempts, rows.join("\n"))
}

/// Builds a failed share: six rows, none solved.
pub fn failed_share_text(puzzle_number: u32) -> String {
    format!("Wordle {} X/6\n\n{}", puzzle_number, [MISS_ROW; 6].join("\n"))
}

// ============================================================================
// Event builder
// ============================================================================

pub struct EventBuilder {
    author_id: String,
    author_name: String,
    guild_id: String,
    sent_at: DateTime<Utc>,
}

impl EventBuilder {
    pub fn player(author_id: &str) -> Self {
        Self {
            author_id: author_id.to_string(),
            author_name: author_id.to_string(),
            guild_id: "guild-1".to_string(),
            sent_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
        }
    }

    pub fn named(mut self, author_name: &str) -> Self {
        self.author_name = author_name.to_string();
        self
    }

    pub fn in_guild(mut self, guild_id: &str) -> Self {
        self.guild_id = guild_id.to_string();
        self
    }

    pub fn says(&self, text: &str) -> MessageEvent {
        MessageEvent {
            author_id: self.author_id.clone(),
            author_name: self.author_name.clone(),
            guild_id: self.guild_id.clone(),
            text: text.to_string(),
            sent_at: self.sent_at,
        }
    }

    pub fn shares_win(&self, puzzle_number: u32, attempts: u8) -> MessageEvent {
        self.says(&share_text(puzzle_number, attempts))
    }

    pub fn shares_fail(&self, puzzle_number: u32) -> MessageEvent {
        self.says(&failed_share_text(puzzle_number))
    }
}
