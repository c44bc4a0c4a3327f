use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::share::Attempts;

/// Header of the relay bot's daily group summary, e.g.
/// `Your group is on a 12 day streak!`.
static STREAK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)your\s+group\s+is\s+on\s+an?\s+(\d+)\s+day\s+streak")
        .expect("streak header pattern")
});

/// Per-player line in the summary, e.g. `3/6: @alice @bob` or `X/6: <@123>`.
static STREAK_ATTEMPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z0-9]+)/\d+:").expect("streak attempt pattern"));

static STREAK_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<@(\w+)>|@(\w+)").expect("streak mention pattern"));

/// A player reference found in a streak line. Platform mentions carry the
/// user id directly; bare `@name` mentions must be resolved to an id by the
/// chat-platform collaborator before the entry can be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mention {
    Id(String),
    Name(String),
}

/// One attempts bucket from the group summary and the players credited
/// with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakEntry {
    pub attempts: Attempts,
    pub mentions: Vec<Mention>,
}

/// A parsed group-streak summary message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakReport {
    pub day_streak: u32,
    pub entries: Vec<StreakEntry>,
}

/// Parses the relay bot's group-streak summary message.
///
/// Returns `None` when the streak header is absent. Lines that do not carry
/// a recognizable attempts bucket or any mention are skipped, matching how
/// the summary interleaves attempt lines with decoration.
pub fn parse_streak(text: &str) -> Option<StreakReport> {
    let header = STREAK_HEADER.captures(text)?;
    let day_streak: u32 = header[1].parse().ok()?;

    let mut entries = Vec::new();
    for line in text.lines() {
        let Some(attempt) = STREAK_ATTEMPT.captures(line) else {
            continue;
        };
        let Some(attempts) = Attempts::from_share_token(&attempt[1]) else {
            continue;
        };

        let mut mentions = Vec::new();
        for caps in STREAK_MENTION.captures_iter(line) {
            if let Some(id) = caps.get(1) {
                mentions.push(Mention::Id(id.as_str().to_string()));
            } else if let Some(name) = caps.get(2) {
                mentions.push(Mention::Name(name.as_str().to_string()));
            }
        }

        if mentions.is_empty() {
            continue;
        }

        entries.push(StreakEntry { attempts, mentions });
    }

    Some(StreakReport {
        day_streak,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = "Your group is on a 12 day streak! 🔥\n\
                           3/6: <@111222333> @alice\n\
                           5/6: @bob\n\
                           X/6: @carol\n\
                           Play today's Wordle!";

    #[test]
    fn parses_group_summary() {
        let report = parse_streak(SUMMARY).unwrap();

        assert_eq!(report.day_streak, 12);
        assert_eq!(report.entries.len(), 3);

        assert_eq!(report.entries[0].attempts, Attempts::Solved(3));
        assert_eq!(
            report.entries[0].mentions,
            vec![
                Mention::Id("111222333".to_string()),
                Mention::Name("alice".to_string()),
            ]
        );

        assert_eq!(report.entries[2].attempts, Attempts::Failed);
        assert_eq!(
            report.entries[2].mentions,
            vec![Mention::Name("carol".to_string())]
        );
    }

    #[test]
    fn accepts_an_article_for_single_day() {
        let report = parse_streak("Your group is on an 1 day streak!\n2/6: @dave").unwrap();
        assert_eq!(report.day_streak, 1);
        assert_eq!(report.entries.len(), 1);
    }

    #[test]
    fn skips_lines_without_mentions() {
        let report = parse_streak("Your group is on a 4 day streak!\n3/6: nobody here").unwrap();
        assert!(report.entries.is_empty());
    }

    #[test]
    fn skips_unrecognized_attempt_buckets() {
        let report = parse_streak("Your group is on a 4 day streak!\n99/6: @alice").unwrap();
        assert!(report.entries.is_empty());
    }

    #[test]
    fn rejects_non_streak_messages() {
        assert!(parse_streak("Wordle 1,234 3/6\n🟩🟩🟩🟩🟩").is_none());
        assert!(parse_streak("we are on a streak of luck").is_none());
    }
}
