mod share;
mod streak;

pub use share::{parse_share, Attempts, CellMark, GuessGrid, ParsedShare};
pub use streak::{parse_streak, Mention, StreakEntry, StreakReport};

/// Classification of an inbound chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    /// A single player's share of one puzzle.
    Share(ParsedShare),
    /// The relay bot's daily group summary; entries need identity
    /// resolution before they can be recorded.
    Streak(StreakReport),
    /// Anything else. Frequent and entirely normal.
    NotAResult,
}

/// Classifies raw message text. Streak summaries are checked before shares;
/// the summary is the more specific format.
pub fn classify(text: &str) -> MessageKind {
    if let Some(report) = parse_streak(text) {
        return MessageKind::Streak(report);
    }

    if let Some(share) = parse_share(text) {
        return MessageKind::Share(share);
    }

    MessageKind::NotAResult
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_share() {
        let kind = classify("Wordle 1,234 3/6\n🟩🟨⬜⬜⬜\n⬜🟩🟩⬜⬜\n🟩🟩🟩🟩🟩");
        assert!(matches!(kind, MessageKind::Share(_)));
    }

    #[test]
    fn classifies_streak_summary() {
        let kind = classify("Your group is on a 3 day streak!\n4/6: @alice");
        assert!(matches!(kind, MessageKind::Streak(_)));
    }

    #[test]
    fn everything_else_is_not_a_result() {
        assert_eq!(classify("gg everyone"), MessageKind::NotAResult);
        assert_eq!(classify(""), MessageKind::NotAResult);
    }
}
