use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Header line of a Wordle share, e.g. `Wordle 1,234 3/6` or `Wordle 950 X/6`.
/// The puzzle number may contain thousands separators.
static SHARE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)wordle\s+([\d,]+)\s+([1-6Xx])/6").expect("share header pattern")
});

/// Outcome of a single puzzle: solved in 1-6 attempts, or failed with all
/// six attempts exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attempts {
    Solved(u8),
    Failed,
}

impl Attempts {
    /// Parses the attempts token from a share header or streak line
    /// (`3` or `X`).
    pub fn from_share_token(token: &str) -> Option<Self> {
        match token {
            "X" | "x" => Some(Attempts::Failed),
            _ => match token.parse::<u8>() {
                Ok(count) if (1..=6).contains(&count) => Some(Attempts::Solved(count)),
                _ => None,
            },
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Attempts::Solved(_))
    }

    /// Number of guess rows a share with this outcome must carry: one per
    /// attempt, or all six when the puzzle was failed.
    pub fn expected_rows(&self) -> usize {
        match self {
            Attempts::Solved(count) => *count as usize,
            Attempts::Failed => 6,
        }
    }

    /// Storage encoding: 1-6 for solved, -1 for failed.
    pub fn db_code(&self) -> i16 {
        match self {
            Attempts::Solved(count) => *count as i16,
            Attempts::Failed => -1,
        }
    }

    pub fn from_db_code(code: i16) -> Option<Self> {
        match code {
            -1 => Some(Attempts::Failed),
            1..=6 => Some(Attempts::Solved(code as u8)),
            _ => None,
        }
    }

    /// Rank used for history filtering; failed puzzles sort above six
    /// attempts.
    pub fn filter_rank(&self) -> u8 {
        match self {
            Attempts::Solved(count) => *count,
            Attempts::Failed => 7,
        }
    }
}

impl fmt::Display for Attempts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attempts::Solved(count) => write!(f, "{}/6", count),
            Attempts::Failed => write!(f, "X/6"),
        }
    }
}

/// Per-cell outcome in a guess row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellMark {
    Hit,
    Present,
    Miss,
}

impl CellMark {
    /// Maps a share glyph to its cell outcome. Covers both the standard and
    /// the high-contrast color schemes.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '🟩' | '🟧' => Some(CellMark::Hit),
            '🟨' | '🟦' => Some(CellMark::Present),
            '⬜' | '⬛' => Some(CellMark::Miss),
            _ => None,
        }
    }

    /// Single-letter code used for the compact storage encoding.
    pub fn code(&self) -> char {
        match self {
            CellMark::Hit => 'G',
            CellMark::Present => 'Y',
            CellMark::Miss => 'M',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'G' => Some(CellMark::Hit),
            'Y' => Some(CellMark::Present),
            'M' => Some(CellMark::Miss),
            _ => None,
        }
    }
}

/// The ordered guess rows of a share, one row per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessGrid {
    pub rows: Vec<Vec<CellMark>>,
}

impl GuessGrid {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row; the puzzle's word length.
    pub fn width(&self) -> Option<usize> {
        self.rows.first().map(|row| row.len())
    }

    /// True when every row has the same non-zero width.
    pub fn is_uniform(&self) -> bool {
        match self.width() {
            Some(width) if width > 0 => self.rows.iter().all(|row| row.len() == width),
            _ => false,
        }
    }

    /// Compact text encoding for storage: one letter per cell, rows joined
    /// with `/` (e.g. `GYMMM/MGGMM/GGGGG`).
    pub fn to_compact(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.iter().map(CellMark::code).collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn from_compact(encoded: &str) -> Option<Self> {
        let rows = encoded
            .split('/')
            .map(|row| row.chars().map(CellMark::from_code).collect())
            .collect::<Option<Vec<Vec<CellMark>>>>()?;

        let grid = GuessGrid { rows };
        if grid.is_uniform() {
            Some(grid)
        } else {
            None
        }
    }
}

/// A successfully parsed share message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedShare {
    pub puzzle_number: u32,
    pub attempts: Attempts,
    pub grid: GuessGrid,
}

/// Parses a Wordle share message into its structured form.
///
/// Returns `None` for anything that is not a well-formed share: missing or
/// malformed header, non-positive puzzle number, unrecognized glyphs, ragged
/// row widths, row count outside 1-6, or a row count that does not match the
/// claimed attempts. Absence of a result is a normal outcome, never an error.
pub fn parse_share(text: &str) -> Option<ParsedShare> {
    let mut lines = text.lines();

    let (puzzle_number, attempts) = loop {
        let line = lines.next()?;
        if let Some(caps) = SHARE_HEADER.captures(line) {
            let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
            let puzzle_number: u32 = digits.parse().ok()?;
            if puzzle_number == 0 {
                return None;
            }
            break (puzzle_number, Attempts::from_share_token(&caps[2])?);
        }
    };

    let mut rows: Vec<Vec<CellMark>> = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            if rows.is_empty() {
                continue;
            }
            break;
        }

        match parse_row(line) {
            Some(row) => {
                if rows.len() == 6 {
                    // Seventh grid row: too many attempts for one puzzle.
                    return None;
                }
                rows.push(row);
            }
            // Text between the header and the grid means this is not a
            // share; trailing commentary after the grid is tolerated.
            None if rows.is_empty() => return None,
            None => break,
        }
    }

    let grid = GuessGrid { rows };
    if grid.row_count() != attempts.expected_rows() || !grid.is_uniform() {
        return None;
    }

    Some(ParsedShare {
        puzzle_number,
        attempts,
        grid,
    })
}

fn parse_row(line: &str) -> Option<Vec<CellMark>> {
    let row = line
        .chars()
        .map(CellMark::from_glyph)
        .collect::<Option<Vec<CellMark>>>()?;

    if row.is_empty() {
        None
    } else {
        Some(row)
    }
}
