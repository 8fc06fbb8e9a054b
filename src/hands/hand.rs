use serde::Deserialize;
use serde::Serialize;

/// One poker hand as read from a history file. The raw text is immutable
/// once read; the header fields are best-effort conveniences parsed out
/// of the first line and fall back to "unknown" rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandRecord {
    pub hand_id: String,
    pub stakes: String,
    pub game_type: String,
    pub raw_history: String,
}

impl HandRecord {
    /// Parse a hand out of raw history text. The id prefers the one
    /// embedded in the header ("Hand #2517850956 - ..."); absent that,
    /// the source filename stem keeps the id stable across runs.
    pub fn parse(fallback_id: &str, text: &str) -> Self {
        let header = text.lines().next().unwrap_or_default();
        Self {
            hand_id: Self::embedded_id(header).unwrap_or_else(|| fallback_id.to_string()),
            stakes: Self::stakes(header).unwrap_or_else(|| "unknown".to_string()),
            game_type: Self::game_type(header).to_string(),
            raw_history: text.to_string(),
        }
    }

    fn embedded_id(header: &str) -> Option<String> {
        header
            .split_once('#')
            .map(|(_, rest)| rest)
            .and_then(|rest| rest.split_whitespace().next())
            .map(|id| id.trim_end_matches(|c: char| !c.is_alphanumeric()))
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string())
    }

    /// e.g. "$0.05/$0.10"
    fn stakes(header: &str) -> Option<String> {
        let mut parts = header.split('$').skip(1);
        let small = parts.next()?.trim_end_matches(['/', ' ']).trim();
        let big = parts.next()?.split_whitespace().next()?;
        Some(format!("${}/${}", small, big))
    }

    fn game_type(header: &str) -> &'static str {
        if header.contains("Holdem") || header.contains("Hold'em") {
            "Texas Hold'em"
        } else if header.contains("Omaha") {
            "Omaha"
        } else {
            "unknown"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_embedded_id() {
        let hand = HandRecord::parse("file-7", "Hand #2517850956 - $0.05/$0.10 Holdem\nfolds");
        assert_eq!(hand.hand_id, "2517850956");
        assert_eq!(hand.stakes, "$0.05/$0.10");
        assert_eq!(hand.game_type, "Texas Hold'em");
    }

    #[test]
    fn falls_back_to_filename_id() {
        let hand = HandRecord::parse("file-7", "some opaque header\nbody");
        assert_eq!(hand.hand_id, "file-7");
        assert_eq!(hand.stakes, "unknown");
        assert_eq!(hand.game_type, "unknown");
    }

    #[test]
    fn keeps_raw_history_verbatim() {
        let text = "Hand #1 - $1/$2 Omaha\nline two\nline three";
        let hand = HandRecord::parse("x", text);
        assert_eq!(hand.raw_history, text);
        assert_eq!(hand.game_type, "Omaha");
    }
}
