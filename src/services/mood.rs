use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Mood labels a user can pick when journaling, ordered by valence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Great,
    Good,
    Okay,
    Low,
    Stressed,
    Anxious,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Great,
        Mood::Good,
        Mood::Okay,
        Mood::Low,
        Mood::Stressed,
        Mood::Anxious,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Great => "Great",
            Mood::Good => "Good",
            Mood::Okay => "Okay",
            Mood::Low => "Low",
            Mood::Stressed => "Stressed",
            Mood::Anxious => "Anxious",
        }
    }

    /// Valence score in 1..=5. Stressed and Anxious share the bottom score.
    pub fn score(&self) -> u8 {
        match self {
            Mood::Great => 5,
            Mood::Good => 4,
            Mood::Okay => 3,
            Mood::Low => 2,
            Mood::Stressed | Mood::Anxious => 1,
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Self::Okay
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized mood label: {0:?}")]
pub struct UnknownMood(pub String);

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

/// Score a stored mood label. Anything outside the known set scores 0.
pub fn score(label: &str) -> u8 {
    label.parse::<Mood>().map(|m| m.score()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_score() {
        assert_eq!(score("Great"), 5);
        assert_eq!(score("Good"), 4);
        assert_eq!(score("Okay"), 3);
        assert_eq!(score("Low"), 2);
        assert_eq!(score("Stressed"), 1);
        assert_eq!(score("Anxious"), 1);
    }

    #[test]
    fn test_unknown_labels_score_zero() {
        assert_eq!(score(""), 0);
        assert_eq!(score("great"), 0);
        assert_eq!(score("Ecstatic"), 0);
        assert_eq!(score(" Good"), 0);
    }

    #[test]
    fn test_parse_round_trips_display() {
        for mood in Mood::ALL {
            assert_eq!(mood.to_string().parse::<Mood>(), Ok(mood));
        }
        assert!("Meh".parse::<Mood>().is_err());
    }
}
