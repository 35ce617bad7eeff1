//! Construction-time errors.
//!
//! The rule loop itself never fails; these only come out of configuring an
//! engine or handing it a deck.

/// Error type for building configurations and starting games from a deck.
#[derive(Debug, PartialEq, Eq)]
pub enum FishError {
    /// Hand size is zero or does not leave room for two hands in one deck.
    InvalidHandSize { hand_size: usize },
    /// A caller-provided deck is not exactly the 52 distinct cards.
    InvalidDeck { reason: String },
}

impl std::error::Error for FishError {}

impl std::fmt::Display for FishError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FishError::InvalidHandSize { hand_size } => write!(
                f,
                "Hand size must be between 1 and 26 cards per player, got {}",
                hand_size
            ),
            FishError::InvalidDeck { reason } => write!(f, "Invalid deck: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = FishError::InvalidHandSize { hand_size: 0 };
        assert_eq!(
            err.to_string(),
            "Hand size must be between 1 and 26 cards per player, got 0"
        );

        let err = FishError::InvalidDeck {
            reason: "expected 52 cards, got 51".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid deck: expected 52 cards, got 51");
    }
}
