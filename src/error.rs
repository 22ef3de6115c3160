use core::fmt;

/// Why a command on the table was rejected. A rejected command leaves every
/// pile exactly as it was.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GameError {
    /// The source pile holds fewer cards than the operation needs.
    NotEnoughCards,
    /// A single-card placement was attempted with more than one card held.
    TooManyCards,
    /// Non-King onto an empty column, or non-Ace onto an empty foundation.
    InvalidCardPlacement,
    /// Contact cards share a color on the tableau, or differ in suit on a
    /// foundation.
    MismatchedSuits,
    /// Contact cards are not adjacent in rank in the required direction.
    NonSequentialFaces,
    /// The command is not allowed in the current state of the game.
    InvalidState(&'static str),
    TableauOutOfRange(usize),
}

impl GameError {
    /// True for the kinds produced by the placement rules.
    pub fn is_placement(&self) -> bool {
        matches!(
            self,
            GameError::InvalidCardPlacement
                | GameError::MismatchedSuits
                | GameError::NonSequentialFaces
        )
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotEnoughCards => f.write_str("not enough cards"),
            GameError::TooManyCards => f.write_str("too many cards"),
            GameError::InvalidCardPlacement => f.write_str("invalid card placement"),
            GameError::MismatchedSuits => f.write_str("mismatched suits"),
            GameError::NonSequentialFaces => f.write_str("non-sequential faces"),
            GameError::InvalidState(reason) => write!(f, "invalid state: {}", reason),
            GameError::TableauOutOfRange(index) => {
                write!(f, "tableau at index {} does not exist", index)
            }
        }
    }
}

impl core::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_kinds_are_grouped() {
        assert!(GameError::MismatchedSuits.is_placement());
        assert!(GameError::NonSequentialFaces.is_placement());
        assert!(GameError::InvalidCardPlacement.is_placement());
        assert!(!GameError::NotEnoughCards.is_placement());
        assert!(!GameError::InvalidState("held").is_placement());
    }

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            GameError::TableauOutOfRange(9).to_string(),
            "tableau at index 9 does not exist"
        );
        assert_eq!(
            GameError::InvalidState("game already dealt").to_string(),
            "invalid state: game already dealt"
        );
    }
}
