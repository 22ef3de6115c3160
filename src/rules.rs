//! Placement rules for the tableau and the foundations.
//!
//! Each rule comes as a predicate and as a checker that says which rule was
//! broken. Both take the destination's current top card, if any, and the
//! contact card being placed on it.

use crate::card::{Card, Rank, Suit};
use crate::error::GameError;

pub fn suits_can_alternate(first: Suit, second: Suit) -> bool {
    first.color() != second.color()
}

/// Tableau columns build down in alternating colors, and only a King may
/// start an empty column.
pub fn check_tableau_stack(top: Option<&Card>, card: &Card) -> Result<(), GameError> {
    match top {
        None => {
            if card.rank == Rank::King {
                Ok(())
            } else {
                Err(GameError::InvalidCardPlacement)
            }
        }
        Some(top_card) => {
            if !suits_can_alternate(top_card.suit, card.suit) {
                Err(GameError::MismatchedSuits)
            } else if !card.is_one_below(top_card) {
                Err(GameError::NonSequentialFaces)
            } else {
                Ok(())
            }
        }
    }
}

pub fn can_stack_in_tableau(top: Option<&Card>, card: &Card) -> bool {
    check_tableau_stack(top, card).is_ok()
}

/// Foundations build up in a single suit starting from the Ace.
pub fn check_foundation_stack(
    suit: Suit,
    top: Option<&Card>,
    card: &Card,
) -> Result<(), GameError> {
    if card.suit != suit {
        return Err(GameError::MismatchedSuits);
    }
    match top {
        None => {
            if card.rank == Rank::Ace {
                Ok(())
            } else {
                Err(GameError::InvalidCardPlacement)
            }
        }
        Some(top_card) => {
            if top_card.is_one_below(card) {
                Ok(())
            } else {
                Err(GameError::NonSequentialFaces)
            }
        }
    }
}

pub fn can_stack_in_foundation(suit: Suit, top: Option<&Card>, card: &Card) -> bool {
    check_foundation_stack(suit, top, card).is_ok()
}
