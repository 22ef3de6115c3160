use crate::card::CardId;
use crate::error::GameError;
use alloc::collections::VecDeque;
use rand::{seq::SliceRandom, Rng};

/// An ordered run of card handles. Index 0 is the top of the pile, the last
/// index is its base.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct CardPile {
    cards: VecDeque<CardId>,
}

impl CardPile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `card` on top.
    pub fn add(&mut self, card: CardId) {
        self.cards.push_front(card);
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn peek(&self) -> Option<CardId> {
        self.peek_at(0)
    }

    /// The card `index` positions below the top.
    pub fn peek_at(&self, index: usize) -> Option<CardId> {
        self.cards.get(index).copied()
    }

    pub fn peek_base(&self) -> Option<CardId> {
        self.cards.back().copied()
    }

    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }

    /// Top to base.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = CardId> + ExactSizeIterator + '_ {
        self.cards.iter().copied()
    }

    /// Removes the top `amount` cards and returns them as a new pile. The run
    /// keeps its order: the old top is the new pile's top, so stacking the
    /// result back restores this pile.
    pub fn split(&mut self, amount: usize) -> Result<CardPile, GameError> {
        if amount > self.cards.len() {
            return Err(GameError::NotEnoughCards);
        }
        let rest = self.cards.split_off(amount);
        let top = core::mem::replace(&mut self.cards, rest);
        Ok(CardPile { cards: top })
    }

    /// Moves every card of `other` onto this pile, base first, so `other`'s
    /// top ends up on top. `other` is left empty.
    pub fn stack(&mut self, other: &mut CardPile) {
        while let Some(card) = other.cards.pop_back() {
            self.cards.push_front(card);
        }
    }

    pub fn take_top(&mut self) -> Result<CardId, GameError> {
        self.cards.pop_front().ok_or(GameError::NotEnoughCards)
    }

    pub fn take_base(&mut self) -> Result<CardId, GameError> {
        self.cards.pop_back().ok_or(GameError::NotEnoughCards)
    }

    /// Drains this pile onto `new_base` one top card at a time, which reverses
    /// the order. Used to turn the waste back over onto the stock.
    pub fn turn_onto(&mut self, new_base: &mut CardPile) {
        while let Some(card) = self.cards.pop_front() {
            new_base.add(card);
        }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }
}

impl FromIterator<CardId> for CardPile {
    /// Builds a pile from cards listed top to base.
    fn from_iter<I: IntoIterator<Item = CardId>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}
