use core::fmt;
use enum_iterator::IntoEnumIterator;

pub const DECK_SIZE: usize = 52;
pub const RANKS_PER_SUIT: usize = 13;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Color {
    Black,
    Red,
}

/// Suits in the order the deck is built and foundations are indexed.
#[derive(Clone, Copy, Eq, Hash, IntoEnumIterator, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl fmt::Debug for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let s = match self {
            Suit::Clubs => "♣️",
            Suit::Diamonds => "♦️",
            Suit::Hearts => "♥️",
            Suit::Spades => "♠️",
        };
        f.write_str(s)
    }
}

impl Suit {
    pub fn color(&self) -> Color {
        match self {
            Suit::Diamonds | Suit::Hearts => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, IntoEnumIterator, Ord, PartialEq, PartialOrd)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

impl From<Rank> for &'static str {
    fn from(rank: Rank) -> Self {
        match rank {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "T",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// A playing card. Cards never change once the deck is built; where a card
/// sits, and whether it is face up, is a property of the pile holding it.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn color(&self) -> Color {
        self.suit.color()
    }

    pub fn is_same_color(&self, other: &Card) -> bool {
        self.color() == other.color()
    }

    pub fn is_one_below(&self, other: &Card) -> bool {
        let delta = other.rank as i32 - self.rank as i32;
        delta == 1
    }

    /// Handle of this card in a canonical deck.
    pub fn id(&self) -> CardId {
        CardId((self.suit.index() * RANKS_PER_SUIT + self.rank as usize - 1) as u8)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let rank: &str = self.rank.into();
        f.write_fmt(format_args!("{}{:?}", rank, self.suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        fmt::Debug::fmt(self, f)
    }
}

/// Index of a card in the game's card arena.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CardId(pub(crate) u8);

impl CardId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// The full deck in suit-major, rank-minor order. Position `n` holds the card
/// whose `CardId` is `n`.
pub fn make_deck() -> [Card; DECK_SIZE] {
    let mut deck = [Card::new(Rank::Ace, Suit::Clubs); DECK_SIZE];
    let cards = Suit::into_enum_iter()
        .flat_map(|suit| Rank::into_enum_iter().map(move |rank| Card::new(rank, suit)));
    for (slot, card) in deck.iter_mut().zip(cards) {
        *slot = card;
    }
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_is_canonical_and_ids_match_positions() {
        let deck = make_deck();
        assert_eq!(deck[0], Card::new(Rank::Ace, Suit::Clubs));
        assert_eq!(deck[12], Card::new(Rank::King, Suit::Clubs));
        assert_eq!(deck[13], Card::new(Rank::Ace, Suit::Diamonds));
        assert_eq!(deck[51], Card::new(Rank::King, Suit::Spades));
        for (index, card) in deck.iter().enumerate() {
            assert_eq!(card.id().index(), index);
        }
    }

    #[test]
    fn colors_follow_suits() {
        assert_eq!(Suit::Clubs.color(), Color::Black);
        assert_eq!(Suit::Spades.color(), Color::Black);
        assert_eq!(Suit::Diamonds.color(), Color::Red);
        assert_eq!(Suit::Hearts.color(), Color::Red);
    }

    #[test]
    fn one_below_is_directional() {
        let seven = Card::new(Rank::Seven, Suit::Clubs);
        let eight = Card::new(Rank::Eight, Suit::Hearts);
        assert!(seven.is_one_below(&eight));
        assert!(!eight.is_one_below(&seven));
        assert!(!seven.is_one_below(&seven));
    }

    #[test]
    fn debug_uses_short_labels() {
        let card = Card::new(Rank::Ten, Suit::Spades);
        assert_eq!(format!("{:?}", card), "T♠️");
    }
}
