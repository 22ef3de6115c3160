use crate::card::{make_deck, Card, CardId, Suit, DECK_SIZE};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::pile::CardPile;
use crate::rules;
use core::fmt;
use enum_iterator::IntoEnumIterator;
use hashbrown::HashSet;
use log::{debug, trace};
use rand::Rng;

pub const NUM_TABLEAUS: usize = 7;
pub const NUM_FOUNDATIONS: usize = 4;

/// Where the held cards were taken from, so they can be put back.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HeldSource {
    Waste,
    Tableau(usize),
    Foundation(Suit),
}

/// A pile that can receive held cards.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Destination {
    Tableau(usize),
    Foundation(Suit),
}

impl HeldSource {
    fn is_same_pile(&self, destination: Destination) -> bool {
        match (*self, destination) {
            (HeldSource::Tableau(from), Destination::Tableau(to)) => from == to,
            (HeldSource::Foundation(from), Destination::Foundation(to)) => from == to,
            _ => false,
        }
    }
}

/// One tableau column: face-down cards under a face-up run.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Column {
    closed: CardPile,
    open: CardPile,
}

impl Column {
    pub fn closed(&self) -> &CardPile {
        &self.closed
    }

    pub fn open(&self) -> &CardPile {
        &self.open
    }
}

/// The table. Owns all 52 cards; every pile holds handles into `cards`, and
/// every command either succeeds completely or leaves the table untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    cards: [Card; DECK_SIZE],
    stock: CardPile,
    waste: CardPile,
    tableau: [Column; NUM_TABLEAUS],
    foundations: [CardPile; NUM_FOUNDATIONS],
    held: CardPile,
    held_source: Option<HeldSource>,
    moves: u32,
    dealt: bool,
    config: GameConfig,
}

impl Game {
    /// An undealt game with the whole deck in the stock, in suit order with
    /// the King of Spades on top.
    pub fn new(config: GameConfig) -> Self {
        let cards = make_deck();
        let mut stock = CardPile::new();
        for card in cards.iter() {
            stock.add(card.id());
        }
        Self {
            cards,
            stock,
            waste: CardPile::new(),
            tableau: Default::default(),
            foundations: Default::default(),
            held: CardPile::new(),
            held_source: None,
            moves: 0,
            dealt: false,
            config,
        }
    }

    /// Builds, shuffles and deals a game. This is how front ends start play.
    pub fn create_and_deal<R: Rng + ?Sized>(
        rng: &mut R,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        let mut game = Self::new(config);
        game.shuffle_stock(rng)?;
        game.deal_game()?;
        Ok(game)
    }

    pub fn shuffle_stock<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        self.ensure_not_dealt()?;
        self.stock.shuffle(rng);
        Ok(())
    }

    /// Puts the undealt stock in exactly `order`, listed top to base. The
    /// first 21 cards go face down to columns 1 through 6, the next 7 face up
    /// to columns 0 through 6, and the rest stay in the stock.
    pub fn arrange_stock(&mut self, order: &[Card]) -> Result<(), GameError> {
        self.ensure_not_dealt()?;
        if order.len() < DECK_SIZE {
            return Err(GameError::NotEnoughCards);
        }
        if order.len() > DECK_SIZE {
            return Err(GameError::TooManyCards);
        }
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        if !order.iter().all(|card| seen.insert(*card)) {
            return Err(GameError::InvalidState("stock arrangement repeats a card"));
        }
        self.stock = order.iter().map(Card::id).collect();
        Ok(())
    }

    pub fn deal_game(&mut self) -> Result<(), GameError> {
        self.ensure_not_dealt()?;
        for (index, column) in self.tableau.iter_mut().enumerate() {
            for _ in 0..index {
                column.closed.add(self.stock.take_top()?);
            }
        }
        for column in self.tableau.iter_mut() {
            column.open.add(self.stock.take_top()?);
        }
        self.dealt = true;
        debug!("dealt game, {} cards left in stock", self.stock.len());
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_dealt(&self) -> bool {
        self.dealt
    }

    pub fn card(&self, id: CardId) -> Card {
        self.cards[id.index()]
    }

    /// Resolves the handles of `pile`, top to base.
    pub fn cards_of<'a>(
        &'a self,
        pile: &'a CardPile,
    ) -> impl DoubleEndedIterator<Item = Card> + ExactSizeIterator + 'a {
        pile.iter().map(move |id| self.card(id))
    }

    pub fn stock(&self) -> &CardPile {
        &self.stock
    }

    pub fn has_stock(&self) -> bool {
        !self.stock.is_empty()
    }

    pub fn waste(&self) -> &CardPile {
        &self.waste
    }

    pub fn has_waste(&self) -> bool {
        !self.waste.is_empty()
    }

    pub fn peek_waste(&self) -> Option<Card> {
        self.waste.peek().map(|id| self.card(id))
    }

    pub fn foundation(&self, suit: Suit) -> &CardPile {
        &self.foundations[suit.index()]
    }

    pub fn has_foundation(&self, suit: Suit) -> bool {
        !self.foundation(suit).is_empty()
    }

    pub fn peek_foundation(&self, suit: Suit) -> Option<Card> {
        self.foundation(suit).peek().map(|id| self.card(id))
    }

    pub fn tableau(&self, index: usize) -> Result<&Column, GameError> {
        self.tableau
            .get(index)
            .ok_or(GameError::TableauOutOfRange(index))
    }

    pub fn open_tableau(&self, index: usize) -> Result<&CardPile, GameError> {
        self.tableau(index).map(Column::open)
    }

    pub fn closed_tableau_len(&self, index: usize) -> Result<usize, GameError> {
        self.tableau(index).map(|column| column.closed.len())
    }

    pub fn held_cards(&self) -> &CardPile {
        &self.held
    }

    pub fn held_source(&self) -> Option<HeldSource> {
        self.held_source
    }

    pub fn move_count(&self) -> u32 {
        self.moves
    }

    pub fn cards_in_foundations(&self) -> usize {
        self.foundations.iter().map(CardPile::len).sum::<usize>()
    }

    pub fn is_won(&self) -> bool {
        self.cards_in_foundations() == DECK_SIZE
    }

    /// Checks that every card is in exactly one pile and that the held cards
    /// and their recorded source agree.
    pub fn is_consistent(&self) -> bool {
        let piles = [&self.stock, &self.waste, &self.held]
            .into_iter()
            .chain(self.foundations.iter())
            .chain(
                self.tableau
                    .iter()
                    .flat_map(|column| [&column.closed, &column.open]),
            );
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for pile in piles {
            for id in pile.iter() {
                if !seen.insert(id) {
                    return false;
                }
            }
        }
        seen.len() == DECK_SIZE && self.held.is_empty() == self.held_source.is_none()
    }

    /// Turns the stock's top card onto the waste, or up to three cards when
    /// drawing three.
    pub fn turn_stock(&mut self) -> Result<(), GameError> {
        self.ensure_idle()?;
        if self.stock.is_empty() {
            return Err(GameError::NotEnoughCards);
        }
        let amount = self.config.draw.count().min(self.stock.len());
        for _ in 0..amount {
            let card = self.stock.take_top()?;
            self.waste.add(card);
        }
        debug!("turned {} from stock, {} left", amount, self.stock.len());
        Ok(())
    }

    /// Turns the waste back over to form a new stock. The stock draws in the
    /// same order as before.
    pub fn return_waste_to_stock(&mut self) -> Result<(), GameError> {
        self.ensure_idle()?;
        if !self.stock.is_empty() {
            return Err(GameError::InvalidState("stock is not empty"));
        }
        if self.waste.is_empty() {
            return Err(GameError::NotEnoughCards);
        }
        self.waste.turn_onto(&mut self.stock);
        debug!("recycled {} cards from waste to stock", self.stock.len());
        Ok(())
    }

    pub fn take_waste(&mut self) -> Result<(), GameError> {
        self.ensure_idle()?;
        let card = self.waste.take_top()?;
        self.hold(card, HeldSource::Waste);
        Ok(())
    }

    pub fn take_foundation(&mut self, suit: Suit) -> Result<(), GameError> {
        self.ensure_idle()?;
        let card = self.foundations[suit.index()].take_top()?;
        self.hold(card, HeldSource::Foundation(suit));
        Ok(())
    }

    /// Picks up the top `amount` face-up cards of a column.
    pub fn take_tableau(&mut self, index: usize, amount: usize) -> Result<(), GameError> {
        self.tableau(index)?;
        self.ensure_idle()?;
        if amount == 0 {
            return Err(GameError::NotEnoughCards);
        }
        let mut run = self.tableau[index].open.split(amount)?;
        self.held.stack(&mut run);
        self.held_source = Some(HeldSource::Tableau(index));
        trace!("holding {} cards from column {}", amount, index);
        Ok(())
    }

    /// Flips a column's hidden top card face up. Only allowed once the
    /// column's face-up run is gone.
    pub fn turn_closed_tableau_top(&mut self, index: usize) -> Result<(), GameError> {
        self.tableau(index)?;
        self.ensure_idle()?;
        let column = &mut self.tableau[index];
        if !column.open.is_empty() {
            return Err(GameError::InvalidState("open tableau is not empty"));
        }
        let card = column.closed.take_top()?;
        column.open.add(card);
        debug!("revealed {:?} on column {}", self.card(card), index);
        Ok(())
    }

    /// Places the held cards on a column. The held base card must fit on the
    /// column's top.
    pub fn stack_tableau(&mut self, index: usize) -> Result<(), GameError> {
        let top = self.tableau(index)?.open.peek().map(|id| self.card(id));
        let source = self.held_source.ok_or(GameError::NotEnoughCards)?;
        let contact = self
            .held
            .peek_base()
            .map(|id| self.card(id))
            .ok_or(GameError::NotEnoughCards)?;
        if let Err(err) = rules::check_tableau_stack(top.as_ref(), &contact) {
            trace!("rejected {:?} onto column {}: {}", contact, index, err);
            return Err(err);
        }
        self.tableau[index].open.stack(&mut self.held);
        self.finish_placement(source, Destination::Tableau(index));
        Ok(())
    }

    /// Places a single held card on the foundation for `suit`.
    pub fn stack_foundation(&mut self, suit: Suit) -> Result<(), GameError> {
        let source = self.held_source.ok_or(GameError::NotEnoughCards)?;
        if self.held.len() > 1 {
            return Err(GameError::TooManyCards);
        }
        let card = self
            .held
            .peek()
            .map(|id| self.card(id))
            .ok_or(GameError::NotEnoughCards)?;
        let top = self.peek_foundation(suit);
        if let Err(err) = rules::check_foundation_stack(suit, top.as_ref(), &card) {
            trace!("rejected {:?} onto {:?} foundation: {}", card, suit, err);
            return Err(err);
        }
        self.foundations[suit.index()].stack(&mut self.held);
        self.finish_placement(source, Destination::Foundation(suit));
        Ok(())
    }

    /// Puts the held cards back where they came from.
    pub fn return_held_cards(&mut self) -> Result<(), GameError> {
        let source = self.held_source.ok_or(GameError::NotEnoughCards)?;
        let pile = match source {
            HeldSource::Waste => &mut self.waste,
            HeldSource::Tableau(index) => &mut self.tableau[index].open,
            HeldSource::Foundation(suit) => &mut self.foundations[suit.index()],
        };
        pile.stack(&mut self.held);
        self.held_source = None;
        trace!("returned held cards to {:?}", source);
        Ok(())
    }

    /// Sends the waste top to its foundation or to a column, as the autoplay
    /// settings allow. Returns where it went, or `None` with the table
    /// unchanged.
    pub fn autoplay_waste(&mut self) -> Result<Option<Destination>, GameError> {
        self.ensure_idle()?;
        let card = match self.peek_waste() {
            Some(card) => card,
            None => return Ok(None),
        };
        let autoplay = self.config.autoplay;
        let mut destination = None;
        if autoplay.to_foundation {
            destination = self.foundation_for(&card);
        }
        if destination.is_none() && autoplay.from_waste {
            destination = self.column_for(&card, None, false);
        }
        if let Some(destination) = destination {
            self.take_waste()?;
            self.place_held(destination)?;
        }
        Ok(destination)
    }

    /// Sends the top `amount` face-up cards of a column to a foundation or to
    /// another column, as the autoplay settings allow.
    pub fn autoplay_tableau(
        &mut self,
        index: usize,
        amount: usize,
    ) -> Result<Option<Destination>, GameError> {
        self.tableau(index)?;
        self.ensure_idle()?;
        let column = &self.tableau[index];
        let contact = amount
            .checked_sub(1)
            .and_then(|depth| column.open.peek_at(depth))
            .map(|id| self.card(id))
            .ok_or(GameError::NotEnoughCards)?;
        let clears_column = amount == column.open.len() && column.closed.is_empty();

        let autoplay = self.config.autoplay;
        let mut destination = None;
        if autoplay.to_foundation && amount == 1 {
            destination = self.foundation_for(&contact);
        }
        if destination.is_none() && autoplay.from_tableau {
            destination = self.column_for(&contact, Some(index), clears_column);
        }
        if let Some(destination) = destination {
            self.take_tableau(index, amount)?;
            self.place_held(destination)?;
        }
        Ok(destination)
    }

    fn ensure_not_dealt(&self) -> Result<(), GameError> {
        if self.dealt {
            Err(GameError::InvalidState("game already dealt"))
        } else {
            Ok(())
        }
    }

    fn ensure_idle(&self) -> Result<(), GameError> {
        if !self.dealt {
            Err(GameError::InvalidState("game has not been dealt"))
        } else if self.held_source.is_some() {
            Err(GameError::InvalidState("cards are already held"))
        } else {
            Ok(())
        }
    }

    fn hold(&mut self, card: CardId, source: HeldSource) {
        self.held.add(card);
        self.held_source = Some(source);
        trace!("holding {:?} from {:?}", self.card(card), source);
    }

    fn finish_placement(&mut self, source: HeldSource, destination: Destination) {
        self.held_source = None;
        if !source.is_same_pile(destination) {
            self.moves += 1;
        }
        debug!(
            "placed {:?} -> {:?}, {} moves",
            source, destination, self.moves
        );
        if let HeldSource::Tableau(index) = source {
            if self.config.autoplay.closed_tableau_top {
                self.reveal_exposed_top(index);
            }
        }
    }

    fn reveal_exposed_top(&mut self, index: usize) {
        let column = &mut self.tableau[index];
        if !column.open.is_empty() {
            return;
        }
        if let Ok(card) = column.closed.take_top() {
            column.open.add(card);
            debug!("auto-revealed {:?} on column {}", self.card(card), index);
        }
    }

    fn place_held(&mut self, destination: Destination) -> Result<(), GameError> {
        let placed = match destination {
            Destination::Tableau(index) => self.stack_tableau(index),
            Destination::Foundation(suit) => self.stack_foundation(suit),
        };
        if let Err(err) = placed {
            self.return_held_cards()?;
            return Err(err);
        }
        Ok(())
    }

    fn foundation_for(&self, card: &Card) -> Option<Destination> {
        let top = self.peek_foundation(card.suit);
        if rules::can_stack_in_foundation(card.suit, top.as_ref(), card) {
            Some(Destination::Foundation(card.suit))
        } else {
            None
        }
    }

    /// First column, other than `skip`, whose top accepts `card`. Empty
    /// columns are passed over when the move would only empty another one.
    fn column_for(
        &self,
        card: &Card,
        skip: Option<usize>,
        clears_column: bool,
    ) -> Option<Destination> {
        (0..NUM_TABLEAUS)
            .filter(|index| Some(*index) != skip)
            .find(|index| {
                let open = &self.tableau[*index].open;
                if clears_column && open.is_empty() {
                    return false;
                }
                let top = open.peek().map(|id| self.card(id));
                rules::can_stack_in_tableau(top.as_ref(), card)
            })
            .map(Destination::Tableau)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stock: {} | Waste:", self.stock.len())?;
        for card in self.cards_of(&self.waste).rev() {
            write!(f, " {:?}", card)?;
        }
        writeln!(f)?;

        f.write_str("Foundations:")?;
        for suit in Suit::into_enum_iter() {
            match self.peek_foundation(suit) {
                Some(card) => write!(f, " {:?}", card)?,
                None => write!(f, " --")?,
            }
        }
        writeln!(f)?;

        for (index, column) in self.tableau.iter().enumerate() {
            write!(f, "Tableau {}:", index)?;
            for _ in 0..column.closed.len() {
                f.write_str(" ##")?;
            }
            for card in self.cards_of(&column.open).rev() {
                write!(f, " {:?}", card)?;
            }
            writeln!(f)?;
        }

        if let Some(source) = self.held_source {
            write!(f, "Held from {:?}:", source)?;
            for card in self.cards_of(&self.held).rev() {
                write!(f, " {:?}", card)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Moves: {}", self.moves)
    }
}
