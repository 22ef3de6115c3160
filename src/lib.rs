//! Rules engine for Klondike solitaire: cards, piles, placement rules and the
//! table state machine. Rendering and input are left to the front end, which
//! drives a [`Game`] through its commands and reads its piles back.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod card;
pub mod config;
pub mod error;
pub mod game;
pub mod pile;
pub mod rules;

pub use crate::card::{Card, CardId, Color, Rank, Suit, DECK_SIZE};
pub use crate::config::{AutoplayConfig, DrawMode, GameConfig};
pub use crate::error::GameError;
pub use crate::game::{Column, Destination, Game, HeldSource, NUM_FOUNDATIONS, NUM_TABLEAUS};
pub use crate::pile::CardPile;
