//! # Card Table
//!
//! Core of a single real-time card table: seat assignment with validated
//! buy-ins, a registry of live client sessions that fans out table events,
//! and a standard deck that feeds an external hand-ranking engine.
//!
//! ## Architecture
//!
//! - **Hub**: one worker task owns the live-session set and consumes a
//!   bounded inbox; every register, unregister and broadcast goes through it.
//!   A session whose mailbox is full is disconnected rather than stalling the
//!   table for everyone.
//! - **Table**: the seat ledger, guarded by its own async mutex because seat
//!   requests arrive over request/response calls, not the hub inbox.
//! - **Sessions**: paired inbound/outbound pumps per connection, generic over
//!   any `Stream`/`Sink` transport.
//! - **Cards**: deck construction, Fisher-Yates shuffling and dealing, plus a
//!   thin adapter that turns cards into oracle tokens.
//!
//! ## Core Modules
//!
//! - [`game`]: cards, deck, hand evaluation adapter
//! - [`table`]: seats, players and buy-in limits
//! - [`hub`]: session registry, broadcast events and session pumps
//!
//! ## Example
//!
//! ```
//! use card_table::game::{Deck, HandEvaluator, RsPokerOracle};
//!
//! let mut deck = Deck::new();
//! deck.shuffle();
//! let cards = deck.deal_hand(7);
//! let best = HandEvaluator::new(RsPokerOracle).find_best_hand(&cards).unwrap();
//! assert_eq!(best.cards.len(), 5);
//! ```

/// Cards, deck and the hand-ranking adapter.
pub mod game;
pub use game::{Card, Deck, Hand, HandEvaluator, Rank, Suit};

/// Seat assignment for one table.
pub mod table;
pub use table::{Player, SeatError, Table, TableConfig};

/// Live-session registry and broadcast fan-out.
pub mod hub;
pub use hub::{Hub, HubHandle, SessionEntry, TableEvent};
