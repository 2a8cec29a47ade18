//! Card domain: cards, the 52-card deck and the hand-ranking adapter.
//!
//! Hand ranking itself is delegated to a [`HandOracle`]; this module only
//! translates cards into oracle tokens and wraps the verdict in a [`Hand`].

pub mod constants;
pub mod entities;
pub mod hand;
pub mod oracle;

pub use entities::{Card, Deck, Rank, Suit};
pub use hand::{Hand, HandEvaluator};
pub use oracle::{HandOracle, OracleError, OracleRank, RankOrdering, RsPokerOracle};
