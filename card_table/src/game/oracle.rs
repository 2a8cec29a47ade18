//! Boundary to the external hand-ranking engine.
//!
//! An oracle receives `<rank><suit>` tokens (ranks `2-9,T,J,Q,K,A`, suits
//! `h,d,c,s`) and answers with a numeric rank plus a category name. The
//! default oracle is backed by the `rs_poker` crate.

use rs_poker::core::{
    Card as PokerCard, Hand as PokerHand, Rank as PokerRank, Rankable, Suit as PokerSuit, Value,
};
use std::collections::HashSet;
use thiserror::Error;

/// Direction in which an oracle's numeric ranks improve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RankOrdering {
    HigherIsBetter,
    LowerIsBetter,
}

impl RankOrdering {
    /// Whether `candidate` beats `incumbent` under this ordering. Ties do not.
    pub fn beats(self, candidate: u64, incumbent: u64) -> bool {
        match self {
            Self::HigherIsBetter => candidate > incumbent,
            Self::LowerIsBetter => candidate < incumbent,
        }
    }
}

/// Verdict returned by an oracle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleRank {
    pub rank: u64,
    pub name: String,
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum OracleError {
    #[error("Invalid card token: {0}")]
    InvalidToken(String),

    #[error("Duplicate card token: {0}")]
    DuplicateCard(String),

    #[error("Oracle needs at least {required} cards, got {got}")]
    NotEnoughCards { required: usize, got: usize },
}

/// A pluggable hand-ranking engine.
pub trait HandOracle: Send + Sync {
    /// Ranks the hand described by `tokens` (five or more cards).
    fn rank(&self, tokens: &[String]) -> Result<OracleRank, OracleError>;

    /// Ordering convention of the ranks returned by [`HandOracle::rank`].
    fn ordering(&self) -> RankOrdering {
        RankOrdering::HigherIsBetter
    }
}

/// Oracle backed by `rs_poker`. Ranks are `(category + 1) << 32 | kicker bits`,
/// so every complete hand ranks above zero and higher is better.
#[derive(Clone, Copy, Debug, Default)]
pub struct RsPokerOracle;

impl RsPokerOracle {
    fn parse(token: &str) -> Result<PokerCard, OracleError> {
        let mut chars = token.chars();
        let (Some(v), Some(s), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(OracleError::InvalidToken(token.to_string()));
        };
        let value = Value::from_char(v).ok_or_else(|| OracleError::InvalidToken(token.to_string()))?;
        let suit =
            PokerSuit::from_char(s).ok_or_else(|| OracleError::InvalidToken(token.to_string()))?;
        Ok(PokerCard { value, suit })
    }

    fn category(rank: PokerRank) -> (u64, u32, &'static str) {
        match rank {
            PokerRank::HighCard(k) => (0, k, "High Card"),
            PokerRank::OnePair(k) => (1, k, "Pair"),
            PokerRank::TwoPair(k) => (2, k, "Two Pair"),
            PokerRank::ThreeOfAKind(k) => (3, k, "Three of a Kind"),
            PokerRank::Straight(k) => (4, k, "Straight"),
            PokerRank::Flush(k) => (5, k, "Flush"),
            PokerRank::FullHouse(k) => (6, k, "Full House"),
            PokerRank::FourOfAKind(k) => (7, k, "Four of a Kind"),
            PokerRank::StraightFlush(k) => (8, k, "Straight Flush"),
        }
    }
}

impl HandOracle for RsPokerOracle {
    fn rank(&self, tokens: &[String]) -> Result<OracleRank, OracleError> {
        if tokens.len() < 5 {
            return Err(OracleError::NotEnoughCards {
                required: 5,
                got: tokens.len(),
            });
        }

        let mut seen = HashSet::with_capacity(tokens.len());
        let mut cards = Vec::with_capacity(tokens.len());
        for token in tokens {
            if !seen.insert(token.as_str()) {
                return Err(OracleError::DuplicateCard(token.clone()));
            }
            cards.push(Self::parse(token)?);
        }

        let (category, kickers, name) = Self::category(PokerHand::new_with_cards(cards).rank());
        Ok(OracleRank {
            rank: ((category + 1) << 32) | u64::from(kickers),
            name: name.to_string(),
        })
    }
}
