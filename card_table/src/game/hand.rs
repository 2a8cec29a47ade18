//! Hand evaluation on top of a [`HandOracle`].

use itertools::Itertools;
use serde::Serialize;

use super::{
    constants::{HAND_SIZE, INCOMPLETE_HAND, INCOMPLETE_RANK},
    entities::Card,
    oracle::{HandOracle, OracleError, RsPokerOracle},
};

/// A read-only view over a set of cards and the oracle's verdict on them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Hand {
    pub cards: Vec<Card>,
    pub rank: u64,
    pub name: String,
}

impl Hand {
    fn incomplete(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
            rank: INCOMPLETE_RANK,
            name: INCOMPLETE_HAND.to_string(),
        }
    }

    /// Whether the oracle was consulted for this hand.
    pub fn is_complete(&self) -> bool {
        self.cards.len() >= HAND_SIZE
    }
}

/// Translates cards into oracle tokens and wraps the verdicts into [`Hand`]s.
#[derive(Clone, Debug)]
pub struct HandEvaluator<O = RsPokerOracle> {
    oracle: O,
}

impl Default for HandEvaluator<RsPokerOracle> {
    fn default() -> Self {
        Self::new(RsPokerOracle)
    }
}

impl<O: HandOracle> HandEvaluator<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Ranks all of `cards` as one hand.
    ///
    /// Fewer than five cards yield the incomplete placeholder and the oracle
    /// is not called.
    pub fn evaluate(&self, cards: &[Card]) -> Result<Hand, OracleError> {
        if cards.len() < HAND_SIZE {
            return Ok(Hand::incomplete(cards));
        }

        let tokens: Vec<String> = cards.iter().map(Card::token).collect();
        let verdict = self.oracle.rank(&tokens)?;
        Ok(Hand {
            cards: cards.to_vec(),
            rank: verdict.rank,
            name: verdict.name,
        })
    }

    /// Picks the best five-card hand out of `cards` (hole plus board).
    ///
    /// Every five-card combination is ranked; the winner under the oracle's
    /// ordering is returned with only its five cards. On ties the combination
    /// that comes first in index order wins.
    pub fn find_best_hand(&self, cards: &[Card]) -> Result<Hand, OracleError> {
        if cards.len() <= HAND_SIZE {
            return self.evaluate(cards);
        }

        let ordering = self.oracle.ordering();
        let mut best: Option<Hand> = None;
        for subset in cards.iter().copied().combinations(HAND_SIZE) {
            let hand = self.evaluate(&subset)?;
            match &best {
                Some(current) if !ordering.beats(hand.rank, current.rank) => {}
                _ => best = Some(hand),
            }
        }

        // n > HAND_SIZE guarantees at least one combination.
        Ok(best.unwrap_or_else(|| Hand::incomplete(cards)))
    }
}
