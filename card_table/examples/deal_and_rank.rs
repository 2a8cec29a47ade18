//! Deal and Rank Example
//!
//! Shuffles a deck, deals hole cards to a few players plus a five-card
//! board, and picks each player's best five-card hand.

use card_table::game::{Deck, HandEvaluator, HandOracle, RsPokerOracle};

fn main() {
    println!("=== Deal and Rank Example ===\n");

    let mut deck = Deck::new();
    deck.shuffle();

    let players = ["alice", "bob", "carol"];
    let hole: Vec<_> = players.iter().map(|_| deck.deal_hand(2)).collect();
    let board = deck.deal_hand(5);

    let board_str: Vec<String> = board.iter().map(ToString::to_string).collect();
    println!("Board: {}\n", board_str.join(" "));

    let evaluator = HandEvaluator::new(RsPokerOracle);
    let ordering = evaluator.oracle().ordering();
    let mut best: Option<(&str, u64)> = None;

    for (name, cards) in players.iter().zip(&hole) {
        let mut all = cards.clone();
        all.extend_from_slice(&board);

        let hand = match evaluator.find_best_hand(&all) {
            Ok(hand) => hand,
            Err(e) => {
                eprintln!("{name}: could not rank hand: {e}");
                continue;
            }
        };

        let shown: Vec<String> = hand.cards.iter().map(ToString::to_string).collect();
        println!("{name:>6}: {:<16} {}", hand.name, shown.join(" "));

        if best.is_none_or(|(_, rank)| ordering.beats(hand.rank, rank)) {
            best = Some((name, hand.rank));
        }
    }

    println!("\n{} cards left in the deck", deck.remaining());
    if let Some((name, _)) = best {
        println!("Best hand: {name}");
    }
}
