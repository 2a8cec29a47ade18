/// Property-based tests for the deck and hand evaluation using proptest
///
/// These tests verify shuffling and dealing invariants across many seeds
/// and deal sizes, and that best-hand selection agrees with brute force.
use card_table::game::{Card, Deck, HandEvaluator, Rank, RsPokerOracle, Suit};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use std::collections::BTreeSet;

fn full_deck_set() -> BTreeSet<Card> {
    Deck::new().cards().iter().copied().collect()
}

// Strategy to generate a valid card
fn card_strategy() -> impl Strategy<Value = Card> {
    (0usize..13, 0usize..4).prop_map(|(rank, suit)| Card::new(Rank::ALL[rank], Suit::ALL[suit]))
}

// Strategy to generate a vec of unique cards (no duplicates)
fn unique_cards_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card_strategy(), min..=max).prop_filter("Cards must be unique", |cards| {
        let set: BTreeSet<_> = cards.iter().collect();
        set.len() == cards.len()
    })
}

proptest! {
    #[test]
    fn test_shuffle_is_permutation(seed in any::<u64>()) {
        let mut deck = Deck::new();
        deck.shuffle_with(&mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(deck.remaining(), 52);
        let shuffled: BTreeSet<Card> = deck.cards().iter().copied().collect();
        prop_assert_eq!(shuffled, full_deck_set());
    }

    #[test]
    fn test_repeated_shuffles_keep_permutation(seed in any::<u64>(), shuffles in 0usize..16, unseeded in 1usize..4) {
        let mut deck = Deck::new();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..shuffles {
            deck.shuffle_with(&mut rng);
        }
        for _ in 0..unseeded {
            deck.shuffle();
        }

        prop_assert_eq!(deck.remaining(), 52);
        let shuffled: BTreeSet<Card> = deck.cards().iter().copied().collect();
        prop_assert_eq!(shuffled, full_deck_set());
    }

    #[test]
    fn test_shuffle_deterministic_per_seed(seed in any::<u64>()) {
        let mut a = Deck::new();
        let mut b = Deck::new();
        a.shuffle_with(&mut StdRng::seed_from_u64(seed));
        b.shuffle_with(&mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(a.cards(), b.cards());
    }

    #[test]
    fn test_deal_accounting(seed in any::<u64>(), sizes in prop::collection::vec(0usize..20, 1..8)) {
        let mut deck = Deck::new();
        deck.shuffle_with(&mut StdRng::seed_from_u64(seed));

        let mut dealt = Vec::new();
        for n in sizes {
            let before = deck.remaining();
            let hand = deck.deal_hand(n);
            prop_assert_eq!(hand.len(), n.min(before));
            prop_assert_eq!(deck.remaining(), before - hand.len());
            dealt.extend(hand);
        }

        // Dealt and remaining cards partition the original deck
        let mut all: BTreeSet<Card> = dealt.iter().copied().collect();
        prop_assert_eq!(all.len(), dealt.len());
        all.extend(deck.cards().iter().copied());
        prop_assert_eq!(all, full_deck_set());
    }

    #[test]
    fn test_best_hand_is_a_subset(cards in unique_cards_strategy(6, 7)) {
        let evaluator = HandEvaluator::new(RsPokerOracle);
        let best = evaluator.find_best_hand(&cards).unwrap();

        prop_assert_eq!(best.cards.len(), 5);
        for card in &best.cards {
            prop_assert!(cards.contains(card));
        }
        prop_assert_eq!(evaluator.evaluate(&best.cards).unwrap().rank, best.rank);
    }

    #[test]
    fn test_best_hand_never_loses_to_a_subset(cards in unique_cards_strategy(7, 7), first in 0usize..7, second in 0usize..6) {
        let evaluator = HandEvaluator::new(RsPokerOracle);
        let best = evaluator.find_best_hand(&cards).unwrap();

        let mut subset = cards.clone();
        subset.remove(first);
        subset.remove(second);
        let other = evaluator.evaluate(&subset).unwrap();
        prop_assert!(best.rank >= other.rank);
    }
}
