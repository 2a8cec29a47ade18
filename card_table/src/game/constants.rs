/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Cards in a ranked poker hand.
pub const HAND_SIZE: usize = 5;

/// Name reported for hands with fewer than [`HAND_SIZE`] cards.
pub const INCOMPLETE_HAND: &str = "Incomplete Hand";

/// Rank reported for hands with fewer than [`HAND_SIZE`] cards.
pub const INCOMPLETE_RANK: u64 = 0;
