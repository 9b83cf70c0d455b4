//! The gear deck: one-shot equipment cards

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One-shot equipment found by flipping gear-bearing tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GearCard {
    /// Clear every sand marker from one accessible tile
    DuneBlaster,
    /// Fly the holder to any unblocked, non-storm tile
    JetPack,
    /// Peek at an unflipped tile without flipping it
    Terrascope,
    /// Shield the holder from dehydration until their own next turn
    SolarShield,
    /// Refund two action points to the current turn
    TimeThrottle,
    /// Everyone on the holder's tile gains 2 water
    SecretWaterReserve,
}

impl GearCard {
    pub fn name(self) -> &'static str {
        match self {
            GearCard::DuneBlaster => "dune blaster",
            GearCard::JetPack => "jet pack",
            GearCard::Terrascope => "terrascope",
            GearCard::SolarShield => "solar shield",
            GearCard::TimeThrottle => "time throttle",
            GearCard::SecretWaterReserve => "secret water reserve",
        }
    }
}

impl fmt::Display for GearCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The finite supply of gear
///
/// Cards leave the deck permanently when drawn; there is no discard
/// pile and no reshuffle, so the supply can run dry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearDeck {
    draw_pile: Vec<GearCard>,
}

impl GearDeck {
    /// Build the fixed 12-card supply and shuffle it once
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut draw_pile = Vec::with_capacity(12);
        for (card, count) in [
            (GearCard::DuneBlaster, 3),
            (GearCard::JetPack, 3),
            (GearCard::Terrascope, 2),
            (GearCard::SolarShield, 2),
            (GearCard::TimeThrottle, 1),
            (GearCard::SecretWaterReserve, 1),
        ] {
            for _ in 0..count {
                draw_pile.push(card);
            }
        }
        draw_pile.shuffle(rng);
        GearDeck { draw_pile }
    }

    /// Draw the top card; an exhausted supply yields nothing
    pub fn draw(&mut self) -> Option<GearCard> {
        self.draw_pile.pop()
    }

    pub fn remaining(&self) -> usize {
        self.draw_pile.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn test_deck_composition() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let deck = GearDeck::new(&mut rng);
        assert_eq!(deck.remaining(), 12);

        let count = |wanted| deck.draw_pile.iter().filter(|&&c| c == wanted).count();
        assert_eq!(count(GearCard::DuneBlaster), 3);
        assert_eq!(count(GearCard::JetPack), 3);
        assert_eq!(count(GearCard::Terrascope), 2);
        assert_eq!(count(GearCard::SolarShield), 2);
        assert_eq!(count(GearCard::TimeThrottle), 1);
        assert_eq!(count(GearCard::SecretWaterReserve), 1);
    }

    #[test]
    fn test_exhaustion_is_silent() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let mut deck = GearDeck::new(&mut rng);
        for _ in 0..12 {
            assert!(deck.draw().is_some());
        }
        assert_eq!(deck.draw(), None);
        assert_eq!(deck.remaining(), 0);
    }
}
