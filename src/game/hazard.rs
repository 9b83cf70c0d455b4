//! The hazard deck: the storm automaton that escalates every turn

use crate::core::Direction;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use std::fmt;

/// The storm level never usefully exceeds this; going past it loses the
/// game before the next draw.
pub const STORM_LEVEL_CAP: u8 = 15;

/// A card from the hazard deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardCard {
    /// Move the storm one tile per listed step, burying and dehydrating
    /// the tiles it moves onto
    Storm { moves: SmallVec<[Direction; 3]> },
    /// Every unsheltered, unshielded adventurer loses 1 water
    SunBeatsDown,
    /// Raise the storm level, increasing future draw counts
    StormPicksUp,
}

impl fmt::Display for HazardCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardCard::Storm { moves } => {
                write!(f, "storm moves x{} ({})", moves.len(), moves[0])
            }
            HazardCard::SunBeatsDown => write!(f, "sun beats down"),
            HazardCard::StormPicksUp => write!(f, "storm picks up"),
        }
    }
}

/// The cycling 19-card hazard deck plus the storm-level counter
///
/// The deck reshuffles its discard pile back in whenever the draw pile
/// runs dry, so the total card count is conserved for the whole session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardDeck {
    draw_pile: Vec<HazardCard>,
    discard: Vec<HazardCard>,
    /// Starts at 1, only ever rises; past [`STORM_LEVEL_CAP`] the game
    /// is lost
    pub storm_level: u8,
    /// One-turn draw reduction banked by the meteorologist; reset after
    /// every end-of-turn draw
    pub mitigated: u8,
}

impl HazardDeck {
    /// Build the fixed 19-card deck and shuffle it once
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut draw_pile = Vec::with_capacity(19);
        for direction in Direction::CARDINAL {
            for _ in 0..3 {
                draw_pile.push(HazardCard::Storm {
                    moves: smallvec![direction],
                });
            }
            for _ in 0..2 {
                draw_pile.push(HazardCard::Storm {
                    moves: smallvec![direction; 2],
                });
            }
            draw_pile.push(HazardCard::Storm {
                moves: smallvec![direction; 3],
            });
        }
        for _ in 0..4 {
            draw_pile.push(HazardCard::SunBeatsDown);
        }
        for _ in 0..3 {
            draw_pile.push(HazardCard::StormPicksUp);
        }
        draw_pile.shuffle(rng);

        HazardDeck {
            draw_pile,
            discard: Vec::new(),
            storm_level: 1,
            mitigated: 0,
        }
    }

    /// Cards the schedule demands at the current storm level, or None
    /// once the level has blown past the cap (an immediate loss,
    /// checked before any card is drawn).
    pub fn scheduled_draws(&self) -> Option<u8> {
        match self.storm_level {
            0..=1 => Some(2),
            2..=6 => Some(3),
            7..=10 => Some(4),
            11..=13 => Some(5),
            14..=15 => Some(6),
            _ => None,
        }
    }

    /// Scheduled draws minus the meteorologist's banked mitigation
    pub fn effective_draws(&self) -> Option<u8> {
        self.scheduled_draws()
            .map(|amount| amount.saturating_sub(self.mitigated))
    }

    /// Pop the next card, reshuffling the discard pile back into the
    /// draw pile if it ran dry. The card is discarded immediately; its
    /// effect is applied by the session.
    pub fn draw_one(&mut self, rng: &mut impl Rng) -> HazardCard {
        if self.draw_pile.is_empty() {
            std::mem::swap(&mut self.draw_pile, &mut self.discard);
            self.draw_pile.shuffle(rng);
        }
        let card = self
            .draw_pile
            .pop()
            .expect("hazard deck cycles and is never empty");
        self.discard.push(card.clone());
        card
    }

    pub fn escalate(&mut self) {
        self.storm_level += 1;
    }

    pub fn mitigate(&mut self) {
        self.mitigated += 1;
    }

    pub fn reset_mitigation(&mut self) {
        self.mitigated = 0;
    }

    /// Draw + discard pile size; invariant across reshuffles
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len() + self.discard.len()
    }

    pub fn draw_pile_len(&self) -> usize {
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
        let mut rng = ChaCha12Rng::seed_from_u64(11);
        let deck = HazardDeck::new(&mut rng);
        assert_eq!(deck.total_cards(), 19);

        let storms = deck
            .draw_pile
            .iter()
            .filter(|c| matches!(c, HazardCard::Storm { .. }))
            .count();
        let suns = deck
            .draw_pile
            .iter()
            .filter(|c| matches!(c, HazardCard::SunBeatsDown))
            .count();
        let escalations = deck
            .draw_pile
            .iter()
            .filter(|c| matches!(c, HazardCard::StormPicksUp))
            .count();
        assert_eq!((storms, suns, escalations), (12, 4, 3));
    }

    #[test]
    fn test_conservation_across_reshuffles() {
        let mut rng = ChaCha12Rng::seed_from_u64(11);
        let mut deck = HazardDeck::new(&mut rng);
        for _ in 0..100 {
            deck.draw_one(&mut rng);
            assert_eq!(deck.total_cards(), 19);
        }
    }

    #[test]
    fn test_draw_schedule() {
        let mut rng = ChaCha12Rng::seed_from_u64(11);
        let mut deck = HazardDeck::new(&mut rng);

        assert_eq!(deck.scheduled_draws(), Some(2));
        deck.storm_level = 6;
        assert_eq!(deck.scheduled_draws(), Some(3));
        deck.storm_level = 7;
        assert_eq!(deck.scheduled_draws(), Some(4));
        deck.storm_level = 13;
        assert_eq!(deck.scheduled_draws(), Some(5));
        deck.storm_level = 15;
        assert_eq!(deck.scheduled_draws(), Some(6));
        deck.escalate();
        assert_eq!(deck.scheduled_draws(), None);
    }

    #[test]
    fn test_mitigation_reduces_effective_draws() {
        let mut rng = ChaCha12Rng::seed_from_u64(11);
        let mut deck = HazardDeck::new(&mut rng);
        deck.storm_level = 4;
        deck.mitigate();
        assert_eq!(deck.effective_draws(), Some(2));
        deck.mitigate();
        deck.mitigate();
        deck.mitigate();
        assert_eq!(deck.effective_draws(), Some(0));
        deck.reset_mitigation();
        assert_eq!(deck.effective_draws(), Some(3));
    }
}
