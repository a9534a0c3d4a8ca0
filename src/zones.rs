//! Per-player deck zones (draw pile, hand, discard, played, base tiers)
//!
//! Every zone owns its `CardInstance` values outright, so "a card is in
//! exactly one zone" is a move in the type system rather than a bookkeeping
//! discipline. All transfers remove the owned value from one zone and insert
//! it into another; nothing hands out copies.

use crate::core::{CardInstance, InstanceId, Placement};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The six zone kinds of a player's deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    DrawPile,
    Hand,
    Discard,
    Played,
    FrontierBases,
    InteriorBases,
}

/// One ordered zone of owned card instances.
///
/// Zone sizes stay small (well under 100), so linear scans are fine.
/// For the draw pile, index 0 is the top.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckZone {
    cards: Vec<CardInstance>,
}

impl DeckZone {
    pub fn new() -> Self {
        DeckZone { cards: Vec::new() }
    }

    pub fn add(&mut self, card: CardInstance) {
        self.cards.push(card);
    }

    /// Insert at position 0 (the top, for the draw pile).
    pub fn insert_top(&mut self, card: CardInstance) {
        self.cards.insert(0, card);
    }

    /// Remove a card by identity, returning the owned value.
    pub fn remove(&mut self, id: InstanceId) -> Option<CardInstance> {
        let pos = self.cards.iter().position(|c| c.instance_id == id)?;
        Some(self.cards.remove(pos))
    }

    /// Remove the card at a position, returning the owned value.
    pub fn remove_at(&mut self, index: usize) -> Option<CardInstance> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.iter().find(|c| c.instance_id == id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        self.cards.iter_mut().find(|c| c.instance_id == id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.cards.iter().any(|c| c.instance_id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CardInstance> {
        self.cards.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, CardInstance> {
        self.cards.iter_mut()
    }

    fn drain_into(&mut self, other: &mut DeckZone) {
        other.cards.append(&mut self.cards);
    }
}

/// All six zones of one player's deck.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerDeck {
    pub draw_pile: DeckZone,
    pub hand: DeckZone,
    pub discard: DeckZone,
    pub played: DeckZone,
    pub frontier_bases: DeckZone,
    pub interior_bases: DeckZone,
}

impl PlayerDeck {
    pub fn new() -> Self {
        PlayerDeck::default()
    }

    /// Total card count across every zone. Zone transfers conserve this.
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len()
            + self.hand.len()
            + self.discard.len()
            + self.played.len()
            + self.frontier_bases.len()
            + self.interior_bases.len()
    }

    /// Fisher-Yates shuffle of the draw pile.
    ///
    /// This is the only place spent-draw flags reset, and the only place
    /// regen-flagged art seeds are re-rolled.
    pub fn shuffle_draw_pile(&mut self, rng: &mut impl Rng) {
        use rand::seq::SliceRandom;
        self.draw_pile.cards.shuffle(rng);
        for card in self.draw_pile.iter_mut() {
            card.draw_spent = false;
            if card.needs_regen {
                card.art_seed = rng.gen();
                card.needs_regen = false;
            }
        }
    }

    /// Move the discard pile into the draw pile and shuffle.
    fn reshuffle_discard(&mut self, rng: &mut impl Rng) {
        self.discard.drain_into(&mut self.draw_pile);
        self.shuffle_draw_pile(rng);
    }

    /// Draw the card at `index` of the draw pile into the hand, reshuffling
    /// the discard first if the pile is empty. An out-of-range index falls
    /// back to the top. Returns `None` only when pile and discard are both
    /// exhausted.
    pub fn draw_at(&mut self, index: usize, rng: &mut impl Rng) -> Option<InstanceId> {
        if self.draw_pile.is_empty() {
            self.reshuffle_discard(rng);
        }
        if self.draw_pile.is_empty() {
            return None;
        }
        let index = if index < self.draw_pile.len() { index } else { 0 };
        let card = self.draw_pile.remove_at(index)?;
        let id = card.instance_id;
        self.hand.add(card);
        Some(id)
    }

    /// Draw from the top of the pile.
    pub fn draw_top(&mut self, rng: &mut impl Rng) -> Option<InstanceId> {
        self.draw_at(0, rng)
    }

    /// Draw a caller-specified list of *original* pile positions.
    ///
    /// Each requested position refers to the pile as it stood before any of
    /// this call's draws; positions are rebased downward as earlier draws
    /// remove entries. Stale or duplicate positions fall back to top-draws.
    /// Stops early if the deck and discard are both exhausted.
    pub fn draw_ordered(&mut self, order: &[usize], rng: &mut impl Rng) -> Vec<InstanceId> {
        let original_len = self.draw_pile.len();
        let mut taken: Vec<usize> = Vec::with_capacity(order.len());
        let mut drawn = Vec::with_capacity(order.len());

        for &original in order {
            let valid = original < original_len && !taken.contains(&original);
            let id = if valid {
                let rebased = original - taken.iter().filter(|&&t| t < original).count();
                if rebased < self.draw_pile.len() {
                    taken.push(original);
                    self.draw_at(rebased, rng)
                } else {
                    // Pile was reshuffled mid-sequence; the original
                    // coordinates no longer exist.
                    self.draw_top(rng)
                }
            } else {
                self.draw_top(rng)
            };

            match id {
                Some(id) => drawn.push(id),
                None => break,
            }
        }
        drawn
    }

    /// Move a card from hand into play: bases go to their placement tier,
    /// everything else to the played zone. Returns the instance id, or
    /// `None` if the card is not in hand.
    pub fn play_from_hand(&mut self, id: InstanceId, placement: Placement) -> Option<InstanceId> {
        let mut card = self.hand.remove(id)?;
        if card.is_base() {
            card.placement = placement;
            card.deployed = true;
            match placement {
                Placement::Frontier => self.frontier_bases.add(card),
                Placement::Interior => self.interior_bases.add(card),
            }
        } else {
            self.played.add(card);
        }
        Some(id)
    }

    /// End-of-turn cleanup: played cards and the remaining hand go to the
    /// discard pile. Bases stay where they are.
    pub fn end_turn(&mut self) {
        self.played.drain_into(&mut self.discard);
        self.hand.drain_into(&mut self.discard);
    }

    /// Find a deployed base in either tier.
    pub fn find_base(&self, id: InstanceId) -> Option<&CardInstance> {
        self.frontier_bases.get(id).or_else(|| self.interior_bases.get(id))
    }

    pub fn find_base_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        if self.frontier_bases.contains(id) {
            self.frontier_bases.get_mut(id)
        } else {
            self.interior_bases.get_mut(id)
        }
    }

    /// Remove a base from whichever tier holds it.
    pub fn remove_base(&mut self, id: InstanceId) -> Option<CardInstance> {
        self.frontier_bases
            .remove(id)
            .or_else(|| self.interior_bases.remove(id))
    }

    pub fn has_bases(&self) -> bool {
        !self.frontier_bases.is_empty() || !self.interior_bases.is_empty()
    }
}
