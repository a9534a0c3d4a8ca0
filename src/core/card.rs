//! Card type definitions and per-copy instances
//!
//! `CardType` is immutable after catalog load and shared between all copies
//! via `Arc`. `CardInstance` is the mutable per-copy state: upgrade bonuses,
//! the cosmetic art seed, the spent-draw flag, and base deployment state.

use crate::core::{CardKind, CardTypeId, Effect, Faction, InstanceId, Placement};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

/// Defensive stats for base cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    /// Damage required to destroy the base.
    pub defense: u32,

    /// Outposts must be destroyed before their owner's authority (or the
    /// outpost's sibling bases) can be attacked.
    pub outpost: bool,
}

/// Immutable card definition, created at catalog load and never mutated
/// mid-game. Instances reference their type through a shared `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardType {
    pub id: CardTypeId,
    pub name: String,
    pub cost: u32,
    pub faction: Faction,
    pub kind: CardKind,

    /// Present only for bases.
    pub base: Option<BaseStats>,

    /// Effects run when the card is played.
    pub primary: SmallVec<[Effect; 4]>,

    /// Effects run when a second card of this faction is played this turn.
    pub ally: SmallVec<[Effect; 4]>,

    /// Effects run when the card is permanently removed from the game.
    pub scrap: SmallVec<[Effect; 4]>,
}

impl CardType {
    pub fn new(id: CardTypeId, name: impl Into<String>, cost: u32, faction: Faction, kind: CardKind) -> Self {
        CardType {
            id,
            name: name.into(),
            cost,
            faction,
            kind,
            base: None,
            primary: SmallVec::new(),
            ally: SmallVec::new(),
            scrap: SmallVec::new(),
        }
    }

    pub fn base_stats(mut self, defense: u32, outpost: bool) -> Self {
        self.base = Some(BaseStats { defense, outpost });
        self
    }

    pub fn primary(mut self, effect: Effect) -> Self {
        self.primary.push(effect);
        self
    }

    pub fn ally(mut self, effect: Effect) -> Self {
        self.ally.push(effect);
        self
    }

    pub fn scrap(mut self, effect: Effect) -> Self {
        self.scrap.push(effect);
        self
    }

    pub fn is_base(&self) -> bool {
        matches!(self.kind, CardKind::Base)
    }

    /// Count of the card's primary draw effect, if it has one.
    pub fn primary_draw(&self) -> Option<u8> {
        self.primary.iter().find_map(|e| e.draw_count())
    }
}

/// One copy of a card during gameplay.
///
/// Created when bought, spawned, or dealt into a starting deck; dropped when
/// it permanently leaves the game (scrapped, or destroyed as a base).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id for this copy.
    pub instance_id: InstanceId,

    /// Shared, non-owning reference to the definition.
    pub card_type: Arc<CardType>,

    /// Permanent upgrade counters applied by upgrade effects.
    pub attack_bonus: u32,
    pub trade_bonus: u32,
    pub authority_bonus: u32,

    /// Cosmetic art seed; re-rolled on shuffle while `needs_regen` is set.
    pub art_seed: u32,
    pub needs_regen: bool,

    /// Set when this copy's primary draw effect has fired this shuffle
    /// cycle. Reset only when the copy passes through a shuffle.
    pub draw_spent: bool,

    /// Base-only placement tier (meaningless for ships and units).
    pub placement: Placement,

    /// Base-only: set once the base enters a base zone.
    pub deployed: bool,

    /// Base-only accumulated damage. Invariant: stays below the base's
    /// defense while the card is in a zone.
    pub damage_taken: u32,
}

impl CardInstance {
    pub fn new(instance_id: InstanceId, card_type: Arc<CardType>, art_seed: u32) -> Self {
        CardInstance {
            instance_id,
            card_type,
            attack_bonus: 0,
            trade_bonus: 0,
            authority_bonus: 0,
            art_seed,
            needs_regen: false,
            draw_spent: false,
            placement: Placement::Frontier,
            deployed: false,
            damage_taken: 0,
        }
    }

    pub fn type_id(&self) -> CardTypeId {
        self.card_type.id
    }

    pub fn name(&self) -> &str {
        &self.card_type.name
    }

    pub fn cost(&self) -> u32 {
        self.card_type.cost
    }

    pub fn faction(&self) -> Faction {
        self.card_type.faction
    }

    pub fn kind(&self) -> CardKind {
        self.card_type.kind
    }

    pub fn is_base(&self) -> bool {
        self.card_type.is_base()
    }

    pub fn defense(&self) -> Option<u32> {
        self.card_type.base.map(|b| b.defense)
    }

    pub fn is_outpost(&self) -> bool {
        self.card_type.base.map(|b| b.outpost).unwrap_or(false)
    }

    /// Draw count of an unspent primary draw effect, if any.
    pub fn pending_auto_draw(&self) -> Option<u8> {
        if self.draw_spent {
            None
        } else {
            self.card_type.primary_draw()
        }
    }

    pub fn has_upgrades(&self) -> bool {
        self.attack_bonus > 0 || self.trade_bonus > 0 || self.authority_bonus > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_type() -> Arc<CardType> {
        Arc::new(
            CardType::new(CardTypeId::new(1), "Test Sloop", 2, Faction::Concord, CardKind::Ship)
                .primary(Effect::GainTrade(2))
                .primary(Effect::Draw(1))
                .ally(Effect::GainAuthority(3)),
        )
    }

    #[test]
    fn test_type_builder() {
        let ty = sample_type();
        assert_eq!(ty.name, "Test Sloop");
        assert_eq!(ty.primary.len(), 2);
        assert_eq!(ty.primary_draw(), Some(1));
        assert!(!ty.is_base());
    }

    #[test]
    fn test_instance_spent_draw() {
        let mut card = CardInstance::new(InstanceId::new(10), sample_type(), 99);
        assert_eq!(card.pending_auto_draw(), Some(1));

        card.draw_spent = true;
        assert_eq!(card.pending_auto_draw(), None);
    }

    #[test]
    fn test_base_stats() {
        let ty = Arc::new(
            CardType::new(CardTypeId::new(2), "Test Spire", 4, Faction::Veil, CardKind::Base)
                .base_stats(5, true),
        );
        let card = CardInstance::new(InstanceId::new(11), ty, 0);
        assert!(card.is_base());
        assert_eq!(card.defense(), Some(5));
        assert!(card.is_outpost());
        assert!(!card.deployed);
    }
}
