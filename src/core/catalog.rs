//! Card-type catalog
//!
//! The catalog owns every `CardType` in the game behind shared `Arc`s and
//! knows how to expand the trade deck into the shuffle pool. Loaded once at
//! game creation and never mutated afterwards.

use crate::core::{CardKind, CardType, CardTypeId, Effect, Faction};
use crate::{EngineError, Result};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Well-known catalog ids for the three starter-adjacent types.
pub const SCOUT: CardTypeId = CardTypeId::new(1);
pub const VIPER: CardTypeId = CardTypeId::new(2);
pub const EXPLORER: CardTypeId = CardTypeId::new(3);

/// Owned set of card definitions plus the trade-deck composition.
pub struct CardCatalog {
    types: FxHashMap<CardTypeId, Arc<CardType>>,
    /// (type, copies) pairs making up the trade deck.
    trade_deck: Vec<(CardTypeId, u32)>,
}

impl CardCatalog {
    /// Build a catalog from explicit definitions. Validates spawn
    /// references: every spawn target must exist and must not itself spawn
    /// (which would allow unbounded spawn chains).
    pub fn new(types: Vec<CardType>, trade_deck: Vec<(CardTypeId, u32)>) -> Result<Self> {
        let types: FxHashMap<CardTypeId, Arc<CardType>> =
            types.into_iter().map(|t| (t.id, Arc::new(t))).collect();

        for ty in types.values() {
            for effect in ty.primary.iter().chain(&ty.ally).chain(&ty.scrap) {
                if let Effect::Spawn(target) = effect {
                    let target_ty = types.get(target).ok_or_else(|| {
                        EngineError::InvalidTarget(format!(
                            "{} spawns unknown card type {target}",
                            ty.name
                        ))
                    })?;
                    let nested = target_ty
                        .primary
                        .iter()
                        .chain(&target_ty.ally)
                        .chain(&target_ty.scrap)
                        .any(|e| matches!(e, Effect::Spawn(_)));
                    if nested {
                        return Err(EngineError::InvalidState(format!(
                            "spawn target {} may not itself spawn",
                            target_ty.name
                        )));
                    }
                }
            }
        }

        for (id, _) in &trade_deck {
            if !types.contains_key(id) {
                return Err(EngineError::InvalidTarget(format!(
                    "trade deck references unknown card type {id}"
                )));
            }
        }

        Ok(CardCatalog { types, trade_deck })
    }

    pub fn get(&self, id: CardTypeId) -> Option<&Arc<CardType>> {
        self.types.get(&id)
    }

    pub fn scout(&self) -> &Arc<CardType> {
        &self.types[&SCOUT]
    }

    pub fn viper(&self) -> &Arc<CardType> {
        &self.types[&VIPER]
    }

    pub fn explorer(&self) -> &Arc<CardType> {
        &self.types[&EXPLORER]
    }

    /// Expand the trade deck into the (unshuffled) pool of shared types.
    pub fn trade_pool(&self) -> Vec<Arc<CardType>> {
        let mut pool = Vec::new();
        for (id, count) in &self.trade_deck {
            for _ in 0..*count {
                pool.push(Arc::clone(&self.types[id]));
            }
        }
        pool
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The standard Symbeline Realms card set.
    pub fn standard() -> Self {
        use CardKind::*;
        use Effect::*;
        use Faction::*;

        let id = CardTypeId::new;

        let types = vec![
            // Starters and the always-available Explorer.
            CardType::new(SCOUT, "Scout", 0, Unaligned, Ship).primary(GainTrade(1)),
            CardType::new(VIPER, "Viper", 0, Unaligned, Ship).primary(GainCombat(1)),
            CardType::new(EXPLORER, "Explorer", 2, Unaligned, Ship)
                .primary(GainTrade(2))
                .scrap(GainCombat(2)),
            // Concord: authority and trade.
            CardType::new(id(10), "Envoy Sloop", 1, Concord, Ship)
                .primary(GainTrade(2))
                .ally(GainAuthority(3)),
            CardType::new(id(11), "Tithe Galleon", 3, Concord, Ship)
                .primary(GainTrade(2))
                .primary(GainAuthority(2))
                .ally(Draw(1)),
            CardType::new(id(12), "Concord Bastion", 4, Concord, Base)
                .base_stats(5, false)
                .primary(GainTrade(1))
                .ally(GainAuthority(2)),
            CardType::new(id(13), "Charter Flagship", 6, Concord, Ship)
                .primary(GainTrade(3))
                .primary(Draw(1))
                .ally(AcquireFree { max_cost: 4 }),
            CardType::new(id(14), "Haven Spire", 5, Concord, Base)
                .base_stats(6, false)
                .primary(GainAuthority(2))
                .ally(GainTrade(2)),
            CardType::new(id(15), "Pilgrim Barque", 2, Concord, Ship)
                .primary(GainAuthority(3))
                .primary(GainTrade(1))
                .ally(TopDeckNextPurchase),
            // Veil: disruption and deck-flow manipulation.
            CardType::new(id(20), "Veil Skiff", 1, Veil, Ship)
                .primary(GainCombat(2))
                .ally(OpponentDiscards(1)),
            CardType::new(id(21), "Shade Corsair", 3, Veil, Ship)
                .primary(GainCombat(4))
                .ally(FlowShiftDown(1)),
            CardType::new(id(22), "Umbral Spire", 4, Veil, Base)
                .base_stats(4, true)
                .primary(GainCombat(1))
                .ally(FlowShiftUp(1)),
            CardType::new(id(23), "Whisper Agent", 2, Veil, Ship)
                .primary(GainCombat(2))
                .primary(FlowShiftUp(1))
                .scrap(OpponentDiscards(1)),
            CardType::new(id(24), "Nightfall Raider", 5, Veil, Ship)
                .primary(GainCombat(6))
                .ally(DestroyTargetBase { optional: true }),
            CardType::new(id(25), "Mirror Wraith", 4, Veil, Ship).primary(CopyTargetShip),
            // Forge: scrapping and permanent upgrades.
            CardType::new(id(30), "Tinker Drone", 1, Forge, Unit)
                .primary(GainTrade(1))
                .scrap(GainCombat(2)),
            CardType::new(id(31), "Forge Automaton", 3, Forge, Ship)
                .primary(GainCombat(3))
                .primary(ScrapFromHandOrDiscard { optional: true })
                .ally(UpgradeAttack(1)),
            CardType::new(id(32), "Smeltyard", 5, Forge, Base)
                .base_stats(5, true)
                .primary(GainTrade(2))
                .scrap(GainTrade(2)),
            CardType::new(id(33), "Artificer Hall", 6, Forge, Base)
                .base_stats(6, false)
                .primary(UpgradeTrade(1))
                .ally(UpgradeAuthority(1)),
            CardType::new(id(34), "Reclaimer", 2, Forge, Ship)
                .primary(GainTrade(2))
                .primary(ScrapFromHand { optional: true })
                .ally(GainCombat(2)),
            CardType::new(id(35), "Salvage Rig", 4, Forge, Ship)
                .primary(GainTrade(2))
                .primary(TopDeckFromDiscard { optional: true })
                .ally(ScrapFromTradeRow { optional: true }),
            // Wilds: raw combat and spawning.
            CardType::new(id(40), "Feral Whelp", 1, Wilds, Ship)
                .primary(GainCombat(3))
                .scrap(GainCombat(1)),
            CardType::new(id(41), "Wolf Pup", 0, Wilds, Unit).primary(GainCombat(1)),
            CardType::new(id(42), "Packmother", 4, Wilds, Ship)
                .primary(GainCombat(4))
                .primary(Spawn(id(41)))
                .ally(Spawn(id(41))),
            CardType::new(id(43), "Den Mound", 3, Wilds, Base)
                .base_stats(4, false)
                .primary(GainCombat(1))
                .ally(GainCombat(2)),
            CardType::new(id(44), "Alpha Behemoth", 7, Wilds, Ship)
                .primary(GainCombat(7))
                .primary(Draw(1))
                .ally(GainCombat(3)),
        ];

        let trade_deck = vec![
            (id(10), 3),
            (id(11), 3),
            (id(12), 2),
            (id(13), 1),
            (id(14), 2),
            (id(15), 3),
            (id(20), 3),
            (id(21), 3),
            (id(22), 2),
            (id(23), 3),
            (id(24), 2),
            (id(25), 2),
            (id(30), 3),
            (id(31), 3),
            (id(32), 2),
            (id(33), 1),
            (id(34), 3),
            (id(35), 2),
            (id(40), 3),
            (id(42), 2),
            (id(43), 2),
            (id(44), 1),
        ];

        CardCatalog::new(types, trade_deck).expect("standard catalog is self-consistent")
    }
}
