//! The trade-row marketplace
//!
//! Five slots refilled lazily from a pre-shuffled pool of card types, plus
//! the always-available Explorer. An optional `SlotSelector` strategy (the
//! "DM override") gets first pick whenever a slot refills; its choice is
//! honored only if the picked type is still in the pool, so exhaustion
//! bookkeeping stays exact either way.

use crate::core::{CardInstance, CardType, CardTypeId, InstanceId};
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use std::fmt;
use std::sync::Arc;

/// Number of marketplace slots.
pub const TRADE_ROW_SLOTS: usize = 5;

/// External selection hook consulted before default pool order.
///
/// `pool` is the remaining draw pool, top last. Returning `None` (or a type
/// absent from the pool) falls through to default selection.
pub trait SlotSelector {
    fn select(&mut self, pool: &[Arc<CardType>], slot: usize) -> Option<CardTypeId>;
}

/// The 5-slot marketplace.
pub struct TradeRow {
    slots: [Option<CardInstance>; TRADE_ROW_SLOTS],
    /// Remaining shuffled pool; the top is the last element.
    pool: Vec<Arc<CardType>>,
    explorer: Arc<CardType>,
    selector: Option<Box<dyn SlotSelector>>,
}

impl fmt::Debug for TradeRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TradeRow")
            .field("slots", &self.slots)
            .field("pool_len", &self.pool.len())
            .field("has_selector", &self.selector.is_some())
            .finish()
    }
}

impl TradeRow {
    /// Build a trade row over an (already shuffled) pool.
    pub fn new(pool: Vec<Arc<CardType>>, explorer: Arc<CardType>) -> Self {
        TradeRow {
            slots: Default::default(),
            pool,
            explorer,
            selector: None,
        }
    }

    pub fn set_selector(&mut self, selector: Box<dyn SlotSelector>) {
        self.selector = Some(selector);
    }

    pub fn shuffle_pool(&mut self, rng: &mut ChaCha12Rng) {
        use rand::seq::SliceRandom;
        self.pool.shuffle(rng);
    }

    pub fn slot(&self, index: usize) -> Option<&CardInstance> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    pub fn slots(&self) -> &[Option<CardInstance>; TRADE_ROW_SLOTS] {
        &self.slots
    }

    pub fn pool_remaining(&self) -> usize {
        self.pool.len()
    }

    pub fn explorer(&self) -> &Arc<CardType> {
        &self.explorer
    }

    pub fn explorer_cost(&self) -> u32 {
        self.explorer.cost
    }

    /// Take the card out of a slot without refilling. Caller refills.
    pub fn take_slot(&mut self, index: usize) -> Option<CardInstance> {
        self.slots.get_mut(index).and_then(|s| s.take())
    }

    /// Pick the next type for a refilling slot: selector hook first (only
    /// honored for picks still present in the pool, spliced out to keep
    /// exhaustion bookkeeping exact), then the top of the shuffled pool.
    fn select_next(&mut self, slot: usize) -> Option<Arc<CardType>> {
        if let Some(selector) = self.selector.as_mut() {
            if let Some(pick) = selector.select(&self.pool, slot) {
                if let Some(pos) = self.pool.iter().position(|t| t.id == pick) {
                    return Some(self.pool.remove(pos));
                }
                // Pick not in pool: fall through to default selection.
            }
        }
        self.pool.pop()
    }

    /// Refill every empty slot. Slots stay empty once the pool runs dry —
    /// the row never duplicates types to paper over exhaustion.
    pub fn fill_slots(&mut self, next_instance: &mut u32, rng: &mut ChaCha12Rng) {
        for slot in 0..TRADE_ROW_SLOTS {
            if self.slots[slot].is_none() {
                if let Some(ty) = self.select_next(slot) {
                    self.slots[slot] = Some(mint(ty, next_instance, rng));
                }
            }
        }
    }

    /// Mint a fresh Explorer. Explorers bypass the pool entirely.
    pub fn mint_explorer(&mut self, next_instance: &mut u32, rng: &mut ChaCha12Rng) -> CardInstance {
        mint(Arc::clone(&self.explorer), next_instance, rng)
    }
}

fn mint(ty: Arc<CardType>, next_instance: &mut u32, rng: &mut ChaCha12Rng) -> CardInstance {
    let id = InstanceId::new(*next_instance);
    *next_instance += 1;
    CardInstance::new(id, ty, rng.gen())
}
