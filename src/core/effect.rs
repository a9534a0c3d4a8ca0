//! Card effects
//!
//! Effects are pure data; execution lives in `game::effects`. The enum is
//! exhaustive so the dispatch `match` is compiler-checked: adding a variant
//! without a handler is a compile error, never a silent no-op.

use crate::core::CardTypeId;
use serde::{Deserialize, Serialize};

/// One card effect. Carried in a card type's primary, ally, or scrap list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Gain authority. Example: "Gain 3 authority"
    GainAuthority(u32),

    /// Gain trade for this turn.
    GainTrade(u32),

    /// Gain combat for this turn.
    GainCombat(u32),

    /// Draw cards. Primary draw effects also participate in auto-draw
    /// chain resolution at turn start.
    Draw(u8),

    /// The next opponent in turn order must discard cards
    /// (queued as a pending action on that opponent).
    OpponentDiscards(u8),

    /// Choose a card in your hand to scrap.
    ScrapFromHand { optional: bool },

    /// Choose a card in your discard pile to scrap.
    ScrapFromDiscard { optional: bool },

    /// Choose a card in your hand or discard pile to scrap.
    ScrapFromHandOrDiscard { optional: bool },

    /// Choose a trade-row slot to cull.
    ScrapFromTradeRow { optional: bool },

    /// Shift your own deck-flow d10 upward.
    FlowShiftUp(u8),

    /// Shift every opponent's deck-flow d10 downward.
    FlowShiftDown(u8),

    /// Choose an enemy base to destroy.
    DestroyTargetBase { optional: bool },

    /// Choose one of your played ships and re-run its primary effects.
    CopyTargetShip,

    /// Your next ship acquisition up to `max_cost` is free.
    AcquireFree { max_cost: u32 },

    /// Your next acquisition goes to the top of your draw pile.
    TopDeckNextPurchase,

    /// Choose a card in your discard pile to put on top of your draw pile.
    TopDeckFromDiscard { optional: bool },

    /// Choose one of your cards and permanently raise its combat bonus.
    UpgradeAttack(u32),

    /// Choose one of your cards and permanently raise its trade bonus.
    UpgradeTrade(u32),

    /// Choose one of your cards and permanently raise its authority bonus.
    UpgradeAuthority(u32),

    /// Mint a fresh copy of the named card type directly into play.
    Spawn(CardTypeId),
}

impl Effect {
    /// Draw count if this is a draw effect.
    pub fn draw_count(&self) -> Option<u8> {
        match self {
            Effect::Draw(n) => Some(*n),
            _ => None,
        }
    }
}
