//! Deferred player choices
//!
//! Choice effects cannot resolve inline (execution is synchronous, the
//! player is not). They queue a single `PendingAction`; main-phase actions
//! stay rejected until the named player resolves or skips it through the
//! explicit resolution API below.

use crate::core::{InstanceId, PlayerId};
use crate::game::state::Game;
use crate::game::GameEvent;
use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Zones a scrap choice may pull from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapZones {
    Hand,
    Discard,
    HandOrDiscard,
    TradeRow,
}

/// Which permanent bonus an upgrade choice grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    Attack,
    Trade,
    Authority,
}

/// One deferred choice awaiting input from `player()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "choice", rename_all = "snake_case")]
pub enum PendingAction {
    /// The player must discard `remaining` cards, one resolution at a time.
    Discard { player: PlayerId, remaining: u8 },

    /// Choose a card (or trade-row slot) to scrap.
    Scrap {
        player: PlayerId,
        zones: ScrapZones,
        optional: bool,
    },

    /// Choose a discard-pile card to put on top of the draw pile.
    TopDeck { player: PlayerId, optional: bool },

    /// Choose one of your cards to permanently upgrade.
    Upgrade {
        player: PlayerId,
        kind: UpgradeKind,
        amount: u32,
        optional: bool,
    },

    /// Choose one of your other played ships; its primary effects run
    /// again. `source` is the copying ship, which may not copy itself.
    CopyShip { player: PlayerId, source: InstanceId },

    /// Choose an enemy base to destroy.
    DestroyBase { player: PlayerId, optional: bool },
}

impl PendingAction {
    /// The player who must supply the choice.
    pub fn player(&self) -> PlayerId {
        match *self {
            PendingAction::Discard { player, .. }
            | PendingAction::Scrap { player, .. }
            | PendingAction::TopDeck { player, .. }
            | PendingAction::Upgrade { player, .. }
            | PendingAction::CopyShip { player, .. }
            | PendingAction::DestroyBase { player, .. } => player,
        }
    }

    /// May the choice be declined via `skip_pending_action`?
    pub fn is_optional(&self) -> bool {
        match *self {
            PendingAction::Discard { .. } => false,
            PendingAction::Scrap { optional, .. } => optional,
            PendingAction::TopDeck { optional, .. } => optional,
            PendingAction::Upgrade { optional, .. } => optional,
            // Copying is always declinable; there may be no ship worth it.
            PendingAction::CopyShip { .. } => true,
            PendingAction::DestroyBase { optional, .. } => optional,
        }
    }
}

impl Game {
    /// Validate that the outstanding pending action exists and belongs to
    /// `caller`, without consuming it.
    fn peek_pending(&self, caller: PlayerId) -> Result<&PendingAction> {
        let pending = self
            .pending
            .as_ref()
            .ok_or_else(|| EngineError::InvalidState("no pending action".into()))?;
        if pending.player() != caller {
            return Err(EngineError::InvalidState(format!(
                "pending action belongs to player {}",
                pending.player()
            )));
        }
        Ok(pending)
    }

    fn finish_pending(&mut self, player: PlayerId) {
        self.pending = None;
        self.emit(GameEvent::PendingResolved { player });
    }

    /// Discard one card toward an outstanding discard requirement.
    pub fn resolve_discard(&mut self, caller: PlayerId, card: InstanceId) -> Result<()> {
        let remaining = match *self.peek_pending(caller)? {
            PendingAction::Discard { remaining, .. } => remaining,
            _ => return Err(EngineError::InvalidState("pending action is not a discard".into())),
        };

        let deck = &mut self.player_mut(caller)?.deck;
        let removed = deck
            .hand
            .remove(card)
            .ok_or_else(|| EngineError::InvalidTarget(format!("card {card} not in hand")))?;
        deck.discard.add(removed);

        // Requirement shrinks if the hand empties first.
        let hand_left = self.player(caller)?.deck.hand.len() as u8;
        let remaining = (remaining - 1).min(hand_left);
        if remaining > 0 {
            self.pending = Some(PendingAction::Discard {
                player: caller,
                remaining,
            });
        } else {
            self.finish_pending(caller);
        }
        Ok(())
    }

    /// Scrap a hand card toward an outstanding scrap choice.
    pub fn resolve_scrap_hand(&mut self, caller: PlayerId, card: InstanceId) -> Result<()> {
        match *self.peek_pending(caller)? {
            PendingAction::Scrap { zones, .. }
                if matches!(zones, ScrapZones::Hand | ScrapZones::HandOrDiscard) => {}
            _ => {
                return Err(EngineError::InvalidState(
                    "pending action does not allow scrapping from hand".into(),
                ))
            }
        }

        let removed = self
            .player_mut(caller)?
            .deck
            .hand
            .remove(card)
            .ok_or_else(|| EngineError::InvalidTarget(format!("card {card} not in hand")))?;
        self.finish_pending(caller);
        self.execute_scrap(caller, removed);
        Ok(())
    }

    /// Scrap a discard-pile card toward an outstanding scrap choice.
    pub fn resolve_scrap_discard(&mut self, caller: PlayerId, card: InstanceId) -> Result<()> {
        match *self.peek_pending(caller)? {
            PendingAction::Scrap { zones, .. }
                if matches!(zones, ScrapZones::Discard | ScrapZones::HandOrDiscard) => {}
            _ => {
                return Err(EngineError::InvalidState(
                    "pending action does not allow scrapping from discard".into(),
                ))
            }
        }

        let removed = self
            .player_mut(caller)?
            .deck
            .discard
            .remove(card)
            .ok_or_else(|| EngineError::InvalidTarget(format!("card {card} not in discard")))?;
        self.finish_pending(caller);
        self.execute_scrap(caller, removed);
        Ok(())
    }

    /// Cull a trade-row slot toward an outstanding scrap choice. Trade-row
    /// cards were never owned, so their scrap lists do not fire.
    pub fn resolve_scrap_trade_row(&mut self, caller: PlayerId, slot: usize) -> Result<()> {
        match *self.peek_pending(caller)? {
            PendingAction::Scrap {
                zones: ScrapZones::TradeRow,
                ..
            } => {}
            _ => {
                return Err(EngineError::InvalidState(
                    "pending action does not allow scrapping the trade row".into(),
                ))
            }
        }

        let removed = self
            .trade_row
            .take_slot(slot)
            .ok_or_else(|| EngineError::InvalidTarget(format!("trade-row slot {slot} is empty")))?;
        let owner = caller;
        let instance = removed.instance_id;
        self.trade_row.fill_slots(&mut self.next_instance, &mut self.rng);
        self.emit(GameEvent::CardScrapped { owner, instance });
        self.finish_pending(caller);
        Ok(())
    }

    /// Put a discard-pile card on top of the draw pile.
    pub fn resolve_top_deck(&mut self, caller: PlayerId, card: InstanceId) -> Result<()> {
        match *self.peek_pending(caller)? {
            PendingAction::TopDeck { .. } => {}
            _ => return Err(EngineError::InvalidState("pending action is not a top-deck".into())),
        }

        let deck = &mut self.player_mut(caller)?.deck;
        let removed = deck
            .discard
            .remove(card)
            .ok_or_else(|| EngineError::InvalidTarget(format!("card {card} not in discard")))?;
        deck.draw_pile.insert_top(removed);
        self.finish_pending(caller);
        Ok(())
    }

    /// Apply an outstanding upgrade to one of the caller's hand or played
    /// cards.
    pub fn resolve_upgrade(&mut self, caller: PlayerId, card: InstanceId) -> Result<()> {
        let (kind, amount) = match *self.peek_pending(caller)? {
            PendingAction::Upgrade { kind, amount, .. } => (kind, amount),
            _ => return Err(EngineError::InvalidState("pending action is not an upgrade".into())),
        };

        let deck = &mut self.player_mut(caller)?.deck;
        let target = deck
            .hand
            .get_mut(card)
            .or_else(|| deck.played.get_mut(card))
            .ok_or_else(|| {
                EngineError::InvalidTarget(format!("card {card} not in hand or played"))
            })?;
        match kind {
            UpgradeKind::Attack => target.attack_bonus += amount,
            UpgradeKind::Trade => target.trade_bonus += amount,
            UpgradeKind::Authority => target.authority_bonus += amount,
        }
        // Upgraded art regenerates on the next shuffle.
        target.needs_regen = true;
        self.finish_pending(caller);
        Ok(())
    }

    /// Re-run the primary effects of one of the caller's played ships.
    /// The copying card is the effect source, so its own spent-draw flag
    /// governs any copied draw effect.
    pub fn resolve_copy_ship(&mut self, caller: PlayerId, card: InstanceId) -> Result<()> {
        let source = match *self.peek_pending(caller)? {
            PendingAction::CopyShip { source, .. } => source,
            _ => return Err(EngineError::InvalidState("pending action is not a ship copy".into())),
        };
        if card == source {
            return Err(EngineError::InvalidTarget(
                "a ship cannot copy itself".into(),
            ));
        }

        let ty = {
            let target = self
                .player(caller)?
                .deck
                .played
                .get(card)
                .ok_or_else(|| EngineError::InvalidTarget(format!("card {card} not played")))?;
            if target.kind() != crate::core::CardKind::Ship {
                return Err(EngineError::InvalidTarget(format!("card {card} is not a ship")));
            }
            Arc::clone(&target.card_type)
        };

        self.finish_pending(caller);
        self.run_effects(caller, card, &ty.primary);
        Ok(())
    }

    /// Destroy an enemy base chosen for an outstanding destroy-base effect.
    /// Unlike combat, the effect ignores placement tiers and outposts.
    pub fn resolve_destroy_base(&mut self, caller: PlayerId, card: InstanceId) -> Result<()> {
        match *self.peek_pending(caller)? {
            PendingAction::DestroyBase { .. } => {}
            _ => {
                return Err(EngineError::InvalidState(
                    "pending action is not a base destruction".into(),
                ))
            }
        }

        let owner = self
            .players
            .iter()
            .find(|p| p.id != caller && p.deck.find_base(card).is_some())
            .map(|p| p.id)
            .ok_or_else(|| EngineError::InvalidTarget(format!("no enemy base {card}")))?;

        let removed = self
            .player_mut(owner)?
            .deck
            .remove_base(card)
            .expect("base located above");
        self.emit(GameEvent::BaseDestroyed {
            owner,
            instance: removed.instance_id,
        });
        self.finish_pending(caller);
        self.execute_scrap(owner, removed);
        Ok(())
    }

    /// Decline an optional pending action.
    pub fn skip_pending_action(&mut self, caller: PlayerId) -> Result<()> {
        let pending = self.peek_pending(caller)?;
        if !pending.is_optional() {
            return Err(EngineError::InvalidState(
                "pending action is not optional".into(),
            ));
        }
        self.finish_pending(caller);
        Ok(())
    }
}
