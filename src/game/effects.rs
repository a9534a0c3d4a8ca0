//! Effect execution
//!
//! The effect engine is an exhaustive `match` over the `Effect` enum, so
//! every variant has a handler by construction. Immediate effects mutate the
//! game directly; choice effects queue a `PendingAction` and resolve later
//! through the explicit `resolve_*` calls (trigger now, resolve later).
//!
//! Effect-level soft failures (nothing to scrap, unknown spawn type, a
//! second choice while one is queued) are logged and skipped: one
//! misconfigured effect must not abort an otherwise-valid action.

use crate::core::{CardInstance, CardKind, Effect, InstanceId, PlayerId};
use crate::game::{GameEvent, PendingAction, ScrapZones, UpgradeKind};
use crate::game::state::Game;
use crate::{EngineError, Result};
use std::sync::Arc;

impl Game {
    /// Run a just-played card: upgrade bonuses, primary effects, then ally
    /// effects if another card of the faction was already played this turn.
    ///
    /// Ally rule (canonical): the faction bit is checked *before* this card
    /// registers, and set unconditionally after. Ally effects therefore fire
    /// on the second-and-later card of a faction, never the first, and a
    /// card already resolved is never retro-triggered.
    pub(crate) fn execute_card(&mut self, player: PlayerId, instance: InstanceId) -> Result<()> {
        let (ty, attack_bonus, trade_bonus, authority_bonus) = {
            let card = self
                .find_in_play(player, instance)
                .ok_or_else(|| EngineError::InvalidTarget(format!("card {instance} not in play")))?;
            (
                Arc::clone(&card.card_type),
                card.attack_bonus,
                card.trade_bonus,
                card.authority_bonus,
            )
        };

        {
            let p = self.player_mut(player)?;
            p.gain_combat(attack_bonus);
            p.gain_trade(trade_bonus);
            p.gain_authority(authority_bonus);
        }

        let ally_ready = self.player(player)?.faction_played(ty.faction);

        self.run_effects(player, instance, &ty.primary);

        if ally_ready && !ty.ally.is_empty() {
            self.emit(GameEvent::AllyTriggered { player, instance });
            self.run_effects(player, instance, &ty.ally);
        }

        self.player_mut(player)?.mark_faction_played(ty.faction);
        Ok(())
    }

    /// Run a card's scrap list as it permanently leaves the game, then drop
    /// the instance.
    pub(crate) fn execute_scrap(&mut self, owner: PlayerId, card: CardInstance) {
        let instance = card.instance_id;
        let ty = Arc::clone(&card.card_type);
        self.emit(GameEvent::CardScrapped { owner, instance });
        self.run_effects(owner, instance, &ty.scrap);
        // `card` drops here: the instance is gone from the game.
    }

    pub(crate) fn run_effects(&mut self, player: PlayerId, source: InstanceId, effects: &[Effect]) {
        for &effect in effects {
            match self.dispatch_effect(player, source, effect) {
                // Observers only hear about effects that actually applied.
                Ok(()) => self.emit(GameEvent::EffectApplied { player, source, effect }),
                Err(err) => {
                    // Soft failure by policy: log and continue with the action.
                    log::warn!("effect {effect:?} from card {source} skipped: {err}");
                }
            }
        }
    }

    fn dispatch_effect(
        &mut self,
        player: PlayerId,
        source: InstanceId,
        effect: Effect,
    ) -> Result<()> {
        match effect {
            Effect::GainAuthority(n) => self.player_mut(player)?.gain_authority(n),
            Effect::GainTrade(n) => self.player_mut(player)?.gain_trade(n),
            Effect::GainCombat(n) => self.player_mut(player)?.gain_combat(n),

            Effect::Draw(n) => {
                // The spent flag stops a card whose draw already auto-fired
                // from drawing again when played.
                let spent = self
                    .find_in_play_mut(player, source)
                    .map(|card| {
                        let was = card.draw_spent;
                        card.draw_spent = true;
                        was
                    })
                    // Source already left play (a scrap-list draw): the
                    // spent flag no longer applies, just draw.
                    .unwrap_or(false);
                if !spent {
                    self.draw_cards(player, n as u32);
                }
            }

            Effect::OpponentDiscards(n) => {
                let target = self.next_opponent(player);
                // Clamp to the target's hand: a mandatory pending that can
                // never be resolved would wedge the game.
                let remaining = (self.player(target)?.deck.hand.len() as u8).min(n);
                if remaining == 0 {
                    return Err(EngineError::InvalidTarget(
                        "opponent has no cards to discard".into(),
                    ));
                }
                self.enqueue_pending(PendingAction::Discard {
                    player: target,
                    remaining,
                })?;
            }

            Effect::ScrapFromHand { optional } => {
                self.queue_scrap(player, ScrapZones::Hand, optional)?
            }
            Effect::ScrapFromDiscard { optional } => {
                self.queue_scrap(player, ScrapZones::Discard, optional)?
            }
            Effect::ScrapFromHandOrDiscard { optional } => {
                self.queue_scrap(player, ScrapZones::HandOrDiscard, optional)?
            }
            Effect::ScrapFromTradeRow { optional } => {
                self.queue_scrap(player, ScrapZones::TradeRow, optional)?
            }

            Effect::FlowShiftUp(n) => self.player_mut(player)?.flow.shift_up(n),
            Effect::FlowShiftDown(n) => {
                for p in self.players.iter_mut().filter(|p| p.id != player) {
                    p.flow.shift_down(n);
                }
            }

            Effect::DestroyTargetBase { optional } => {
                let any_enemy_base = self
                    .players
                    .iter()
                    .any(|p| p.id != player && p.deck.has_bases());
                if !any_enemy_base {
                    return Err(EngineError::InvalidTarget("no enemy bases".into()));
                }
                self.enqueue_pending(PendingAction::DestroyBase { player, optional })?;
            }

            Effect::CopyTargetShip => {
                let has_other_ship = self
                    .player(player)?
                    .deck
                    .played
                    .iter()
                    .any(|c| c.instance_id != source && c.kind() == CardKind::Ship);
                if !has_other_ship {
                    return Err(EngineError::InvalidTarget("no played ship to copy".into()));
                }
                self.enqueue_pending(PendingAction::CopyShip { player, source })?;
            }

            Effect::AcquireFree { max_cost } => {
                self.player_mut(player)?.context.free_acquisition = Some(max_cost);
            }

            Effect::TopDeckNextPurchase => {
                self.player_mut(player)?.context.top_deck_next = true;
            }

            Effect::TopDeckFromDiscard { optional } => {
                if self.player(player)?.deck.discard.is_empty() {
                    return Err(EngineError::InvalidTarget("discard pile is empty".into()));
                }
                self.enqueue_pending(PendingAction::TopDeck { player, optional })?;
            }

            Effect::UpgradeAttack(n) => self.queue_upgrade(player, UpgradeKind::Attack, n)?,
            Effect::UpgradeTrade(n) => self.queue_upgrade(player, UpgradeKind::Trade, n)?,
            Effect::UpgradeAuthority(n) => self.queue_upgrade(player, UpgradeKind::Authority, n)?,

            Effect::Spawn(type_id) => {
                let ty = self
                    .catalog
                    .get(type_id)
                    .cloned()
                    .ok_or_else(|| EngineError::InvalidTarget(format!("unknown card type {type_id}")))?;
                let card = self.mint(&ty);
                let instance = card.instance_id;
                self.player_mut(player)?.deck.played.add(card);
                self.emit(GameEvent::CardPlayed {
                    player,
                    instance,
                    card_type: type_id,
                });
                // Spawned copies resolve like a played card. Catalog
                // validation forbids spawn targets that themselves spawn,
                // so this recursion is bounded.
                self.execute_card(player, instance)?;
            }
        }
        Ok(())
    }

    fn queue_scrap(&mut self, player: PlayerId, zones: ScrapZones, optional: bool) -> Result<()> {
        let deck = &self.player(player)?.deck;
        let has_target = match zones {
            ScrapZones::Hand => !deck.hand.is_empty(),
            ScrapZones::Discard => !deck.discard.is_empty(),
            ScrapZones::HandOrDiscard => !deck.hand.is_empty() || !deck.discard.is_empty(),
            ScrapZones::TradeRow => self.trade_row.slots().iter().any(|s| s.is_some()),
        };
        if !has_target {
            return Err(EngineError::InvalidTarget("nothing to scrap".into()));
        }
        self.enqueue_pending(PendingAction::Scrap {
            player,
            zones,
            optional,
        })
    }

    fn queue_upgrade(&mut self, player: PlayerId, kind: UpgradeKind, amount: u32) -> Result<()> {
        let deck = &self.player(player)?.deck;
        if deck.hand.is_empty() && deck.played.is_empty() {
            return Err(EngineError::InvalidTarget("no card to upgrade".into()));
        }
        self.enqueue_pending(PendingAction::Upgrade {
            player,
            kind,
            amount,
            optional: true,
        })
    }

    /// Locate a card in the player's played zone or either base tier.
    pub(crate) fn find_in_play(&self, player: PlayerId, id: InstanceId) -> Option<&CardInstance> {
        let deck = &self.players.get(player.index())?.deck;
        deck.played.get(id).or_else(|| deck.find_base(id))
    }

    pub(crate) fn find_in_play_mut(
        &mut self,
        player: PlayerId,
        id: InstanceId,
    ) -> Option<&mut CardInstance> {
        let deck = &mut self.players.get_mut(player.index())?.deck;
        if deck.played.contains(id) {
            deck.played.get_mut(id)
        } else {
            deck.find_base_mut(id)
        }
    }
}
