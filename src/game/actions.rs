//! Player-facing actions
//!
//! Every externally driven mutation funnels through `Game::submit`, which
//! validates the caller and the phase before touching state. Handlers follow
//! a strict validate-then-mutate shape: all checks complete before the first
//! mutation, so a rejected action leaves the game untouched.

use crate::core::{CardKind, InstanceId, Placement, PlayerId};
use crate::game::state::Game;
use crate::game::{GameEvent, Phase};
use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// One submitted player action. The serde layout is the engine's external
/// command format: `{"type": "play_card", "card_id": 7}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Play a hand card. `placement` picks the tier for bases and is
    /// ignored for ships and units.
    PlayCard {
        card_id: InstanceId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placement: Option<Placement>,
    },

    /// Buy the card in a trade-row slot.
    BuyCard { slot: usize },

    /// Buy an Explorer from the unlimited side stack.
    BuyExplorer,

    /// Spend combat on an opponent's authority.
    AttackPlayer { defender: PlayerId, amount: u32 },

    /// Spend combat on an opponent's base.
    AttackBase { card_id: InstanceId, amount: u32 },

    /// Voluntarily scrap a card from hand (shifts deck flow down).
    ScrapHand { card_id: InstanceId },

    /// Voluntarily scrap a card from the discard pile (shifts flow down).
    ScrapDiscard { card_id: InstanceId },

    /// Cull a trade-row slot without buying it (no flow shift).
    ScrapTradeRow { slot: usize },

    /// End the turn and pass to the next player.
    EndTurn,

    /// Supply the draw-order permutation for the turn's opening draw.
    ChooseDrawOrder { order: Vec<usize> },

    /// Decline to order the opening draw; cards come off the top.
    SkipDrawOrder,
}

impl Game {
    /// Validate and apply one action on behalf of `player`.
    pub fn submit(&mut self, player: PlayerId, action: Action) -> Result<()> {
        match action {
            Action::PlayCard { card_id, placement } => self.play_card(player, card_id, placement),
            Action::BuyCard { slot } => self.buy_card(player, slot),
            Action::BuyExplorer => self.buy_explorer(player),
            Action::AttackPlayer { defender, amount } => {
                self.attack_player(player, defender, amount)
            }
            Action::AttackBase { card_id, amount } => self.attack_base(player, card_id, amount),
            Action::ScrapHand { card_id } => self.scrap_hand(player, card_id),
            Action::ScrapDiscard { card_id } => self.scrap_discard(player, card_id),
            Action::ScrapTradeRow { slot } => self.scrap_trade_row(player, slot),
            Action::EndTurn => self.end_turn(player),
            Action::ChooseDrawOrder { order } => self.choose_draw_order(player, &order),
            Action::SkipDrawOrder => self.skip_draw_order(player),
        }
    }

    /// Main-phase gate shared by every ordinary action: the game must be in
    /// the main phase, the caller must be the active player, and no
    /// deferred choice may be outstanding.
    fn require_main(&self, player: PlayerId) -> Result<()> {
        if !self.phase.is_main() {
            return Err(EngineError::InvalidState(format!(
                "not in the main phase (currently {:?})",
                self.phase
            )));
        }
        if player != self.active_player() {
            return Err(EngineError::InvalidState(format!(
                "player {player} is not the active player"
            )));
        }
        if self.pending.is_some() {
            return Err(EngineError::InvalidState(
                "a pending action must be resolved first".into(),
            ));
        }
        Ok(())
    }

    fn require_draw_order(&self, player: PlayerId) -> Result<()> {
        if self.phase != Phase::DrawOrder {
            return Err(EngineError::InvalidState(format!(
                "not awaiting a draw order (currently {:?})",
                self.phase
            )));
        }
        if player != self.active_player() {
            return Err(EngineError::InvalidState(format!(
                "player {player} is not the active player"
            )));
        }
        Ok(())
    }

    /// Draw the turn's opening hand in a caller-chosen pile order. The
    /// order must be an exact permutation of `0..expected_draws`.
    pub fn choose_draw_order(&mut self, player: PlayerId, order: &[usize]) -> Result<()> {
        self.require_draw_order(player)?;

        let expected = self.expected_draws;
        let mut seen = vec![false; expected];
        if order.len() != expected {
            return Err(EngineError::InvalidTarget(format!(
                "draw order names {} positions, expected {expected}",
                order.len()
            )));
        }
        for &pos in order {
            if pos >= expected || seen[pos] {
                return Err(EngineError::InvalidTarget(format!(
                    "draw order is not a permutation of 0..{expected}"
                )));
            }
            seen[pos] = true;
        }

        let idx = player.index();
        let drawn = self.players[idx].deck.draw_ordered(order, &mut self.rng);
        if !drawn.is_empty() {
            self.emit(GameEvent::CardsDrawn {
                player,
                count: drawn.len() as u32,
            });
        }
        self.phase = Phase::Main;
        self.resolve_auto_draws(player)?;
        Ok(())
    }

    /// Take the opening hand straight off the top of the pile.
    pub fn skip_draw_order(&mut self, player: PlayerId) -> Result<()> {
        self.require_draw_order(player)?;
        let expected = self.expected_draws as u32;
        self.draw_cards(player, expected);
        self.phase = Phase::Main;
        self.resolve_auto_draws(player)?;
        Ok(())
    }

    /// Play a card from hand, running its effects.
    pub fn play_card(
        &mut self,
        player: PlayerId,
        card_id: InstanceId,
        placement: Option<Placement>,
    ) -> Result<()> {
        self.require_main(player)?;
        self.require_in_hand(player, card_id)?;

        let placement = placement.unwrap_or(Placement::Frontier);
        let idx = player.index();
        self.players[idx]
            .deck
            .play_from_hand(card_id, placement)
            .ok_or_else(|| EngineError::InvalidTarget(format!("card {card_id} not in hand")))?;

        let card_type = self
            .find_in_play(player, card_id)
            .map(|c| c.type_id())
            .ok_or_else(|| EngineError::InvalidState(format!("card {card_id} vanished in play")))?;
        self.emit(GameEvent::CardPlayed {
            player,
            instance: card_id,
            card_type,
        });

        self.execute_card(player, card_id)?;
        // Effects may have drawn fresh auto-draw cards into hand.
        self.resolve_auto_draws(player)?;
        Ok(())
    }

    /// Pay for an acquisition: consume an outstanding free-ship grant if
    /// the card is a ship within the grant's cost, otherwise spend trade.
    fn pay_for(&mut self, player: PlayerId, cost: u32, kind: CardKind) -> Result<()> {
        let ctx = &self.players[player.index()].context;
        if kind == CardKind::Ship && matches!(ctx.free_acquisition, Some(max) if cost <= max) {
            self.players[player.index()].context.free_acquisition = None;
            return Ok(());
        }

        let available = self.players[player.index()].trade;
        if available < cost {
            return Err(EngineError::ResourceInsufficient {
                resource: "trade",
                needed: cost,
                available,
            });
        }
        self.players[player.index()].trade -= cost;
        Ok(())
    }

    /// Deliver a bought card: top of the draw pile if a top-deck grant is
    /// outstanding (consumed), otherwise the discard pile.
    fn deliver_purchase(&mut self, player: PlayerId, card: crate::core::CardInstance) {
        let idx = player.index();
        if self.players[idx].context.top_deck_next {
            self.players[idx].context.top_deck_next = false;
            self.players[idx].deck.draw_pile.insert_top(card);
        } else {
            self.players[idx].deck.discard.add(card);
        }
    }

    /// Buy the card in a trade-row slot. Buying shifts deck flow up one.
    pub fn buy_card(&mut self, player: PlayerId, slot: usize) -> Result<()> {
        self.require_main(player)?;

        let (cost, kind) = self
            .trade_row
            .slot(slot)
            .map(|c| (c.cost(), c.kind()))
            .ok_or_else(|| EngineError::InvalidTarget(format!("trade-row slot {slot} is empty")))?;
        self.pay_for(player, cost, kind)?;

        let card = self
            .trade_row
            .take_slot(slot)
            .expect("slot checked above");
        let card_type = card.type_id();
        self.deliver_purchase(player, card);
        self.players[player.index()].flow.shift_up(1);
        self.trade_row.fill_slots(&mut self.next_instance, &mut self.rng);

        self.emit(GameEvent::CardPurchased { player, card_type });
        Ok(())
    }

    /// Buy an Explorer. Explorers never deplete; the trade row is untouched.
    pub fn buy_explorer(&mut self, player: PlayerId) -> Result<()> {
        self.require_main(player)?;

        let cost = self.trade_row.explorer_cost();
        let kind = self.trade_row.explorer().kind;
        self.pay_for(player, cost, kind)?;

        let card = self
            .trade_row
            .mint_explorer(&mut self.next_instance, &mut self.rng);
        self.deliver_purchase(player, card);
        self.players[player.index()].flow.shift_up(1);

        self.emit(GameEvent::ExplorerPurchased { player });
        Ok(())
    }

    /// Spend combat directly on an opponent's authority. Blocked entirely
    /// while the defender has any base in play.
    pub fn attack_player(
        &mut self,
        attacker: PlayerId,
        defender: PlayerId,
        amount: u32,
    ) -> Result<()> {
        self.require_main(attacker)?;
        if defender == attacker {
            return Err(EngineError::InvalidTarget("cannot attack yourself".into()));
        }
        let defender_ref = self.player(defender)?;
        if defender_ref.deck.has_bases() {
            return Err(EngineError::InvalidTarget(format!(
                "player {defender} is shielded by bases"
            )));
        }

        let available = self.players[attacker.index()].combat;
        if available < amount {
            return Err(EngineError::ResourceInsufficient {
                resource: "combat",
                needed: amount,
                available,
            });
        }

        self.players[attacker.index()].combat -= amount;
        let dead = self.players[defender.index()].take_damage(amount);
        self.emit(GameEvent::PlayerAttacked {
            attacker,
            defender,
            amount,
        });
        if dead {
            self.mark_game_over(attacker, defender);
        }
        Ok(())
    }

    /// Spend combat on an enemy base. Frontier bases shield interior ones,
    /// and outposts within the reachable tier must fall first.
    pub fn attack_base(&mut self, attacker: PlayerId, card_id: InstanceId, amount: u32) -> Result<()> {
        self.require_main(attacker)?;

        let owner = self
            .players
            .iter()
            .find(|p| p.id != attacker && p.deck.find_base(card_id).is_some())
            .map(|p| p.id)
            .ok_or_else(|| EngineError::InvalidTarget(format!("no enemy base {card_id}")))?;

        {
            let deck = &self.players[owner.index()].deck;
            let reachable = if deck.frontier_bases.is_empty() {
                &deck.interior_bases
            } else {
                &deck.frontier_bases
            };
            let target = reachable.get(card_id).ok_or_else(|| {
                EngineError::InvalidTarget(format!(
                    "base {card_id} is shielded by the frontier tier"
                ))
            })?;
            if !target.is_outpost() && reachable.iter().any(|c| c.is_outpost()) {
                return Err(EngineError::InvalidTarget(format!(
                    "base {card_id} is shielded by an outpost"
                )));
            }
        }

        let available = self.players[attacker.index()].combat;
        if available < amount {
            return Err(EngineError::ResourceInsufficient {
                resource: "combat",
                needed: amount,
                available,
            });
        }
        self.players[attacker.index()].combat -= amount;

        let destroyed = {
            let base = self.players[owner.index()]
                .deck
                .find_base_mut(card_id)
                .expect("base located above");
            base.damage_taken += amount;
            base.damage_taken >= base.defense().unwrap_or(0)
        };

        if destroyed {
            let removed = self.players[owner.index()]
                .deck
                .remove_base(card_id)
                .expect("base located above");
            self.emit(GameEvent::BaseDestroyed {
                owner,
                instance: removed.instance_id,
            });
            self.execute_scrap(owner, removed);
        }
        Ok(())
    }

    /// Voluntarily scrap a hand card, thinning the deck. Shifts flow down.
    pub fn scrap_hand(&mut self, player: PlayerId, card_id: InstanceId) -> Result<()> {
        self.require_main(player)?;
        let removed = self.players[player.index()]
            .deck
            .hand
            .remove(card_id)
            .ok_or_else(|| EngineError::InvalidTarget(format!("card {card_id} not in hand")))?;
        self.players[player.index()].flow.shift_down(1);
        self.execute_scrap(player, removed);
        Ok(())
    }

    /// Voluntarily scrap a discard-pile card. Shifts flow down.
    pub fn scrap_discard(&mut self, player: PlayerId, card_id: InstanceId) -> Result<()> {
        self.require_main(player)?;
        let removed = self.players[player.index()]
            .deck
            .discard
            .remove(card_id)
            .ok_or_else(|| EngineError::InvalidTarget(format!("card {card_id} not in discard")))?;
        self.players[player.index()].flow.shift_down(1);
        self.execute_scrap(player, removed);
        Ok(())
    }

    /// Cull a trade-row card without buying it. The row refills; the
    /// culled card was never owned, so deck flow is unaffected.
    pub fn scrap_trade_row(&mut self, player: PlayerId, slot: usize) -> Result<()> {
        self.require_main(player)?;
        let removed = self
            .trade_row
            .take_slot(slot)
            .ok_or_else(|| EngineError::InvalidTarget(format!("trade-row slot {slot} is empty")))?;
        let instance = removed.instance_id;
        self.trade_row.fill_slots(&mut self.next_instance, &mut self.rng);
        self.emit(GameEvent::CardScrapped {
            owner: player,
            instance,
        });
        Ok(())
    }

    /// End the turn: discard hand and played cards, pass to the next
    /// player, and enter their draw-order phase.
    pub fn end_turn(&mut self, player: PlayerId) -> Result<()> {
        self.require_main(player)?;

        self.players[player.index()].deck.end_turn();
        self.active_idx = (self.active_idx + 1) % self.players.len();
        if self.active_idx == 0 {
            self.turn_number += 1;
        }
        self.enter_draw_order();
        Ok(())
    }
}
