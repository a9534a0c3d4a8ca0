//! End-to-end turn scenarios against the standard catalog.

use symbeline_engine::core::{
    CardKind, CardType, CardTypeId, Faction, InstanceId, PlayerId, STARTING_AUTHORITY,
};
use symbeline_engine::game::{Action, EventLog, Game, GameEvent, Phase};
use symbeline_engine::EngineError;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

fn started_game(seed: u64) -> Game {
    let mut game = Game::new(&["Alice", "Bob"]).unwrap();
    game.seed_rng(seed);
    game.start().unwrap();
    game
}

#[test]
fn fresh_game_deals_starter_decks() {
    let game = started_game(1);

    for player in game.players() {
        assert_eq!(player.deck.total_cards(), 10);
        assert_eq!(player.authority, STARTING_AUTHORITY);
        let scouts = player
            .deck
            .draw_pile
            .iter()
            .filter(|c| c.name() == "Scout")
            .count();
        let vipers = player
            .deck
            .draw_pile
            .iter()
            .filter(|c| c.name() == "Viper")
            .count();
        assert_eq!(scouts, 8);
        assert_eq!(vipers, 2);
    }
}

#[test]
fn skip_draw_order_deals_five() {
    let mut game = started_game(2);
    let p0 = PlayerId::new(0);

    game.submit(p0, Action::SkipDrawOrder).unwrap();

    assert_eq!(game.phase(), Phase::Main);
    assert_eq!(game.player(p0).unwrap().deck.hand.len(), 5);
    assert_eq!(game.player(p0).unwrap().deck.draw_pile.len(), 5);
}

#[test]
fn buy_spends_trade_and_shifts_flow() {
    let mut game = started_game(3);
    let p0 = PlayerId::new(0);
    game.submit(p0, Action::SkipDrawOrder).unwrap();

    // Find (or force) a cost-3 card in the row, then pay for it exactly.
    let slot = game
        .trade_row()
        .slots()
        .iter()
        .position(|s| s.as_ref().map(|c| c.cost()) == Some(3));
    let (slot, cost) = match slot {
        Some(s) => (s, 3),
        None => (0, game.trade_row().slot(0).unwrap().cost()),
    };
    game.player_mut(p0).unwrap().trade = cost;

    game.submit(p0, Action::BuyCard { slot }).unwrap();

    let player = game.player(p0).unwrap();
    assert_eq!(player.trade, 0);
    assert_eq!(player.flow.d10(), 1);
    assert_eq!(player.deck.discard.len(), 1);
    // The slot refilled from the pool.
    assert!(game.trade_row().slot(slot).is_some());
}

#[test]
fn outpost_blocks_direct_attack() {
    let mut game = started_game(4);
    let p0 = PlayerId::new(0);
    let p1 = PlayerId::new(1);
    game.submit(p0, Action::SkipDrawOrder).unwrap();
    game.player_mut(p0).unwrap().combat = 10;

    // Hand the defender a deployed outpost.
    let ty = Arc::new(
        CardType::new(CardTypeId::new(800), "Test Outpost", 4, Faction::Forge, CardKind::Base)
            .base_stats(4, true),
    );
    let mut outpost = symbeline_engine::core::CardInstance::new(InstanceId::new(9000), ty, 0);
    outpost.deployed = true;
    game.player_mut(p1).unwrap().deck.frontier_bases.add(outpost);

    let err = game
        .submit(p0, Action::AttackPlayer { defender: p1, amount: 5 })
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidTarget(_)));

    // Clearing the outpost unblocks the player.
    game.submit(p0, Action::AttackBase { card_id: InstanceId::new(9000), amount: 4 })
        .unwrap();
    game.submit(p0, Action::AttackPlayer { defender: p1, amount: 5 })
        .unwrap();
    assert_eq!(game.player(p1).unwrap().authority, STARTING_AUTHORITY - 5);
}

#[test]
fn full_turn_cycle_returns_to_first_player() {
    let mut game = started_game(5);
    let p0 = PlayerId::new(0);
    let p1 = PlayerId::new(1);

    game.submit(p0, Action::SkipDrawOrder).unwrap();
    let hand: Vec<InstanceId> = game
        .player(p0)
        .unwrap()
        .deck
        .hand
        .iter()
        .map(|c| c.instance_id)
        .collect();
    for id in hand {
        game.submit(p0, Action::PlayCard { card_id: id, placement: None })
            .unwrap();
    }
    game.submit(p0, Action::EndTurn).unwrap();

    assert_eq!(game.active_player(), p1);
    assert_eq!(game.turn_number(), 1);
    // Played cards went to discard; the deck is intact.
    assert_eq!(game.player(p0).unwrap().deck.total_cards(), 10);
    assert_eq!(game.player(p0).unwrap().deck.discard.len(), 5);

    game.submit(p1, Action::SkipDrawOrder).unwrap();
    game.submit(p1, Action::EndTurn).unwrap();
    assert_eq!(game.active_player(), p0);
    assert_eq!(game.turn_number(), 2);
}

#[test]
fn second_turn_reshuffles_into_fresh_hands() {
    let mut game = started_game(6);
    let p0 = PlayerId::new(0);

    for _ in 0..2 {
        let active = game.active_player();
        game.submit(active, Action::SkipDrawOrder).unwrap();
        game.submit(active, Action::EndTurn).unwrap();
    }

    // Turn 2 for player 0: the second five come off the pile, and the
    // discarded first five reshuffle in as needed.
    game.submit(p0, Action::SkipDrawOrder).unwrap();
    assert_eq!(game.player(p0).unwrap().deck.hand.len(), 5);
    assert_eq!(game.player(p0).unwrap().deck.total_cards(), 10);
}

#[test]
fn observers_see_the_turn_in_order() {
    let log = Rc::new(RefCell::new(EventLog::default()));
    let mut game = started_game(7);
    game.add_observer(Box::new(Rc::clone(&log)));
    let p0 = PlayerId::new(0);

    game.submit(p0, Action::SkipDrawOrder).unwrap();
    let card = game.player(p0).unwrap().deck.hand.iter().next().unwrap().instance_id;
    game.submit(p0, Action::PlayCard { card_id: card, placement: None })
        .unwrap();
    game.submit(p0, Action::EndTurn).unwrap();

    let events = &log.borrow().events;
    let drawn_at = events
        .iter()
        .position(|e| matches!(e, GameEvent::CardsDrawn { .. }))
        .unwrap();
    let played_at = events
        .iter()
        .position(|e| matches!(e, GameEvent::CardPlayed { .. }))
        .unwrap();
    let next_turn_at = events
        .iter()
        .rposition(|e| matches!(e, GameEvent::TurnStarted { .. }))
        .unwrap();
    assert!(drawn_at < played_at);
    assert!(played_at < next_turn_at);
}

#[test]
fn game_over_freezes_the_engine() {
    let mut game = started_game(8);
    let p0 = PlayerId::new(0);
    let p1 = PlayerId::new(1);
    game.submit(p0, Action::SkipDrawOrder).unwrap();

    game.player_mut(p0).unwrap().combat = 100;
    game.player_mut(p1).unwrap().authority = 10;
    game.submit(p0, Action::AttackPlayer { defender: p1, amount: 10 })
        .unwrap();

    assert!(game.is_game_over());
    assert_eq!(game.winner(), Some(p0));
    assert_eq!(game.loser(), Some(p1));
    assert_eq!(game.player(p1).unwrap().authority, 0);

    assert!(game.submit(p0, Action::EndTurn).is_err());
    assert!(game.submit(p0, Action::BuyExplorer).is_err());
}
