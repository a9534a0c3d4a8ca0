//! Full-game playout throughput.
//!
//! Drives complete games with a greedy scripted bot: play everything, buy
//! Explorers, send all combat at the opponent. Measures the whole engine
//! path (draws, effect dispatch, trade row refills, event emission).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use symbeline_engine::core::{InstanceId, PlayerId};
use symbeline_engine::game::{Action, Game, PendingAction, Phase, ScrapZones};

const TURN_CAP: u32 = 500;

fn first_hand_card(game: &Game, player: PlayerId) -> Option<InstanceId> {
    game.player(player)
        .ok()?
        .deck
        .hand
        .iter()
        .next()
        .map(|c| c.instance_id)
}

fn resolve_pending(game: &mut Game) {
    while let Some(pending) = game.pending_action().copied() {
        let who = pending.player();
        if pending.is_optional() {
            game.skip_pending_action(who).unwrap();
            continue;
        }
        match pending {
            PendingAction::Discard { .. } => {
                let card = first_hand_card(game, who).expect("mandatory discard with a hand");
                game.resolve_discard(who, card).unwrap();
            }
            PendingAction::Scrap { zones, .. } => match zones {
                ScrapZones::Hand | ScrapZones::HandOrDiscard => {
                    let card = first_hand_card(game, who).expect("scrap target in hand");
                    game.resolve_scrap_hand(who, card).unwrap();
                }
                ScrapZones::Discard => {
                    let card = game
                        .player(who)
                        .unwrap()
                        .deck
                        .discard
                        .iter()
                        .next()
                        .map(|c| c.instance_id)
                        .expect("scrap target in discard");
                    game.resolve_scrap_discard(who, card).unwrap();
                }
                ScrapZones::TradeRow => {
                    let slot = game
                        .trade_row()
                        .slots()
                        .iter()
                        .position(|s| s.is_some())
                        .expect("filled trade-row slot");
                    game.resolve_scrap_trade_row(who, slot).unwrap();
                }
            },
            PendingAction::TopDeck { .. } => {
                let card = game
                    .player(who)
                    .unwrap()
                    .deck
                    .discard
                    .iter()
                    .next()
                    .map(|c| c.instance_id)
                    .expect("top-deck target in discard");
                game.resolve_top_deck(who, card).unwrap();
            }
            PendingAction::DestroyBase { .. } => {
                let target = game
                    .players()
                    .iter()
                    .filter(|p| p.id != who)
                    .flat_map(|p| {
                        p.deck
                            .frontier_bases
                            .iter()
                            .chain(p.deck.interior_bases.iter())
                    })
                    .map(|c| c.instance_id)
                    .next()
                    .expect("enemy base to destroy");
                game.resolve_destroy_base(who, target).unwrap();
            }
            // Queued as optional by construction; handled above.
            PendingAction::Upgrade { .. } | PendingAction::CopyShip { .. } => unreachable!(),
        }
    }
}

fn attack_with_everything(game: &mut Game, attacker: PlayerId, defender: PlayerId) {
    loop {
        let combat = game.player(attacker).unwrap().combat;
        if combat == 0 || game.is_game_over() {
            return;
        }
        let deck = &game.player(defender).unwrap().deck;
        let tier = if deck.frontier_bases.is_empty() {
            &deck.interior_bases
        } else {
            &deck.frontier_bases
        };
        let target = tier
            .iter()
            .find(|c| c.is_outpost())
            .or_else(|| tier.iter().next())
            .map(|c| c.instance_id);
        match target {
            Some(card_id) => {
                game.submit(attacker, Action::AttackBase { card_id, amount: combat })
                    .unwrap();
            }
            None => {
                game.submit(attacker, Action::AttackPlayer { defender, amount: combat })
                    .unwrap();
                return;
            }
        }
    }
}

/// Play one full game; returns the number of turns it took.
fn playout(seed: u64) -> u32 {
    let mut game = Game::new(&["North", "South"]).unwrap();
    game.seed_rng(seed);
    game.start().unwrap();

    while !game.is_game_over() && game.turn_number() < TURN_CAP {
        let active = game.active_player();
        if game.phase() == Phase::DrawOrder {
            game.skip_draw_order(active).unwrap();
            resolve_pending(&mut game);
        }

        while let Some(card_id) = first_hand_card(&game, active) {
            game.submit(active, Action::PlayCard { card_id, placement: None })
                .unwrap();
            resolve_pending(&mut game);
            if game.is_game_over() {
                return game.turn_number();
            }
        }

        while game.player(active).unwrap().trade >= game.trade_row().explorer_cost() {
            game.submit(active, Action::BuyExplorer).unwrap();
        }

        let defender = game.next_opponent(active);
        attack_with_everything(&mut game, active, defender);
        if game.is_game_over() {
            break;
        }
        game.submit(active, Action::EndTurn).unwrap();
    }
    game.turn_number()
}

fn bench_playout(c: &mut Criterion) {
    c.bench_function("full_playout", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(playout(black_box(seed)))
        })
    });

    c.bench_function("playout_fixed_seed", |b| b.iter(|| playout(black_box(42))));
}

criterion_group!(benches, bench_playout);
criterion_main!(benches);
