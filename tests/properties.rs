//! Property tests for the flow tracker and zone-transfer invariants.

use proptest::prelude::*;
use symbeline_engine::core::{
    CardInstance, CardKind, CardType, CardTypeId, Faction, FlowTracker, InstanceId, Placement,
};
use symbeline_engine::zones::PlayerDeck;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::sync::Arc;

fn ship(n: u32) -> CardInstance {
    let ty = Arc::new(CardType::new(
        CardTypeId::new(n),
        format!("Ship {n}"),
        1,
        Faction::Unaligned,
        CardKind::Ship,
    ));
    CardInstance::new(InstanceId::new(n), ty, 0)
}

proptest! {
    /// Ten up-shifts are exactly one d4 step, regardless of where the d10
    /// starts within its cycle.
    #[test]
    fn ten_up_shifts_bump_d4_once(start in 0u8..100) {
        let mut flow = FlowTracker::new();
        flow.shift_up(start);
        let (d10, d4) = (flow.d10(), flow.d4());

        flow.shift_up(10);
        prop_assert_eq!(flow.d10(), d10);
        prop_assert_eq!(flow.d4(), d4 + 1);
    }

    /// Up and down shifts cancel exactly.
    #[test]
    fn shifts_round_trip(start in 0u8..50, steps in 0u8..50) {
        let mut flow = FlowTracker::new();
        flow.shift_up(start);
        let before = flow;

        flow.shift_up(steps);
        flow.shift_down(steps);
        prop_assert_eq!(flow, before);
    }

    /// The d10 stays within its face range through any shift sequence.
    #[test]
    fn d10_stays_on_the_die(ops in prop::collection::vec((any::<bool>(), 0u8..15), 0..40)) {
        let mut flow = FlowTracker::new();
        for (up, steps) in ops {
            if up {
                flow.shift_up(steps);
            } else {
                flow.shift_down(steps);
            }
            prop_assert!(flow.d10() <= 9);
        }
    }

    /// Draws, plays, and turn cleanup never create or destroy cards.
    #[test]
    fn zone_transfers_conserve_cards(
        seed in any::<u64>(),
        deck_size in 1usize..20,
        draws in 0usize..25,
        plays in 0usize..10,
    ) {
        let mut deck = PlayerDeck::new();
        for n in 0..deck_size {
            deck.draw_pile.add(ship(n as u32));
        }
        let mut rng = ChaCha12Rng::seed_from_u64(seed);

        for _ in 0..draws {
            deck.draw_top(&mut rng);
        }
        for _ in 0..plays {
            let id = deck.hand.iter().next().map(|c| c.instance_id);
            if let Some(id) = id {
                deck.play_from_hand(id, Placement::Frontier);
            }
        }
        deck.end_turn();

        prop_assert_eq!(deck.total_cards(), deck_size);
        prop_assert!(deck.hand.is_empty());
        prop_assert!(deck.played.is_empty());
    }

    /// An ordered draw of any permutation yields the same set of cards as
    /// drawing off the top, just in a different order.
    #[test]
    fn ordered_draw_is_a_permutation(seed in any::<u64>(), order in prop::collection::vec(0usize..5, 5)) {
        let build = || {
            let mut deck = PlayerDeck::new();
            for n in 0..5 {
                deck.draw_pile.add(ship(n));
            }
            deck
        };

        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        let mut ordered = build();
        let mut drawn = ordered.draw_ordered(&order, &mut rng);
        drawn.sort_by_key(|id| id.as_u32());

        let expected: Vec<InstanceId> = (0..5).map(InstanceId::new).collect();
        prop_assert_eq!(drawn, expected);
        prop_assert!(ordered.draw_pile.is_empty());
        prop_assert_eq!(ordered.hand.len(), 5);
    }
}
