//! # Carousel Verification Tests
//!
//! End-to-end runs on the simulated host:
//!
//! 1. **Rotation**: order after k sequences is identity rotated by k mod N
//! 2. **Hover**: pause freezes the sequence in flight, resume continues it
//! 3. **Exclusivity**: no interleaving of events ever runs two sequences
//! 4. **Inert decks**: zero or one card never sequences
//!
//! Run with: cargo test --package cardswap --test carousel_verification

use std::time::Duration;

use cardswap::{
    init_card_swap, CycleState, HostEvent, SimCarousel, SimEngine, SimTimers, TimerHandle,
};
use cardswap_core::{CardId, CardSwapOptions, SequenceId, SlotGeometry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FRAME: Duration = Duration::from_millis(10);

fn carousel(cards: usize, options: &CardSwapOptions) -> SimCarousel {
    let deck: Vec<u32> = (0..cards as u32).collect();
    init_card_swap(Some(&deck), Some(SimEngine::new(cards)), SimTimers::new(), options)
        .expect("carousel should start")
}

fn run(c: &mut SimCarousel, millis: u64) {
    c.run_for(Duration::from_millis(millis), FRAME);
}

fn order(c: &SimCarousel) -> Vec<u32> {
    c.queue().order().map(|card| card.0).collect()
}

fn active_id(c: &SimCarousel) -> Option<SequenceId> {
    c.active_sequence().map(|h| h.id())
}

// ============================================================================
// SCENARIO: FOUR CARDS WITH A HOVER IN THE MIDDLE OF THE SECOND SEQUENCE
// ============================================================================

#[test]
fn verify_four_card_cycle_with_hover() {
    let mut c = carousel(4, &CardSwapOptions::new());
    assert_eq!(order(&c), vec![0, 1, 2, 3]);
    assert_eq!(c.engine().played(), &[SequenceId(1)]);

    // Elastic sequence commits at 2.5s.
    run(&mut c, 2600);
    assert_eq!(order(&c), vec![1, 2, 3, 0]);
    assert_eq!(active_id(&c), None);

    // First timer fire at 5s starts the second sequence.
    run(&mut c, 2400);
    assert_eq!(c.engine().played(), &[SequenceId(1), SequenceId(2)]);
    assert_eq!(active_id(&c), Some(SequenceId(2)));

    // Hover one second into the second sequence.
    run(&mut c, 1000);
    c.handle(HostEvent::PointerEnter);
    assert_eq!(c.state(), CycleState::Paused);
    assert!(c.armed_timer().is_none());
    assert_eq!(c.timers().armed(), 0);
    assert!(c.engine().is_paused(SequenceId(2)));

    let playhead = c.engine().playhead(SequenceId(2));
    let frozen = *c.engine().card(CardId(1)).unwrap();

    // Repeated hover changes nothing.
    c.handle(HostEvent::PointerEnter);
    assert_eq!(c.state(), CycleState::Paused);

    run(&mut c, 10000);
    assert_eq!(order(&c), vec![1, 2, 3, 0]);
    assert_eq!(c.engine().playhead(SequenceId(2)), playhead);
    assert_eq!(*c.engine().card(CardId(1)).unwrap(), frozen);
    assert_eq!(c.engine().played().len(), 2);

    // Leave: same sequence continues, timer re-armed, nothing new issued.
    c.handle(HostEvent::PointerLeave);
    assert_eq!(c.state(), CycleState::Running);
    assert!(c.armed_timer().is_some());
    assert_eq!(c.timers().armed(), 1);
    assert_eq!(active_id(&c), Some(SequenceId(2)));
    assert_eq!(c.engine().played().len(), 2);

    // 1.5s of the second sequence were left.
    run(&mut c, 1600);
    assert_eq!(order(&c), vec![2, 3, 0, 1]);
    assert_eq!(c.engine().played().len(), 2);

    // Fresh timer fires one full period after the leave.
    run(&mut c, 3500);
    assert_eq!(c.engine().played().len(), 3);
}

// ============================================================================
// ROTATION PROPERTY
// ============================================================================

#[test]
fn verify_order_is_rotated_identity() {
    for cards in 2..7usize {
        let options = CardSwapOptions::new().with_easing("linear").with_delay_ms(2000);
        let mut c = carousel(cards, &options);
        let mut seen = 0;

        for _ in 0..(2000 * cards) {
            c.advance(FRAME);
            let k = c.queue().rotations();
            if k != seen {
                seen = k;
                let expected: Vec<u32> =
                    (0..cards).map(|i| ((i + k as usize) % cards) as u32).collect();
                assert_eq!(order(&c), expected, "cards={cards} k={k}");
            }
        }
        // 20s per card at one rotation every 2s.
        assert!(seen >= 10 * cards as u64 - 1, "cards={cards} rotations={seen}");
    }
}

#[test]
fn verify_cards_land_in_rotated_slots() {
    let geometry = SlotGeometry::new(70.0, 55.0, 4);
    let mut c = carousel(4, &CardSwapOptions::new());
    run(&mut c, 3000);

    for (rank, card) in c.queue().order().enumerate() {
        let state = c.engine().card(card).unwrap();
        let slot = geometry.slot(rank);
        assert!((state.x - slot.x).abs() < 1e-2, "{card} x");
        assert!((state.y - slot.y).abs() < 1e-2, "{card} y");
        assert!((state.z - slot.z).abs() < 1e-2, "{card} z");
        assert_eq!(state.stack_order, slot.stack_order, "{card} stack");
        // Skew comes from the initial placement only.
        assert!((state.skew_y - 6.0).abs() < 1e-6);
    }
}

#[test]
fn verify_linear_profile_is_faster() {
    let mut c = carousel(4, &CardSwapOptions::new().with_easing("linear"));

    // Linear sequence for four cards commits at 1.54s.
    run(&mut c, 1500);
    assert_eq!(c.queue().rotations(), 0);
    run(&mut c, 100);
    assert_eq!(c.queue().rotations(), 1);
}

// ============================================================================
// EXCLUSIVITY UNDER RANDOM INTERLEAVINGS
// ============================================================================

#[test]
fn verify_at_most_one_sequence() {
    let mut rng = StdRng::seed_from_u64(0x00CA_4D5E);

    for round in 0..20 {
        let delay = [300u64, 1000, 1500, 5000][round % 4];
        let easing = if round % 2 == 0 { "elastic" } else { "linear" };
        let options = CardSwapOptions::new().with_delay_ms(delay).with_easing(easing);
        let mut c = carousel(2 + round % 5, &options);

        for _ in 0..3000 {
            match rng.gen_range(0..100) {
                0..=2 => c.handle(HostEvent::PointerEnter),
                3..=5 => c.handle(HostEvent::PointerLeave),
                // Stale and foreign timer handles must be harmless.
                6 => c.handle(HostEvent::TimerFired(TimerHandle(rng.gen_range(0..5)))),
                _ => c.advance(FRAME),
            }

            assert!(c.engine().progressing() <= 1, "round {round}");
            assert!(c.engine().in_flight() <= 1, "round {round}");
            assert!(c.timers().armed() <= 1, "round {round}");
            if c.state() == CycleState::Paused {
                assert_eq!(c.timers().armed(), 0, "round {round}");
                assert_eq!(c.engine().progressing(), 0, "round {round}");
            }
        }
    }
}

#[test]
fn verify_frame_size_does_not_change_outcome() {
    // Linear, 4 cards: commits 1.54s after each start. Fires at 1.5s and
    // 4.5s land while a sequence is in flight and must be dropped.
    let options = CardSwapOptions::new().with_easing("linear").with_delay_ms(1500);

    for millis in [10u64, 200, 750, 2000] {
        let frame = Duration::from_millis(millis);
        let mut c = carousel(4, &options);

        c.run_for(Duration::from_millis(2000), frame);
        assert_eq!(c.engine().played(), &[SequenceId(1)], "frame {millis}ms");
        assert_eq!(c.queue().rotations(), 1, "frame {millis}ms");

        c.run_for(Duration::from_millis(4200), frame);
        assert_eq!(
            c.engine().played(),
            &[SequenceId(1), SequenceId(2), SequenceId(3)],
            "frame {millis}ms"
        );
        assert_eq!(c.queue().rotations(), 2, "frame {millis}ms");
        assert_eq!(order(&c), vec![2, 3, 0, 1], "frame {millis}ms");
    }
}

#[test]
fn verify_hover_ignored_when_disabled() {
    let mut c = carousel(3, &CardSwapOptions::new().with_pause_on_hover(false));
    run(&mut c, 1000);
    c.handle(HostEvent::PointerEnter);

    assert_eq!(c.state(), CycleState::Running);
    run(&mut c, 2000);
    assert_eq!(c.queue().rotations(), 1);
}

// ============================================================================
// INERT DECKS AND TEARDOWN
// ============================================================================

#[test]
fn verify_single_card_never_sequences() {
    let mut c = carousel(1, &CardSwapOptions::new());
    assert!(c.engine().card(CardId(0)).unwrap().placed);

    run(&mut c, 30000);
    c.handle(HostEvent::PointerEnter);
    c.handle(HostEvent::PointerLeave);
    run(&mut c, 30000);

    assert_eq!(c.state(), CycleState::Idle);
    assert!(c.engine().played().is_empty());
    assert_eq!(c.queue().rotations(), 0);
    assert_eq!(order(&c), vec![0]);
}

#[test]
fn verify_empty_deck_is_noop() {
    let deck: Vec<u32> = Vec::new();
    let c = init_card_swap(
        Some(&deck),
        Some(SimEngine::new(0)),
        SimTimers::new(),
        &CardSwapOptions::new(),
    );
    assert!(c.is_none());
}

#[test]
fn verify_dispose_stops_cycling() {
    let mut c = carousel(4, &CardSwapOptions::new());
    run(&mut c, 3000);
    c.dispose();

    run(&mut c, 30000);
    assert_eq!(c.state(), CycleState::Disposed);
    assert_eq!(c.engine().played().len(), 1);
    assert_eq!(c.queue().rotations(), 1);
    assert_eq!(c.timers().armed(), 0);
}
