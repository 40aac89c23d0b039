#![forbid(unsafe_code)]

//! Property-based tests for `ResizeThrottle`.
//!
//! Invariants verified:
//!
//! 1. Every emitted width was previously offered (no fabrication).
//! 2. Latest-wins: after a trailing drain, the last width offered is the
//!    last width emitted.
//! 3. Emissions are never closer together than the throttle window.
//! 4. Identical event sequences yield identical emissions.
//! 5. The routing counters partition the offered events exactly.

use std::time::Duration;

use brim_runtime::throttle::ResizeThrottle;
use proptest::prelude::*;
use web_time::Instant;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Resize bursts as (inter-arrival ms, width) pairs. Whole-number widths
/// keep equality comparisons exact.
fn events_strategy() -> impl Strategy<Value = Vec<(u64, f64)>> {
    prop::collection::vec((0u64..40, (0u32..2000).prop_map(f64::from)), 1..40)
}

fn window_strategy() -> impl Strategy<Value = u64> {
    1u64..30
}

/// Drive a throttle through `events`, polling once per event time like a
/// frame loop would, then drain the trailing edge. Returns `(time_ms,
/// width)` emissions and the finished throttle.
fn run_throttle(events: &[(u64, f64)], window_ms: u64) -> (Vec<(u64, f64)>, ResizeThrottle) {
    let base = Instant::now();
    let mut throttle = ResizeThrottle::new().with_window(Duration::from_millis(window_ms));
    let mut emitted = Vec::new();
    let mut clock = 0u64;

    for &(delta, width) in events {
        clock += delta;
        let now = base + Duration::from_millis(clock);
        if let Some(flushed) = throttle.poll_at(now) {
            emitted.push((clock, flushed));
        }
        if let Some(passed) = throttle.offer_at(width, now) {
            emitted.push((clock, passed));
        }
    }

    let drain = clock + window_ms;
    if let Some(flushed) = throttle.poll_at(base + Duration::from_millis(drain)) {
        emitted.push((drain, flushed));
    }

    (emitted, throttle)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Every emitted width was previously offered
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn emissions_come_from_the_offered_set(
        events in events_strategy(),
        window_ms in window_strategy(),
    ) {
        let (emitted, _) = run_throttle(&events, window_ms);
        for &(time, width) in &emitted {
            prop_assert!(
                events.iter().any(|&(_, offered)| offered == width),
                "emitted width {width} at {time}ms was never offered"
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Latest-wins: the last offer is the last emission after a drain
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn last_offered_width_is_last_emitted(
        events in events_strategy(),
        window_ms in window_strategy(),
    ) {
        let (emitted, throttle) = run_throttle(&events, window_ms);
        let last_offered = events.last().map(|&(_, width)| width);
        let last_emitted = emitted.last().map(|&(_, width)| width);

        prop_assert!(!throttle.has_pending(), "drain must leave nothing pending");
        prop_assert_eq!(
            last_emitted, last_offered,
            "the final width of a burst must never be dropped"
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Emissions are never closer together than the window
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn emissions_respect_the_window(
        events in events_strategy(),
        window_ms in window_strategy(),
    ) {
        let (emitted, _) = run_throttle(&events, window_ms);
        for pair in emitted.windows(2) {
            prop_assert!(
                pair[1].0 - pair[0].0 >= window_ms,
                "emissions at {}ms and {}ms violate a {}ms window",
                pair[0].0,
                pair[1].0,
                window_ms
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Identical event sequences yield identical emissions
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn identical_sequences_emit_identically(
        events in events_strategy(),
        window_ms in window_strategy(),
    ) {
        let (first, _) = run_throttle(&events, window_ms);
        let (second, _) = run_throttle(&events, window_ms);
        prop_assert_eq!(first, second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. The routing counters partition the offered events
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn routing_counters_partition_the_offers(
        events in events_strategy(),
        window_ms in window_strategy(),
    ) {
        let (_, throttle) = run_throttle(&events, window_ms);
        let stats = throttle.stats();

        prop_assert_eq!(stats.offered, events.len() as u64);
        prop_assert_eq!(
            stats.offered,
            stats.passed + stats.superseded + stats.flushed,
            "every offer must pass, be superseded, or flush"
        );
    }
}
