#![forbid(unsafe_code)]

//! Layout pipeline: measure, compute, publish.
//!
//! [`LayoutPipeline`] owns the placement policy and a [`WidthMeasurer`],
//! and turns raw resize events into generation-stamped [`LayoutFrame`]s:
//!
//! 1. [`bootstrap`] runs the first measurement. The overflow trigger does
//!    not exist before first paint, so the first layout runs with a
//!    zero-width trigger and the pipeline queues a one-shot re-measure.
//! 2. [`handle_resize`] feeds the throttle; the leading edge of a burst
//!    recomputes immediately, the rest coalesce.
//! 3. [`tick`] (called each frame) flushes the trailing edge and performs
//!    the deferred trigger re-measure.
//!
//! Frames can reach the presenter out of order when a trailing flush races
//! a fresh leading edge; [`LatestFrame`] keeps whichever generation is
//! newest and counts the stale ones it drops.
//!
//! [`bootstrap`]: LayoutPipeline::bootstrap
//! [`handle_resize`]: LayoutPipeline::handle_resize
//! [`tick`]: LayoutPipeline::tick

use brim_core::measure::WidthMeasurer;
use brim_layout::{OverflowConfig, OverflowLayout};
use web_time::Instant;

use crate::throttle::ResizeThrottle;

/// One published layout computation.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutFrame {
    /// Monotonic recompute counter; a higher generation supersedes a lower.
    pub generation: u64,
    /// Container width the layout was computed against.
    pub available_width: f64,
    /// Trigger width reserved during the computation.
    pub trigger_width: f64,
    /// Per-item placement decisions.
    pub layout: OverflowLayout,
}

/// Orchestrates measurement, throttling, and layout computation.
#[derive(Debug)]
pub struct LayoutPipeline<M: WidthMeasurer> {
    measurer: M,
    throttle: ResizeThrottle,

    min_visible: usize,
    max_visible: Option<usize>,
    compact_trigger: bool,

    /// Container width from the last bootstrap or applied resize.
    available: f64,
    /// Last successfully measured trigger width.
    trigger: f64,
    /// One-shot flag: re-measure the trigger on the next tick.
    remeasure_queued: bool,

    generation: u64,
    stats: PipelineStats,
}

impl<M: WidthMeasurer> LayoutPipeline<M> {
    /// Create a pipeline around the given measurer with default policy:
    /// one item always visible, no cap, full-size trigger.
    pub fn new(measurer: M) -> Self {
        Self {
            measurer,
            throttle: ResizeThrottle::new(),
            min_visible: 1,
            max_visible: None,
            compact_trigger: false,
            available: 0.0,
            trigger: 0.0,
            remeasure_queued: false,
            generation: 0,
            stats: PipelineStats::default(),
        }
    }

    /// Set how many leading items stay visible regardless of space.
    #[must_use]
    pub fn with_min_visible(mut self, min_visible: usize) -> Self {
        self.min_visible = min_visible;
        self
    }

    /// Cap the number of visible items; `None` means unbounded.
    #[must_use]
    pub fn with_max_visible(mut self, max_visible: Option<usize>) -> Self {
        self.max_visible = max_visible;
        self
    }

    /// Always render the trigger in its compact form.
    #[must_use]
    pub fn with_compact_trigger(mut self, compact: bool) -> Self {
        self.compact_trigger = compact;
        self
    }

    /// Replace the resize throttle (for a custom window).
    #[must_use]
    pub fn with_throttle(mut self, throttle: ResizeThrottle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Update the visible-minimum policy. Takes effect on the next frame.
    pub fn set_min_visible(&mut self, min_visible: usize) {
        self.min_visible = min_visible;
    }

    /// Update the visible-maximum policy. Takes effect on the next frame.
    pub fn set_max_visible(&mut self, max_visible: Option<usize>) {
        self.max_visible = max_visible;
    }

    /// Update the compact-trigger policy. Takes effect on the next frame.
    pub fn set_compact_trigger(&mut self, compact: bool) {
        self.compact_trigger = compact;
    }

    /// Run a full measurement and produce the first frame.
    ///
    /// If the measurer cannot report a trigger width yet (nothing rendered
    /// before first paint) and the layout needs an overflow trigger, a
    /// one-shot re-measure is queued for the next [`tick`](Self::tick).
    ///
    /// Also usable after a content or policy change to force a fresh
    /// measurement outside the resize path.
    pub fn bootstrap(&mut self) -> LayoutFrame {
        self.available = self.measurer.available_width();
        let trigger_measured = self.sync_trigger();
        let frame = self.recompute();

        if !trigger_measured && frame.layout.overflow_needed() {
            self.remeasure_queued = true;
            self.stats.deferred_measures += 1;
            tracing::debug!(
                target: "brim.pipeline",
                generation = frame.generation,
                "trigger width deferred to next tick"
            );
        }

        frame
    }

    /// Handle a resize event carrying the new container width.
    ///
    /// Returns a frame when the throttle lets the event through; burst
    /// events coalesce and surface later via [`tick`](Self::tick).
    pub fn handle_resize(&mut self, width: f64) -> Option<LayoutFrame> {
        self.handle_resize_at(width, Instant::now())
    }

    /// Handle a resize event at a specific time (for testing).
    pub fn handle_resize_at(&mut self, width: f64, now: Instant) -> Option<LayoutFrame> {
        match self.throttle.offer_at(width, now) {
            Some(width) => {
                self.available = width;
                self.stats.resizes_applied += 1;
                self.sync_trigger();
                Some(self.recompute())
            }
            None => {
                self.stats.resizes_coalesced += 1;
                tracing::trace!(target: "brim.pipeline", width, "resize coalesced");
                None
            }
        }
    }

    /// Advance the pipeline one frame.
    ///
    /// Flushes a coalesced resize once the throttle window elapses, or
    /// performs the deferred trigger re-measure queued by
    /// [`bootstrap`](Self::bootstrap).
    pub fn tick(&mut self) -> Option<LayoutFrame> {
        self.tick_at(Instant::now())
    }

    /// Advance at a specific time (for testing).
    pub fn tick_at(&mut self, now: Instant) -> Option<LayoutFrame> {
        if let Some(width) = self.throttle.poll_at(now) {
            self.available = width;
            self.stats.flushes += 1;
            self.sync_trigger();
            return Some(self.recompute());
        }

        if self.remeasure_queued {
            self.remeasure_queued = false;
            if self.sync_trigger() {
                return Some(self.recompute());
            }
            tracing::debug!(target: "brim.pipeline", "deferred trigger still unmeasured");
        }

        None
    }

    /// The engine configuration the next computation will use.
    #[must_use]
    pub fn config(&self) -> OverflowConfig {
        OverflowConfig::new(self.available)
            .with_min_visible(self.min_visible)
            .with_max_visible(self.max_visible)
            .with_trigger_width(self.trigger)
            .with_compact_trigger(self.compact_trigger)
    }

    /// Generation of the most recent frame.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Container width the next computation will use.
    #[inline]
    #[must_use]
    pub fn available_width(&self) -> f64 {
        self.available
    }

    /// Last successfully measured trigger width.
    #[inline]
    #[must_use]
    pub fn trigger_width(&self) -> f64 {
        self.trigger
    }

    /// Whether a deferred trigger re-measure is waiting on the next tick.
    #[inline]
    #[must_use]
    pub fn has_deferred_measure(&self) -> bool {
        self.remeasure_queued
    }

    /// Pipeline activity counters.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// The underlying throttle, for its routing counters.
    #[inline]
    #[must_use]
    pub fn throttle(&self) -> &ResizeThrottle {
        &self.throttle
    }

    /// Borrow the measurer.
    #[inline]
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Mutably borrow the measurer (content changes, test setup).
    #[inline]
    pub fn measurer_mut(&mut self) -> &mut M {
        &mut self.measurer
    }

    /// Re-query the trigger width; sticky once measured.
    ///
    /// A `Some` answer also satisfies any queued deferred re-measure.
    fn sync_trigger(&mut self) -> bool {
        if let Some(width) = self.measurer.trigger_width() {
            self.trigger = width;
            self.remeasure_queued = false;
            true
        } else {
            false
        }
    }

    fn recompute(&mut self) -> LayoutFrame {
        let items = self.measurer.measure_items();
        let layout = self.config().compute_items(&items);
        self.generation += 1;
        self.stats.computes += 1;

        tracing::debug!(
            target: "brim.pipeline",
            generation = self.generation,
            available = self.available,
            trigger = self.trigger,
            visible = layout.visible_count(),
            overflow = layout.overflow_needed(),
            compact = layout.overflow_compact(),
            "layout recomputed"
        );

        LayoutFrame {
            generation: self.generation,
            available_width: self.available,
            trigger_width: self.trigger,
            layout,
        }
    }
}

/// Counters describing pipeline activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Layout computations performed.
    pub computes: u64,
    /// Resize events applied on the leading edge.
    pub resizes_applied: u64,
    /// Resize events coalesced behind the throttle window.
    pub resizes_coalesced: u64,
    /// Trailing-edge flushes that produced a frame.
    pub flushes: u64,
    /// Trigger measurements deferred past first paint.
    pub deferred_measures: u64,
}

/// Consumer-side last-write-wins frame slot.
///
/// Accepts only strictly newer generations; everything else is dropped
/// and counted.
#[derive(Debug, Default)]
pub struct LatestFrame {
    current: Option<LayoutFrame>,
    stale_dropped: u64,
}

impl LatestFrame {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a frame. Returns `true` if it became current.
    pub fn publish(&mut self, frame: LayoutFrame) -> bool {
        if let Some(current) = &self.current
            && frame.generation <= current.generation
        {
            self.stale_dropped += 1;
            tracing::trace!(
                target: "brim.pipeline",
                stale = frame.generation,
                current = current.generation,
                "dropped stale frame"
            );
            return false;
        }

        self.current = Some(frame);
        true
    }

    /// The newest published frame, if any.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&LayoutFrame> {
        self.current.as_ref()
    }

    /// Take the newest frame out of the slot.
    pub fn take(&mut self) -> Option<LayoutFrame> {
        self.current.take()
    }

    /// Frames rejected for carrying a stale generation.
    #[inline]
    #[must_use]
    pub fn stale_dropped(&self) -> u64 {
        self.stale_dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brim_core::measure::FixedMeasurer;
    use std::time::Duration;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    fn four_items(available: f64) -> FixedMeasurer {
        FixedMeasurer::new(available).with_widths(&[50.0, 50.0, 50.0, 50.0])
    }

    #[test]
    fn bootstrap_computes_the_first_frame() {
        let measurer = four_items(140.0).with_trigger_width(30.0);
        let mut pipeline = LayoutPipeline::new(measurer);

        let frame = pipeline.bootstrap();
        assert_eq!(frame.generation, 1);
        assert_eq!(frame.available_width, 140.0);
        assert_eq!(frame.trigger_width, 30.0);
        assert_eq!(frame.layout.visible_count(), 2);
        assert!(frame.layout.overflow_needed());
        assert!(!pipeline.has_deferred_measure());
    }

    #[test]
    fn bootstrap_defers_an_unmeasured_trigger() {
        let mut pipeline = LayoutPipeline::new(four_items(140.0));

        let frame = pipeline.bootstrap();
        assert_eq!(frame.trigger_width, 0.0);
        assert!(frame.layout.overflow_needed());
        assert!(pipeline.has_deferred_measure());
        assert_eq!(pipeline.stats().deferred_measures, 1);
    }

    #[test]
    fn bootstrap_without_overflow_skips_the_deferral() {
        let mut pipeline = LayoutPipeline::new(four_items(500.0));

        let frame = pipeline.bootstrap();
        assert!(!frame.layout.overflow_needed());
        assert_eq!(frame.layout.visible_count(), 4);
        assert!(!pipeline.has_deferred_measure());
        assert_eq!(pipeline.stats().deferred_measures, 0);
    }

    #[test]
    fn tick_performs_the_deferred_trigger_measure() {
        let mut pipeline = LayoutPipeline::new(four_items(125.0));
        let base = Instant::now();

        // First paint: no trigger in the surface yet, reservation runs
        // against zero and both leading items survive.
        let first = pipeline.bootstrap();
        assert_eq!(first.layout.visible_count(), 2);

        // The host has rendered the trigger by the next frame.
        pipeline.measurer_mut().set_trigger_width(30.0);
        let corrected = pipeline.tick_at(base).expect("deferred re-measure");
        assert_eq!(corrected.generation, 2);
        assert_eq!(corrected.trigger_width, 30.0);
        assert_eq!(corrected.layout.visible_count(), 1);
        assert!(!pipeline.has_deferred_measure());
    }

    #[test]
    fn deferred_measure_is_one_shot() {
        let mut pipeline = LayoutPipeline::new(four_items(140.0));
        let base = Instant::now();

        pipeline.bootstrap();
        assert_eq!(pipeline.tick_at(base), None);
        assert!(!pipeline.has_deferred_measure());

        // Too late: the flag was consumed by the failed attempt.
        pipeline.measurer_mut().set_trigger_width(30.0);
        assert_eq!(pipeline.tick_at(at(base, 16)), None);
    }

    #[test]
    fn tick_is_idle_without_pending_work() {
        let measurer = four_items(140.0).with_trigger_width(30.0);
        let mut pipeline = LayoutPipeline::new(measurer);
        let base = Instant::now();

        pipeline.bootstrap();
        assert_eq!(pipeline.tick_at(base), None);
        assert_eq!(pipeline.generation(), 1);
    }

    #[test]
    fn leading_edge_resize_recomputes_immediately() {
        let measurer = four_items(140.0).with_trigger_width(30.0);
        let mut pipeline = LayoutPipeline::new(measurer);
        let base = Instant::now();

        pipeline.bootstrap();
        let frame = pipeline
            .handle_resize_at(500.0, base)
            .expect("leading edge applies");
        assert_eq!(frame.generation, 2);
        assert_eq!(frame.available_width, 500.0);
        assert_eq!(frame.layout.visible_count(), 4);
        assert!(!frame.layout.overflow_needed());
    }

    #[test]
    fn resize_burst_coalesces_and_flushes_the_last_width() {
        let measurer = four_items(140.0).with_trigger_width(30.0);
        let mut pipeline = LayoutPipeline::new(measurer);
        let base = Instant::now();

        pipeline.bootstrap();

        let applied = pipeline.handle_resize_at(200.0, base);
        assert_eq!(applied.as_ref().map(|f| f.layout.visible_count()), Some(3));

        assert_eq!(pipeline.handle_resize_at(180.0, at(base, 5)), None);
        assert_eq!(pipeline.handle_resize_at(125.0, at(base, 8)), None);
        assert_eq!(pipeline.tick_at(at(base, 10)), None);

        let flushed = pipeline.tick_at(at(base, 15)).expect("trailing flush");
        assert_eq!(flushed.available_width, 125.0);
        assert_eq!(flushed.layout.visible_count(), 1);

        let stats = pipeline.stats();
        assert_eq!(stats.resizes_applied, 1);
        assert_eq!(stats.resizes_coalesced, 2);
        assert_eq!(stats.flushes, 1);
        assert_eq!(stats.computes, 3);
    }

    #[test]
    fn generations_increase_across_every_frame() {
        let measurer = four_items(140.0).with_trigger_width(30.0);
        let mut pipeline = LayoutPipeline::new(measurer);
        let base = Instant::now();

        let g1 = pipeline.bootstrap().generation;
        let g2 = pipeline
            .handle_resize_at(300.0, base)
            .expect("leading edge")
            .generation;
        pipeline.handle_resize_at(200.0, at(base, 5));
        let g3 = pipeline.tick_at(at(base, 20)).expect("flush").generation;

        assert!(g1 < g2 && g2 < g3, "got {g1}, {g2}, {g3}");
    }

    #[test]
    fn policy_builders_shape_the_engine_config() {
        let pipeline = LayoutPipeline::new(FixedMeasurer::new(240.0))
            .with_min_visible(2)
            .with_max_visible(Some(3))
            .with_compact_trigger(true);

        let config = pipeline.config();
        assert_eq!(config.min_visible, 2);
        assert_eq!(config.max_visible, Some(3));
        assert!(config.compact_trigger);
    }

    #[test]
    fn policy_setters_apply_to_the_next_frame() {
        let measurer = four_items(140.0).with_trigger_width(30.0);
        let mut pipeline = LayoutPipeline::new(measurer);

        pipeline.bootstrap();
        pipeline.set_min_visible(4);
        let frame = pipeline.bootstrap();
        assert_eq!(frame.layout.visible_count(), 4);
    }

    #[test]
    fn latest_frame_keeps_only_newer_generations() {
        let measurer = four_items(140.0).with_trigger_width(30.0);
        let mut pipeline = LayoutPipeline::new(measurer);
        let base = Instant::now();

        let first = pipeline.bootstrap();
        let second = pipeline
            .handle_resize_at(300.0, base)
            .expect("leading edge");

        let mut slot = LatestFrame::new();
        assert!(slot.publish(second.clone()));
        assert!(!slot.publish(first));
        assert!(!slot.publish(second.clone()));

        assert_eq!(slot.stale_dropped(), 2);
        assert_eq!(slot.current().map(|f| f.generation), Some(2));
        assert_eq!(slot.take().map(|f| f.generation), Some(2));
        assert_eq!(slot.current(), None);
    }

    #[test]
    fn custom_throttle_window_delays_the_flush() {
        let measurer = four_items(140.0).with_trigger_width(30.0);
        let mut pipeline = LayoutPipeline::new(measurer)
            .with_throttle(ResizeThrottle::new().with_window(Duration::from_millis(50)));
        let base = Instant::now();

        pipeline.bootstrap();
        pipeline.handle_resize_at(200.0, base);
        pipeline.handle_resize_at(125.0, at(base, 5));

        assert_eq!(pipeline.tick_at(at(base, 20)), None);
        assert!(pipeline.tick_at(at(base, 50)).is_some());
    }
}
