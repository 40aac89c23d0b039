#![forbid(unsafe_code)]

//! Resize event throttle.
//!
//! Resize streams arrive far faster than relayout is worth doing. The
//! throttle passes the first event of a burst through immediately (leading
//! edge) and coalesces the rest, keeping only the latest width; [`poll`]
//! flushes the survivor once the window has elapsed (trailing edge).
//!
//! # Usage
//!
//! ```ignore
//! use brim_runtime::throttle::ResizeThrottle;
//!
//! let mut throttle = ResizeThrottle::new();
//!
//! // On resize event
//! if let Some(width) = throttle.offer(new_width) {
//!     relayout(width);
//! }
//!
//! // On tick (called each frame)
//! if let Some(width) = throttle.poll() {
//!     relayout(width);
//! }
//! ```
//!
//! # Invariants
//!
//! - **Latest-wins**: the final width in a burst is never dropped.
//! - **Leading edge**: the first event after a quiet window passes through
//!   undelayed.
//! - **Deterministic**: identical event sequences at identical instants
//!   yield identical decisions.
//!
//! [`poll`]: ResizeThrottle::poll

use std::time::Duration;

use web_time::Instant;

/// Default throttle window between applied resize widths.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(15);

#[inline]
fn duration_since_or_zero(now: Instant, earlier: Instant) -> Duration {
    now.checked_duration_since(earlier)
        .unwrap_or(Duration::ZERO)
}

/// Leading-edge, trailing-flush width throttle.
///
/// Time is always passed in explicitly via the `*_at` methods; the
/// convenience wrappers use [`Instant::now`].
#[derive(Debug, Clone)]
pub struct ResizeThrottle {
    window: Duration,

    /// Latest coalesced width awaiting the trailing edge.
    pending: Option<f64>,

    /// When the throttle last let a width through.
    last_passed: Option<Instant>,

    stats: ThrottleStats,
}

impl Default for ResizeThrottle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResizeThrottle {
    /// Create a throttle with the default window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            pending: None,
            last_passed: None,
            stats: ThrottleStats::default(),
        }
    }

    /// Set the throttle window.
    #[must_use]
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// The configured throttle window.
    #[inline]
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Offer a resize width.
    ///
    /// Returns the width to apply now, or `None` when it was coalesced for
    /// a later [`poll`](Self::poll).
    pub fn offer(&mut self, width: f64) -> Option<f64> {
        self.offer_at(width, Instant::now())
    }

    /// Offer a resize width at a specific time (for testing).
    pub fn offer_at(&mut self, width: f64, now: Instant) -> Option<f64> {
        self.stats.offered += 1;

        let window_open = self
            .last_passed
            .is_none_or(|passed| duration_since_or_zero(now, passed) >= self.window);

        if window_open {
            // Anything still pending is older than this event; latest wins.
            if self.pending.take().is_some() {
                self.stats.superseded += 1;
            }
            self.last_passed = Some(now);
            self.stats.passed += 1;
            return Some(width);
        }

        if self.pending.replace(width).is_some() {
            self.stats.superseded += 1;
        }
        None
    }

    /// Flush the pending width if the window has elapsed.
    pub fn poll(&mut self) -> Option<f64> {
        self.poll_at(Instant::now())
    }

    /// Flush at a specific time (for testing).
    pub fn poll_at(&mut self, now: Instant) -> Option<f64> {
        let width = self.pending?;

        if self
            .last_passed
            .is_some_and(|passed| duration_since_or_zero(now, passed) < self.window)
        {
            return None;
        }

        self.pending = None;
        self.last_passed = Some(now);
        self.stats.flushed += 1;
        Some(width)
    }

    /// Time until the pending width will flush, if any is pending.
    pub fn time_until_flush(&self, now: Instant) -> Option<Duration> {
        let _pending = self.pending?;
        let Some(passed) = self.last_passed else {
            return Some(Duration::ZERO);
        };

        let elapsed = duration_since_or_zero(now, passed);
        if elapsed >= self.window {
            Some(Duration::ZERO)
        } else {
            Some(self.window - elapsed)
        }
    }

    /// Check if a coalesced width is waiting on the trailing edge.
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending width without emitting it.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Counters describing how the throttle has routed events.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> ThrottleStats {
        self.stats
    }
}

/// Statistics about throttle routing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThrottleStats {
    /// Widths offered to the throttle.
    pub offered: u64,
    /// Widths passed through on the leading edge.
    pub passed: u64,
    /// Pending widths overwritten by a newer one.
    pub superseded: u64,
    /// Pending widths flushed on the trailing edge.
    pub flushed: u64,
}
