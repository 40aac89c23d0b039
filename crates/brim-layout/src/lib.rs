#![forbid(unsafe_code)]

//! Overflow layout for ordered item rows.
//!
//! This crate decides which of an ordered set of width-measured items stay
//! inline and which move into an overflow menu:
//!
//! - [`OverflowConfig`] - layout policy (visible bounds, container and trigger widths)
//! - [`Placement`] - per-item decision with the reason it was made
//! - [`OverflowLayout`] - aggregate result with visibility accessors
//!
//! The computation is pure: value objects in, value objects out, no retained
//! state. A first-fit pass places items against the container width, and a
//! reservation pass then evicts tail items until the trigger has room; the
//! compact-trigger form is decided last. Identical inputs always produce
//! identical results.
//!
//! # Example
//!
//! ```
//! use brim_layout::OverflowConfig;
//!
//! // Four 50 px buttons in a 140 px toolbar with a 30 px trigger.
//! let layout = OverflowConfig::new(140.0)
//!     .with_trigger_width(30.0)
//!     .compute(&[50.0, 50.0, 50.0, 50.0]);
//!
//! assert_eq!(layout.visible_count(), 2);
//! assert!(layout.overflow_needed());
//! assert!(!layout.overflow_compact());
//! ```
//!
//! # Invariants
//!
//! - Item order never changes; eviction happens only from the tail of the
//!   soft-placed run.
//! - The guaranteed prefix ([`OverflowConfig::min_visible`]) is visible in
//!   every result, even when the container is narrower than the prefix.
//! - Whenever anything is hidden, the visible set leaves room for the
//!   trigger. When only forced items remain and the trigger still cannot
//!   fit, the result flips to the compact trigger instead.
//!
//! Widths are logical pixels as `f64`. Finite, non-negative values are the
//! caller's contract; the engine does not check for NaN or negatives.

use brim_core::item::{MeasuredItem, widths_of};

/// Policy and frame geometry for one overflow computation.
///
/// Construct with [`new`](Self::new) and the `with_*` setters, then call
/// [`compute`](Self::compute). The config is a plain value; reusing one
/// across frames carries no hidden state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverflowConfig {
    /// Leading items that stay visible even when nothing fits.
    ///
    /// Values larger than the item count keep every item visible. The
    /// minimum outranks [`max_visible`](Self::max_visible): the guaranteed
    /// prefix is never truncated by the cap, so the effective cap is
    /// `max(min_visible, cap)`.
    pub min_visible: usize,

    /// Hard cap on visible items; `None` means unbounded.
    pub max_visible: Option<usize>,

    /// Width of the container's content box, in logical pixels.
    pub available_width: f64,

    /// Width reserved for the overflow trigger when anything overflows.
    ///
    /// Zero is a valid value and models a trigger that has not been
    /// measured yet.
    pub trigger_width: f64,

    /// Always report the compact trigger, regardless of fit.
    pub compact_trigger: bool,
}

impl Default for OverflowConfig {
    fn default() -> Self {
        Self {
            min_visible: 1,
            max_visible: None,
            available_width: 0.0,
            trigger_width: 0.0,
            compact_trigger: false,
        }
    }
}

impl OverflowConfig {
    /// Create a config for the given container width.
    #[must_use]
    pub fn new(available_width: f64) -> Self {
        Self {
            available_width,
            ..Self::default()
        }
    }

    /// Set the guaranteed visible prefix length (default 1).
    #[must_use]
    pub fn with_min_visible(mut self, min_visible: usize) -> Self {
        self.min_visible = min_visible;
        self
    }

    /// Cap the number of visible items; `None` removes the cap.
    #[must_use]
    pub fn with_max_visible(mut self, max_visible: Option<usize>) -> Self {
        self.max_visible = max_visible;
        self
    }

    /// Set the container width.
    #[must_use]
    pub fn with_available_width(mut self, available_width: f64) -> Self {
        self.available_width = available_width;
        self
    }

    /// Set the width reserved for the overflow trigger.
    #[must_use]
    pub fn with_trigger_width(mut self, trigger_width: f64) -> Self {
        self.trigger_width = trigger_width;
        self
    }

    /// Force the compact trigger regardless of fit.
    #[must_use]
    pub fn with_compact_trigger(mut self, compact_trigger: bool) -> Self {
        self.compact_trigger = compact_trigger;
        self
    }

    /// Decide inline-versus-overflow placement for the given item widths.
    ///
    /// Runs the three placement passes and returns the aggregate result.
    /// Every well-formed numeric input yields a result; nothing panics.
    #[must_use]
    pub fn compute(&self, widths: &[f64]) -> OverflowLayout {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "overflow_compute",
            items = widths.len(),
            available = self.available_width,
        )
        .entered();

        let mut state = place_primary(self, widths);
        reserve_trigger(self, widths, &mut state);

        let overflow_needed = state.shown_count < widths.len();
        let overflow_compact = decide_compact(self, &state, overflow_needed);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            visible = state.shown_count,
            overflow = overflow_needed,
            compact = overflow_compact,
            "placement decided"
        );

        OverflowLayout {
            decisions: state.decisions,
            visible_count: state.shown_count,
            overflow_needed,
            overflow_compact,
        }
    }

    /// Decide placement for measured items.
    ///
    /// Convenience over [`compute`](Self::compute) for callers holding
    /// [`MeasuredItem`] values.
    #[must_use]
    pub fn compute_items(&self, items: &[MeasuredItem]) -> OverflowLayout {
        self.compute(&widths_of(items))
    }
}

/// Per-item placement decision, carrying the reason it was made.
///
/// Visibility is derived: [`ForcedVisible`](Self::ForcedVisible) and
/// [`Fits`](Self::Fits) render inline, the other two go to the overflow
/// menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// Inside the guaranteed minimum prefix; shown unconditionally.
    ForcedVisible,
    /// Beyond the visible-count cap; hidden regardless of width.
    ForcedHidden,
    /// Passed the strict fit check against the remaining width.
    Fits,
    /// Displaced by an earlier non-fit or by trigger reservation.
    Evicted,
}

impl Placement {
    /// Whether an item with this placement renders inline.
    #[inline]
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::ForcedVisible | Self::Fits)
    }

    /// Stable string form for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForcedVisible => "forced-visible",
            Self::ForcedHidden => "forced-hidden",
            Self::Fits => "fits",
            Self::Evicted => "evicted",
        }
    }
}

/// Result of one overflow computation.
///
/// Decisions are indexed by item position; the input order is preserved.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverflowLayout {
    decisions: Vec<Placement>,
    visible_count: usize,
    overflow_needed: bool,
    overflow_compact: bool,
}

impl OverflowLayout {
    /// Per-item placement decisions in input order.
    #[must_use]
    pub fn decisions(&self) -> &[Placement] {
        &self.decisions
    }

    /// Number of items that render inline.
    #[inline]
    #[must_use]
    pub const fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Number of items that go to the overflow menu.
    #[inline]
    #[must_use]
    pub const fn overflow_count(&self) -> usize {
        self.decisions.len() - self.visible_count
    }

    /// Whether any item is hidden (the trigger should render).
    #[inline]
    #[must_use]
    pub const fn overflow_needed(&self) -> bool {
        self.overflow_needed
    }

    /// Whether the trigger should use its compact form.
    #[inline]
    #[must_use]
    pub const fn overflow_compact(&self) -> bool {
        self.overflow_compact
    }

    /// Number of items the decision covers.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.decisions.len()
    }

    /// Whether the decision covers no items.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Placement for the item at `index`, or `None` out of range.
    #[must_use]
    pub fn placement(&self, index: usize) -> Option<Placement> {
        self.decisions.get(index).copied()
    }

    /// Whether the item at `index` renders inline. Out of range is `false`.
    #[must_use]
    pub fn is_visible(&self, index: usize) -> bool {
        self.placement(index).is_some_and(Placement::is_visible)
    }

    /// Indices of inline items, in input order.
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.decisions
            .iter()
            .enumerate()
            .filter(|(_, placement)| placement.is_visible())
            .map(|(index, _)| index)
    }

    /// Indices of overflowed items, in input order.
    pub fn overflow_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.decisions
            .iter()
            .enumerate()
            .filter(|(_, placement)| !placement.is_visible())
            .map(|(index, _)| index)
    }
}

/// Running state shared by the placement passes.
struct PassState {
    decisions: Vec<Placement>,
    shown_width: f64,
    shown_count: usize,
}

/// Pass 1: first-fit placement against the container width.
///
/// The guaranteed prefix is admitted unconditionally and its width counted
/// even when it exceeds the container. Eligible items are then admitted in
/// order while `shown + width < available` holds strictly; the first
/// failure latches, and every later eligible item is evicted without a
/// check. Items beyond the cap are force-hidden before any width check.
fn place_primary(config: &OverflowConfig, widths: &[f64]) -> PassState {
    let mut decisions = Vec::with_capacity(widths.len());
    let mut shown_width = 0.0f64;
    let mut shown_count = 0usize;
    let mut overflowing = false;

    for (index, &width) in widths.iter().enumerate() {
        if index < config.min_visible {
            decisions.push(Placement::ForcedVisible);
            shown_width += width;
            shown_count += 1;
            continue;
        }

        // The cap check comes before the width state so capped items are
        // force-hidden rather than evicted.
        if config.max_visible.is_some_and(|cap| shown_count >= cap) {
            decisions.push(Placement::ForcedHidden);
            continue;
        }

        if overflowing {
            decisions.push(Placement::Evicted);
            continue;
        }

        if shown_width + width < config.available_width {
            decisions.push(Placement::Fits);
            shown_width += width;
            shown_count += 1;
        } else {
            overflowing = true;
            decisions.push(Placement::Evicted);
        }
    }

    PassState {
        decisions,
        shown_width,
        shown_count,
    }
}

/// Pass 2: make room for the overflow trigger.
///
/// Runs only when pass 1 hid at least one item. Demotes soft-placed items
/// from the tail until the visible run plus the trigger fits, never
/// touching forced placements.
fn reserve_trigger(config: &OverflowConfig, widths: &[f64], state: &mut PassState) {
    if state.shown_count >= widths.len() {
        return;
    }

    let mut cursor = state.decisions.len();
    while state.shown_width + config.trigger_width >= config.available_width {
        let Some(index) = state.decisions[..cursor]
            .iter()
            .rposition(|&placement| placement == Placement::Fits)
        else {
            break;
        };
        state.decisions[index] = Placement::Evicted;
        state.shown_width -= widths[index];
        state.shown_count -= 1;
        cursor = index;
    }
}

/// Pass 3: compact-trigger decision.
///
/// The compact form is used when configured unconditionally, or when a
/// guaranteed prefix forced an overflowing row that cannot also host the
/// full-width trigger.
fn decide_compact(config: &OverflowConfig, state: &PassState, overflow_needed: bool) -> bool {
    config.compact_trigger
        || (config.min_visible > 0
            && overflow_needed
            && state.shown_width + config.trigger_width >= config.available_width)
}
