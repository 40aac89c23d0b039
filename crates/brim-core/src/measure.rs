#![forbid(unsafe_code)]

//! Width measurement boundary.
//!
//! The layout engine never reads a render surface. Hosts implement
//! [`WidthMeasurer`] to report the container width, the outer width of
//! each candidate item, and the width of the overflow trigger once it
//! exists. Measurements are snapshots: the orchestrator asks once per
//! computation and the measurer answers from whatever surface state it
//! can see right now.
//!
//! Two implementations ship with the crate:
//!
//! - [`FixedMeasurer`] - pre-supplied widths, for tests and hosts that
//!   measure out of band
//! - [`TextMeasurer`] - deterministic widths derived from label text,
//!   for headless hosts

use crate::item::MeasuredItem;

use unicode_width::UnicodeWidthStr;

/// Source of geometry for one layout computation.
///
/// `trigger_width` returns `None` while the overflow trigger has not been
/// rendered. The first layout of a component's life runs with a zero-width
/// trigger; the resize orchestrator re-measures once the trigger exists
/// and publishes a corrected layout.
pub trait WidthMeasurer {
    /// Width of the container's content box, in logical pixels.
    fn available_width(&self) -> f64;

    /// Outer widths of the candidate items, in display order.
    fn measure_items(&self) -> Vec<MeasuredItem>;

    /// Outer width of the overflow trigger, or `None` before first render.
    fn trigger_width(&self) -> Option<f64>;
}

/// Measurer over fixed, pre-supplied widths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedMeasurer {
    available: f64,
    items: Vec<MeasuredItem>,
    trigger: Option<f64>,
}

impl FixedMeasurer {
    /// Create a measurer with the given container width and no items.
    #[must_use]
    pub const fn new(available_width: f64) -> Self {
        Self {
            available: available_width,
            items: Vec::new(),
            trigger: None,
        }
    }

    /// Replace the item set with the given widths.
    #[must_use]
    pub fn with_widths(mut self, widths: &[f64]) -> Self {
        self.items = widths.iter().copied().map(MeasuredItem::new).collect();
        self
    }

    /// Replace the item set.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = MeasuredItem>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    /// Set the trigger width, modelling an already-rendered trigger.
    #[must_use]
    pub fn with_trigger_width(mut self, width: f64) -> Self {
        self.trigger = Some(width);
        self
    }

    /// Update the container width (models a resize).
    pub fn set_available_width(&mut self, width: f64) {
        self.available = width;
    }

    /// Mark the trigger as rendered with the given width.
    pub fn set_trigger_width(&mut self, width: f64) {
        self.trigger = Some(width);
    }
}

impl WidthMeasurer for FixedMeasurer {
    fn available_width(&self) -> f64 {
        self.available
    }

    fn measure_items(&self) -> Vec<MeasuredItem> {
        self.items.clone()
    }

    fn trigger_width(&self) -> Option<f64> {
        self.trigger
    }
}

/// Deterministic measurer derived from label text.
///
/// Each item's width is its label's Unicode display width times a fixed
/// per-column width, plus horizontal padding. These are headless-host
/// numbers; a host with a real render surface implements
/// [`WidthMeasurer`] itself and measures there.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMeasurer {
    labels: Vec<String>,
    available: f64,
    column_width: f64,
    item_padding: f64,
    trigger_label: String,
    trigger_rendered: bool,
}

impl TextMeasurer {
    /// Default width of one display column, in logical pixels.
    pub const DEFAULT_COLUMN_WIDTH: f64 = 8.0;

    /// Default horizontal padding added to every item, in logical pixels.
    pub const DEFAULT_ITEM_PADDING: f64 = 16.0;

    /// Create a measurer for the given container width.
    #[must_use]
    pub fn new(available_width: f64) -> Self {
        Self {
            labels: Vec::new(),
            available: available_width,
            column_width: Self::DEFAULT_COLUMN_WIDTH,
            item_padding: Self::DEFAULT_ITEM_PADDING,
            trigger_label: "\u{22ef}".to_string(),
            trigger_rendered: false,
        }
    }

    /// Append an item label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Replace all item labels.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set the per-column width in logical pixels.
    #[must_use]
    pub fn with_column_width(mut self, width: f64) -> Self {
        self.column_width = width;
        self
    }

    /// Set the horizontal padding added to every item.
    #[must_use]
    pub fn with_item_padding(mut self, padding: f64) -> Self {
        self.item_padding = padding;
        self
    }

    /// Set the trigger label (default `⋯`).
    #[must_use]
    pub fn with_trigger_label(mut self, label: impl Into<String>) -> Self {
        self.trigger_label = label.into();
        self
    }

    /// Update the container width (models a resize).
    pub fn set_available_width(&mut self, width: f64) {
        self.available = width;
    }

    /// Mark the trigger as rendered; `trigger_width` reports `Some` after this.
    pub fn set_trigger_rendered(&mut self, rendered: bool) {
        self.trigger_rendered = rendered;
    }

    fn label_width(&self, label: &str) -> f64 {
        label.width() as f64 * self.column_width + self.item_padding
    }
}

impl WidthMeasurer for TextMeasurer {
    fn available_width(&self) -> f64 {
        self.available
    }

    fn measure_items(&self) -> Vec<MeasuredItem> {
        self.labels
            .iter()
            .map(|label| MeasuredItem::new(self.label_width(label)))
            .collect()
    }

    fn trigger_width(&self) -> Option<f64> {
        self.trigger_rendered
            .then(|| self.label_width(&self.trigger_label))
    }
}
