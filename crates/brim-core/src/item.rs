#![forbid(unsafe_code)]

//! Measured-item values consumed by the overflow layout engine.

/// One layout candidate: an interactive item with a measured outer width.
///
/// Width is in logical pixels and includes the item's margins; the engine
/// treats it as opaque. Items carry no identity of their own — an item *is*
/// its position in the slice handed to the engine, so ordering is part of
/// the data and is never changed by layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasuredItem {
    /// Outer width in logical pixels, margins included.
    pub width: f64,
}

impl MeasuredItem {
    /// Create an item from its measured outer width.
    #[inline]
    #[must_use]
    pub const fn new(width: f64) -> Self {
        Self { width }
    }
}

impl From<f64> for MeasuredItem {
    #[inline]
    fn from(width: f64) -> Self {
        Self::new(width)
    }
}

/// Collect the raw widths of a measured-item slice, preserving order.
#[must_use]
pub fn widths_of(items: &[MeasuredItem]) -> Vec<f64> {
    items.iter().map(|item| item.width).collect()
}
