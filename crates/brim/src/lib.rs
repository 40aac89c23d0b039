#![forbid(unsafe_code)]

//! Brim public facade crate.
//!
//! This crate provides the stable surface area for users. It re-exports
//! the overflow layout engine and its collaborators from the internal
//! crates and offers a lightweight prelude for day-to-day usage.
//!
//! # Example
//!
//! ```
//! use brim::prelude::*;
//!
//! let actions = [
//!     Action::button("Save"),
//!     Action::button("Copy"),
//!     Action::button("Paste"),
//!     Action::link("Docs", "https://example.com/docs"),
//! ];
//!
//! let layout = OverflowConfig::new(140.0)
//!     .with_trigger_width(30.0)
//!     .compute(&[50.0, 50.0, 50.0, 50.0]);
//! assert_eq!(layout.visible_count(), 2);
//!
//! let menu = overflow_entries(&actions, &layout);
//! assert_eq!(menu.len(), 2);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use brim_core::item::{MeasuredItem, widths_of};
pub use brim_core::measure::{FixedMeasurer, TextMeasurer, WidthMeasurer};

// --- Layout re-exports -----------------------------------------------------

pub use brim_layout::{OverflowConfig, OverflowLayout, Placement};

// --- Menu re-exports -------------------------------------------------------

pub use brim_menu::{Action, ActionKind, MenuEntry, inline_actions, overflow_entries};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use brim_runtime::{
    LatestFrame, LayoutFrame, LayoutPipeline, PipelineStats, ResizeThrottle, ThrottleStats,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Action, ActionKind, FixedMeasurer, MeasuredItem, MenuEntry, OverflowConfig,
        OverflowLayout, Placement, TextMeasurer, WidthMeasurer, inline_actions, overflow_entries,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{LatestFrame, LayoutFrame, LayoutPipeline, ResizeThrottle};

    pub use crate::{core, layout, menu};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use brim_core as core;
pub use brim_layout as layout;
pub use brim_menu as menu;
#[cfg(feature = "runtime")]
pub use brim_runtime as runtime;
