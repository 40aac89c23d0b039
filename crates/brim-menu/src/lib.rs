#![forbid(unsafe_code)]

//! Menu projection for overflowed toolbar actions.
//!
//! [`brim_layout`] decides *which* items leave the inline row; this crate
//! decides *what they become* once they land in the overflow menu. The
//! mapping is a pure data-shape transform: labels and hrefs pass through
//! as opaque borrowed strings, and nothing here renders or styles.
//!
//! Source actions map one-to-one onto menu entries with two exceptions:
//! dividers are suppressed wherever they would render dangling, and groups
//! become nested submenus carrying all of their children.
//!
//! # Example
//!
//! ```
//! use brim_layout::OverflowConfig;
//! use brim_menu::{Action, MenuEntry, overflow_entries};
//!
//! let actions = [
//!     Action::button("Save"),
//!     Action::button("Copy"),
//!     Action::link("Docs", "https://example.com/docs"),
//! ];
//! let layout = OverflowConfig::new(130.0)
//!     .with_trigger_width(30.0)
//!     .compute(&[56.0, 56.0, 56.0]);
//!
//! let menu = overflow_entries(&actions, &layout);
//! assert_eq!(
//!     menu,
//!     vec![
//!         MenuEntry::Button { label: "Copy", disabled: false },
//!         MenuEntry::Link { label: "Docs", href: "https://example.com/docs", disabled: false },
//!     ],
//! );
//! ```

pub mod action;
pub mod entry;

pub use action::{Action, ActionKind};
pub use entry::{MenuEntry, inline_actions, overflow_entries};
