#![forbid(unsafe_code)]

//! Overflow-menu entries and the action-to-entry projection.
//!
//! [`overflow_entries`] walks the hidden side of an [`OverflowLayout`] in
//! source order and produces the menu shape for each hidden action.
//! Separators are the one place the mapping is not one-to-one: a divider
//! whose neighbors stayed inline would render dangling, so leading,
//! trailing, and doubled-up separators are dropped.

use brim_layout::OverflowLayout;

use crate::action::{Action, ActionKind};

/// One entry in the overflow menu.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MenuEntry<'a> {
    /// A clickable command entry.
    Button {
        /// Display label.
        label: &'a str,
        /// Disabled entries render but are not interactable.
        disabled: bool,
    },
    /// A navigation entry.
    Link {
        /// Display label.
        label: &'a str,
        /// Destination, passed through untouched.
        href: &'a str,
        /// Disabled entries render but are not interactable.
        disabled: bool,
    },
    /// A horizontal rule between runs of entries.
    Separator,
    /// A nested submenu holding a group's children.
    Submenu {
        /// Display label.
        label: &'a str,
        /// Child entries, in source order.
        entries: Vec<MenuEntry<'a>>,
    },
}

/// Project the hidden side of `layout` into overflow-menu entries.
///
/// Entries come out in source order. Groups become submenus carrying all
/// of their children; separators are suppressed wherever they would render
/// dangling (leading, trailing, or adjacent to another separator).
///
/// `layout` must have been computed for this same action list, index for
/// index.
#[must_use]
pub fn overflow_entries<'a>(actions: &[Action<'a>], layout: &OverflowLayout) -> Vec<MenuEntry<'a>> {
    debug_assert_eq!(
        actions.len(),
        layout.len(),
        "layout was computed for a different action list"
    );

    let mut entries = Vec::new();
    for index in layout.overflow_indices() {
        let Some(action) = actions.get(index) else {
            break;
        };
        push_entry(&mut entries, action);
    }
    trim_trailing_separator(&mut entries);
    entries
}

/// The inline complement of [`overflow_entries`]: `(index, action)` pairs
/// that keep their place in the toolbar, in source order.
pub fn inline_actions<'a, 'b>(
    actions: &'b [Action<'a>],
    layout: &'b OverflowLayout,
) -> impl Iterator<Item = (usize, &'b Action<'a>)> {
    debug_assert_eq!(
        actions.len(),
        layout.len(),
        "layout was computed for a different action list"
    );

    layout
        .visible_indices()
        .filter_map(move |index| actions.get(index).map(|action| (index, action)))
}

fn push_entry<'a>(entries: &mut Vec<MenuEntry<'a>>, action: &Action<'a>) {
    match &action.kind {
        ActionKind::Button => entries.push(MenuEntry::Button {
            label: action.label,
            disabled: action.disabled,
        }),
        ActionKind::Link { href } => entries.push(MenuEntry::Link {
            label: action.label,
            href: *href,
            disabled: action.disabled,
        }),
        ActionKind::Divider => {
            // A separator needs a rendered entry on both sides.
            if !matches!(entries.last(), None | Some(MenuEntry::Separator)) {
                entries.push(MenuEntry::Separator);
            }
        }
        ActionKind::Group(children) => entries.push(MenuEntry::Submenu {
            label: action.label,
            entries: entries_of(children),
        }),
    }
}

/// Convert a free-standing action list, applying the same separator rules.
fn entries_of<'a>(actions: &[Action<'a>]) -> Vec<MenuEntry<'a>> {
    let mut entries = Vec::new();
    for action in actions {
        push_entry(&mut entries, action);
    }
    trim_trailing_separator(&mut entries);
    entries
}

fn trim_trailing_separator(entries: &mut Vec<MenuEntry<'_>>) {
    while entries.last() == Some(&MenuEntry::Separator) {
        entries.pop();
    }
}
