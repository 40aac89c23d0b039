#![forbid(unsafe_code)]

//! Source-side toolbar actions.
//!
//! An [`Action`] describes one slot in the toolbar as the host declares
//! it: a display label plus the behavior behind it. The layout engine
//! never sees these (it works on measured widths); they exist so the
//! overflow menu knows what shape each hidden slot should take.

/// What an action does, and therefore what it becomes when overflowed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ActionKind<'a> {
    /// A plain command button.
    Button,
    /// A navigation link.
    Link {
        /// Destination, passed through untouched.
        href: &'a str,
    },
    /// A visual break between runs of related actions.
    Divider,
    /// A named set of child actions that overflow together.
    Group(Vec<Action<'a>>),
}

/// One toolbar slot: a display label plus the behavior behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Action<'a> {
    /// Display label. Dividers leave it empty.
    pub label: &'a str,
    /// Behavior of this slot.
    pub kind: ActionKind<'a>,
    /// Disabled actions keep their place but are not interactable.
    pub disabled: bool,
}

impl<'a> Action<'a> {
    /// Create a command button.
    pub const fn button(label: &'a str) -> Self {
        Self {
            label,
            kind: ActionKind::Button,
            disabled: false,
        }
    }

    /// Create a navigation link.
    pub const fn link(label: &'a str, href: &'a str) -> Self {
        Self {
            label,
            kind: ActionKind::Link { href },
            disabled: false,
        }
    }

    /// Create a divider between runs of actions.
    pub const fn divider() -> Self {
        Self {
            label: "",
            kind: ActionKind::Divider,
            disabled: false,
        }
    }

    /// Create a named group whose children overflow as a unit.
    pub fn group(label: &'a str, children: Vec<Action<'a>>) -> Self {
        Self {
            label,
            kind: ActionKind::Group(children),
            disabled: false,
        }
    }

    /// Mark the action disabled (or re-enable it).
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}
