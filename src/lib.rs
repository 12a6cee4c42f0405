#![doc = include_str!("../readme.md")]
#![allow(clippy::collapsible_else_if)]

use crate::_private::NonExhaustive;
use crate::anim::{Easing, Transition};
use ratatui::style::Style;
use ratatui::widgets::Block;
use std::time::Duration;

pub mod anim;
pub mod button;
pub mod dropdown;
pub mod item;
pub mod menu;
pub mod timer;
mod util;

pub mod event {
    //!
    //! Event-handler traits and Keybindings.
    //!
    pub use rat_event::*;

    /// Outcome for the dropdown.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub enum DropdownOutcome {
        /// The given event was not handled at all.
        Continue,
        /// The event was handled, no repaint necessary.
        Unchanged,
        /// The event was handled, repaint necessary.
        Changed,
        /// The selection sequence for this item has finished.
        /// The menu is closed and the item callback has run.
        Selected(usize),
    }

    impl ConsumedEvent for DropdownOutcome {
        fn is_consumed(&self) -> bool {
            *self != DropdownOutcome::Continue
        }
    }

    impl From<DropdownOutcome> for Outcome {
        fn from(value: DropdownOutcome) -> Self {
            match value {
                DropdownOutcome::Continue => Outcome::Continue,
                DropdownOutcome::Unchanged => Outcome::Unchanged,
                DropdownOutcome::Changed => Outcome::Changed,
                DropdownOutcome::Selected(_) => Outcome::Changed,
            }
        }
    }

    impl From<Outcome> for DropdownOutcome {
        fn from(value: Outcome) -> Self {
            match value {
                Outcome::Continue => DropdownOutcome::Continue,
                Outcome::Unchanged => DropdownOutcome::Unchanged,
                Outcome::Changed => DropdownOutcome::Changed,
            }
        }
    }

    impl From<bool> for DropdownOutcome {
        fn from(value: bool) -> Self {
            if value {
                DropdownOutcome::Changed
            } else {
                DropdownOutcome::Unchanged
            }
        }
    }
}

/// How the dropdown opens, closes and reacts to a selection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// No animation. Selecting an item closes the menu at once
    /// and calls the callback.
    Instant,
    /// Fade in/out and flash the selected item before closing.
    #[default]
    Animated,
}

/// Durations and curves for the animated dropdown.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// Entrance transition of the menu surface.
    pub fade_in: Transition,
    /// Exit transition of the menu surface.
    pub fade_out: Transition,
    /// Each of the two color steps of the selection flash.
    pub flash: Transition,
    /// Hold the highlighted item this long before closing.
    pub pause: Duration,
    /// Repaint interval while an animation is running.
    pub frame: Duration,

    pub non_exhaustive: NonExhaustive,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            fade_in: Transition::new(Duration::from_millis(100), Easing::EaseOut),
            fade_out: Transition::new(Duration::from_millis(200), Easing::EaseIn),
            flash: Transition::new(Duration::from_millis(40), Easing::EaseOut),
            pause: Duration::from_millis(75),
            frame: Duration::from_millis(16),
            non_exhaustive: NonExhaustive,
        }
    }
}

impl Timing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entrance transition.
    pub fn fade_in(mut self, transition: Transition) -> Self {
        self.fade_in = transition;
        self
    }

    /// Exit transition.
    pub fn fade_out(mut self, transition: Transition) -> Self {
        self.fade_out = transition;
        self
    }

    /// Flash transition, used twice.
    pub fn flash(mut self, transition: Transition) -> Self {
        self.flash = transition;
        self
    }

    /// Pause after the flash.
    pub fn pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Repaint interval.
    pub fn frame(mut self, frame: Duration) -> Self {
        self.frame = frame;
        self
    }
}

/// Placement of the menu relative to the trigger.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Below the trigger. Aligned left.
    #[default]
    BelowLeft,
    /// Below the trigger. Aligned right.
    BelowRight,
    /// Above the trigger. Aligned left.
    AboveLeft,
    /// Above the trigger. Aligned right.
    AboveRight,
    /// Below or above dependent on available space. Aligned left.
    BelowOrAbove,
}

/// Combined styles.
#[derive(Debug, Clone)]
pub struct DropdownStyle {
    /// Base style for the menu surface.
    pub style: Style,
    /// Trigger style.
    pub button: Option<Style>,
    /// Trigger style while the menu is open.
    pub button_open: Option<Style>,
    /// Trigger style when focused.
    pub button_focus: Option<Style>,
    /// First step of the selection flash.
    pub neutral: Option<Style>,
    /// Keyboard/mouse highlight and second step of the selection flash.
    pub highlight: Option<Style>,
    /// Disabled item.
    pub disabled: Option<Style>,
    /// Block for the menu.
    pub block: Option<Block<'static>>,
    /// Border style
    pub border_style: Option<Style>,
    /// Placement of the menu.
    pub placement: Option<Placement>,
    /// Extra offset for the menu.
    pub offset: Option<(i16, i16)>,

    pub non_exhaustive: NonExhaustive,
}

impl Default for DropdownStyle {
    fn default() -> Self {
        Self {
            style: Default::default(),
            button: Default::default(),
            button_open: Default::default(),
            button_focus: Default::default(),
            neutral: Default::default(),
            highlight: Default::default(),
            disabled: Default::default(),
            block: Default::default(),
            border_style: Default::default(),
            placement: Default::default(),
            offset: Default::default(),
            non_exhaustive: NonExhaustive,
        }
    }
}

mod _private {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
