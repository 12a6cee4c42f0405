//!
//! Menu items and the selection sequence.
//!
//! An item is created once as a [DropdownItem] and handed over to the
//! [DropdownState](crate::dropdown::DropdownState). From then on it
//! lives as an [ItemState] with its own animation controls.
//!
//! Selecting an item runs these steps, each one waits for the
//! previous one to finish:
//!
//! * the event is consumed.
//! * the item colors animate to the neutral style.
//! * the item colors animate to the highlight style.
//! * a short pause.
//! * the menu fades out and the open flag is cleared.
//! * `on_select` is called.
//!

use crate::anim::{AnimationControls, Interpolate};
use crate::timer::TimerHandle;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use std::fmt::{Debug, Formatter};

/// Callback for a selected item.
pub type SelectFn = Box<dyn FnMut() + 'static>;

/// One entry of the dropdown.
pub struct DropdownItem {
    pub(crate) content: Line<'static>,
    pub(crate) on_select: Option<SelectFn>,
    pub(crate) disabled: bool,
}

impl Debug for DropdownItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropdownItem")
            .field("content", &self.content)
            .field("on_select", &self.on_select.is_some())
            .field("disabled", &self.disabled)
            .finish()
    }
}

impl DropdownItem {
    pub fn new(content: impl Into<Line<'static>>) -> Self {
        Self {
            content: content.into(),
            on_select: None,
            disabled: false,
        }
    }

    /// Called after the menu has closed.
    pub fn on_select(mut self, on_select: impl FnMut() + 'static) -> Self {
        self.on_select = Some(Box::new(on_select));
        self
    }

    /// Disabled items can't be highlighted or selected.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Display width.
    pub fn width(&self) -> u16 {
        self.content.width() as u16
    }
}

/// Foreground and background of an item.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ItemColors {
    pub fg: Color,
    pub bg: Color,
}

impl ItemColors {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    /// Colors of the style, missing ones from the fallback.
    pub fn from_style(style: Style, fallback: ItemColors) -> Self {
        Self {
            fg: style.fg.unwrap_or(fallback.fg),
            bg: style.bg.unwrap_or(fallback.bg),
        }
    }

    /// Patch the colors onto a style.
    pub fn style(&self, style: Style) -> Style {
        style.fg(self.fg).bg(self.bg)
    }
}

impl Interpolate for ItemColors {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        Self {
            fg: self.fg.interpolate(&other.fg, t),
            bg: self.bg.interpolate(&other.bg, t),
        }
    }
}

/// Default surface: gray-700 on white.
pub(crate) const BASE_COLORS: ItemColors =
    ItemColors::new(Color::Rgb(0x37, 0x41, 0x51), Color::Rgb(0xff, 0xff, 0xff));
/// Default first flash step: black on white.
pub(crate) const NEUTRAL_COLORS: ItemColors =
    ItemColors::new(Color::Rgb(0x00, 0x00, 0x00), Color::Rgb(0xff, 0xff, 0xff));
/// Default highlight: white on sky-400.
pub(crate) const HIGHLIGHT_COLORS: ItemColors =
    ItemColors::new(Color::Rgb(0xff, 0xff, 0xff), Color::Rgb(0x38, 0xbd, 0xf8));

/// State of one item.
pub struct ItemState {
    pub content: Line<'static>,
    pub disabled: bool,
    pub(crate) on_select: Option<SelectFn>,
    /// Colors override while the selection flash runs.
    pub colors: Option<AnimationControls<ItemColors>>,
}

impl Debug for ItemState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemState")
            .field("content", &self.content)
            .field("disabled", &self.disabled)
            .field("on_select", &self.on_select.is_some())
            .field("colors", &self.colors)
            .finish()
    }
}

impl From<DropdownItem> for ItemState {
    fn from(value: DropdownItem) -> Self {
        Self {
            content: value.content,
            disabled: value.disabled,
            on_select: value.on_select,
            colors: None,
        }
    }
}

impl ItemState {
    /// Display width.
    pub fn width(&self) -> u16 {
        self.content.width() as u16
    }

    /// Has a callback.
    pub fn has_on_select(&self) -> bool {
        self.on_select.is_some()
    }

    /// Run the callback. Nothing happens if there is none.
    pub(crate) fn fire(&mut self) {
        if let Some(on_select) = self.on_select.as_mut() {
            on_select();
        }
    }

    /// Drop the flash colors.
    pub(crate) fn reset_colors(&mut self) {
        self.colors = None;
    }
}

/// Steps of the selection sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStep {
    /// Item animates to the neutral colors.
    Neutral,
    /// Item animates to the highlight colors.
    Highlight,
    /// Holding the highlight.
    Pause,
    /// Waiting for the menu to close.
    Closing,
}

/// A running selection sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Sequence {
    pub(crate) item: usize,
    pub(crate) step: SelectionStep,
    /// Timer for the end of the current step.
    /// None while waiting for the menu.
    pub(crate) timer: Option<TimerHandle>,
}
