//!
//! The trigger for the dropdown.
//!
//! Render:
//! ```rust ignore
//! DropdownButton::new("≡")
//!      .styles(dropdown_style()) //
//!      .render(trigger_area, frame.buffer_mut(), &mut state.dropdown);
//! ```
//!
//! A click into the rendered area or Enter/Space while
//! [focused](ButtonState::focused) flips the menu.
//!
use crate::_private::NonExhaustive;
use crate::dropdown::DropdownState;
use crate::util::{get_block_size, revert_style};
use crate::DropdownStyle;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::prelude::BlockExt;
use ratatui::style::Style;
use ratatui::text::Text;
#[cfg(feature = "unstable-widget-ref")]
use ratatui::widgets::StatefulWidgetRef;
use ratatui::widgets::{Block, StatefulWidget, Widget};

/// Trigger widget.
#[derive(Debug, Default, Clone)]
pub struct DropdownButton<'a> {
    content: Text<'a>,
    style: Style,
    open_style: Option<Style>,
    focus_style: Option<Style>,
    block: Option<Block<'a>>,
}

/// State of the trigger.
#[derive(Debug, Clone)]
pub struct ButtonState {
    /// Complete area
    /// __readonly__. renewed for each render.
    pub area: Rect,
    /// Area inside the block.
    /// __readonly__. renewed for each render.
    pub inner: Rect,
    /// Keyboard focus.
    /// __read+write__
    pub focused: bool,

    pub non_exhaustive: NonExhaustive,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self {
            area: Default::default(),
            inner: Default::default(),
            focused: false,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl<'a> DropdownButton<'a> {
    pub fn new(content: impl Into<Text<'a>>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// Content of the trigger.
    pub fn content(mut self, content: impl Into<Text<'a>>) -> Self {
        self.content = content.into();
        self
    }

    /// Combined style.
    pub fn styles(mut self, styles: DropdownStyle) -> Self {
        if let Some(button) = styles.button {
            self.style = button;
        }
        if styles.button_open.is_some() {
            self.open_style = styles.button_open;
        }
        if styles.button_focus.is_some() {
            self.focus_style = styles.button_focus;
        }
        self
    }

    /// Base style.
    #[inline]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Style while the menu is open.
    #[inline]
    pub fn open_style(mut self, style: Style) -> Self {
        self.open_style = Some(style);
        self
    }

    /// Style when focused.
    #[inline]
    pub fn focus_style(mut self, style: Style) -> Self {
        self.focus_style = Some(style);
        self
    }

    /// Block.
    #[inline]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Inherent width.
    pub fn width(&self) -> u16 {
        self.content.width() as u16 + get_block_size(&self.block).width
    }

    /// Inherent height.
    pub fn height(&self) -> u16 {
        self.content.height() as u16 + get_block_size(&self.block).height
    }
}

#[cfg(feature = "unstable-widget-ref")]
impl<'a> StatefulWidgetRef for DropdownButton<'a> {
    type State = DropdownState;

    fn render_ref(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_button(self, area, buf, state);
    }
}

impl<'a> StatefulWidget for &DropdownButton<'a> {
    type State = DropdownState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_button(self, area, buf, state);
    }
}

impl StatefulWidget for DropdownButton<'_> {
    type State = DropdownState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_button(&self, area, buf, state);
    }
}

fn render_button(
    widget: &DropdownButton<'_>,
    area: Rect,
    buf: &mut Buffer,
    state: &mut DropdownState,
) {
    state.button.area = area;
    state.button.inner = widget.block.inner_if_some(area);

    let mut style = widget.style;
    if state.is_open() {
        if let Some(open_style) = widget.open_style {
            style = style.patch(open_style);
        }
    }
    if state.button.focused {
        style = style.patch(widget.focus_style.unwrap_or(revert_style(widget.style)));
    }

    if let Some(block) = &widget.block {
        block.clone().style(style).render(area, buf);
    } else {
        buf.set_style(area, style);
    }

    widget
        .content
        .clone()
        .style(style)
        .render(state.button.inner, buf);
}
