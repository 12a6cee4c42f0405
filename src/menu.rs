//!
//! The menu surface.
//!
//! It diverges from other widgets as this widget doesn't draw
//! *inside* the given area but aims to stay *outside* of it.
//! The area given to render is the area of the trigger, the
//! menu is placed relative to it with a [Placement].
//!
//! The surface is rendered as long as the menu is open *or*
//! its exit transition is still running. While fading it is
//! blended with whatever is already in the buffer, so render it
//! after everything that should appear below it.
//!
//! ```rust ignore
//! DropdownButton::new("≡")
//!     .render(trigger_area, frame.buffer_mut(), &mut state.dropdown);
//! // ... everything else ...
//! DropdownMenu::new()
//!     .render(state.dropdown.button.area, frame.buffer_mut(), &mut state.dropdown);
//! ```
//!
use crate::_private::NonExhaustive;
use crate::anim::AnimationControls;
use crate::dropdown::DropdownState;
use crate::item::{ItemColors, BASE_COLORS, HIGHLIGHT_COLORS, NEUTRAL_COLORS};
use crate::timer::TimerHandle;
use crate::util::{blend_buf_area, get_block_size};
use crate::{DropdownStyle, Placement};
use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};
use ratatui::prelude::BlockExt;
use ratatui::style::{Style, Stylize};
#[cfg(feature = "unstable-widget-ref")]
use ratatui::widgets::StatefulWidgetRef;
use ratatui::widgets::{Block, StatefulWidget, Widget};
use std::cmp::max;

/// Menu surface.
#[derive(Debug, Default, Clone)]
pub struct DropdownMenu<'a> {
    style: Style,
    neutral_style: Option<Style>,
    highlight_style: Option<Style>,
    disabled_style: Option<Style>,
    block: Option<Block<'a>>,

    width: Option<u16>,
    placement: Placement,
    offset: (i16, i16),
    boundary: Option<Rect>,
}

/// Visible state of the surface.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SurfacePhase {
    /// Not rendered.
    #[default]
    Closed,
    /// Rendered, fading in.
    Opening,
    /// Fully visible.
    Open,
    /// Rendered, fading out.
    Closing,
}

/// Resolved item colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub base: ItemColors,
    pub neutral: ItemColors,
    pub highlight: ItemColors,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base: BASE_COLORS,
            neutral: NEUTRAL_COLORS,
            highlight: HIGHLIGHT_COLORS,
        }
    }
}

/// State of the surface.
#[derive(Debug, Clone)]
pub struct MenuState {
    /// Total area.
    /// __readonly__. renewed for each render.
    pub area: Rect,
    /// Area inside the block.
    /// __readonly__. renewed for each render.
    pub widget_area: Rect,
    /// Areas for each item.
    /// __readonly__. renewed for each render.
    pub item_areas: Vec<Rect>,
    /// Item colors as last rendered.
    /// __readonly__. renewed for each render.
    pub palette: Palette,

    /// Highlighted item.
    /// __read+write__
    pub selected: Option<usize>,

    /// Visible state.
    /// __readonly__
    pub phase: SurfacePhase,
    /// Opacity of the surface.
    /// __readonly__
    pub opacity: AnimationControls<f32>,
    /// Timer for the end of the running transition.
    pub(crate) transition: Option<TimerHandle>,

    pub non_exhaustive: NonExhaustive,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            area: Default::default(),
            widget_area: Default::default(),
            item_areas: Default::default(),
            palette: Default::default(),
            selected: None,
            phase: Default::default(),
            opacity: AnimationControls::new(0.0),
            transition: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl MenuState {
    /// Clear the areas.
    pub fn clear_areas(&mut self) {
        self.area = Default::default();
        self.widget_area = Default::default();
        self.item_areas.clear();
    }

    /// Item at position.
    pub fn item_at(&self, pos: (u16, u16)) -> Option<usize> {
        self.item_areas
            .iter()
            .position(|v| v.contains(pos.into()))
    }
}

impl<'a> DropdownMenu<'a> {
    /// New
    pub fn new() -> Self {
        Default::default()
    }

    /// Combined style.
    pub fn styles(mut self, styles: DropdownStyle) -> Self {
        self.style = styles.style;
        if styles.neutral.is_some() {
            self.neutral_style = styles.neutral;
        }
        if styles.highlight.is_some() {
            self.highlight_style = styles.highlight;
        }
        if styles.disabled.is_some() {
            self.disabled_style = styles.disabled;
        }
        if let Some(block) = styles.block {
            self.block = Some(block);
        }
        if let Some(border_style) = styles.border_style {
            self.block = self.block.map(|v| v.border_style(border_style));
        }
        if let Some(placement) = styles.placement {
            self.placement = placement;
        }
        if let Some(offset) = styles.offset {
            self.offset = offset;
        }
        self
    }

    /// Base style.
    #[inline]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// First step of the selection flash.
    #[inline]
    pub fn neutral_style(mut self, style: Style) -> Self {
        self.neutral_style = Some(style);
        self
    }

    /// Highlighted item.
    #[inline]
    pub fn highlight_style(mut self, style: Style) -> Self {
        self.highlight_style = Some(style);
        self
    }

    /// Disabled item.
    #[inline]
    pub fn disabled_style(mut self, style: Style) -> Self {
        self.disabled_style = Some(style);
        self
    }

    /// Block.
    #[inline]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Block.
    #[inline]
    pub fn block_opt(mut self, block: Option<Block<'a>>) -> Self {
        self.block = block;
        self
    }

    /// Fixed width for the items.
    /// Default is the widest item.
    #[inline]
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Placement relative to the trigger.
    #[inline]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Extra offset after placement.
    #[inline]
    pub fn offset(mut self, offset: (i16, i16)) -> Self {
        self.offset = offset;
        self
    }

    /// Keep the menu inside this area.
    /// Default is the buffer area.
    #[inline]
    pub fn boundary(mut self, boundary: Rect) -> Self {
        self.boundary = Some(boundary);
        self
    }

    fn palette(&self) -> Palette {
        Palette {
            base: ItemColors::from_style(self.style, BASE_COLORS),
            neutral: ItemColors::from_style(self.neutral_style.unwrap_or_default(), NEUTRAL_COLORS),
            highlight: ItemColors::from_style(
                self.highlight_style.unwrap_or_default(),
                HIGHLIGHT_COLORS,
            ),
        }
    }

    /// Size of the surface with block and padding.
    pub fn size(&self, state: &DropdownState) -> Size {
        let block = get_block_size(&self.block);
        let width = if let Some(width) = self.width {
            width
        } else {
            state.items.iter().map(|v| v.width()).max().unwrap_or(10)
        };
        Size {
            width: width + 2 + block.width,
            height: state.items.len() as u16 + block.height,
        }
    }

    fn layout(&self, rel: Rect, size: Size, boundary: Rect) -> Rect {
        fn right(len: u16, within: u16) -> u16 {
            within.saturating_sub(len)
        }

        let mut offset = self.offset;

        let mut area = match self.placement {
            Placement::BelowLeft => Rect::new(rel.x, rel.bottom(), size.width, size.height),
            Placement::BelowRight => Rect::new(
                rel.x + right(size.width, rel.width),
                rel.bottom(),
                size.width,
                size.height,
            ),
            Placement::AboveLeft => Rect::new(
                rel.x,
                rel.y.saturating_sub(size.height),
                size.width,
                size.height,
            ),
            Placement::AboveRight => Rect::new(
                rel.x + right(size.width, rel.width),
                rel.y.saturating_sub(size.height),
                size.width,
                size.height,
            ),
            Placement::BelowOrAbove => {
                if (rel.bottom() + size.height).saturating_add_signed(self.offset.1)
                    <= boundary.bottom()
                {
                    Rect::new(rel.x, rel.bottom(), size.width, size.height)
                } else {
                    offset = (offset.0, -offset.1);
                    Rect::new(
                        rel.x,
                        rel.y.saturating_sub(size.height),
                        size.width,
                        size.height,
                    )
                }
            }
        };

        // offset
        area.x = area.x.saturating_add_signed(offset.0);
        area.y = area.y.saturating_add_signed(offset.1);

        // keep in sight
        if area.left() < boundary.left() {
            area.x = boundary.left();
        }
        if area.right() >= boundary.right() {
            let corr = area.right().saturating_sub(boundary.right());
            area.x = max(boundary.left(), area.x.saturating_sub(corr));
        }
        if area.top() < boundary.top() {
            area.y = boundary.top();
        }
        if area.bottom() >= boundary.bottom() {
            let corr = area.bottom().saturating_sub(boundary.bottom());
            area.y = max(boundary.top(), area.y.saturating_sub(corr));
        }

        // shrink to size
        if area.right() > boundary.right() {
            let corr = area.right() - boundary.right();
            area.width = area.width.saturating_sub(corr);
        }
        if area.bottom() > boundary.bottom() {
            let corr = area.bottom() - boundary.bottom();
            area.height = area.height.saturating_sub(corr);
        }

        area
    }
}

#[cfg(feature = "unstable-widget-ref")]
impl<'a> StatefulWidgetRef for DropdownMenu<'a> {
    type State = DropdownState;

    fn render_ref(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_menu(self, area, buf, state);
    }
}

impl<'a> StatefulWidget for &DropdownMenu<'a> {
    type State = DropdownState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_menu(self, area, buf, state);
    }
}

impl StatefulWidget for DropdownMenu<'_> {
    type State = DropdownState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_menu(&self, area, buf, state);
    }
}

fn render_menu(widget: &DropdownMenu<'_>, area: Rect, buf: &mut Buffer, state: &mut DropdownState) {
    state.menu.palette = widget.palette();

    if !state.is_mounted() {
        state.menu.clear_areas();
        return;
    }

    let size = widget.size(state);
    let boundary = widget.boundary.unwrap_or(buf.area);
    let menu_area = widget.layout(area, size, boundary);
    let inner = widget.block.inner_if_some(menu_area);

    state.menu.area = menu_area;
    state.menu.widget_area = inner;
    state.menu.item_areas.clear();
    for n in 0..state.items.len() as u16 {
        let row = Rect::new(inner.x, inner.y + n, inner.width, 1);
        if row.bottom() > inner.bottom() {
            break;
        }
        state.menu.item_areas.push(row);
    }

    let palette = state.menu.palette;
    let style = palette.base.style(widget.style);
    let disabled_style = style.patch(widget.disabled_style.unwrap_or(Style::new().dim()));

    // draw at full opacity, then blend.
    let mut tmp = Buffer::empty(menu_area);
    tmp.set_style(menu_area, style);
    if let Some(block) = &widget.block {
        block.clone().style(style).render(menu_area, &mut tmp);
    }

    for (n, item_area) in state.menu.item_areas.iter().enumerate() {
        let item = &state.items[n];

        let item_style = if let Some(colors) = &item.colors {
            colors.value().style(style)
        } else if item.disabled {
            disabled_style
        } else if state.menu.selected == Some(n) {
            palette.highlight.style(style)
        } else {
            style
        };

        tmp.set_style(*item_area, item_style);
        let text_area = Rect::new(
            item_area.x + 1,
            item_area.y,
            item_area.width.saturating_sub(2),
            1,
        );
        item.content.clone().style(item_style).render(text_area, &mut tmp);
    }

    blend_buf_area(&tmp, menu_area, *state.menu.opacity.value(), buf);
}
