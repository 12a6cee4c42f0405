use crate::anim::Interpolate;
use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};
use ratatui::prelude::BlockExt;
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;
use std::mem;

/// Returns a new style with fg and bg swapped.
///
/// This is not the same as setting Style::reversed().
/// The latter sends special controls to the terminal,
/// the former just swaps.
pub(crate) fn revert_style(mut style: Style) -> Style {
    mem::swap(&mut style.fg, &mut style.bg);
    style
}

pub(crate) fn get_block_size(block: &Option<Block<'_>>) -> Size {
    let area = Rect::new(0, 0, 20, 20);
    let inner = block.inner_if_some(area);
    Size {
        width: (inner.left() - area.left()) + (area.right() - inner.right()),
        height: (inner.top() - area.top()) + (area.bottom() - inner.bottom()),
    }
}

/// Copies the area of `src` onto `buf` with the given opacity.
///
/// Colors are mixed with what is already in `buf`. The symbol of
/// `src` wins from half opacity on. Below that the old symbol stays
/// and fades towards the new background.
pub(crate) fn blend_buf_area(src: &Buffer, area: Rect, opacity: f32, buf: &mut Buffer) {
    if opacity <= 0.0 {
        return;
    }

    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let Some(over) = src.cell((x, y)) else {
                continue;
            };
            let Some(under) = buf.cell_mut((x, y)) else {
                continue;
            };

            if opacity >= 1.0 {
                *under = over.clone();
                continue;
            }

            let under_bg = solid_bg(under.bg);
            let bg = under_bg.interpolate(&solid_bg(over.bg), opacity);
            if opacity >= 0.5 {
                let fg = under_bg.interpolate(&solid_fg(over.fg), opacity);
                under.set_symbol(over.symbol());
                under.modifier = over.modifier;
                under.set_fg(fg);
            } else {
                let fg = solid_fg(under.fg).interpolate(&solid_bg(over.bg), opacity);
                under.set_fg(fg);
            }
            under.set_bg(bg);
        }
    }
}

// Color::Reset can't be mixed. Assume a dark terminal.
fn solid_bg(color: Color) -> Color {
    match color {
        Color::Reset => Color::Rgb(0, 0, 0),
        c => c,
    }
}

fn solid_fg(color: Color) -> Color {
    match color {
        Color::Reset => Color::Rgb(0xc0, 0xc0, 0xc0),
        c => c,
    }
}
