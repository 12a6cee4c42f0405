//!
//! The dropdown assembled from its parts.
//!
//! The trigger is rendered with the rest of the ui, the menu
//! is rendered last so it covers everything else.
//!
use crate::mini_salsa::{run_ui, setup_logging, MiniSalsaState};
use rat_dropdown::button::DropdownButton;
use rat_dropdown::dropdown::{self, DropdownState};
use rat_dropdown::event::Outcome;
use rat_dropdown::item::DropdownItem;
use rat_dropdown::menu::DropdownMenu;
use rat_dropdown::{DropdownStyle, Placement};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, StatefulWidget, Widget};
use ratatui::Frame;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

mod mini_salsa;

fn main() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut data = Data {
        text: Rc::new(RefCell::new("Select an item".into())),
    };

    let t1 = data.text.clone();
    let t2 = data.text.clone();
    let mut state = State {
        dropdown: DropdownState::new()
            .item(DropdownItem::new("Item 1").on_select(move || {
                *t1.borrow_mut() = "Clicked Item 1".into();
            }))
            .item(DropdownItem::new("Item 2").on_select(move || {
                *t2.borrow_mut() = "Clicked Item 2".into();
            }))
            .item(DropdownItem::new("Item 3").disabled(true)),
    };

    run_ui(handle_stuff, repaint_stuff, tick_stuff, &mut data, &mut state)
}

struct Data {
    text: Rc<RefCell<String>>,
}

struct State {
    dropdown: DropdownState,
}

fn dropdown_style() -> DropdownStyle {
    DropdownStyle {
        style: Style::new().fg(Color::Rgb(0x37, 0x41, 0x51)).bg(Color::White),
        button: Some(Style::new().black().on_white()),
        button_open: Some(Style::new().white().on_blue()),
        highlight: Some(Style::new().white().on_light_blue()),
        block: Some(Block::bordered()),
        placement: Some(Placement::BelowOrAbove),
        ..Default::default()
    }
}

fn repaint_stuff(
    frame: &mut Frame<'_>,
    area: Rect,
    data: &mut Data,
    _istate: &mut MiniSalsaState,
    state: &mut State,
) -> Result<(), anyhow::Error> {
    let l = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);
    let h = Layout::horizontal([
        Constraint::Length(2),
        Constraint::Length(5),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .split(l[1]);

    DropdownButton::new(" ≡ ")
        .styles(dropdown_style())
        .render(h[1], frame.buffer_mut(), &mut state.dropdown);

    Line::from("Open the menu with a click or Enter.").render(h[3], frame.buffer_mut());
    for (n, row) in l[3].rows().enumerate() {
        if n == 0 {
            Line::from(data.text.borrow().as_str()).render(row, frame.buffer_mut());
        } else {
            Line::from("·".repeat(row.width as usize)).render(row, frame.buffer_mut());
        }
    }

    // last
    DropdownMenu::new().styles(dropdown_style()).render(
        state.dropdown.button.area,
        frame.buffer_mut(),
        &mut state.dropdown,
    );

    Ok(())
}

fn handle_stuff(
    event: &crossterm::event::Event,
    _data: &mut Data,
    _istate: &mut MiniSalsaState,
    state: &mut State,
) -> Result<Outcome, anyhow::Error> {
    let r = dropdown::handle_events(&mut state.dropdown, true, event);
    Ok(r.into())
}

fn tick_stuff(
    now: Instant,
    _data: &mut Data,
    _istate: &mut MiniSalsaState,
    state: &mut State,
) -> Result<(Outcome, Option<Duration>), anyhow::Error> {
    let r = state.dropdown.tick(now);
    Ok((r.into(), state.dropdown.sleep_time(now)))
}
