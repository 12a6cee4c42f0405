//!
//! Dropdown without animations.
//!
//! Selecting an item closes the menu at once and runs the callback.
//!
use crate::mini_salsa::{run_ui, setup_logging, MiniSalsaState};
use rat_dropdown::dropdown::{self, Dropdown, DropdownState};
use rat_dropdown::event::{DropdownOutcome, Outcome};
use rat_dropdown::item::DropdownItem;
use rat_dropdown::Motion;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{StatefulWidget, Widget};
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
            .motion(Motion::Instant)
            .item(DropdownItem::new("Item 1").on_select(move || {
                *t1.borrow_mut() = "Clicked Item 1".into();
            }))
            .item(DropdownItem::new("Item 2").on_select(move || {
                *t2.borrow_mut() = "Clicked Item 2".into();
            }))
            .item(DropdownItem::new("Item 3")),
    };

    run_ui(handle_stuff, repaint_stuff, tick_stuff, &mut data, &mut state)
}

struct Data {
    text: Rc<RefCell<String>>,
}

struct State {
    dropdown: DropdownState,
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
    let h = Layout::horizontal([Constraint::Length(2), Constraint::Length(5)]).split(l[1]);

    Line::from(data.text.borrow().as_str()).render(l[3], frame.buffer_mut());

    Dropdown::new(" ≡ ")
        .button_style(Style::new().black().on_white())
        .render(h[1], frame.buffer_mut(), &mut state.dropdown);

    Ok(())
}

fn handle_stuff(
    event: &crossterm::event::Event,
    _data: &mut Data,
    istate: &mut MiniSalsaState,
    state: &mut State,
) -> Result<Outcome, anyhow::Error> {
    let r = dropdown::handle_events(&mut state.dropdown, true, event);
    if let DropdownOutcome::Selected(n) = r {
        istate.status[0] = format!("Selected {}", n);
    }
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
