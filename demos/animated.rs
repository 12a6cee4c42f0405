//!
//! Animated dropdown.
//!
//! The menu fades in and out. A selected item flashes before the
//! menu closes, the callback runs after that.
//!
use crate::mini_salsa::{run_ui, setup_logging, MiniSalsaState};
use rat_dropdown::dropdown::{self, Dropdown, DropdownState};
use rat_dropdown::event::{DropdownOutcome, Outcome};
use rat_dropdown::item::DropdownItem;
use rat_dropdown::menu::SurfacePhase;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
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
    istate: &mut MiniSalsaState,
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

    // something to fade over.
    frame
        .buffer_mut()
        .set_style(area, Style::new().bg(Color::Rgb(0x1e, 0x29, 0x3b)));

    Line::from(data.text.borrow().as_str()).render(l[3], frame.buffer_mut());

    Dropdown::new(" ≡ ")
        .button_style(Style::new().black().on_white())
        .render(h[1], frame.buffer_mut(), &mut state.dropdown);

    istate.status[0] = match state.dropdown.phase() {
        SurfacePhase::Closed => "Ctrl-Q to quit.".into(),
        phase => format!("{:?} {:.2}", phase, state.dropdown.opacity()),
    };

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
    let r = match state.dropdown.tick(now) {
        DropdownOutcome::Selected(n) => {
            log::debug!("selected {}", n);
            Outcome::Changed
        }
        r => r.into(),
    };
    Ok((r, state.dropdown.sleep_time(now)))
}
