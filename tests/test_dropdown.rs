use rat_dropdown::dropdown::DropdownState;
use rat_dropdown::event::DropdownOutcome;
use rat_dropdown::item::{DropdownItem, SelectionStep};
use rat_dropdown::menu::SurfacePhase;
use rat_dropdown::Motion;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn mounted_invariant(state: &DropdownState) {
    assert_eq!(
        state.is_mounted(),
        state.is_open() || state.phase() == SurfacePhase::Closing
    );
}

fn items(text: &Rc<RefCell<String>>) -> DropdownState {
    let t1 = text.clone();
    let t2 = text.clone();
    DropdownState::new()
        .item(DropdownItem::new("Item 1").on_select(move || {
            *t1.borrow_mut() = "Clicked Item 1".into();
        }))
        .item(DropdownItem::new("Item 2").on_select(move || {
            *t2.borrow_mut() = "Clicked Item 2".into();
        }))
        .item(DropdownItem::new("Item 3"))
}

fn opened(state: &mut DropdownState, t0: Instant) -> Instant {
    assert_eq!(state.open_at(t0), true);
    state.tick(t0 + ms(100));
    assert_eq!(state.phase(), SurfacePhase::Open);
    t0 + ms(100)
}

#[test]
fn test_initial() {
    let state = DropdownState::new();
    assert_eq!(state.is_open(), false);
    assert_eq!(state.is_mounted(), false);
    assert_eq!(state.phase(), SurfacePhase::Closed);
    assert_eq!(state.opacity(), 0.0);
    assert_eq!(state.is_busy(), false);
    assert_eq!(state.is_animating(), false);
    assert_eq!(state.sleep_time(Instant::now()), None);
}

// trigger from closed: visible within one fade-in.
#[test]
fn test_open() {
    let t0 = Instant::now();
    let mut state = DropdownState::new().item(DropdownItem::new("Item 1"));

    assert_eq!(state.toggle_at(t0), true);
    assert_eq!(state.is_open(), true);
    assert_eq!(state.phase(), SurfacePhase::Opening);
    assert_eq!(state.opacity(), 0.0);
    assert_eq!(state.sleep_time(t0), Some(ms(16)));
    mounted_invariant(&state);

    assert_eq!(state.tick(t0 + ms(50)), DropdownOutcome::Changed);
    assert!(state.opacity() > 0.0);
    assert!(state.opacity() < 1.0);
    assert_eq!(state.phase(), SurfacePhase::Opening);

    assert_eq!(state.tick(t0 + ms(100)), DropdownOutcome::Changed);
    assert_eq!(state.opacity(), 1.0);
    assert_eq!(state.phase(), SurfacePhase::Open);
    assert_eq!(state.is_open(), true);
    assert_eq!(state.is_animating(), false);
    assert_eq!(state.sleep_time(t0 + ms(100)), None);
    mounted_invariant(&state);
}

#[test]
fn test_open_idempotent() {
    let t0 = Instant::now();
    let mut state = DropdownState::new().item(DropdownItem::new("Item 1"));

    assert_eq!(state.open_at(t0), true);
    state.tick(t0 + ms(50));
    let opacity = state.opacity();

    assert_eq!(state.open_at(t0 + ms(50)), false);
    assert_eq!(state.is_open(), true);
    assert_eq!(state.opacity(), opacity);
    assert_eq!(state.phase(), SurfacePhase::Opening);

    // still the first entrance
    state.tick(t0 + ms(100));
    assert_eq!(state.phase(), SurfacePhase::Open);
    assert_eq!(state.opacity(), 1.0);

    assert_eq!(state.open_at(t0 + ms(200)), false);
    assert_eq!(state.phase(), SurfacePhase::Open);
    assert_eq!(state.opacity(), 1.0);
}

#[test]
fn test_selection_order() {
    let t0 = Instant::now();
    let text = Rc::new(RefCell::new(String::from("Select an item")));
    let mut state = items(&text);
    let palette = state.menu.palette;

    let t1 = opened(&mut state, t0);

    assert_eq!(state.select_at(0, t1), DropdownOutcome::Changed);
    assert_eq!(state.is_busy(), true);
    assert_eq!(state.selection_item(), Some(0));
    assert_eq!(state.selection_step(), Some(SelectionStep::Neutral));
    assert_eq!(state.items[0].colors.as_ref().map(|v| *v.value()), Some(palette.highlight));

    // neutral
    assert_eq!(state.tick(t1 + ms(39)), DropdownOutcome::Changed);
    assert_eq!(state.selection_step(), Some(SelectionStep::Neutral));
    assert_eq!(state.tick(t1 + ms(40)), DropdownOutcome::Changed);
    assert_eq!(state.selection_step(), Some(SelectionStep::Highlight));
    assert_eq!(state.items[0].colors.as_ref().map(|v| *v.value()), Some(palette.neutral));

    // highlight
    state.tick(t1 + ms(79));
    assert_eq!(state.selection_step(), Some(SelectionStep::Highlight));
    state.tick(t1 + ms(80));
    assert_eq!(state.selection_step(), Some(SelectionStep::Pause));
    assert_eq!(state.items[0].colors.as_ref().map(|v| *v.value()), Some(palette.highlight));

    // pause
    state.tick(t1 + ms(154));
    assert_eq!(state.selection_step(), Some(SelectionStep::Pause));
    assert_eq!(state.phase(), SurfacePhase::Open);
    state.tick(t1 + ms(155));
    assert_eq!(state.selection_step(), Some(SelectionStep::Closing));
    assert_eq!(state.phase(), SurfacePhase::Closing);

    // exit transition
    state.tick(t1 + ms(300));
    assert_eq!(state.is_open(), true);
    assert_eq!(state.is_mounted(), true);
    assert!(state.opacity() < 1.0);
    assert_eq!(text.borrow().as_str(), "Select an item");
    mounted_invariant(&state);

    state.tick(t1 + ms(354));
    assert_eq!(state.is_open(), true);
    assert_eq!(text.borrow().as_str(), "Select an item");

    assert_eq!(state.tick(t1 + ms(355)), DropdownOutcome::Selected(0));
    assert_eq!(state.is_open(), false);
    assert_eq!(state.is_mounted(), false);
    assert_eq!(state.is_busy(), false);
    assert_eq!(state.opacity(), 0.0);
    assert_eq!(text.borrow().as_str(), "Clicked Item 1");
    assert_eq!(state.items[0].colors.is_none(), true);
    assert_eq!(state.sleep_time(t1 + ms(355)), None);
    mounted_invariant(&state);
}

#[test]
fn test_selection_steps() {
    let t0 = Instant::now();
    let log = Rc::new(RefCell::new(Vec::new()));

    let l = log.clone();
    let mut state = DropdownState::new().item(DropdownItem::new("Item 1").on_select(move || {
        l.borrow_mut().push("on_select");
    }));

    let mut t = opened(&mut state, t0);
    state.select_at(0, t);

    let mut last = state.selection_step();
    let mut was_open = state.is_open();
    for _ in 0..1000 {
        t += ms(1);
        let r = state.tick(t);

        if state.selection_step() != last {
            last = state.selection_step();
            log.borrow_mut().push(match last {
                Some(SelectionStep::Neutral) => "neutral",
                Some(SelectionStep::Highlight) => "highlight",
                Some(SelectionStep::Pause) => "pause",
                Some(SelectionStep::Closing) => "closing",
                None => "done",
            });
        }
        if was_open && !state.is_open() {
            was_open = false;
            log.borrow_mut().push("closed");
        }
        mounted_invariant(&state);

        if r == DropdownOutcome::Selected(0) {
            break;
        }
    }

    assert_eq!(
        log.borrow().as_slice(),
        &["highlight", "pause", "closing", "on_select", "done", "closed"]
    );
    assert_eq!(state.is_open(), false);
}

#[test]
fn test_no_callback() {
    let t0 = Instant::now();
    let text = Rc::new(RefCell::new(String::from("Select an item")));
    let mut state = items(&text);
    assert_eq!(state.items[2].has_on_select(), false);

    let mut t = opened(&mut state, t0);
    assert_eq!(state.select_at(2, t), DropdownOutcome::Changed);

    let mut r = DropdownOutcome::Continue;
    for _ in 0..100 {
        t += ms(10);
        r = state.tick(t);
        if r != DropdownOutcome::Changed && r != DropdownOutcome::Continue {
            break;
        }
    }

    assert_eq!(r, DropdownOutcome::Selected(2));
    assert_eq!(state.is_open(), false);
    assert_eq!(state.is_mounted(), false);
    assert_eq!(text.borrow().as_str(), "Select an item");
}

#[test]
fn test_reopen() {
    let t0 = Instant::now();
    let mut state = DropdownState::new().item(DropdownItem::new("Item 1"));

    let t1 = opened(&mut state, t0);
    assert_eq!(state.dismiss_at(t1), true);
    assert_eq!(state.is_open(), false);
    assert_eq!(state.phase(), SurfacePhase::Closing);
    mounted_invariant(&state);

    state.tick(t1 + ms(100));
    assert!(state.opacity() > 0.0);
    assert!(state.opacity() < 1.0);

    // entrance starts from scratch
    assert_eq!(state.open_at(t1 + ms(100)), true);
    assert_eq!(state.opacity(), 0.0);
    assert_eq!(state.phase(), SurfacePhase::Opening);

    // the old exit is gone
    state.tick(t1 + ms(200));
    assert_eq!(state.phase(), SurfacePhase::Open);
    assert_eq!(state.opacity(), 1.0);
    assert_eq!(state.is_open(), true);
    state.tick(t1 + ms(400));
    assert_eq!(state.phase(), SurfacePhase::Open);
    assert_eq!(state.is_open(), true);
}

#[test]
fn test_dismiss() {
    let t0 = Instant::now();
    let mut state = DropdownState::new().item(DropdownItem::new("Item 1"));

    assert_eq!(state.dismiss_at(t0), false);

    let t1 = opened(&mut state, t0);
    assert_eq!(state.toggle_at(t1), true);
    assert_eq!(state.is_open(), false);
    assert_eq!(state.is_mounted(), true);

    assert_eq!(state.dismiss_at(t1), false);

    state.tick(t1 + ms(199));
    assert_eq!(state.is_mounted(), true);
    assert_eq!(state.tick(t1 + ms(200)), DropdownOutcome::Changed);
    assert_eq!(state.is_mounted(), false);
    assert_eq!(state.phase(), SurfacePhase::Closed);
}

#[test]
fn test_close_menu() {
    let t0 = Instant::now();
    let mut state = DropdownState::new().item(DropdownItem::new("Item 1"));

    assert_eq!(state.close_menu_at(t0), DropdownOutcome::Unchanged);

    let t1 = opened(&mut state, t0);
    assert_eq!(state.close_menu_at(t1), DropdownOutcome::Changed);
    assert_eq!(state.is_open(), true);
    assert_eq!(state.phase(), SurfacePhase::Closing);
    assert_eq!(state.close_menu_at(t1), DropdownOutcome::Unchanged);

    state.tick(t1 + ms(199));
    assert_eq!(state.is_open(), true);
    state.tick(t1 + ms(200));
    assert_eq!(state.is_open(), false);
    assert_eq!(state.is_mounted(), false);
}

#[test]
fn test_reentrant_selection() {
    let t0 = Instant::now();
    let text = Rc::new(RefCell::new(String::from("Select an item")));
    let mut state = items(&text);

    let t1 = opened(&mut state, t0);
    assert_eq!(state.select_at(0, t1), DropdownOutcome::Changed);

    let t2 = t1 + ms(10);
    assert_eq!(state.select_at(1, t2), DropdownOutcome::Unchanged);
    assert_eq!(state.toggle_at(t2), false);
    assert_eq!(state.dismiss_at(t2), false);
    assert_eq!(state.close_menu_at(t2), DropdownOutcome::Unchanged);
    assert_eq!(state.selection_item(), Some(0));
    assert_eq!(state.items[1].colors.is_none(), true);

    let mut t = t2;
    let mut selected = Vec::new();
    for _ in 0..100 {
        t += ms(10);
        if let DropdownOutcome::Selected(n) = state.tick(t) {
            selected.push(n);
        }
        assert_eq!(state.select_at(1, t), {
            if state.is_busy() {
                DropdownOutcome::Unchanged
            } else {
                DropdownOutcome::Continue
            }
        });
    }

    assert_eq!(selected, vec![0]);
    assert_eq!(text.borrow().as_str(), "Clicked Item 1");
    assert_eq!(state.is_open(), false);
}

#[test]
fn test_select_closed() {
    let t0 = Instant::now();
    let mut state = DropdownState::new().item(DropdownItem::new("Item 1"));

    assert_eq!(state.select_at(0, t0), DropdownOutcome::Continue);

    let t1 = opened(&mut state, t0);
    assert_eq!(state.select_at(5, t1), DropdownOutcome::Continue);
    assert_eq!(state.is_busy(), false);

    state.dismiss_at(t1);
    assert_eq!(state.select_at(0, t1), DropdownOutcome::Continue);
    assert_eq!(state.is_busy(), false);
}

#[test]
fn test_disabled() {
    let t0 = Instant::now();
    let mut state = DropdownState::new()
        .item(DropdownItem::new("Item 1").disabled(true))
        .item(DropdownItem::new("Item 2"))
        .item(DropdownItem::new("Item 3").disabled(true))
        .item(DropdownItem::new("Item 4"));

    let t1 = opened(&mut state, t0);
    assert_eq!(state.select_at(0, t1), DropdownOutcome::Unchanged);
    assert_eq!(state.is_busy(), false);

    assert_eq!(state.next_item(), true);
    assert_eq!(state.selected(), Some(1));
    assert_eq!(state.next_item(), true);
    assert_eq!(state.selected(), Some(3));
    assert_eq!(state.next_item(), false);
    assert_eq!(state.selected(), Some(3));
    assert_eq!(state.prev_item(), true);
    assert_eq!(state.selected(), Some(1));
    assert_eq!(state.prev_item(), false);
    assert_eq!(state.selected(), Some(1));

    assert_eq!(state.last_item(), true);
    assert_eq!(state.selected(), Some(3));
    assert_eq!(state.first_item(), true);
    assert_eq!(state.selected(), Some(1));

    assert_eq!(state.highlight(Some(2)), false);
    assert_eq!(state.selected(), Some(1));
    assert_eq!(state.highlight(None), true);
    assert_eq!(state.selected(), None);
}

#[test]
fn test_instant() {
    let t0 = Instant::now();
    let text = Rc::new(RefCell::new(String::from("Select an item")));
    let mut state = items(&text).motion(Motion::Instant);

    assert_eq!(state.toggle_at(t0), true);
    assert_eq!(state.is_open(), true);
    assert_eq!(state.phase(), SurfacePhase::Open);
    assert_eq!(state.opacity(), 1.0);
    assert_eq!(state.sleep_time(t0), None);

    assert_eq!(state.select_at(1, t0), DropdownOutcome::Selected(1));
    assert_eq!(state.is_open(), false);
    assert_eq!(state.is_mounted(), false);
    assert_eq!(state.is_busy(), false);
    assert_eq!(text.borrow().as_str(), "Clicked Item 2");
    assert_eq!(state.sleep_time(t0), None);

    state.toggle_at(t0);
    assert_eq!(state.toggle_at(t0), true);
    assert_eq!(state.is_open(), false);
    assert_eq!(state.is_mounted(), false);
}
