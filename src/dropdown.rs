//!
//! The dropdown state and the all-in-one widget.
//!
//! [DropdownState] is the controller shared by all parts of one
//! dropdown. It owns the open flag, the item callbacks, the
//! animations and the timers. Every part gets it passed explicitly
//! as its render state.
//!
//! ```rust ignore
//! let mut dropdown = DropdownState::new()
//!     .item(DropdownItem::new("Item 1").on_select(move || text.set("Clicked Item 1")))
//!     .item(DropdownItem::new("Item 2"));
//!
//! Dropdown::new("≡").render(area, frame.buffer_mut(), &mut dropdown);
//! ```
//!
//! The application has to [tick](DropdownState::tick) the state to
//! run the animations.
//!
use crate::_private::NonExhaustive;
use crate::anim::{Preset, Variant, Variants};
use crate::button::{ButtonState, DropdownButton};
use crate::event::DropdownOutcome;
use crate::item::{DropdownItem, ItemState, SelectionStep, Sequence};
use crate::menu::{DropdownMenu, MenuState, SurfacePhase};
use crate::timer::{TimerDef, TimerHandle, Timers};
use crate::{DropdownStyle, Motion, Placement, Timing};
use crossterm::event::{Event, MouseEvent};
use log::debug;
use rat_event::{ct_event, flow, HandleEvent, MouseOnly, Popup, Regular};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Text;
#[cfg(feature = "unstable-widget-ref")]
use ratatui::widgets::StatefulWidgetRef;
use ratatui::widgets::{Block, StatefulWidget};
use std::cmp::{max, min};
use std::time::{Duration, Instant};

/// Trigger and menu in one widget.
///
/// The menu is rendered right after the trigger, so render this
/// widget after everything the menu might cover.
#[derive(Debug, Default, Clone)]
pub struct Dropdown<'a> {
    button: DropdownButton<'a>,
    menu: DropdownMenu<'a>,
}

/// State & event handling.
pub struct DropdownState {
    /// Trigger.
    /// __read+write__
    pub button: ButtonState,
    /// Menu surface.
    /// __read+write__
    pub menu: MenuState,
    /// Items.
    /// __read+write__
    pub items: Vec<ItemState>,

    /// Animated or not.
    /// __read+write__
    pub motion: Motion,
    /// Durations.
    /// __read+write__
    pub timing: Timing,

    open: bool,
    timers: Timers,
    sequence: Option<Sequence>,

    pub non_exhaustive: NonExhaustive,
}

impl<'a> Dropdown<'a> {
    pub fn new(trigger: impl Into<Text<'a>>) -> Self {
        Self {
            button: DropdownButton::new(trigger),
            menu: DropdownMenu::new(),
        }
    }

    /// Combined style.
    pub fn styles(mut self, styles: DropdownStyle) -> Self {
        self.button = self.button.styles(styles.clone());
        self.menu = self.menu.styles(styles);
        self
    }

    /// Trigger style.
    pub fn button_style(mut self, style: Style) -> Self {
        self.button = self.button.style(style);
        self
    }

    /// Menu style.
    pub fn style(mut self, style: Style) -> Self {
        self.menu = self.menu.style(style);
        self
    }

    /// Highlighted item.
    pub fn highlight_style(mut self, style: Style) -> Self {
        self.menu = self.menu.highlight_style(style);
        self
    }

    /// First step of the selection flash.
    pub fn neutral_style(mut self, style: Style) -> Self {
        self.menu = self.menu.neutral_style(style);
        self
    }

    /// Block for the menu.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.menu = self.menu.block(block);
        self
    }

    /// Fixed item width.
    pub fn width(mut self, width: u16) -> Self {
        self.menu = self.menu.width(width);
        self
    }

    /// Menu placement.
    pub fn placement(mut self, placement: Placement) -> Self {
        self.menu = self.menu.placement(placement);
        self
    }

    /// Trigger width.
    pub fn button_width(&self) -> u16 {
        self.button.width()
    }
}

#[cfg(feature = "unstable-widget-ref")]
impl<'a> StatefulWidgetRef for Dropdown<'a> {
    type State = DropdownState;

    fn render_ref(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(self, area, buf, state);
    }
}

impl<'a> StatefulWidget for &Dropdown<'a> {
    type State = DropdownState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(self, area, buf, state);
    }
}

impl StatefulWidget for Dropdown<'_> {
    type State = DropdownState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(&self, area, buf, state);
    }
}

fn render_ref(widget: &Dropdown<'_>, area: Rect, buf: &mut Buffer, state: &mut DropdownState) {
    (&widget.button).render(area, buf, state);
    let trigger = state.button.area;
    (&widget.menu).render(trigger, buf, state);
}

impl Default for DropdownState {
    fn default() -> Self {
        Self {
            button: Default::default(),
            menu: Default::default(),
            items: Default::default(),
            motion: Default::default(),
            timing: Default::default(),
            open: false,
            timers: Default::default(),
            sequence: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl std::fmt::Debug for DropdownState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropdownState")
            .field("button", &self.button)
            .field("menu", &self.menu)
            .field("items", &self.items)
            .field("motion", &self.motion)
            .field("timing", &self.timing)
            .field("open", &self.open)
            .field("timers", &self.timers)
            .field("sequence", &self.sequence)
            .finish()
    }
}

#[allow(clippy::len_without_is_empty)]
impl DropdownState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item.
    pub fn item(mut self, item: DropdownItem) -> Self {
        self.items.push(item.into());
        self
    }

    /// Add items.
    pub fn items(mut self, items: impl IntoIterator<Item = DropdownItem>) -> Self {
        self.items.extend(items.into_iter().map(ItemState::from));
        self
    }

    /// Animated or not.
    pub fn motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    /// Durations.
    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Add an item.
    pub fn add_item(&mut self, item: DropdownItem) {
        self.items.push(item.into());
    }

    /// Replace all items.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = DropdownItem>) {
        self.items = items.into_iter().map(ItemState::from).collect();
        if let Some(selected) = self.menu.selected {
            if selected >= self.items.len() {
                self.menu.selected = None;
            }
        }
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The open flag.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Is the menu surface rendered. This is true while the menu
    /// is open and while the exit transition runs.
    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.menu.phase != SurfacePhase::Closed
    }

    /// Visible state of the menu.
    #[inline]
    pub fn phase(&self) -> SurfacePhase {
        self.menu.phase
    }

    /// Current opacity of the menu.
    #[inline]
    pub fn opacity(&self) -> f32 {
        *self.menu.opacity.value()
    }

    /// A selection sequence is running.
    /// All input for the dropdown is ignored until it finishes.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.sequence.is_some()
    }

    /// Step of the running selection sequence.
    pub fn selection_step(&self) -> Option<SelectionStep> {
        self.sequence.map(|v| v.step)
    }

    /// Item of the running selection sequence.
    pub fn selection_item(&self) -> Option<usize> {
        self.sequence.map(|v| v.item)
    }

    /// Any animation running.
    pub fn is_animating(&self) -> bool {
        self.menu.opacity.is_running()
            || self
                .items
                .iter()
                .any(|v| v.colors.as_ref().is_some_and(|w| w.is_running()))
    }

    /// Time until something needs to happen.
    ///
    /// While an animation runs this is at most the frame
    /// interval of the [Timing].
    pub fn sleep_time(&self, now: Instant) -> Option<Duration> {
        let timer = self.timers.sleep_time(now);
        if self.is_animating() {
            Some(timer.map_or(self.timing.frame, |v| min(v, self.timing.frame)))
        } else {
            timer
        }
    }

    /// Presets for the surface opacity.
    pub fn surface_variants(&self) -> Variants<f32> {
        Variants {
            open: Variant {
                value: 1.0,
                transition: self.timing.fade_in,
            },
            closed: Variant {
                value: 0.0,
                transition: self.timing.fade_out,
            },
        }
    }

    /// Highlighted item.
    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.menu.selected
    }

    /// Highlight an item. Disabled items are not highlighted.
    pub fn highlight(&mut self, select: Option<usize>) -> bool {
        let old = self.menu.selected;
        match select {
            Some(n) if self.items.get(n).is_some_and(|v| !v.disabled) => {
                self.menu.selected = Some(n);
            }
            Some(_) => {}
            None => self.menu.selected = None,
        }
        old != self.menu.selected
    }

    /// Highlight the next item.
    pub fn next_item(&mut self) -> bool {
        let old = self.menu.selected;
        let start = old.map(|v| v + 1).unwrap_or(0);
        self.menu.selected = (start..self.items.len())
            .find(|n| !self.items[*n].disabled)
            .or(old);
        old != self.menu.selected
    }

    /// Highlight the previous item.
    pub fn prev_item(&mut self) -> bool {
        let old = self.menu.selected;
        let end = old.unwrap_or(self.items.len());
        self.menu.selected = (0..end).rev().find(|n| !self.items[*n].disabled).or(old);
        old != self.menu.selected
    }

    /// Highlight the first item.
    pub fn first_item(&mut self) -> bool {
        let old = self.menu.selected;
        self.menu.selected = (0..self.items.len()).find(|n| !self.items[*n].disabled);
        old != self.menu.selected
    }

    /// Highlight the last item.
    pub fn last_item(&mut self) -> bool {
        let old = self.menu.selected;
        self.menu.selected = (0..self.items.len())
            .rev()
            .find(|n| !self.items[*n].disabled);
        old != self.menu.selected
    }

    /// Item at the position.
    pub fn item_at(&self, pos: (u16, u16)) -> Option<usize> {
        self.menu.item_at(pos)
    }

    /// Flip the open flag.
    pub fn toggle(&mut self) -> bool {
        self.toggle_at(Instant::now())
    }

    /// Flip the open flag.
    ///
    /// Ignored while a selection sequence runs.
    pub fn toggle_at(&mut self, now: Instant) -> bool {
        if self.is_busy() {
            return false;
        }
        if self.open {
            self.dismiss_at(now)
        } else {
            self.open_at(now)
        }
    }

    /// Open the menu.
    pub fn open(&mut self) -> bool {
        self.open_at(Instant::now())
    }

    /// Open the menu and start the entrance transition.
    ///
    /// Does nothing if the menu is already open or a selection
    /// sequence runs. Reopening a menu that is still fading out
    /// starts the entrance from zero opacity again.
    pub fn open_at(&mut self, now: Instant) -> bool {
        if self.is_busy() || self.open {
            return false;
        }
        debug!("dropdown open");
        self.open = true;
        self.cancel_transition();
        for item in &mut self.items {
            item.reset_colors();
        }
        self.menu.selected = None;

        match self.motion {
            Motion::Instant => {
                self.menu.opacity.set(1.0);
                self.menu.phase = SurfacePhase::Open;
            }
            Motion::Animated => {
                self.menu.opacity.set(0.0);
                self.menu.phase = SurfacePhase::Opening;
                let variants = self.surface_variants();
                let done = self.menu.opacity.start_variant(&variants, Preset::Open, now);
                self.menu.transition = Some(self.timers.add(TimerDef::new().next(done), now));
            }
        }
        true
    }

    /// Close the menu.
    pub fn dismiss(&mut self) -> bool {
        self.dismiss_at(Instant::now())
    }

    /// Close the menu right away. The open flag is cleared now,
    /// the surface stays until the exit transition is finished.
    ///
    /// This is what a click outside, Esc or the trigger do.
    /// Ignored while a selection sequence runs.
    pub fn dismiss_at(&mut self, now: Instant) -> bool {
        if self.is_busy() || !self.open {
            return false;
        }
        debug!("dropdown dismiss");
        self.open = false;
        self.start_exit(now);
        true
    }

    /// Close the menu.
    pub fn close_menu(&mut self) -> DropdownOutcome {
        self.close_menu_at(Instant::now())
    }

    /// Fade out the menu and clear the open flag *after* the exit
    /// transition has finished.
    ///
    /// Ignored while a selection sequence runs, the sequence
    /// will close the menu by itself.
    pub fn close_menu_at(&mut self, now: Instant) -> DropdownOutcome {
        if self.is_busy() || !self.open || self.menu.phase == SurfacePhase::Closing {
            return DropdownOutcome::Unchanged;
        }
        debug!("dropdown close_menu");
        self.start_exit(now)
    }

    /// Select an item.
    pub fn select(&mut self, n: usize) -> DropdownOutcome {
        self.select_at(n, Instant::now())
    }

    /// Start the selection sequence for the item.
    ///
    /// With [Motion::Instant] the menu closes, the callback runs
    /// and this returns [DropdownOutcome::Selected].
    ///
    /// Otherwise this starts the flash and returns
    /// [DropdownOutcome::Changed]. Some later [tick](Self::tick)
    /// will finish the sequence and return [DropdownOutcome::Selected].
    ///
    /// A second selection while one is running is ignored.
    pub fn select_at(&mut self, n: usize, now: Instant) -> DropdownOutcome {
        if self.is_busy() {
            return DropdownOutcome::Unchanged;
        }
        if !self.open || self.menu.phase == SurfacePhase::Closing {
            return DropdownOutcome::Continue;
        }
        let Some(item) = self.items.get_mut(n) else {
            return DropdownOutcome::Continue;
        };
        if item.disabled {
            return DropdownOutcome::Unchanged;
        }

        debug!("dropdown select {}", n);
        self.menu.selected = Some(n);

        match self.motion {
            Motion::Instant => {
                self.sequence = Some(Sequence {
                    item: n,
                    step: SelectionStep::Closing,
                    timer: None,
                });
                self.start_exit(now)
            }
            Motion::Animated => {
                let palette = self.menu.palette;
                let mut colors = crate::anim::AnimationControls::new(palette.highlight);
                let done = colors.start(palette.neutral, self.timing.flash, now);
                item.colors = Some(colors);
                self.sequence = Some(Sequence {
                    item: n,
                    step: SelectionStep::Neutral,
                    timer: Some(self.timers.add(TimerDef::new().next(done), now)),
                });
                DropdownOutcome::Changed
            }
        }
    }

    /// Run the animations and timers up to `now`.
    ///
    /// Returns [DropdownOutcome::Selected] when a selection sequence
    /// finished with this call, [DropdownOutcome::Changed] if
    /// anything visible changed and [DropdownOutcome::Continue]
    /// otherwise.
    pub fn tick(&mut self, now: Instant) -> DropdownOutcome {
        let mut r = DropdownOutcome::Continue;

        if self.menu.opacity.advance(now) {
            r = DropdownOutcome::Changed;
        }
        for item in &mut self.items {
            if let Some(colors) = &mut item.colors {
                if colors.advance(now) {
                    r = DropdownOutcome::Changed;
                }
            }
        }

        while let Some(timeout) = self.timers.read(now) {
            r = max(r, self.timeout(timeout.handle, now));
        }

        r
    }

    fn timeout(&mut self, handle: TimerHandle, now: Instant) -> DropdownOutcome {
        if self.menu.transition == Some(handle) {
            self.menu.transition = None;
            match self.menu.phase {
                SurfacePhase::Opening => {
                    debug!("dropdown opened");
                    self.menu.phase = SurfacePhase::Open;
                    DropdownOutcome::Changed
                }
                SurfacePhase::Closing => self.finish_exit(),
                _ => DropdownOutcome::Unchanged,
            }
        } else if self.sequence.and_then(|v| v.timer) == Some(handle) {
            self.next_step(now)
        } else {
            DropdownOutcome::Continue
        }
    }

    fn next_step(&mut self, now: Instant) -> DropdownOutcome {
        let Some(mut sequence) = self.sequence else {
            return DropdownOutcome::Continue;
        };
        sequence.timer = None;

        match sequence.step {
            SelectionStep::Neutral => {
                let highlight = self.menu.palette.highlight;
                let done = match self
                    .items
                    .get_mut(sequence.item)
                    .and_then(|v| v.colors.as_mut())
                {
                    Some(colors) => colors.start(highlight, self.timing.flash, now),
                    None => now,
                };
                sequence.step = SelectionStep::Highlight;
                sequence.timer = Some(self.timers.add(TimerDef::new().next(done), now));
            }
            SelectionStep::Highlight => {
                sequence.step = SelectionStep::Pause;
                sequence.timer = Some(
                    self.timers
                        .add(TimerDef::new().timer(self.timing.pause), now),
                );
            }
            SelectionStep::Pause => {
                debug!("dropdown selection closes menu");
                sequence.step = SelectionStep::Closing;
                self.sequence = Some(sequence);
                return self.start_exit(now);
            }
            SelectionStep::Closing => {}
        }

        debug!("dropdown selection {:?}", sequence.step);
        self.sequence = Some(sequence);
        DropdownOutcome::Changed
    }

    fn cancel_transition(&mut self) {
        if let Some(transition) = self.menu.transition.take() {
            self.timers.remove(transition);
        }
    }

    fn start_exit(&mut self, now: Instant) -> DropdownOutcome {
        self.cancel_transition();
        match self.motion {
            Motion::Instant => self.finish_exit(),
            Motion::Animated => {
                self.menu.phase = SurfacePhase::Closing;
                let variants = self.surface_variants();
                let done = self.menu.opacity.start_variant(&variants, Preset::Closed, now);
                self.menu.transition = Some(self.timers.add(TimerDef::new().next(done), now));
                DropdownOutcome::Changed
            }
        }
    }

    /// Unmount the surface and clear the open flag. Then finish
    /// a waiting selection sequence.
    fn finish_exit(&mut self) -> DropdownOutcome {
        debug!("dropdown closed");
        self.open = false;
        self.menu.phase = SurfacePhase::Closed;
        self.menu.opacity.set(0.0);
        self.menu.selected = None;
        self.menu.clear_areas();
        for item in &mut self.items {
            item.reset_colors();
        }

        match self.sequence {
            Some(sequence) if sequence.step == SelectionStep::Closing => {
                self.sequence = None;
                if let Some(item) = self.items.get_mut(sequence.item) {
                    item.fire();
                }
                DropdownOutcome::Selected(sequence.item)
            }
            _ => DropdownOutcome::Changed,
        }
    }
}

impl HandleEvent<Event, Popup, DropdownOutcome> for DropdownState {
    fn handle(&mut self, event: &Event, _qualifier: Popup) -> DropdownOutcome {
        if self.is_busy() {
            // committed to closing. swallow everything aimed at the dropdown.
            return match event {
                Event::Key(_) => DropdownOutcome::Unchanged,
                Event::Mouse(MouseEvent { column, row, .. })
                    if self.menu.area.contains((*column, *row).into())
                        || self.button.area.contains((*column, *row).into()) =>
                {
                    DropdownOutcome::Unchanged
                }
                _ => DropdownOutcome::Continue,
            };
        }

        if !self.open {
            return DropdownOutcome::Continue;
        }

        let now = Instant::now();
        match event {
            ct_event!(keycode press Esc) => self.dismiss_at(now).into(),
            ct_event!(keycode press Up) => self.prev_item().into(),
            ct_event!(keycode press Down) => self.next_item().into(),
            ct_event!(keycode press Home) => self.first_item().into(),
            ct_event!(keycode press End) => self.last_item().into(),
            ct_event!(keycode press Enter) | ct_event!(key press ' ') => {
                if let Some(selected) = self.menu.selected {
                    self.select_at(selected, now)
                } else {
                    DropdownOutcome::Unchanged
                }
            }
            Event::Key(_) => DropdownOutcome::Unchanged,
            ct_event!(mouse moved for x,y) if self.menu.area.contains((*x, *y).into()) => {
                match self.item_at((*x, *y)) {
                    Some(n) => self.highlight(Some(n)).into(),
                    None => DropdownOutcome::Unchanged,
                }
            }
            ct_event!(mouse down Left for x,y) if self.menu.area.contains((*x, *y).into()) => {
                match self.item_at((*x, *y)) {
                    Some(n) => self.select_at(n, now),
                    None => DropdownOutcome::Unchanged,
                }
            }
            ct_event!(mouse down Left for x,y)
            | ct_event!(mouse down Right for x,y)
            | ct_event!(mouse down Middle for x,y)
                if !self.menu.area.contains((*x, *y).into())
                    && !self.button.area.contains((*x, *y).into()) =>
            {
                self.dismiss_at(now).into()
            }
            _ => DropdownOutcome::Continue,
        }
    }
}

impl HandleEvent<Event, Regular, DropdownOutcome> for DropdownState {
    fn handle(&mut self, event: &Event, _qualifier: Regular) -> DropdownOutcome {
        flow!(self.handle(event, Popup));

        if self.button.focused {
            let now = Instant::now();
            flow!(match event {
                ct_event!(keycode press Enter) | ct_event!(key press ' ') => {
                    if self.is_busy() {
                        DropdownOutcome::Unchanged
                    } else {
                        self.toggle_at(now).into()
                    }
                }
                ct_event!(keycode press Down) => {
                    if self.open_at(now) {
                        self.first_item();
                        DropdownOutcome::Changed
                    } else {
                        DropdownOutcome::Unchanged
                    }
                }
                _ => DropdownOutcome::Continue,
            });
        }

        self.handle(event, MouseOnly)
    }
}

impl HandleEvent<Event, MouseOnly, DropdownOutcome> for DropdownState {
    fn handle(&mut self, event: &Event, _qualifier: MouseOnly) -> DropdownOutcome {
        match event {
            ct_event!(mouse down Left for x,y) if self.button.area.contains((*x, *y).into()) => {
                if self.is_busy() {
                    DropdownOutcome::Unchanged
                } else {
                    self.toggle_at(Instant::now()).into()
                }
            }
            _ => DropdownOutcome::Continue,
        }
    }
}

/// Handle all events.
/// Key events for the trigger are only processed if focus is true.
/// While the menu is open it takes all key events.
pub fn handle_events(state: &mut DropdownState, focus: bool, event: &Event) -> DropdownOutcome {
    state.button.focused = focus;
    state.handle(event, Regular)
}

/// Handle only events for the open menu.
pub fn handle_popup_events(state: &mut DropdownState, event: &Event) -> DropdownOutcome {
    state.handle(event, Popup)
}

/// Handle only mouse-events.
pub fn handle_mouse_events(state: &mut DropdownState, event: &Event) -> DropdownOutcome {
    state.handle(event, MouseOnly)
}
