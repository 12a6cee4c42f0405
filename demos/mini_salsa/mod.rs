#![allow(unreachable_pub)]
#![allow(dead_code)]

use anyhow::anyhow;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::error;
use rat_event::Outcome;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::Widget;
use ratatui::{Frame, Terminal};
use std::cmp::min;
use std::fs;
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant, SystemTime};

pub struct MiniSalsaState {
    pub status: [String; 3],
    pub quit: bool,
}

impl Default for MiniSalsaState {
    fn default() -> Self {
        let mut s = Self {
            status: Default::default(),
            quit: false,
        };
        s.status[0] = "Ctrl-Q to quit.".into();
        s
    }
}

/// Event handler.
pub type HandleFn<Data, State> = fn(
    &crossterm::event::Event,
    data: &mut Data,
    istate: &mut MiniSalsaState,
    state: &mut State,
) -> Result<Outcome, anyhow::Error>;

/// Render.
pub type RepaintFn<Data, State> = fn(
    &mut Frame<'_>,
    Rect,
    &mut Data,
    &mut MiniSalsaState,
    &mut State,
) -> Result<(), anyhow::Error>;

/// Runs the animations. Returns the outcome and the time until
/// it wants to be called again.
pub type TickFn<Data, State> = fn(
    Instant,
    data: &mut Data,
    istate: &mut MiniSalsaState,
    state: &mut State,
) -> Result<(Outcome, Option<Duration>), anyhow::Error>;

const IDLE: Duration = Duration::from_millis(250);

pub fn run_ui<Data, State>(
    handle: HandleFn<Data, State>,
    repaint: RepaintFn<Data, State>,
    tick: TickFn<Data, State>,
    data: &mut Data,
    state: &mut State,
) -> Result<(), anyhow::Error> {
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut istate = MiniSalsaState::default();

    repaint_ui(&mut terminal, repaint, data, &mut istate, state)?;

    let mut sleep = IDLE;
    let r = 'l: loop {
        let o = match crossterm::event::poll(sleep) {
            Ok(true) => {
                let event = match crossterm::event::read() {
                    Ok(v) => v,
                    Err(e) => break 'l Err(anyhow!(e)),
                };
                match handle_event(handle, event, data, &mut istate, state) {
                    Ok(v) => v,
                    Err(e) => break 'l Err(e),
                }
            }
            Ok(false) => Outcome::Continue,
            Err(e) => {
                istate.status[0] = format!("{}", e);
                Outcome::Changed
            }
        };

        if istate.quit {
            break 'l Ok(());
        }

        // animations run regardless of the event.
        let (t, next) = match tick(Instant::now(), data, &mut istate, state) {
            Ok(v) => v,
            Err(e) => break 'l Err(e),
        };
        sleep = next.map_or(IDLE, |v| min(v, IDLE));

        if o == Outcome::Changed || t == Outcome::Changed {
            match repaint_ui(&mut terminal, repaint, data, &mut istate, state) {
                Ok(_) => {}
                Err(e) => break 'l Err(e),
            };
        }
    };

    disable_raw_mode()?;
    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;

    r
}

fn repaint_ui<Data, State>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    repaint: RepaintFn<Data, State>,
    data: &mut Data,
    istate: &mut MiniSalsaState,
    state: &mut State,
) -> Result<(), anyhow::Error> {
    terminal.hide_cursor()?;

    _ = terminal.draw(|frame| {
        match repaint_tui(frame, repaint, data, istate, state) {
            Ok(_) => {}
            Err(e) => {
                error!("{:?}", e)
            }
        };
    });

    Ok(())
}

fn repaint_tui<Data, State>(
    frame: &mut Frame<'_>,
    repaint: RepaintFn<Data, State>,
    data: &mut Data,
    istate: &mut MiniSalsaState,
    state: &mut State,
) -> Result<(), anyhow::Error> {
    let t0 = SystemTime::now();
    let area = frame.area();

    let l1 = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);

    repaint(frame, l1[0], data, istate, state)?;

    let el = t0.elapsed().unwrap_or(Duration::from_nanos(0));
    istate.status[1] = format!("Render {:?}", el).to_string();

    let l_status = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(17),
        Constraint::Length(17),
    ])
    .split(l1[1]);

    Line::from(istate.status[0].as_str())
        .style(Style::new().white().on_black())
        .render(l_status[0], frame.buffer_mut());
    Line::from(istate.status[1].as_str())
        .style(Style::new().white().on_blue())
        .render(l_status[1], frame.buffer_mut());
    Line::from(istate.status[2].as_str())
        .style(Style::new().white().on_light_blue())
        .render(l_status[2], frame.buffer_mut());

    Ok(())
}

fn handle_event<Data, State>(
    handle: HandleFn<Data, State>,
    event: crossterm::event::Event,
    data: &mut Data,
    istate: &mut MiniSalsaState,
    state: &mut State,
) -> Result<Outcome, anyhow::Error> {
    let t0 = SystemTime::now();

    use crossterm::event::Event;
    match event {
        Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            ..
        }) => {
            istate.quit = true;
            return Ok(Outcome::Changed);
        }
        Event::Resize(_, _) => return Ok(Outcome::Changed),
        _ => {}
    }

    let r = handle(&event, data, istate, state)?;

    let el = t0.elapsed().unwrap_or(Duration::from_nanos(0));
    istate.status[2] = format!("Handle {:?}", el).to_string();

    Ok(r)
}

pub fn setup_logging() -> Result<(), anyhow::Error> {
    _ = fs::remove_file("log.log");
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("{} {}", record.level(), message))
        })
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file("log.log")?)
        .apply()?;
    Ok(())
}
