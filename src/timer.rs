//!
//! Support for timers.
//!
//! All functions take the current time as a parameter.
//! The queue never looks at the clock by itself.
//!

#[allow(unused_imports)]
use log::debug;
use std::time::{Duration, Instant};

/// Holds all the timers.
#[derive(Debug, Default)]
pub struct Timers {
    tags: usize,
    /// Sorted by due time, the next one is last.
    timers: Vec<TimerImpl>,
}

/// Handle for a submitted timer.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct TimerHandle(usize);

#[derive(Debug)]
struct TimerImpl {
    tag: usize,
    count: usize,
    repeat: Option<usize>,
    next: Instant,
    timer: Duration,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any timers left.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Returns the time until the next timer is due.
    pub fn sleep_time(&self, now: Instant) -> Option<Duration> {
        if let Some(timer) = self.timers.last() {
            if now > timer.next {
                Some(Duration::from_nanos(0))
            } else {
                Some(timer.next.duration_since(now))
            }
        } else {
            None
        }
    }

    /// Is the next timer due.
    pub fn poll(&self, now: Instant) -> bool {
        if let Some(timer) = self.timers.last() {
            now >= timer.next
        } else {
            false
        }
    }

    /// Reads the next timer event if it is due.
    /// Removes/recalculates the timer and reorders the queue.
    pub fn read(&mut self, now: Instant) -> Option<TimeOut> {
        let timer = self.timers.pop();
        if let Some(mut timer) = timer {
            if now >= timer.next {
                let evt = TimeOut {
                    handle: TimerHandle(timer.tag),
                    counter: timer.count,
                };

                // reschedule
                if let Some(repeat) = timer.repeat {
                    timer.count += 1;
                    if timer.count < repeat {
                        timer.next += timer.timer;
                        Self::add_impl(&mut self.timers, timer);
                    }
                }

                Some(evt)
            } else {
                self.timers.push(timer);
                None
            }
        } else {
            None
        }
    }

    fn add_impl(timers: &mut Vec<TimerImpl>, t: TimerImpl) {
        'f: {
            for i in 0..timers.len() {
                if timers[i].next <= t.next {
                    timers.insert(i, t);
                    break 'f;
                }
            }
            timers.push(t);
        }
    }

    /// Add a timer.
    #[must_use]
    pub fn add(&mut self, t: TimerDef, now: Instant) -> TimerHandle {
        self.tags += 1;
        let tag = self.tags;

        let t = TimerImpl {
            tag,
            count: 0,
            repeat: t.repeat,
            next: if let Some(next) = t.next {
                next
            } else {
                now + t.timer
            },
            timer: t.timer,
        };

        Self::add_impl(&mut self.timers, t);

        TimerHandle(tag)
    }

    /// Remove a timer.
    pub fn remove(&mut self, tag: TimerHandle) {
        if let Some(i) = self.timers.iter().position(|v| v.tag == tag.0) {
            self.timers.remove(i);
        }
    }

    /// Remove all timers.
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

/// Timer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOut {
    pub handle: TimerHandle,
    pub counter: usize,
}

/// Holds the information to start a timer.
#[derive(Debug, Default)]
pub struct TimerDef {
    /// Optional repeat.
    repeat: Option<usize>,
    /// Duration
    timer: Duration,
    /// Specific time.
    next: Option<Instant>,
}

impl TimerDef {
    pub fn new() -> Self {
        Default::default()
    }

    /// Repeat forever.
    pub fn repeat_forever(mut self) -> Self {
        self.repeat = Some(usize::MAX);
        self
    }

    /// Repeat count.
    pub fn repeat(mut self, repeat: usize) -> Self {
        self.repeat = Some(repeat);
        self
    }

    /// Timer interval.
    pub fn timer(mut self, timer: Duration) -> Self {
        self.timer = timer;
        self
    }

    /// Next time the timer is due. Can set a start delay for a repeating timer,
    /// or as an oneshot event for a given instant.
    pub fn next(mut self, next: Instant) -> Self {
        self.next = Some(next);
        self
    }
}
