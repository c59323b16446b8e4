use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Produces tick events at a fixed interval and render events whenever a
/// tick or terminal event may have changed the state. Without a tick
/// interval, only terminal events are waited for.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` with ticking disabled.
    pub fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            dirty: true, // Initial render is required on startup
        }
    }

    /// Starts ticking at `interval`, or stops ticking with `None`.
    ///
    /// The first tick after a (re)start comes one full interval later.
    /// Stopping an already stopped loop does nothing.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if interval.is_some() {
            self.last_tick = Instant::now();
        }
        self.tick_interval = interval;
    }

    pub(super) fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    /// Returns the next event.
    ///
    /// Blocks until the next tick is due, a render is pending, or a
    /// crossterm event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if self.is_tick_due(now) {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn is_tick_due(&self, now: Instant) -> bool {
        self.tick_interval
            .is_some_and(|interval| now.duration_since(self.last_tick) >= interval)
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval)?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}
