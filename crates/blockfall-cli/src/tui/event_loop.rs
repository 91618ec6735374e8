use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// Shortest time between two redraws.
const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Produces ticks at a fixed interval and redraws after state changes.
///
/// Ticks take priority over input so gravity keeps its pace while keys are
/// held down. Redraws are throttled to [`MIN_FRAME_INTERVAL`].
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new() -> Self {
        let now = Instant::now();
        Self {
            tick_interval: None,
            last_tick: now,
            last_render: now.checked_sub(MIN_FRAME_INTERVAL).unwrap_or(now),
            dirty: true,
        }
    }

    /// `None` stops ticking. Restarting the tick resets its phase.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if self.tick_interval.is_none() {
            self.last_tick = Instant::now();
        }
        self.tick_interval = interval;
    }

    /// Blocks until the next event is due.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= interval
            {
                self.last_tick += interval;
                // don't try to catch up after a long stall
                if now.duration_since(self.last_tick) >= interval {
                    self.last_tick = now;
                }
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty && now.duration_since(self.last_render) >= MIN_FRAME_INTERVAL {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let timeout = self.timeout(now);
            if !event::poll(timeout)? {
                continue;
            }
            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn timeout(&self, now: Instant) -> Duration {
        let next_tick = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render = self.dirty.then(|| self.last_render + MIN_FRAME_INTERVAL);
        [next_tick, next_render]
            .into_iter()
            .flatten()
            .min()
            .map_or(Duration::from_secs(1), |at| at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_loop_waits_for_input() {
        let mut events = EventLoop::new();
        events.dirty = false;
        assert_eq!(events.timeout(Instant::now()), Duration::from_secs(1));
    }

    #[test]
    fn test_timeout_until_next_tick() {
        let mut events = EventLoop::new();
        events.dirty = false;
        events.set_tick_interval(Some(Duration::from_secs(10)));
        let timeout = events.timeout(events.last_tick);
        assert_eq!(timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_pending_render_shortens_timeout() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_secs(10)));
        events.dirty = true;
        assert!(events.timeout(Instant::now()) <= MIN_FRAME_INTERVAL);
    }
}
