use std::time::{Duration, Instant};

use ratatui::crossterm::event::{self, Event};

pub const SCHEME: rat_theme::Scheme = rat_theme::scheme::MONEKAI;

// a stalled frame shouldn't fast-forward the game
const MAX_CATCH_UP: u32 = 4;

pub fn poll_events() -> Vec<Event> {
    let mut events = vec![];
    while let Ok(true) = event::poll(Duration::from_millis(0)) {
        if let Ok(e) = event::read() {
            events.push(e)
        }
    }

    events
}

/// Fixed-rate tick source for a loop that runs faster than the game.
pub struct Ticker {
    period: Duration,
    last: Instant,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period: period.max(Duration::from_millis(1)), last: Instant::now() }
    }

    /// How many ticks are owed since the last call.
    pub fn due(&mut self) -> u32 {
        self.due_at(Instant::now())
    }

    fn due_at(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last);
        let owed = (elapsed.as_nanos() / self.period.as_nanos()) as u32;
        if owed == 0 {
            return 0;
        }

        if owed > MAX_CATCH_UP {
            self.last = now;
            MAX_CATCH_UP
        } else {
            self.last += self.period * owed;
            owed
        }
    }
}
