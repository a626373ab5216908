use serde::{Deserialize, Serialize};

/// Elapsed-time collaborator driven by the session.
///
/// The session starts it on the first successful tap and stops it when the game ends or restarts. Both calls must
/// be idempotent.
pub trait GameTimer {
    fn start(&mut self);

    fn stop(&mut self);

    /// Clears any displayed time, called when a new board is dealt.
    fn reset(&mut self) {}
}

/// Timer that ignores every call, for hosts that do not display time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoTimer;

impl GameTimer for NoTimer {
    fn start(&mut self) {}

    fn stop(&mut self) {}
}

/// Seconds counter advanced by a host tick source, counts only while running.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickTimer {
    running: bool,
    elapsed_secs: u32,
}

impl TickTimer {
    pub const fn new() -> Self {
        Self {
            running: false,
            elapsed_secs: 0,
        }
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub const fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// One second passed on the host clock.
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
    }
}

impl GameTimer for TickTimer {
    fn start(&mut self) {
        if !self.running {
            log::debug!("Timer started at {}s", self.elapsed_secs);
            self.running = true;
        }
    }

    fn stop(&mut self) {
        if self.running {
            log::debug!("Timer stopped at {}s", self.elapsed_secs);
            self.running = false;
        }
    }

    fn reset(&mut self) {
        self.elapsed_secs = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_count_while_running() {
        let mut timer = TickTimer::new();
        timer.tick();
        assert_eq!(timer.elapsed_secs(), 0);

        timer.start();
        timer.start();
        timer.tick();
        timer.tick();
        assert_eq!(timer.elapsed_secs(), 2);

        timer.stop();
        timer.stop();
        timer.tick();
        assert_eq!(timer.elapsed_secs(), 2);
        assert!(!timer.is_running());

        timer.reset();
        assert_eq!(timer.elapsed_secs(), 0);
    }
}
