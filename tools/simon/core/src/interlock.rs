//! The enable / complete handshake between a controller and a subordinate machine.
//!
//! The controller only ever calls [`Interlock::arm`] and [`Interlock::release`]
//! (through the machine's `enable`/`disable`). The subordinate is the only one
//! that can signal completion or consume a restart request; those methods are
//! crate-private and each machine keeps its interlock private.

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Interlock {
    enabled: bool,
    complete: bool,
    restart: bool,
}

impl Interlock {
    pub const fn new() -> Self {
        Self { enabled: false, complete: false, restart: false }
    }

    /// Hands control to the subordinate. Clears a stale `complete` right away so
    /// the controller can never observe the previous run's result.
    pub fn arm(&mut self) {
        self.enabled = true;
        self.complete = false;
        self.restart = true;
    }

    /// Reclaims control. The subordinate resets on its next tick.
    pub fn release(&mut self) {
        self.enabled = false;
        self.restart = true;
    }

    #[inline(always)]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline(always)]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub(crate) fn signal_complete(&mut self) {
        if self.enabled {
            self.complete = true;
        }
    }

    pub(crate) fn clear_complete(&mut self) {
        self.complete = false;
    }

    /// True once after every `arm`/`release`.
    pub(crate) fn take_restart(&mut self) -> bool {
        let restart = self.restart;
        self.restart = false;
        restart
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_clears_a_stale_completion() {
        let mut lock = Interlock::new();
        lock.arm();
        lock.signal_complete();
        assert!(lock.is_complete());

        lock.release();
        lock.arm();
        assert!(lock.is_enabled());
        assert!(!lock.is_complete());
    }

    #[test]
    fn completion_needs_enable() {
        let mut lock = Interlock::new();
        lock.signal_complete();
        assert!(!lock.is_complete());
    }

    #[test]
    fn restart_is_consumed_once() {
        let mut lock = Interlock::new();
        assert!(!lock.take_restart());
        lock.arm();
        lock.release();
        assert!(lock.take_restart());
        assert!(!lock.take_restart());
    }
}
