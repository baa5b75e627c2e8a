use alloc::vec::Vec;
use core::fmt::{Display, Formatter};
use log::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MachineId {
    Game,
    Playback,
    Verify,
    Input,
}

impl MachineId {
    pub const fn tag(self) -> &'static str {
        match self {
            MachineId::Game => "game",
            MachineId::Playback => "playback",
            MachineId::Verify => "verify",
            MachineId::Input => "input",
        }
    }
}

impl Display for MachineId {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.tag())
    }
}

pub trait StateName: Copy + PartialEq {
    fn name(&self) -> &'static str;
}

/// Told about every state change, once per change.
pub trait StateObserver {
    fn on_transition(&mut self, machine: MachineId, state: &'static str);
}

/// Writes each change to the `log` facade.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogObserver;

impl StateObserver for LogObserver {
    fn on_transition(&mut self, machine: MachineId, state: &'static str) {
        debug!(target: "simon::trace", "{} -> {}", machine, state);
    }
}

#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub transitions: Vec<(MachineId, &'static str)>,
}

impl RecordingObserver {
    /// States visited by one machine, in order.
    pub fn states_of(&self, machine: MachineId) -> Vec<&'static str> {
        self.transitions
            .iter()
            .filter(|(id, _)| *id == machine)
            .map(|(_, state)| *state)
            .collect()
    }

    pub fn visited(&self, machine: MachineId, state: &str) -> bool {
        self.transitions.iter().any(|(id, name)| *id == machine && *name == state)
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

impl StateObserver for RecordingObserver {
    fn on_transition(&mut self, machine: MachineId, state: &'static str) {
        self.transitions.push((machine, state));
    }
}

impl<T: StateObserver + ?Sized> StateObserver for &mut T {
    fn on_transition(&mut self, machine: MachineId, state: &'static str) {
        (**self).on_transition(machine, state);
    }
}

/// Remembers the last reported state of one machine and suppresses repeats.
#[derive(Debug, Copy, Clone)]
pub struct StateTrace<S: StateName> {
    machine: MachineId,
    last: Option<S>,
}

impl<S: StateName> StateTrace<S> {
    pub const fn new(machine: MachineId) -> Self {
        Self { machine, last: None }
    }

    pub fn observe<O: StateObserver + ?Sized>(&mut self, state: S, observer: &mut O) {
        if self.last != Some(state) {
            self.last = Some(state);
            observer.on_transition(self.machine, state.name());
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
