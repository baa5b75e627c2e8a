#![cfg_attr(not(test), no_std)]

//! A four-region memory game driven one tick at a time.
//!
//! Every piece is a small state machine. [`Simon`] owns the others and calls
//! their `tick` in a fixed order; none of them ever block or sleep, so the
//! host decides how fast the game runs.

extern crate alloc;

pub mod board;
pub mod config;
pub mod game;
pub mod input;
pub mod interlock;
pub mod layout;
pub mod playback;
pub mod region;
pub mod sequence;
pub mod trace;
pub mod verify;
pub mod virtual_board;

pub use board::{Board, SimonDisplay, TouchPanel, TouchPoint};
pub use config::{ConfigError, SimonConfig};
pub use game::{GameState, Simon};
pub use input::{CaptureState, InputCapture};
pub use playback::{PlaybackState, SequencePlayback};
pub use region::{point_to_region, Color, Extents, Paint, Point, Rect, Region};
pub use sequence::{FixedSequence, RandomSequence, SequenceGenerator, SequenceStore};
pub use trace::{LogObserver, MachineId, RecordingObserver, StateObserver};
pub use verify::{SequenceVerifier, VerifyError, VerifyState};
pub use virtual_board::VirtualBoard;
