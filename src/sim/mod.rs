//! Game session simulation
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Time arrives only as frame deltas (ms)
//! - Randomness only from a seeded hold source
//! - Output is a snapshot plus drained events

pub mod anim;
pub mod hold;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod timer;

pub use anim::{Animation, Animator, ArmEasing, Pose, Sequence, SpriteFrames};
pub use hold::{
    Hold, HoldClass, HoldGenerator, HoldQueue, HoldShape, HoldSource, ScriptedHolds, Side,
    init_queue,
};
pub use snapshot::{HoldView, Snapshot, hold_y, lane_center_x};
pub use state::{GameEvent, GameSession, Resolution, ScrollState, TurnPhase};
pub use tick::{TickInput, tick};
pub use timer::{TimerStatus, TurnTimer};
