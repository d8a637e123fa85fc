//! Wall Climber - A left/right reflex climbing game
//!
//! Core modules:
//! - `sim`: Game session state machine (holds, turn timer, animation, scrolling)
//! - `renderer`: Scene layout plus Canvas2D back ends (vector and sprite)
//! - `platform`: Browser input normalization
//! - `settings`: Tuning and presentation configuration

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{RenderStyle, Settings};

/// Game configuration constants
pub mod consts {
    /// Per-turn countdown budget (milliseconds)
    pub const MAX_TIME_MS: f64 = 3000.0;
    /// Vertical distance between consecutive holds (pixels)
    pub const HOLD_SPACING: f32 = 120.0;
    /// Time to scroll the wall by one hold (milliseconds)
    pub const SCROLL_DURATION_MS: f64 = 400.0;

    /// Arm easing window: progress closes min(1, dt / window) of the gap per tick
    pub const ARM_DAMPING_MS: f64 = 200.0;
    /// Raised-arm progress at which a climb counts as reached
    pub const ARM_REACH_PROGRESS: f32 = 0.6;
    /// Distance from rest under which a falling arm counts as settled
    pub const ARM_REST_EPSILON: f32 = 0.05;

    /// Sprite animation playback rate (frames per second)
    pub const FRAME_RATE: f64 = 24.0;
    /// Highest accepted sprite playback rate (frames per second)
    pub const MAX_FRAME_RATE: f64 = 1000.0;
    /// Frames per sprite row until the sheet is measured
    pub const DEFAULT_FRAMES_PER_ROW: u32 = 24;
    /// Rows in the climber sprite sheet
    pub const SPRITE_ROWS: u32 = 5;

    /// Default viewport (canvas) dimensions
    pub const VIEWPORT_WIDTH: f32 = 400.0;
    pub const VIEWPORT_HEIGHT: f32 = 700.0;

    /// Lane centers as a fraction of viewport width
    pub const LEFT_LANE: f32 = 0.25;
    pub const RIGHT_LANE: f32 = 0.75;
}

/// Number of holds kept on the wall: the visible span plus two of lookahead
#[inline]
pub fn hold_queue_len(viewport_height: f32, hold_spacing: f32) -> usize {
    (viewport_height / hold_spacing).ceil() as usize + 2
}
