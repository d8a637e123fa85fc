//! Climber animation
//!
//! Two interchangeable strategies behind one `Animator` contract:
//! - `ArmEasing`: each arm eases toward a target height (vector style)
//! - `SpriteFrames`: fixed-rate frame playback through queued sprite rows
//!
//! The session starts a `Sequence`, advances time, and polls
//! `take_completed` to drive the turn state machine.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::hold::Side;
use crate::consts::{ARM_REACH_PROGRESS, ARM_REST_EPSILON};
use crate::settings::{RenderStyle, Settings};

/// Sprite sheet row ids
pub const IDLE_ROW: u32 = 0;
pub const CLIMB_ROWS: [u32; 2] = [1, 2];
pub const FALL_ROWS: [u32; 2] = [3, 4];

/// An animation the state machine waits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sequence {
    /// Reach for the hold on this side
    Climb(Side),
    /// Lose grip; `Some(side)` after a wrong press, `None` on timeout
    Fall(Option<Side>),
}

impl Sequence {
    /// Mirror the sprite only when the player pressed right
    pub fn flipped(self) -> bool {
        matches!(self, Sequence::Climb(Side::Right) | Sequence::Fall(Some(Side::Right)))
    }
}

/// Renderable pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Pose {
    /// Arm raise progress, 0 = down, 1 = fully raised
    Arms { left: f32, right: f32 },
    /// Sprite sheet cell plus horizontal mirror
    Sprite { row: u32, frame: u32, flip: bool },
}

/// Advance-toward-target contract shared by both strategies
pub trait Animator {
    /// Start a sequence, replacing whatever was playing
    fn play(&mut self, sequence: Sequence);
    /// Return to the neutral pose targets (after a climb finishes scrolling)
    fn settle(&mut self);
    /// Advance by `dt` milliseconds
    fn advance(&mut self, dt: f64);
    /// The sequence that finished, reported once
    fn take_completed(&mut self) -> Option<Sequence>;
    fn pose(&self) -> Pose;
    /// Back to the initial neutral state, dropping anything in flight
    fn reset(&mut self);
}

/// One eased value
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmChannel {
    pub progress: f32,
    pub target: f32,
}

impl ArmChannel {
    /// Exponential ease: close min(1, dt/window) of the remaining gap
    pub fn ease(&mut self, dt: f64, window: f64) {
        let k = (dt / window).min(1.0) as f32;
        self.progress += (self.target - self.progress) * k;
        self.progress = self.progress.clamp(0.0, 1.0);
    }
}

/// Continuous-progress strategy: independent left/right arm raise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmEasing {
    pub left: ArmChannel,
    pub right: ArmChannel,
    damping_ms: f64,
    playing: Option<Sequence>,
    completed: Option<Sequence>,
}

impl ArmEasing {
    pub fn new(damping_ms: f64) -> Self {
        Self {
            left: ArmChannel::default(),
            right: ArmChannel::default(),
            damping_ms,
            playing: None,
            completed: None,
        }
    }

    fn channel(&self, side: Side) -> &ArmChannel {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn is_done(&self, sequence: Sequence) -> bool {
        match sequence {
            Sequence::Climb(side) => self.channel(side).progress >= ARM_REACH_PROGRESS,
            Sequence::Fall(_) => {
                self.left.progress <= ARM_REST_EPSILON && self.right.progress <= ARM_REST_EPSILON
            }
        }
    }
}

impl Animator for ArmEasing {
    fn play(&mut self, sequence: Sequence) {
        match sequence {
            Sequence::Climb(Side::Left) => {
                self.left.target = 1.0;
                self.right.target = 0.0;
            }
            Sequence::Climb(Side::Right) => {
                self.left.target = 0.0;
                self.right.target = 1.0;
            }
            Sequence::Fall(_) => {
                self.left.target = 0.0;
                self.right.target = 0.0;
            }
        }
        self.playing = Some(sequence);
        self.completed = None;
    }

    fn settle(&mut self) {
        self.left.target = 0.0;
        self.right.target = 0.0;
    }

    fn advance(&mut self, dt: f64) {
        self.left.ease(dt, self.damping_ms);
        self.right.ease(dt, self.damping_ms);

        if let Some(sequence) = self.playing {
            if self.is_done(sequence) {
                self.playing = None;
                self.completed = Some(sequence);
            }
        }
    }

    fn take_completed(&mut self) -> Option<Sequence> {
        self.completed.take()
    }

    fn pose(&self) -> Pose {
        Pose::Arms {
            left: self.left.progress,
            right: self.right.progress,
        }
    }

    fn reset(&mut self) {
        *self = Self::new(self.damping_ms);
    }
}

/// Discrete-frame strategy: queued sprite rows at a fixed frame rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteFrames {
    frames_per_row: u32,
    frame_ms: f64,
    row: u32,
    frame: u32,
    queue: VecDeque<u32>,
    elapsed: f64,
    flip: bool,
    playing: Option<Sequence>,
    completed: Option<Sequence>,
}

impl SpriteFrames {
    pub fn new(frames_per_row: u32, frame_ms: f64) -> Self {
        Self {
            frames_per_row: frames_per_row.max(1),
            frame_ms,
            row: IDLE_ROW,
            frame: 0,
            queue: VecDeque::new(),
            elapsed: 0.0,
            flip: false,
            playing: None,
            completed: None,
        }
    }

    /// Move past the last frame of the current row
    fn finish_row(&mut self) {
        self.frame = 0;
        if let Some(next) = self.queue.pop_front() {
            self.row = next;
        } else {
            self.row = IDLE_ROW;
            if let Some(sequence) = self.playing.take() {
                self.completed = Some(sequence);
            }
        }
    }
}

impl Animator for SpriteFrames {
    fn play(&mut self, sequence: Sequence) {
        let rows = match sequence {
            Sequence::Climb(_) => CLIMB_ROWS,
            Sequence::Fall(_) => FALL_ROWS,
        };
        self.queue = rows.into_iter().collect();
        self.row = self.queue.pop_front().unwrap_or(IDLE_ROW);
        self.frame = 0;
        self.elapsed = 0.0;
        self.flip = sequence.flipped();
        self.playing = Some(sequence);
        self.completed = None;
    }

    fn settle(&mut self) {
        // Rows already fall back to idle on their own
    }

    fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
        if self.elapsed < self.frame_ms {
            return;
        }
        // Whole frames due; `as` saturates on absurd values
        let mut frames = (self.elapsed / self.frame_ms).floor() as u64;
        self.elapsed %= self.frame_ms;

        // At most one step per queued row, then the idle loop wraps
        while frames > 0 {
            let left_in_row = u64::from(self.frames_per_row - self.frame);
            if frames < left_in_row {
                self.frame += frames as u32;
                return;
            }
            frames -= left_in_row;
            self.finish_row();
            if self.playing.is_none() && self.queue.is_empty() {
                self.frame = (frames % u64::from(self.frames_per_row)) as u32;
                return;
            }
        }
    }

    fn take_completed(&mut self) -> Option<Sequence> {
        self.completed.take()
    }

    fn pose(&self) -> Pose {
        Pose::Sprite {
            row: self.row,
            frame: self.frame,
            flip: self.flip,
        }
    }

    fn reset(&mut self) {
        *self = Self::new(self.frames_per_row, self.frame_ms);
    }
}

/// The strategy a session runs, chosen from the render style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Animation {
    Eased(ArmEasing),
    Frames(SpriteFrames),
}

impl Animation {
    pub fn from_settings(settings: &Settings) -> Self {
        match settings.style {
            RenderStyle::Vector => Animation::Eased(ArmEasing::new(settings.arm_damping_ms)),
            RenderStyle::Sprite => Animation::Frames(SpriteFrames::new(
                settings.frames_per_row,
                settings.frame_duration_ms(),
            )),
        }
    }

    fn inner(&self) -> &dyn Animator {
        match self {
            Animation::Eased(a) => a,
            Animation::Frames(a) => a,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Animator {
        match self {
            Animation::Eased(a) => a,
            Animation::Frames(a) => a,
        }
    }
}

impl Animator for Animation {
    fn play(&mut self, sequence: Sequence) {
        self.inner_mut().play(sequence)
    }

    fn settle(&mut self) {
        self.inner_mut().settle()
    }

    fn advance(&mut self, dt: f64) {
        self.inner_mut().advance(dt)
    }

    fn take_completed(&mut self) -> Option<Sequence> {
        self.inner_mut().take_completed()
    }

    fn pose(&self) -> Pose {
        self.inner().pose()
    }

    fn reset(&mut self) {
        self.inner_mut().reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f64 = 1000.0 / 24.0;

    /// Time one full sequence takes to play (ms)
    fn sequence_duration(anim: &SpriteFrames, sequence: Sequence) -> f64 {
        let rows = match sequence {
            Sequence::Climb(_) => CLIMB_ROWS.len(),
            Sequence::Fall(_) => FALL_ROWS.len(),
        };
        rows as f64 * anim.frames_per_row as f64 * anim.frame_ms
    }

    #[test]
    fn test_arm_ease_step() {
        let mut arm = ArmChannel {
            progress: 0.0,
            target: 1.0,
        };
        arm.ease(100.0, 200.0);
        assert!((arm.progress - 0.5).abs() < 1e-6);
        arm.ease(100.0, 200.0);
        assert!((arm.progress - 0.75).abs() < 1e-6);
        // A long frame snaps straight to the target
        arm.ease(500.0, 200.0);
        assert_eq!(arm.progress, 1.0);
    }

    #[test]
    fn test_arms_climb_completes_once_reached() {
        let mut anim = ArmEasing::new(200.0);
        anim.play(Sequence::Climb(Side::Right));

        anim.advance(16.0);
        assert_eq!(anim.take_completed(), None);

        for _ in 0..30 {
            anim.advance(16.0);
        }
        assert_eq!(anim.take_completed(), Some(Sequence::Climb(Side::Right)));
        // Only reported once
        assert_eq!(anim.take_completed(), None);

        let Pose::Arms { left, right } = anim.pose() else {
            panic!("expected arm pose");
        };
        assert!(right >= ARM_REACH_PROGRESS);
        assert_eq!(left, 0.0);
    }

    #[test]
    fn test_arms_fall_from_rest_completes_immediately() {
        let mut anim = ArmEasing::new(200.0);
        anim.play(Sequence::Fall(None));
        anim.advance(0.0);
        assert_eq!(anim.take_completed(), Some(Sequence::Fall(None)));
    }

    #[test]
    fn test_arms_settle_lowers_both() {
        let mut anim = ArmEasing::new(200.0);
        anim.play(Sequence::Climb(Side::Left));
        anim.advance(1000.0);
        assert_eq!(anim.left.progress, 1.0);
        anim.settle();
        anim.advance(1000.0);
        assert_eq!(anim.pose(), Pose::Arms { left: 0.0, right: 0.0 });
    }

    #[test]
    fn test_sprite_climb_plays_both_rows_then_idles() {
        let mut anim = SpriteFrames::new(4, FRAME_MS);
        anim.play(Sequence::Climb(Side::Right));
        assert_eq!(anim.pose(), Pose::Sprite { row: 1, frame: 0, flip: true });

        // Four frames finishes row 1
        anim.advance(FRAME_MS * 4.0 + 0.5);
        assert_eq!(anim.pose(), Pose::Sprite { row: 2, frame: 0, flip: true });
        assert_eq!(anim.take_completed(), None);

        anim.advance(FRAME_MS * 4.0);
        assert_eq!(anim.pose(), Pose::Sprite { row: IDLE_ROW, frame: 0, flip: true });
        assert_eq!(anim.take_completed(), Some(Sequence::Climb(Side::Right)));
        assert_eq!(anim.take_completed(), None);
    }

    #[test]
    fn test_sprite_timeout_fall_is_unflipped() {
        let mut anim = SpriteFrames::new(24, FRAME_MS);
        anim.play(Sequence::Fall(None));
        assert_eq!(anim.pose(), Pose::Sprite { row: 3, frame: 0, flip: false });

        anim.play(Sequence::Fall(Some(Side::Right)));
        assert_eq!(anim.pose(), Pose::Sprite { row: 3, frame: 0, flip: true });

        anim.play(Sequence::Fall(Some(Side::Left)));
        assert_eq!(anim.pose(), Pose::Sprite { row: 3, frame: 0, flip: false });
    }

    #[test]
    fn test_sprite_long_tick_covers_many_frames() {
        let mut anim = SpriteFrames::new(24, FRAME_MS);
        anim.play(Sequence::Fall(Some(Side::Left)));
        let total = sequence_duration(&anim, Sequence::Fall(None));
        assert!((total - 2000.0).abs() < 1e-6);

        anim.advance(total + 1.0);
        assert_eq!(anim.take_completed(), Some(Sequence::Fall(Some(Side::Left))));
        assert!(matches!(anim.pose(), Pose::Sprite { row: IDLE_ROW, .. }));
    }

    #[test]
    fn test_sprite_huge_tick_is_arithmetic() {
        let mut anim = SpriteFrames::new(24, 0.5);
        anim.play(Sequence::Climb(Side::Left));

        // 2e12 frames: both climb rows (48), then the idle loop wraps
        let start = std::time::Instant::now();
        anim.advance(1e12);
        assert!(start.elapsed() < std::time::Duration::from_secs(1));

        assert_eq!(anim.take_completed(), Some(Sequence::Climb(Side::Left)));
        assert_eq!(anim.pose(), Pose::Sprite { row: IDLE_ROW, frame: 8, flip: false });

        // The next frame boundary still lands exactly
        anim.advance(0.5);
        assert_eq!(anim.pose(), Pose::Sprite { row: IDLE_ROW, frame: 9, flip: false });
    }

    #[test]
    fn test_sprite_partial_row_keeps_remainder() {
        let mut anim = SpriteFrames::new(4, 10.0);
        anim.play(Sequence::Fall(Some(Side::Right)));
        anim.advance(25.0);
        assert_eq!(anim.pose(), Pose::Sprite { row: 3, frame: 2, flip: true });
        // 5 ms carried over plus 15 ms completes two more frames
        anim.advance(15.0);
        assert_eq!(anim.pose(), Pose::Sprite { row: 4, frame: 0, flip: true });
        assert_eq!(anim.take_completed(), None);
        anim.advance(40.0);
        assert_eq!(anim.take_completed(), Some(Sequence::Fall(Some(Side::Right))));
    }

    #[test]
    fn test_idle_loop_never_completes() {
        let mut anim = SpriteFrames::new(4, FRAME_MS);
        anim.advance(10_000.0);
        assert_eq!(anim.take_completed(), None);
        assert!(matches!(anim.pose(), Pose::Sprite { row: IDLE_ROW, .. }));
    }

    #[test]
    fn test_animation_dispatch_by_style() {
        let vector = Animation::from_settings(&Settings::from_style(RenderStyle::Vector));
        assert!(matches!(vector.pose(), Pose::Arms { .. }));

        let sprite = Animation::from_settings(&Settings::from_style(RenderStyle::Sprite));
        assert_eq!(sprite.pose(), Pose::Sprite { row: 0, frame: 0, flip: false });
    }

    #[test]
    fn test_reset_drops_in_flight_sequence() {
        let mut anim = Animation::from_settings(&Settings::from_style(RenderStyle::Sprite));
        anim.play(Sequence::Climb(Side::Left));
        anim.reset();
        anim.advance(5000.0);
        assert_eq!(anim.take_completed(), None);
    }
}
