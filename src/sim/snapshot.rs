//! Read-only per-frame view of a session for renderers and the HUD

use glam::Vec2;
use serde::Serialize;

use super::anim::{Animator, Pose};
use super::hold::{HoldClass, HoldShape, HoldSource, Side};
use super::state::{GameSession, TurnPhase};
use crate::consts::{LEFT_LANE, RIGHT_LANE};

/// A hold placed in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoldView {
    pub side: Side,
    pub class: HoldClass,
    pub shape: HoldShape,
    /// Top-left corner in pixels
    pub pos: Vec2,
    pub size: Vec2,
    /// The hold the next move must match
    pub active: bool,
}

/// Everything a frame needs to draw and update the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: TurnPhase,
    pub score: u32,
    /// Remaining countdown (ms), never negative
    pub time_left_ms: f64,
    /// Remaining countdown as a fraction in [0, 1]
    pub time_fraction: f64,
    /// Wall holds from top (index 0) to the active hold
    pub holds: Vec<HoldView>,
    pub scroll_offset: f32,
    /// Distance climbed this run (px), drives background parallax
    pub ascent: f32,
    pub pose: Pose,
    pub is_day: bool,
    pub game_over: bool,
    pub final_score: Option<u32>,
}

/// Horizontal center of a lane
#[inline]
pub fn lane_center_x(side: Side, viewport_width: f32) -> f32 {
    match side {
        Side::Left => viewport_width * LEFT_LANE,
        Side::Right => viewport_width * RIGHT_LANE,
    }
}

/// Top edge of the hold at `index`, given the current scroll
#[inline]
pub fn hold_y(index: usize, hold_spacing: f32, scroll_offset: f32) -> f32 {
    index as f32 * hold_spacing - hold_spacing + scroll_offset
}

impl<S: HoldSource> GameSession<S> {
    /// Capture the current state for presentation
    pub fn snapshot(&self) -> Snapshot {
        let spacing = self.settings.hold_spacing;
        let width = self.settings.viewport_width;
        let offset = self.scroll.offset;
        let last = self.holds.len().saturating_sub(1);

        let holds = self
            .holds
            .iter()
            .enumerate()
            .map(|(i, hold)| {
                let size = Vec2::new(hold.width(), hold.height());
                let x = lane_center_x(hold.side, width) - size.x / 2.0;
                HoldView {
                    side: hold.side,
                    class: hold.class,
                    shape: hold.shape(),
                    pos: Vec2::new(x, hold_y(i, spacing, offset)),
                    size,
                    active: i == last,
                }
            })
            .collect();

        Snapshot {
            phase: self.phase,
            score: self.score,
            time_left_ms: self.timer.time_left(),
            time_fraction: self.timer.fraction(),
            holds,
            scroll_offset: offset,
            ascent: self.ascent(),
            pose: self.animation.pose(),
            is_day: self.is_day,
            game_over: self.phase == TurnPhase::GameOver,
            final_score: self.final_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::hold::ScriptedHolds;

    #[test]
    fn test_hold_positions() {
        let session = GameSession::new(
            Settings::default(),
            ScriptedHolds::from_sides(&[Side::Left, Side::Right]),
        );
        let snap = session.snapshot();
        assert_eq!(snap.holds.len(), 8);

        // Medium holds are 60 wide; lanes at 100 and 300 on a 400 px canvas
        assert_eq!(snap.holds[0].pos, Vec2::new(70.0, -120.0));
        assert_eq!(snap.holds[1].pos, Vec2::new(270.0, 0.0));
        assert_eq!(snap.holds[7].pos.y, 720.0);
        assert!(snap.holds[7].active);
        assert!(snap.holds[..7].iter().all(|h| !h.active));
    }

    #[test]
    fn test_scroll_offset_shifts_holds_down() {
        assert_eq!(hold_y(2, 120.0, 0.0), 120.0);
        assert_eq!(hold_y(2, 120.0, 45.0), 165.0);
        assert_eq!(hold_y(0, 120.0, 120.0), 0.0);
    }

    #[test]
    fn test_fresh_snapshot_fields() {
        let session = GameSession::with_seed(Settings::default(), 3);
        let snap = session.snapshot();
        assert_eq!(snap.phase, TurnPhase::Ready);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.time_fraction, 1.0);
        assert!(snap.is_day);
        assert!(!snap.game_over);
        assert_eq!(snap.final_score, None);
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = GameSession::with_seed(Settings::default(), 3);
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Ready\""));
    }
}
