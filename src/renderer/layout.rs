//! Scene geometry and palettes shared by both renderers
//!
//! Pure functions only, so the placement math is testable off the browser.

use glam::Vec2;

use crate::settings::RenderStyle;
use crate::sim::{HoldClass, HoldView};

/// Holds this far outside the viewport are skipped
pub const CULL_MARGIN: f32 = 10.0;

/// Background layer scroll rates, back to front (sky, mountains, treeline, rock)
pub const PARALLAX_RATIOS: [f32; 4] = [0.3, 0.6, 0.8, 1.0];

/// Width of the rock edge strip drawn on the right (vector style)
pub const ROCK_EDGE_WIDTH: f32 = 80.0;

/// Sprite climber size on screen
pub const SPRITE_CLIMBER_SIZE: Vec2 = Vec2::new(80.0, 200.0);
/// Gap between the sprite climber's feet and the bottom edge
pub const SPRITE_CLIMBER_FLOOR: f32 = 80.0;

/// Fill color for a hold
pub fn hold_color(class: HoldClass, style: RenderStyle) -> &'static str {
    match (style, class) {
        (RenderStyle::Vector, HoldClass::Small) => "#d1b182",
        (RenderStyle::Vector, HoldClass::Medium) => "#bfa98b",
        (RenderStyle::Vector, HoldClass::Large) => "#9e8868",
        (RenderStyle::Vector, HoldClass::Rounded) => "#c5a377",
        (RenderStyle::Sprite, HoldClass::Small) => "#cda66e",
        (RenderStyle::Sprite, HoldClass::Medium) => "#b59569",
        (RenderStyle::Sprite, HoldClass::Large) => "#a88250",
        (RenderStyle::Sprite, HoldClass::Rounded) => "#ba9771",
    }
}

/// Corner radius for rounded-rect holds
pub fn hold_corner_radius(style: RenderStyle) -> f32 {
    match style {
        RenderStyle::Vector => 8.0,
        RenderStyle::Sprite => 10.0,
    }
}

/// Sky gradient stops (top, bottom)
pub fn sky_gradient(is_day: bool) -> [&'static str; 2] {
    if is_day {
        ["#bfe9ff", "#e6f6ff"]
    } else {
        ["#0a1931", "#0c2340"]
    }
}

/// Whether any part of the hold lands near the viewport
pub fn is_hold_visible(hold: &HoldView, viewport_height: f32) -> bool {
    let y = hold.pos.y;
    !(y + hold.size.y < -CULL_MARGIN || y > viewport_height + CULL_MARGIN)
}

/// Vertical offset of a tiled background layer, always in (-height, 0]
pub fn parallax_offset(ascent: f32, ratio: f32, height: f32) -> f32 {
    let mut y = -(ascent * ratio) % height;
    if y > 0.0 {
        y -= height;
    }
    y
}

/// Body part sizes of the vector climber
pub mod rig {
    pub const TORSO_W: f32 = 50.0;
    pub const TORSO_H: f32 = 70.0;
    pub const HEAD: f32 = 40.0;
    pub const LEG_W: f32 = 16.0;
    pub const LEG_H: f32 = 50.0;
    pub const ARM_W: f32 = 12.0;
    pub const ARM_H: f32 = 50.0;
    pub const HAND: f32 = 14.0;
    /// Feet sit this far above the bottom edge
    pub const FLOOR: f32 = 120.0;
}

/// Where each part of the vector climber goes this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimberLayout {
    /// Left edge of the torso
    pub x: f32,
    /// Feet line
    pub base_y: f32,
    pub torso_y: f32,
    pub head_center: Vec2,
    /// Top-left of each arm
    pub left_arm: Vec2,
    pub right_arm: Vec2,
}

impl ClimberLayout {
    /// Arms rise by up to one hold spacing as their progress goes 0 → 1
    pub fn new(viewport: Vec2, left: f32, right: f32, hold_spacing: f32) -> Self {
        use rig::*;

        let x = viewport.x / 2.0 - TORSO_W / 2.0;
        let base_y = viewport.y - FLOOR;
        let torso_y = base_y - LEG_H - TORSO_H;
        let head_top = torso_y - HEAD + 6.0;
        let shoulder_y = torso_y + 10.0;

        Self {
            x,
            base_y,
            torso_y,
            head_center: Vec2::new(x + TORSO_W / 2.0, head_top + HEAD / 2.0),
            left_arm: Vec2::new(x - ARM_W, shoulder_y - left * hold_spacing),
            right_arm: Vec2::new(x + TORSO_W, shoulder_y - right * hold_spacing),
        }
    }

    /// Hand centers sit just above each arm
    pub fn hands(&self) -> [Vec2; 2] {
        use rig::*;
        [self.left_arm, self.right_arm]
            .map(|arm| Vec2::new(arm.x + ARM_W / 2.0, arm.y - HAND / 2.0))
    }
}

/// Top-left of the sprite climber
pub fn sprite_climber_origin(viewport: Vec2) -> Vec2 {
    Vec2::new(
        viewport.x / 2.0 - SPRITE_CLIMBER_SIZE.x / 2.0,
        viewport.y - SPRITE_CLIMBER_SIZE.y - SPRITE_CLIMBER_FLOOR,
    )
}

/// Cell layout of a sprite sheet with square frames in fixed rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteGrid {
    pub cols: u32,
    pub frame_w: f64,
    pub frame_h: f64,
}

impl SpriteGrid {
    /// Measure a sheet: rows are given, columns follow from square frames
    pub fn from_sheet(sheet_w: f64, sheet_h: f64, rows: u32) -> Self {
        let frame_h = sheet_h / rows.max(1) as f64;
        let cols = if frame_h > 0.0 {
            ((sheet_w / frame_h).floor() as u32).max(1)
        } else {
            1
        };
        Self {
            cols,
            frame_w: sheet_w / cols as f64,
            frame_h,
        }
    }

    /// Source rectangle origin of a cell
    pub fn cell(&self, row: u32, frame: u32) -> (f64, f64) {
        (frame as f64 * self.frame_w, row as f64 * self.frame_h)
    }
}
