//! Canvas2D back ends
//!
//! `VectorRenderer` draws everything with paths; `SpriteRenderer` blits a
//! climber sprite sheet over tiled parallax layers.

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::SceneRenderer;
use super::layout::{self, ClimberLayout, SpriteGrid, rig};
use crate::consts::SPRITE_ROWS;
use crate::settings::RenderStyle;
use crate::sim::{HoldShape, Pose, Snapshot};

use std::f64::consts::{PI, TAU};

fn fill_sky(ctx: &CanvasRenderingContext2d, w: f64, h: f64, is_day: bool) -> Result<(), JsValue> {
    let [top, bottom] = layout::sky_gradient(is_day);
    let grad = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    grad.add_color_stop(0.0, top)?;
    grad.add_color_stop(1.0, bottom)?;
    ctx.set_fill_style_canvas_gradient(&grad);
    ctx.fill_rect(0.0, 0.0, w, h);
    Ok(())
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.line_to(x + w - r, y);
    ctx.quadratic_curve_to(x + w, y, x + w, y + r);
    ctx.line_to(x + w, y + h - r);
    ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
    ctx.line_to(x + r, y + h);
    ctx.quadratic_curve_to(x, y + h, x, y + h - r);
    ctx.line_to(x, y + r);
    ctx.quadratic_curve_to(x, y, x + r, y);
    ctx.close_path();
}

fn fill_circle(ctx: &CanvasRenderingContext2d, center: Vec2, radius: f64) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(center.x as f64, center.y as f64, radius, 0.0, TAU)?;
    ctx.fill();
    Ok(())
}

fn draw_holds(
    ctx: &CanvasRenderingContext2d,
    snapshot: &Snapshot,
    style: RenderStyle,
    height: f64,
) -> Result<(), JsValue> {
    let radius = layout::hold_corner_radius(style) as f64;
    for hold in snapshot
        .holds
        .iter()
        .filter(|h| layout::is_hold_visible(h, height as f32))
    {
        ctx.set_fill_style_str(layout::hold_color(hold.class, style));
        match hold.shape {
            HoldShape::Circle => {
                let center = hold.pos + hold.size / 2.0;
                fill_circle(ctx, center, hold.size.x as f64 / 2.0)?;
            }
            HoldShape::RoundedRect => {
                rounded_rect_path(
                    ctx,
                    hold.pos.x as f64,
                    hold.pos.y as f64,
                    hold.size.x as f64,
                    hold.size.y as f64,
                    radius,
                );
                ctx.fill();
            }
        }
    }
    Ok(())
}

/// Gradient sky, rock strip and a path-drawn climber with animated arms
pub struct VectorRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    hold_spacing: f32,
}

impl VectorRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64, hold_spacing: f32) -> Self {
        Self {
            ctx,
            width,
            height,
            hold_spacing,
        }
    }

    fn draw_climber(&self, left: f32, right: f32) -> Result<(), JsValue> {
        use rig::*;

        let ctx = &self.ctx;
        let viewport = Vec2::new(self.width as f32, self.height as f32);
        let c = ClimberLayout::new(viewport, left, right, self.hold_spacing);
        let x = c.x as f64;
        let base_y = c.base_y as f64;
        let torso_y = c.torso_y as f64;
        let (torso_w, torso_h) = (TORSO_W as f64, TORSO_H as f64);

        // Legs
        ctx.set_fill_style_str("#3e444d");
        ctx.fill_rect(x + 6.0, base_y - LEG_H as f64, LEG_W as f64, LEG_H as f64);
        ctx.fill_rect(
            x + torso_w - LEG_W as f64 - 6.0,
            base_y - LEG_H as f64,
            LEG_W as f64,
            LEG_H as f64,
        );

        // Rope
        ctx.set_stroke_style_str("#f47a30");
        ctx.set_line_width(4.0);
        ctx.begin_path();
        ctx.move_to(x + torso_w / 2.0, base_y);
        ctx.line_to(x + torso_w / 2.0, self.height);
        ctx.stroke();

        // Belt and harness loop
        ctx.set_fill_style_str("#f7bf4f");
        ctx.fill_rect(x, torso_y + torso_h - 12.0, torso_w, 12.0);
        ctx.set_fill_style_str("#f47a30");
        ctx.begin_path();
        ctx.ellipse(x + torso_w / 2.0, torso_y + torso_h + 9.0, 8.0, 11.0, 0.0, 0.0, TAU)?;
        ctx.fill();

        // Torso
        ctx.set_fill_style_str("#2f6f99");
        ctx.fill_rect(x, torso_y, torso_w, torso_h);

        // Head and hair
        let head = HEAD as f64;
        let head_x = c.head_center.x as f64;
        let head_top = c.head_center.y as f64 - head / 2.0;
        ctx.set_fill_style_str("#f7bf85");
        fill_circle(ctx, c.head_center, head / 2.0)?;
        ctx.set_fill_style_str("#5a3d2c");
        ctx.begin_path();
        ctx.ellipse(head_x, head_top + head / 3.0, head / 2.5, head / 2.5, 0.0, PI, TAU)?;
        ctx.fill();

        // Arms and hands
        ctx.set_fill_style_str("#f7bf85");
        for arm in [c.left_arm, c.right_arm] {
            ctx.fill_rect(arm.x as f64, arm.y as f64, ARM_W as f64, ARM_H as f64);
        }
        for hand in c.hands() {
            fill_circle(ctx, hand, HAND as f64 / 2.0)?;
        }
        Ok(())
    }
}

impl SceneRenderer for VectorRenderer {
    type Error = JsValue;

    fn render(&mut self, snapshot: &Snapshot) -> Result<(), JsValue> {
        let (w, h) = (self.width, self.height);
        self.ctx.clear_rect(0.0, 0.0, w, h);
        fill_sky(&self.ctx, w, h, snapshot.is_day)?;

        // Rock wall edge on the right
        let edge = layout::ROCK_EDGE_WIDTH as f64;
        self.ctx.set_fill_style_str("#bfa98b");
        self.ctx.fill_rect(w - edge, 0.0, edge, h);

        draw_holds(&self.ctx, snapshot, RenderStyle::Vector, h)?;

        let (left, right) = match snapshot.pose {
            Pose::Arms { left, right } => (left, right),
            Pose::Sprite { .. } => (0.0, 0.0),
        };
        self.draw_climber(left, right)
    }
}

/// Decode an image before handing it to the canvas
pub async fn load_image(src: &str) -> Result<HtmlImageElement, JsValue> {
    let img = HtmlImageElement::new()?;
    img.set_src(src);
    JsFuture::from(img.decode()).await?;
    Ok(img)
}

/// Images the sprite style needs
pub struct SpriteAssets {
    pub sheet: HtmlImageElement,
    /// Sky, mountains, treeline
    pub day: [HtmlImageElement; 3],
    pub night: [HtmlImageElement; 3],
    pub rock_edge: HtmlImageElement,
}

impl SpriteAssets {
    pub async fn load() -> Result<Self, JsValue> {
        let sheet = load_image("sprite.png").await?;
        let day = [
            load_image("sky_day.png").await?,
            load_image("mountains_day.png").await?,
            load_image("treeline_day.png").await?,
        ];
        let night = [
            load_image("sky_night.png").await?,
            load_image("mountains_night.png").await?,
            load_image("treeline_night.png").await?,
        ];
        let rock_edge = load_image("rock_edge.png").await?;
        log::info!(
            "Sprite assets loaded ({}x{} sheet)",
            sheet.natural_width(),
            sheet.natural_height()
        );
        Ok(Self {
            sheet,
            day,
            night,
            rock_edge,
        })
    }

    /// Frame grid measured from the sheet
    pub fn grid(&self) -> SpriteGrid {
        SpriteGrid::from_sheet(
            self.sheet.natural_width() as f64,
            self.sheet.natural_height() as f64,
            SPRITE_ROWS,
        )
    }
}

/// Parallax image layers and a sprite-sheet climber
pub struct SpriteRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    assets: SpriteAssets,
    grid: SpriteGrid,
}

impl SpriteRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64, assets: SpriteAssets) -> Self {
        let grid = assets.grid();
        Self {
            ctx,
            width,
            height,
            assets,
            grid,
        }
    }

    fn draw_layers(&self, snapshot: &Snapshot) -> Result<(), JsValue> {
        let (w, h) = (self.width, self.height);
        let theme = if snapshot.is_day {
            &self.assets.day
        } else {
            &self.assets.night
        };
        let layers = theme.iter().chain(std::iter::once(&self.assets.rock_edge));

        for (img, ratio) in layers.zip(layout::PARALLAX_RATIOS) {
            let y = layout::parallax_offset(snapshot.ascent, ratio, h as f32) as f64;
            // Two stacked tiles always cover the viewport
            for tile_y in [y, y + h] {
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, tile_y, w, h)?;
            }
        }
        Ok(())
    }

    fn draw_climber(&self, row: u32, frame: u32, flip: bool) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let origin = layout::sprite_climber_origin(Vec2::new(self.width as f32, self.height as f32));
        let size = layout::SPRITE_CLIMBER_SIZE;
        let (sx, sy) = self.grid.cell(row, frame.min(self.grid.cols - 1));
        let (fw, fh) = (self.grid.frame_w, self.grid.frame_h);

        ctx.save();
        let dx = if flip {
            // Mirror around the climber's center line
            ctx.translate((origin.x + size.x / 2.0) as f64, 0.0)?;
            ctx.scale(-1.0, 1.0)?;
            -(size.x as f64) / 2.0
        } else {
            origin.x as f64
        };
        let drawn = ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
            &self.assets.sheet,
            sx,
            sy,
            fw,
            fh,
            dx,
            origin.y as f64,
            size.x as f64,
            size.y as f64,
        );
        ctx.restore();
        drawn
    }
}

impl SceneRenderer for SpriteRenderer {
    type Error = JsValue;

    fn render(&mut self, snapshot: &Snapshot) -> Result<(), JsValue> {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        self.draw_layers(snapshot)?;
        draw_holds(&self.ctx, snapshot, RenderStyle::Sprite, self.height)?;

        match snapshot.pose {
            Pose::Sprite { row, frame, flip } => self.draw_climber(row, frame, flip),
            Pose::Arms { .. } => self.draw_climber(0, 0, false),
        }
    }
}
