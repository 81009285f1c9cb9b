//! Gesture trail and template guide on the drawing canvas' 2D context.

use crate::constants::*;
use glam::Vec2;
use rune_core::InputProfile;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct Trail {
    ctx: web::CanvasRenderingContext2d,
    canvas: web::HtmlCanvasElement,
    width: f64,
    glow: f64,
    last: Option<Vec2>,
    /// Polyline redrawn after every clear while set.
    guide: Option<Vec<Vec2>>,
}

impl Trail {
    pub fn new(canvas: &web::HtmlCanvasElement, profile: InputProfile) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("canvas has no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let (width, glow) = match profile {
            InputProfile::Desktop => (TRAIL_WIDTH_PX, TRAIL_GLOW_PX),
            InputProfile::Touch => (TOUCH_TRAIL_WIDTH_PX, TOUCH_TRAIL_GLOW_PX),
        };
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        Ok(Self {
            ctx,
            canvas: canvas.clone(),
            width,
            glow,
            last: None,
            guide: None,
        })
    }

    /// Wipe the canvas and start a fresh trail at `p`.
    pub fn begin(&mut self, p: Vec2) {
        self.clear();
        self.last = Some(p);
        self.dot(p, TRAIL_START_COLOR);
    }

    /// Extend the current trail to `p` in `color`.
    pub fn extend(&mut self, p: Vec2, color: &str) {
        let Some(prev) = self.last.replace(p) else {
            return;
        };
        let ctx = &self.ctx;
        let style = JsValue::from_str(color);
        ctx.begin_path();
        ctx.move_to(prev.x as f64, prev.y as f64);
        ctx.line_to(p.x as f64, p.y as f64);
        ctx.set_stroke_style(&style);
        ctx.set_shadow_color(color);
        ctx.set_shadow_blur(self.glow);
        ctx.set_line_width(self.width);
        ctx.stroke();
    }

    /// Stop extending; the strokes stay until `clear`.
    pub fn finish(&mut self) {
        self.last = None;
    }

    pub fn clear(&mut self) {
        self.last = None;
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        self.draw_guide();
    }

    pub fn set_guide(&mut self, guide: Option<Vec<Vec2>>) {
        self.guide = guide;
        self.clear();
    }

    fn dot(&self, p: Vec2, color: &str) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(p.x as f64, p.y as f64);
        ctx.line_to(p.x as f64 + 0.1, p.y as f64);
        ctx.set_stroke_style(&JsValue::from_str(color));
        ctx.set_shadow_color(color);
        ctx.set_shadow_blur(self.glow);
        ctx.set_line_width(self.width);
        ctx.stroke();
    }

    fn draw_guide(&self) {
        let Some(points) = self.guide.as_deref() else {
            return;
        };
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            ctx.line_to(p.x as f64, p.y as f64);
        }
        ctx.set_stroke_style(&JsValue::from_str(GUIDE_COLOR));
        ctx.set_shadow_color(GUIDE_COLOR);
        ctx.set_shadow_blur(0.0);
        ctx.set_line_width(GUIDE_WIDTH_PX);
        ctx.stroke();
    }
}
