//! Canvas 2D backend

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{Shape, frame};
use crate::sim::Snapshot;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    /// Draw one frame for a snapshot
    pub fn render(&self, snapshot: &Snapshot<'_>) {
        for shape in frame(snapshot) {
            self.draw(&shape);
        }
    }

    fn draw(&self, shape: &Shape) {
        let ctx = &self.ctx;
        match shape {
            Shape::Rect { x, y, w, h, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(*x, *y, *w, *h);
            }
            Shape::StrokeRect { x, y, w, h, color } => {
                ctx.set_stroke_style_str(color);
                ctx.stroke_rect(*x, *y, *w, *h);
            }
            Shape::Line { from, to, color } => {
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(1.0);
                ctx.begin_path();
                ctx.move_to(from.0, from.1);
                ctx.line_to(to.0, to.1);
                ctx.stroke();
            }
            Shape::Polygon { points, color } => {
                let Some((first, rest)) = points.split_first() else {
                    return;
                };
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                ctx.move_to(first.0, first.1);
                for p in rest {
                    ctx.line_to(p.0, p.1);
                }
                ctx.close_path();
                ctx.fill();
            }
            Shape::Circle { cx, cy, r, color } => {
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                if ctx.arc(*cx, *cy, *r, 0.0, std::f64::consts::TAU).is_ok() {
                    ctx.fill();
                }
            }
        }
    }
}
