//! `CanvasRenderingContext2d` presentation sink

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::render::{Align, DrawCmd, PresentationSink};

/// Paints draw commands immediately onto a canvas context
pub struct CanvasSink {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSink {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }
}

impl PresentationSink for CanvasSink {
    fn draw(&mut self, cmd: DrawCmd) {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Clear(color) => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(0.0, 0.0, self.width, self.height);
            }
            DrawCmd::Line {
                from,
                to,
                color,
                width,
            } => {
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(width as f64);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
                stroke,
            } => {
                ctx.begin_path();
                // Only fails for a negative radius
                if ctx
                    .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
                    .is_err()
                {
                    return;
                }
                match stroke {
                    Some(width) => {
                        ctx.set_stroke_style_str(&color.to_css());
                        ctx.set_line_width(width as f64);
                        ctx.stroke();
                    }
                    None => {
                        ctx.set_fill_style_str(&color.to_css());
                        ctx.fill();
                    }
                }
            }
            DrawCmd::Polygon { points, color } => {
                let Some((first, rest)) = points.split_first() else {
                    return;
                };
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.close_path();
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill();
            }
            DrawCmd::Text {
                text,
                pos,
                size,
                color,
                align,
            } => {
                let (text_align, baseline) = match align {
                    Align::TopLeft => ("left", "top"),
                    Align::Center => ("center", "middle"),
                };
                ctx.set_font(&format!("{size}px sans-serif"));
                ctx.set_text_align(text_align);
                ctx.set_text_baseline(baseline);
                ctx.set_fill_style_str(&color.to_css());
                if let Err(e) = ctx.fill_text(&text, pos.x as f64, pos.y as f64) {
                    log::warn!("fill_text failed: {:?}", e);
                }
            }
        }
    }
}
