//! Canvas lookup, sizing, and the `Painter` implementation for the 2d context.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

use crate::error::EngineError;
use crate::graph::Point;
use crate::render::{Fill, Glow, Painter};
use crate::viewport::{SizeSource, to_pixels};

const LABEL_FONT: &str = "12px Arial";

/// Resolve `id` to a canvas and its 2d context.
pub fn find_canvas(id: &str) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), EngineError> {
    let win = window().ok_or(EngineError::NoWindow)?;
    let doc = win.document().ok_or(EngineError::NoDocument)?;
    let el = doc
        .get_element_by_id(id)
        .ok_or_else(|| EngineError::SurfaceNotFound(id.to_string()))?;
    let canvas: HtmlCanvasElement = el
        .dyn_into()
        .map_err(|_| EngineError::NotACanvas(id.to_string()))?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(EngineError::NoContext)?
        .dyn_into()
        .map_err(|_| EngineError::NoContext)?;
    Ok((canvas, ctx))
}

/// Tag the element so page CSS can show a static stand-in when mounting failed.
pub fn mark_static(id: &str) {
    if let Some(el) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    {
        el.set_attribute("data-circuit-static", "true").ok();
    }
}

/// Current size of the area the canvas should cover, in whole pixels.
pub fn measure(canvas: &HtmlCanvasElement, source: SizeSource) -> (u32, u32) {
    match source {
        SizeSource::Window => {
            let Some(win) = window() else {
                return (0, 0);
            };
            let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            (to_pixels(w), to_pixels(h))
        }
        // The canvas box itself, so pointer offsets map 1:1 onto the backing
        // store. The parent only stands in while the canvas has no layout box.
        SizeSource::Container => {
            let (w, h) = (canvas.client_width(), canvas.client_height());
            if w > 0 && h > 0 {
                return (to_pixels(w as f64), to_pixels(h as f64));
            }
            match canvas.parent_element() {
                Some(parent) => (
                    to_pixels(parent.client_width() as f64),
                    to_pixels(parent.client_height() as f64),
                ),
                None => (0, 0),
            }
        }
    }
}

/// Match the canvas backing store to `width` × `height`.
pub fn apply_size(canvas: &HtmlCanvasElement, width: u32, height: u32) {
    if canvas.width() != width {
        canvas.set_width(width);
    }
    if canvas.height() != height {
        canvas.set_height(height);
    }
}

impl Painter for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn set_glow(&mut self, glow: Option<Glow<'_>>) {
        match glow {
            Some(g) => {
                self.set_shadow_color(g.color);
                self.set_shadow_blur(g.blur);
            }
            None => self.set_shadow_blur(0.0),
        }
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.set_global_alpha(alpha);
    }

    fn line(&mut self, from: Point, to: Point, color: &str, width: f64) {
        self.set_stroke_style_str(color);
        self.set_line_width(width);
        self.begin_path();
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        self.stroke();
    }

    fn disc(&mut self, center: Point, radius: f64, fill: Fill<'_>) {
        match fill {
            Fill::Solid(color) => self.set_fill_style_str(color),
            Fill::Radial {
                inner_radius,
                outer_radius,
                inner,
                outer,
            } => {
                let gradient = self.create_radial_gradient(
                    center.x,
                    center.y,
                    inner_radius,
                    center.x,
                    center.y,
                    outer_radius,
                );
                match gradient {
                    Ok(g) => {
                        g.add_color_stop(0.0, inner).ok();
                        g.add_color_stop(1.0, outer).ok();
                        self.set_fill_style_canvas_gradient(&g);
                    }
                    Err(_) => self.set_fill_style_str(outer),
                }
            }
        }
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, TAU).ok();
        self.fill();
    }

    fn ring(&mut self, center: Point, radius: f64, color: &str, width: f64) {
        self.set_stroke_style_str(color);
        self.set_line_width(width);
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, TAU).ok();
        self.stroke();
    }

    fn label(&mut self, text: &str, at: Point) {
        self.set_fill_style_str("white");
        self.set_font(LABEL_FONT);
        self.set_text_align("center");
        self.set_text_baseline("middle");
        self.fill_text(text, at.x, at.y).ok();
    }
}
