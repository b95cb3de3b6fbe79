//! `Canvas2d` over a `CanvasRenderingContext2d`

use hanami_particles::{Canvas2d, Paint};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// The petal surface. The backing store tracks the CSS size of the viewport.
pub struct WebCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
    /// Acquire a 2D context; `None` if the browser refuses one
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

fn report(op: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::trace!(op, ?err, "canvas call failed");
    }
}

impl Canvas2d for WebCanvas {
    fn clear(&mut self, width: f32, height: f32) {
        let (w, h) = (width as u32, height as u32);
        // Resizing the backing store also clears it
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
        }
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f32, y: f32) {
        report("translate", self.ctx.translate(x as f64, y as f64));
    }

    fn rotate(&mut self, radians: f32) {
        report("rotate", self.ctx.rotate(radians as f64));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn set_fill(&mut self, paint: &Paint) {
        match *paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            Paint::Radial {
                radius,
                inner,
                outer,
            } => {
                let gradient = match self
                    .ctx
                    .create_radial_gradient(0.0, 0.0, 0.0, 0.0, 0.0, radius as f64)
                {
                    Ok(gradient) => gradient,
                    Err(err) => {
                        tracing::trace!(?err, "radial gradient rejected");
                        return;
                    }
                };
                for stop in [inner, outer] {
                    report(
                        "add_color_stop",
                        gradient.add_color_stop(stop.offset, &stop.color.to_css()),
                    );
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.ctx.move_to(x as f64, y as f64);
    }

    fn bezier_curve_to(&mut self, cp1: (f32, f32), cp2: (f32, f32), end: (f32, f32)) {
        self.ctx.bezier_curve_to(
            cp1.0 as f64,
            cp1.1 as f64,
            cp2.0 as f64,
            cp2.1 as f64,
            end.0 as f64,
            end.1 as f64,
        );
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }
}
