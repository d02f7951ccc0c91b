//! Drawing primitives for the ambient canvas.
//!
//! The engine only ever clears the surface, fills small circles, and strokes
//! ring outlines, so it draws through the narrow [`Painter`] trait. The real
//! implementation forwards to a 2D canvas context.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

/// Minimal drawing surface used by the simulation step.
///
/// Coordinates are logical (CSS) pixels; device pixel scaling is applied once
/// on the underlying context by the surface manager.
pub trait Painter {
	fn clear(&mut self, width: f64, height: f64);
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, style: &str);
	fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, line_width: f64, style: &str);
}

impl Painter for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, style: &str) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(style);
		self.fill();
	}

	fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, line_width: f64, style: &str) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.close_path();
		self.set_stroke_style_str(style);
		self.set_line_width(line_width);
		self.stroke();
	}
}
