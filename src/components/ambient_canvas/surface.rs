//! Device-pixel-ratio aware sizing of the drawing surface.
//!
//! The backing buffer is `logical size * dpr` pixels and the context carries a
//! uniform `dpr` scale, so every drawing call works in logical pixels.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Something with a pixel buffer and a drawing transform.
pub trait ScaleTarget {
	fn set_buffer_size(&mut self, width: u32, height: u32);
	fn reset_transform(&mut self);
	fn scale(&mut self, factor: f64);
}

/// Measured container size at the moment of a mount or resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerMetrics {
	pub width: f64,
	pub height: f64,
	pub dpr: f64,
}

impl ContainerMetrics {
	pub fn has_area(&self) -> bool {
		self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
	}
}

/// Current logical size and device pixel ratio of the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceState {
	pub width: f64,
	pub height: f64,
	pub dpr: f64,
}

impl Default for SurfaceState {
	fn default() -> Self {
		Self {
			width: 0.0,
			height: 0.0,
			dpr: 1.0,
		}
	}
}

impl SurfaceState {
	pub fn is_sized(&self) -> bool {
		self.width > 0.0 && self.height > 0.0
	}

	/// Backing buffer size in device pixels.
	pub fn buffer_size(&self) -> (u32, u32) {
		(
			(self.width * self.dpr) as u32,
			(self.height * self.dpr) as u32,
		)
	}

	/// Rebind the surface to the container's current size.
	///
	/// A container with no area leaves both the state and the target untouched
	/// and returns `false`; the next resize with a real size applies instead.
	/// The transform is reset before scaling, so repeated calls never compound.
	pub fn resize<T: ScaleTarget + ?Sized>(
		&mut self,
		target: &mut T,
		metrics: ContainerMetrics,
	) -> bool {
		if !metrics.has_area() {
			return false;
		}
		let dpr = if metrics.dpr.is_finite() && metrics.dpr > 0.0 {
			metrics.dpr
		} else {
			1.0
		};

		self.width = metrics.width;
		self.height = metrics.height;
		self.dpr = dpr;

		let (bw, bh) = self.buffer_size();
		target.set_buffer_size(bw, bh);
		target.reset_transform();
		target.scale(dpr);
		true
	}
}

/// Canvas element plus its 2D context.
#[derive(Clone, Debug)]
pub struct WebSurface {
	pub canvas: HtmlCanvasElement,
	pub ctx: CanvasRenderingContext2d,
}

impl WebSurface {
	/// Container measurements: the canvas's rendered box and the window's dpr.
	pub fn measure(&self) -> ContainerMetrics {
		let rect = self.canvas.get_bounding_client_rect();
		let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
		ContainerMetrics {
			width: rect.width(),
			height: rect.height(),
			dpr,
		}
	}
}

impl ScaleTarget for WebSurface {
	fn set_buffer_size(&mut self, width: u32, height: u32) {
		self.canvas.set_width(width);
		self.canvas.set_height(height);
	}

	fn reset_transform(&mut self) {
		let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
	}

	fn scale(&mut self, factor: f64) {
		let _ = self.ctx.scale(factor, factor);
	}
}
