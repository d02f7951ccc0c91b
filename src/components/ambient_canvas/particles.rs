//! Drifting points and expansion rings.
//!
//! Both are plain value records advanced one fixed increment per frame.
//! Drifting points are recycled forever; expansion rings grow until they pass
//! their maximum radius and are then dropped by the simulation.

use rand::Rng;

use super::config::{PointConfig, RingConfig};
use super::render::Painter;
use super::theme::{Color, hsla};

/// A slow ambient dot that wraps back into the surface when it leaves it.
#[derive(Clone, Debug, PartialEq)]
pub struct DriftingPoint {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub dx: f64,
	pub dy: f64,
	pub opacity: f64,
	pub color: Color,
}

impl DriftingPoint {
	pub fn new(x: f64, y: f64, radius: f64, dx: f64, dy: f64, opacity: f64) -> Self {
		Self {
			x,
			y,
			radius,
			dx,
			dy,
			opacity,
			color: Color::GRAY,
		}
	}

	/// Random point somewhere on a `width` x `height` surface.
	pub fn spawn<R: Rng>(width: f64, height: f64, config: &PointConfig, rng: &mut R) -> Self {
		Self::new(
			uniform(rng, 0.0, width),
			uniform(rng, 0.0, height),
			uniform(rng, config.size_min, config.size_max),
			uniform(rng, -config.drift_x, config.drift_x),
			uniform(rng, config.fall_min, config.fall_max),
			uniform(rng, config.opacity_min, config.opacity_max),
		)
	}

	/// Advance by one frame of velocity, wrapping instead of bouncing.
	///
	/// Falling past the bottom restarts at the top edge at a random column;
	/// leaving through either side (or the top) re-seeds both coordinates.
	pub fn update<R: Rng>(&mut self, width: f64, height: f64, rng: &mut R) {
		self.x += self.dx;
		self.y += self.dy;

		if self.y > height {
			self.y = 0.0;
			self.x = uniform(rng, 0.0, width);
		}
		if self.x < 0.0 || self.x > width || self.y < 0.0 {
			self.x = uniform(rng, 0.0, width);
			self.y = uniform(rng, 0.0, height);
		}
	}

	pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
		painter.fill_circle(
			self.x,
			self.y,
			self.radius,
			&self.color.to_css_hex_alpha(self.opacity),
		);
	}
}

/// A transient ring that grows from its origin and fades as it grows.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpansionRing {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub max_radius: f64,
	pub speed: f64,
	pub life: f64,
	pub base_opacity: f64,
	pub opacity: f64,
	pub color: Color,
	/// When set, the ring strokes as `hsla(hue, ..)` instead of using `color`.
	pub hue: Option<f64>,
}

impl ExpansionRing {
	pub fn new(x: f64, y: f64, max_radius: f64, speed: f64, base_opacity: f64, color: Color) -> Self {
		Self {
			x,
			y,
			radius: 0.0,
			max_radius,
			speed,
			life: 0.0,
			base_opacity,
			opacity: base_opacity,
			color,
			hue: None,
		}
	}

	/// Ring at `(x, y)` with randomized size and growth speed.
	pub fn spawn<R: Rng>(x: f64, y: f64, color: Color, config: &RingConfig, rng: &mut R) -> Self {
		Self::new(
			x,
			y,
			uniform(rng, config.max_radius_min, config.max_radius_max),
			uniform(rng, config.speed_min, config.speed_max),
			config.base_opacity,
			color,
		)
	}

	/// Grow by one step. Returns `false` once the radius has passed `max_radius`.
	pub fn update(&mut self) -> bool {
		self.radius += self.speed;
		self.life += self.speed;
		self.opacity = (self.base_opacity - self.life / self.max_radius).max(0.0);
		self.is_alive()
	}

	pub fn is_alive(&self) -> bool {
		self.radius <= self.max_radius
	}

	pub fn stroke_style(&self) -> String {
		match self.hue {
			Some(hue) => hsla(hue, self.opacity),
			None => self.color.to_css_hex_alpha(self.opacity),
		}
	}

	pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P, line_width: f64) {
		painter.stroke_circle(
			self.x,
			self.y,
			self.radius,
			line_width,
			&self.stroke_style(),
		);
	}
}

/// Uniform sample from `lo..hi`, tolerating empty or inverted ranges.
pub(crate) fn uniform<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
	if hi > lo { rng.gen_range(lo..hi) } else { lo }
}
