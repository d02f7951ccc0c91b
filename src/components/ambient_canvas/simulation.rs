//! One-frame update and draw pass over every live particle.
//!
//! The step is frame-driven: each call advances every entity by one fixed
//! increment regardless of how much wall time passed since the last frame.
//! Rendering order per frame:
//! 1. Clear the surface
//! 2. Drifting points (recolored, updated, drawn)
//! 3. Expansion rings on top (recolored, updated, culled or drawn)
//! 4. Maybe one random ring for the next frame

use log::trace;
use rand::Rng;

use super::config::EngineConfig;
use super::particles::{DriftingPoint, ExpansionRing, uniform};
use super::render::Painter;
use super::surface::SurfaceState;
use super::theme::{Color, RingTint, Theme};

/// Entity sets and tuning for one canvas instance.
pub struct Simulation<R: Rng> {
	config: EngineConfig,
	theme: Theme,
	points: Vec<DriftingPoint>,
	rings: Vec<ExpansionRing>,
	rng: R,
}

impl<R: Rng> Simulation<R> {
	pub fn new(config: EngineConfig, theme: Theme, rng: R) -> Self {
		Self {
			config,
			theme,
			points: Vec::new(),
			rings: Vec::new(),
			rng,
		}
	}

	pub fn points(&self) -> &[DriftingPoint] {
		&self.points
	}

	pub fn rings(&self) -> &[ExpansionRing] {
		&self.rings
	}

	/// Replace the drifting point pool with a fresh batch sized for `surface`.
	pub fn populate(&mut self, surface: &SurfaceState) -> usize {
		let count = self.config.population_for(surface.width, surface.height);
		self.points = (0..count)
			.map(|_| {
				DriftingPoint::spawn(
					surface.width,
					surface.height,
					&self.config.point,
					&mut self.rng,
				)
			})
			.collect();
		count
	}

	/// Add a ring at surface-local `(x, y)`. Not subject to the ring cap.
	pub fn spawn_ring(&mut self, x: f64, y: f64, theme_color: Color) {
		let mut ring = ExpansionRing::spawn(x, y, theme_color, &self.config.ring, &mut self.rng);
		if let RingTint::HueRange { min, span } = self.theme.ring {
			ring.hue = Some(uniform(&mut self.rng, min, min + span).floor());
		}
		trace!("ambient-canvas: ring at ({x:.0}, {y:.0}) max {:.0}", ring.max_radius);
		self.rings.push(ring);
	}

	/// Advance and render exactly one frame.
	pub fn step<P: Painter + ?Sized>(
		&mut self,
		surface: &SurfaceState,
		theme_color: Color,
		painter: &mut P,
	) {
		let (w, h) = (surface.width, surface.height);
		painter.clear(w, h);

		let point_color = self.theme.point.resolve(theme_color);
		for p in &mut self.points {
			p.color = point_color;
			p.update(w, h, &mut self.rng);
			p.draw(painter);
		}

		let tint = self.theme.ring;
		let line_width = self.config.ring.line_width;
		self.rings.retain_mut(|ring| {
			match tint {
				RingTint::Theme => ring.color = theme_color,
				RingTint::ThemeHue => ring.hue = Some(theme_color.hue()),
				RingTint::HueRange { .. } => {}
			}
			let alive = ring.update();
			if alive {
				ring.draw(painter, line_width);
			}
			alive
		});

		if self.rings.len() < self.config.ring_cap
			&& self.rng.gen_bool(self.config.spawn_probability.clamp(0.0, 1.0))
		{
			let (x, y) = (
				uniform(&mut self.rng, 0.0, w),
				uniform(&mut self.rng, 0.0, h),
			);
			self.spawn_ring(x, y, theme_color);
		}
	}
}
