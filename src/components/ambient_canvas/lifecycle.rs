//! Mount, run, and teardown state for one ambient canvas.
//!
//! `Unmounted -> Sizing -> Running -> Unmounted`. The controller exclusively
//! owns the surface state, the simulation, and the pointer bridge; the host
//! only feeds it measurements, pointer events, frames, and a color provider.

use log::{debug, info};
use rand::Rng;

use super::config::EngineConfig;
use super::interaction::{ContainerRect, InteractionBridge};
use super::render::Painter;
use super::simulation::Simulation;
use super::surface::{ContainerMetrics, ScaleTarget, SurfaceState};
use super::theme::{Color, Theme};

/// Where the controller is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Not attached, or torn down.
	Unmounted,
	/// Attached but waiting for a container with a real size.
	Sizing,
	/// Populated; frames advance the simulation.
	Running,
}

/// Reads the host's current theme color. Called once per frame.
pub type ColorProvider = Box<dyn Fn() -> Color>;

/// Owns everything one canvas instance needs between frames.
pub struct AmbientController<R: Rng> {
	phase: Phase,
	surface: SurfaceState,
	simulation: Simulation<R>,
	bridge: InteractionBridge,
	color: ColorProvider,
}

impl<R: Rng> AmbientController<R> {
	pub fn new(config: EngineConfig, theme: Theme, color: ColorProvider, rng: R) -> Self {
		let bridge = InteractionBridge::new(config.move_throttle_ms);
		Self {
			phase: Phase::Unmounted,
			surface: SurfaceState::default(),
			simulation: Simulation::new(config, theme, rng),
			bridge,
			color,
		}
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn is_running(&self) -> bool {
		self.phase == Phase::Running
	}

	pub fn surface(&self) -> &SurfaceState {
		&self.surface
	}

	pub fn simulation(&self) -> &Simulation<R> {
		&self.simulation
	}

	/// Attach to a container. `None` means the container is not available
	/// yet; the host retries on a later render.
	pub fn mount<T: ScaleTarget + ?Sized>(
		&mut self,
		target: &mut T,
		container: Option<ContainerMetrics>,
	) -> Phase {
		if self.phase != Phase::Unmounted {
			return self.phase;
		}
		let Some(metrics) = container else {
			return self.phase;
		};
		self.phase = Phase::Sizing;
		self.resize(target, metrics)
	}

	/// Re-measure the surface. Completes a deferred mount once the container
	/// reports a real size.
	pub fn resize<T: ScaleTarget + ?Sized>(
		&mut self,
		target: &mut T,
		metrics: ContainerMetrics,
	) -> Phase {
		if self.phase == Phase::Unmounted {
			return self.phase;
		}
		if !self.surface.resize(target, metrics) {
			debug!(
				"ambient-canvas: container {}x{} has no area, deferring",
				metrics.width, metrics.height
			);
			return self.phase;
		}
		debug!(
			"ambient-canvas: surface {}x{} @ {}x",
			self.surface.width, self.surface.height, self.surface.dpr
		);

		if self.phase == Phase::Sizing {
			let count = self.simulation.populate(&self.surface);
			info!("ambient-canvas: running with {count} drifting points");
			self.phase = Phase::Running;
		}
		self.phase
	}

	/// Apply a window resize from the host. The surface is always re-measured;
	/// returns true only when this resize completed a deferred mount, so the
	/// host knows to start its frame loop.
	pub fn window_resized<T: ScaleTarget + ?Sized>(
		&mut self,
		target: &mut T,
		metrics: ContainerMetrics,
	) -> bool {
		let was_running = self.is_running();
		let phase = self.resize(target, metrics);
		!was_running && phase == Phase::Running
	}

	/// Run one simulation step. Returns whether another frame should be scheduled.
	pub fn frame<P: Painter + ?Sized>(&mut self, painter: &mut P) -> bool {
		if self.phase != Phase::Running {
			return false;
		}
		let color = (self.color)();
		self.simulation.step(&self.surface, color, painter);
		true
	}

	pub fn pointer_click(&mut self, client_x: f64, client_y: f64, rect: ContainerRect) {
		if self.phase != Phase::Running {
			return;
		}
		if let Some((x, y)) = self.bridge.click(client_x, client_y, rect) {
			self.simulation.spawn_ring(x, y, (self.color)());
		}
	}

	pub fn pointer_move(&mut self, client_x: f64, client_y: f64, rect: ContainerRect, now_ms: f64) {
		if self.phase != Phase::Running {
			return;
		}
		if let Some((x, y)) = self.bridge.pointer_move(client_x, client_y, rect, now_ms) {
			self.simulation.spawn_ring(x, y, (self.color)());
		}
	}

	/// Stop the simulation. Entity state is left exactly as the last frame saw it.
	pub fn teardown(&mut self) {
		if self.phase != Phase::Unmounted {
			info!("ambient-canvas: torn down");
		}
		self.phase = Phase::Unmounted;
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::render::testing::RecordingPainter;
	use super::super::surface::testing::RecordingTarget;
	use super::*;

	const RECT: ContainerRect = ContainerRect {
		left: 0.0,
		top: 0.0,
		width: 800.0,
		height: 600.0,
	};

	fn metrics(width: f64, height: f64) -> ContainerMetrics {
		ContainerMetrics {
			width,
			height,
			dpr: 2.0,
		}
	}

	fn controller(config: EngineConfig) -> AmbientController<SmallRng> {
		AmbientController::new(
			config,
			Theme::tinted(),
			Box::new(|| Color::rgb(255, 209, 102)),
			SmallRng::seed_from_u64(9),
		)
	}

	#[test]
	fn mount_without_container_stays_unmounted() {
		let mut c = controller(EngineConfig::lively());
		let mut target = RecordingTarget::default();
		assert_eq!(c.mount(&mut target, None), Phase::Unmounted);
		assert_eq!(target.calls, 0);
		assert!(!c.frame(&mut RecordingPainter::default()));
	}

	#[test]
	fn zero_sized_mount_defers_until_resize() {
		let mut c = controller(EngineConfig::lively());
		let mut target = RecordingTarget::default();
		assert_eq!(c.mount(&mut target, Some(metrics(0.0, 0.0))), Phase::Sizing);
		assert!(c.simulation().points().is_empty());
		assert!(!c.frame(&mut RecordingPainter::default()));

		assert_eq!(c.resize(&mut target, metrics(800.0, 600.0)), Phase::Running);
		assert_eq!(c.simulation().points().len(), 24);
		assert_eq!(target.buffer, (1600, 1200));
		assert!(c.frame(&mut RecordingPainter::default()));
	}

	#[test]
	fn resize_while_running_keeps_population() {
		let mut c = controller(EngineConfig::lively());
		let mut target = RecordingTarget::default();
		c.mount(&mut target, Some(metrics(800.0, 600.0)));
		c.resize(&mut target, metrics(400.0, 300.0));
		assert_eq!(c.phase(), Phase::Running);
		assert_eq!(c.simulation().points().len(), 24);
		assert_eq!(c.surface().width, 400.0);
		assert_eq!(target.effective_scale, 2.0);
	}

	#[test]
	fn window_resize_while_running_remeasures_surface() {
		let mut c = controller(EngineConfig::lively());
		let mut target = RecordingTarget::default();
		assert_eq!(c.mount(&mut target, Some(metrics(800.0, 600.0))), Phase::Running);

		assert!(!c.window_resized(&mut target, metrics(1200.0, 900.0)));
		assert_eq!(c.surface().width, 1200.0);
		assert_eq!(c.surface().height, 900.0);
		assert_eq!(target.buffer, (2400, 1800));
		assert_eq!(target.effective_scale, 2.0);
		assert_eq!(c.simulation().points().len(), 24);
		assert!(c.frame(&mut RecordingPainter::default()));
	}

	#[test]
	fn window_resize_starts_loop_only_when_mount_completes() {
		let mut c = controller(EngineConfig::lively());
		let mut target = RecordingTarget::default();
		c.mount(&mut target, Some(metrics(0.0, 0.0)));

		assert!(!c.window_resized(&mut target, metrics(0.0, 300.0)));
		assert_eq!(c.phase(), Phase::Sizing);
		assert!(c.window_resized(&mut target, metrics(800.0, 600.0)));
		assert_eq!(target.buffer, (1600, 1200));
		assert!(!c.window_resized(&mut target, metrics(640.0, 480.0)));
		assert_eq!(target.buffer, (1280, 960));

		c.teardown();
		assert!(!c.window_resized(&mut target, metrics(1000.0, 1000.0)));
		assert_eq!(c.surface().width, 640.0);
	}

	#[test]
	fn color_provider_is_read_every_frame() {
		let shared = Rc::new(Cell::new(Color::rgb(255, 0, 0)));
		let reader = shared.clone();
		let mut c = AmbientController::new(
			EngineConfig {
				spawn_probability: 0.0,
				..EngineConfig::lively()
			},
			Theme::tinted(),
			Box::new(move || reader.get()),
			SmallRng::seed_from_u64(1),
		);
		let mut target = RecordingTarget::default();
		c.mount(&mut target, Some(metrics(800.0, 600.0)));

		c.frame(&mut RecordingPainter::default());
		assert!(c.simulation().points().iter().all(|p| p.color == Color::rgb(255, 0, 0)));

		shared.set(Color::rgb(6, 214, 160));
		c.frame(&mut RecordingPainter::default());
		assert!(
			c.simulation()
				.points()
				.iter()
				.all(|p| p.color == Color::rgb(6, 214, 160))
		);
	}

	#[test]
	fn pointer_events_spawn_rings() {
		let mut c = controller(EngineConfig {
			spawn_probability: 0.0,
			..EngineConfig::lively()
		});
		let mut target = RecordingTarget::default();

		c.pointer_click(10.0, 10.0, RECT);
		assert!(c.simulation().rings().is_empty());

		c.mount(&mut target, Some(metrics(800.0, 600.0)));
		c.pointer_click(10.0, 10.0, RECT);
		c.pointer_click(20.0, 10.0, RECT);
		for i in 0..200 {
			c.pointer_move(300.0, 300.0, RECT, i as f64 * 10.0);
		}
		assert_eq!(c.simulation().rings().len(), 4);
	}

	#[test]
	fn teardown_freezes_state() {
		let mut c = controller(EngineConfig {
			spawn_probability: 1.0,
			..EngineConfig::lively()
		});
		let mut target = RecordingTarget::default();
		c.mount(&mut target, Some(metrics(800.0, 600.0)));
		for _ in 0..30 {
			assert!(c.frame(&mut RecordingPainter::default()));
		}
		c.pointer_click(50.0, 50.0, RECT);

		c.teardown();
		let points = c.simulation().points().to_vec();
		let rings = c.simulation().rings().to_vec();
		assert!(!rings.is_empty());

		let mut painter = RecordingPainter::default();
		for i in 0..1_000 {
			assert!(!c.frame(&mut painter));
			c.pointer_click(60.0, 60.0, RECT);
			c.pointer_move(70.0, 70.0, RECT, 10_000.0 + i as f64 * 2_000.0);
		}
		c.resize(&mut target, metrics(1000.0, 1000.0));

		assert!(painter.ops.is_empty());
		assert_eq!(c.simulation().points(), points.as_slice());
		assert_eq!(c.simulation().rings(), rings.as_slice());
		assert_eq!(c.surface().width, 800.0);
		assert_eq!(c.phase(), Phase::Unmounted);
	}

	#[test]
	fn teardown_is_idempotent() {
		let mut c = controller(EngineConfig::lively());
		let mut target = RecordingTarget::default();
		c.mount(&mut target, Some(metrics(800.0, 600.0)));
		c.teardown();
		c.teardown();
		assert_eq!(c.phase(), Phase::Unmounted);
	}
}
