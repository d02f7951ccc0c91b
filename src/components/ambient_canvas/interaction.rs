//! Pointer input to ring spawn requests.

/// Bounding rectangle of the canvas in viewport coordinates.
///
/// Taken fresh from `getBoundingClientRect` for every event so scrolling and
/// layout changes between events are honored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerRect {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl ContainerRect {
	pub fn to_local(&self, client_x: f64, client_y: f64) -> (f64, f64) {
		(client_x - self.left, client_y - self.top)
	}

	fn contains(&self, x: f64, y: f64) -> bool {
		(0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
	}

	fn contains_strictly(&self, x: f64, y: f64) -> bool {
		x > 0.0 && x < self.width && y > 0.0 && y < self.height
	}
}

/// Per-instance pointer state: the last time a move produced a ring.
#[derive(Clone, Debug)]
pub struct InteractionBridge {
	throttle_ms: f64,
	last_move_spawn: Option<f64>,
}

impl InteractionBridge {
	pub fn new(throttle_ms: f64) -> Self {
		Self {
			throttle_ms,
			last_move_spawn: None,
		}
	}

	/// Surface-local spawn point for a click, if it landed on the surface.
	pub fn click(&mut self, client_x: f64, client_y: f64, rect: ContainerRect) -> Option<(f64, f64)> {
		let (x, y) = rect.to_local(client_x, client_y);
		rect.contains(x, y).then_some((x, y))
	}

	/// Surface-local spawn point for a pointer move, at most one per throttle window.
	///
	/// Moves outside the surface are ignored and do not touch the throttle clock.
	pub fn pointer_move(
		&mut self,
		client_x: f64,
		client_y: f64,
		rect: ContainerRect,
		now_ms: f64,
	) -> Option<(f64, f64)> {
		if let Some(last) = self.last_move_spawn {
			if now_ms - last <= self.throttle_ms {
				return None;
			}
		}
		let (x, y) = rect.to_local(client_x, client_y);
		if !rect.contains_strictly(x, y) {
			return None;
		}
		self.last_move_spawn = Some(now_ms);
		Some((x, y))
	}
}
