//! Tuning constants for the ambient particle engine.
//!
//! Two presets cover the looks used across the site: [`EngineConfig::lively`]
//! for hero-style sections and [`EngineConfig::gentle`] for quieter ones.
//! Every field can be overridden from JSON; missing fields fall back to the
//! lively preset.

use serde::Deserialize;

/// Spawn ranges for drifting points.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PointConfig {
	/// Radius range in logical pixels.
	pub size_min: f64,
	pub size_max: f64,
	/// Horizontal velocity is drawn from `-drift_x..drift_x` px/frame.
	pub drift_x: f64,
	/// Downward velocity range in px/frame.
	pub fall_min: f64,
	pub fall_max: f64,
	pub opacity_min: f64,
	pub opacity_max: f64,
}

impl Default for PointConfig {
	fn default() -> Self {
		Self {
			size_min: 1.0,
			size_max: 5.0,
			drift_x: 0.15,
			fall_min: 0.2,
			fall_max: 0.7,
			opacity_min: 0.3,
			opacity_max: 0.8,
		}
	}
}

/// Spawn ranges for expansion rings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RingConfig {
	pub max_radius_min: f64,
	pub max_radius_max: f64,
	/// Growth per frame in logical pixels.
	pub speed_min: f64,
	pub speed_max: f64,
	/// Opacity at birth; decays by `life / max_radius`.
	pub base_opacity: f64,
	pub line_width: f64,
}

impl Default for RingConfig {
	fn default() -> Self {
		Self {
			max_radius_min: 100.0,
			max_radius_max: 200.0,
			speed_min: 5.0,
			speed_max: 8.0,
			base_opacity: 0.7,
			line_width: 2.0,
		}
	}
}

/// Complete engine configuration for one canvas instance.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
	/// Upper bound on the drifting point population.
	pub population_cap: usize,
	/// Logical square pixels of surface per drifting point.
	pub area_per_point: f64,
	/// Random spawns stop while this many rings are alive.
	pub ring_cap: usize,
	/// Chance per frame of a random ring spawn.
	pub spawn_probability: f64,
	/// Minimum gap between ring spawns caused by pointer movement.
	pub move_throttle_ms: f64,
	pub point: PointConfig,
	pub ring: RingConfig,
}

impl EngineConfig {
	/// Denser population, larger and faster rings (default).
	pub fn lively() -> Self {
		Self {
			population_cap: 50,
			area_per_point: 20_000.0,
			ring_cap: 10,
			spawn_probability: 0.01,
			move_throttle_ms: 1000.0,
			point: PointConfig::default(),
			ring: RingConfig::default(),
		}
	}

	/// Sparser population, smaller rings, slower pointer response.
	pub fn gentle() -> Self {
		Self {
			population_cap: 40,
			area_per_point: 25_000.0,
			ring_cap: 8,
			spawn_probability: 0.005,
			move_throttle_ms: 1200.0,
			point: PointConfig {
				size_max: 4.0,
				..PointConfig::default()
			},
			ring: RingConfig {
				max_radius_min: 80.0,
				max_radius_max: 160.0,
				speed_min: 4.0,
				speed_max: 7.0,
				..RingConfig::default()
			},
		}
	}

	/// Initial drifting point count for a logical surface size.
	pub fn population_for(&self, width: f64, height: f64) -> usize {
		if self.area_per_point <= 0.0 {
			return self.population_cap;
		}
		let by_area = (width * height / self.area_per_point).floor();
		if by_area.is_finite() && by_area > 0.0 {
			(by_area as usize).min(self.population_cap)
		} else {
			0
		}
	}
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self::lively()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn population_is_area_based_and_capped() {
		let lively = EngineConfig::lively();
		assert_eq!(lively.population_for(400.0, 300.0), 6);
		assert_eq!(lively.population_for(1920.0, 1080.0), 50);
		assert_eq!(lively.population_for(100.0, 100.0), 0);

		let gentle = EngineConfig::gentle();
		assert_eq!(gentle.population_for(1000.0, 500.0), 20);
		assert_eq!(gentle.population_for(2560.0, 1440.0), 40);
	}

	#[test]
	fn population_tracks_floor_of_area_ratio() {
		let config = EngineConfig::lively();
		for (w, h) in [(120.0, 500.0), (333.0, 777.0), (640.0, 480.0), (999.0, 201.0)] {
			let expected = ((w * h / 20_000.0) as usize).min(50);
			assert_eq!(config.population_for(w, h), expected, "{w}x{h}");
		}
	}

	#[test]
	fn partial_json_falls_back_to_lively() {
		let config: EngineConfig = serde_json::from_str(
			r#"{ "ring_cap": 3, "ring": { "speed_min": 1.0, "speed_max": 2.0 } }"#,
		)
		.unwrap();
		assert_eq!(config.ring_cap, 3);
		assert_eq!(config.population_cap, 50);
		assert_eq!(config.move_throttle_ms, 1000.0);
		assert_eq!(config.ring.speed_min, 1.0);
		assert_eq!(config.ring.max_radius_max, 200.0);
		assert_eq!(config.point, PointConfig::default());
	}
}
