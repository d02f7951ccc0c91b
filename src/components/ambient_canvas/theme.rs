//! Colors and tint rules for the ambient canvas.
//!
//! The host owns a "current theme color" that may change at any time. Tints
//! decide how that color (or a fixed one) turns into fill and stroke styles
//! for drifting points and expansion rings.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "String")]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	/// Fallback used when a CSS color string cannot be understood.
	pub const GRAY: Color = Color::rgb(128, 128, 128);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RGB`, `#RRGGBB`) and `rgb()`/`rgba()` functional notation;
	/// anything else falls back to [`Color::GRAY`].
	pub fn parse(color_str: &str) -> Color {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			let channel = |i: usize, len: usize| {
				hex.get(i..i + len)
					.and_then(|c| u8::from_str_radix(c, 16).ok())
					.map(|v| if len == 1 { v * 17 } else { v })
			};
			let parsed = match hex.len() {
				3 => channel(0, 1).zip(channel(1, 1)).zip(channel(2, 1)),
				6 | 8 => channel(0, 2).zip(channel(2, 2)).zip(channel(4, 2)),
				_ => None,
			};
			parsed.map_or(Self::GRAY, |((r, g), b)| Color::rgb(r, g, b))
		} else if s.starts_with("rgb") {
			let nums: Vec<&str> = s
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let r = nums
				.first()
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(128);
			let g = nums
				.get(1)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(128);
			let b = nums
				.get(2)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(128);
			let a = nums
				.get(3)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(1.0);
			Color::rgba(r, g, b, a)
		} else {
			Self::GRAY
		}
	}

	/// Hue in degrees `[0, 360)` from the rgb channels. Grays report 0.
	pub fn hue(self) -> f64 {
		let (r, g, b) = (
			self.r as f64 / 255.0,
			self.g as f64 / 255.0,
			self.b as f64 / 255.0,
		);
		let max = r.max(g).max(b);
		let min = r.min(g).min(b);
		if max == min {
			return 0.0;
		}

		let h = if max == r {
			60.0 * ((g - b) / (max - min))
		} else if max == g {
			60.0 * (2.0 + (b - r) / (max - min))
		} else {
			60.0 * (4.0 + (r - g) / (max - min))
		};
		if h < 0.0 { h + 360.0 } else { h }
	}

	/// Eight-digit hex with the given opacity baked in as the alpha byte.
	pub fn to_css_hex_alpha(self, opacity: f64) -> String {
		let alpha = (opacity.clamp(0.0, 1.0) * 255.0).floor() as u8;
		format!(
			"#{:02x}{:02x}{:02x}{:02x}",
			self.r, self.g, self.b, alpha
		)
	}
}

impl From<String> for Color {
	fn from(s: String) -> Self {
		Color::parse(&s)
	}
}

/// `hsla()` stroke style with the saturation and lightness the ripples use.
pub fn hsla(hue: f64, opacity: f64) -> String {
	format!("hsla({}, 100%, 70%, {})", hue, opacity)
}

/// How drifting points pick their fill color.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", content = "color", rename_all = "snake_case")]
pub enum PointTint {
	/// Follow the host's current theme color.
	Theme,
	/// Always use this color.
	Fixed(Color),
}

impl PointTint {
	pub fn resolve(&self, theme_color: Color) -> Color {
		match self {
			PointTint::Theme => theme_color,
			PointTint::Fixed(c) => *c,
		}
	}
}

/// How expansion rings pick their stroke color.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RingTint {
	/// Theme color with the ring opacity as an alpha suffix.
	Theme,
	/// Hue of the current theme color, drawn as a bright `hsla()`.
	ThemeHue,
	/// Hue picked once at spawn from `min..min + span`.
	HueRange { min: f64, span: f64 },
}

/// Tint rules for one canvas instance.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
	pub point: PointTint,
	pub ring: RingTint,
}

impl Theme {
	/// Points and rings both follow the theme color (default).
	pub fn tinted() -> Self {
		Self {
			point: PointTint::Theme,
			ring: RingTint::Theme,
		}
	}

	/// Theme-colored points, rings drawn in the theme color's hue.
	pub fn hue_shift() -> Self {
		Self {
			point: PointTint::Theme,
			ring: RingTint::ThemeHue,
		}
	}

	/// Pink points with pink/purple rings.
	pub fn blossom() -> Self {
		Self {
			point: PointTint::Fixed(Color::rgb(244, 114, 182)),
			ring: RingTint::HueRange {
				min: 300.0,
				span: 60.0,
			},
		}
	}

	/// Amber points with amber/gold rings.
	pub fn amber() -> Self {
		Self {
			point: PointTint::Fixed(Color::rgb(245, 158, 11)),
			ring: RingTint::HueRange {
				min: 40.0,
				span: 60.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::tinted()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_and_functional_colors() {
		assert_eq!(Color::parse("#FF6B6B"), Color::rgb(255, 107, 107));
		assert_eq!(Color::parse("#fff"), Color::rgb(255, 255, 255));
		assert_eq!(
			Color::parse("rgba(245, 158, 11, 0.5)"),
			Color::rgba(245, 158, 11, 0.5)
		);
		assert_eq!(Color::parse("papayawhip"), Color::GRAY);
		assert_eq!(Color::parse("#12"), Color::GRAY);
	}

	#[test]
	fn hue_matches_primary_colors() {
		assert_eq!(Color::rgb(255, 0, 0).hue(), 0.0);
		assert_eq!(Color::rgb(0, 255, 0).hue(), 120.0);
		assert_eq!(Color::rgb(0, 0, 255).hue(), 240.0);
		assert_eq!(Color::rgb(255, 0, 255).hue(), 300.0);
		assert_eq!(Color::rgb(40, 40, 40).hue(), 0.0);
	}

	#[test]
	fn hex_alpha_suffix_floors_opacity() {
		let c = Color::parse("#4ECDC4");
		assert_eq!(c.to_css_hex_alpha(1.0), "#4ecdc4ff");
		assert_eq!(c.to_css_hex_alpha(0.5), "#4ecdc47f");
		assert_eq!(c.to_css_hex_alpha(0.0), "#4ecdc400");
		assert_eq!(c.to_css_hex_alpha(-0.2), "#4ecdc400");
	}

	#[test]
	fn theme_deserializes_tagged_tints() {
		let theme: Theme = serde_json::from_str(
			r##"{
				"point": { "kind": "fixed", "color": "#f472b6" },
				"ring": { "kind": "hue_range", "min": 300.0, "span": 60.0 }
			}"##,
		)
		.unwrap();
		assert_eq!(theme, Theme::blossom());

		let partial: Theme = serde_json::from_str(r#"{ "ring": { "kind": "theme_hue" } }"#).unwrap();
		assert_eq!(partial, Theme::hue_shift());
	}
}
