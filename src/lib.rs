//! ambient-canvas: decorative particle and ripple backgrounds for Leptos pages.
//!
//! This crate provides a WASM canvas component that fills a page section with
//! slowly drifting points and expanding rings that react to clicks and pointer
//! movement, tinted by a theme color the host can change at any time.

use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use getrandom as _;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::ambient_canvas::{AmbientCanvas, AmbientController, Color, EngineConfig, Theme};

/// Hero banner slide colors; the banner background and its canvas follow these.
const BANNER_COLORS: [&str; 6] = [
	"#FF6B9D", "#4ECDC4", "#FFE66D", "#A8E6CF", "#FFB3BA", "#B5A7E6",
];

/// Accent colors cycled by the testimonial carousel.
const TESTIMONIAL_COLORS: [&str; 8] = [
	"#FF6B6B", "#4ECDC4", "#FFD166", "#06D6A0", "#118AB2", "#9381FF", "#F7D9C4", "#B76E79",
];

const AUTO_SLIDE: Duration = Duration::from_millis(6000);

/// Optional overrides for the hero canvas, embedded in the page as JSON.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AmbientSettings {
	pub engine: Option<EngineConfig>,
	pub theme: Option<Theme>,
}

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ambient-canvas: logging initialized");
}

/// Parse settings JSON of the form `{ "engine": {..}, "theme": {..} }`.
pub fn parse_settings(json: &str) -> Result<AmbientSettings, serde_json::Error> {
	serde_json::from_str(json)
}

/// Load settings from a script element with id="ambient-settings".
/// Missing or malformed settings fall back to the built-in presets.
fn load_settings() -> AmbientSettings {
	let text = (|| {
		let window: Window = web_sys::window()?;
		let document = window.document()?;
		let element = document.get_element_by_id("ambient-settings")?;
		let script: HtmlScriptElement = element.dyn_into().ok()?;
		script.text().ok()
	})();

	let Some(json_text) = text else {
		return AmbientSettings::default();
	};
	match parse_settings(&json_text) {
		Ok(settings) => {
			info!("ambient-canvas: loaded settings override");
			settings
		}
		Err(e) => {
			warn!("ambient-canvas: failed to parse settings: {}", e);
			AmbientSettings::default()
		}
	}
}

/// A color that advances through `palette` every [`AUTO_SLIDE`].
fn cycling_color(palette: &'static [&'static str]) -> Signal<String> {
	let index = RwSignal::new(0usize);
	match set_interval_with_handle(move || index.update(|i| *i += 1), AUTO_SLIDE) {
		Ok(handle) => on_cleanup(move || handle.clear()),
		Err(_) => warn!("ambient-canvas: could not start color carousel"),
	}
	Signal::derive(move || palette[index.get() % palette.len()].to_string())
}

/// Main application component.
/// Renders a few landing page sections, each with its own ambient canvas.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let AmbientSettings { engine, theme } = load_settings();
	let hero_config = engine.unwrap_or_else(EngineConfig::lively);
	let hero_theme = theme.unwrap_or_else(Theme::hue_shift);
	let banner_color = cycling_color(&BANNER_COLORS);
	let testimonial_color = cycling_color(&TESTIMONIAL_COLORS);

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Ambient Canvas" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="ambient-page">
			<section
				class="ambient-section hero"
				style=move || format!("background-color: {}22", banner_color.get())
			>
				<AmbientCanvas color=banner_color config=hero_config theme=hero_theme />
				<h1>"Glow from within"</h1>
				<p class="subtitle">"Click or move across the banner to make ripples."</p>
			</section>

			<section class="ambient-section products">
				<AmbientCanvas color=Signal::stored("#F472B6".to_string()) theme=Theme::blossom() />
				<h2>"Popular skincare"</h2>
			</section>

			<section class="ambient-section testimonials">
				<AmbientCanvas color=testimonial_color config=EngineConfig::gentle() />
				<h2 style=move || format!("color: {}", testimonial_color.get())>"What our clients say"</h2>
			</section>

			<section class="ambient-section newsletter">
				<AmbientCanvas
					color=Signal::stored("#F59E0B".to_string())
					config=EngineConfig::gentle()
					theme=Theme::amber()
				/>
				<h2>"Join the newsletter"</h2>
			</section>
		</main>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn settings_accept_partial_overrides() {
		let settings = parse_settings(
			r#"{
				"engine": { "population_cap": 12, "move_throttle_ms": 800.0 },
				"theme": { "ring": { "kind": "theme" } }
			}"#,
		)
		.unwrap();
		let engine = settings.engine.unwrap();
		assert_eq!(engine.population_cap, 12);
		assert_eq!(engine.move_throttle_ms, 800.0);
		assert_eq!(engine.ring_cap, EngineConfig::lively().ring_cap);
		assert_eq!(settings.theme, Some(Theme::tinted()));
	}

	#[test]
	fn empty_settings_keep_presets() {
		let settings = parse_settings("{}").unwrap();
		assert!(settings.engine.is_none());
		assert!(settings.theme.is_none());
		assert!(parse_settings("{ not json").is_err());
	}
}
