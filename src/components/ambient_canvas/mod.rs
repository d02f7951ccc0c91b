//! Ambient particle canvas component.
//!
//! Renders a decorative, interactive background on an HTML canvas with:
//! - Slow drifting points that wrap around the surface edges
//! - Expanding rings spawned by clicks, throttled pointer movement, and chance
//! - Device-pixel-ratio aware sizing that follows window resizes
//! - Colors that track a host-supplied theme color frame by frame
//!
//! # Example
//!
//! ```ignore
//! use ambient_canvas::{AmbientCanvas, EngineConfig, Theme};
//!
//! let (color, _set_color) = signal("#FF6B6B".to_string());
//!
//! view! {
//!     <section style="position: relative">
//!         <AmbientCanvas color=color config=EngineConfig::gentle() theme=Theme::tinted() />
//!     </section>
//! }
//! ```

mod component;
pub mod config;
pub mod interaction;
pub mod lifecycle;
pub mod particles;
pub mod render;
pub mod simulation;
pub mod surface;
pub mod theme;

pub use component::{AmbientCanvas, SetupError};
pub use config::EngineConfig;
pub use lifecycle::{AmbientController, Phase};
pub use theme::{Color, Theme};
