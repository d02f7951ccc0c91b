//! UI components.

pub mod ambient_canvas;
