//! Leptos component hosting one ambient particle canvas.
//!
//! The component creates a canvas element, and once it is in the DOM attaches
//! a window `resize` listener plus canvas `click`/`mousemove` listeners. An
//! animation loop runs via `requestAnimationFrame`, handing each frame to the
//! lifecycle controller. Everything registered at mount is released on cleanup.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use send_wrapper::SendWrapper;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent};

use super::config::EngineConfig;
use super::interaction::ContainerRect;
use super::lifecycle::{AmbientController, ColorProvider, Phase};
use super::surface::WebSurface;
use super::theme::{Color, Theme};

/// Reasons the canvas stays visually inert instead of animating.
#[derive(Debug, Error)]
pub enum SetupError {
	#[error("no window available")]
	NoWindow,
	#[error("2d canvas context unavailable")]
	NoContext,
	#[error("could not attach `{0}` listener")]
	Listener(&'static str),
}

type FrameCallback = Closure<dyn FnMut()>;
type EventCallback = Closure<dyn FnMut(Event)>;

/// DOM listeners registered at mount, each removed exactly once on detach.
#[derive(Default)]
struct ListenerSet {
	entries: Vec<(EventTarget, &'static str, EventCallback)>,
}

impl ListenerSet {
	fn add(
		&mut self,
		target: &EventTarget,
		event: &'static str,
		callback: EventCallback,
	) -> Result<(), SetupError> {
		target
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.map_err(|_| SetupError::Listener(event))?;
		self.entries.push((target.clone(), event, callback));
		Ok(())
	}

	fn detach(&mut self) {
		for (target, event, callback) in self.entries.drain(..) {
			let _ =
				target.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
		}
	}
}

/// Controller plus the element it draws into.
struct Mounted {
	controller: AmbientController<SmallRng>,
	surface: WebSurface,
}

/// Shared handles between the mount effect, the callbacks, and cleanup.
#[derive(Clone, Default)]
struct Handles {
	mounted: Rc<RefCell<Option<Mounted>>>,
	animate: Rc<RefCell<Option<FrameCallback>>>,
	frame: Rc<Cell<Option<i32>>>,
	listeners: Rc<RefCell<ListenerSet>>,
}

impl Handles {
	fn schedule_frame(&self) {
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(ref cb) = *self.animate.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				self.frame.set(Some(id));
			}
		}
	}

	fn teardown(&self) {
		if let Some(ref mut m) = *self.mounted.borrow_mut() {
			m.controller.teardown();
		}
		if let (Some(id), Some(window)) = (self.frame.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		self.listeners.borrow_mut().detach();
		self.animate.borrow_mut().take();
	}
}

fn container_rect(canvas: &HtmlCanvasElement) -> ContainerRect {
	let rect = canvas.get_bounding_client_rect();
	ContainerRect {
		left: rect.left(),
		top: rect.top(),
		width: rect.width(),
		height: rect.height(),
	}
}

fn mouse_position(ev: &Event) -> Option<(f64, f64)> {
	let ev = ev.dyn_ref::<MouseEvent>()?;
	Some((ev.client_x() as f64, ev.client_y() as f64))
}

/// Wire a canvas into a running ambient simulation.
fn attach(
	canvas: HtmlCanvasElement,
	config: EngineConfig,
	theme: Theme,
	color: ColorProvider,
	handles: &Handles,
) -> Result<(), SetupError> {
	let window = web_sys::window().ok_or(SetupError::NoWindow)?;
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|c| c.dyn_into().ok())
		.ok_or(SetupError::NoContext)?;

	let mut surface = WebSurface { canvas, ctx };
	let mut controller = AmbientController::new(config, theme, color, SmallRng::from_entropy());
	let metrics = surface.measure();
	let phase = controller.mount(&mut surface, Some(metrics));
	info!(
		"ambient-canvas: mounted at {}x{} ({:?})",
		metrics.width, metrics.height, phase
	);
	let canvas_target: EventTarget = surface.canvas.clone().into();
	*handles.mounted.borrow_mut() = Some(Mounted {
		controller,
		surface,
	});

	let h = handles.clone();
	*handles.animate.borrow_mut() = Some(Closure::new(move || {
		h.frame.set(None);
		let keep_going = match *h.mounted.borrow_mut() {
			Some(ref mut m) => m.controller.frame(&mut m.surface.ctx),
			None => false,
		};
		if keep_going {
			h.schedule_frame();
		}
	}));

	let h = handles.clone();
	let on_resize: EventCallback = Closure::new(move |_: Event| {
		let started = match *h.mounted.borrow_mut() {
			Some(ref mut m) => {
				let metrics = m.surface.measure();
				m.controller.window_resized(&mut m.surface, metrics)
			}
			None => false,
		};
		if started {
			h.schedule_frame();
		}
	});

	let h = handles.clone();
	let on_click: EventCallback = Closure::new(move |ev: Event| {
		let Some((cx, cy)) = mouse_position(&ev) else {
			return;
		};
		if let Some(ref mut m) = *h.mounted.borrow_mut() {
			let rect = container_rect(&m.surface.canvas);
			m.controller.pointer_click(cx, cy, rect);
		}
	});

	let h = handles.clone();
	let on_mousemove: EventCallback = Closure::new(move |ev: Event| {
		let Some((cx, cy)) = mouse_position(&ev) else {
			return;
		};
		if let Some(ref mut m) = *h.mounted.borrow_mut() {
			let rect = container_rect(&m.surface.canvas);
			m.controller.pointer_move(cx, cy, rect, js_sys::Date::now());
		}
	});

	{
		let mut listeners = handles.listeners.borrow_mut();
		listeners.add(window.as_ref(), "resize", on_resize)?;
		listeners.add(&canvas_target, "click", on_click)?;
		listeners.add(&canvas_target, "mousemove", on_mousemove)?;
	}

	if phase == Phase::Running {
		handles.schedule_frame();
	}
	Ok(())
}

/// Renders drifting points and expansion rings behind a page section.
///
/// The canvas fills its positioned parent. `color` is the section's current
/// theme color as a CSS string; changes show up on the next frame without
/// restarting the animation. If the browser cannot provide a 2D context the
/// canvas simply stays blank.
#[component]
pub fn AmbientCanvas(
	#[prop(into)] color: Signal<String>,
	#[prop(default = EngineConfig::default())] config: EngineConfig,
	#[prop(default = Theme::default())] theme: Theme,
	#[prop(into, optional)] class: String,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handles = Handles::default();

	let handles_init = handles.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if handles_init.mounted.borrow().is_some() {
			return;
		}
		let provider: ColorProvider = Box::new(move || {
			color
				.try_with_untracked(|c| Color::parse(c))
				.unwrap_or(Color::GRAY)
		});
		if let Err(e) = attach(
			canvas.into(),
			config.clone(),
			theme.clone(),
			provider,
			&handles_init,
		) {
			warn!("ambient-canvas: staying inert: {}", e);
			handles_init.teardown();
		}
	});

	let teardown = SendWrapper::new(move || handles.teardown());
	on_cleanup(move || (teardown.take())());

	view! {
		<canvas
			node_ref=canvas_ref
			class=format!("ambient-canvas {class}")
			style="position: absolute; inset: 0; width: 100%; height: 100%; display: block; pointer-events: auto;"
		/>
	}
}
