//! Browser wiring for the particle field.
//!
//! [`attach`] sizes a canvas to the viewport, registers window listeners for
//! pointer, click and resize events, and drives [`ParticleField::step`] from
//! `requestAnimationFrame`. The returned [`ParticleFieldHandle`] keeps the
//! closures alive until it is disposed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::{Closure, JsCast, JsValue, wasm_bindgen};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::FieldConfig;
use super::debounce::Debouncer;
use super::particles::{FrameDirective, ParticleField};

/// Id of the canvas the field draws on.
pub const CANVAS_ID: &str = "particles-canvas";

type MouseListener = Closure<dyn FnMut(MouseEvent)>;

/// Live particle field bound to a canvas.
#[wasm_bindgen]
pub struct ParticleFieldHandle {
	field: Rc<RefCell<ParticleField>>,
	window: Window,
	mouse_listeners: Vec<(&'static str, MouseListener)>,
	resize_cb: Option<Closure<dyn FnMut()>>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	frame_id: Rc<Cell<Option<i32>>>,
}

#[wasm_bindgen]
impl ParticleFieldHandle {
	/// Current particle count.
	#[wasm_bindgen(getter)]
	pub fn count(&self) -> usize {
		self.field.borrow().len()
	}

	/// Stops the frame loop and detaches every listener.
	pub fn dispose(&mut self) {
		self.field.borrow_mut().dispose();

		if let Some(id) = self.frame_id.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		// Breaks the closure's reference to itself
		self.animate.borrow_mut().take();

		for (event, cb) in self.mouse_listeners.drain(..) {
			let _ = self
				.window
				.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
		}
		if let Some(cb) = self.resize_cb.take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		info!("particle-field: disposed");
	}
}

fn viewport_size(window: &Window) -> Result<(f64, f64), JsValue> {
	let width = window.inner_width()?.as_f64().unwrap_or(0.0);
	let height = window.inner_height()?.as_f64().unwrap_or(0.0);
	Ok((width, height))
}

/// Monotonic seconds, falling back to wall-clock time without `performance`.
fn now_seconds(window: &Window) -> f64 {
	window
		.performance()
		.map_or_else(js_sys::Date::now, |perf| perf.now())
		* 0.001
}

fn random_seed() -> u64 {
	(js_sys::Math::random() * u32::MAX as f64) as u64 ^ (js_sys::Date::now() as u64)
}

/// Binds a particle field to `canvas` and starts its frame loop.
pub fn attach(
	canvas: HtmlCanvasElement,
	config: FieldConfig,
) -> Result<ParticleFieldHandle, JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let (w, h) = viewport_size(&window)?;
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let mut ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or_else(|| JsValue::from_str("2d context unavailable"))?
		.dyn_into()
		.map_err(JsValue::from)?;

	let debounce_ms = config.resize_debounce_ms;
	let field = Rc::new(RefCell::new(ParticleField::new(config, w, h, random_seed())));
	info!(
		"particle-field: attached to #{} with {} particles",
		canvas.id(),
		field.borrow().len()
	);

	let mut mouse_listeners: Vec<(&'static str, MouseListener)> = Vec::with_capacity(3);

	let field_mm = field.clone();
	mouse_listeners.push((
		"mousemove",
		Closure::new(move |ev: MouseEvent| {
			field_mm
				.borrow_mut()
				.pointer_moved(ev.client_x() as f64, ev.client_y() as f64);
		}),
	));

	let field_mo = field.clone();
	mouse_listeners.push((
		"mouseout",
		Closure::new(move |ev: MouseEvent| {
			// Only leaving the window has no related target
			if ev.related_target().is_none() {
				field_mo.borrow_mut().pointer_left();
			}
		}),
	));

	let field_click = field.clone();
	mouse_listeners.push((
		"click",
		Closure::new(move |ev: MouseEvent| {
			field_click
				.borrow_mut()
				.click(ev.client_x() as f64, ev.client_y() as f64);
		}),
	));

	for (event, cb) in &mouse_listeners {
		window.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
	}

	let debouncer = Rc::new(RefCell::new(Debouncer::new()));
	let (field_resize, canvas_resize) = (field.clone(), canvas.clone());
	let resize_cb: Closure<dyn FnMut()> = Closure::new(move || {
		let token = debouncer.borrow_mut().trigger();
		let (debouncer, field, canvas) =
			(debouncer.clone(), field_resize.clone(), canvas_resize.clone());
		let settle = Closure::once_into_js(move || {
			if !debouncer.borrow_mut().settle(token) || !field.borrow().is_running() {
				return;
			}
			let Some(win) = web_sys::window() else {
				return;
			};
			match viewport_size(&win) {
				Ok((nw, nh)) => {
					canvas.set_width(nw as u32);
					canvas.set_height(nh as u32);
					field.borrow_mut().rebuild(nw, nh);
				}
				Err(e) => warn!("particle-field: failed to read viewport: {e:?}"),
			}
		});
		if let Some(win) = web_sys::window() {
			if let Err(e) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
				settle.unchecked_ref(),
				debounce_ms,
			) {
				warn!("particle-field: failed to arm resize timer: {e:?}");
			}
		}
	});
	window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;

	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let (field_anim, animate_inner, frame_inner, window_anim) =
		(field.clone(), animate.clone(), frame_id.clone(), window.clone());
	*animate.borrow_mut() = Some(Closure::new(move || {
		frame_inner.set(None);
		let time = now_seconds(&window_anim);
		let directive = field_anim.borrow_mut().step(time, &mut ctx);
		if directive == FrameDirective::Stop {
			return;
		}
		if let Some(ref cb) = *animate_inner.borrow() {
			if let Ok(id) = window_anim.request_animation_frame(cb.as_ref().unchecked_ref()) {
				frame_inner.set(Some(id));
			}
		}
	}));
	if let Some(ref cb) = *animate.borrow() {
		frame_id.set(Some(
			window.request_animation_frame(cb.as_ref().unchecked_ref())?,
		));
	}

	Ok(ParticleFieldHandle {
		field,
		window,
		mouse_listeners,
		resize_cb: Some(resize_cb),
		animate,
		frame_id,
	})
}

/// Full-viewport particle background.
///
/// The canvas is fixed behind the page and ignores pointer events; the field
/// listens on the window instead, so content above it stays interactive.
#[component]
pub fn ParticleFieldCanvas(#[prop(optional)] config: Option<FieldConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handle: Rc<RefCell<Option<ParticleFieldHandle>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if handle.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match attach(canvas, config.clone().unwrap_or_default()) {
			Ok(h) => *handle.borrow_mut() = Some(h),
			Err(e) => warn!("particle-field: failed to attach: {e:?}"),
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id=CANVAS_ID
			class="particles-canvas"
			style="position: fixed; inset: 0; display: block; pointer-events: none; z-index: 0;"
		/>
	}
}
