//! particle-field: Interactive particle background for a portfolio page.
//!
//! This crate provides a WASM canvas effect: drifting particles linked by
//! proximity, repelled by the pointer, and spawned in bursts on click.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, debug, info, warn};
use wasm_bindgen::prelude::{JsCast, wasm_bindgen};
use web_sys::{HtmlCanvasElement, HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	CANVAS_ID, FieldConfig, ParticleField, ParticleFieldCanvas, ParticleFieldHandle,
};

/// Id of the optional JSON config element.
pub const CONFIG_ELEMENT_ID: &str = "particle-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load field configuration from a script element with id="particle-config".
/// Falls back to defaults when the element is missing or malformed.
pub fn load_config() -> FieldConfig {
	let Some(json_text) = config_text() else {
		return FieldConfig::default();
	};

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("particle-field: loaded config from #{CONFIG_ELEMENT_ID}");
			config.sanitized()
		}
		Err(e) => {
			warn!("particle-field: failed to parse config: {}", e);
			FieldConfig::default()
		}
	}
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Attach the particle field to an existing `<canvas id="particles-canvas">`.
///
/// Returns `None` without side effects (beyond a debug log) when the page has
/// no such canvas.
#[wasm_bindgen(js_name = startParticleField)]
pub fn start_particle_field() -> Option<ParticleFieldHandle> {
	let Some(element) = web_sys::window()?
		.document()?
		.get_element_by_id(CANVAS_ID)
	else {
		debug!("particle-field: no #{CANVAS_ID} on this page, staying inactive");
		return None;
	};
	let canvas: HtmlCanvasElement = element
		.dyn_into()
		.ok()
		.or_else(|| {
			debug!("particle-field: #{CANVAS_ID} is not a canvas");
			None
		})?;

	match components::particle_field::attach(canvas, load_config()) {
		Ok(handle) => Some(handle),
		Err(e) => {
			warn!("particle-field: failed to attach: {e:?}");
			None
		}
	}
}

/// Main application component.
/// Renders the particle background behind the page content.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();

	view! {
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleFieldCanvas config=config />
	}
}
