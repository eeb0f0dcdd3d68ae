//! Tunable parameters for the particle field.
//!
//! Every field has a default, so a page may supply a partial JSON object in a
//! `<script id="particle-config" type="application/json">` element and only
//! override what it needs.

use log::warn;
use serde::Deserialize;

use super::theme::{Color, FieldTheme, Palette};

/// Lowest base opacity a particle may have.
const MIN_OPACITY: f64 = 0.01;

/// Viewports narrower than `max_width` get `count` particles.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CountTier {
	pub max_width: f64,
	pub count: usize,
}

/// Randomization ranges for ambient particles. Ranges are half-open `[lo, hi)`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
	pub radius: [f64; 2],
	/// Per-axis velocity is drawn from `[-speed, speed)`.
	pub speed: f64,
	pub opacity: [f64; 2],
	pub pulse_speed: [f64; 2],
}

impl Default for SpawnConfig {
	fn default() -> Self {
		Self {
			radius: [1.0, 4.0],
			speed: 0.4,
			opacity: [0.2, 0.7],
			pulse_speed: [0.01, 0.03],
		}
	}
}

/// Click burst behavior.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
	pub count: usize,
	pub speed: f64,
	pub radius: [f64; 2],
	/// Extra particles tolerated above the tier count before eviction.
	pub headroom: usize,
}

impl Default for BurstConfig {
	fn default() -> Self {
		Self {
			count: 5,
			speed: 2.0,
			radius: [2.0, 6.0],
			headroom: 50,
		}
	}
}

/// Pointer interaction.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
	pub radius: f64,
	/// Displacement in pixels at full force.
	pub repulsion: f64,
	pub glow_alpha: f64,
}

impl Default for PointerConfig {
	fn default() -> Self {
		Self {
			radius: 150.0,
			repulsion: 2.0,
			glow_alpha: 0.15,
		}
	}
}

/// Proximity links between particles.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
	pub max_distance: f64,
	pub max_alpha: f64,
	pub line_width: f64,
}

impl Default for LinkConfig {
	fn default() -> Self {
		Self {
			max_distance: 120.0,
			max_alpha: 0.3,
			line_width: 0.5,
		}
	}
}

/// Complete particle field configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Ordered by ascending `max_width`.
	pub tiers: Vec<CountTier>,
	/// Count for viewports wider than every tier.
	pub max_count: usize,
	pub spawn: SpawnConfig,
	pub burst: BurstConfig,
	pub pointer: PointerConfig,
	pub links: LinkConfig,
	/// Shadow blur of the halo around each particle.
	pub glow_blur: f64,
	pub resize_debounce_ms: i32,
	/// CSS colors; falls back to the teal palette when unset or unusable.
	pub palette: Option<Vec<String>>,
	pub accent: Option<String>,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			tiers: vec![
				CountTier {
					max_width: 480.0,
					count: 30,
				},
				CountTier {
					max_width: 768.0,
					count: 50,
				},
				CountTier {
					max_width: 1024.0,
					count: 80,
				},
			],
			max_count: 120,
			spawn: SpawnConfig::default(),
			burst: BurstConfig::default(),
			pointer: PointerConfig::default(),
			links: LinkConfig::default(),
			glow_blur: 15.0,
			resize_debounce_ms: 250,
			palette: None,
			accent: None,
		}
	}
}

/// A usable `[lo, hi)` range: finite, ordered, with a finite span and `lo >= min`.
fn range_ok([lo, hi]: [f64; 2], min: f64) -> bool {
	lo.is_finite() && hi.is_finite() && lo <= hi && (hi - lo).is_finite() && lo >= min
}

/// Per-axis speed drawn from `[-speed, speed)` needs a finite span.
fn speed_ok(speed: f64) -> bool {
	speed >= 0.0 && (speed * 2.0).is_finite()
}

fn unit_ok(value: f64) -> bool {
	(0.0..=1.0).contains(&value)
}

impl SpawnConfig {
	fn is_valid(&self) -> bool {
		range_ok(self.radius, f64::MIN_POSITIVE)
			&& speed_ok(self.speed)
			&& range_ok(self.opacity, f64::NEG_INFINITY)
			&& range_ok(self.pulse_speed, 0.0)
	}
}

impl BurstConfig {
	fn is_valid(&self) -> bool {
		range_ok(self.radius, f64::MIN_POSITIVE) && speed_ok(self.speed)
	}
}

impl PointerConfig {
	fn is_valid(&self) -> bool {
		self.radius.is_finite()
			&& self.radius >= 0.0
			&& self.repulsion.is_finite()
			&& unit_ok(self.glow_alpha)
	}
}

impl LinkConfig {
	fn is_valid(&self) -> bool {
		self.max_distance.is_finite()
			&& self.max_distance > 0.0
			&& unit_ok(self.max_alpha)
			&& self.line_width.is_finite()
			&& self.line_width > 0.0
	}
}

impl FieldConfig {
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Replaces any section holding unusable values with its default.
	///
	/// Opacity is clamped into `(0, 1]` rather than rejected.
	pub fn sanitized(mut self) -> Self {
		if !self.spawn.is_valid() {
			warn!("particle-field: invalid spawn config {:?}, using default", self.spawn);
			self.spawn = SpawnConfig::default();
		}
		let [lo, hi] = self.spawn.opacity;
		let clamped = [lo.clamp(MIN_OPACITY, 1.0), hi.clamp(MIN_OPACITY, 1.0)];
		if clamped != self.spawn.opacity {
			warn!("particle-field: spawn opacity {:?} clamped to {:?}", self.spawn.opacity, clamped);
			self.spawn.opacity = clamped;
		}
		if !self.burst.is_valid() {
			warn!("particle-field: invalid burst config {:?}, using default", self.burst);
			self.burst = BurstConfig::default();
		}
		if !self.pointer.is_valid() {
			warn!("particle-field: invalid pointer config {:?}, using default", self.pointer);
			self.pointer = PointerConfig::default();
		}
		if !self.links.is_valid() {
			warn!("particle-field: invalid link config {:?}, using default", self.links);
			self.links = LinkConfig::default();
		}
		if !(self.glow_blur.is_finite() && self.glow_blur >= 0.0) {
			warn!("particle-field: invalid glow blur {}, using default", self.glow_blur);
			self.glow_blur = Self::default().glow_blur;
		}
		if self.resize_debounce_ms < 0 {
			warn!(
				"particle-field: negative resize debounce {}, using default",
				self.resize_debounce_ms
			);
			self.resize_debounce_ms = Self::default().resize_debounce_ms;
		}
		self
	}

	/// Particle count for a viewport of the given width.
	pub fn particle_count(&self, width: f64) -> usize {
		self.tiers
			.iter()
			.find(|tier| width < tier.max_width)
			.map_or(self.max_count, |tier| tier.count)
	}

	/// Population above which a click burst evicts the oldest particles.
	pub fn population_cap(&self, width: f64) -> usize {
		self.particle_count(width) + self.burst.headroom
	}

	/// Resolves configured colors, falling back to the default theme.
	pub fn theme(&self) -> FieldTheme {
		let mut theme = FieldTheme::default();

		if let Some(colors) = &self.palette {
			match Palette::from_css(colors.as_slice()) {
				Some(palette) => theme.palette = palette,
				None => warn!("particle-field: no usable palette colors, using default"),
			}
		}
		if let Some(accent) = &self.accent {
			match Color::parse(accent) {
				Some(color) => theme.accent = color.with_alpha(1.0),
				None => warn!("particle-field: bad accent color {accent:?}, using default"),
			}
		}

		theme
	}
}
