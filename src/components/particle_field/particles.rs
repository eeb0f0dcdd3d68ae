//! Particle simulation: spawning, per-frame integration, click bursts and
//! population capping.
//!
//! All state lives in a single [`ParticleField`] owned by the host. The host
//! forwards input events to it and calls [`ParticleField::step`] once per
//! animation frame.

use std::f64::consts::TAU;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::config::FieldConfig;
use super::pointer::PointerState;
use super::render;
use super::surface::Surface;
use super::theme::{Color, FieldTheme};

const PULSE_AMPLITUDE: f64 = 0.3;
const PULSE_BASE: f64 = 0.7;

/// A single drifting point.
#[derive(Clone, Debug)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub color: Color,
	pub opacity: f64,
	pub pulse_phase: f64,
	pub pulse_speed: f64,
}

impl Particle {
	/// Size/alpha multiplier at `time` seconds, within `[0.4, 1.0]`.
	pub fn pulse(&self, time: f64) -> f64 {
		(time * self.pulse_speed + self.pulse_phase).sin() * PULSE_AMPLITUDE + PULSE_BASE
	}
}

/// What the host should do after a frame step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameDirective {
	/// Request another animation frame.
	Continue,
	/// The field was disposed; stop scheduling.
	Stop,
}

/// Wraps `value` onto `[0, extent)`. A non-positive extent collapses to 0.
fn wrap(value: f64, extent: f64) -> f64 {
	if extent <= 0.0 {
		return 0.0;
	}
	if (0.0..extent).contains(&value) {
		return value;
	}
	let wrapped = value.rem_euclid(extent);
	// rem_euclid can round up to `extent` for tiny negative inputs
	if wrapped >= extent { 0.0 } else { wrapped }
}

fn sample(rng: &mut SmallRng, [lo, hi]: [f64; 2]) -> f64 {
	// gen_range panics when the span overflows
	if hi > lo && (hi - lo).is_finite() {
		rng.gen_range(lo..hi)
	} else {
		lo
	}
}

fn sample_symmetric(rng: &mut SmallRng, half: f64) -> f64 {
	sample(rng, [-half, half])
}

/// Owns the particle collection, pointer and surface bounds.
pub struct ParticleField {
	particles: Vec<Particle>,
	pointer: PointerState,
	width: f64,
	height: f64,
	target_count: usize,
	config: FieldConfig,
	theme: FieldTheme,
	rng: SmallRng,
	running: bool,
}

impl ParticleField {
	pub fn new(config: FieldConfig, width: f64, height: f64, seed: u64) -> Self {
		let config = config.sanitized();
		let theme = config.theme();
		let mut field = Self {
			particles: Vec::new(),
			pointer: PointerState::new(config.pointer.radius),
			width,
			height,
			target_count: 0,
			config,
			theme,
			rng: SmallRng::seed_from_u64(seed),
			running: true,
		};
		field.rebuild(width, height);
		field
	}

	/// Discards every particle and repopulates for the new bounds.
	pub fn rebuild(&mut self, width: f64, height: f64) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);
		self.target_count = self.config.particle_count(self.width);

		self.particles.clear();
		self.particles.reserve(self.target_count);
		for _ in 0..self.target_count {
			let x = sample(&mut self.rng, [0.0, self.width]);
			let y = sample(&mut self.rng, [0.0, self.height]);
			let particle = self.spawn(x, y);
			self.particles.push(particle);
		}

		info!(
			"particle-field: populated {} particles for {}x{}",
			self.target_count, self.width, self.height
		);
	}

	fn spawn(&mut self, x: f64, y: f64) -> Particle {
		let spawn = &self.config.spawn;
		let color = self
			.theme
			.palette
			.colors
			.choose(&mut self.rng)
			.copied()
			.unwrap_or(self.theme.accent);

		Particle {
			x,
			y,
			vx: sample_symmetric(&mut self.rng, spawn.speed),
			vy: sample_symmetric(&mut self.rng, spawn.speed),
			radius: sample(&mut self.rng, spawn.radius),
			color,
			opacity: sample(&mut self.rng, spawn.opacity),
			pulse_phase: sample(&mut self.rng, [0.0, TAU]),
			pulse_speed: sample(&mut self.rng, spawn.pulse_speed),
		}
	}

	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		self.pointer.move_to(x, y);
	}

	pub fn pointer_left(&mut self) {
		self.pointer.leave();
	}

	/// Spawns a burst at `(x, y)`, then evicts the oldest particles if the
	/// population went over the cap.
	pub fn click(&mut self, x: f64, y: f64) {
		if !x.is_finite() || !y.is_finite() {
			return;
		}

		let burst = self.config.burst.clone();
		for _ in 0..burst.count {
			let mut particle = self.spawn(x, y);
			particle.vx = sample_symmetric(&mut self.rng, burst.speed);
			particle.vy = sample_symmetric(&mut self.rng, burst.speed);
			particle.radius = sample(&mut self.rng, burst.radius);
			self.particles.push(particle);
		}

		if self.particles.len() > self.config.population_cap(self.width) {
			let excess = self.particles.len() - self.target_count;
			self.particles.drain(..excess);
			debug!("particle-field: evicted {excess} oldest particles");
		}
	}

	/// Advances every particle by one frame.
	pub fn update(&mut self) {
		let strength = self.config.pointer.repulsion;
		for p in &mut self.particles {
			p.x += p.vx;
			p.y += p.vy;

			if let Some((dx, dy)) = self.pointer.repulsion(p.x, p.y, strength) {
				p.x += dx;
				p.y += dy;
			}

			p.x = wrap(p.x, self.width);
			p.y = wrap(p.y, self.height);
		}
	}

	/// One animation frame: update, then render at `time` seconds.
	pub fn step<S: Surface + ?Sized>(&mut self, time: f64, surface: &mut S) -> FrameDirective {
		if !self.running {
			return FrameDirective::Stop;
		}
		self.update();
		render::render(self, surface, time);
		FrameDirective::Continue
	}

	/// Stops the frame loop; subsequent steps draw nothing.
	pub fn dispose(&mut self) {
		self.running = false;
		self.pointer.leave();
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn target_count(&self) -> usize {
		self.target_count
	}

	pub fn pointer(&self) -> &PointerState {
		&self.pointer
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	pub fn theme(&self) -> &FieldTheme {
		&self.theme
	}

	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn field(width: f64, height: f64) -> ParticleField {
		ParticleField::new(FieldConfig::default(), width, height, 7)
	}

	fn assert_in_bounds(field: &ParticleField) {
		let (w, h) = field.size();
		for p in field.particles() {
			assert!(p.x >= 0.0 && p.x < w, "x out of bounds: {}", p.x);
			assert!(p.y >= 0.0 && p.y < h, "y out of bounds: {}", p.y);
		}
	}

	#[test]
	fn initial_population_follows_tier() {
		assert_eq!(field(400.0, 800.0).len(), 30);
		assert_eq!(field(600.0, 800.0).len(), 50);
		assert_eq!(field(900.0, 800.0).len(), 80);
		assert_eq!(field(1920.0, 1080.0).len(), 120);
	}

	#[test]
	fn spawn_ranges() {
		let f = field(1920.0, 1080.0);
		let palette = &f.theme().palette.colors;
		for p in f.particles() {
			assert!((1.0..4.0).contains(&p.radius));
			assert!((-0.4..0.4).contains(&p.vx));
			assert!((-0.4..0.4).contains(&p.vy));
			assert!((0.2..0.7).contains(&p.opacity));
			assert!((0.0..TAU).contains(&p.pulse_phase));
			assert!((0.01..0.03).contains(&p.pulse_speed));
			assert!(palette.contains(&p.color));
		}
		assert_in_bounds(&f);
	}

	#[test]
	fn wraparound_holds_every_frame() {
		let mut f = field(500.0, 300.0);
		f.pointer_moved(250.0, 150.0);
		for _ in 0..2_000 {
			f.update();
			assert_in_bounds(&f);
		}
	}

	#[test]
	fn wrap_maps_to_opposite_edge() {
		assert_eq!(wrap(-1.0, 100.0), 99.0);
		assert_eq!(wrap(100.0, 100.0), 0.0);
		assert_eq!(wrap(100.5, 100.0), 0.5);
		assert_eq!(wrap(42.0, 100.0), 42.0);
		assert_eq!(wrap(-1e-17, 100.0), 0.0);
		assert_eq!(wrap(5.0, 0.0), 0.0);
	}

	#[test]
	fn sample_tolerates_overflowing_span() {
		let mut rng = SmallRng::seed_from_u64(0);
		assert_eq!(sample(&mut rng, [-f64::MAX, f64::MAX]), -f64::MAX);
		assert_eq!(sample(&mut rng, [3.0, 3.0]), 3.0);
		assert_eq!(sample(&mut rng, [3.0, 1.0]), 3.0);
	}

	#[test]
	fn hostile_config_keeps_particle_invariants() {
		let config = FieldConfig {
			spawn: crate::components::particle_field::config::SpawnConfig {
				opacity: [1.5, 2.0],
				radius: [-3.0, -1.0],
				..Default::default()
			},
			..FieldConfig::default()
		};
		let f = ParticleField::new(config, 600.0, 400.0, 3);
		for p in f.particles() {
			assert!(p.opacity > 0.0 && p.opacity <= 1.0, "opacity {}", p.opacity);
			assert!(p.radius > 0.0, "radius {}", p.radius);
		}
	}

	#[test]
	fn fast_particles_cross_the_edge() {
		let mut f = field(400.0, 400.0);
		f.particles.truncate(1);
		let p = &mut f.particles[0];
		(p.x, p.y, p.vx, p.vy) = (399.5, 0.2, 1.0, -0.5);
		f.update();
		let p = &f.particles[0];
		assert!((p.x - 0.5).abs() < 1e-9);
		assert!((p.y - 399.7).abs() < 1e-9);
	}

	#[test]
	fn click_appends_burst_at_point() {
		let mut f = field(400.0, 800.0);
		assert_eq!(f.len(), 30);
		f.click(100.0, 100.0);
		assert_eq!(f.len(), 35);

		let burst: Vec<&Particle> = f
			.particles()
			.iter()
			.filter(|p| p.x == 100.0 && p.y == 100.0)
			.collect();
		assert_eq!(burst.len(), 5);
		for p in burst {
			assert!((-2.0..2.0).contains(&p.vx));
			assert!((-2.0..2.0).contains(&p.vy));
			assert!((2.0..6.0).contains(&p.radius));
		}
		// Appended at the back
		assert!(f.particles()[30..].iter().all(|p| p.x == 100.0));
	}

	#[test]
	fn click_bursts_are_capped_fifo() {
		let mut f = field(400.0, 800.0);
		let tier = f.target_count();
		let first_click = (11.0, 22.0);

		f.click(first_click.0, first_click.1);
		for i in 0..9 {
			f.click(50.0 + i as f64, 60.0);
			assert!(f.len() <= tier + 50);
		}
		// 30 + 50 = 80, still within the cap
		assert_eq!(f.len(), 80);

		f.click(300.0, 300.0);
		assert_eq!(f.len(), tier);
		// The oldest entries went first; the newest burst survives at the back
		assert!(f.particles()[tier - 5..].iter().all(|p| p.x == 300.0));
		assert!(
			!f.particles()
				.iter()
				.any(|p| p.x == first_click.0 && p.y == first_click.1)
		);

		for _ in 0..100 {
			f.click(10.0, 10.0);
			assert!(f.len() <= tier + 50);
		}
	}

	#[test]
	fn rebuild_discards_everything() {
		let mut f = field(1920.0, 1080.0);
		f.click(5.0, 5.0);
		f.rebuild(600.0, 400.0);
		assert_eq!(f.len(), 50);
		assert_eq!(f.target_count(), 50);
		assert!(f.particles().iter().all(|p| p.radius < 4.0));
		assert_in_bounds(&f);
	}

	#[test]
	fn repulsion_adds_to_integrated_position() {
		let mut f = field(1000.0, 1000.0);
		f.particles.truncate(1);
		let p = &mut f.particles[0];
		(p.x, p.y, p.vx, p.vy) = (500.0, 500.0, 0.0, 0.0);

		// Pointer at R/2 to the left: force 0.5, pushed 1px right
		f.pointer_moved(425.0, 500.0);
		f.update();
		assert!((f.particles[0].x - 501.0).abs() < 1e-9);

		f.pointer_left();
		f.update();
		assert!((f.particles[0].x - 501.0).abs() < 1e-9);
	}

	#[test]
	fn pulse_is_bounded_and_periodic() {
		let f = field(1920.0, 1080.0);
		for p in f.particles() {
			let period = TAU / p.pulse_speed;
			for i in 0..50 {
				let t = i as f64 * 13.7;
				let v = p.pulse(t);
				assert!((0.4 - 1e-12..=1.0 + 1e-12).contains(&v));
				assert!((v - p.pulse(t + period)).abs() < 1e-9);
			}
		}
	}

	#[test]
	fn dispose_stops_the_loop() {
		struct Null;
		impl Surface for Null {
			fn clear(&mut self, _: f64, _: f64) {}
			fn fill_circle(&mut self, _: f64, _: f64, _: f64, _: Color, _: f64) {}
			fn stroke_line(&mut self, _: (f64, f64), _: (f64, f64), _: Color, _: f64) {}
			fn fill_radial_glow(&mut self, _: f64, _: f64, _: f64, _: Color, _: Color) {}
		}

		let mut f = field(400.0, 400.0);
		assert_eq!(f.step(0.0, &mut Null), FrameDirective::Continue);
		f.dispose();
		assert!(!f.is_running());
		assert_eq!(f.step(0.016, &mut Null), FrameDirective::Stop);
	}

	#[test]
	fn degenerate_surface_keeps_particles_at_origin() {
		let mut f = field(0.0, 0.0);
		assert_eq!(f.len(), 30);
		f.update();
		assert!(f.particles().iter().all(|p| p.x == 0.0 && p.y == 0.0));
	}
}
