//! Per-frame rendering for the particle field.
//!
//! Passes, in order:
//! 1. Clear the surface
//! 2. Particles with pulsing size/alpha and a soft halo
//! 3. Proximity links between nearby particles
//! 4. Radial glow under the pointer

use super::particles::ParticleField;
use super::surface::Surface;

/// Alpha of a link between two particles `distance` apart.
pub fn link_alpha(distance: f64, max_distance: f64, max_alpha: f64) -> f64 {
	if distance >= max_distance {
		0.0
	} else {
		(1.0 - distance / max_distance) * max_alpha
	}
}

/// Renders the complete field at `time` seconds.
pub fn render<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S, time: f64) {
	let (width, height) = field.size();
	surface.clear(width, height);

	draw_particles(field, surface, time);
	draw_links(field, surface);
	draw_pointer_glow(field, surface);
}

fn draw_particles<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S, time: f64) {
	let blur = field.config().glow_blur;
	for p in field.particles() {
		let pulse = p.pulse(time);
		surface.fill_circle(
			p.x,
			p.y,
			p.radius * pulse,
			p.color.with_alpha(p.opacity * pulse),
			blur,
		);
	}
}

fn draw_links<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S) {
	let links = &field.config().links;
	let accent = field.theme().accent;
	let particles = field.particles();

	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i + 1..] {
			let (dx, dy) = (a.x - b.x, a.y - b.y);
			let alpha = link_alpha(
				(dx * dx + dy * dy).sqrt(),
				links.max_distance,
				links.max_alpha,
			);
			if alpha <= 0.0 {
				continue;
			}
			surface.stroke_line(
				(a.x, a.y),
				(b.x, b.y),
				accent.with_alpha(alpha),
				links.line_width,
			);
		}
	}
}

fn draw_pointer_glow<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S) {
	let pointer = field.pointer();
	let Some((x, y)) = pointer.position() else {
		return;
	};
	let accent = field.theme().accent;
	surface.fill_radial_glow(
		x,
		y,
		pointer.radius,
		accent.with_alpha(field.config().pointer.glow_alpha),
		accent.with_alpha(0.0),
	);
}
