//! Pointer tracking and repulsion.

/// Last known pointer position plus the radius it pushes particles within.
#[derive(Clone, Copy, Debug)]
pub struct PointerState {
	position: Option<(f64, f64)>,
	pub radius: f64,
}

impl PointerState {
	pub fn new(radius: f64) -> Self {
		Self {
			position: None,
			radius,
		}
	}

	pub fn move_to(&mut self, x: f64, y: f64) {
		self.position = if x.is_finite() && y.is_finite() {
			Some((x, y))
		} else {
			None
		};
	}

	pub fn leave(&mut self) {
		self.position = None;
	}

	pub fn position(&self) -> Option<(f64, f64)> {
		self.position
	}

	/// Displacement to add to a particle at `(x, y)`, scaled by `strength` at full force.
	/// `None` when the pointer is absent or the particle is outside the radius.
	pub fn repulsion(&self, x: f64, y: f64, strength: f64) -> Option<(f64, f64)> {
		let (mx, my) = self.position?;
		let (dx, dy) = (mx - x, my - y);
		let force = repulsion_force((dx * dx + dy * dy).sqrt(), self.radius);
		if force <= 0.0 {
			return None;
		}
		// atan2(0, 0) == 0, so a particle under the pointer is pushed along -x
		let angle = dy.atan2(dx);
		Some((
			-angle.cos() * force * strength,
			-angle.sin() * force * strength,
		))
	}
}

/// Linear falloff: 1 at the pointer, 0 at and beyond `radius`.
pub fn repulsion_force(distance: f64, radius: f64) -> f64 {
	if radius <= 0.0 || distance >= radius {
		0.0
	} else {
		(radius - distance) / radius
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn force_falloff() {
		assert_eq!(repulsion_force(150.0, 150.0), 0.0);
		assert_eq!(repulsion_force(200.0, 150.0), 0.0);
		assert_eq!(repulsion_force(75.0, 150.0), 0.5);
		assert!((repulsion_force(1e-9, 150.0) - 1.0).abs() < 1e-9);
		assert_eq!(repulsion_force(0.0, 0.0), 0.0);
	}

	#[test]
	fn absent_pointer_does_not_repel() {
		let mut pointer = PointerState::new(150.0);
		assert!(pointer.repulsion(10.0, 10.0, 2.0).is_none());
		pointer.move_to(10.0, 10.0);
		pointer.leave();
		assert!(pointer.position().is_none());
		assert!(pointer.repulsion(10.0, 10.0, 2.0).is_none());
	}

	#[test]
	fn pushes_directly_away() {
		let mut pointer = PointerState::new(100.0);
		pointer.move_to(100.0, 100.0);

		// Particle 50px to the right: half force, pushed further right
		let (dx, dy) = pointer.repulsion(150.0, 100.0, 2.0).unwrap();
		assert!((dx - 1.0).abs() < 1e-9);
		assert!(dy.abs() < 1e-9);

		// Particle above: pushed up
		let (dx, dy) = pointer.repulsion(100.0, 75.0, 2.0).unwrap();
		assert!(dx.abs() < 1e-9);
		assert!((dy + 1.5).abs() < 1e-9);

		assert!(pointer.repulsion(300.0, 100.0, 2.0).is_none());
	}

	#[test]
	fn non_finite_position_reads_as_absent() {
		let mut pointer = PointerState::new(100.0);
		pointer.move_to(f64::NAN, 3.0);
		assert!(pointer.position().is_none());
	}
}
