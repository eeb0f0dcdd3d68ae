//! Drawing primitives the render passes rely on.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::theme::Color;

/// A 2D raster target.
pub trait Surface {
	/// Erase everything within `width` x `height`.
	fn clear(&mut self, width: f64, height: f64);

	/// Filled circle whose alpha comes from `color.a`, with a blurred halo of
	/// `glow_blur` pixels in the same color (0 disables the halo).
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, glow_blur: f64);

	/// Straight line from `from` to `to`, stroked `width` pixels wide.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);

	/// Disc filled with a radial gradient from `inner` at the center to `outer` at `radius`.
	fn fill_radial_glow(&mut self, x: f64, y: f64, radius: f64, inner: Color, outer: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, glow_blur: f64) {
		let css = color.to_css_rgb();

		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, TAU);
		self.set_fill_style_str(&css);
		self.set_global_alpha(color.a);
		self.fill();

		if glow_blur > 0.0 {
			self.set_shadow_blur(glow_blur);
			self.set_shadow_color(&css);
			self.fill();
			self.set_shadow_blur(0.0);
		}

		self.set_global_alpha(1.0);
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.begin_path();
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn fill_radial_glow(&mut self, x: f64, y: f64, radius: f64, inner: Color, outer: Color) {
		let Ok(gradient) = self.create_radial_gradient(x, y, 0.0, x, y, radius) else {
			return;
		};
		let _ = gradient.add_color_stop(0.0, &inner.to_css());
		let _ = gradient.add_color_stop(1.0, &outer.to_css());

		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, TAU);
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill();
	}
}
