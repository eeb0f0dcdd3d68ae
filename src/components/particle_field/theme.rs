//! Colors and palettes for the particle field.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::rgba(r, g, b, 1.0)
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same channels, alpha replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self::rgba(self.r, self.g, self.b, a)
	}

	fn is_opaque(self) -> bool {
		(self.a - 1.0).abs() < 0.001
	}

	/// Parses `#RRGGBB` or `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Option<Self> {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			if hex.len() != 6 {
				return None;
			}
			let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
			let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
			let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
			return Some(Self::rgb(r, g, b));
		}

		let inner = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let nums: Vec<&str> = inner.split(',').map(str::trim).collect();
		if nums.len() < 3 {
			return None;
		}
		let r = nums[0].parse().ok()?;
		let g = nums[1].parse().ok()?;
		let b = nums[2].parse().ok()?;
		let a = match nums.get(3) {
			Some(a) => a.parse().ok()?,
			None => 1.0,
		};
		Some(Self::rgba(r, g, b, a))
	}

	/// Hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		let Self { r, g, b, a } = self;
		if self.is_opaque() {
			self.to_css_rgb()
		} else {
			format!("rgba({r}, {g}, {b}, {a})")
		}
	}

	/// Hex, ignoring alpha. Canvas fills pair this with `globalAlpha`.
	pub fn to_css_rgb(self) -> String {
		let Self { r, g, b, .. } = self;
		format!("#{r:02x}{g:02x}{b:02x}")
	}
}

/// Fixed set of colors a particle may be born with.
#[derive(Clone, Debug)]
pub struct Palette {
	pub colors: Vec<Color>,
}

impl Palette {
	/// Teal family used by the portfolio (default)
	pub fn teal() -> Self {
		Self {
			colors: vec![
				Color::rgb(13, 148, 136), // Teal 600
				Color::rgb(20, 184, 166), // Teal 500
				Color::rgb(15, 118, 110), // Teal 700
				Color::rgb(45, 212, 191), // Teal 400
			],
		}
	}

	/// Builds a palette from CSS color strings, skipping anything unparsable.
	/// Returns `None` when no usable color remains.
	pub fn from_css<S: AsRef<str>>(colors: &[S]) -> Option<Self> {
		let colors: Vec<Color> = colors
			.iter()
			.filter_map(|c| Color::parse(c.as_ref()))
			.collect();
		if colors.is_empty() {
			None
		} else {
			Some(Self { colors })
		}
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::teal()
	}
}

/// Colors used by the render passes.
#[derive(Clone, Debug)]
pub struct FieldTheme {
	/// Particle colors, picked uniformly at spawn.
	pub palette: Palette,
	/// Link lines and pointer glow.
	pub accent: Color,
}

impl Default for FieldTheme {
	fn default() -> Self {
		Self {
			palette: Palette::teal(),
			accent: Color::rgb(13, 148, 136),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_and_functional_notation() {
		assert_eq!(Color::parse("#0d9488"), Some(Color::rgb(13, 148, 136)));
		assert_eq!(
			Color::parse("rgba(13, 148, 136, 0.15)"),
			Some(Color::rgba(13, 148, 136, 0.15))
		);
		assert_eq!(Color::parse("rgb(1,2,3)"), Some(Color::rgb(1, 2, 3)));
		assert_eq!(Color::parse("#fff"), None);
		assert_eq!(Color::parse("teal"), None);
	}

	#[test]
	fn css_output_drops_alpha_when_opaque() {
		let c = Color::rgb(13, 148, 136);
		assert_eq!(c.to_css(), "#0d9488");
		assert_eq!(c.with_alpha(0.3).to_css(), "rgba(13, 148, 136, 0.3)");
		assert_eq!(c.with_alpha(0.3).to_css_rgb(), "#0d9488");
		assert_eq!(c.with_alpha(0.9995).to_css(), "#0d9488");
	}

	#[test]
	fn palette_skips_bad_entries() {
		let p = Palette::from_css(&["#14b8a6", "nope"][..]).unwrap();
		assert_eq!(p.colors, vec![Color::rgb(20, 184, 166)]);
		assert!(Palette::from_css(&["nope"][..]).is_none());
		assert_eq!(Palette::teal().colors.len(), 4);
	}
}
