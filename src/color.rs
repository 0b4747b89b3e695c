//! C1: packed/float color conversion and SRC_OVER blending.

/// Shift (in bits) of each channel within a packed 32-bit pixel.
///
/// Default layout is R,G,B,A from low byte to high byte. Build with
/// `--features bgra` to select B,G,R,A instead.
#[cfg(not(feature = "bgra"))]
mod shift {
	pub const R: u32 = 0;
	pub const G: u32 = 8;
	pub const B: u32 = 16;
	pub const A: u32 = 24;
}

#[cfg(feature = "bgra")]
mod shift {
	pub const R: u32 = 16;
	pub const G: u32 = 8;
	pub const B: u32 = 0;
	pub const A: u32 = 24;
}

/// A 32-bit packed pixel: four 8-bit channels at the build's configured
/// shift positions.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PackedColor(pub u32);

impl PackedColor {
	pub const TRANSPARENT: Self = Self(0);

	pub fn from_channels(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self(
			(r as u32) << shift::R
				| (g as u32) << shift::G
				| (b as u32) << shift::B
				| (a as u32) << shift::A,
		)
	}

	#[inline]
	pub fn r(&self) -> u8 {
		(self.0 >> shift::R) as u8
	}

	#[inline]
	pub fn g(&self) -> u8 {
		(self.0 >> shift::G) as u8
	}

	#[inline]
	pub fn b(&self) -> u8 {
		(self.0 >> shift::B) as u8
	}

	#[inline]
	pub fn a(&self) -> u8 {
		(self.0 >> shift::A) as u8
	}

	/// Converts to four normalized floats in [0, 1].
	pub fn to_float(self) -> FloatColor {
		let s = 1.0 / 255.0;
		FloatColor {
			r: self.r() as f32 * s,
			g: self.g() as f32 * s,
			b: self.b() as f32 * s,
			a: self.a() as f32 * s,
		}
	}

	/// 8-bit fixed-point SRC_OVER: `out.c = (S.c*S.a + D.c*(255-S.a)) / 255`,
	/// truncating integer division, `out.a = S.a`.
	#[inline]
	pub fn blend_over(self, source: PackedColor) -> PackedColor {
		let sa = source.a() as u32;
		let inv_sa = 255 - sa;
		let blend_channel = |s: u8, d: u8| ((s as u32 * sa + d as u32 * inv_sa) / 255) as u8;
		PackedColor::from_channels(
			blend_channel(source.r(), self.r()),
			blend_channel(source.g(), self.g()),
			blend_channel(source.b(), self.b()),
			source.a(),
		)
	}
}

impl From<egui::Color32> for PackedColor {
	/// `egui::Color32` stores premultiplied sRGBA; the spec's color model
	/// (§3, §4.1) and every blend formula in it are defined over straight
	/// alpha, matching the original `imgui_sw.cpp`'s `ImU32`. Un-premultiply
	/// at this boundary so the rest of the crate never has to think about
	/// premultiplication.
	fn from(c: egui::Color32) -> Self {
		let [r, g, b, a] = c.to_srgba_unmultiplied();
		Self::from_channels(r, g, b, a)
	}
}

/// Four normalized floats in [0, 1], used only inside per-pixel shading.
#[derive(Clone, Copy, Debug, Default)]
pub struct FloatColor {
	pub r: f32,
	pub g: f32,
	pub b: f32,
	pub a: f32,
}

impl FloatColor {
	pub fn splat(v: f32) -> Self {
		Self { r: v, g: v, b: v, a: v }
	}

	/// Rounds each channel with +0.5 before truncating.
	pub fn to_packed(self) -> PackedColor {
		let to_byte = |c: f32| (c * 255.0 + 0.5) as u8;
		PackedColor::from_channels(to_byte(self.r), to_byte(self.g), to_byte(self.b), to_byte(self.a))
	}

	pub fn scale(self, w: f32) -> Self {
		Self { r: self.r * w, g: self.g * w, b: self.b * w, a: self.a * w }
	}

	pub fn add(self, rhs: Self) -> Self {
		Self { r: self.r + rhs.r, g: self.g + rhs.g, b: self.b + rhs.b, a: self.a + rhs.a }
	}

	/// General-path SRC_OVER in float: `out = s.a*s + (1-s.a)*d`.
	/// Caller is expected to have already applied the `s.a <= 0` /
	/// `s.a >= 1` short-circuits.
	pub fn blend_over(self, dest: FloatColor) -> FloatColor {
		self.scale(self.a).add(dest.scale(1.0 - self.a))
	}
}
