//! Per-frame accumulated pixel/triangle counters. A field of
//! [`crate::Renderer`] rather than a global, so multiple renderers in the
//! same process never share mutable state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleClass {
	UniformUntextured,
	Textured,
	Other,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Stats {
	pub uniform_triangle_pixels: f64,
	pub textured_triangle_pixels: f64,
	pub other_triangle_pixels: f64,
	pub uniform_rectangle_pixels: f64,
	pub textured_rectangle_pixels: f64,

	pub triangle_count: u64,

	pub thin_triangle_count: u64,
	pub thin_triangle_area_px: f64,

	/// How often the quad detector (`quad.rs`) was tried versus how often it
	/// actually collapsed six vertices into a rectangle fill. `debug!`-only,
	/// not part of the public stats surface.
	pub quad_detector_attempts: u64,
	pub quad_detector_hits: u64,
}

impl Stats {
	pub fn reset(&mut self) {
		*self = Self::default();
	}

	pub fn add_triangle_area(&mut self, class: TriangleClass, area_px: f64) {
		match class {
			TriangleClass::UniformUntextured => self.uniform_triangle_pixels += area_px,
			TriangleClass::Textured => self.textured_triangle_pixels += area_px,
			TriangleClass::Other => self.other_triangle_pixels += area_px,
		}
	}
}
