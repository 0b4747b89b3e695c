//! C3: flat-fill SRC_OVER into a clipped integer rectangle. Exists for the
//! quad-detector fast path (`quad.rs`) and must match the pixel output of
//! rasterizing the equivalent two-triangle decomposition through `triangle.rs`.

use crate::color::PackedColor;

/// Paints `color` over every pixel in `[min, max)` (point space), after
/// scaling to pixel space and clamping to the target bounds. Bounds are
/// exclusive of `max` throughout.
pub fn paint_rect(pixels: &mut [PackedColor], width_px: usize, height_px: usize, scale: egui::Vec2, min: egui::Pos2, max: egui::Pos2, color: PackedColor) {
	let round = |v: f32| (v + 0.5) as i64;

	let min_x = round(scale.x * min.x).clamp(0, width_px as i64);
	let min_y = round(scale.y * min.y).clamp(0, height_px as i64);
	let max_x = round(scale.x * max.x).clamp(0, width_px as i64);
	let max_y = round(scale.y * max.y).clamp(0, height_px as i64);

	if min_x >= max_x || min_y >= max_y {
		return;
	}

	for y in min_y..max_y {
		let row_start = y as usize * width_px;
		for x in min_x..max_x {
			let idx = row_start + x as usize;
			pixels[idx] = pixels[idx].blend_over(color);
		}
	}
}

/// Pixel-space area of the clamped rectangle. Used for the uniform- and
/// textured-rectangle stats buckets.
pub fn clipped_area_px(width_px: usize, height_px: usize, scale: egui::Vec2, min: egui::Pos2, max: egui::Pos2) -> f64 {
	let round = |v: f32| (v + 0.5) as i64;

	let min_x = round(scale.x * min.x).clamp(0, width_px as i64);
	let min_y = round(scale.y * min.y).clamp(0, height_px as i64);
	let max_x = round(scale.x * max.x).clamp(0, width_px as i64);
	let max_y = round(scale.y * max.y).clamp(0, height_px as i64);

	if min_x >= max_x || min_y >= max_y {
		0.0
	} else {
		((max_x - min_x) * (max_y - min_y)) as f64
	}
}
