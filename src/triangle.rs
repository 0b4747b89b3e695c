//! C4: the triangle rasterizer. Incremental barycentric scanline fill with
//! per-pixel shading. This is the component the rest of the crate exists to
//! serve.

use crate::color::{FloatColor, PackedColor};
use crate::stats::{Stats, TriangleClass};
use crate::texture::Texture;
use crate::Options;

#[inline]
fn edge_function(a: egui::Pos2, b: egui::Pos2, c: egui::Pos2) -> f32 {
	(c.x - a.x) * (b.y - a.y) - (c.y - a.y) * (b.x - a.x)
}

fn min3(a: f32, b: f32, c: f32) -> f32 {
	a.min(b).min(c)
}

fn max3(a: f32, b: f32, c: f32) -> f32 {
	a.max(b).max(c)
}

fn round_to_i64(v: f32) -> i64 {
	(v + 0.5) as i64
}

/// Rasterizes one triangle. `texture` is `None` for an untextured fragment;
/// `scissor_min`/`scissor_max` are in point space, same as `vertices`'
/// positions.
pub fn rasterize_triangle(
	pixels: &mut [PackedColor],
	width_px: usize,
	height_px: usize,
	scale: egui::Vec2,
	scissor_min: egui::Pos2,
	scissor_max: egui::Pos2,
	vertices: [&egui::epaint::Vertex; 3],
	texture: Option<&Texture>,
	options: &Options,
	stats: &mut Stats,
) {
	let p = vertices.map(|v| egui::pos2(v.pos.x * scale.x, v.pos.y * scale.y));

	let determinant = edge_function(p[0], p[1], p[2]);
	stats.triangle_count += 1;
	if determinant == 0.0 {
		log::trace!("skipping zero-area triangle at {:?}", p);
		return;
	}
	let inv_det = 1.0 / determinant;

	let min_x_f = min3(p[0].x, p[1].x, p[2].x);
	let min_y_f = min3(p[0].y, p[1].y, p[2].y);
	let max_x_f = max3(p[0].x, p[1].x, p[2].x);
	let max_y_f = max3(p[0].y, p[1].y, p[2].y);

	let thin = (max_x_f - min_x_f) < 1.5 || (max_y_f - min_y_f) < 1.5;

	let scissor_min_px = egui::pos2(scale.x * scissor_min.x, scale.y * scissor_min.y);
	let scissor_max_px = egui::pos2(scale.x * scissor_max.x, scale.y * scissor_max.y);

	let clipped_min_x = min_x_f.max(scissor_min_px.x);
	let clipped_min_y = min_y_f.max(scissor_min_px.y);
	let clipped_max_x = max_x_f.min(scissor_max_px.x);
	let clipped_max_y = max_y_f.min(scissor_max_px.y);

	let min_x = round_to_i64(clipped_min_x).clamp(0, width_px as i64);
	let min_y = round_to_i64(clipped_min_y).clamp(0, height_px as i64);
	let max_x = round_to_i64(clipped_max_x).clamp(0, width_px as i64);
	let max_y = round_to_i64(clipped_max_y).clamp(0, height_px as i64);

	let area_px = (determinant.abs() / 2.0) as f64;

	let uniform_color = vertices[0].color == vertices[1].color && vertices[0].color == vertices[2].color;
	let has_texture = texture.is_some() && (vertices[0].uv != vertices[1].uv || vertices[0].uv != vertices[2].uv || vertices[1].uv != vertices[2].uv);

	let class = if uniform_color && !has_texture {
		TriangleClass::UniformUntextured
	} else if has_texture {
		TriangleClass::Textured
	} else {
		TriangleClass::Other
	};
	stats.add_triangle_area(class, area_px);
	if thin {
		stats.thin_triangle_count += 1;
		stats.thin_triangle_area_px += area_px;
	}

	if min_x >= max_x || min_y >= max_y {
		return;
	}

	log::trace!("rasterizing triangle bbox ({min_x},{min_y})-({max_x},{max_y}), class={class:?}");

	let c = vertices.map(|v| PackedColor::from(v.color).to_float());

	// Edge function at the top-left covered pixel's center, plus per-column
	// and per-row increments so the inner loop never recomputes it.
	let center = egui::pos2(min_x as f32 + 0.5, min_y as f32 + 0.5);

	let mut row_w0 = inv_det * edge_function(p[1], p[2], center);
	let mut row_w1 = inv_det * edge_function(p[2], p[0], center);
	let mut row_w2 = inv_det * edge_function(p[0], p[1], center);

	let dx0 = inv_det * (p[2].y - p[1].y);
	let dx1 = inv_det * (p[0].y - p[2].y);
	let dx2 = inv_det * (p[1].y - p[0].y);

	let dy0 = inv_det * -(p[2].x - p[1].x);
	let dy1 = inv_det * -(p[0].x - p[2].x);
	let dy2 = inv_det * -(p[1].x - p[0].x);

	let fast_path = uniform_color && !has_texture;
	let shared_color = PackedColor::from(vertices[0].color);

	for y in min_y..max_y {
		let mut w0 = row_w0;
		let mut w1 = row_w1;
		let mut w2 = row_w2;
		let row_start = y as usize * width_px;

		for x in min_x..max_x {
			if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
				let idx = row_start + x as usize;

				if fast_path {
					pixels[idx] = pixels[idx].blend_over(shared_color);
				} else {
					shade_general_pixel(pixels, idx, w0, w1, w2, uniform_color, shared_color, &c, vertices, texture, options);
				}
			}

			w0 += dx0;
			w1 += dx1;
			w2 += dx2;
		}

		row_w0 += dy0;
		row_w1 += dy1;
		row_w2 += dy2;
	}
}

#[allow(clippy::too_many_arguments)]
fn shade_general_pixel(
	pixels: &mut [PackedColor],
	idx: usize,
	w0: f32,
	w1: f32,
	w2: f32,
	uniform_color: bool,
	shared_color: PackedColor,
	c: &[FloatColor; 3],
	vertices: [&egui::epaint::Vertex; 3],
	texture: Option<&Texture>,
	options: &Options,
) {
	let mut src = if uniform_color {
		shared_color.to_float()
	} else {
		c[0].scale(w0).add(c[1].scale(w1)).add(c[2].scale(w2))
	};

	if let Some(texture) = texture {
		let uv = egui::pos2(
			w0 * vertices[0].uv.x + w1 * vertices[1].uv.x + w2 * vertices[2].uv.x,
			w0 * vertices[0].uv.y + w1 * vertices[1].uv.y + w2 * vertices[2].uv.y,
		);

		if options.bilinear_sample {
			src.a = texture.sample_bilinear(uv.x, uv.y);
		} else {
			src.a *= texture.sample_nearest(uv.x, uv.y);
		}
	}

	if src.a <= 0.0 {
		return;
	}
	if src.a >= 1.0 {
		pixels[idx] = src.to_packed();
		return;
	}

	let dest = pixels[idx].to_float();
	pixels[idx] = src.blend_over(dest).to_packed();
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::stats::Stats;

	fn vertex(x: f32, y: f32, color: egui::Color32) -> egui::epaint::Vertex {
		egui::epaint::Vertex { pos: egui::pos2(x, y), uv: egui::pos2(0.0, 0.0), color }
	}

	#[test]
	fn degenerate_triangle_touches_nothing_but_counts() {
		let mut pixels = vec![PackedColor::TRANSPARENT; 4];
		let mut stats = Stats::default();
		let v = vertex(1.0, 1.0, egui::Color32::WHITE);
		rasterize_triangle(
			&mut pixels,
			2,
			2,
			egui::vec2(1.0, 1.0),
			egui::pos2(0.0, 0.0),
			egui::pos2(2.0, 2.0),
			[&v, &v, &v],
			None,
			&Options::default(),
			&mut stats,
		);
		assert!(pixels.iter().all(|&p| p == PackedColor::TRANSPARENT));
		assert_eq!(stats.triangle_count, 1);
		assert_eq!(stats.uniform_triangle_pixels, 0.0);
	}

	#[test]
	fn half_plane_fill_of_right_triangle() {
		let mut pixels = vec![PackedColor::TRANSPARENT; 100];
		let mut stats = Stats::default();
		let white = egui::Color32::WHITE;
		let v0 = vertex(0.0, 0.0, white);
		let v1 = vertex(10.0, 0.0, white);
		let v2 = vertex(0.0, 10.0, white);
		rasterize_triangle(
			&mut pixels,
			10,
			10,
			egui::vec2(1.0, 1.0),
			egui::pos2(0.0, 0.0),
			egui::pos2(10.0, 10.0),
			[&v0, &v1, &v2],
			None,
			&Options::default(),
			&mut stats,
		);
		for y in 0..10 {
			for x in 0..10 {
				let inside = (x as f32 + 0.5) + (y as f32 + 0.5) < 10.0;
				let got = pixels[y * 10 + x];
				if inside {
					assert_eq!(got, PackedColor::from_channels(255, 255, 255, 255), "({x},{y}) should be filled");
				} else {
					assert_eq!(got, PackedColor::TRANSPARENT, "({x},{y}) should be untouched");
				}
			}
		}
	}
}
