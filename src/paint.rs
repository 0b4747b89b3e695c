//! C6 + C7: the draw-list walker and frame entry point.

use crate::color::PackedColor;
use crate::quad::{self, QuadResult};
use crate::stats::Stats;
use crate::texture::TextureRegistry;
use crate::triangle;
use crate::Options;

/// A caller-owned pixel buffer plus the point→pixel scale for this frame.
/// Mirrors the "paint target" of the data model: width, height, and a
/// (scale_x, scale_y) vector, created fresh by the host every frame.
pub struct PaintTarget<'a> {
	pub pixels: &'a mut [PackedColor],
	pub width_px: usize,
	pub height_px: usize,
	pub scale: egui::Vec2,
}

impl<'a> PaintTarget<'a> {
	pub fn new(pixels: &'a mut [PackedColor], width_px: usize, height_px: usize, scale: egui::Vec2) -> Self {
		assert_eq!(pixels.len(), width_px * height_px, "pixel buffer length does not match width_px*height_px");
		Self { pixels, width_px, height_px, scale }
	}
}

/// Resets `stats` and walks every primitive in `clipped_primitives` into
/// `target`. `egui::Context::tessellate` already flattens what the data
/// model calls "command lists" into one ordered `Vec<ClippedPrimitive>", so
/// there is no separate per-list loop to write here.
pub fn paint_frame(target: &mut PaintTarget<'_>, textures: &TextureRegistry, clipped_primitives: &[egui::ClippedPrimitive], options: &Options, stats: &mut Stats) {
	stats.reset();
	for clipped in clipped_primitives {
		match &clipped.primitive {
			egui::epaint::Primitive::Mesh(mesh) => paint_mesh(target, textures, clipped.clip_rect, mesh, options, stats),
			egui::epaint::Primitive::Callback(callback) => {
				crate::callback::dispatch(target.pixels, target.width_px, target.height_px, target.scale, clipped.clip_rect, callback);
			}
		}
	}
}

fn paint_mesh(target: &mut PaintTarget<'_>, textures: &TextureRegistry, clip_rect: egui::Rect, mesh: &egui::epaint::Mesh, options: &Options, stats: &mut Stats) {
	assert_eq!(mesh.indices.len() % 3, 0, "mesh index count {} is not a multiple of 3", mesh.indices.len());
	for &idx in &mesh.indices {
		assert!((idx as usize) < mesh.vertices.len(), "draw command index {idx} out of range of {} vertices", mesh.vertices.len());
	}

	let texture = textures.get(mesh.texture_id);
	let white_uv = egui::pos2(0.5 / texture.width() as f32, 0.5 / texture.height() as f32);

	let scissor_min = clip_rect.min;
	let scissor_max = clip_rect.max;

	let mut i = 0;
	while i < mesh.indices.len() {
		if options.optimize_rectangles {
			stats.quad_detector_attempts += 1;
			match quad::detect(mesh, i, white_uv) {
				QuadResult::Rect(m) => {
					stats.quad_detector_hits += 1;
					let clipped_min = egui::pos2(m.min.x.max(scissor_min.x), m.min.y.max(scissor_min.y));
					let clipped_max = egui::pos2(m.max.x.min(scissor_max.x), m.max.y.min(scissor_max.y));
					crate::rect::paint_rect(target.pixels, target.width_px, target.height_px, target.scale, clipped_min, clipped_max, PackedColor::from(m.color));
					stats.uniform_rectangle_pixels += crate::rect::clipped_area_px(target.width_px, target.height_px, target.scale, clipped_min, clipped_max);
					i += 6;
					continue;
				}
				QuadResult::TexturedFallthrough { min, max } => {
					let clipped_min = egui::pos2(min.x.max(scissor_min.x), min.y.max(scissor_min.y));
					let clipped_max = egui::pos2(max.x.min(scissor_max.x), max.y.min(scissor_max.y));
					stats.textured_rectangle_pixels += crate::rect::clipped_area_px(target.width_px, target.height_px, target.scale, clipped_min, clipped_max);
				}
				QuadResult::NotAQuad => {}
			}
		}

		let v0 = &mesh.vertices[mesh.indices[i] as usize];
		let v1 = &mesh.vertices[mesh.indices[i + 1] as usize];
		let v2 = &mesh.vertices[mesh.indices[i + 2] as usize];
		triangle::rasterize_triangle(
			target.pixels,
			target.width_px,
			target.height_px,
			target.scale,
			scissor_min,
			scissor_max,
			[v0, v1, v2],
			Some(texture),
			options,
			stats,
		);
		i += 3;
	}

	log::debug!(
		"quad detector: {}/{} attempts collapsed into a rectangle fill",
		stats.quad_detector_hits,
		stats.quad_detector_attempts
	);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::texture::Texture;

	fn white_texture_registry() -> TextureRegistry {
		let mut registry = TextureRegistry::default();
		registry.insert(egui::TextureId::default(), Texture::new(1, 1, vec![255]));
		registry
	}

	fn white_pixel_mesh(min: egui::Pos2, max: egui::Pos2, color: egui::Color32) -> egui::epaint::Mesh {
		let mut mesh = egui::epaint::Mesh::default();
		let white_uv = egui::pos2(0.5, 0.5);
		let corners = [
			egui::pos2(min.x, min.y),
			egui::pos2(max.x, min.y),
			egui::pos2(max.x, max.y),
			egui::pos2(min.x, max.y),
		];
		for c in corners {
			mesh.vertices.push(egui::epaint::Vertex { pos: c, uv: white_uv, color });
		}
		mesh.indices = vec![0, 1, 2, 0, 2, 3];
		mesh.texture_id = egui::TextureId::default();
		mesh
	}

	#[test]
	fn quad_fast_path_fills_target() {
		let textures = white_texture_registry();
		let mut stats = Stats::default();
		let mut pixels = vec![PackedColor::TRANSPARENT; 16];
		let mut target = PaintTarget::new(&mut pixels, 4, 4, egui::vec2(1.0, 1.0));
		let mesh = white_pixel_mesh(egui::pos2(0.0, 0.0), egui::pos2(4.0, 4.0), egui::Color32::from_rgba_unmultiplied(255, 0, 0, 255));
		let clipped = egui::ClippedPrimitive { clip_rect: egui::Rect { min: egui::pos2(0.0, 0.0), max: egui::pos2(4.0, 4.0) }, primitive: egui::epaint::Primitive::Mesh(mesh) };

		paint_frame(&mut target, &textures, &[clipped], &Options::default(), &mut stats);

		assert!(pixels.iter().all(|&p| p == PackedColor::from_channels(255, 0, 0, 255)));
		assert_eq!(stats.quad_detector_hits, 1);
	}
}
