//! Builds one synthetic `egui` frame — a flat-colored rectangle and an
//! untextured triangle, no window, no text — paints it with `softpaint`,
//! and dumps the result as a binary PPM so the output can be inspected
//! without a display.

use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

use softpaint::{Options, PaintTarget, PackedColor, Renderer};

fn build_frame(width_pts: f32, height_pts: f32) -> (egui::TexturesDelta, Vec<egui::ClippedPrimitive>, f32) {
	let ctx = egui::Context::default();
	let raw_input = egui::RawInput {
		screen_rect: Some(egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(width_pts, height_pts))),
		..Default::default()
	};

	let full_output = ctx.run(raw_input, |ctx| {
		egui::Area::new(egui::Id::new("synthetic_frame")).fixed_pos(egui::pos2(0.0, 0.0)).show(ctx, |ui| {
			let painter = ui.painter();
			painter.rect_filled(
				egui::Rect::from_min_max(egui::pos2(8.0, 8.0), egui::pos2(40.0, 40.0)),
				0.0,
				egui::Color32::from_rgb(220, 80, 40),
			);
			painter.add(egui::Shape::convex_polygon(
				vec![egui::pos2(40.0, 48.0), egui::pos2(60.0, 48.0), egui::pos2(40.0, 60.0)],
				egui::Color32::from_rgb(60, 140, 220),
				egui::Stroke::NONE,
			));
		});
	});

	let clipped_primitives = ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
	(full_output.textures_delta, clipped_primitives, full_output.pixels_per_point)
}

fn write_ppm(path: &str, width_px: usize, height_px: usize, pixels: &[PackedColor]) -> std::io::Result<()> {
	let file = File::create(path)?;
	let mut out = BufWriter::new(file);
	writeln!(out, "P6\n{width_px} {height_px}\n255")?;
	for pixel in pixels {
		out.write_all(&[pixel.r(), pixel.g(), pixel.b()])?;
	}
	Ok(())
}

fn main() {
	env_logger::init();

	let out_path = env::args().nth(1).unwrap_or_else(|| "synthetic_frame.ppm".to_string());

	let (width_pts, height_pts) = (64.0, 64.0);
	let (textures_delta, clipped_primitives, pixels_per_point) = build_frame(width_pts, height_pts);

	let width_px = (width_pts * pixels_per_point) as usize;
	let height_px = (height_pts * pixels_per_point) as usize;
	let mut pixels = vec![PackedColor::TRANSPARENT; width_px * height_px];

	let mut renderer = Renderer::new();
	renderer.bind();

	let mut target = PaintTarget::new(&mut pixels, width_px, height_px, egui::vec2(pixels_per_point, pixels_per_point));
	renderer.paint(&mut target, &textures_delta, &clipped_primitives, &Options::default());

	log::info!("painted {} triangles, {} quad-detector hits", renderer.stats().triangle_count, renderer.stats().quad_detector_hits);

	renderer.unbind();

	write_ppm(&out_path, width_px, height_px, &pixels).expect("failed to write output PPM");
	println!("wrote {out_path}");
}
