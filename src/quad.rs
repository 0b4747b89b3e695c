//! C5: the quad detector. Recognizes the GUI's six-vertex axis-aligned
//! rectangle pattern in the index stream and reports enough information for
//! the walker (`paint.rs`) to dispatch to the rectangle painter (`rect.rs`)
//! instead of rasterizing two triangles.

fn min3(a: f32, b: f32, c: f32) -> f32 {
	a.min(b).min(c)
}

fn max3(a: f32, b: f32, c: f32) -> f32 {
	a.max(b).max(c)
}

pub struct QuadMatch {
	pub min: egui::Pos2,
	pub max: egui::Pos2,
	pub color: egui::Color32,
}

pub enum QuadResult {
	/// Uniformly colored, white-pixel-UV rectangle: fast-path it.
	Rect(QuadMatch),
	/// Axis-aligned, uniformly colored, but not the white pixel: accumulate
	/// telemetry and fall through to normal triangle rasterization. Textured
	/// quads are not fast-pathed, since the fast path assumes full coverage.
	TexturedFallthrough { min: egui::Pos2, max: egui::Pos2 },
	NotAQuad,
}

/// Tries to match the six indices starting at `pos` in `mesh.indices`
/// against the axis-aligned-quad pattern. `white_uv` is the command block's
/// white-pixel UV, `(0.5/tex_w, 0.5/tex_h)`.
pub fn detect(mesh: &egui::epaint::Mesh, pos: usize, white_uv: egui::Pos2) -> QuadResult {
	if pos + 6 > mesh.indices.len() {
		return QuadResult::NotAQuad;
	}

	let v: [&egui::epaint::Vertex; 6] = std::array::from_fn(|i| &mesh.vertices[mesh.indices[pos + i] as usize]);

	let min = egui::pos2(min3(v[0].pos.x, v[1].pos.x, v[2].pos.x), min3(v[0].pos.y, v[1].pos.y, v[2].pos.y));
	let max = egui::pos2(max3(v[0].pos.x, v[1].pos.x, v[2].pos.x), max3(v[0].pos.y, v[1].pos.y, v[2].pos.y));

	let on_corner = |p: egui::Pos2| (p.x == min.x || p.x == max.x) && (p.y == min.y || p.y == max.y);
	if !v.iter().all(|vert| on_corner(vert.pos)) {
		return QuadResult::NotAQuad;
	}

	let color = v[0].color;
	if !v.iter().all(|vert| vert.color == color) {
		return QuadResult::NotAQuad;
	}

	let is_white_pixel = v.iter().all(|vert| vert.uv == white_uv);
	if is_white_pixel {
		QuadResult::Rect(QuadMatch { min, max, color })
	} else {
		QuadResult::TexturedFallthrough { min, max }
	}
}
