//! A CPU software rasterizer for [`egui`]'s tessellated draw output: no GPU,
//! no window, no event loop. Feed it `egui::TexturesDelta` and
//! `Vec<egui::ClippedPrimitive>` from `egui::Context::tessellate`, get back a
//! painted packed-pixel buffer.
//!
//! The triangle rasterizer (incremental barycentric scanline fill) and its
//! fast paths — the axis-aligned-rectangle detector and the uniform-color
//! fast blend — are the reason this crate exists; window creation, input
//! handling, and font atlas generation are the host's job, not this crate's.

mod callback;
mod color;
mod paint;
mod quad;
mod rect;
mod stats;
mod texture;
mod triangle;

pub use callback::{Callback, CallbackInfo};
pub use color::{FloatColor, PackedColor};
pub use paint::PaintTarget;
pub use stats::{Stats, TriangleClass};
pub use texture::Texture;

/// Runtime-configurable behavior. `optimize_rectangles` and
/// `bilinear_sample` are the two fields the distilled design calls for;
/// defaults match it exactly.
#[derive(Debug, Clone, Copy)]
pub struct Options {
	/// Try to collapse six-vertex axis-aligned quads into a flat-fill
	/// instead of rasterizing two triangles.
	pub optimize_rectangles: bool,
	/// Sample the font atlas bilinearly instead of nearest-neighbor.
	pub bilinear_sample: bool,
}

impl Default for Options {
	fn default() -> Self {
		Self { optimize_rectangles: true, bilinear_sample: false }
	}
}

/// Owns the bound font atlas (and any other textures the GUI registers) and
/// the accumulated per-frame stats. One instance per paint target; nothing
/// here is safe to share across threads without external synchronization,
/// matching the single-threaded, synchronous contract of a single `paint`
/// call.
#[derive(Default)]
pub struct Renderer {
	textures: texture::TextureRegistry,
	stats: Stats,
	bound: bool,
}

impl Renderer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Marks the renderer ready to accept frames. The font atlas itself
	/// arrives with the first frame's `textures_delta` (egui only hands out
	/// font pixels that way), so there is nothing to fetch here beyond
	/// flipping the contract flag `paint` checks.
	pub fn bind(&mut self) {
		self.bound = true;
	}

	/// Rasterizes one frame. `target` is the caller-owned pixel buffer and
	/// point→pixel scale; `textures_delta` and `clipped_primitives` are
	/// exactly what `egui::Context::tessellate` plus `FullOutput` produce
	/// for this frame. Panics if called before [`Self::bind`] or after
	/// [`Self::unbind`] — the resource lifecycle contract is not
	/// recoverable at this layer.
	pub fn paint(&mut self, target: &mut PaintTarget<'_>, textures_delta: &egui::TexturesDelta, clipped_primitives: &[egui::ClippedPrimitive], options: &Options) {
		assert!(self.bound, "paint() called before bind()");

		for (id, delta) in &textures_delta.set {
			self.textures.set(*id, delta);
		}

		paint::paint_frame(target, &self.textures, clipped_primitives, options, &mut self.stats);

		for &id in &textures_delta.free {
			self.textures.free(id);
		}
	}

	/// Releases every bound texture, including the font atlas.
	pub fn unbind(&mut self) {
		self.textures.clear();
		self.bound = false;
	}

	/// Registers a texture directly, without going through an
	/// `egui::TexturesDelta`. Useful for hosts that manage their own alpha8
	/// textures outside `egui`'s font pipeline.
	pub fn load_texture(&mut self, id: egui::TextureId, texture: Texture) {
		self.textures.insert(id, texture);
	}

	/// The stats accumulated by the most recent `paint` call. Not part of
	/// the minimal cross-language surface, but necessary to test against
	/// (see `tests/scenarios.rs`) and useful for `debug!`-level tuning.
	pub fn stats(&self) -> &Stats {
		&self.stats
	}
}

/// A snapshot of the style knobs [`make_style_fast`] changes, so a caller
/// can restore them later via [`restore_style`]. One field per rounding
/// [`make_style_fast`] overwrites, captured individually so a caller's
/// distinct per-widget roundings come back exactly as they were rather than
/// being collapsed onto a single value.
#[derive(Debug, Clone, Copy)]
pub struct StyleSnapshot {
	noninteractive_rounding_was: egui::Rounding,
	inactive_rounding_was: egui::Rounding,
	hovered_rounding_was: egui::Rounding,
	active_rounding_was: egui::Rounding,
	open_rounding_was: egui::Rounding,
	window_rounding_was: egui::Rounding,
	menu_rounding_was: egui::Rounding,
	feathering_was: bool,
}

/// Disables edge anti-aliasing and rounds corners down to zero. Both
/// otherwise produce thin, non-uniformly-colored triangles along every
/// rounded corner and every shape edge — exactly the triangles this
/// backend's fast paths can't use, since they need a uniform source color
/// or a flat rectangle to skip per-pixel float shading.
pub fn make_style_fast(ctx: &egui::Context) -> StyleSnapshot {
	let mut snapshot = StyleSnapshot {
		noninteractive_rounding_was: egui::Rounding::default(),
		inactive_rounding_was: egui::Rounding::default(),
		hovered_rounding_was: egui::Rounding::default(),
		active_rounding_was: egui::Rounding::default(),
		open_rounding_was: egui::Rounding::default(),
		window_rounding_was: egui::Rounding::default(),
		menu_rounding_was: egui::Rounding::default(),
		feathering_was: true,
	};

	ctx.style_mut(|style| {
		snapshot.noninteractive_rounding_was = style.visuals.widgets.noninteractive.rounding;
		snapshot.inactive_rounding_was = style.visuals.widgets.inactive.rounding;
		snapshot.hovered_rounding_was = style.visuals.widgets.hovered.rounding;
		snapshot.active_rounding_was = style.visuals.widgets.active.rounding;
		snapshot.open_rounding_was = style.visuals.widgets.open.rounding;
		snapshot.window_rounding_was = style.visuals.window_rounding;
		snapshot.menu_rounding_was = style.visuals.menu_rounding;

		let flat = egui::Rounding::same(0.0);
		style.visuals.widgets.noninteractive.rounding = flat;
		style.visuals.widgets.inactive.rounding = flat;
		style.visuals.widgets.hovered.rounding = flat;
		style.visuals.widgets.active.rounding = flat;
		style.visuals.widgets.open.rounding = flat;
		style.visuals.window_rounding = flat;
		style.visuals.menu_rounding = flat;
	});

	ctx.tessellation_options_mut(|options| {
		snapshot.feathering_was = options.feathering;
		options.feathering = false;
	});

	snapshot
}

/// Undoes [`make_style_fast`]. Recovered from `main.cpp`'s call to
/// `imgui_sw::restore_style()`, whose declaration wasn't part of the header
/// we were handed but whose call site proves it existed.
pub fn restore_style(ctx: &egui::Context, snapshot: StyleSnapshot) {
	ctx.style_mut(|style| {
		style.visuals.widgets.noninteractive.rounding = snapshot.noninteractive_rounding_was;
		style.visuals.widgets.inactive.rounding = snapshot.inactive_rounding_was;
		style.visuals.widgets.hovered.rounding = snapshot.hovered_rounding_was;
		style.visuals.widgets.active.rounding = snapshot.active_rounding_was;
		style.visuals.widgets.open.rounding = snapshot.open_rounding_was;
		style.visuals.window_rounding = snapshot.window_rounding_was;
		style.visuals.menu_rounding = snapshot.menu_rounding_was;
	});

	ctx.tessellation_options_mut(|options| {
		options.feathering = snapshot.feathering_was;
	});
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	#[should_panic(expected = "paint() called before bind()")]
	fn paint_before_bind_panics() {
		let mut renderer = Renderer::new();
		let mut pixels = vec![PackedColor::TRANSPARENT; 4];
		let mut target = PaintTarget::new(&mut pixels, 2, 2, egui::vec2(1.0, 1.0));
		renderer.paint(&mut target, &egui::TexturesDelta::default(), &[], &Options::default());
	}

	#[test]
	fn bind_paint_unbind_roundtrip_does_not_panic() {
		let mut renderer = Renderer::new();
		renderer.bind();
		let mut pixels = vec![PackedColor::TRANSPARENT; 4];
		let mut target = PaintTarget::new(&mut pixels, 2, 2, egui::vec2(1.0, 1.0));
		renderer.paint(&mut target, &egui::TexturesDelta::default(), &[], &Options::default());
		renderer.unbind();
	}

	#[test]
	fn make_style_fast_roundtrips_via_restore_style() {
		let ctx = egui::Context::default();

		// Give every widget rounding a distinct value first, so a restore
		// that collapses them all onto one captured field is caught.
		ctx.style_mut(|style| {
			style.visuals.widgets.noninteractive.rounding = egui::Rounding::same(1.0);
			style.visuals.widgets.inactive.rounding = egui::Rounding::same(2.0);
			style.visuals.widgets.hovered.rounding = egui::Rounding::same(3.0);
			style.visuals.widgets.active.rounding = egui::Rounding::same(4.0);
			style.visuals.widgets.open.rounding = egui::Rounding::same(5.0);
			style.visuals.window_rounding = egui::Rounding::same(6.0);
			style.visuals.menu_rounding = egui::Rounding::same(7.0);
		});
		ctx.tessellation_options_mut(|options| options.feathering = true);

		let before = ctx.style().visuals.clone();

		let snapshot = make_style_fast(&ctx);
		ctx.style_mut(|style| {
			assert_eq!(style.visuals.widgets.noninteractive.rounding, egui::Rounding::same(0.0));
			assert_eq!(style.visuals.widgets.inactive.rounding, egui::Rounding::same(0.0));
			assert_eq!(style.visuals.widgets.hovered.rounding, egui::Rounding::same(0.0));
			assert_eq!(style.visuals.widgets.active.rounding, egui::Rounding::same(0.0));
			assert_eq!(style.visuals.widgets.open.rounding, egui::Rounding::same(0.0));
			assert_eq!(style.visuals.window_rounding, egui::Rounding::same(0.0));
			assert_eq!(style.visuals.menu_rounding, egui::Rounding::same(0.0));
		});
		ctx.tessellation_options_mut(|options| assert!(!options.feathering));

		restore_style(&ctx, snapshot);

		let after = ctx.style().visuals.clone();
		assert_eq!(after.widgets.noninteractive.rounding, before.widgets.noninteractive.rounding);
		assert_eq!(after.widgets.inactive.rounding, before.widgets.inactive.rounding);
		assert_eq!(after.widgets.hovered.rounding, before.widgets.hovered.rounding);
		assert_eq!(after.widgets.active.rounding, before.widgets.active.rounding);
		assert_eq!(after.widgets.open.rounding, before.widgets.open.rounding);
		assert_eq!(after.window_rounding, before.window_rounding);
		assert_eq!(after.menu_rounding, before.menu_rounding);
		ctx.tessellation_options_mut(|options| assert!(options.feathering));
	}
}
