//! User-callback escape hatch: dispatches `egui::epaint::PaintCallback`
//! without performing any rasterization of its own. Fills the gap left open
//! by the teacher's `editor/egui_impl.rs`, whose `paint_primitives` match
//! arm for `Primitive::Callback` is `unimplemented!()`.

use crate::color::PackedColor;

/// Implemented by host-defined callback payloads. A command block that
/// carries a callback stores it as `Arc<dyn Callback>` behind `egui`'s
/// `Arc<dyn Any + Send + Sync>`; this crate downcasts back to `Arc<dyn
/// Callback>` and invokes it once, at its position in the draw stream.
pub trait Callback: Send + Sync {
	fn paint(&self, info: CallbackInfo<'_>);
}

/// What a callback needs to do its own drawing into the same framebuffer:
/// the pixel buffer, its dimensions, the point→pixel scale, and the
/// callback's clip and paint rectangles in point space.
pub struct CallbackInfo<'a> {
	pub pixels: &'a mut [PackedColor],
	pub width_px: usize,
	pub height_px: usize,
	pub scale: egui::Vec2,
	pub rect: egui::Rect,
	pub clip_rect: egui::Rect,
}

/// Invokes `callback.callback` if it downcasts to `Arc<dyn Callback>`.
/// Declining to downcast is a contract violation elsewhere in this crate's
/// design, but a callback payload is host-defined and unknowable to us, so
/// we log and skip rather than panic: the command's `element_count` has
/// already been consumed by the walker regardless of outcome.
pub fn dispatch(pixels: &mut [PackedColor], width_px: usize, height_px: usize, scale: egui::Vec2, clip_rect: egui::Rect, callback: &egui::epaint::PaintCallback) {
	match callback.callback.downcast_ref::<std::sync::Arc<dyn Callback>>() {
		Some(cb) => cb.paint(CallbackInfo { pixels, width_px, height_px, scale, rect: callback.rect, clip_rect }),
		None => log::warn!("paint callback did not downcast to the expected callback trait; skipping"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicBool, Ordering};
	use std::sync::Arc;

	struct Counter(Arc<AtomicBool>);

	impl Callback for Counter {
		fn paint(&self, _info: CallbackInfo<'_>) {
			self.0.store(true, Ordering::SeqCst);
		}
	}

	#[test]
	fn invokes_matching_callback() {
		let called = Arc::new(AtomicBool::new(false));
		let cb: Arc<dyn Callback> = Arc::new(Counter(called.clone()));
		let paint_callback = egui::epaint::PaintCallback { rect: egui::Rect::NOTHING, callback: Arc::new(cb) };

		let mut pixels = vec![PackedColor::TRANSPARENT; 4];
		dispatch(&mut pixels, 2, 2, egui::vec2(1.0, 1.0), egui::Rect::EVERYTHING, &paint_callback);

		assert!(called.load(Ordering::SeqCst));
	}

	#[test]
	fn skips_unrecognized_payload_without_panicking() {
		let paint_callback = egui::epaint::PaintCallback { rect: egui::Rect::NOTHING, callback: Arc::new(42u32) };
		let mut pixels = vec![PackedColor::TRANSPARENT; 4];
		dispatch(&mut pixels, 2, 2, egui::vec2(1.0, 1.0), egui::Rect::EVERYTHING, &paint_callback);
	}
}
