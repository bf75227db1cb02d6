//! Browser callbacks owned as values: dropping one unregisters it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, Window};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` loop that runs until dropped.
pub struct FrameLoop {
	window: Window,
	callback: FrameCallback,
	handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
	/// Calls `on_frame` once per animation frame.
	pub fn start(window: Window, mut on_frame: impl FnMut() + 'static) -> Result<Self, JsValue> {
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let handle = Rc::new(Cell::new(None));

		let (callback_inner, handle_inner, window_inner) =
			(callback.clone(), handle.clone(), window.clone());
		let closure = Closure::<dyn FnMut()>::new(move || {
			on_frame();
			// the slot is emptied on drop, which ends the loop
			if let Some(ref cb) = *callback_inner.borrow() {
				handle_inner.set(
					window_inner
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		});

		handle.set(Some(
			window.request_animation_frame(closure.as_ref().unchecked_ref())?,
		));
		*callback.borrow_mut() = Some(closure);
		Ok(Self {
			window,
			callback,
			handle,
		})
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		if let Some(id) = self.handle.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		// breaks the closure's reference back to its own slot
		self.callback.borrow_mut().take();
		log::debug!("animation loop stopped");
	}
}

/// An event listener that is removed when dropped.
pub struct ListenerGuard {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut()>,
}

impl ListenerGuard {
	/// Registers `on_event` for `event` on `target`.
	pub fn new(
		target: impl Into<EventTarget>,
		event: &'static str,
		on_event: impl FnMut() + 'static,
	) -> Result<Self, JsValue> {
		let target = target.into();
		let callback = Closure::<dyn FnMut()>::new(on_event);
		target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(Self {
			target,
			event,
			callback,
		})
	}
}

impl Drop for ListenerGuard {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}
