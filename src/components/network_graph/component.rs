use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, VisibilityState};

use super::frame_loop::{FrameLoop, ListenerGuard};
use super::render;
use super::state::{NetworkGraphState, Tooltip};
use crate::profile::Profile;

const FALLBACK_SIZE: (f64, f64) = (320.0, 260.0);

/// Animated network of directory profiles.
///
/// The frame loop and the window listeners live in stored values owned by
/// this component, so unmounting it cancels the pending frame and removes the
/// listeners. The loop also stops while `visible` is false or the page is
/// hidden.
#[component]
pub fn NetworkGraph(
	#[prop(into)] profiles: Signal<Vec<Profile>>,
	#[prop(into, default = Signal::stored(true))] visible: Signal<bool>,
	#[prop(optional)] class: &'static str,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<NetworkGraphState>>> = Rc::new(RefCell::new(None));
	let frame_loop = StoredValue::new_local(None::<FrameLoop>);
	let listeners = StoredValue::new_local(Vec::<ListenerGuard>::new());
	let size = RwSignal::new(None::<(f64, f64)>);
	let page_visible = RwSignal::new(true);
	let tooltip = RwSignal::new(None::<Tooltip>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		size.set(Some(measure(&canvas)));

		let mut guards = Vec::new();
		let canvas_resize = canvas.clone();
		match ListenerGuard::new(window.clone(), "resize", move || {
			size.set(Some(measure(&canvas_resize)));
		}) {
			Ok(guard) => guards.push(guard),
			Err(err) => log::warn!("resize listener not registered: {err:?}"),
		}
		if let Some(document) = window.document() {
			let doc = document.clone();
			match ListenerGuard::new(document, "visibilitychange", move || {
				page_visible.set(doc.visibility_state() == VisibilityState::Visible);
			}) {
				Ok(guard) => guards.push(guard),
				Err(err) => log::warn!("visibility listener not registered: {err:?}"),
			}
		}
		listeners.set_value(guards);
	});

	// rebuild from scratch whenever the data or the canvas size changes
	let state_build = state.clone();
	Effect::new(move |_| {
		let profiles = profiles.get();
		let (Some(canvas), Some((w, h))) = (canvas_ref.get(), size.get()) else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
		canvas.set_width((w * dpr) as u32);
		canvas.set_height((h * dpr) as u32);

		*state_build.borrow_mut() = Some(NetworkGraphState::new(&profiles, w, h));
		log::debug!("graph rebuilt: {} profiles at {w}x{h}", profiles.len());
		tooltip.set(None);
	});

	let state_frame = state.clone();
	Effect::new(move |_| {
		let running = visible.get() && page_visible.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if !running {
			frame_loop.set_value(None);
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let (Some(window), Some(ctx)) = (web_sys::window(), context_2d(&canvas)) else {
			return;
		};

		let (state_anim, window_anim) = (state_frame.clone(), window.clone());
		match FrameLoop::start(window, move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick();
				render::render(s, &ctx, window_anim.device_pixel_ratio());
			}
		}) {
			Ok(running) => frame_loop.set_value(Some(running)),
			Err(err) => {
				log::warn!("animation loop not started: {err:?}");
				frame_loop.set_value(None);
			}
		}
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		let hovered = state_mm.borrow_mut().as_mut().and_then(|s| s.hover_at(x, y));
		tooltip.set(hovered);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.set_hover(None);
		}
		tooltip.set(None);
	};

	view! {
		<div class=format!("network-graph {class}")>
			<canvas
				node_ref=canvas_ref
				class="network-graph-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
			/>
			{move || {
				tooltip
					.get()
					.map(|t| {
						view! {
							<div
								class="graph-tooltip"
								style=format!("left: {}px; top: {}px;", t.x, t.y - 36.0)
							>
								<p class="graph-tooltip-name">{t.name}</p>
								<p class="graph-tooltip-major">{t.major}</p>
							</div>
						}
					})
			}}
		</div>
	}
}

/// CSS size of the canvas, falling back when it has not been laid out yet.
fn measure(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	if rect.width() > 0.0 && rect.height() > 0.0 {
		(rect.width(), rect.height())
	} else {
		FALLBACK_SIZE
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}
