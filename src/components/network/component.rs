use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::options::RenderOptions;
use super::render;
use super::state::NetworkState;
use crate::graph::GraphPayload;

const MAX_FRAME_SECONDS: f32 = 0.05;

/// The `requestAnimationFrame` chain driving one canvas.
#[derive(Default)]
struct FrameLoop {
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
	pending: Cell<Option<i32>>,
}

impl FrameLoop {
	fn is_running(&self) -> bool {
		self.callback.borrow().is_some()
	}

	fn request(&self) {
		if let (Some(window), Some(cb)) = (web_sys::window(), self.callback.borrow().as_ref()) {
			self.pending
				.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	}

	/// Cancels the queued frame and drops the callback, breaking the
	/// callback's reference back to this loop.
	fn stop(&self) {
		if let (Some(window), Some(id)) = (web_sys::window(), self.pending.take()) {
			let _ = window.cancel_animation_frame(id);
		}
		self.callback.borrow_mut().take();
	}
}

/// Advances one frame, following the container when it changed size.
/// Returns `None` once `options` went away with its owner.
fn advance(
	state: &mut Option<NetworkState>,
	options: Signal<RenderOptions>,
	size: (f64, f64),
	dt: f32,
) -> Option<RenderOptions> {
	let opts = options.try_get_untracked()?;
	if let Some(s) = state.as_mut() {
		if (s.width, s.height) != size {
			s.resize(size.0, size.1);
		}
		s.tick(dt, opts.physics);
	}
	Some(opts)
}

fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0))
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Draws a graph payload into the container `container_id`.
///
/// Every new payload replaces the previous drawing; `None` clears it.
#[component]
pub fn NetworkCanvas(
	#[prop(into)] payload: Signal<Option<GraphPayload>>,
	#[prop(into)] options: Signal<RenderOptions>,
	#[prop(into)] container_id: String,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<NetworkState>>> = Rc::new(RefCell::new(None));
	let frames = Rc::new(FrameLoop::default());
	let (state_init, frames_init) = (state.clone(), frames.clone());

	let frames_cleanup = SendWrapper::new(frames);
	on_cleanup(move || frames_cleanup.stop());

	Effect::new(move |_| {
		let payload = payload.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = container_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		*state_init.borrow_mut() = payload.as_ref().map(|p| {
			info!("rendering {} nodes, {} edges", p.nodes.len(), p.edges.len());
			NetworkState::new(p, w, h)
		});

		if frames_init.is_running() {
			return;
		}
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("canvas has no 2d context");
			return;
		};

		let (state_anim, frames_inner) = (state_init.clone(), frames_init.clone());
		let last_frame = Cell::new(js_sys::Date::now());
		*frames_init.callback.borrow_mut() = Some(Closure::new(move || {
			frames_inner.pending.set(None);
			let now = js_sys::Date::now();
			let dt = (((now - last_frame.replace(now)) / 1000.0) as f32).min(MAX_FRAME_SECONDS);
			let size = container_size(&canvas);
			if size != (canvas.width() as f64, canvas.height() as f64) {
				canvas.set_width(size.0 as u32);
				canvas.set_height(size.1 as u32);
			}

			let mut state = state_anim.borrow_mut();
			let Some(opts) = advance(&mut state, options, size, dt) else {
				return;
			};
			match state.as_ref() {
				Some(s) => render::render(s, &opts, &ctx),
				None => ctx.clear_rect(0.0, 0.0, size.0, size.1),
			}
			frames_inner.request();
		}));
		frames_init.request();
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let (Some((x, y)), Some(s)) = (pointer(canvas_ref, &ev), state_md.borrow_mut().as_mut()) {
			s.pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let (Some((x, y)), Some(s)) = (pointer(canvas_ref, &ev), state_mm.borrow_mut().as_mut()) {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(s) = state_mu.borrow_mut().as_mut() {
			s.pointer_up();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(s) = state_ml.borrow_mut().as_mut() {
			s.pointer_leave();
		}
	};

	let state_wh = state;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let (Some((x, y)), Some(s)) = (pointer(canvas_ref, &ev), state_wh.borrow_mut().as_mut()) {
			s.zoom_at(x, y, ev.delta_y() < 0.0);
		}
	};

	view! {
		<div id=container_id class="network-container">
			<canvas
				node_ref=canvas_ref
				class="network-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphNode, NodeId};

	fn single_node() -> Option<NetworkState> {
		let payload = GraphPayload {
			nodes: vec![GraphNode::new(NodeId::Number(1))],
			edges: vec![],
		};
		Some(NetworkState::new(&payload, 800.0, 600.0))
	}

	fn owned_options(owner: &Owner) -> Signal<RenderOptions> {
		owner.with(|| RwSignal::new(RenderOptions::default()).into())
	}

	#[test]
	fn frame_follows_options_and_container_size() {
		let owner = Owner::new();
		let options = owned_options(&owner);
		let mut state = single_node();

		let opts = advance(&mut state, options, (1024.0, 768.0), 0.016);
		assert_eq!(opts, Some(RenderOptions::default()));
		let s = state.as_ref().unwrap();
		assert_eq!((s.width, s.height), (1024.0, 768.0));
	}

	#[test]
	fn frame_stops_after_owner_is_disposed() {
		let owner = Owner::new();
		let options = owned_options(&owner);
		owner.cleanup();
		let mut state = single_node();

		assert_eq!(advance(&mut state, options, (1024.0, 768.0), 0.016), None);
		assert_eq!(state.as_ref().map(|s| s.width), Some(800.0));
	}

	#[test]
	fn empty_canvas_still_advances() {
		let owner = Owner::new();
		let options = owned_options(&owner);
		let mut state = None;
		assert!(advance(&mut state, options, (800.0, 600.0), 0.016).is_some());
	}
}
