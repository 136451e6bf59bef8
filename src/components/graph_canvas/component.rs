//! Leptos component wrapping the knowledge graph canvas.
//!
//! The canvas draws whatever [`RenderFrame`] the host hands it and reports
//! taps back as [`SurfaceEvent`]s; it never mutates graph state itself. An
//! animation loop runs via `requestAnimationFrame`, applying queued fit/focus
//! requests and redrawing each frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use crate::graph::{Point, RenderFrame, SurfaceEvent, Viewport};

use super::render;
use super::state::CanvasState;

type SharedState = Rc<RefCell<Option<CanvasState>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	let width = window.inner_width().ok()?.as_f64()?;
	let height = window.inner_height().ok()?.as_f64()?;
	Some((width, height))
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((ev.client_x() as f64 - rect.left(), ev.client_y() as f64 - rect.top()))
}

/// Renders the graph on a canvas element.
///
/// `frame` is redrawn whenever it changes. A change of `layout_revision`
/// fits the visible graph; a change of `focus` centers on the given point.
/// Size changes are reported through `on_resize`, taps through `on_event`.
#[component]
pub fn GraphCanvas(
	#[prop(into)] frame: Signal<RenderFrame>,
	#[prop(into)] layout_revision: Signal<u64>,
	#[prop(into)] focus: Signal<(u64, Option<Point>)>,
	on_event: Callback<SurfaceEvent>,
	#[prop(optional)] on_resize: Option<Callback<Viewport>>,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) = (state.clone(), animate.clone(), resize_cb.clone());

	let report_size = move |width: f64, height: f64| {
		if let Some(cb) = on_resize {
			cb.run(Viewport::new(width, height));
		}
	};

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			canvas
				.parent_element()
				.map(|p| (p.client_width() as f64, p.client_height() as f64))
				.unwrap_or((800.0, 600.0))
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("kusuri-graph: canvas 2d context unavailable");
			return;
		};

		*state_init.borrow_mut() = Some(CanvasState::new(frame.get_untracked(), w, h));
		report_size(w, h);

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *state_resize.borrow_mut() {
					c.resize(nw, nh);
				}
				report_size(nw, nh);
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *state_anim.borrow_mut() {
				c.apply_pending();
				render::render(c, &ctx);
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_frame = state.clone();
	Effect::new(move |_| {
		let next = frame.get();
		if let Some(ref mut c) = *state_frame.borrow_mut() {
			c.set_frame(next);
		}
	});

	let state_fit = state.clone();
	Effect::new(move |prev: Option<u64>| {
		let revision = layout_revision.get();
		if prev.is_some_and(|prev| prev != revision) {
			if let Some(ref mut c) = *state_fit.borrow_mut() {
				c.request_fit();
			}
		}
		revision
	});

	let state_focus = state.clone();
	Effect::new(move |prev: Option<u64>| {
		let (revision, target) = focus.get();
		if prev.is_some_and(|prev| prev != revision) {
			if let (Some(c), Some(point)) = (state_focus.borrow_mut().as_mut(), target) {
				c.request_center(point);
			}
		}
		revision
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *state_md.borrow_mut() {
			c.press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let cursor = match *state_mm.borrow_mut() {
			Some(ref mut c) => {
				c.pointer_move(x, y);
				c.cursor()
			}
			None => return,
		};
		if let Some(canvas) = canvas_ref.get_untracked() {
			let canvas: HtmlCanvasElement = canvas.into();
			// `ElementExt::style` from the leptos prelude shadows the DOM getter.
			let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		// Release the borrow before the host reacts to the event.
		let event = state_mu.borrow_mut().as_mut().and_then(|c| c.release(x, y));
		if let Some(event) = event {
			on_event.run(event);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *state_ml.borrow_mut() {
			c.leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *state_wh.borrow_mut() {
			let step = c.scale.zoom.wheel_step;
			let factor = if ev.delta_y() > 0.0 { 1.0 / step } else { step };
			c.zoom_at(factor, x, y);
		}
	};

	let zoom_button = {
		let state = state.clone();
		move |zoom_in: bool| {
			if let Some(ref mut c) = *state.borrow_mut() {
				let step = c.scale.zoom.button_step;
				c.zoom_centered(if zoom_in { step } else { 1.0 / step });
			}
		}
	};
	let (zoom_in, zoom_out) = (zoom_button.clone(), zoom_button);

	let state_fit_button = state;
	let on_fit = move |_| {
		if let Some(ref mut c) = *state_fit_button.borrow_mut() {
			c.request_fit();
		}
		on_event.run(SurfaceEvent::BackgroundTapped);
	};

	view! {
		<div class="graph-canvas">
			<canvas
				node_ref=canvas_ref
				class="graph-canvas__surface"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="graph-canvas__controls">
				<button title="拡大" on:click=move |_| zoom_in(true)>"+"</button>
				<button title="縮小" on:click=move |_| zoom_out(false)>"−"</button>
				<button title="全体表示" on:click=on_fit>"⤢"</button>
			</div>
		</div>
	}
}
