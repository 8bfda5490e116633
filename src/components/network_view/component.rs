use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use super::config::{LayoutOptions, NetworkConfig};
use super::error::NetworkError;
use super::render::{self, Scene};
use super::state::NetworkState;
use super::types::NetworkData;

type Listener = Closure<dyn FnMut(MouseEvent)>;

/// Shared handles of one mounted view; they live as long as the page does.
#[derive(Clone, Default)]
struct Handles {
	state: Rc<RefCell<Option<NetworkState>>>,
	scene: Rc<RefCell<Option<Scene>>>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	// a frame is pending; cleared when the layout settles
	running: Rc<Cell<bool>>,
	listeners: Rc<RefCell<Vec<Listener>>>,
}

impl Handles {
	/// Restart the frame loop if it went idle.
	fn wake(&self) -> Result<(), NetworkError> {
		if self.running.get() {
			return Ok(());
		}
		if let Some(ref cb) = *self.animate.borrow() {
			web_sys::window()
				.ok_or(NetworkError::NoDocument)?
				.request_animation_frame(cb.as_ref().unchecked_ref())
				.map_err(NetworkError::dom)?;
			self.running.set(true);
		}
		Ok(())
	}
}

fn document() -> Result<Document, NetworkError> {
	web_sys::window()
		.and_then(|w| w.document())
		.ok_or(NetworkError::NoDocument)
}

/// Force-directed view of a protein and the kinases acting on it.
#[component]
pub fn NetworkView(
	/// Protein and kinases to draw; read once when the view mounts.
	#[prop(into)]
	data: Signal<NetworkData>,
	/// Radius and aspect ratio; defaults when omitted.
	#[prop(optional)]
	options: LayoutOptions,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let handles = Handles::default();
	let (failure, set_failure) = signal(None::<String>);

	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		if handles.state.borrow().is_some() {
			return;
		}
		let container: Element = container.into();
		if let Err(err) = start(&container, &data.get_untracked(), options, &handles) {
			error!("Failed to render network: {}", err);
			set_failure.set(Some(err.to_string()));
		}
	});

	view! {
		<div node_ref=container_ref class="network-view">
			{move || failure.get().map(|message| view! { <p class="network-error">{message}</p> })}
		</div>
	}
}

fn start(
	container: &Element,
	data: &NetworkData,
	options: LayoutOptions,
	handles: &Handles,
) -> Result<(), NetworkError> {
	let document = document()?;
	let seed = (js_sys::Math::random() * u32::MAX as f64) as u32;
	let mut state = NetworkState::new(data, options, seed)?;
	let scene = render::build(&document, container, &state)?;
	state.start();

	for (idx, group) in scene.nodes().iter().enumerate() {
		let handles_md = handles.clone();
		let on_mousedown = Listener::new(move |ev: MouseEvent| {
			ev.prevent_default();
			ev.stop_propagation();
			if let (Some(s), Some(sc)) = (
				handles_md.state.borrow_mut().as_mut(),
				handles_md.scene.borrow().as_ref(),
			) {
				let (x, y) =
					s.view_box
						.client_to_view(sc.client_rect(), ev.client_x() as f64, ev.client_y() as f64);
				s.begin_drag(idx, x, y);
				render::update(sc, s);
			}
			if let Err(err) = handles_md.wake() {
				warn!("Could not resume network layout: {}", err);
			}
		});
		group
			.add_event_listener_with_callback("mousedown", on_mousedown.as_ref().unchecked_ref())
			.map_err(NetworkError::dom)?;
		handles.listeners.borrow_mut().push(on_mousedown);
	}

	// Moves and releases are tracked on the window so a fast pointer can
	// leave the node without dropping it.
	let window = web_sys::window().ok_or(NetworkError::NoDocument)?;

	let handles_mm = handles.clone();
	let on_mousemove = Listener::new(move |ev: MouseEvent| {
		if let (Some(s), Some(sc)) = (
			handles_mm.state.borrow_mut().as_mut(),
			handles_mm.scene.borrow().as_ref(),
		) {
			if !s.drag.active {
				return;
			}
			let (x, y) =
				s.view_box
					.client_to_view(sc.client_rect(), ev.client_x() as f64, ev.client_y() as f64);
			s.drag_to(x, y);
			render::update(sc, s);
		}
		if let Err(err) = handles_mm.wake() {
			warn!("Could not resume network layout: {}", err);
		}
	});

	let state_mu = handles.state.clone();
	let on_mouseup = Listener::new(move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.end_drag();
		}
	});

	for (event, listener) in [("mousemove", on_mousemove), ("mouseup", on_mouseup)] {
		window
			.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
			.map_err(NetworkError::dom)?;
		handles.listeners.borrow_mut().push(listener);
	}

	info!(
		"Network view mounted with {} nodes and {} links",
		state.model.nodes.len(),
		state.model.links.len()
	);
	*handles.state.borrow_mut() = Some(state);
	*handles.scene.borrow_mut() = Some(scene);

	let handles_anim = handles.clone();
	*handles.animate.borrow_mut() = Some(Closure::new(move || {
		handles_anim.running.set(false);
		let more = match (
			handles_anim.state.borrow_mut().as_mut(),
			handles_anim.scene.borrow().as_ref(),
		) {
			(Some(s), Some(sc)) => {
				// positions are written by the tick and read back before the frame ends
				if s.tick() {
					render::update(sc, s);
				}
				s.needs_frame()
			}
			_ => false,
		};
		if more {
			if let Err(err) = handles_anim.wake() {
				warn!("Network animation stopped: {}", err);
			}
		}
	}));
	handles.wake()
}

/// Mount a [`NetworkView`] into the single element matching `config.element`.
pub fn mount(config: NetworkConfig) -> Result<(), NetworkError> {
	let options = config.validate()?;
	let matches = document()?
		.query_selector_all(&config.element)
		.map_err(NetworkError::dom)?;
	if matches.length() != 1 {
		return Err(NetworkError::MountPoint {
			selector: config.element,
			count: matches.length(),
		});
	}
	let target: HtmlElement = matches
		.item(0)
		.and_then(|node| node.dyn_into().ok())
		.ok_or_else(|| NetworkError::Dom(format!("`{}` is not an HTML element", config.element)))?;

	info!(
		"Mounting network of {} with {} kinases into `{}`",
		config.data.protein.name,
		config.data.kinases.len(),
		config.element
	);
	let data = config.data;
	leptos::mount::mount_to(target, move || {
		let data = data.clone();
		view! { <NetworkView data=Signal::derive(move || data.clone()) options=options /> }
	})
	.forget();
	Ok(())
}
