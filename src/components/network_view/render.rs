use wasm_bindgen::JsCast;
use web_sys::{Document, Element, SvgElement, SvgTextContentElement};

use super::error::NetworkError;
use super::model::NetworkNode;
use super::scale::{self, ClientRect, LABEL_REFERENCE_SIZE};
use super::state::NetworkState;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// SVG elements bound to the nodes and links of a [`NetworkState`].
pub struct Scene {
	pub svg: Element,
	links: Vec<Element>,
	nodes: Vec<Element>,
}

impl Scene {
	/// One `<g>` per node, in model order.
	pub fn nodes(&self) -> &[Element] {
		&self.nodes
	}

	pub fn client_rect(&self) -> ClientRect {
		let rect = self.svg.get_bounding_client_rect();
		ClientRect {
			left: rect.left(),
			top: rect.top(),
			width: rect.width(),
			height: rect.height(),
		}
	}
}

fn create(document: &Document, tag: &str) -> Result<Element, NetworkError> {
	document
		.create_element_ns(Some(SVG_NS), tag)
		.map_err(NetworkError::dom)
}

fn set(el: &Element, name: &str, value: &str) -> Result<(), NetworkError> {
	el.set_attribute(name, value).map_err(NetworkError::dom)
}

fn append(parent: &Element, child: &Element) -> Result<(), NetworkError> {
	parent.append_child(child).map(|_| ()).map_err(NetworkError::dom)
}

/// Append the scene to `container` and size every label to its circle.
pub fn build(
	document: &Document,
	container: &Element,
	state: &NetworkState,
) -> Result<Scene, NetworkError> {
	let svg = create(document, "svg")?;
	set(&svg, "viewBox", &state.view_box.attribute())?;
	set(&svg, "preserveAspectRatio", "xMidYMid meet")?;
	set(&svg, "class", "network")?;
	set(&svg, "style", "display: block; width: 100%; height: auto;")?;
	append(container, &svg)?;

	let link_layer = create(document, "g")?;
	set(&link_layer, "class", "links")?;
	append(&svg, &link_layer)?;
	let node_layer = create(document, "g")?;
	set(&node_layer, "class", "nodes")?;
	append(&svg, &node_layer)?;

	let mut links = Vec::with_capacity(state.model.links.len());
	for link in &state.model.links {
		let line = create(document, "line")?;
		set(&line, "class", "link")?;
		set(&line, "stroke-width", &scale::stroke_width(link.weight).to_string())?;
		append(&link_layer, &line)?;
		links.push(line);
	}

	let mut nodes = Vec::with_capacity(state.model.nodes.len());
	for node in &state.model.nodes {
		let group = build_node(document, node)?;
		append(&node_layer, &group)?;
		nodes.push(group);
	}

	// labels can only be measured once they are in the document
	for (group, node) in nodes.iter().zip(&state.model.nodes) {
		if let Some(text) = group.query_selector("text").map_err(NetworkError::dom)? {
			fit_label(&text, node.radius)?;
		}
	}

	let scene = Scene { svg, links, nodes };
	update(&scene, state);
	Ok(scene)
}

fn build_node(document: &Document, node: &NetworkNode) -> Result<Element, NetworkError> {
	let group = create(document, "g")?;
	set(&group, "class", node.kind.class())?;
	set(&group, "data-node", &node.id.to_string())?;

	let title = create(document, "title")?;
	title.set_text_content(Some(&format!(
		"{} ({} mutations)",
		node.name, node.mutations_count
	)));
	append(&group, &title)?;

	let circle = create(document, "circle")?;
	set(&circle, "r", &node.radius.to_string())?;
	if let Some(color) = &node.color {
		set(&circle, "fill", color)?;
	}
	append(&group, &circle)?;

	let text = create(document, "text")?;
	set(&text, "text-anchor", "middle")?;
	set(&text, "dy", "0.35em")?;
	set_font_size(&text, LABEL_REFERENCE_SIZE)?;
	text.set_text_content(Some(&node.name));
	append(&group, &text)?;

	Ok(group)
}

fn set_font_size(text: &Element, px: f64) -> Result<(), NetworkError> {
	let style = text
		.dyn_ref::<SvgElement>()
		.ok_or_else(|| NetworkError::Dom("label is not an SVG element".into()))?
		.style();
	style
		.set_property("font-size", &format!("{}px", px))
		.map_err(NetworkError::dom)
}

/// Measure the label as laid out at the reference size, then shrink it.
fn fit_label(text: &Element, radius: f64) -> Result<(), NetworkError> {
	let length = text
		.dyn_ref::<SvgTextContentElement>()
		.map(|t| t.get_computed_text_length() as f64)
		.unwrap_or(0.0);
	set_font_size(text, scale::label_font_size(radius, length))
}

/// Move links and nodes to the latest simulated positions.
pub fn update(scene: &Scene, state: &NetworkState) {
	for (line, ends) in scene.links.iter().zip(state.link_endpoints()) {
		let _ = line.set_attribute("x1", &ends.x1.to_string());
		let _ = line.set_attribute("y1", &ends.y1.to_string());
		let _ = line.set_attribute("x2", &ends.x2.to_string());
		let _ = line.set_attribute("y2", &ends.y2.to_string());
	}
	for (idx, group) in scene.nodes.iter().enumerate() {
		if let Some((x, y)) = state.node_position(idx) {
			let _ = group.set_attribute("transform", &format!("translate({},{})", x, y));
		}
	}
}
