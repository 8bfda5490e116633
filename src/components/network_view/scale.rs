//! Geometry shared by the layout and the SVG scene: canvas size, node radii,
//! label sizing and the `viewBox` coordinate mapping.

/// Logical width of the canvas in `viewBox` units.
pub const CANVAS_WIDTH: f64 = 600.0;
pub const DEFAULT_MINIMAL_RADIUS: f64 = 6.0;
pub const DEFAULT_RATIO: f64 = 1.0;

/// Font size labels are first laid out at before being measured.
pub const LABEL_REFERENCE_SIZE: f64 = 24.0;
/// Horizontal room a label leaves free inside its circle.
pub const LABEL_MARGIN: f64 = 8.0;

const MUTATION_SCALE: f64 = 6.0;

pub fn canvas_height(ratio: f64) -> f64 {
	CANVAS_WIDTH * ratio
}

/// Node radius: a base size (doubled for groups) grown logarithmically with
/// the mutation count, so heavily mutated proteins do not swamp the canvas.
pub fn node_radius(minimal_radius: f64, mutations_count: f64, is_group: bool) -> f64 {
	let base = if is_group { 2.0 } else { 1.0 } * minimal_radius;
	base + MUTATION_SCALE * (mutations_count + 1.0).log10()
}

/// Font size (px) for a label whose length, measured at
/// [`LABEL_REFERENCE_SIZE`], is `text_length`.
///
/// Never exceeds the circle diameter; longer labels shrink proportionally so
/// they fit the diameter minus [`LABEL_MARGIN`].
pub fn label_font_size(radius: f64, text_length: f64) -> f64 {
	let diameter = 2.0 * radius;
	if text_length <= 0.0 {
		return diameter;
	}
	let fitted = (diameter - LABEL_MARGIN) / text_length * LABEL_REFERENCE_SIZE;
	diameter.min(fitted).max(0.0)
}

pub fn stroke_width(weight: f64) -> f64 {
	weight.sqrt()
}

/// Client-space rectangle an `<svg>` occupies on the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClientRect {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

/// A `0 0 width height` viewBox rendered with `xMidYMid meet`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
	pub width: f64,
	pub height: f64,
}

impl ViewBox {
	pub fn for_ratio(ratio: f64) -> Self {
		Self {
			width: CANVAS_WIDTH,
			height: canvas_height(ratio),
		}
	}

	pub fn attribute(&self) -> String {
		format!("0 0 {} {}", self.width, self.height)
	}

	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Map a pointer position in client pixels to viewBox units.
	pub fn client_to_view(&self, rect: ClientRect, client_x: f64, client_y: f64) -> (f64, f64) {
		let k = (rect.width / self.width).min(rect.height / self.height);
		if k.is_nan() || k <= 0.0 {
			return self.center();
		}
		// meet letterboxes the shorter axis, centred
		let (ox, oy) = (
			(rect.width - self.width * k) / 2.0,
			(rect.height - self.height * k) / 2.0,
		);
		(
			(client_x - rect.left - ox) / k,
			(client_y - rect.top - oy) / k,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPS: f64 = 1e-9;

	#[test]
	fn zero_mutations_gives_minimal_radius() {
		assert!((node_radius(6.0, 0.0, false) - 6.0).abs() < EPS);
		assert!((node_radius(6.0, 0.0, true) - 12.0).abs() < EPS);
		assert!((node_radius(3.5, 0.0, false) - 3.5).abs() < EPS);
	}

	#[test]
	fn radius_is_bounded_below_and_monotonic() {
		for minimal in [1.0, 6.0, 10.0] {
			let mut prev_single = 0.0;
			let mut prev_group = 0.0;
			for m in [0.0, 0.5, 1.0, 5.0, 9.0, 99.0, 1000.0, 1e6] {
				let single = node_radius(minimal, m, false);
				let group = node_radius(minimal, m, true);
				assert!(single >= minimal);
				assert!(group >= 2.0 * minimal);
				assert!(single >= prev_single);
				assert!(group >= prev_group);
				prev_single = single;
				prev_group = group;
			}
		}
	}

	#[test]
	fn group_radius_matches_worked_example() {
		let r = node_radius(6.0, 5.0, true);
		assert!((r - (12.0 + 6.0 * 6f64.log10())).abs() < EPS);
		assert!((r - 16.669).abs() < 1e-3);
	}

	#[test]
	fn font_size_never_exceeds_diameter() {
		for r in [4.0, 6.0, 16.67, 40.0] {
			for len in [0.0, 1.0, 5.0, 20.0, 80.0, 400.0] {
				assert!(label_font_size(r, len) <= 2.0 * r + EPS);
			}
		}
	}

	#[test]
	fn font_size_shrinks_with_longer_labels() {
		let r = 20.0;
		let sizes: Vec<f64> = [10.0, 30.0, 60.0, 120.0]
			.iter()
			.map(|&len| label_font_size(r, len))
			.collect();
		assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
		assert!(sizes[3] < sizes[0]);
		// (40 - 8) / 120 * 24
		assert!((sizes[3] - 6.4).abs() < EPS);
	}

	#[test]
	fn font_size_is_never_negative_for_tiny_circles() {
		assert_eq!(label_font_size(2.0, 50.0), 0.0);
	}

	#[test]
	fn height_follows_ratio() {
		for ratio in [0.25, 0.5, 1.0, 1.5, 3.0] {
			assert!((canvas_height(ratio) - CANVAS_WIDTH * ratio).abs() < EPS);
		}
		assert_eq!(ViewBox::for_ratio(0.5).attribute(), "0 0 600 300");
	}

	#[test]
	fn stroke_width_is_sqrt_of_weight() {
		assert_eq!(stroke_width(1.0), 1.0);
		assert_eq!(stroke_width(4.0), 2.0);
	}

	#[test]
	fn client_to_view_handles_letterboxing() {
		let vb = ViewBox::for_ratio(1.0);
		// 1200x800 box: scale 800/600, 200px bars left and right
		let rect = ClientRect {
			left: 10.0,
			top: 20.0,
			width: 1200.0,
			height: 800.0,
		};
		let (x, y) = vb.client_to_view(rect, 10.0 + 200.0, 20.0);
		assert!(x.abs() < EPS && y.abs() < EPS);
		let (x, y) = vb.client_to_view(rect, 10.0 + 600.0, 20.0 + 400.0);
		assert!((x - 300.0).abs() < EPS && (y - 300.0).abs() < EPS);
	}

	#[test]
	fn client_to_view_falls_back_to_center_for_empty_rect() {
		let vb = ViewBox::for_ratio(2.0);
		let rect = ClientRect {
			left: 0.0,
			top: 0.0,
			width: 0.0,
			height: 0.0,
		};
		assert_eq!(vb.client_to_view(rect, 5.0, 5.0), (300.0, 600.0));
	}
}
