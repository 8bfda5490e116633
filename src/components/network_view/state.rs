use log::debug;

use super::config::LayoutOptions;
use super::error::NetworkError;
use super::model::NetworkModel;
use super::scale::ViewBox;
use super::simulation::{SeededRandom, Simulation, SimulationParameters};
use super::types::NetworkData;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutPhase {
	Initializing,
	Simulating,
	Settled,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
}

/// Screen-independent endpoints of one link.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkEndpoints {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

/// Everything one mounted network view owns.
pub struct NetworkState {
	pub model: NetworkModel,
	pub simulation: Simulation,
	pub view_box: ViewBox,
	pub drag: DragState,
	phase: LayoutPhase,
	// resolved (source, target) indices, parallel to model.links
	link_indices: Vec<(usize, usize)>,
}

impl NetworkState {
	/// Kinases start at random spots on the canvas, the protein in the middle.
	pub fn new(data: &NetworkData, options: LayoutOptions, seed: u32) -> Result<Self, NetworkError> {
		let options = options.validate()?;
		let model = NetworkModel::build(data, &options)?;
		let view_box = ViewBox::for_ratio(options.ratio);

		let mut rng = SeededRandom::new(seed);
		let root = model.root().id;
		let positions: Vec<(f64, f64)> = model
			.nodes
			.iter()
			.map(|node| {
				if node.id == root {
					view_box.center()
				} else {
					(
						rng.next_f64() * view_box.width,
						rng.next_f64() * view_box.height,
					)
				}
			})
			.collect();

		let link_indices: Vec<(usize, usize)> = model
			.links
			.iter()
			.filter_map(|link| Some((model.index_of(link.source)?, model.index_of(link.target)?)))
			.collect();

		let simulation = Simulation::new(
			SimulationParameters::default().with_size(view_box.width, view_box.height),
			&positions,
			&link_indices,
		)
		.with_rng(rng);

		Ok(Self {
			model,
			simulation,
			view_box,
			drag: DragState::default(),
			phase: LayoutPhase::Initializing,
			link_indices,
		})
	}

	pub fn phase(&self) -> LayoutPhase {
		self.phase
	}

	fn set_phase(&mut self, phase: LayoutPhase) {
		if self.phase != phase {
			debug!("Network layout {:?} -> {:?}", self.phase, phase);
			self.phase = phase;
		}
	}

	pub fn start(&mut self) {
		self.simulation.start();
		self.set_phase(LayoutPhase::Simulating);
	}

	/// Whether another animation frame is needed to keep the layout moving.
	pub fn needs_frame(&self) -> bool {
		self.phase() == LayoutPhase::Simulating
	}

	/// Advance the layout by one tick. Returns whether positions changed.
	pub fn tick(&mut self) -> bool {
		if self.phase != LayoutPhase::Simulating {
			return false;
		}
		let moved = self.simulation.tick();
		if !moved {
			self.set_phase(LayoutPhase::Settled);
		}
		moved
	}

	pub fn node_position(&self, idx: usize) -> Option<(f64, f64)> {
		self.simulation.position(idx)
	}

	pub fn link_endpoints(&self) -> impl Iterator<Item = LinkEndpoints> + '_ {
		self.link_indices.iter().filter_map(|&(s, t)| {
			let ((x1, y1), (x2, y2)) = (self.node_position(s)?, self.node_position(t)?);
			Some(LinkEndpoints { x1, y1, x2, y2 })
		})
	}

	pub fn begin_drag(&mut self, idx: usize, x: f64, y: f64) {
		if idx >= self.simulation.len() {
			return;
		}
		self.drag.active = true;
		self.drag.node_idx = Some(idx);
		self.simulation.pin(idx, x, y);
		self.reheat();
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			return;
		}
		if let Some(idx) = self.drag.node_idx {
			self.simulation.pin(idx, x, y);
			self.reheat();
		}
	}

	/// Let go of the dragged node; it rejoins the free simulation.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx.take() {
			self.simulation.release(idx);
		}
		self.drag.active = false;
	}

	fn reheat(&mut self) {
		self.simulation.resume();
		self.set_phase(LayoutPhase::Simulating);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_view::types::{KinaseInfo, NestedProtein, ProteinInfo};

	fn scenario() -> NetworkData {
		NetworkData {
			protein: ProteinInfo {
				name: "P1".into(),
				mutations_count: 10.0,
			},
			kinases: vec![
				KinaseInfo {
					name: "K1".into(),
					is_group: false,
					protein: None,
					color: None,
				},
				KinaseInfo {
					name: "K2".into(),
					is_group: true,
					protein: Some(NestedProtein { mutations_count: 5.0 }),
					color: Some("#ff7f0e".into()),
				},
			],
		}
	}

	fn run(state: &mut NetworkState) {
		state.start();
		let mut ticks = 0;
		while state.tick() {
			ticks += 1;
			assert!(ticks < 1000);
		}
	}

	#[test]
	fn scenario_builds_three_nodes_and_two_links() {
		let state = NetworkState::new(&scenario(), LayoutOptions::default(), 1).unwrap();
		assert_eq!(state.phase(), LayoutPhase::Initializing);
		assert_eq!(state.model.nodes.len(), 3);
		assert_eq!(state.simulation.len(), 3);
		assert_eq!(state.link_indices, vec![(0, 2), (1, 2)]);
		assert_eq!(state.link_endpoints().count(), 2);
		assert_eq!(state.model.index_of(state.model.root().id), Some(2));
		assert!((state.model.nodes[0].radius - 6.0).abs() < 1e-9);
		assert!((state.model.nodes[1].radius - 16.669).abs() < 1e-3);
	}

	#[test]
	fn root_starts_centred_and_kinases_inside_canvas() {
		let options = LayoutOptions {
			ratio: 0.5,
			..Default::default()
		};
		let state = NetworkState::new(&scenario(), options, 99).unwrap();
		assert_eq!(state.view_box.height, 300.0);
		assert_eq!(state.node_position(2), Some((300.0, 150.0)));
		for idx in 0..2 {
			let (x, y) = state.node_position(idx).unwrap();
			assert!((0.0..600.0).contains(&x));
			assert!((0.0..300.0).contains(&y));
		}
	}

	#[test]
	fn empty_network_settles_without_links() {
		let mut data = scenario();
		data.kinases.clear();
		let mut state = NetworkState::new(&data, LayoutOptions::default(), 3).unwrap();
		assert_eq!(state.model.nodes.len(), 1);
		assert_eq!(state.link_endpoints().count(), 0);
		run(&mut state);
		assert_eq!(state.phase(), LayoutPhase::Settled);
		let (x, y) = state.node_position(0).unwrap();
		assert!(x.is_finite() && y.is_finite());
	}

	#[test]
	fn ticks_only_while_simulating() {
		let mut state = NetworkState::new(&scenario(), LayoutOptions::default(), 5).unwrap();
		assert!(!state.tick());
		run(&mut state);
		assert_eq!(state.phase(), LayoutPhase::Settled);
		assert!(!state.tick());
	}

	#[test]
	fn link_endpoints_track_node_positions() {
		let mut state = NetworkState::new(&scenario(), LayoutOptions::default(), 11).unwrap();
		state.start();
		for _ in 0..10 {
			state.tick();
		}
		let ends: Vec<LinkEndpoints> = state.link_endpoints().collect();
		let root = state.node_position(2).unwrap();
		for (i, end) in ends.iter().enumerate() {
			assert_eq!((end.x1, end.y1), state.node_position(i).unwrap());
			assert_eq!((end.x2, end.y2), root);
		}
	}

	#[test]
	fn dragging_pins_then_releases() {
		let mut state = NetworkState::new(&scenario(), LayoutOptions::default(), 21).unwrap();
		run(&mut state);

		state.begin_drag(0, 40.0, 40.0);
		assert_eq!(state.phase(), LayoutPhase::Simulating);
		state.drag_to(50.0, 45.0);
		for _ in 0..20 {
			state.tick();
		}
		assert_eq!(state.node_position(0), Some((50.0, 45.0)));

		state.end_drag();
		assert!(!state.drag.active);
		for _ in 0..20 {
			state.tick();
		}
		assert_ne!(state.node_position(0), Some((50.0, 45.0)));
	}

	#[test]
	fn frames_stop_when_settled_and_resume_on_drag() {
		let mut state = NetworkState::new(&scenario(), LayoutOptions::default(), 8).unwrap();
		assert!(!state.needs_frame());
		state.start();
		assert!(state.needs_frame());
		run(&mut state);
		assert!(!state.needs_frame());

		state.begin_drag(1, 100.0, 100.0);
		assert!(state.needs_frame());
		state.end_drag();
		run(&mut state);
		assert!(!state.needs_frame());
	}

	#[test]
	fn drag_without_active_node_is_ignored() {
		let mut state = NetworkState::new(&scenario(), LayoutOptions::default(), 2).unwrap();
		state.drag_to(10.0, 10.0);
		state.begin_drag(42, 10.0, 10.0);
		assert!(!state.drag.active);
		assert_eq!(state.phase(), LayoutPhase::Initializing);
	}

	#[test]
	fn invalid_ratio_is_rejected() {
		let options = LayoutOptions {
			ratio: f64::NAN,
			..Default::default()
		};
		assert!(matches!(
			NetworkState::new(&scenario(), options, 0),
			Err(NetworkError::InvalidOption { name: "ratio", .. })
		));
	}
}
