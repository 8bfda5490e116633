use std::fmt;

use super::config::LayoutOptions;
use super::error::NetworkError;
use super::scale::node_radius;
use super::types::NetworkData;

/// Stable identifier of a node within one view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "node-{}", self.0)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	Protein,
	Kinase,
	KinaseGroup,
}

impl NodeKind {
	/// CSS class of the node's `<g>`.
	pub fn class(self) -> &'static str {
		match self {
			NodeKind::Protein => "node protein",
			NodeKind::Kinase => "node kinase",
			NodeKind::KinaseGroup => "node kinase group",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NetworkNode {
	pub id: NodeId,
	pub name: String,
	pub kind: NodeKind,
	pub mutations_count: f64,
	pub radius: f64,
	pub color: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetworkLink {
	pub source: NodeId,
	pub target: NodeId,
	pub weight: f64,
}

/// Nodes and links derived from the input data.
///
/// Kinases keep their input order and the protein is appended last. The input
/// itself is left untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkModel {
	pub nodes: Vec<NetworkNode>,
	pub links: Vec<NetworkLink>,
}

impl NetworkModel {
	pub fn build(data: &NetworkData, options: &LayoutOptions) -> Result<Self, NetworkError> {
		let mut nodes = Vec::with_capacity(data.kinases.len() + 1);

		for (i, kinase) in data.kinases.iter().enumerate() {
			let mutations_count = checked_count(&kinase.name, kinase.mutations_count())?;
			nodes.push(NetworkNode {
				id: NodeId(i as u32),
				name: kinase.name.clone(),
				kind: if kinase.is_group {
					NodeKind::KinaseGroup
				} else {
					NodeKind::Kinase
				},
				mutations_count,
				radius: node_radius(options.minimal_radius, mutations_count, kinase.is_group),
				color: kinase.color.clone(),
			});
		}

		let root = NodeId(nodes.len() as u32);
		let mutations_count = checked_count(&data.protein.name, data.protein.mutations_count)?;
		nodes.push(NetworkNode {
			id: root,
			name: data.protein.name.clone(),
			kind: NodeKind::Protein,
			mutations_count,
			radius: node_radius(options.minimal_radius, mutations_count, false),
			color: None,
		});

		let links = nodes[..nodes.len() - 1]
			.iter()
			.map(|kinase| NetworkLink {
				source: kinase.id,
				target: root,
				weight: 1.0,
			})
			.collect();

		Ok(Self { nodes, links })
	}

	pub fn root(&self) -> &NetworkNode {
		// build() always appends the protein
		&self.nodes[self.nodes.len() - 1]
	}

	pub fn index_of(&self, id: NodeId) -> Option<usize> {
		self.nodes.iter().position(|n| n.id == id)
	}
}

fn checked_count(name: &str, value: f64) -> Result<f64, NetworkError> {
	if value.is_finite() && value >= 0.0 {
		Ok(value)
	} else {
		Err(NetworkError::InvalidMutationCount {
			name: name.to_string(),
			value,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_view::types::{KinaseInfo, NestedProtein, ProteinInfo};

	fn kinase(name: &str, is_group: bool, mutations: Option<f64>) -> KinaseInfo {
		KinaseInfo {
			name: name.into(),
			is_group,
			protein: mutations.map(|m| NestedProtein { mutations_count: m }),
			color: None,
		}
	}

	fn sample() -> NetworkData {
		NetworkData {
			protein: ProteinInfo {
				name: "P1".into(),
				mutations_count: 10.0,
			},
			kinases: vec![kinase("K1", false, None), kinase("K2", true, Some(5.0))],
		}
	}

	#[test]
	fn root_is_appended_after_kinases() {
		let data = sample();
		let model = NetworkModel::build(&data, &LayoutOptions::default()).unwrap();

		assert_eq!(model.nodes.len(), 3);
		assert_eq!(model.links.len(), 2);
		assert_eq!(model.root().name, "P1");
		assert_eq!(model.root().kind, NodeKind::Protein);
		for link in &model.links {
			assert_eq!(model.index_of(link.target), Some(2));
			assert_eq!(link.weight, 1.0);
		}
		// caller's data is not extended with the root
		assert_eq!(data, sample());
		assert_eq!(data.kinases.len(), 2);
	}

	#[test]
	fn radii_follow_mutation_counts() {
		let model = NetworkModel::build(&sample(), &LayoutOptions::default()).unwrap();
		assert!((model.nodes[0].radius - 6.0).abs() < 1e-9);
		assert!((model.nodes[1].radius - (12.0 + 6.0 * 6f64.log10())).abs() < 1e-9);
		assert!((model.root().radius - (6.0 + 6.0 * 11f64.log10())).abs() < 1e-9);
		assert_eq!(model.nodes[1].kind, NodeKind::KinaseGroup);
	}

	#[test]
	fn empty_kinases_yield_lone_root() {
		let mut data = sample();
		data.kinases.clear();
		let model = NetworkModel::build(&data, &LayoutOptions::default()).unwrap();
		assert_eq!(model.nodes.len(), 1);
		assert!(model.links.is_empty());
		assert_eq!(model.root().id, NodeId(0));
	}

	#[test]
	fn ids_are_unique() {
		let model = NetworkModel::build(&sample(), &LayoutOptions::default()).unwrap();
		let mut ids: Vec<NodeId> = model.nodes.iter().map(|n| n.id).collect();
		ids.sort();
		ids.dedup();
		assert_eq!(ids.len(), model.nodes.len());
	}

	#[test]
	fn negative_mutation_count_is_rejected() {
		let mut data = sample();
		data.kinases[0] = kinase("Bad", false, Some(-3.0));
		match NetworkModel::build(&data, &LayoutOptions::default()) {
			Err(NetworkError::InvalidMutationCount { name, value }) => {
				assert_eq!(name, "Bad");
				assert_eq!(value, -3.0);
			}
			other => panic!("unexpected {:?}", other),
		}
	}
}
