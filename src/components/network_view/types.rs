use serde::{Deserialize, Serialize};

/// The central protein every kinase links to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProteinInfo {
	/// Label drawn in the central node.
	pub name: String,
	/// Observed mutations; drives the node radius.
	pub mutations_count: f64,
}

/// Protein record nested under a kinase; only its mutation burden is used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NestedProtein {
	/// Observed mutations of the kinase's protein.
	pub mutations_count: f64,
}

/// A kinase, or a group of kinases, acting on the central protein.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KinaseInfo {
	/// Label drawn in the node.
	pub name: String,
	/// Groups get twice the base radius.
	#[serde(default)]
	pub is_group: bool,
	/// Protein behind the kinase, when known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub protein: Option<NestedProtein>,
	/// Fill colour overriding the stylesheet.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
}

impl KinaseInfo {
	/// Mutations of the underlying protein, zero for kinases without one.
	pub fn mutations_count(&self) -> f64 {
		self.protein.as_ref().map_or(0.0, |p| p.mutations_count)
	}
}

/// Network representation as served by the protein network endpoint.
///
/// Extra fields of that payload (`sites`, `kinase_groups`, ...) are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkData {
	/// Hub of the network.
	pub protein: ProteinInfo,
	/// One node and one link each, in this order.
	pub kinases: Vec<KinaseInfo>,
}
