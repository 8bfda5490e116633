use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::NetworkError;
use super::model::NetworkModel;
use super::scale::{DEFAULT_MINIMAL_RADIUS, DEFAULT_RATIO};
use super::types::NetworkData;

/// Layout knobs for one mounted view. Built once and passed by value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOptions {
	/// Radius of a single kinase without mutations.
	pub minimal_radius: f64,
	/// Height over width of the canvas.
	pub ratio: f64,
}

impl Default for LayoutOptions {
	fn default() -> Self {
		Self {
			minimal_radius: DEFAULT_MINIMAL_RADIUS,
			ratio: DEFAULT_RATIO,
		}
	}
}

impl LayoutOptions {
	/// Both values must be positive and finite.
	pub fn validate(self) -> Result<Self, NetworkError> {
		check_positive("minimalRadius", self.minimal_radius)?;
		check_positive("ratio", self.ratio)?;
		Ok(self)
	}
}

fn check_positive(name: &'static str, value: f64) -> Result<(), NetworkError> {
	if value.is_finite() && value > 0.0 {
		Ok(())
	} else {
		Err(NetworkError::InvalidOption { name, value })
	}
}

fn default_minimal_radius() -> f64 {
	DEFAULT_MINIMAL_RADIUS
}

fn default_ratio() -> f64 {
	DEFAULT_RATIO
}

/// Everything the embedding page hands to `init`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
	/// CSS selector of the mount point.
	pub element: String,
	/// Protein and kinases to draw.
	pub data: NetworkData,
	/// `minimalRadius`, see [`LayoutOptions::minimal_radius`].
	#[serde(default = "default_minimal_radius")]
	pub minimal_radius: f64,
	/// `ratio`, see [`LayoutOptions::ratio`].
	#[serde(default = "default_ratio")]
	pub ratio: f64,
	/// Keys this view does not understand; accepted and otherwise ignored.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl NetworkConfig {
	/// Parse and validate the JSON form of the `init` argument.
	pub fn from_json(json: &str) -> Result<Self, NetworkError> {
		let config: Self = serde_json::from_str(json)?;
		for key in config.extra.keys() {
			debug!("Ignoring unrecognized network option `{}`", key);
		}
		config.validate()?;
		Ok(config)
	}

	/// Options, after checking them and every mutation count in `data`.
	pub fn validate(&self) -> Result<LayoutOptions, NetworkError> {
		let options = self.options()?;
		NetworkModel::build(&self.data, &options)?;
		Ok(options)
	}

	/// Layout options with defaults applied, checked for positivity.
	pub fn options(&self) -> Result<LayoutOptions, NetworkError> {
		LayoutOptions {
			minimal_radius: self.minimal_radius,
			ratio: self.ratio,
		}
		.validate()
	}
}
