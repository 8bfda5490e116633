use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while configuring or mounting a network view.
#[derive(Error, Debug)]
pub enum NetworkError {
	/// The configuration does not match the expected shape.
	#[error("Failed to parse network configuration: {0}")]
	Parse(#[from] serde_json::Error),

	/// `minimalRadius` or `ratio` is zero, negative or not finite.
	#[error("Option `{name}` must be a positive number, got {value}")]
	InvalidOption {
		/// Option key as written in the configuration.
		name: &'static str,
		/// Rejected value.
		value: f64,
	},

	/// A mutation count is negative or not finite.
	#[error("Mutation count of `{name}` must be a non-negative number, got {value}")]
	InvalidMutationCount {
		/// Protein or kinase carrying the count.
		name: String,
		/// Rejected value.
		value: f64,
	},

	/// The mount selector did not match exactly one element.
	#[error("Selector `{selector}` matched {count} elements, expected exactly one")]
	MountPoint {
		/// Selector from the configuration.
		selector: String,
		/// Number of matching elements.
		count: u32,
	},

	/// Not running in a browser window.
	#[error("No browser document available")]
	NoDocument,

	/// A browser API call failed.
	#[error("DOM operation failed: {0}")]
	Dom(String),
}

impl NetworkError {
	pub(crate) fn dom(err: JsValue) -> Self {
		Self::Dom(
			err.as_string()
				.or_else(|| js_sys::JSON::stringify(&err).ok().and_then(|s| s.as_string()))
				.unwrap_or_else(|| "unknown error".into()),
		)
	}
}

impl From<NetworkError> for JsValue {
	fn from(err: NetworkError) -> Self {
		js_sys::Error::new(&err.to_string()).into()
	}
}
