//! Page-level configuration read from a JSON data island.

use std::str::FromStr;

use log::Level;
use serde::Deserialize;
use thiserror::Error;

/// Id of the `<script type="application/json">` element holding the config.
pub const CONFIG_ELEMENT_ID: &str = "viewer-config";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid viewer config: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Endpoints, element ids and the selectable page names.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
	/// Endpoint answering `?from=&to=` path lookups.
	pub path_endpoint: String,
	/// Endpoint returning the whole graph.
	pub network_endpoint: String,
	pub from_list_id: String,
	pub to_list_id: String,
	/// Element the network is mounted into.
	pub container_id: String,
	/// Page names offered by both selection lists.
	pub choices: Vec<String>,
	pub log_level: String,
}

impl Default for ViewerConfig {
	fn default() -> Self {
		Self {
			path_endpoint: "/path".into(),
			network_endpoint: "/network".into(),
			from_list_id: "list1".into(),
			to_list_id: "list2".into(),
			container_id: "mynetwork".into(),
			choices: Vec::new(),
			log_level: "debug".into(),
		}
	}
}

impl ViewerConfig {
	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(text)?)
	}

	/// Reads the data island from the current document. A page without one
	/// gets the defaults.
	pub fn load() -> Result<Self, ConfigError> {
		let text = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|el| el.text_content());
		match text {
			Some(text) => Self::from_json(&text),
			None => Ok(Self::default()),
		}
	}

	/// Parsed `log_level`; unknown names mean `Debug`.
	pub fn level(&self) -> Level {
		Level::from_str(&self.log_level).unwrap_or(Level::Debug)
	}
}
