//! Graph payload records returned by the path server.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

/// Identifier of a node. The server may send either numbers or strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
	/// Numeric id, e.g. `{"id": 3}`.
	Number(i64),
	/// String id, e.g. `{"id": "Astronomy"}`.
	Text(String),
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeId::Number(n) => write!(f, "{n}"),
			NodeId::Text(s) => f.write_str(s),
		}
	}
}

/// Colour group of a node.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NodeGroup {
	/// Numbered group.
	Index(u64),
	/// Named group.
	Name(String),
}

impl NodeGroup {
	/// Maps the group onto a palette of `len` colours.
	pub fn palette_index(&self, len: usize) -> usize {
		if len == 0 {
			return 0;
		}
		match self {
			NodeGroup::Index(i) => (*i % len as u64) as usize,
			NodeGroup::Name(name) => name
				.bytes()
				.fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
				% len,
		}
	}
}

/// A single node of the payload. Only `id` is required.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	pub id: NodeId,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default)]
	pub x: Option<f64>,
	#[serde(default)]
	pub y: Option<f64>,
	/// Pinned in place.
	#[serde(default)]
	pub fixed: Option<bool>,
	/// `false` keeps the node out of the simulation.
	#[serde(default)]
	pub physics: Option<bool>,
	#[serde(default)]
	pub mass: Option<f32>,
	#[serde(default)]
	pub group: Option<NodeGroup>,
	#[serde(default)]
	pub color: Option<String>,
}

impl GraphNode {
	/// A bare node carrying only its id.
	pub fn new(id: NodeId) -> Self {
		Self {
			id,
			label: None,
			x: None,
			y: None,
			fixed: None,
			physics: None,
			mass: None,
			group: None,
			color: None,
		}
	}

	/// Whether the simulation must leave this node where it is.
	pub fn is_pinned(&self) -> bool {
		self.fixed.unwrap_or(false) || !self.physics.unwrap_or(true)
	}
}

/// Which ends of an edge carry an arrow head.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArrowHeads {
	pub to: bool,
	pub from: bool,
}

/// A directed connection between two nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphEdge {
	pub from: NodeId,
	pub to: NodeId,
	/// Arrow ends such as `"to"` or `"to, from"`.
	#[serde(default)]
	pub arrows: Option<String>,
}

impl GraphEdge {
	/// Parses the `arrows` string. Unknown parts such as `middle` are ignored.
	pub fn arrow_heads(&self) -> ArrowHeads {
		let mut heads = ArrowHeads::default();
		let Some(arrows) = &self.arrows else {
			return heads;
		};
		for part in arrows.split([',', ' ']).filter(|p| !p.is_empty()) {
			match part {
				"to" => heads.to = true,
				"from" => heads.from = true,
				_ => {}
			}
		}
		heads
	}
}

/// The `{ "nodes": [...], "edges": [...] }` body of a graph response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphPayload {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

impl GraphPayload {
	/// Rejects duplicate node ids and edges pointing at unknown nodes.
	pub fn validate(&self) -> Result<(), String> {
		let mut seen = HashSet::with_capacity(self.nodes.len());
		for node in &self.nodes {
			if !seen.insert(&node.id) {
				return Err(format!("duplicate node id {}", node.id));
			}
		}
		for edge in &self.edges {
			for end in [&edge.from, &edge.to] {
				if !seen.contains(end) {
					return Err(format!(
						"edge {} -> {} references unknown node {}",
						edge.from, edge.to, end
					));
				}
			}
		}
		Ok(())
	}
}
