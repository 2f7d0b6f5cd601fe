use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::options::{SmoothKind, SmoothOptions};
use crate::graph::{ArrowHeads, GraphPayload, NodeId};

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const NODE_RADIUS: f64 = 6.0;
pub const HIT_RADIUS: f64 = 12.0;
const NODE_MASS: f32 = 10.0;
const LAYOUT_RADIUS: f64 = 150.0;
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: NodeId,
	pub label: Option<String>,
	pub color: String,
}

#[derive(Clone, Copy, Debug)]
pub struct EdgeLink {
	pub from: DefaultNodeIdx,
	pub to: DefaultNodeIdx,
	pub arrows: ArrowHeads,
}

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

/// What the pointer is currently dragging, if anything.
#[derive(Clone, Copy, Debug, Default)]
enum Grab {
	#[default]
	None,
	Node {
		idx: DefaultNodeIdx,
		start: (f64, f64),
		node_start: (f32, f32),
	},
	Pan {
		start: (f64, f64),
		origin: (f64, f64),
	},
}

#[derive(Clone, Debug, Default)]
pub struct Hover {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	/// Eased highlight strength in `[0, 1]`.
	pub t: f64,
}

pub struct NetworkState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<EdgeLink>,
	pub transform: ViewTransform,
	pub hover: Hover,
	pub width: f64,
	pub height: f64,
	grab: Grab,
}

impl NetworkState {
	pub fn new(payload: &GraphPayload, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::with_capacity(payload.nodes.len());
		let count = payload.nodes.len().max(1) as f64;

		for (i, node) in payload.nodes.iter().enumerate() {
			let color = node.color.clone().unwrap_or_else(|| {
				let slot = node
					.group
					.as_ref()
					.map(|g| g.palette_index(COLORS.len()))
					.unwrap_or(0);
				COLORS[slot].to_string()
			});
			let angle = i as f64 * 2.0 * PI / count;
			let x = node.x.unwrap_or(LAYOUT_RADIUS * angle.cos());
			let y = node.y.unwrap_or(LAYOUT_RADIUS * angle.sin());

			let idx = graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: NODE_MASS * node.mass.unwrap_or(1.0),
				is_anchor: node.is_pinned(),
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color,
				},
			});
			id_to_idx.insert(&node.id, idx);
		}

		let mut edges = Vec::with_capacity(payload.edges.len());
		for edge in &payload.edges {
			let (Some(&from), Some(&to)) = (id_to_idx.get(&edge.from), id_to_idx.get(&edge.to))
			else {
				continue;
			};
			if from != to {
				graph.add_edge(from, to, EdgeData::default());
			}
			edges.push(EdgeLink {
				from,
				to,
				arrows: edge.arrow_heads(),
			});
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			hover: Hover::default(),
			width,
			height,
			grab: Grab::None,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut out = HashMap::new();
		self.graph.visit_nodes(|node| {
			out.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		out
	}

	pub fn node_at(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = Some((node.x(), node.y()));
			}
		});
		pos
	}

	pub fn is_pinned(&self, idx: DefaultNodeIdx) -> bool {
		let mut pinned = false;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pinned = node.data.is_anchor;
			}
		});
		pinned
	}

	/// Starts dragging the node under the pointer, or panning if there is none.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		self.grab = match self.node_at(x, y) {
			Some(idx) => Grab::Node {
				idx,
				start: (x, y),
				node_start: self.node_position(idx).unwrap_or_default(),
			},
			None => Grab::Pan {
				start: (x, y),
				origin: (self.transform.x, self.transform.y),
			},
		};
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		match self.grab {
			Grab::None => {
				let hovered = self.node_at(x, y);
				self.set_hover(hovered);
			}
			Grab::Node {
				idx,
				start,
				node_start,
			} => {
				let k = self.transform.k;
				let nx = node_start.0 + ((x - start.0) / k) as f32;
				let ny = node_start.1 + ((y - start.1) / k) as f32;
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
			Grab::Pan { start, origin } => {
				self.transform.x = origin.0 + (x - start.0);
				self.transform.y = origin.1 + (y - start.1);
			}
		}
	}

	pub fn pointer_up(&mut self) {
		self.grab = Grab::None;
	}

	pub fn pointer_leave(&mut self) {
		self.grab = Grab::None;
		self.set_hover(None);
	}

	/// Zooms around the screen point `(x, y)`.
	pub fn zoom_at(&mut self, x: f64, y: f64, zoom_in: bool) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = k;
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.neighbors.clear();
		if let Some(idx) = node {
			for link in &self.edges {
				if link.from == idx {
					self.hover.neighbors.insert(link.to);
				} else if link.to == idx {
					self.hover.neighbors.insert(link.from);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.neighbors.contains(&idx)
	}

	/// Advances the highlight fade and, when `physics` is on, the simulation.
	pub fn tick(&mut self, dt: f32, physics: bool) {
		if physics {
			self.graph.update(dt);
		}
		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.t += (target - self.hover.t) * (6.0 * dt as f64).min(1.0);
		if self.hover.t < 0.01 && target == 0.0 {
			self.hover.t = 0.0;
		}
	}

	/// Follows a container size change, keeping the view centred on the same
	/// graph point.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

/// Control point of the quadratic curve drawn between `from` and `to`, or
/// `None` for a straight line.
pub fn control_point(from: (f64, f64), to: (f64, f64), smooth: &SmoothOptions) -> Option<(f64, f64)> {
	if !smooth.enabled || smooth.roundness <= 0.0 {
		return None;
	}
	let r = smooth.roundness.min(1.0);
	let (dx, dy) = (to.0 - from.0, to.1 - from.1);
	match smooth.kind {
		SmoothKind::Continuous => {
			// Bend toward the dominant axis, never past the target on either axis.
			let reach = r * dx.abs().max(dy.abs());
			let cx = from.0 + reach * dx.signum();
			let cy = from.1 + reach * dy.signum();
			Some((
				cx.clamp(from.0.min(to.0), from.0.max(to.0)),
				cy.clamp(from.1.min(to.1), from.1.max(to.1)),
			))
		}
		SmoothKind::CurvedCw | SmoothKind::CurvedCcw => {
			let sign = if smooth.kind == SmoothKind::CurvedCw { 1.0 } else { -1.0 };
			let (mx, my) = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
			// Perpendicular of the chord, scaled by its length.
			Some((mx - dy * r * 0.5 * sign, my + dx * r * 0.5 * sign))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphEdge, GraphNode};

	fn node(id: i64) -> GraphNode {
		GraphNode::new(NodeId::Number(id))
	}

	fn edge(from: i64, to: i64) -> GraphEdge {
		GraphEdge {
			from: NodeId::Number(from),
			to: NodeId::Number(to),
			arrows: Some("to".into()),
		}
	}

	fn sample() -> GraphPayload {
		let mut fixed = node(1);
		fixed.x = Some(0.0);
		fixed.y = Some(0.0);
		fixed.fixed = Some(true);
		let mut drag_me = node(2);
		drag_me.x = Some(150.0);
		drag_me.y = Some(130.0);
		drag_me.physics = Some(false);
		let mut obstacle = node(3);
		obstacle.mass = Some(10.0);
		GraphPayload {
			nodes: vec![fixed, drag_me, obstacle],
			edges: vec![edge(1, 2), edge(2, 3)],
		}
	}

	#[test]
	fn honours_positions_and_pins() {
		let state = NetworkState::new(&sample(), 800.0, 600.0);
		let mut seen = 0;
		state.graph.visit_nodes(|n| {
			match n.data.user_data.id {
				NodeId::Number(1) => {
					assert_eq!((n.x(), n.y()), (0.0, 0.0));
					assert!(n.data.is_anchor);
				}
				NodeId::Number(2) => {
					assert_eq!((n.x(), n.y()), (150.0, 130.0));
					assert!(n.data.is_anchor);
				}
				_ => {
					assert!(!n.data.is_anchor);
					assert_eq!(n.data.mass, 100.0);
				}
			}
			seen += 1;
		});
		assert_eq!(seen, 3);
		assert_eq!(state.edges.len(), 2);
		assert!(state.edges.iter().all(|e| e.arrows.to && !e.arrows.from));
	}

	#[test]
	fn unknown_edge_endpoints_are_skipped() {
		let payload = GraphPayload {
			nodes: vec![node(1)],
			edges: vec![edge(1, 7)],
		};
		let state = NetworkState::new(&payload, 100.0, 100.0);
		assert!(state.edges.is_empty());
	}

	#[test]
	fn hovering_collects_neighbors() {
		let mut state = NetworkState::new(&sample(), 800.0, 600.0);
		// node 2 sits at graph (150, 130); origin is the canvas centre
		state.pointer_move(400.0 + 150.0, 300.0 + 130.0);
		let hovered = state.hover.node.expect("node 2 under pointer");
		assert_eq!(state.hover.neighbors.len(), 2);
		assert!(state.is_highlighted(hovered));

		state.pointer_leave();
		assert!(state.hover.node.is_none());
		assert!(state.hover.neighbors.is_empty());
	}

	#[test]
	fn dragging_moves_and_pins_node() {
		let mut state = NetworkState::new(&sample(), 800.0, 600.0);
		let before = state.positions();
		let obstacle = state
			.edges
			.iter()
			.map(|e| e.to)
			.find(|idx| !state.is_pinned(*idx))
			.expect("obstacle is free");
		let (ox, oy) = before[&obstacle];

		state.pointer_down(400.0 + ox, 300.0 + oy);
		state.pointer_move(400.0 + ox + 20.0, 300.0 + oy - 10.0);
		state.pointer_up();

		let (nx, ny) = state.node_position(obstacle).unwrap();
		assert!((nx as f64 - (ox + 20.0)).abs() < 1e-3);
		assert!((ny as f64 - (oy - 10.0)).abs() < 1e-3);
		assert!(state.is_pinned(obstacle));
	}

	#[test]
	fn background_drag_pans() {
		let mut state = NetworkState::new(&sample(), 800.0, 600.0);
		state.pointer_down(10.0, 10.0);
		state.pointer_move(30.0, 5.0);
		state.pointer_up();
		assert_eq!((state.transform.x, state.transform.y), (420.0, 295.0));
	}

	#[test]
	fn zoom_is_clamped() {
		let mut state = NetworkState::new(&GraphPayload::default(), 800.0, 600.0);
		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, true);
		}
		assert_eq!(state.transform.k, MAX_ZOOM);
		for _ in 0..200 {
			state.zoom_at(0.0, 0.0, false);
		}
		assert_eq!(state.transform.k, MIN_ZOOM);
	}

	#[test]
	fn frozen_physics_keeps_free_nodes_still() {
		let mut state = NetworkState::new(&sample(), 800.0, 600.0);
		let before = state.positions();
		state.tick(0.016, false);
		assert_eq!(before, state.positions());
	}

	#[test]
	fn resize_keeps_centre_point() {
		let mut state = NetworkState::new(&sample(), 800.0, 600.0);
		state.pointer_down(10.0, 10.0);
		state.pointer_move(60.0, 30.0);
		state.pointer_up();
		let centre = state.screen_to_graph(400.0, 300.0);

		state.resize(1000.0, 500.0);
		assert_eq!((state.width, state.height), (1000.0, 500.0));
		assert_eq!(state.screen_to_graph(500.0, 250.0), centre);
	}

	#[test]
	fn straight_when_smoothing_disabled() {
		let smooth = SmoothOptions {
			enabled: false,
			..Default::default()
		};
		assert_eq!(control_point((0.0, 0.0), (10.0, 0.0), &smooth), None);
	}

	#[test]
	fn continuous_stays_inside_bounding_box() {
		let smooth = SmoothOptions::default();
		let (cx, cy) = control_point((0.0, 0.0), (100.0, 20.0), &smooth).unwrap();
		assert_eq!((cx, cy), (50.0, 20.0));
		let (cx, cy) = control_point((0.0, 0.0), (-10.0, -100.0), &smooth).unwrap();
		assert_eq!((cx, cy), (-10.0, -50.0));
	}

	#[test]
	fn curved_kinds_bow_opposite_ways() {
		let cw = SmoothOptions {
			kind: SmoothKind::CurvedCw,
			..Default::default()
		};
		let ccw = SmoothOptions {
			kind: SmoothKind::CurvedCcw,
			..Default::default()
		};
		let a = control_point((0.0, 0.0), (100.0, 0.0), &cw).unwrap();
		let b = control_point((0.0, 0.0), (100.0, 0.0), &ccw).unwrap();
		assert_eq!(a, (50.0, 25.0));
		assert_eq!(b, (50.0, -25.0));
	}
}
