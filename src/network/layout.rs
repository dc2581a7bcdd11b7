//! Presentation-only node placement: simulation, drag, pan and zoom.
//!
//! Positions live here and nowhere else. A new mission generation throws them
//! away; expanding or collapsing within a generation keeps what is on screen.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::icons::DEFAULT_ICON_COLOR;
use super::model::{Mission, NodeId};

pub const HIT_RADIUS: f64 = 20.0;
const CHILD_DISTANCE: f64 = 110.0;

const STATUS_HOSTILE: &str = "#ff0000";

fn status_color(status: &str) -> &'static str {
	match status.to_ascii_lowercase().as_str() {
		"compromised" | "owned" => STATUS_HOSTILE,
		_ => DEFAULT_ICON_COLOR,
	}
}

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub node: usize,
	pub id: NodeId,
	pub kind: String,
	pub label: String,
	pub color: &'static str,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

pub struct LayoutState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	generation: u64,
	shown: Vec<usize>,
	pinned: HashSet<NodeId>,
}

fn simulation() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 400.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl LayoutState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			graph: simulation(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			flow_time: 0.0,
			generation: 0,
			shown: Vec::new(),
			pinned: HashSet::new(),
		}
	}

	#[cfg(test)]
	pub fn node_count(&self) -> usize {
		let mut count = 0;
		self.graph.visit_nodes(|_| count += 1);
		count
	}

	/// Graph-space position of an arena node, if it is laid out.
	#[cfg(test)]
	pub fn position_of(&self, node: usize) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|n| {
			if n.data.user_data.node == node {
				found = Some((n.x() as f64, n.y() as f64));
			}
		});
		found
	}

	/// Brings the simulation in line with the mission's shown nodes. Rebuilds
	/// from scratch on a new generation.
	pub fn sync(&mut self, mission: Option<&Mission>, generation: u64) {
		let shown: Vec<usize> = mission.map(|m| m.shown().collect()).unwrap_or_default();
		if generation == self.generation && shown == self.shown {
			return;
		}

		let mut kept: HashMap<NodeId, (f32, f32)> = HashMap::new();
		if generation == self.generation {
			self.graph.visit_nodes(|n| {
				kept.insert(n.data.user_data.id.clone(), (n.x(), n.y()));
			});
		} else {
			self.pinned.clear();
		}

		self.graph = simulation();
		self.drag = DragState::default();
		self.generation = generation;
		self.shown = shown;
		let Some(mission) = mission else {
			return;
		};

		let mut placed: HashMap<usize, (DefaultNodeIdx, f32, f32)> = HashMap::new();
		for &i in &self.shown {
			let Some(node) = mission.node(i) else {
				continue;
			};
			let (x, y) = kept.get(&node.id).copied().unwrap_or_else(|| {
				match node.parent.and_then(|p| placed.get(&p).map(|e| (p, e))) {
					Some((p, &(_, px, py))) => {
						let siblings = mission.node(p).map_or(1, |pn| pn.children.len());
						let slot = mission
							.node(p)
							.and_then(|pn| pn.children.iter().position(|&c| c == i))
							.unwrap_or(0);
						let angle = (slot as f64 + 0.5) * 2.0 * PI / siblings as f64 - PI / 2.0;
						(
							px + (CHILD_DISTANCE * angle.cos()) as f32,
							py + (CHILD_DISTANCE * angle.sin()) as f32,
						)
					}
					None => (0.0, 0.0),
				}
			});
			let idx = self.graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: node.parent.is_none() || self.pinned.contains(&node.id),
				user_data: NodeInfo {
					node: i,
					id: node.id.clone(),
					kind: node.kind.clone(),
					label: node.label(),
					color: status_color(&node.status),
				},
			});
			placed.insert(i, (idx, x, y));
		}

		for (parent, child) in mission.edges() {
			if let (Some(&(a, ..)), Some(&(b, ..))) = (placed.get(&parent), placed.get(&child)) {
				self.graph.add_edge(a, b, EdgeData::default());
			}
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	fn hit(&self, sx: f64, sy: f64) -> Option<(DefaultNodeIdx, usize)> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some((node.index(), node.data.user_data.node));
			}
		});
		found
	}

	/// Arena index of the node under the pointer.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		self.hit(sx, sy).map(|(_, node)| node)
	}

	/// Starts a node drag or, on empty space, a pan. Returns the node hit.
	pub fn press(&mut self, x: f64, y: f64) -> Option<usize> {
		if let Some((idx, node)) = self.hit(x, y) {
			self.drag.active = true;
			self.drag.node_idx = Some(idx);
			self.drag.start_x = x;
			self.drag.start_y = y;
			let (mut nx, mut ny) = (0.0, 0.0);
			self.graph.visit_nodes(|n| {
				if n.index() == idx {
					(nx, ny) = (n.x(), n.y());
				}
			});
			self.drag.node_start_x = nx;
			self.drag.node_start_y = ny;
			Some(node)
		} else {
			self.pan.active = true;
			self.pan.start_x = x;
			self.pan.start_y = y;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
			None
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if self.drag.active {
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			let (dx, dy) = (
				(x - self.drag.start_x) / self.transform.k,
				(y - self.drag.start_y) / self.transform.k,
			);
			let (nx, ny) = (
				self.drag.node_start_x + dx as f32,
				self.drag.node_start_y + dy as f32,
			);
			let mut moved = None;
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
					moved = Some(node.data.user_data.id.clone());
				}
			});
			if let Some(id) = moved {
				self.pinned.insert(id);
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	pub fn release(&mut self) {
		self.drag.active = false;
		self.drag.node_idx = None;
		self.pan.active = false;
	}

	pub fn zoom(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ApiError;
	use crate::network::builder::{build, tests::infiltrate_corp};
	use crate::network::view::{ViewEvent, ViewState};

	fn laid_out() -> (Mission, LayoutState) {
		let mission = build(&infiltrate_corp());
		let mut layout = LayoutState::new(800.0, 600.0);
		layout.sync(Some(&mission), 1);
		(mission, layout)
	}

	/// Screen coordinates of an arena node.
	fn on_screen(layout: &LayoutState, node: usize) -> (f64, f64) {
		let (x, y) = layout.position_of(node).unwrap();
		(
			x * layout.transform.k + layout.transform.x,
			y * layout.transform.k + layout.transform.y,
		)
	}

	#[test]
	fn only_shown_nodes_are_laid_out() {
		let (mut mission, mut layout) = laid_out();
		assert_eq!(layout.node_count(), 2);
		mission.toggle(mission.find("Gateway").unwrap());
		layout.sync(Some(&mission), 1);
		assert_eq!(layout.node_count(), 3);
	}

	#[test]
	fn root_sits_at_centre() {
		let (_, layout) = laid_out();
		assert_eq!(on_screen(&layout, Mission::ROOT), (400.0, 300.0));
		assert_eq!(layout.node_at_position(405.0, 298.0), Some(Mission::ROOT));
		assert_eq!(layout.node_at_position(10.0, 10.0), None);
	}

	#[test]
	fn drag_moves_node_without_touching_mission() {
		let (mission, mut layout) = laid_out();
		let before = mission.clone();
		let gateway = mission.find("Gateway").unwrap();
		let (sx, sy) = on_screen(&layout, gateway);
		assert_eq!(layout.press(sx, sy), Some(gateway));
		layout.pointer_move(sx + 50.0, sy + 20.0);
		layout.release();
		let (gx, gy) = layout.position_of(gateway).unwrap();
		let (ox, oy) = layout.screen_to_graph(sx, sy);
		assert!((gx - (ox + 50.0)).abs() < 1e-3);
		assert!((gy - (oy + 20.0)).abs() < 1e-3);
		assert_eq!(mission, before);
	}

	#[test]
	fn expanding_keeps_dragged_position_but_new_generation_resets() {
		let (mut mission, mut layout) = laid_out();
		let gateway = mission.find("Gateway").unwrap();
		let (sx, sy) = on_screen(&layout, gateway);
		layout.press(sx, sy);
		layout.pointer_move(sx + 200.0, sy);
		layout.release();
		let dragged = layout.position_of(gateway).unwrap();

		mission.toggle(gateway);
		layout.sync(Some(&mission), 1);
		assert_eq!(layout.position_of(gateway), Some(dragged));

		let fresh = build(&infiltrate_corp());
		layout.sync(Some(&fresh), 2);
		assert_ne!(layout.position_of(gateway), Some(dragged));
		assert_eq!(layout.node_count(), 2);
	}

	#[test]
	fn failed_poll_keeps_dragged_position() {
		let mut state = ViewState::default();
		state.reduce(ViewEvent::Synced(Ok(Some(infiltrate_corp()))));
		let mut layout = LayoutState::new(800.0, 600.0);
		layout.sync(state.mission(), state.generation());
		let gateway = state.mission().unwrap().find("Gateway").unwrap();
		let (sx, sy) = on_screen(&layout, gateway);
		layout.press(sx, sy);
		layout.pointer_move(sx + 120.0, sy - 40.0);
		layout.release();
		let dragged = layout.position_of(gateway).unwrap();

		state.reduce(ViewEvent::Synced(Err(ApiError::Transport("offline".into()))));
		layout.sync(state.mission(), state.generation());
		assert_eq!(layout.position_of(gateway), Some(dragged));
		assert_eq!(layout.node_count(), 2);
	}

	#[test]
	fn pan_and_zoom_move_the_view() {
		let (_, mut layout) = laid_out();
		assert_eq!(layout.press(10.0, 10.0), None);
		layout.pointer_move(30.0, 40.0);
		layout.release();
		assert_eq!((layout.transform.x, layout.transform.y), (420.0, 330.0));
		layout.zoom(420.0, 330.0, -1.0);
		assert!((layout.transform.k - 1.1).abs() < 1e-9);
		assert_eq!(on_screen(&layout, Mission::ROOT), (420.0, 330.0));
	}

	#[test]
	fn healthy_nodes_use_default_icon_color() {
		assert_eq!(status_color("active"), DEFAULT_ICON_COLOR);
		assert_eq!(status_color(""), DEFAULT_ICON_COLOR);
		assert_eq!(status_color("Owned"), STATUS_HOSTILE);
	}

	#[test]
	fn no_mission_clears_layout() {
		let (_, mut layout) = laid_out();
		layout.sync(None, 2);
		assert_eq!(layout.node_count(), 0);
	}
}
