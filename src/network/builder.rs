//! Turns a backend mission description into the node arena.

use super::icons::NodeKind;
use super::model::{GraphNode, Mission, MissionDescription, NodeDescription, NodeId};

pub const ROOT_NAME: &str = "Your PC";
const ROOT_STATUS: &str = "online";

/// Builds a fresh tree. The root is the player's machine; mission nodes hang off
/// it and start visible, everything nested below them starts hidden.
pub fn build(desc: &MissionDescription) -> Mission {
	let root = GraphNode {
		id: NodeId::root(ROOT_NAME),
		kind: NodeKind::Pc.tag().to_string(),
		name: ROOT_NAME.to_string(),
		status: ROOT_STATUS.to_string(),
		parent: None,
		children: Vec::new(),
		visible: true,
		expanded: !desc.nodes.is_empty(),
	};
	let mut mission = Mission {
		title: desc.title.clone(),
		status: desc.status.clone(),
		nodes: vec![root],
	};
	for (position, node) in desc.nodes.iter().enumerate() {
		push(&mut mission, Mission::ROOT, position, node, true);
	}
	mission
}

fn push(
	mission: &mut Mission,
	parent: usize,
	position: usize,
	desc: &NodeDescription,
	visible: bool,
) -> usize {
	let idx = mission.nodes.len();
	let id = NodeId::child(&mission.nodes[parent].id, position, &desc.name);
	mission.nodes.push(GraphNode {
		id,
		kind: desc.kind.clone(),
		name: desc.name.clone(),
		status: desc.status.clone(),
		parent: Some(parent),
		children: Vec::with_capacity(desc.children.len()),
		visible,
		expanded: false,
	});
	mission.nodes[parent].children.push(idx);
	for (position, child) in desc.children.iter().enumerate() {
		push(mission, idx, position, child, false);
	}
	idx
}
