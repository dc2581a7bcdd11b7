use std::fmt;

use serde::Deserialize;

/// One node as the backend describes it.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct NodeDescription {
	#[serde(rename = "type", default)]
	pub kind: String,
	pub name: String,
	#[serde(default)]
	pub status: String,
	#[serde(default)]
	pub children: Vec<NodeDescription>,
}

/// A mission as returned by `/api/player/{name}/state` or `/missions`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct MissionDescription {
	#[serde(alias = "name", default)]
	pub title: String,
	#[serde(default)]
	pub status: String,
	#[serde(default)]
	pub nodes: Vec<NodeDescription>,
}

impl MissionDescription {
	/// `Title (status)`, the way menus and the header list a mission.
	pub fn summary(&self) -> String {
		format!("{} ({})", self.title, self.status)
	}
}

/// Path-derived identity: stable across rebuilds as long as the tree shape is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
	pub fn root(name: &str) -> Self {
		Self(format!("0:{name}"))
	}

	pub fn child(parent: &NodeId, position: usize, name: &str) -> Self {
		Self(format!("{}/{position}:{name}", parent.0))
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: NodeId,
	/// Raw type tag; the icon catalog decides whether it is drawable.
	pub kind: String,
	pub name: String,
	pub status: String,
	pub parent: Option<usize>,
	pub children: Vec<usize>,
	pub visible: bool,
	pub expanded: bool,
}

impl GraphNode {
	pub fn label(&self) -> String {
		if self.status.is_empty() {
			self.name.clone()
		} else {
			format!("{} ({})", self.name, self.status)
		}
	}
}

/// Arena of nodes; index 0 is always the root.
#[derive(Clone, Debug, PartialEq)]
pub struct Mission {
	pub title: String,
	pub status: String,
	pub(crate) nodes: Vec<GraphNode>,
}

impl Mission {
	pub const ROOT: usize = 0;

	#[cfg(test)]
	pub fn root(&self) -> &GraphNode {
		&self.nodes[Self::ROOT]
	}

	pub fn node(&self, idx: usize) -> Option<&GraphNode> {
		self.nodes.get(idx)
	}

	#[cfg(test)]
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	#[cfg(test)]
	pub fn find(&self, name: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n.name == name)
	}

	/// A node is drawn only when it and every ancestor are visible.
	pub fn is_shown(&self, idx: usize) -> bool {
		let mut cursor = Some(idx);
		while let Some(i) = cursor {
			match self.nodes.get(i) {
				Some(node) if node.visible => cursor = node.parent,
				_ => return false,
			}
		}
		true
	}

	pub fn shown(&self) -> impl Iterator<Item = usize> + '_ {
		(0..self.nodes.len()).filter(|&i| self.is_shown(i))
	}

	/// Parent/child pairs where both ends are drawn.
	pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.nodes.iter().enumerate().flat_map(move |(i, node)| {
			node.children
				.iter()
				.filter(move |&&c| self.is_shown(i) && self.is_shown(c))
				.map(move |&c| (i, c))
		})
	}

	/// Flips every direct child of `idx`. Returns false for leaves and bad indices.
	pub fn toggle(&mut self, idx: usize) -> bool {
		let Some(children) = self.nodes.get(idx).map(|n| n.children.clone()) else {
			return false;
		};
		if children.is_empty() {
			return false;
		}
		for c in children {
			self.nodes[c].visible = !self.nodes[c].visible;
		}
		let node = &mut self.nodes[idx];
		node.expanded = !node.expanded;
		true
	}
}
