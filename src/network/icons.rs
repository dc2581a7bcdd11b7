//! Fixed-geometry glyphs for each node type.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ICON_COLOR: &str = "#00ff00";
const SERVER_LIGHT: &str = "#cccccc";
const FIREWALL_BRICK: &str = "#000000";

/// Node type tags the backend may send.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	Pc,
	Server,
	Firewall,
}

impl NodeKind {
	pub fn from_tag(tag: &str) -> Option<Self> {
		match tag.trim().to_ascii_lowercase().as_str() {
			"pc" => Some(Self::Pc),
			"server" => Some(Self::Server),
			"firewall" => Some(Self::Firewall),
			_ => None,
		}
	}

	pub fn tag(self) -> &'static str {
		match self {
			Self::Pc => "pc",
			Self::Server => "server",
			Self::Firewall => "firewall",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
	Rect {
		x: f64,
		y: f64,
		w: f64,
		h: f64,
		color: String,
	},
	Circle {
		x: f64,
		y: f64,
		r: f64,
		color: String,
	},
}

/// A drawable in local coordinates, origin at the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
	pub shapes: Vec<Shape>,
	pub width: f64,
	pub height: f64,
}

fn rect(x: f64, y: f64, w: f64, h: f64, color: &str) -> Shape {
	Shape::Rect {
		x,
		y,
		w,
		h,
		color: color.to_string(),
	}
}

/// Glyph for a node type tag. Unknown tags have no drawable.
pub fn render(tag: &str, color: &str) -> Option<Glyph> {
	NodeKind::from_tag(tag).map(|kind| glyph(kind, color))
}

pub fn glyph(kind: NodeKind, color: &str) -> Glyph {
	match kind {
		NodeKind::Pc => Glyph {
			// screen, stand
			shapes: vec![rect(0.0, 0.0, 32.0, 24.0, color), rect(12.0, 26.0, 8.0, 4.0, color)],
			width: 32.0,
			height: 30.0,
		},
		NodeKind::Server => Glyph {
			shapes: vec![
				rect(0.0, 0.0, 32.0, 12.0, color),
				Shape::Circle {
					x: 28.0,
					y: 6.0,
					r: 2.0,
					color: SERVER_LIGHT.to_string(),
				},
			],
			width: 32.0,
			height: 12.0,
		},
		NodeKind::Firewall => {
			let mut shapes = vec![rect(0.0, 0.0, 32.0, 32.0, color)];
			for i in 0..4 {
				for j in 0..4 {
					if (i + j) % 2 == 0 {
						shapes.push(rect(
							i as f64 * 8.0,
							j as f64 * 8.0,
							8.0,
							8.0,
							FIREWALL_BRICK,
						));
					}
				}
			}
			Glyph {
				shapes,
				width: 32.0,
				height: 32.0,
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_tag_has_no_glyph() {
		assert!(render("router", DEFAULT_ICON_COLOR).is_none());
		assert!(render("", DEFAULT_ICON_COLOR).is_none());
	}

	#[test]
	fn tags_are_case_insensitive() {
		assert_eq!(NodeKind::from_tag("Server"), Some(NodeKind::Server));
		assert_eq!(NodeKind::from_tag(" FIREWALL "), Some(NodeKind::Firewall));
	}

	#[test]
	fn pc_is_screen_and_stand() {
		let g = render("pc", "#123456").unwrap();
		assert_eq!(g.shapes.len(), 2);
		assert_eq!(g.shapes[1], rect(12.0, 26.0, 8.0, 4.0, "#123456"));
	}

	#[test]
	fn server_has_status_light() {
		let g = glyph(NodeKind::Server, DEFAULT_ICON_COLOR);
		assert!(matches!(
			&g.shapes[1],
			Shape::Circle { r, color, .. } if *r == 2.0 && color == SERVER_LIGHT
		));
	}

	#[test]
	fn firewall_checkerboard_has_eight_bricks() {
		let g = glyph(NodeKind::Firewall, DEFAULT_ICON_COLOR);
		let bricks = g
			.shapes
			.iter()
			.filter(|s| matches!(s, Shape::Rect { color, .. } if color == FIREWALL_BRICK))
			.count();
		assert_eq!(bricks, 8);
	}
}
