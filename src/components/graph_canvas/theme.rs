//! Visual theming for the graph canvas.
//!
//! Colors, shapes and line styles per node/edge type, plus how strongly each
//! [`VisualState`] dims or emphasizes an element.

use crate::graph::{EdgeType, NodeType, VisualState};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Outline drawn for a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeShape {
	Ellipse,
	RoundRectangle,
	Diamond,
	Hexagon,
}

/// Stroke pattern of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
	Solid,
	Dashed,
	Dotted,
}

/// Per-type node appearance.
#[derive(Clone, Debug)]
pub struct NodeTypeStyle {
	pub color: Color,
	pub shape: NodeShape,
	/// Base size multiplier.
	pub size: f64,
	/// Whether the label is drawn even when nothing is selected.
	pub always_labeled: bool,
	/// Size grows with degree weight up to this extra multiplier.
	pub degree_growth: f64,
}

/// Per-type edge appearance.
#[derive(Clone, Debug)]
pub struct EdgeTypeStyle {
	pub color: Color,
	pub line: LineStyle,
	/// Width in screen pixels.
	pub width: f64,
	/// Flat bar instead of an arrow head at the target.
	pub tee_head: bool,
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Alpha multipliers per [`VisualState`].
#[derive(Clone, Debug)]
pub struct StateStyle {
	pub node_normal: f64,
	pub node_faded: f64,
	pub edge_normal: f64,
	pub edge_highlighted: f64,
	pub edge_faded: f64,
	/// Ring around the selected node.
	pub selected_ring: Color,
	/// Ring around neighbors of the selected node.
	pub neighbor_ring: Color,
	pub label_color: Color,
	pub label_outline: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub states: StateStyle,
	pub drug: NodeTypeStyle,
	pub category: NodeTypeStyle,
	pub adverse_effect: NodeTypeStyle,
	pub cyp: NodeTypeStyle,
	pub unknown: NodeTypeStyle,
	pub contraindication: EdgeTypeStyle,
	pub precaution: EdgeTypeStyle,
	pub causes_adverse_effect: EdgeTypeStyle,
	pub belongs_to_category: EdgeTypeStyle,
	pub metabolized_by: EdgeTypeStyle,
	pub unknown_edge: EdgeTypeStyle,
}

impl Theme {
	/// Dark theme matching the sidebar palette.
	pub fn dark() -> Self {
		let node = |color, shape, size| NodeTypeStyle {
			color,
			shape,
			size,
			always_labeled: false,
			degree_growth: 0.0,
		};
		let edge = |color, line, width| EdgeTypeStyle {
			color,
			line,
			width,
			tee_head: false,
		};
		Self {
			background: BackgroundStyle {
				color: Color::rgb(15, 17, 23),
				color_secondary: Color::rgb(24, 27, 36),
				use_gradient: true,
			},
			states: StateStyle {
				node_normal: 1.0,
				node_faded: 0.12,
				edge_normal: 0.15,
				edge_highlighted: 1.0,
				edge_faded: 0.05,
				selected_ring: Color::rgb(255, 255, 255),
				neighbor_ring: Color::rgb(91, 141, 239),
				label_color: Color::rgb(228, 230, 237),
				label_outline: Color::rgb(15, 17, 23),
			},
			drug: node(Color::rgb(91, 141, 239), NodeShape::Ellipse, 1.0),
			category: NodeTypeStyle {
				always_labeled: true,
				degree_growth: 5.0,
				..node(Color::rgb(78, 201, 160), NodeShape::RoundRectangle, 1.5)
			},
			adverse_effect: node(Color::rgb(224, 108, 117), NodeShape::Diamond, 0.75),
			cyp: node(Color::rgb(198, 120, 221), NodeShape::Hexagon, 0.75),
			unknown: node(Color::rgb(128, 128, 128), NodeShape::Ellipse, 0.75),
			contraindication: EdgeTypeStyle {
				tee_head: true,
				..edge(Color::rgb(224, 108, 117), LineStyle::Solid, 3.0)
			},
			precaution: edge(Color::rgb(229, 192, 123), LineStyle::Dashed, 1.5),
			causes_adverse_effect: edge(Color::rgb(224, 108, 117), LineStyle::Dotted, 1.0),
			belongs_to_category: edge(Color::rgb(78, 201, 160), LineStyle::Solid, 1.0),
			metabolized_by: edge(Color::rgb(198, 120, 221), LineStyle::Dashed, 1.5),
			unknown_edge: edge(Color::rgb(128, 128, 128), LineStyle::Solid, 0.5),
		}
	}

	pub fn node(&self, node_type: NodeType) -> &NodeTypeStyle {
		match node_type {
			NodeType::Drug => &self.drug,
			NodeType::Category => &self.category,
			NodeType::AdverseEffect => &self.adverse_effect,
			NodeType::Cyp => &self.cyp,
			NodeType::Unknown => &self.unknown,
		}
	}

	pub fn edge(&self, edge_type: EdgeType) -> &EdgeTypeStyle {
		match edge_type {
			EdgeType::Contraindication => &self.contraindication,
			EdgeType::Precaution => &self.precaution,
			EdgeType::CausesAdverseEffect => &self.causes_adverse_effect,
			EdgeType::BelongsToCategory => &self.belongs_to_category,
			EdgeType::MetabolizedBy => &self.metabolized_by,
			EdgeType::Unknown => &self.unknown_edge,
		}
	}

	/// Node opacity for a state. Hidden nodes are not drawn at all.
	pub fn node_alpha(&self, state: VisualState) -> f64 {
		match state {
			VisualState::Faded => self.states.node_faded,
			VisualState::Hidden => 0.0,
			_ => self.states.node_normal,
		}
	}

	/// Edge opacity for a state.
	pub fn edge_alpha(&self, state: VisualState) -> f64 {
		match state {
			VisualState::Normal | VisualState::Neighbor => self.states.edge_normal,
			VisualState::Highlighted => self.states.edge_highlighted,
			VisualState::Faded => self.states.edge_faded,
			VisualState::Hidden => 0.0,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::dark()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output_switches_on_alpha() {
		assert_eq!(Color::rgb(91, 141, 239).to_css(), "#5b8def");
		assert_eq!(
			Color::rgb(255, 0, 0).with_alpha(0.5).to_css(),
			"rgba(255, 0, 0, 0.5)"
		);
	}

	#[test]
	fn every_type_has_a_style() {
		let theme = Theme::default();
		assert_eq!(theme.node(NodeType::Category).shape, NodeShape::RoundRectangle);
		assert_eq!(theme.edge(EdgeType::Precaution).line, LineStyle::Dashed);
		assert!(theme.edge(EdgeType::Contraindication).tee_head);
		assert_eq!(theme.node_alpha(VisualState::Hidden), 0.0);
		assert!(theme.edge_alpha(VisualState::Highlighted) > theme.edge_alpha(VisualState::Normal));
	}
}
