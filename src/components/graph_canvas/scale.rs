//! Zoom-dependent scaling configuration for graph visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: layout coordinates. Values in world-space scale with zoom.
//! - **Screen-space**: canvas pixels. Values in screen-space stay constant
//!   regardless of zoom level.
//!
//! Layouts spread thousands of nodes over several viewport widths, so node
//! sizes are kept readable with [`ScaleBehavior::Clamped`] instead of shrinking
//! to nothing when zoomed out.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for a base value at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Configuration for node visual scaling.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Base node radius in world units.
	pub radius: f64,
	/// How the node radius scales with zoom.
	pub radius_behavior: ScaleBehavior,
	/// Extra hit slop around a node, in screen pixels.
	pub hit_slop: f64,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Labels of unselected nodes appear above this zoom.
	pub label_min_k: f64,
}

/// Configuration for edge visual scaling.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// How edge width scales with zoom.
	pub width_behavior: ScaleBehavior,
	/// Dash pattern (dash, gap) in screen pixels.
	pub dash_pattern: (f64, f64),
	/// Dot pattern (dot, gap) in screen pixels.
	pub dot_pattern: (f64, f64),
	/// Arrow size in screen pixels.
	pub arrow_size: f64,
}

/// Limits and steps for zooming.
#[derive(Clone, Debug)]
pub struct ZoomConfig {
	pub min_k: f64,
	pub max_k: f64,
	/// Factor applied per wheel notch.
	pub wheel_step: f64,
	/// Factor applied per zoom button press.
	pub button_step: f64,
	/// Zoom used when centering on a focused node.
	pub focus_k: f64,
	/// Screen margin kept when fitting the graph.
	pub fit_padding: f64,
	/// Pointer travel below which a press counts as a tap.
	pub tap_slop: f64,
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub edge: EdgeScaleConfig,
	pub zoom: ZoomConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 4.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 2.0,
					max_screen: 40.0,
				},
				hit_slop: 4.0,
				label_size: 10.0,
				label_min_k: 1.5,
			},
			edge: EdgeScaleConfig {
				width_behavior: ScaleBehavior::Screen,
				dash_pattern: (6.0, 4.0),
				dot_pattern: (1.5, 3.0),
				arrow_size: 6.0,
			},
			zoom: ZoomConfig {
				min_k: 0.02,
				max_k: 10.0,
				wheel_step: 1.1,
				button_step: 1.3,
				focus_k: 2.5,
				fit_padding: 40.0,
				tap_slop: 4.0,
			},
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
/// All sizes are in world-space (ready to use after canvas transform).
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Node radius in world-space.
	pub node_radius: f64,
	/// Hit slop in world-space.
	pub hit_slop: f64,
	/// Label font (e.g. "10px sans-serif"), world-sized to stay constant on screen.
	pub label_font: String,
	/// Whether unselected labels are drawn at this zoom.
	pub show_labels: bool,
	/// World-space width per screen pixel of edge width.
	pub edge_unit: f64,
	/// Dash pattern in world-space.
	pub dash_pattern: (f64, f64),
	/// Dot pattern in world-space.
	pub dot_pattern: (f64, f64),
	/// Arrow size in world-space.
	pub arrow_size: f64,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let per_px = 1.0 / k;
		Self {
			k,
			node_radius: config.node.radius_behavior.apply(config.node.radius, k),
			hit_slop: config.node.hit_slop * per_px,
			label_font: format!("{}px sans-serif", config.node.label_size * per_px),
			show_labels: k >= config.node.label_min_k,
			edge_unit: config.edge.width_behavior.apply(1.0, k),
			dash_pattern: (
				config.edge.dash_pattern.0 * per_px,
				config.edge.dash_pattern.1 * per_px,
			),
			dot_pattern: (
				config.edge.dot_pattern.0 * per_px,
				config.edge.dot_pattern.1 * per_px,
			),
			arrow_size: config.edge.arrow_size * per_px,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamped_radius_stays_within_screen_bounds() {
		let behavior = ScaleBehavior::Clamped {
			min_screen: 2.0,
			max_screen: 40.0,
		};
		// Zoomed far out: 4 world units would be 0.4px, clamp to 2px.
		assert!((behavior.apply(4.0, 0.1) * 0.1 - 2.0).abs() < 1e-9);
		// Zoomed in: world size is kept.
		assert_eq!(behavior.apply(4.0, 2.0), 4.0);
	}

	#[test]
	fn labels_appear_past_threshold() {
		let config = ScaleConfig::default();
		assert!(!ScaledValues::new(&config, 1.0).show_labels);
		assert!(ScaledValues::new(&config, 2.5).show_labels);
	}
}
