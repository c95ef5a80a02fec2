//! Zoom-dependent scaling configuration for graph visuals.
//!
//! Centralizes how node radii, hit targets, labels, edge widths, and
//! arrowheads behave as the zoom level (`k`) changes.
//!
//! - **World-space** values scale with zoom (larger when zoomed in).
//! - **Screen-space** values stay a constant pixel size regardless of zoom.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "World/Screen variants complete the API for users customizing ScaleConfig"
)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	/// Use `f64::NEG_INFINITY` or `f64::INFINITY` for unbounded.
	Clamped {
		/// Minimum rendered size in screen pixels.
		min_screen: f64,
		/// Maximum rendered size in screen pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => {
				// screen_size = world_size * k, so clamp in world units.
				let min_world = min_screen / k;
				let max_world = max_screen / k;
				base.clamp(min_world, max_world)
			}
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
	/// Hit detection radius in world units.
	pub hit_radius: f64,
	/// How hit radius scales with zoom.
	pub hit_behavior: ScaleBehavior,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Minimum zoom level for label font scaling.
	pub label_min_k: f64,
}

/// Configuration for edge visual scaling.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Base line width in screen pixels.
	pub line_width: f64,
	/// Edge label font size in screen pixels.
	pub label_size: f64,
	/// Zoom level below which edge labels are culled.
	pub label_min_k: f64,
}

/// Configuration for arrowhead scaling.
#[derive(Clone, Debug)]
pub struct ArrowScaleConfig {
	/// Base arrow size in world units.
	pub size: f64,
	/// How arrow size scales with zoom.
	pub size_behavior: ScaleBehavior,
	/// Zoom level below which arrows are culled.
	pub cull_k: f64,
}

/// Configuration for the selection ring.
#[derive(Clone, Debug)]
pub struct RingScaleConfig {
	/// Stroke width in screen pixels.
	pub width: f64,
	/// Offset from the node edge in screen pixels.
	pub offset: f64,
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub edge: EdgeScaleConfig,
	pub arrow: ArrowScaleConfig,
	pub ring: RingScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 8.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 5.0,
					max_screen: f64::INFINITY,
				},
				hit_radius: 12.0,
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 5.0,
					max_screen: f64::INFINITY,
				},
				label_size: 12.0,
				label_min_k: 0.5,
			},
			edge: EdgeScaleConfig {
				line_width: 1.5,
				label_size: 10.0,
				label_min_k: 0.6,
			},
			arrow: ArrowScaleConfig {
				size: 6.0,
				size_behavior: ScaleBehavior::Clamped {
					min_screen: 0.0,
					max_screen: 18.0,
				},
				cull_k: 0.3,
			},
			ring: RingScaleConfig {
				width: 2.0,
				offset: 3.0,
			},
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
/// All sizes are in world-space (ready to use after the canvas transform).
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Node radius in world-space.
	pub node_radius: f64,
	/// Hit detection radius in world-space.
	pub hit_radius: f64,
	/// Node label font string (e.g., "12px sans-serif").
	pub label_font: String,
	/// Edge line width in world-space.
	pub edge_line_width: f64,
	/// Edge label font string.
	pub edge_label_font: String,
	/// Whether to skip drawing edge labels at this zoom level.
	pub cull_edge_labels: bool,
	/// Arrow size in world-space.
	pub arrow_size: f64,
	/// Whether to skip drawing arrowheads at this zoom level.
	pub cull_arrows: bool,
	/// Selection ring width in world-space.
	pub ring_width: f64,
	/// Selection ring offset in world-space.
	pub ring_offset: f64,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let node_radius = config.node.radius_behavior.apply(config.node.radius, k);
		let hit_radius = config.node.hit_behavior.apply(config.node.hit_radius, k);
		let label_font_size = config.node.label_size / k.max(config.node.label_min_k);
		let edge_label_font_size = config.edge.label_size / k.max(config.edge.label_min_k);

		Self {
			k,
			node_radius,
			hit_radius,
			label_font: format!("{label_font_size}px sans-serif"),
			edge_line_width: config.edge.line_width / k,
			edge_label_font: format!("{edge_label_font_size}px sans-serif"),
			cull_edge_labels: k < config.edge.label_min_k,
			arrow_size: config.arrow.size_behavior.apply(config.arrow.size, k),
			cull_arrows: k < config.arrow.cull_k,
			ring_width: config.ring.width / k,
			ring_offset: config.ring.offset / k,
		}
	}
}
