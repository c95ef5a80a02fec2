//! Per-view graph state: simulation, view transform, and pointer handling.
//!
//! The pointer state machine distinguishes clicks from drags with a small
//! movement threshold. A press lands either on a node (arming a selection
//! click that a drag can cancel) or on empty canvas (arming a deselect
//! click that a pan can cancel), so a node click never leaks through to
//! the background handler.

use super::scale::{ScaleConfig, ScaledValues};
use super::simulation::Simulation;
use super::types::GraphData;

/// Screen-space distance (pixels) the pointer must travel before a press
/// becomes a drag instead of a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	/// Horizontal translation, screen pixels.
	pub x: f64,
	/// Vertical translation, screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// High-level action produced by a completed pointer gesture.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerAction {
	/// The user clicked a node; the shell should select it.
	SelectNode(String),
	/// The user clicked empty canvas; the shell should clear selection.
	ClearSelection,
}

/// Where the current pointer gesture stands.
#[derive(Clone, Debug, PartialEq)]
enum PointerState {
	Idle,
	/// Pressed on a node; becomes a click on release or a drag past the
	/// threshold.
	ArmedNode { id: String, sx: f64, sy: f64 },
	/// Dragging a node; every move re-pins it to the pointer.
	DraggingNode { id: String },
	/// Pressed on empty canvas; becomes a deselect click or a pan.
	ArmedPan {
		sx: f64,
		sy: f64,
		origin_x: f64,
		origin_y: f64,
	},
	/// Panning the view.
	Panning {
		sx: f64,
		sy: f64,
		origin_x: f64,
		origin_y: f64,
	},
}

/// Simulation plus interaction state for one mounted graph view.
pub struct GraphViewState {
	/// The layout simulation driving node positions.
	pub sim: Simulation,
	/// Current pan/zoom transform.
	pub transform: ViewTransform,
	/// Node id currently under the pointer, for cursor affordance.
	pub hovered: Option<String>,
	/// Canvas width, screen pixels.
	pub width: f64,
	/// Canvas height, screen pixels.
	pub height: f64,
	pointer: PointerState,
}

impl GraphViewState {
	/// Build fresh view state for validated graph data. Positions are
	/// seeded from scratch; nothing carries over from a prior instance.
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		Self {
			sim: Simulation::new(data, width, height),
			transform: ViewTransform::default(),
			hovered: None,
			width,
			height,
			pointer: PointerState::Idle,
		}
	}

	/// Convert screen coordinates to graph (world) coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Hit-test a screen position against node shapes.
	pub fn node_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<&str> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		for body in self.sim.bodies() {
			let (dx, dy) = (body.x - gx, body.y - gy);
			if (dx * dx + dy * dy).sqrt() < scale.hit_radius {
				found = Some(body.id.as_str());
			}
		}
		found
	}

	/// Pointer press: arm either a node gesture or a background gesture.
	pub fn pointer_down(&mut self, sx: f64, sy: f64, config: &ScaleConfig) {
		self.pointer = match self.node_at_position(sx, sy, config) {
			Some(id) => PointerState::ArmedNode {
				id: id.to_string(),
				sx,
				sy,
			},
			None => PointerState::ArmedPan {
				sx,
				sy,
				origin_x: self.transform.x,
				origin_y: self.transform.y,
			},
		};
	}

	/// Pointer move: promote armed gestures past the drag threshold, pin
	/// the dragged node to the pointer, pan, or just track hover.
	pub fn pointer_move(&mut self, sx: f64, sy: f64, config: &ScaleConfig) {
		match self.pointer.clone() {
			PointerState::Idle => {
				self.hovered = self.node_at_position(sx, sy, config).map(str::to_string);
			}
			PointerState::ArmedNode { id, sx: px, sy: py } => {
				if (sx - px).hypot(sy - py) > DRAG_THRESHOLD {
					// Crossing the threshold starts the drag: reheat the
					// cooling schedule and take the node out of physics.
					self.sim.reheat();
					let (gx, gy) = self.screen_to_graph(sx, sy);
					self.sim.pin(&id, gx, gy);
					self.pointer = PointerState::DraggingNode { id };
				}
			}
			PointerState::DraggingNode { id } => {
				let (gx, gy) = self.screen_to_graph(sx, sy);
				self.sim.pin(&id, gx, gy);
			}
			PointerState::ArmedPan {
				sx: px,
				sy: py,
				origin_x,
				origin_y,
			} => {
				if (sx - px).hypot(sy - py) > DRAG_THRESHOLD {
					self.pointer = PointerState::Panning {
						sx: px,
						sy: py,
						origin_x,
						origin_y,
					};
					self.transform.x = origin_x + (sx - px);
					self.transform.y = origin_y + (sy - py);
				}
			}
			PointerState::Panning {
				sx: px,
				sy: py,
				origin_x,
				origin_y,
			} => {
				self.transform.x = origin_x + (sx - px);
				self.transform.y = origin_y + (sy - py);
			}
		}
	}

	/// Pointer release: a still-armed press is a click; a drag just ends.
	pub fn pointer_up(&mut self) -> Option<PointerAction> {
		match std::mem::replace(&mut self.pointer, PointerState::Idle) {
			PointerState::ArmedNode { id, .. } => Some(PointerAction::SelectNode(id)),
			PointerState::ArmedPan { .. } => Some(PointerAction::ClearSelection),
			PointerState::DraggingNode { id } => {
				// Un-pin and reheat so force integration resumes even if
				// the schedule cooled to idle while the node was held.
				self.sim.release(&id);
				self.sim.reheat();
				None
			}
			PointerState::Panning { .. } | PointerState::Idle => None,
		}
	}

	/// Pointer left the canvas: abandon any gesture without emitting an
	/// action, releasing a pinned node if one was mid-drag.
	pub fn pointer_leave(&mut self) {
		if let PointerState::DraggingNode { id } = &self.pointer {
			self.sim.release(id);
			self.sim.reheat();
		}
		self.pointer = PointerState::Idle;
		self.hovered = None;
	}

	/// Zoom about the cursor position, clamping the zoom factor.
	pub fn zoom(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Update the canvas size after a window resize.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Whether a drag gesture is currently holding a node.
	pub fn is_dragging(&self) -> bool {
		matches!(self.pointer, PointerState::DraggingNode { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::simulation::Pin;
	use crate::components::force_graph::types::{GraphEdge, GraphNode};

	// Single node graphs seed the body at center + (100, 0), i.e. at
	// (500, 300) on an 800x600 canvas with the identity transform.
	fn single_node_state() -> GraphViewState {
		let data = GraphData {
			nodes: vec![GraphNode {
				id: "a".to_string(),
				label: "Alice".to_string(),
			}],
			edges: vec![],
		};
		GraphViewState::new(&data, 800.0, 600.0)
	}

	fn pair_state() -> GraphViewState {
		let data = GraphData {
			nodes: vec![
				GraphNode {
					id: "a".to_string(),
					label: "Alice".to_string(),
				},
				GraphNode {
					id: "b".to_string(),
					label: "Bob".to_string(),
				},
			],
			edges: vec![GraphEdge {
				id: "e1".to_string(),
				source: "a".to_string(),
				target: "b".to_string(),
				label: "knows".to_string(),
			}],
		};
		GraphViewState::new(&data, 800.0, 600.0)
	}

	#[test]
	fn click_in_place_selects_the_node() {
		let mut state = single_node_state();
		let config = ScaleConfig::default();
		state.pointer_down(500.0, 300.0, &config);
		assert_eq!(
			state.pointer_up(),
			Some(PointerAction::SelectNode("a".to_string()))
		);
	}

	#[test]
	fn click_with_subthreshold_wobble_still_selects() {
		let mut state = single_node_state();
		let config = ScaleConfig::default();
		state.pointer_down(500.0, 300.0, &config);
		state.pointer_move(501.0, 300.5, &config);
		state.pointer_move(500.0, 300.0, &config);
		assert_eq!(
			state.pointer_up(),
			Some(PointerAction::SelectNode("a".to_string()))
		);
	}

	#[test]
	fn drag_past_threshold_pins_the_node_and_suppresses_selection() {
		let mut state = pair_state();
		let config = ScaleConfig::default();
		state.pointer_down(500.0, 300.0, &config);
		state.pointer_move(520.0, 330.0, &config);

		assert!(state.is_dragging());
		let a = state.sim.body("a").unwrap();
		assert_eq!((a.x, a.y), (520.0, 330.0));
		assert_eq!(a.pin, Pin::PinnedAt { x: 520.0, y: 330.0 });
		// Only the dragged node was pinned.
		assert_eq!(state.sim.body("b").unwrap().pin, Pin::Free);

		assert_eq!(state.pointer_up(), None);
		assert_eq!(state.sim.body("a").unwrap().pin, Pin::Free);
	}

	#[test]
	fn background_click_clears_selection() {
		let mut state = single_node_state();
		let config = ScaleConfig::default();
		state.pointer_down(10.0, 10.0, &config);
		assert_eq!(state.pointer_up(), Some(PointerAction::ClearSelection));
	}

	#[test]
	fn background_drag_pans_without_emitting_actions() {
		let mut state = single_node_state();
		let config = ScaleConfig::default();
		state.pointer_down(10.0, 10.0, &config);
		state.pointer_move(40.0, 25.0, &config);
		assert_eq!(state.pointer_up(), None);
		assert_eq!(state.transform.x, 30.0);
		assert_eq!(state.transform.y, 15.0);
	}

	#[test]
	fn pointer_leave_releases_a_mid_drag_pin() {
		let mut state = single_node_state();
		let config = ScaleConfig::default();
		state.pointer_down(500.0, 300.0, &config);
		state.pointer_move(530.0, 330.0, &config);
		assert!(state.is_dragging());
		state.pointer_leave();
		assert_eq!(state.sim.body("a").unwrap().pin, Pin::Free);
		assert_eq!(state.pointer_up(), None);
	}

	#[test]
	fn releasing_a_long_held_drag_resumes_the_simulation() {
		let mut state = pair_state();
		let config = ScaleConfig::default();
		state.pointer_down(500.0, 300.0, &config);
		state.pointer_move(530.0, 330.0, &config);
		assert!(state.is_dragging());

		// Hold the drag until the cooling schedule bottoms out.
		while state.sim.tick() {}
		assert!(state.sim.is_idle());

		assert_eq!(state.pointer_up(), None);
		assert!(!state.sim.is_idle());
		assert!(state.sim.tick());
	}

	#[test]
	fn abandoning_a_long_held_drag_resumes_the_simulation() {
		let mut state = pair_state();
		let config = ScaleConfig::default();
		state.pointer_down(500.0, 300.0, &config);
		state.pointer_move(530.0, 330.0, &config);
		while state.sim.tick() {}
		assert!(state.sim.is_idle());

		state.pointer_leave();
		assert_eq!(state.sim.body("a").unwrap().pin, Pin::Free);
		assert!(state.sim.tick());
	}

	#[test]
	fn zoom_is_clamped_and_anchored_at_the_cursor() {
		let mut state = single_node_state();
		for _ in 0..100 {
			state.zoom(400.0, 300.0, -1.0);
		}
		assert!(state.transform.k <= 10.0);
		for _ in 0..200 {
			state.zoom(400.0, 300.0, 1.0);
		}
		assert!(state.transform.k >= 0.1);
	}
}
