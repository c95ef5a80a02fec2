//! Force-directed layout simulation.
//!
//! An iterative relaxation solver: each tick composes a spring force along
//! every edge, pairwise charge repulsion between all nodes, and a centering
//! bias toward the canvas midpoint, then integrates velocities with decay.
//! A cooling factor (alpha) starts hot and decays toward zero; once it
//! crosses the idle threshold the simulation stops mutating anything until
//! it is reheated.
//!
//! Bodies are keyed by node id for their whole lifetime: the index map is
//! built once at construction and never reassigned, so the same logical
//! node always owns the same position/velocity carrier.

use std::collections::HashMap;
use std::f64::consts::{PI, TAU};

use super::types::GraphData;

/// Rest length of the spring along each edge, in world units.
const LINK_DISTANCE: f64 = 100.0;
/// Spring stiffness for the link force.
const LINK_STRENGTH: f64 = 0.1;
/// Charge constant; negative means all node pairs repel.
const CHARGE_STRENGTH: f64 = -200.0;
/// Alpha value a fresh simulation starts at.
const ALPHA_INITIAL: f64 = 1.0;
/// Below this alpha the simulation is idle and ticks are no-ops.
const ALPHA_MIN: f64 = 0.001;
/// Per-tick multiplicative cooling. Reaches `ALPHA_MIN` from 1.0 in
/// roughly 300 ticks, a few seconds at animation-frame rate.
const ALPHA_DECAY: f64 = 0.0228;
/// Alpha restored by [`Simulation::reheat`] when a drag begins.
const ALPHA_REHEAT: f64 = 0.3;
/// Velocity retained after each integration step.
const VELOCITY_DECAY: f64 = 0.6;
/// Floor for pairwise distances so coincident bodies never divide by zero.
const MIN_DISTANCE: f64 = 1.0;
/// Radius of the circle initial positions are seeded on.
const SEED_RADIUS: f64 = 100.0;

/// Whether a body follows the forces or is held at an exact position.
///
/// Pinning is used while the user drags a node: the integrator skips force
/// application for pinned bodies entirely, so the contract is carried by
/// the type rather than by convention.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pin {
	/// Normal physics apply.
	Free,
	/// Held at exactly this position; forces and integration are skipped.
	PinnedAt {
		/// Held x coordinate, world units.
		x: f64,
		/// Held y coordinate, world units.
		y: f64,
	},
}

/// Position/velocity carrier for one graph node.
#[derive(Clone, Debug)]
pub struct Body {
	/// Node id this body belongs to, stable for the body's lifetime.
	pub id: String,
	/// Display label, carried here so the renderer needs no side lookup.
	pub label: String,
	/// Current x position, world units.
	pub x: f64,
	/// Current y position, world units.
	pub y: f64,
	/// Current x velocity.
	pub vx: f64,
	/// Current y velocity.
	pub vy: f64,
	/// Free vs. pinned physics state.
	pub pin: Pin,
}

impl Body {
	fn is_free(&self) -> bool {
		self.pin == Pin::Free
	}
}

/// A resolved edge: endpoint indices into the body vector plus display data.
#[derive(Clone, Debug)]
pub struct Link {
	/// Edge id from the source data.
	pub id: String,
	/// Relationship label rendered along the edge.
	pub label: String,
	/// Index of the source body.
	pub source: usize,
	/// Index of the target body.
	pub target: usize,
}

/// The layout simulation for one loaded graph.
pub struct Simulation {
	bodies: Vec<Body>,
	links: Vec<Link>,
	id_to_index: HashMap<String, usize>,
	alpha: f64,
	center_x: f64,
	center_y: f64,
}

impl Simulation {
	/// Build a simulation from validated graph data, seeding positions on
	/// a circle around the canvas center. Edges are assumed to resolve;
	/// anything dangling was already dropped by validation, but unresolved
	/// entries are skipped here as well rather than trusted.
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let (center_x, center_y) = (width / 2.0, height / 2.0);
		let count = data.nodes.len().max(1);

		let mut id_to_index = HashMap::with_capacity(data.nodes.len());
		let bodies: Vec<Body> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let angle = (i as f64) * 2.0 * PI / count as f64;
				id_to_index.insert(node.id.clone(), i);
				Body {
					id: node.id.clone(),
					label: node.label.clone(),
					x: center_x + SEED_RADIUS * angle.cos(),
					y: center_y + SEED_RADIUS * angle.sin(),
					vx: 0.0,
					vy: 0.0,
					pin: Pin::Free,
				}
			})
			.collect();

		let links = data
			.edges
			.iter()
			.filter_map(|edge| {
				let source = *id_to_index.get(&edge.source)?;
				let target = *id_to_index.get(&edge.target)?;
				Some(Link {
					id: edge.id.clone(),
					label: edge.label.clone(),
					source,
					target,
				})
			})
			.collect();

		Self {
			bodies,
			links,
			id_to_index,
			alpha: ALPHA_INITIAL,
			center_x,
			center_y,
		}
	}

	/// All bodies, in load order.
	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	/// All resolved links, in load order.
	pub fn links(&self) -> &[Link] {
		&self.links
	}

	/// Look up the body for a node id.
	pub fn body(&self, id: &str) -> Option<&Body> {
		self.id_to_index.get(id).map(|&i| &self.bodies[i])
	}

	/// Current cooling factor.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// True once alpha has cooled below the idle threshold (or the graph
	/// is empty). Idle simulations mutate nothing until reheated.
	pub fn is_idle(&self) -> bool {
		self.bodies.is_empty() || self.alpha < ALPHA_MIN
	}

	/// Restart the cooling schedule, e.g. when a drag begins. Never lowers
	/// an already-hot alpha.
	pub fn reheat(&mut self) {
		self.alpha = self.alpha.max(ALPHA_REHEAT);
	}

	/// Hold the body for `id` at exactly `(x, y)`, suspending its physics.
	/// Unknown ids are a no-op (the node may have vanished in a refresh).
	pub fn pin(&mut self, id: &str, x: f64, y: f64) {
		if let Some(&i) = self.id_to_index.get(id) {
			let body = &mut self.bodies[i];
			body.pin = Pin::PinnedAt { x, y };
			body.x = x;
			body.y = y;
			body.vx = 0.0;
			body.vy = 0.0;
		}
	}

	/// Release a pinned body back to force integration. Unknown ids are a
	/// no-op.
	pub fn release(&mut self, id: &str) {
		if let Some(&i) = self.id_to_index.get(id) {
			self.bodies[i].pin = Pin::Free;
		}
	}

	/// Advance the simulation one step. Returns `false` without touching
	/// any state when the simulation is idle or empty.
	pub fn tick(&mut self) -> bool {
		if self.is_idle() {
			return false;
		}

		self.apply_link_force();
		self.apply_charge_force();
		self.integrate();
		self.recenter();

		self.alpha *= 1.0 - ALPHA_DECAY;
		true
	}

	/// Spring force pulling each link's endpoints toward the rest distance.
	fn apply_link_force(&mut self) {
		for li in 0..self.links.len() {
			let (s, t) = (self.links[li].source, self.links[li].target);
			let dx = self.bodies[t].x - self.bodies[s].x;
			let dy = self.bodies[t].y - self.bodies[s].y;
			let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);

			let f = (dist - LINK_DISTANCE) / dist * LINK_STRENGTH * self.alpha;
			let (fx, fy) = (dx * f * 0.5, dy * f * 0.5);

			if self.bodies[s].is_free() {
				self.bodies[s].vx += fx;
				self.bodies[s].vy += fy;
			}
			if self.bodies[t].is_free() {
				self.bodies[t].vx -= fx;
				self.bodies[t].vy -= fy;
			}
		}
	}

	/// Pairwise repulsion. Coincident bodies get a deterministic jittered
	/// direction instead of a division by zero.
	fn apply_charge_force(&mut self) {
		for i in 0..self.bodies.len() {
			for j in (i + 1)..self.bodies.len() {
				let dx = self.bodies[i].x - self.bodies[j].x;
				let dy = self.bodies[i].y - self.bodies[j].y;
				let dist_sq = (dx * dx + dy * dy).max(MIN_DISTANCE * MIN_DISTANCE);
				let dist = dist_sq.sqrt();

				let (ux, uy) = if dx * dx + dy * dy < MIN_DISTANCE * MIN_DISTANCE {
					let angle = ((i as f64) * 0.618_034 + (j as f64) * 0.414_214) * TAU;
					(angle.cos(), angle.sin())
				} else {
					(dx / dist, dy / dist)
				};

				let push = -CHARGE_STRENGTH * self.alpha / dist_sq;
				if self.bodies[i].is_free() {
					self.bodies[i].vx += ux * push;
					self.bodies[i].vy += uy * push;
				}
				if self.bodies[j].is_free() {
					self.bodies[j].vx -= ux * push;
					self.bodies[j].vy -= uy * push;
				}
			}
		}
	}

	/// Integrate velocities with decay; pinned bodies are re-asserted at
	/// their held position with zero velocity.
	fn integrate(&mut self) {
		for body in &mut self.bodies {
			match body.pin {
				Pin::Free => {
					body.vx *= VELOCITY_DECAY;
					body.vy *= VELOCITY_DECAY;
					body.x += body.vx;
					body.y += body.vy;
				}
				Pin::PinnedAt { x, y } => {
					body.x = x;
					body.y = y;
					body.vx = 0.0;
					body.vy = 0.0;
				}
			}
		}
	}

	/// Shift free bodies so the overall centroid sits on the canvas center.
	fn recenter(&mut self) {
		let n = self.bodies.len() as f64;
		let cx: f64 = self.bodies.iter().map(|b| b.x).sum::<f64>() / n;
		let cy: f64 = self.bodies.iter().map(|b| b.y).sum::<f64>() / n;
		let (dx, dy) = (cx - self.center_x, cy - self.center_y);

		for body in &mut self.bodies {
			if body.is_free() {
				body.x -= dx;
				body.y -= dy;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphEdge, GraphNode};

	fn graph(nodes: &[&str], edges: &[(&str, &str, &str)]) -> GraphData {
		GraphData {
			nodes: nodes
				.iter()
				.map(|id| GraphNode {
					id: id.to_string(),
					label: id.to_uppercase(),
				})
				.collect(),
			edges: edges
				.iter()
				.map(|(id, source, target)| GraphEdge {
					id: id.to_string(),
					source: source.to_string(),
					target: target.to_string(),
					label: "knows".to_string(),
				})
				.collect(),
		}
	}

	fn positions(sim: &Simulation) -> Vec<(f64, f64)> {
		sim.bodies().iter().map(|b| (b.x, b.y)).collect()
	}

	#[test]
	fn bodies_and_links_are_keyed_by_id() {
		let sim = Simulation::new(
			&graph(&["a", "b", "c"], &[("e1", "a", "b"), ("e2", "b", "c")]),
			800.0,
			600.0,
		);
		assert_eq!(sim.bodies().len(), 3);
		assert_eq!(sim.links().len(), 2);
		assert_eq!(sim.body("b").unwrap().label, "B");
		assert!(sim.body("ghost").is_none());
	}

	#[test]
	fn empty_graph_emits_no_ticks() {
		let mut sim = Simulation::new(&graph(&[], &[]), 800.0, 600.0);
		assert!(sim.is_idle());
		assert!(!sim.tick());
	}

	#[test]
	fn alpha_cools_monotonically_to_an_idle_terminal_state() {
		let mut sim = Simulation::new(&graph(&["a", "b"], &[("e1", "a", "b")]), 800.0, 600.0);
		let mut previous = sim.alpha();
		let mut ticks = 0;
		while sim.tick() {
			assert!(sim.alpha() < previous, "alpha must strictly decrease");
			previous = sim.alpha();
			ticks += 1;
			assert!(ticks < 400, "simulation failed to converge");
		}
		assert!(sim.is_idle());

		// Idle ticks must be no-ops.
		let frozen = positions(&sim);
		assert!(!sim.tick());
		assert_eq!(positions(&sim), frozen);
	}

	#[test]
	fn reheat_restarts_the_cooling_schedule() {
		let mut sim = Simulation::new(&graph(&["a", "b"], &[("e1", "a", "b")]), 800.0, 600.0);
		while sim.tick() {}
		assert!(sim.is_idle());
		sim.reheat();
		assert!(!sim.is_idle());
		assert!(sim.tick());
	}

	#[test]
	fn pinned_body_holds_its_position_while_others_integrate() {
		let mut sim = Simulation::new(
			&graph(&["a", "b", "c"], &[("e1", "a", "b"), ("e2", "b", "c")]),
			800.0,
			600.0,
		);
		sim.pin("a", 50.0, 60.0);
		let before_b = (sim.body("b").unwrap().x, sim.body("b").unwrap().y);
		sim.tick();

		let a = sim.body("a").unwrap();
		assert_eq!((a.x, a.y), (50.0, 60.0));
		let b = sim.body("b").unwrap();
		assert_ne!((b.x, b.y), before_b, "free bodies keep integrating");
	}

	#[test]
	fn coincident_bodies_never_produce_nan() {
		let mut sim = Simulation::new(&graph(&["a", "b"], &[]), 800.0, 600.0);
		sim.pin("a", 400.0, 300.0);
		sim.pin("b", 400.0, 300.0);
		sim.release("a");
		sim.release("b");
		for _ in 0..50 {
			sim.tick();
		}
		for body in sim.bodies() {
			assert!(body.x.is_finite() && body.y.is_finite());
		}
		// Repulsion with jitter must have separated them.
		let (a, b) = (sim.body("a").unwrap(), sim.body("b").unwrap());
		assert!((a.x - b.x).abs() + (a.y - b.y).abs() > 1.0);
	}

	#[test]
	fn disconnected_node_is_still_moved_by_repulsion_and_centering() {
		let mut sim = Simulation::new(&graph(&["a", "b", "c"], &[("e1", "a", "b")]), 800.0, 600.0);
		let before = (sim.body("c").unwrap().x, sim.body("c").unwrap().y);
		for _ in 0..50 {
			sim.tick();
		}
		let c = sim.body("c").unwrap();
		assert!(c.x.is_finite() && c.y.is_finite());
		assert_ne!((c.x, c.y), before);
	}

	#[test]
	fn fetched_graph_lays_out_to_convergence() {
		let json = r#"{
			"nodes": [{"id": "a", "label": "Alice"}, {"id": "b", "label": "Bob"}],
			"edges": [{"id": "e1", "source": "a", "target": "b", "label": "knows"}]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		let mut sim = Simulation::new(&data.validated().unwrap(), 800.0, 600.0);
		assert_eq!(sim.bodies().len(), 2);
		assert_eq!(sim.links().len(), 1);

		let mut ticks = 0;
		while sim.tick() {
			ticks += 1;
			assert!(ticks < 400, "layout must converge in a bounded tick count");
		}
		assert!(sim.is_idle());

		// Linked nodes settle near the rest distance, identities intact.
		let (a, b) = (sim.body("a").unwrap(), sim.body("b").unwrap());
		assert_eq!(a.label, "Alice");
		assert_eq!(b.label, "Bob");
		let dist = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
		assert!(dist.is_finite() && dist > 10.0);
	}

	#[test]
	fn pin_and_release_on_unknown_ids_are_no_ops() {
		let mut sim = Simulation::new(&graph(&["a"], &[]), 800.0, 600.0);
		sim.pin("ghost", 0.0, 0.0);
		sim.release("ghost");
		assert_eq!(sim.bodies().len(), 1);
	}
}
