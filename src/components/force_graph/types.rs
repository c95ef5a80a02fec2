//! Graph data structures delivered by the concept graph service.

use std::collections::HashSet;
use std::fmt;

use log::warn;
use serde::Deserialize;

/// A node in the graph, backed by a concept record on the server.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in edges
	/// and to fetch the backing concept record.
	pub id: String,
	/// Display label rendered next to the node.
	pub label: String,
}

/// A directed, labeled edge between two nodes.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphEdge {
	/// Unique identifier for this edge (its own id space, distinct from nodes).
	pub id: String,
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Relationship label rendered along the edge.
	pub label: String,
}

/// Complete graph data: nodes and edges, as fetched in one response.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

/// Reasons a fetched graph cannot be loaded.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphDataError {
	/// Two nodes share the same id. Rendering either would be a guess, so
	/// the whole load is rejected.
	DuplicateNodeId(String),
}

impl fmt::Display for GraphDataError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			GraphDataError::DuplicateNodeId(id) => {
				write!(f, "graph contains duplicate node id {id:?}")
			}
		}
	}
}

impl GraphData {
	/// Validate fetched data before it reaches the simulation.
	///
	/// Duplicate node ids fail the whole load. Edges whose `source` or
	/// `target` does not resolve to a known node are dropped with a
	/// warning; they are never rendered or simulated.
	pub fn validated(mut self) -> Result<GraphData, GraphDataError> {
		let mut seen = HashSet::with_capacity(self.nodes.len());
		for node in &self.nodes {
			if !seen.insert(node.id.as_str()) {
				return Err(GraphDataError::DuplicateNodeId(node.id.clone()));
			}
		}

		self.edges.retain(|edge| {
			let resolved =
				seen.contains(edge.source.as_str()) && seen.contains(edge.target.as_str());
			if !resolved {
				warn!(
					"dropping edge {:?}: endpoint {:?} -> {:?} not in node set",
					edge.id, edge.source, edge.target
				);
			}
			resolved
		});

		Ok(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str) -> GraphNode {
		GraphNode {
			id: id.to_string(),
			label: id.to_uppercase(),
		}
	}

	fn edge(id: &str, source: &str, target: &str) -> GraphEdge {
		GraphEdge {
			id: id.to_string(),
			source: source.to_string(),
			target: target.to_string(),
			label: "knows".to_string(),
		}
	}

	#[test]
	fn valid_graph_passes_through_unchanged() {
		let data = GraphData {
			nodes: vec![node("a"), node("b")],
			edges: vec![edge("e1", "a", "b")],
		};
		let validated = data.clone().validated().unwrap();
		assert_eq!(validated, data);
	}

	#[test]
	fn duplicate_node_id_rejects_the_whole_load() {
		let data = GraphData {
			nodes: vec![node("a"), node("b"), node("a")],
			edges: vec![],
		};
		assert_eq!(
			data.validated(),
			Err(GraphDataError::DuplicateNodeId("a".to_string()))
		);
	}

	#[test]
	fn dangling_edges_are_dropped_silently() {
		let data = GraphData {
			nodes: vec![node("a"), node("b")],
			edges: vec![
				edge("e1", "a", "b"),
				edge("e2", "a", "ghost"),
				edge("e3", "ghost", "b"),
			],
		};
		let validated = data.validated().unwrap();
		assert_eq!(validated.nodes.len(), 2);
		assert_eq!(validated.edges.len(), 1);
		assert_eq!(validated.edges[0].id, "e1");
	}

	#[test]
	fn wire_shape_deserializes() {
		let json = r#"{
			"nodes": [{"id": "a", "label": "Alice"}, {"id": "b", "label": "Bob"}],
			"edges": [{"id": "e1", "source": "a", "target": "b", "label": "knows"}]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.edges[0].label, "knows");
	}
}
