//! Force-directed graph visualization component.
//!
//! Renders an interactive force-directed graph on an HTML canvas with:
//! - Physics-based node positioning with an alpha cooling schedule
//! - Node dragging (pinning), click selection, pan, and zoom
//! - Id-keyed node identity that survives every tick and gesture
//! - Configurable theming and zoom-aware visual scaling
//!
//! # Example
//!
//! ```ignore
//! use concept_graph_viz::{ForceGraphCanvas, GraphData, GraphNode, GraphEdge};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode { id: "a".into(), label: "Alice".into() },
//!         GraphNode { id: "b".into(), label: "Bob".into() },
//!     ],
//!     edges: vec![
//!         GraphEdge { id: "e1".into(), source: "a".into(), target: "b".into(), label: "knows".into() },
//!     ],
//! }
//! .validated()?;
//!
//! view! { <ForceGraphCanvas data=data selected=selected on_select=on_select /> }
//! ```

mod component;
mod render;
pub mod scale;
mod simulation;
mod state;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use simulation::{Body, Link, Pin, Simulation};
pub use state::{GraphViewState, PointerAction, ViewTransform};
pub use theme::Theme;
pub use types::{GraphData, GraphDataError, GraphEdge, GraphNode};
