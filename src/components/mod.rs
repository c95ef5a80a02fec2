//! UI components for the concept graph client.

pub mod concept_form;
pub mod force_graph;
pub mod inspector;
