//! Concept inspector panel.
//!
//! Shows the record backing the currently selected node. Fetches are
//! keyed by the most recently requested id: a response arriving for any
//! other id is stale (the selection moved on, or a refresh superseded it)
//! and is discarded instead of overwriting newer state.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use serde_json::Value;

use crate::api::{self, ConceptData};

/// Text shown for a concept that exists but carries no data.
const EMPTY_CONCEPT_TEXT: &str = "(No data - Empty Concept)";
/// Text shown when the payload does not match any known variant.
const INVALID_FORMAT_TEXT: &str = "(Invalid concept data format)";

/// What the inspector currently displays.
#[derive(Clone, Debug, PartialEq)]
enum InspectorView {
	/// No node selected.
	Idle,
	/// Fetch in flight for this id.
	Loading(String),
	/// Fetched and formatted concept body.
	Loaded { id: String, body: String },
	/// The selected id no longer resolves to a record.
	NotFound(String),
	/// Fetch failed for a reason other than absence.
	Failed(String),
}

/// Format a concept's `data` field for display.
///
/// Structured payloads are parsed and pretty-printed; empty concepts and
/// unrecognized shapes get fixed explanatory text.
fn format_concept_data(data: &Value) -> String {
	match ConceptData::from_value(data) {
		Some(ConceptData::Empty) => EMPTY_CONCEPT_TEXT.to_string(),
		Some(ConceptData::Structured(doc)) => match serde_json::from_str::<Value>(&doc) {
			Ok(parsed) => serde_json::to_string_pretty(&parsed).unwrap_or(doc),
			Err(_) => INVALID_FORMAT_TEXT.to_string(),
		},
		None => INVALID_FORMAT_TEXT.to_string(),
	}
}

/// Sidebar panel rendering the record behind the selected node.
///
/// Also tracks the refresh token: after a refresh the selection is kept,
/// so the record is refetched and a vanished id surfaces as "not found"
/// rather than stale data.
#[component]
pub fn ConceptInspector(
	/// Currently selected node id, owned by the shell.
	#[prop(into)]
	selected: Signal<Option<String>>,
	/// Refresh token; a change refetches the current selection.
	#[prop(into)]
	refresh: Signal<u32>,
) -> impl IntoView {
	let inspector = RwSignal::new(InspectorView::Idle);
	// Most recently requested id; the staleness key for responses.
	let requested = RwSignal::new(None::<String>);

	Effect::new(move |_| {
		refresh.track();
		match selected.get() {
			None => {
				requested.set(None);
				inspector.set(InspectorView::Idle);
			}
			Some(id) => {
				requested.set(Some(id.clone()));
				inspector.set(InspectorView::Loading(id.clone()));
				spawn_local(async move {
					let result = api::fetch_concept(&id).await;
					if requested.get_untracked().as_deref() != Some(id.as_str()) {
						warn!("discarding stale concept response for {id:?}");
						return;
					}
					let next = match result {
						Ok(record) => InspectorView::Loaded {
							id: record.id,
							body: format_concept_data(&record.data),
						},
						Err(e) if e.is_not_found() => InspectorView::NotFound(id.clone()),
						Err(e) => InspectorView::Failed(e.to_string()),
					};
					inspector.set(next);
				});
			}
		}
	});

	view! {
		<div class="inspector">
			<h2>"Inspector"</h2>
			{move || match inspector.get() {
				InspectorView::Idle => {
					view! { <p class="inspector-hint">"Click a node to inspect its concept."</p> }
						.into_any()
				}
				InspectorView::Loading(id) => {
					view! { <p class="inspector-hint">"Loading " {id} "..."</p> }.into_any()
				}
				InspectorView::Loaded { id, body } => view! {
					<div>
						<p class="inspector-id">{id}</p>
						<pre class="inspector-body">{body}</pre>
					</div>
				}
				.into_any(),
				InspectorView::NotFound(id) => {
					view! { <p class="inspector-error">"Concept " {id} " not found."</p> }
						.into_any()
				}
				InspectorView::Failed(msg) => {
					view! { <p class="inspector-error">{msg}</p> }.into_any()
				}
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_concept_renders_the_literal_placeholder() {
		let data: Value = serde_json::from_str(r#"{"Empty": {}}"#).unwrap();
		assert_eq!(format_concept_data(&data), "(No data - Empty Concept)");
	}

	#[test]
	fn structured_concept_is_pretty_printed() {
		let data: Value = serde_json::from_str(r#"{"Structured": "{\"x\":1}"}"#).unwrap();
		assert_eq!(format_concept_data(&data), "{\n  \"x\": 1\n}");
	}

	#[test]
	fn structured_concept_with_invalid_inner_json_is_flagged() {
		let data: Value = serde_json::from_str(r#"{"Structured": "not json"}"#).unwrap();
		assert_eq!(format_concept_data(&data), INVALID_FORMAT_TEXT);
	}

	#[test]
	fn unknown_payload_shapes_are_flagged_not_thrown() {
		let data: Value = serde_json::from_str(r#"{"Mystery": 7}"#).unwrap();
		assert_eq!(format_concept_data(&data), INVALID_FORMAT_TEXT);
	}
}
