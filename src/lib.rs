//! concept-graph-viz: interactive force-directed visualization for the
//! concept graph service.
//!
//! This crate provides a WASM-based client that fetches a node/edge graph
//! from the service, lays it out with a physics simulation, and lets the
//! user drag nodes, click a node to inspect its backing concept record,
//! and create new concepts that trigger a live refresh.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, info};

pub mod api;
pub mod components;

use components::concept_form::ConceptForm;
use components::inspector::ConceptInspector;
pub use components::force_graph::{ForceGraphCanvas, GraphData, GraphEdge, GraphNode};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("concept-graph-viz: logging initialized");
}

/// Main application component.
///
/// Owns the cross-component state: the last good graph data, the current
/// selection, and the refresh token. A token bump (after a successful
/// concept creation) refetches the graph; new data mounts a fresh canvas
/// instance so no simulation state survives a refresh, while a failed
/// fetch only sets the status line and keeps the previous graph rendered.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	// Last successfully validated graph; never blanked by a failed refresh.
	let graph = RwSignal::new(None::<GraphData>);
	// At most one selected node id; kept across refreshes.
	let selected = RwSignal::new(None::<String>);
	let refresh = RwSignal::new(0u32);
	let status = RwSignal::new(None::<String>);

	Effect::new(move |_| {
		let token = refresh.get();
		spawn_local(async move {
			let loaded = match api::fetch_graph().await {
				Ok(data) => data.validated().map_err(|e| e.to_string()),
				Err(e) => Err(e.to_string()),
			};
			match loaded {
				Ok(data) => {
					info!(
						"loaded graph (refresh {token}): {} nodes, {} edges",
						data.nodes.len(),
						data.edges.len()
					);
					status.set(None);
					graph.set(Some(data));
				}
				Err(msg) => status.set(Some(format!("Failed to load graph: {msg}"))),
			}
		});
	});

	let on_select = Callback::new(move |id: Option<String>| selected.set(id));
	let on_created = Callback::new(move |_| refresh.update(|token| *token += 1));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Concept Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			{move || match graph.get() {
				Some(data) => view! {
					<ForceGraphCanvas data=data selected=selected on_select=on_select />
				}
				.into_any(),
				None => view! { <p class="graph-status">"Loading graph..."</p> }.into_any(),
			}}
			<div class="graph-overlay">
				<h1>"Concept Graph"</h1>
				<p class="subtitle">
					"Drag nodes to reposition. Click a node to inspect. Scroll to zoom."
				</p>
				{move || status.get().map(|msg| view! { <p class="status-line">{msg}</p> })}
			</div>
			<div class="sidebar">
				<ConceptInspector selected=selected refresh=refresh />
				<ConceptForm on_created=on_created />
			</div>
		</div>
	}
}
