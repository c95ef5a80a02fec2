//! Concept creation form.
//!
//! Submitting posts a new concept to the service. On success the input is
//! cleared and `on_created` fires so the shell can refresh the graph; on
//! failure the input is left as typed so the user can retry.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError, ConceptKind};

/// What a completed submit means for the form and the shell: the status
/// message to show, and whether the creation actually happened (clearing
/// the input and triggering a graph refresh). A failed create must leave
/// the graph alone, so `created` is only true on `Ok`.
fn submit_outcome(result: &Result<String, ApiError>) -> (String, bool) {
	match result {
		Ok(id) => (format!("Created concept {id}"), true),
		Err(e) => (format!("Create failed: {e}"), false),
	}
}

/// Form for creating a new concept record.
#[component]
pub fn ConceptForm(
	/// Invoked after a successful creation; the shell bumps its refresh
	/// token in response.
	on_created: Callback<()>,
) -> impl IntoView {
	let name = RwSignal::new(String::new());
	let kind = RwSignal::new("structured".to_string());
	let status = RwSignal::new(None::<String>);
	let busy = RwSignal::new(false);

	let on_submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		if busy.get_untracked() {
			return;
		}
		let entered = name.get_untracked().trim().to_string();
		if entered.is_empty() {
			status.set(Some("Enter a name first.".to_string()));
			return;
		}
		let chosen = if kind.get_untracked() == "empty" {
			ConceptKind::Empty
		} else {
			ConceptKind::Structured
		};

		busy.set(true);
		spawn_local(async move {
			let result = api::create_concept(chosen, &entered).await;
			let (message, created) = submit_outcome(&result);
			status.set(Some(message));
			if created {
				name.set(String::new());
				on_created.run(());
			}
			// On failure the input is preserved for retry.
			busy.set(false);
		});
	};

	view! {
		<form class="concept-form" on:submit=on_submit>
			<h2>"New concept"</h2>
			<input
				type="text"
				placeholder="Name"
				prop:value=move || name.get()
				on:input=move |ev| name.set(event_target_value(&ev))
			/>
			<select
				prop:value=move || kind.get()
				on:change=move |ev| kind.set(event_target_value(&ev))
			>
				<option value="structured">"Structured"</option>
				<option value="empty">"Empty"</option>
			</select>
			<button type="submit" prop:disabled=move || busy.get()>
				"Create"
			</button>
			{move || status.get().map(|msg| view! { <p class="form-status">{msg}</p> })}
		</form>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn successful_create_reports_the_new_id_and_fires_the_refresh() {
		let (message, created) = submit_outcome(&Ok("concept-42".to_string()));
		assert!(created);
		assert_eq!(message, "Created concept concept-42");
	}

	#[test]
	fn failed_create_does_not_trigger_a_refresh() {
		let (message, created) =
			submit_outcome(&Err(ApiError::Network("connection refused".to_string())));
		assert!(!created);
		assert!(message.starts_with("Create failed:"));

		let (_, created) = submit_outcome(&Err(ApiError::Status(500)));
		assert!(!created);
	}
}
