//! HTTP boundary to the concept graph service.
//!
//! Three operations cross this boundary: fetch the whole graph, fetch a
//! single concept record, and create a concept. All requests go through
//! the browser fetch API and resolve on the single-threaded event loop;
//! failures surface as [`ApiError`] values for the UI to display, never
//! as panics.

use std::fmt;

use js_sys::Reflect;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::components::force_graph::GraphData;

/// Errors from the service boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiError {
	/// The request never completed (network failure, CORS, etc).
	Network(String),
	/// The server answered with a non-success status code.
	Status(u16),
	/// The response body did not match the documented wire shape.
	Format(String),
}

impl ApiError {
	/// Whether this error means the requested record does not exist.
	pub fn is_not_found(&self) -> bool {
		matches!(self, ApiError::Status(404))
	}
}

impl fmt::Display for ApiError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ApiError::Network(msg) => write!(f, "network error: {msg}"),
			ApiError::Status(code) => write!(f, "server responded with status {code}"),
			ApiError::Format(msg) => write!(f, "unexpected response format: {msg}"),
		}
	}
}

/// A concept record as returned by `GET /concepts/{id}`.
///
/// `data` is kept as a raw JSON value; [`ConceptData::from_value`] decides
/// whether it matches a known variant, so an unknown shape degrades to an
/// explicit invalid-format message instead of a deserialization error.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ConceptRecord {
	/// Concept id, matching the graph node id.
	pub id: String,
	/// Tagged payload variant, parsed leniently.
	pub data: Value,
}

/// The payload variants a concept can carry.
#[derive(Clone, Debug, PartialEq)]
pub enum ConceptData {
	/// Pure structural node with no attached data.
	Empty,
	/// A JSON document, stored encoded as a string.
	Structured(String),
}

impl ConceptData {
	/// Interpret the wire `data` field. The backend serializes the unit
	/// variant either as the bare string `"Empty"` or as an object tag
	/// (`{"Empty": {}}` / `{"Empty": null}`); structured payloads arrive
	/// as `{"Structured": "<json>"}`. Anything else is `None`.
	pub fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::String(tag) if tag == "Empty" => Some(ConceptData::Empty),
			Value::Object(map) if map.len() == 1 => {
				let (tag, inner) = map.iter().next()?;
				match (tag.as_str(), inner) {
					("Empty", _) => Some(ConceptData::Empty),
					("Structured", Value::String(doc)) => {
						Some(ConceptData::Structured(doc.clone()))
					}
					_ => None,
				}
			}
			_ => None,
		}
	}
}

/// Kind selector for concept creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConceptKind {
	/// Concept carrying a structured JSON document.
	Structured,
	/// Pure structural concept with no data.
	Empty,
}

#[derive(Serialize)]
struct CreateConceptPayload {
	data: Value,
}

#[derive(Deserialize)]
struct CreateConceptResponse {
	concept_id: String,
}

impl CreateConceptPayload {
	fn new(kind: ConceptKind, name: &str) -> Self {
		let data = match kind {
			ConceptKind::Structured => serde_json::json!({ "type": "concept", "name": name }),
			ConceptKind::Empty => Value::Null,
		};
		Self { data }
	}
}

/// Base URL for service requests. An optional `window.CONCEPT_GRAPH_API`
/// global overrides the default same-origin relative paths.
fn base_url() -> String {
	web_sys::window()
		.and_then(|w| Reflect::get(&w, &JsValue::from_str("CONCEPT_GRAPH_API")).ok())
		.and_then(|v| v.as_string())
		.map(|base| base.trim_end_matches('/').to_string())
		.unwrap_or_default()
}

/// Issue a request and return the response body text.
async fn request_text(method: &str, path: &str, body: Option<String>) -> Result<String, ApiError> {
	let opts = RequestInit::new();
	opts.set_method(method);
	if let Some(body) = body {
		opts.set_body(&JsValue::from_str(&body));
	}

	let url = format!("{}{}", base_url(), path);
	let request = Request::new_with_str_and_init(&url, &opts)
		.map_err(|e| ApiError::Network(format!("{e:?}")))?;
	request
		.headers()
		.set("Content-Type", "application/json")
		.map_err(|e| ApiError::Network(format!("{e:?}")))?;

	let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
	let response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(|e| ApiError::Network(format!("{e:?}")))?;
	let response: Response = response
		.dyn_into()
		.map_err(|_| ApiError::Format("fetch did not yield a Response".to_string()))?;

	if !response.ok() {
		return Err(ApiError::Status(response.status()));
	}

	let text = JsFuture::from(
		response
			.text()
			.map_err(|e| ApiError::Network(format!("{e:?}")))?,
	)
	.await
	.map_err(|e| ApiError::Network(format!("{e:?}")))?;

	text.as_string()
		.ok_or_else(|| ApiError::Format("response body is not text".to_string()))
}

/// Fetch the complete graph. The caller is responsible for validating the
/// data before loading it into a simulation.
pub async fn fetch_graph() -> Result<GraphData, ApiError> {
	let body = request_text("GET", "/graph", None).await?;
	serde_json::from_str(&body).map_err(|e| ApiError::Format(e.to_string()))
}

/// Fetch the concept record backing a graph node.
pub async fn fetch_concept(id: &str) -> Result<ConceptRecord, ApiError> {
	let body = request_text("GET", &format!("/concepts/{id}"), None).await?;
	serde_json::from_str(&body).map_err(|e| ApiError::Format(e.to_string()))
}

/// Create a new concept. Returns the id assigned by the server.
pub async fn create_concept(kind: ConceptKind, name: &str) -> Result<String, ApiError> {
	let payload = serde_json::to_string(&CreateConceptPayload::new(kind, name))
		.map_err(|e| ApiError::Format(e.to_string()))?;
	let body = request_text("POST", "/concepts", Some(payload)).await?;
	let response: CreateConceptResponse =
		serde_json::from_str(&body).map_err(|e| ApiError::Format(e.to_string()))?;
	Ok(response.concept_id)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn concept_data_accepts_the_bare_empty_tag() {
		let value = serde_json::json!("Empty");
		assert_eq!(ConceptData::from_value(&value), Some(ConceptData::Empty));
	}

	#[test]
	fn concept_data_accepts_object_empty_tags() {
		for raw in [r#"{"Empty": {}}"#, r#"{"Empty": null}"#] {
			let value: Value = serde_json::from_str(raw).unwrap();
			assert_eq!(ConceptData::from_value(&value), Some(ConceptData::Empty));
		}
	}

	#[test]
	fn concept_data_accepts_structured_payloads() {
		let value: Value = serde_json::from_str(r#"{"Structured": "{\"x\":1}"}"#).unwrap();
		assert_eq!(
			ConceptData::from_value(&value),
			Some(ConceptData::Structured("{\"x\":1}".to_string()))
		);
	}

	#[test]
	fn concept_data_rejects_unknown_shapes() {
		for raw in [
			"42",
			r#""Full""#,
			r#"{"Structured": 42}"#,
			r#"{"Empty": {}, "Structured": "x"}"#,
			r#"{"Mystery": "x"}"#,
		] {
			let value: Value = serde_json::from_str(raw).unwrap();
			assert_eq!(ConceptData::from_value(&value), None, "shape: {raw}");
		}
	}

	#[test]
	fn concept_record_deserializes_from_the_wire() {
		let record: ConceptRecord =
			serde_json::from_str(r#"{"id": "a", "data": {"Empty": {}}}"#).unwrap();
		assert_eq!(record.id, "a");
		assert_eq!(ConceptData::from_value(&record.data), Some(ConceptData::Empty));
	}

	#[test]
	fn create_payload_carries_kind_and_name() {
		let payload =
			serde_json::to_value(CreateConceptPayload::new(ConceptKind::Structured, "Alice"))
				.unwrap();
		assert_eq!(payload["data"]["name"], "Alice");
		assert_eq!(payload["data"]["type"], "concept");

		let empty = serde_json::to_value(CreateConceptPayload::new(ConceptKind::Empty, "ignored"))
			.unwrap();
		assert_eq!(empty["data"], Value::Null);
	}

	#[test]
	fn not_found_is_distinguishable() {
		assert!(ApiError::Status(404).is_not_found());
		assert!(!ApiError::Status(500).is_not_found());
		assert!(!ApiError::Network("down".to_string()).is_not_found());
	}
}
