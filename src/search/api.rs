//! Transport-free recommendation endpoint
//!
//! Request:  `{"preferences": {"<any key>": "<term>", ...}, "count": 5}`
//! Response: `200 {"data": [...], "unresolved": [...]}`, or
//! `400`/`500` with `{"error": "<message>"}`.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{Error, Result};

use super::ranker::{Ranker, TopK};
use super::recommend::Recommender;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_SERVER_ERROR: u16 = 500;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
	pub status: u16,
	pub body: Value,
}

impl ApiResponse {
	fn error(err: &Error) -> Self {
		let status = if err.is_client_error() {
			STATUS_BAD_REQUEST
		} else {
			STATUS_SERVER_ERROR
		};
		Self {
			status,
			body: json!({ "error": err.to_string() }),
		}
	}

	pub fn is_success(&self) -> bool {
		self.status == STATUS_OK
	}
}

/// Validated recommendation request
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendRequest {
	/// Preference values; keys of the payload are ignored
	pub preferences: Vec<String>,
	pub count: TopK,
}

impl RecommendRequest {
	pub fn parse(body: &str) -> Result<Self> {
		let value: Value = serde_json::from_str(body)
			.map_err(|e| Error::InvalidArgument(format!("request body is not valid JSON: {}", e)))?;

		let Value::Object(mut fields) = value else {
			return Err(Error::InvalidArgument("request body must be a JSON object".to_string()));
		};

		let preferences = match fields.remove("preferences") {
			Some(Value::Object(map)) => map
				.into_iter()
				.map(|(key, value)| match value {
					Value::String(term) => Ok(term),
					_ => Err(Error::InvalidArgument(format!(
						"preference '{}' must be a string",
						key
					))),
				})
				.collect::<Result<Vec<_>>>()?,
			Some(_) => {
				return Err(Error::InvalidArgument("'preferences' must be a JSON object".to_string()))
			}
			None => return Err(Error::InvalidArgument("missing field 'preferences'".to_string())),
		};

		let count = match fields.remove("count") {
			Some(Value::Number(n)) => match n.as_i64() {
				Some(k) => TopK::new(k)?,
				None => {
					return Err(Error::InvalidArgument(format!(
						"'count' must be a positive integer, got {}",
						n
					)))
				}
			},
			Some(_) => return Err(Error::InvalidArgument("'count' must be a positive integer".to_string())),
			None => return Err(Error::InvalidArgument("missing field 'count'".to_string())),
		};

		Ok(Self { preferences, count })
	}
}

/// Handle one request body; never panics and never leaks internals beyond
/// the error's display message
pub fn handle<R: Ranker>(recommender: &Recommender<R>, body: &str) -> ApiResponse {
	let outcome = RecommendRequest::parse(body)
		.and_then(|request| recommender.recommend(&request.preferences, request.count));

	match outcome {
		Ok(recommendation) => match serde_json::to_value(&recommendation) {
			Ok(body) => ApiResponse {
				status: STATUS_OK,
				body,
			},
			Err(e) => ApiResponse {
				status: STATUS_SERVER_ERROR,
				body: json!({ "error": format!("failed to encode response: {}", e) }),
			},
		},
		Err(err) => {
			crate::ui::debug(&format!("Request rejected: {}", err));
			ApiResponse::error(&err)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn bad(body: &str) -> String {
		match RecommendRequest::parse(body) {
			Err(Error::InvalidArgument(msg)) => msg,
			other => panic!("expected InvalidArgument, got {:?}", other),
		}
	}

	#[test]
	fn parses_valid_request() {
		let request = RecommendRequest::parse(
			r#"{"preferences": {"region": "champagne", "topnote": "herbaceous"}, "count": 3}"#,
		)
		.unwrap();
		assert_eq!(request.count.get(), 3);
		assert_eq!(request.preferences, vec!["champagne", "herbaceous"]);
	}

	#[test]
	fn rejects_invalid_shapes() {
		assert!(bad("not json").contains("not valid JSON"));
		assert!(bad("[1, 2]").contains("JSON object"));
		assert!(bad(r#"{"count": 1}"#).contains("missing field 'preferences'"));
		assert!(bad(r#"{"preferences": {"a": "oak"}}"#).contains("missing field 'count'"));
		assert!(bad(r#"{"preferences": ["oak"], "count": 1}"#).contains("'preferences' must be"));
		assert!(bad(r#"{"preferences": {"a": 4}, "count": 1}"#).contains("preference 'a'"));
		assert!(bad(r#"{"preferences": {}, "count": 0}"#).contains("positive"));
		assert!(bad(r#"{"preferences": {}, "count": -2}"#).contains("positive"));
		assert!(bad(r#"{"preferences": {}, "count": 1.5}"#).contains("positive"));
		assert!(bad(r#"{"preferences": {}, "count": "3"}"#).contains("positive"));
	}
}
