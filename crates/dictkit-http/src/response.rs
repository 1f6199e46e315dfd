//! Admin API response envelope

use dictkit_core::{DictError, DictResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope wrapping every admin API response
///
/// ```json
/// {"code": "0", "msg": "ok", "success": true, "timestamp": 1700000000000, "data": [...]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRes<T> {
	/// Business status code, a string or a number depending on the backend
	#[serde(default)]
	pub code: Value,
	#[serde(default)]
	pub msg: String,
	pub success: bool,
	#[serde(default)]
	pub timestamp: Option<i64>,
	pub data: Option<T>,
}

impl<T> ApiRes<T> {
	/// Business code rendered as text
	pub fn code_text(&self) -> String {
		match &self.code {
			Value::String(code) => code.clone(),
			Value::Null => String::new(),
			other => other.to_string(),
		}
	}

	/// Unwrap the payload, turning an unsuccessful envelope into an error
	///
	/// # Examples
	///
	/// ```
	/// use dictkit_http::ApiRes;
	///
	/// let ok: ApiRes<Vec<u32>> =
	/// 	serde_json::from_str(r#"{"code": "0", "msg": "ok", "success": true, "data": [1, 2]}"#).unwrap();
	/// assert_eq!(ok.into_result().unwrap(), Some(vec![1, 2]));
	///
	/// let failed: ApiRes<Vec<u32>> =
	/// 	serde_json::from_str(r#"{"code": 401, "msg": "token expired", "success": false}"#).unwrap();
	/// assert_eq!(failed.into_result().unwrap_err().to_string(), "API error 401: token expired");
	/// ```
	pub fn into_result(self) -> DictResult<Option<T>> {
		if self.success {
			Ok(self.data)
		} else {
			Err(DictError::Api {
				code: self.code_text(),
				message: self.msg,
			})
		}
	}
}
