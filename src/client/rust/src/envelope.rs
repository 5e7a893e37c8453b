/* src/client/rust/src/envelope.rs */

use serde::{Deserialize, Serialize};

pub(crate) const CONNECT_FAILED: &str = "Failed to connect to MTR server";
pub(crate) const REQUEST_FAILED: &str = "Request failed";

/// Uniform result of every call. Failures are data, never panics or `Err`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
  pub success: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data: Option<T>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
}

impl<T> ApiResponse<T> {
  pub fn ok(data: T) -> Self {
    Self { success: true, data: Some(data), error: None, message: None }
  }

  pub fn failure(error: impl Into<String>, message: impl Into<String>) -> Self {
    Self { success: false, data: None, error: Some(error.into()), message: Some(message.into()) }
  }

  /// Transport or decoding failure.
  pub(crate) fn unreachable(error: impl std::fmt::Display) -> Self {
    Self::failure(error.to_string(), CONNECT_FAILED)
  }

  pub fn into_result(self) -> Result<T, String> {
    match (self.success, self.data) {
      (true, Some(data)) => Ok(data),
      _ => Err(self.error.or(self.message).unwrap_or_else(|| REQUEST_FAILED.to_string())),
    }
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
    ApiResponse { success: self.success, data: self.data.map(f), error: self.error, message: self.message }
  }
}
