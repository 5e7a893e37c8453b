/* src/client/rust/src/api.rs */

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::envelope::{ApiResponse, REQUEST_FAILED};
use crate::types::{RailInfo, StationInfo, TrainCommand, TrainInfo};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8888";

/// Client for the transport simulation server's REST API.
///
/// Every method takes an optional `dimension`, sent as a query parameter, and
/// returns an [`ApiResponse`] instead of an error.
#[derive(Debug, Clone)]
pub struct MtrApi {
  base_url: String,
  client: reqwest::Client,
}

impl Default for MtrApi {
  fn default() -> Self {
    Self::new(DEFAULT_BASE_URL)
  }
}

impl MtrApi {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self::with_client(base_url, reqwest::Client::new())
  }

  pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
    Self { base_url: base_url.into(), client }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn url(&self, endpoint: &str, dimension: Option<&str>) -> Option<Url> {
    let mut url = Url::parse(&format!("{}{endpoint}", self.base_url.trim_end_matches('/'))).ok()?;
    if let Some(dimension) = dimension {
      url.query_pairs_mut().append_pair("dimension", dimension);
    }
    Some(url)
  }

  /// Issue one request and fold the outcome into an envelope.
  pub async fn request<T: DeserializeOwned>(
    &self,
    method: Method,
    endpoint: &str,
    body: Option<Value>,
    dimension: Option<&str>,
  ) -> ApiResponse<T> {
    let Some(url) = self.url(endpoint, dimension) else {
      return ApiResponse::unreachable(format!("invalid base URL {:?}", self.base_url));
    };

    let mut builder = self.client.request(method, url).header(CONTENT_TYPE, "application/json");
    if let Some(body) = body {
      builder = builder.body(body.to_string());
    }

    let resp = match builder.send().await {
      Ok(resp) => resp,
      Err(e) => {
        tracing::warn!(endpoint, error = %e, "MTR server unreachable");
        return ApiResponse::unreachable(e);
      }
    };
    let status = resp.status();
    let bytes = match resp.bytes().await {
      Ok(bytes) => bytes,
      Err(e) => return ApiResponse::unreachable(e),
    };

    if status.is_success() {
      match serde_json::from_slice::<T>(&bytes) {
        Ok(data) => ApiResponse::ok(data),
        Err(e) => {
          tracing::warn!(endpoint, error = %e, "unexpected response body");
          ApiResponse::unreachable(e)
        }
      }
    } else {
      let message = serde_json::from_slice::<Value>(&bytes)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| REQUEST_FAILED.to_string());
      let reason = status.canonical_reason().unwrap_or("");
      ApiResponse::failure(format!("HTTP {}: {reason}", status.as_u16()), message)
    }
  }

  async fn get<T: DeserializeOwned>(&self, endpoint: &str, dimension: Option<&str>) -> ApiResponse<T> {
    self.request(Method::GET, endpoint, None, dimension).await
  }

  // -- Rails --

  pub async fn rails(&self, dimension: Option<&str>) -> ApiResponse<Vec<RailInfo>> {
    self.get("/mtr/rails", dimension).await
  }

  pub async fn rail(&self, rail_id: &str, dimension: Option<&str>) -> ApiResponse<RailInfo> {
    self.get(&format!("/mtr/rails/{rail_id}"), dimension).await
  }

  pub async fn rail_connections(&self, rail_id: &str, dimension: Option<&str>) -> ApiResponse<Value> {
    self.get(&format!("/mtr/rails/{rail_id}/connections"), dimension).await
  }

  // -- Trains --

  pub async fn trains(&self, dimension: Option<&str>) -> ApiResponse<Vec<TrainInfo>> {
    self.get("/mtr/trains", dimension).await
  }

  pub async fn train(&self, train_id: &str, dimension: Option<&str>) -> ApiResponse<TrainInfo> {
    self.get(&format!("/mtr/trains/{train_id}"), dimension).await
  }

  pub async fn train_path(&self, train_id: &str, dimension: Option<&str>) -> ApiResponse<Value> {
    self.get(&format!("/mtr/trains/{train_id}/path"), dimension).await
  }

  pub async fn train_status(&self, train_id: &str, dimension: Option<&str>) -> ApiResponse<Value> {
    self.get(&format!("/mtr/trains/{train_id}/status"), dimension).await
  }

  pub async fn send_train_command(
    &self,
    train_id: &str,
    command: TrainCommand,
    dimension: Option<&str>,
  ) -> ApiResponse<Value> {
    let body = match serde_json::to_value(&command) {
      Ok(body) => body,
      Err(e) => return ApiResponse::unreachable(e),
    };
    self.request(Method::POST, &format!("/mtr/trains/{train_id}/command"), Some(body), dimension).await
  }

  // -- Stations --

  pub async fn stations(&self, dimension: Option<&str>) -> ApiResponse<Vec<StationInfo>> {
    self.get("/mtr/stations", dimension).await
  }

  pub async fn station(&self, station_id: &str, dimension: Option<&str>) -> ApiResponse<StationInfo> {
    self.get(&format!("/mtr/stations/{station_id}"), dimension).await
  }

  pub async fn station_passengers(&self, station_id: &str, dimension: Option<&str>) -> ApiResponse<Value> {
    self.get(&format!("/mtr/stations/{station_id}/passengers"), dimension).await
  }

  // -- Lines, routes, timetables --

  pub async fn lines(&self, dimension: Option<&str>) -> ApiResponse<Vec<Value>> {
    self.get("/mtr/lines", dimension).await
  }

  pub async fn routes(&self, dimension: Option<&str>) -> ApiResponse<Vec<Value>> {
    self.get("/mtr/routes", dimension).await
  }

  pub async fn timetables(&self, dimension: Option<&str>) -> ApiResponse<Vec<Value>> {
    self.get("/mtr/timetables", dimension).await
  }

  // -- System --

  pub async fn system_status(&self, dimension: Option<&str>) -> ApiResponse<Value> {
    self.get("/mtr/status", dimension).await
  }

  pub async fn system_config(&self, dimension: Option<&str>) -> ApiResponse<Value> {
    self.get("/mtr/config", dimension).await
  }

  pub async fn simulation_stats(&self, dimension: Option<&str>) -> ApiResponse<Value> {
    self.get("/mtr/stats", dimension).await
  }

  pub async fn realtime_data(&self, dimension: Option<&str>) -> ApiResponse<Value> {
    self.get("/mtr/realtime", dimension).await
  }
}
