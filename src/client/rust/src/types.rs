/* src/client/rust/src/types.rs */

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

/// A rail segment between two block positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailInfo {
  pub id: String,
  pub x1: f64,
  pub y1: f64,
  pub z1: f64,
  pub x2: f64,
  pub y2: f64,
  pub z2: f64,
  #[serde(rename = "type")]
  pub rail_type: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub block: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainInfo {
  pub id: String,
  pub name: String,
  pub position: Position,
  pub speed: f64,
  pub status: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub line_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub station_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationInfo {
  pub id: String,
  pub name: String,
  pub position: Position,
  #[serde(default)]
  pub connected_rails: Vec<String>,
}

/// Body of `POST /mtr/trains/{id}/command`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainCommand {
  pub command: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub params: Option<serde_json::Map<String, serde_json::Value>>,
}
