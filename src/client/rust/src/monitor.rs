/* src/client/rust/src/monitor.rs */

use serde_json::Value;
use tokio::sync::watch;

use crate::api::MtrApi;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionState {
  pub is_connected: bool,
  pub server_status: Option<Value>,
  pub is_checking: bool,
}

/// Tracks reachability of the MTR server. Observers subscribe to a watch
/// channel and see every transition, including the in-flight `is_checking`.
#[derive(Debug)]
pub struct ServerMonitor {
  api: MtrApi,
  state: watch::Sender<ConnectionState>,
}

impl ServerMonitor {
  pub fn new(api: MtrApi) -> Self {
    let (state, _) = watch::channel(ConnectionState::default());
    Self { api, state }
  }

  pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
    self.state.subscribe()
  }

  pub fn state(&self) -> ConnectionState {
    self.state.borrow().clone()
  }

  /// Query `/mtr/status` once. On failure the last known server status is kept.
  pub async fn check_connection(&self, dimension: Option<&str>) -> bool {
    self.state.send_modify(|s| s.is_checking = true);
    let resp = self.api.system_status(dimension).await;

    let connected = resp.success;
    self.state.send_modify(|s| {
      s.is_connected = connected;
      if connected {
        s.server_status = resp.data;
      }
      s.is_checking = false;
    });
    if !connected {
      tracing::warn!(
        base_url = self.api.base_url(),
        error = resp.error.as_deref().unwrap_or_default(),
        "MTR server check failed"
      );
    }
    connected
  }
}
