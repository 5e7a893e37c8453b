/* src/core/rust/src/runtime.rs */

// Execution environment detection and the I/O capabilities each environment
// provides. Callers hold an `Arc<dyn Runtime>` and never branch on the
// environment themselves.

use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use reqwest::{StatusCode, Url};

use crate::errors::SourceError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeEnv {
  /// Traditional server process with filesystem access.
  #[default]
  Node,
  /// Edge worker: no filesystem, everything goes over HTTP.
  Cloudflare,
}

impl RuntimeEnv {
  pub const VAR: &'static str = "RUNTIME_ENV";

  /// Unset or unrecognized values select `Node`.
  pub fn parse(value: Option<&str>) -> Self {
    match value.map(str::trim) {
      Some("cloudflare") => Self::Cloudflare,
      _ => Self::Node,
    }
  }

  /// Read `RUNTIME_ENV` from the process environment. Call once at startup.
  pub fn from_env() -> Self {
    Self::parse(std::env::var(Self::VAR).ok().as_deref())
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Node => "nodejs",
      Self::Cloudflare => "cloudflare",
    }
  }
}

impl std::fmt::Display for RuntimeEnv {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Environment-specific file and network primitives.
///
/// `file_exists` and `read_file` never fail loudly: problems are logged and
/// reported as `false` / `None`.
pub trait Runtime: Send + Sync {
  fn env(&self) -> RuntimeEnv;

  fn join_path(&self, segments: &[&str]) -> String;

  fn resolve_path(&self, segments: &[&str]) -> String;

  fn working_dir(&self) -> String;

  fn file_exists<'a>(&'a self, path: &'a str) -> BoxFuture<'a, bool>;

  fn read_file<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Option<String>>;

  /// One GET of an origin-relative path, returning the body text.
  fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String, SourceError>>;
}

/// Build the runtime matching `env`, fetching relative URLs from `origin`.
pub fn runtime_for(env: RuntimeEnv, origin: Url) -> Arc<dyn Runtime> {
  match env {
    RuntimeEnv::Node => Arc::new(NodeRuntime::new(origin)),
    RuntimeEnv::Cloudflare => Arc::new(EdgeRuntime::new(origin)),
  }
}

/// Concatenate with `/` and collapse runs of separators.
pub(crate) fn collapse_join(segments: &[&str]) -> String {
  let joined = segments.join("/");
  let mut out = String::with_capacity(joined.len());
  let mut prev_slash = false;
  for ch in joined.chars() {
    if ch == '/' {
      if !prev_slash {
        out.push(ch);
      }
      prev_slash = true;
    } else {
      out.push(ch);
      prev_slash = false;
    }
  }
  out
}

/// Lexically normalize `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        out.pop();
      }
      other => out.push(other.as_os_str()),
    }
  }
  out
}

#[derive(Clone)]
struct HttpOrigin {
  origin: Url,
  client: reqwest::Client,
}

impl HttpOrigin {
  fn url_for(&self, path: &str) -> Result<Url, SourceError> {
    let absolute = if path.starts_with('/') { path.to_string() } else { format!("/{path}") };
    self.origin.join(&absolute).map_err(|_| SourceError::InvalidPath(path.to_string()))
  }

  /// HEAD the path, falling back to GET when the origin does not allow HEAD.
  async fn check_exists(&self, path: &str) -> Result<(), SourceError> {
    let url = self.url_for(path)?;
    let network = |source| SourceError::Network { url: url.to_string(), source };
    let mut status = self.client.head(url.clone()).send().await.map_err(network)?.status();
    if status == StatusCode::METHOD_NOT_ALLOWED || status == StatusCode::NOT_IMPLEMENTED {
      status = self.client.get(url.clone()).send().await.map_err(network)?.status();
    }
    if !status.is_success() {
      return Err(SourceError::Status { url: url.to_string(), status: status.as_u16() });
    }
    Ok(())
  }

  async fn get_text(&self, path: &str) -> Result<String, SourceError> {
    let url = self.url_for(path)?;
    let resp = self
      .client
      .get(url.clone())
      .send()
      .await
      .map_err(|source| SourceError::Network { url: url.to_string(), source })?;
    let status = resp.status();
    if !status.is_success() {
      return Err(SourceError::Status { url: url.to_string(), status: status.as_u16() });
    }
    resp.text().await.map_err(|source| SourceError::Network { url: url.to_string(), source })
  }
}

pub struct NodeRuntime {
  http: HttpOrigin,
  working_dir: Option<PathBuf>,
}

impl NodeRuntime {
  pub fn new(origin: Url) -> Self {
    Self::with_client(origin, reqwest::Client::new())
  }

  pub fn with_client(origin: Url, client: reqwest::Client) -> Self {
    Self { http: HttpOrigin { origin, client }, working_dir: None }
  }

  /// Pin the working directory instead of asking the process.
  pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.working_dir = Some(dir.into());
    self
  }

  fn cwd(&self) -> PathBuf {
    if let Some(ref dir) = self.working_dir {
      return dir.clone();
    }
    match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => {
        tracing::warn!(error = %e, "working directory unavailable, using /");
        PathBuf::from("/")
      }
    }
  }
}

impl Runtime for NodeRuntime {
  fn env(&self) -> RuntimeEnv {
    RuntimeEnv::Node
  }

  fn join_path(&self, segments: &[&str]) -> String {
    let mut path = PathBuf::new();
    for segment in segments {
      path.push(segment);
    }
    path.to_string_lossy().into_owned()
  }

  fn resolve_path(&self, segments: &[&str]) -> String {
    let mut path = self.cwd();
    for segment in segments {
      // Absolute segments restart resolution, relative ones extend it
      path.push(segment);
    }
    normalize(&path).to_string_lossy().into_owned()
  }

  fn working_dir(&self) -> String {
    self.cwd().to_string_lossy().into_owned()
  }

  fn file_exists<'a>(&'a self, path: &'a str) -> BoxFuture<'a, bool> {
    Box::pin(async move {
      match tokio::fs::try_exists(path).await {
        Ok(exists) => exists,
        Err(e) => {
          tracing::warn!(path, error = %e, "file existence check failed");
          false
        }
      }
    })
  }

  fn read_file<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Option<String>> {
    Box::pin(async move {
      match tokio::fs::read_to_string(path).await {
        Ok(content) => Some(content),
        Err(e) => {
          tracing::warn!(path, error = %e, "file read failed");
          None
        }
      }
    })
  }

  fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String, SourceError>> {
    Box::pin(self.http.get_text(path))
  }
}

/// Edge worker runtime. Paths are URL paths on the site origin and every
/// "file" operation is an HTTP request.
pub struct EdgeRuntime {
  http: HttpOrigin,
}

impl EdgeRuntime {
  pub fn new(origin: Url) -> Self {
    Self::with_client(origin, reqwest::Client::new())
  }

  pub fn with_client(origin: Url, client: reqwest::Client) -> Self {
    Self { http: HttpOrigin { origin, client } }
  }
}

impl Runtime for EdgeRuntime {
  fn env(&self) -> RuntimeEnv {
    RuntimeEnv::Cloudflare
  }

  fn join_path(&self, segments: &[&str]) -> String {
    collapse_join(segments)
  }

  fn resolve_path(&self, segments: &[&str]) -> String {
    collapse_join(segments)
  }

  fn working_dir(&self) -> String {
    "/".to_string()
  }

  fn file_exists<'a>(&'a self, path: &'a str) -> BoxFuture<'a, bool> {
    Box::pin(async move {
      match self.http.check_exists(path).await {
        Ok(()) => true,
        Err(e) => {
          tracing::debug!(path, error = %e, "edge existence check failed");
          false
        }
      }
    })
  }

  fn read_file<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Option<String>> {
    Box::pin(async move {
      match self.http.get_text(path).await {
        Ok(body) => Some(body),
        Err(e) => {
          tracing::warn!(path, error = %e, "edge fetch failed");
          None
        }
      }
    })
  }

  fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String, SourceError>> {
    Box::pin(self.http.get_text(path))
  }
}
