/* src/core/rust/src/configuration/tests.rs */

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use super::*;
use crate::errors::SourceError;
use crate::language::Language;
use crate::runtime::{BoxFuture, Runtime, RuntimeEnv, collapse_join};

const PRIMARY: &str = "/site/public/configuration.json";
const SECONDARY: &str = "/site/.output/public/configuration.json";

/// In-memory runtime: a fixed file map plus a scripted queue of network
/// responses. Every call is recorded in order.
#[derive(Default)]
struct FakeRuntime {
  files: HashMap<String, String>,
  network: Mutex<VecDeque<Option<String>>>,
  calls: Mutex<Vec<String>>,
}

impl FakeRuntime {
  fn with_file(mut self, path: &str, content: &str) -> Self {
    self.files.insert(path.to_string(), content.to_string());
    self
  }

  fn with_network(self, responses: &[Option<&str>]) -> Self {
    *self.network.lock().unwrap() = responses.iter().map(|r| r.map(String::from)).collect();
    self
  }

  fn log(&self, entry: String) {
    self.calls.lock().unwrap().push(entry);
  }

  fn calls(&self) -> Vec<String> {
    self.calls.lock().unwrap().clone()
  }

  fn fetch_count(&self) -> usize {
    self.calls().iter().filter(|c| c.starts_with("fetch")).count()
  }
}

impl Runtime for FakeRuntime {
  fn env(&self) -> RuntimeEnv {
    RuntimeEnv::Node
  }

  fn join_path(&self, segments: &[&str]) -> String {
    collapse_join(segments)
  }

  fn resolve_path(&self, segments: &[&str]) -> String {
    collapse_join(segments)
  }

  fn working_dir(&self) -> String {
    "/site".to_string()
  }

  fn file_exists<'a>(&'a self, path: &'a str) -> BoxFuture<'a, bool> {
    Box::pin(async move {
      self.log(format!("exists {path}"));
      self.files.contains_key(path)
    })
  }

  fn read_file<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Option<String>> {
    Box::pin(async move {
      self.log(format!("read {path}"));
      self.files.get(path).cloned()
    })
  }

  fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String, SourceError>> {
    Box::pin(async move {
      self.log(format!("fetch {path}"));
      match self.network.lock().unwrap().pop_front() {
        Some(Some(body)) => Ok(body),
        _ => Err(SourceError::Status { url: path.to_string(), status: 503 }),
      }
    })
  }
}

fn resolver(rt: &Arc<FakeRuntime>) -> ConfigResolver {
  ConfigResolver::new(rt.clone())
}

// -- Configuration document --

#[test]
fn parse_keeps_unknown_fields() {
  let doc = r##"{"city_name":"Central","color":"#FF0000","logo":"/LOGO.jpg","lines":[1,2]}"##;
  let config = Configuration::from_json_str(doc).unwrap();
  assert_eq!(config.city_name(), Some("Central"));
  assert_eq!(config.color(), Some("#FF0000"));
  assert_eq!(config.extra["logo"], "/LOGO.jpg");
  let back: serde_json::Value = serde_json::to_value(&config).unwrap();
  assert_eq!(back, serde_json::from_str::<serde_json::Value>(doc).unwrap());
}

#[test]
fn parse_rejects_non_objects() {
  assert!(Configuration::from_json_str("[1,2,3]").is_err());
  assert!(Configuration::from_json_str("\"Central\"").is_err());
  assert!(Configuration::from_json_str("{\"city_name\":").is_err());
}

#[test]
fn fallback_value() {
  let config = Configuration::fallback();
  assert_eq!(config.city_name(), Some("Error"));
  assert_eq!(config.color(), Some("#0047AB"));
  assert!(config.page_titles.is_empty());
}

#[test]
fn page_title_lookup_falls_back_to_simplified_chinese() {
  let config = Configuration::from_json_str(
    r#"{"page_titles":{"home":{"简体中文":"首页","English":"Home"},"map":{"简体中文":"线路图"}}}"#,
  )
  .unwrap();
  assert_eq!(config.page_title("home", Language::English), Some("Home"));
  assert_eq!(config.page_title("map", Language::Japanese), Some("线路图"));
  assert_eq!(config.page_title("missing", Language::English), None);
}

#[test]
fn empty_strings_count_as_missing() {
  let config = Configuration::from_json_str(
    r#"{"city_name":"","page_descriptions":{"home":{"English":"","简体中文":"描述"}}}"#,
  )
  .unwrap();
  assert_eq!(config.city_name(), None);
  assert_eq!(config.page_description("home", Language::English), Some("描述"));
}

#[test]
fn wrongly_typed_fields_read_as_absent() {
  let config = Configuration::from_json_str(
    r##"{"city_name":7,"color":"#FF0000","page_titles":null,"page_descriptions":{"home":"Home","map":{"English":"Map","note":1}}}"##,
  )
  .unwrap();
  assert_eq!(config.city_name(), None);
  assert_eq!(config.color(), Some("#FF0000"));
  assert!(config.page_titles.is_empty());
  assert!(!config.page_descriptions.contains_key("home"));
  assert_eq!(config.page_description("map", Language::English), Some("Map"));
  assert_eq!(config.page_descriptions["map"].len(), 1);
}

// -- Resolution order --

#[tokio::test]
async fn null_section_keeps_document() {
  let rt = Arc::new(
    FakeRuntime::default().with_file(PRIMARY, r##"{"city_name":"Central","color":"#FF0000","page_titles":null}"##),
  );
  let config = resolver(&rt).resolve_default().await;
  assert_eq!(config.city_name(), Some("Central"));
  assert_eq!(config.color(), Some("#FF0000"));
  assert_eq!(rt.fetch_count(), 0);
}

#[tokio::test]
async fn mixed_type_localized_entries_keep_document() {
  let rt = Arc::new(
    FakeRuntime::default()
      .with_file(PRIMARY, r#"{"city_name":"Central","page_titles":{"home":{"English":"Home","note":1}}}"#),
  );
  let config = resolver(&rt).resolve_default().await;
  assert_eq!(config.city_name(), Some("Central"));
  assert_eq!(config.page_title("home", Language::English), Some("Home"));
}

#[tokio::test]
async fn primary_file_wins() {
  let rt = Arc::new(
    FakeRuntime::default()
      .with_file(PRIMARY, r#"{"city_name":"Primary"}"#)
      .with_file(SECONDARY, r#"{"city_name":"Secondary"}"#),
  );
  let config = resolver(&rt).resolve_default().await;
  assert_eq!(config.city_name(), Some("Primary"));
  assert_eq!(rt.calls(), vec![format!("exists {PRIMARY}"), format!("read {PRIMARY}")]);
}

#[tokio::test]
async fn malformed_primary_falls_to_secondary() {
  let rt = Arc::new(
    FakeRuntime::default()
      .with_file(PRIMARY, "{ not json")
      .with_file(SECONDARY, r#"{"city_name":"Secondary"}"#),
  );
  let config = resolver(&rt).resolve_default().await;
  assert_eq!(config.city_name(), Some("Secondary"));
  assert_eq!(rt.fetch_count(), 0);
}

#[tokio::test]
async fn malformed_secondary_falls_to_network() {
  let rt = Arc::new(
    FakeRuntime::default()
      .with_file(SECONDARY, "[]")
      .with_network(&[Some(r#"{"city_name":"Network"}"#)]),
  );
  let config = resolver(&rt).resolve_default().await;
  assert_eq!(config.city_name(), Some("Network"));
  assert_eq!(
    rt.calls(),
    vec![
      format!("exists {PRIMARY}"),
      format!("exists {SECONDARY}"),
      format!("read {SECONDARY}"),
      "fetch /configuration.json".to_string(),
    ]
  );
}

#[tokio::test]
async fn network_retries_once_after_failure() {
  let rt = Arc::new(FakeRuntime::default().with_network(&[None, Some(r#"{"city_name":"Retry"}"#)]));
  let config = resolver(&rt).resolve_default().await;
  assert_eq!(config.city_name(), Some("Retry"));
  assert_eq!(rt.fetch_count(), 2);
}

#[tokio::test]
async fn malformed_network_body_is_retried() {
  let rt = Arc::new(FakeRuntime::default().with_network(&[Some("<html>"), Some(r##"{"color":"#111"}"##)]));
  let config = resolver(&rt).resolve_default().await;
  assert_eq!(config.color(), Some("#111"));
  assert_eq!(rt.fetch_count(), 2);
}

#[tokio::test]
async fn exhausted_sources_return_fallback() {
  let rt = Arc::new(FakeRuntime::default().with_network(&[None, None, Some("{}")]));
  let config = resolver(&rt).resolve_default().await;
  assert_eq!(config, Configuration::fallback());
  // Exactly two network attempts, the third scripted response is never used
  assert_eq!(rt.fetch_count(), 2);
  assert_eq!(
    rt.calls(),
    vec![
      format!("exists {PRIMARY}"),
      format!("exists {SECONDARY}"),
      "fetch /configuration.json".to_string(),
      "fetch /configuration.json".to_string(),
    ]
  );
}

#[tokio::test]
async fn exhausted_sources_return_caller_default() {
  let rt = Arc::new(FakeRuntime::default());
  let default = Configuration { city_name: Some("Custom".into()), ..Configuration::default() };
  let config = resolver(&rt).resolve(default.clone()).await;
  assert_eq!(config, default);
}

#[tokio::test]
async fn client_context_skips_disk() {
  let rt = Arc::new(
    FakeRuntime::default()
      .with_file(PRIMARY, r#"{"city_name":"Primary"}"#)
      .with_network(&[Some(r#"{"city_name":"Network"}"#)]),
  );
  let resolver = resolver(&rt).with_context(RenderContext::Client);
  assert_eq!(resolver.context(), RenderContext::Client);
  let config = resolver.resolve_default().await;
  assert_eq!(config.city_name(), Some("Network"));
  assert_eq!(rt.calls(), vec!["fetch /configuration.json".to_string()]);
}

#[tokio::test]
async fn repeated_resolution_is_stable() {
  let rt = Arc::new(FakeRuntime::default().with_file(
    PRIMARY,
    r#"{"city_name":"Central","page_titles":{"home":{"English":"Home"}}}"#,
  ));
  let resolver = resolver(&rt);
  let first = resolver.resolve_default().await;
  let second = resolver.resolve_default().await;
  assert_eq!(first, second);
}

#[test]
fn disk_paths_follow_working_dir() {
  let rt = Arc::new(FakeRuntime::default());
  let resolver = resolver(&rt);
  assert_eq!(resolver.primary_path(), PRIMARY);
  assert_eq!(resolver.secondary_path(), SECONDARY);
}

// -- Real runtimes --

mod real {
  use axum::Router;
  use axum::routing::get;
  use reqwest::Url;

  use super::*;
  use crate::runtime::{EdgeRuntime, NodeRuntime};

  async fn spawn_site(body: &'static str) -> Url {
    let app = Router::new().route("/configuration.json", get(move || async move { body }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{addr}")).unwrap()
  }

  #[tokio::test]
  async fn node_reads_secondary_from_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join(".output/public");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("configuration.json"), r#"{"city_name":"Built"}"#).unwrap();

    let rt = NodeRuntime::new(Url::parse("http://127.0.0.1:9").unwrap()).with_working_dir(tmp.path());
    let config = ConfigResolver::new(Arc::new(rt)).resolve_default().await;
    assert_eq!(config.city_name(), Some("Built"));
  }

  #[tokio::test]
  async fn node_falls_back_to_network() {
    let tmp = tempfile::tempdir().unwrap();
    let origin = spawn_site(r#"{"city_name":"Served"}"#).await;
    let rt = NodeRuntime::new(origin).with_working_dir(tmp.path());
    let config = ConfigResolver::new(Arc::new(rt)).resolve_default().await;
    assert_eq!(config.city_name(), Some("Served"));
  }

  #[tokio::test]
  async fn edge_resolves_over_network_only() {
    let origin = spawn_site(r#"{"city_name":"Edge"}"#).await;
    let config = ConfigResolver::new(Arc::new(EdgeRuntime::new(origin))).resolve_default().await;
    assert_eq!(config.city_name(), Some("Edge"));
  }

  #[tokio::test]
  async fn unreachable_origin_gives_fallback() {
    let tmp = tempfile::tempdir().unwrap();
    let rt = NodeRuntime::new(Url::parse("http://127.0.0.1:9").unwrap()).with_working_dir(tmp.path());
    let config = ConfigResolver::new(Arc::new(rt)).resolve_default().await;
    assert_eq!(config, Configuration::fallback());
  }
}
