/* src/core/rust/src/configuration/resolver.rs */

use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::SourceError;
use crate::fallback::{Tier, first_success, retry_once};
use crate::runtime::Runtime;

use super::types::Configuration;

pub const CONFIG_FILE: &str = "configuration.json";
pub const PRIMARY_DIR: &str = "public";
pub const SECONDARY_DIR: &str = ".output/public";
pub const CONFIG_URL_PATH: &str = "/configuration.json";

/// Where the page is being rendered. Only server-side rendering may look at
/// the on-disk copies of the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderContext {
  #[default]
  Server,
  Client,
}

/// Resolves the site configuration through the fallback chain
/// primary file -> secondary file -> network (retried once) -> default.
pub struct ConfigResolver {
  runtime: Arc<dyn Runtime>,
  context: RenderContext,
}

impl ConfigResolver {
  pub fn new(runtime: Arc<dyn Runtime>) -> Self {
    Self { runtime, context: RenderContext::default() }
  }

  pub fn with_context(mut self, context: RenderContext) -> Self {
    self.context = context;
    self
  }

  pub fn context(&self) -> RenderContext {
    self.context
  }

  /// `<cwd>/public/configuration.json`
  pub fn primary_path(&self) -> String {
    let cwd = self.runtime.working_dir();
    self.runtime.join_path(&[&cwd, PRIMARY_DIR, CONFIG_FILE])
  }

  /// `<cwd>/.output/public/configuration.json`
  pub fn secondary_path(&self) -> String {
    let cwd = self.runtime.working_dir();
    self.runtime.join_path(&[&cwd, SECONDARY_DIR, CONFIG_FILE])
  }

  /// Never fails: returns `default` once every source has been tried.
  pub async fn resolve(&self, default: Configuration) -> Configuration {
    let mut tiers: Vec<Tier<'_, Configuration>> = Vec::with_capacity(3);
    if self.context == RenderContext::Server {
      let primary = self.primary_path();
      let secondary = self.secondary_path();
      tiers.push(Tier::new("primary", move || self.read_disk(primary)));
      tiers.push(Tier::new("secondary", move || self.read_disk(secondary)));
    }
    tiers.push(retry_once("network", move || self.fetch_network()));

    match first_success(tiers).await {
      Some((tier, config)) => {
        tracing::info!(tier, "configuration resolved");
        config
      }
      None => {
        tracing::error!("every configuration source failed, using default");
        default
      }
    }
  }

  pub async fn resolve_default(&self) -> Configuration {
    self.resolve(Configuration::fallback()).await
  }

  async fn read_disk(&self, path: String) -> Result<Configuration, SourceError> {
    if !self.runtime.file_exists(&path).await {
      return Err(SourceError::Missing { path: PathBuf::from(path) });
    }
    let Some(content) = self.runtime.read_file(&path).await else {
      return Err(SourceError::Unreadable { path: PathBuf::from(path) });
    };
    Configuration::from_json_str(&content).map_err(|source| SourceError::Parse { origin: path, source })
  }

  async fn fetch_network(&self) -> Result<Configuration, SourceError> {
    let body = self.runtime.fetch(CONFIG_URL_PATH).await?;
    Configuration::from_json_str(&body)
      .map_err(|source| SourceError::Parse { origin: CONFIG_URL_PATH.to_string(), source })
  }
}
