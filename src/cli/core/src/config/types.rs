/* src/cli/core/src/config/types.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mtr_client::DEFAULT_BASE_URL;
use reqwest::Url;
use serde::Deserialize;

/// Contents of `mtr-web.toml`. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
  #[serde(default)]
  pub site: SiteSection,
  #[serde(default)]
  pub api: ApiSection,
  #[serde(default)]
  pub preview: PreviewSection,
  #[serde(default)]
  pub preferences: PreferencesSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
  /// Origin serving `/configuration.json`.
  #[serde(default = "default_origin")]
  pub origin: String,
}

impl Default for SiteSection {
  fn default() -> Self {
    Self { origin: default_origin() }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSection {
  #[serde(default = "default_base_url")]
  pub base_url: String,
  pub dimension: Option<String>,
}

impl Default for ApiSection {
  fn default() -> Self {
    Self { base_url: default_base_url(), dimension: None }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewSection {
  #[serde(default = "default_preview_port")]
  pub port: u16,
  #[serde(default = "default_public_dir")]
  pub public_dir: String,
}

impl Default for PreviewSection {
  fn default() -> Self {
    Self { port: default_preview_port(), public_dir: default_public_dir() }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferencesSection {
  /// Where the language choice is stored; relative paths are taken from the
  /// directory holding `mtr-web.toml`.
  pub file: Option<String>,
}

fn default_origin() -> String {
  "http://localhost:3000".to_string()
}

fn default_base_url() -> String {
  DEFAULT_BASE_URL.to_string()
}

fn default_preview_port() -> u16 {
  3000
}

fn default_public_dir() -> String {
  "public".to_string()
}

const DEFAULT_PREFERENCES_FILE: &str = ".mtr-web/preferences.json";

impl ProjectConfig {
  pub fn validate(&self) -> Result<()> {
    self.origin_url()?;
    Url::parse(&self.api.base_url)
      .with_context(|| format!("api.base_url is not a valid URL: {:?}", self.api.base_url))?;
    Ok(())
  }

  pub fn origin_url(&self) -> Result<Url> {
    Url::parse(&self.site.origin)
      .with_context(|| format!("site.origin is not a valid URL: {:?}", self.site.origin))
  }

  pub fn preferences_path(&self, base_dir: &Path) -> PathBuf {
    base_dir.join(self.preferences.file.as_deref().unwrap_or(DEFAULT_PREFERENCES_FILE))
  }

  pub fn public_dir(&self, base_dir: &Path) -> PathBuf {
    base_dir.join(&self.preview.public_dir)
  }
}
