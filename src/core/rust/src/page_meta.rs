/* src/core/rust/src/page_meta.rs */

// Title, description and keyword derivation for a page. Everything here is
// pure: the configuration may still be pending (`None`), in which case every
// field is treated as absent.

use crate::configuration::{Configuration, non_empty};
use crate::language::Language;

/// Stand-in for the city name while the configuration is missing.
pub const DEFAULT_CITY_TOKEN: &str = "MTR";

/// Per-page options, built fresh by each page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTitleConfig {
  /// Key into `page_titles`.
  pub key: Option<String>,
  pub default_title: Option<String>,
  /// Overrides the city name after the dash.
  pub suffix: Option<String>,
  /// Key into `page_descriptions`.
  pub description_key: Option<String>,
  pub default_description: Option<String>,
}

impl PageTitleConfig {
  pub fn keyed(key: impl Into<String>) -> Self {
    let key = key.into();
    Self { description_key: Some(key.clone()), key: Some(key), ..Self::default() }
  }

  pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
    self.default_title = Some(title.into());
    self
  }

  pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
    self.suffix = Some(suffix.into());
    self
  }

  pub fn with_default_description(mut self, description: impl Into<String>) -> Self {
    self.default_description = Some(description.into());
    self
  }
}

fn city_or_token(config: Option<&Configuration>) -> &str {
  config.and_then(Configuration::city_name).unwrap_or(DEFAULT_CITY_TOKEN)
}

pub fn build_title(page: &PageTitleConfig, config: Option<&Configuration>, language: Language) -> String {
  let suffix = non_empty(page.suffix.as_deref()).unwrap_or_else(|| city_or_token(config));

  let localized = match (non_empty(page.key.as_deref()), config) {
    (Some(key), Some(config)) => config.page_title(key, language),
    _ => None,
  };
  if let Some(title) = localized {
    return format!("{title} - {suffix}");
  }

  match non_empty(page.default_title.as_deref()) {
    Some(title) => format!("{title} - {suffix}"),
    None => suffix.to_string(),
  }
}

pub fn build_description(
  page: &PageTitleConfig,
  config: Option<&Configuration>,
  language: Language,
) -> String {
  let localized = match (non_empty(page.description_key.as_deref()), config) {
    (Some(key), Some(config)) => config.page_description(key, language),
    _ => None,
  };
  if let Some(description) = localized {
    return description.to_string();
  }

  match non_empty(page.default_description.as_deref()) {
    Some(description) => description.to_string(),
    None => format!("欢迎访问{}交通局官方网站", city_or_token(config)),
  }
}

pub fn build_keywords(config: Option<&Configuration>) -> String {
  format!("{},地铁,交通,时刻表,站点信息", city_or_token(config))
}
