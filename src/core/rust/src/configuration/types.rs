/* src/core/rust/src/configuration/types.rs */

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::language::Language;

/// Strings keyed by language display name (`"English"`, `"简体中文"`, ...).
/// Unknown language keys are kept so documents survive a round trip.
pub type LocalizedText = BTreeMap<String, String>;

pub const FALLBACK_CITY: &str = "Error";
pub const FALLBACK_COLOR: &str = "#0047AB";

/// The site settings document served as `/configuration.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Configuration {
  #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
  pub city_name: Option<String>,
  #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
  pub color: Option<String>,
  #[serde(default, deserialize_with = "lenient_sections", skip_serializing_if = "BTreeMap::is_empty")]
  pub page_titles: BTreeMap<String, LocalizedText>,
  #[serde(default, deserialize_with = "lenient_sections", skip_serializing_if = "BTreeMap::is_empty")]
  pub page_descriptions: BTreeMap<String, LocalizedText>,
  /// Any other top-level fields, preserved as-is.
  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Configuration {
  /// Value used when every source failed.
  pub fn fallback() -> Self {
    Self {
      city_name: Some(FALLBACK_CITY.to_string()),
      color: Some(FALLBACK_COLOR.to_string()),
      ..Self::default()
    }
  }

  pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(s)
  }

  pub fn city_name(&self) -> Option<&str> {
    non_empty(self.city_name.as_deref())
  }

  pub fn color(&self) -> Option<&str> {
    non_empty(self.color.as_deref())
  }

  /// Title for `key` in `language`, falling back to Simplified Chinese.
  pub fn page_title(&self, key: &str, language: Language) -> Option<&str> {
    localized(self.page_titles.get(key)?, language)
  }

  /// Description for `key` in `language`, falling back to Simplified Chinese.
  pub fn page_description(&self, key: &str, language: Language) -> Option<&str> {
    localized(self.page_descriptions.get(key)?, language)
  }
}

// Known fields are read leniently: a value of the wrong type is treated as
// absent instead of rejecting the whole document.

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
  Ok(match Value::deserialize(deserializer)? {
    Value::String(s) => Some(s),
    _ => None,
  })
}

fn lenient_sections<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<BTreeMap<String, LocalizedText>, D::Error> {
  let Value::Object(sections) = Value::deserialize(deserializer)? else {
    return Ok(BTreeMap::new());
  };
  Ok(
    sections
      .into_iter()
      .filter_map(|(key, entries)| {
        let Value::Object(entries) = entries else {
          return None;
        };
        let text: LocalizedText = entries
          .into_iter()
          .filter_map(|(lang, value)| match value {
            Value::String(s) => Some((lang, s)),
            _ => None,
          })
          .collect();
        Some((key, text))
      })
      .collect(),
  )
}

fn localized(text: &LocalizedText, language: Language) -> Option<&str> {
  non_empty(text.get(language.as_str()).map(String::as_str))
    .or_else(|| non_empty(text.get(Language::FALLBACK.as_str()).map(String::as_str)))
}

/// Empty strings count as missing.
pub(crate) fn non_empty(s: Option<&str>) -> Option<&str> {
  s.filter(|s| !s.is_empty())
}
