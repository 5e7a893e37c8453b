/* src/core/rust/src/language.rs */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LanguageError;

/// Display languages. The serialized names are the keys used inside
/// `configuration.json` and in persisted preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
  #[default]
  #[serde(rename = "简体中文")]
  SimplifiedChinese,
  #[serde(rename = "繁体中文")]
  TraditionalChinese,
  #[serde(rename = "English")]
  English,
  #[serde(rename = "日本語")]
  Japanese,
}

impl Language {
  pub const ALL: [Language; 4] =
    [Self::SimplifiedChinese, Self::TraditionalChinese, Self::English, Self::Japanese];

  /// Used whenever a string is missing in the requested language.
  pub const FALLBACK: Language = Self::SimplifiedChinese;

  pub fn as_str(self) -> &'static str {
    match self {
      Self::SimplifiedChinese => "简体中文",
      Self::TraditionalChinese => "繁体中文",
      Self::English => "English",
      Self::Japanese => "日本語",
    }
  }

  /// Value for `<html lang="...">`.
  pub fn html_lang(self) -> &'static str {
    match self {
      Self::SimplifiedChinese => "zh-CN",
      Self::TraditionalChinese => "zh-TW",
      Self::English => "en",
      Self::Japanese => "ja",
    }
  }

  pub fn is_valid(name: &str) -> bool {
    name.parse::<Language>().is_ok()
  }

  /// Map a BCP 47 tag such as `navigator.language` reports.
  pub fn from_browser_locale(tag: &str) -> Option<Language> {
    let tag = tag.trim();
    if tag.starts_with("zh-TW") {
      Some(Self::TraditionalChinese)
    } else if tag.starts_with("zh") {
      Some(Self::SimplifiedChinese)
    } else if tag.starts_with("en") {
      Some(Self::English)
    } else if tag.starts_with("ja") || tag.starts_with("jp") {
      Some(Self::Japanese)
    } else {
      None
    }
  }

  /// Pick the highest weighted supported language from an
  /// `Accept-Language` header.
  pub fn from_accept_language(header: &str) -> Option<Language> {
    let mut entries: Vec<(&str, f64)> = Vec::new();
    for part in header.split(',') {
      let part = part.trim();
      if part.is_empty() {
        continue;
      }
      let mut segments = part.split(';');
      let tag = segments.next().unwrap_or("").trim();
      let mut q = 1.0_f64;
      for s in segments {
        if let Some(val) = s.trim().strip_prefix("q=") {
          if let Ok(v) = val.parse::<f64>() {
            q = v;
          }
        }
      }
      entries.push((tag, q));
    }

    // Stable sort keeps header order among equal weights
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    entries.iter().filter(|(_, q)| *q > 0.0).find_map(|(tag, _)| Self::from_browser_locale(tag))
  }
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Language {
  type Err = LanguageError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|lang| lang.as_str() == s)
      .ok_or_else(|| LanguageError::Unknown(s.to_string()))
  }
}
