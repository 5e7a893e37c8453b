/* src/core/rust/src/preference.rs */

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::errors::PreferenceError;
use crate::language::Language;

/// Storage key holding the selected language.
pub const LANGUAGE_KEY: &str = "language";

/// Key/value storage in the spirit of browser `localStorage`.
pub trait PreferenceStorage {
  fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
  fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
  entries: HashMap<String, String>,
}

impl PreferenceStorage for MemoryStorage {
  fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
    self.entries.insert(key.to_string(), value.to_string());
    Ok(())
  }
}

/// A flat JSON object on disk. The file is created on first write and each
/// write replaces the whole document.
#[derive(Debug, Clone)]
pub struct FileStorage {
  path: PathBuf,
}

impl FileStorage {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
    let content = match std::fs::read_to_string(&self.path) {
      Ok(content) => content,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
      Err(source) => return Err(PreferenceError::Io { path: self.path.clone(), source }),
    };
    serde_json::from_str(&content)
      .map_err(|source| PreferenceError::Json { path: self.path.clone(), source })
  }
}

impl PreferenceStorage for FileStorage {
  fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
    Ok(self.load()?.remove(key))
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
    // A corrupt file is overwritten rather than blocking the user's choice
    let mut entries = self.load().unwrap_or_default();
    entries.insert(key.to_string(), value.to_string());
    if let Some(parent) = self.path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|source| PreferenceError::Io { path: parent.to_path_buf(), source })?;
    }
    let json = serde_json::to_string_pretty(&entries)
      .map_err(|source| PreferenceError::Json { path: self.path.clone(), source })?;
    std::fs::write(&self.path, json)
      .map_err(|source| PreferenceError::Io { path: self.path.clone(), source })
  }
}

/// The user's display language, persisted only on explicit change.
#[derive(Debug)]
pub struct LanguagePreference<S> {
  current: Language,
  storage: S,
}

impl<S: PreferenceStorage> LanguagePreference<S> {
  pub fn new(storage: S) -> Self {
    Self { current: Language::default(), storage }
  }

  pub fn current_language(&self) -> Language {
    self.current
  }

  pub fn set_language(&mut self, language: Language) -> Result<(), PreferenceError> {
    self.current = language;
    self.storage.set(LANGUAGE_KEY, language.as_str())
  }

  /// Restore the saved language, else adopt the browser locale when it maps
  /// to a supported language, else keep the current one. Nothing is written.
  pub fn init_language(&mut self, browser_locale: Option<&str>) -> Language {
    match self.storage.get(LANGUAGE_KEY) {
      Ok(Some(saved)) => match saved.parse::<Language>() {
        Ok(language) => {
          self.current = language;
          return language;
        }
        Err(e) => tracing::debug!(error = %e, "ignoring saved language"),
      },
      Ok(None) => {}
      Err(e) => tracing::warn!(error = %e, "language preference unreadable"),
    }

    if let Some(language) = browser_locale.and_then(Language::from_browser_locale) {
      self.current = language;
    }
    self.current
  }

  pub fn is_valid_language(&self, name: &str) -> bool {
    Language::is_valid(name)
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_with_default_language() {
    let pref = LanguagePreference::new(MemoryStorage::default());
    assert_eq!(pref.current_language(), Language::SimplifiedChinese);
  }

  #[test]
  fn set_language_persists() {
    let mut pref = LanguagePreference::new(MemoryStorage::default());
    pref.set_language(Language::Japanese).unwrap();
    assert_eq!(pref.current_language(), Language::Japanese);
    assert_eq!(pref.storage().get(LANGUAGE_KEY).unwrap().as_deref(), Some("日本語"));
  }

  #[test]
  fn init_prefers_saved_language() {
    let mut storage = MemoryStorage::default();
    storage.set(LANGUAGE_KEY, "English").unwrap();
    let mut pref = LanguagePreference::new(storage);
    assert_eq!(pref.init_language(Some("ja-JP")), Language::English);
  }

  #[test]
  fn init_uses_browser_locale_when_nothing_saved() {
    let mut pref = LanguagePreference::new(MemoryStorage::default());
    assert_eq!(pref.init_language(Some("zh-TW")), Language::TraditionalChinese);
    // Detected locale is not written back
    assert_eq!(pref.storage().get(LANGUAGE_KEY).unwrap(), None);
  }

  #[test]
  fn init_ignores_invalid_saved_value() {
    let mut storage = MemoryStorage::default();
    storage.set(LANGUAGE_KEY, "Klingon").unwrap();
    let mut pref = LanguagePreference::new(storage);
    assert_eq!(pref.init_language(Some("en-GB")), Language::English);
  }

  #[test]
  fn init_keeps_default_for_unknown_locale() {
    let mut pref = LanguagePreference::new(MemoryStorage::default());
    assert_eq!(pref.init_language(Some("fr-FR")), Language::SimplifiedChinese);
    assert_eq!(pref.init_language(None), Language::SimplifiedChinese);
  }

  #[test]
  fn validity_check() {
    let pref = LanguagePreference::new(MemoryStorage::default());
    assert!(pref.is_valid_language("繁体中文"));
    assert!(!pref.is_valid_language("Chinese"));
  }

  #[test]
  fn file_storage_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("state/preferences.json");

    let mut pref = LanguagePreference::new(FileStorage::new(&path));
    assert_eq!(pref.storage().get(LANGUAGE_KEY).unwrap(), None);
    pref.set_language(Language::English).unwrap();

    let mut reloaded = LanguagePreference::new(FileStorage::new(&path));
    assert_eq!(reloaded.init_language(None), Language::English);
  }

  #[test]
  fn file_storage_keeps_other_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("preferences.json");
    std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

    let mut storage = FileStorage::new(&path);
    storage.set(LANGUAGE_KEY, "日本語").unwrap();
    assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(storage.get(LANGUAGE_KEY).unwrap().as_deref(), Some("日本語"));
  }

  #[test]
  fn corrupt_file_reads_as_error_but_init_survives() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("preferences.json");
    std::fs::write(&path, "not json").unwrap();

    let storage = FileStorage::new(&path);
    assert!(matches!(storage.get(LANGUAGE_KEY), Err(PreferenceError::Json { .. })));

    let mut pref = LanguagePreference::new(storage);
    assert_eq!(pref.init_language(Some("ja")), Language::Japanese);
    pref.set_language(Language::English).unwrap();
    assert_eq!(pref.storage().get(LANGUAGE_KEY).unwrap().as_deref(), Some("English"));
  }
}
