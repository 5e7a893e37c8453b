/* src/cli/core/src/lang.rs */

use anyhow::{Context, Result};
use clap::Subcommand;
use mtr_web_core::{FileStorage, Language, LanguagePreference};

use crate::{Project, ui};

#[derive(Subcommand)]
pub enum LangAction {
  /// Print the saved language (or the default when none is saved)
  Show,
  /// Save a new display language
  Set {
    /// Language name (e.g. English, 日本語) or locale tag (e.g. ja-JP)
    language: String,
  },
  /// Restore the saved language, falling back to the system locale
  Init {
    /// Locale to use instead of LC_ALL / LC_MESSAGES / LANG
    #[arg(long)]
    locale: Option<String>,
  },
  /// List supported languages
  List,
}

/// Accept either a display name or a locale tag.
pub fn parse_language(input: &str) -> Result<Language> {
  input
    .parse::<Language>()
    .or_else(|e| Language::from_browser_locale(input).ok_or(e))
    .with_context(|| {
      let names: Vec<&str> = Language::ALL.iter().map(|l| l.as_str()).collect();
      format!("expected one of: {}", names.join(", "))
    })
}

/// Turn a POSIX locale (`ja_JP.UTF-8`) into a tag like `ja-JP`.
pub fn posix_to_tag(locale: &str) -> Option<String> {
  let base = locale.split(['.', '@']).next().unwrap_or("").trim();
  if base.is_empty() || base == "C" || base == "POSIX" {
    return None;
  }
  Some(base.replace('_', "-"))
}

/// The terminal's equivalent of `navigator.language`.
pub fn system_locale() -> Option<String> {
  ["LC_ALL", "LC_MESSAGES", "LANG"]
    .iter()
    .filter_map(|var| std::env::var(var).ok())
    .find_map(|value| posix_to_tag(&value))
}

pub fn open_preference(project: &Project) -> LanguagePreference<FileStorage> {
  LanguagePreference::new(FileStorage::new(project.config.preferences_path(&project.base_dir)))
}

pub fn run_lang(project: &Project, action: LangAction) -> Result<()> {
  let mut pref = open_preference(project);
  let file = pref.storage().path().display().to_string();

  match action {
    LangAction::Show => {
      let language = pref.init_language(None);
      ui::ok(&format!("{language} ({})", language.html_lang()));
      ui::detail(&file);
    }
    LangAction::Set { language } => {
      let language = parse_language(&language)?;
      pref.set_language(language).context("failed to save language")?;
      ui::ok(&format!("language set to {language}"));
      ui::detail(&file);
    }
    LangAction::Init { locale } => {
      let locale = locale.or_else(system_locale);
      if let Some(ref tag) = locale {
        ui::arrow(&format!("locale {tag}"));
      }
      let language = pref.init_language(locale.as_deref());
      ui::ok(&format!("{language} ({})", language.html_lang()));
    }
    LangAction::List => {
      let current = pref.init_language(None);
      for language in Language::ALL {
        let marker = if language == current { "*" } else { " " };
        println!("  {marker} {:<6} {}", language.as_str(), language.html_lang());
      }
    }
  }
  Ok(())
}
