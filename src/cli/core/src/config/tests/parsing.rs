/* src/cli/core/src/config/tests/parsing.rs */

use std::path::Path;

use super::*;

#[test]
fn parse_empty_config() {
  let config: ProjectConfig = toml::from_str("").unwrap();
  assert_eq!(config.site.origin, "http://localhost:3000");
  assert_eq!(config.api.base_url, "http://localhost:8888");
  assert!(config.api.dimension.is_none());
  assert_eq!(config.preview.port, 3000);
  assert_eq!(config.preview.public_dir, "public");
  assert!(config.preferences.file.is_none());
  assert!(config.validate().is_ok());
}

#[test]
fn parse_full_config() {
  let toml_str = r#"
[site]
origin = "https://mtr.example.com"

[api]
base_url = "http://10.0.0.5:8888"
dimension = "minecraft:overworld"

[preview]
port = 4173
public_dir = "dist"

[preferences]
file = "state/prefs.json"
"#;
  let config: ProjectConfig = toml::from_str(toml_str).unwrap();
  assert_eq!(config.origin_url().unwrap().as_str(), "https://mtr.example.com/");
  assert_eq!(config.api.base_url, "http://10.0.0.5:8888");
  assert_eq!(config.api.dimension.as_deref(), Some("minecraft:overworld"));
  assert_eq!(config.preview.port, 4173);
  assert_eq!(config.public_dir(Path::new("/srv/site")), Path::new("/srv/site/dist"));
  assert_eq!(config.preferences_path(Path::new("/srv/site")), Path::new("/srv/site/state/prefs.json"));
}

#[test]
fn partial_section_keeps_defaults() {
  let toml_str = r#"
[api]
dimension = "minecraft:the_end"
"#;
  let config: ProjectConfig = toml::from_str(toml_str).unwrap();
  assert_eq!(config.api.base_url, "http://localhost:8888");
  assert_eq!(config.api.dimension.as_deref(), Some("minecraft:the_end"));
}

#[test]
fn default_preferences_path() {
  let config = ProjectConfig::default();
  assert_eq!(
    config.preferences_path(Path::new("/work")),
    Path::new("/work/.mtr-web/preferences.json")
  );
}

#[test]
fn unknown_section_rejected() {
  let err = toml::from_str::<ProjectConfig>("[backend]\nport = 1\n").unwrap_err();
  assert!(err.to_string().contains("backend"));
}

#[test]
fn invalid_origin_rejected() {
  let config: ProjectConfig = toml::from_str("[site]\norigin = \"not a url\"\n").unwrap();
  let err = config.validate().unwrap_err();
  assert!(format!("{err:#}").contains("site.origin"));
}

#[test]
fn invalid_base_url_rejected() {
  let config: ProjectConfig = toml::from_str("[api]\nbase_url = \"localhost\"\n").unwrap();
  let err = config.validate().unwrap_err();
  assert!(format!("{err:#}").contains("api.base_url"));
}
