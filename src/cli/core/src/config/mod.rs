/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{CONFIG_FILE_NAME, find_project_config, load_project_config};
pub use types::{ApiSection, PreferencesSection, PreviewSection, ProjectConfig, SiteSection};
