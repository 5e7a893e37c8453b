/* src/core/rust/src/configuration/mod.rs */

mod resolver;
mod types;

#[cfg(test)]
mod tests;

pub use resolver::{
  CONFIG_FILE, CONFIG_URL_PATH, ConfigResolver, PRIMARY_DIR, RenderContext, SECONDARY_DIR,
};
pub(crate) use types::non_empty;
pub use types::{Configuration, FALLBACK_CITY, FALLBACK_COLOR, LocalizedText};
