/* src/core/rust/src/lib.rs */

pub mod configuration;
pub mod errors;
pub mod fallback;
pub mod head;
pub mod language;
pub mod page_meta;
pub mod preference;
pub mod runtime;

// Re-exports for ergonomic use
pub use configuration::{ConfigResolver, Configuration, RenderContext};
pub use errors::{LanguageError, PreferenceError, SourceError};
pub use head::{HeadMeta, MetaTag};
pub use language::Language;
pub use page_meta::{PageTitleConfig, build_description, build_keywords, build_title};
pub use preference::{FileStorage, LanguagePreference, MemoryStorage, PreferenceStorage};
pub use runtime::{BoxFuture, EdgeRuntime, NodeRuntime, Runtime, RuntimeEnv, runtime_for};
