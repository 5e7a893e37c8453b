/* src/cli/core/src/site.rs */

use std::sync::Arc;

use anyhow::{Context, Result};
use mtr_web_core::configuration::CONFIG_URL_PATH;
use mtr_web_core::{
  ConfigResolver, Configuration, EdgeRuntime, NodeRuntime, RenderContext, Runtime, RuntimeEnv,
};

use crate::{Project, ui};

/// The edge runtime has no filesystem, so the project root only matters for
/// the standard one.
pub fn runtime(project: &Project, env: RuntimeEnv) -> Result<Arc<dyn Runtime>> {
  let origin = project.config.origin_url()?;
  Ok(match env {
    RuntimeEnv::Node => Arc::new(NodeRuntime::new(origin).with_working_dir(&project.base_dir)),
    RuntimeEnv::Cloudflare => Arc::new(EdgeRuntime::new(origin)),
  })
}

pub async fn resolve(project: &Project, env: RuntimeEnv, context: RenderContext) -> Result<Configuration> {
  let resolver = ConfigResolver::new(runtime(project, env)?).with_context(context);
  Ok(resolver.resolve_default().await)
}

pub async fn run_config(
  project: &Project,
  env: RuntimeEnv,
  context: RenderContext,
  json: bool,
) -> Result<()> {
  let resolver = ConfigResolver::new(runtime(project, env)?).with_context(context);

  if !json {
    ui::banner("config");
    ui::arrow(&format!("runtime {env}"));
    if context == RenderContext::Server {
      ui::detail(&resolver.primary_path());
      ui::detail(&resolver.secondary_path());
    }
    let url = project.config.origin_url()?.join(CONFIG_URL_PATH).context("invalid site origin")?;
    ui::detail(url.as_str());
  }

  let config = resolver.resolve_default().await;

  if json {
    let out = serde_json::to_string_pretty(&config).context("failed to serialize configuration")?;
    println!("{out}");
    return Ok(());
  }

  if config == Configuration::fallback() {
    ui::fail("no configuration source answered, using fallback");
  } else {
    ui::ok("configuration resolved");
  }
  ui::blank();
  print_summary(&config);
  ui::blank();
  Ok(())
}

fn print_summary(config: &Configuration) {
  ui::field("city", config.city_name().unwrap_or("-"));
  ui::field("color", config.color().unwrap_or("-"));
  ui::field("titles", &keys(config.page_titles.keys()));
  ui::field("descriptions", &keys(config.page_descriptions.keys()));
  if !config.extra.is_empty() {
    ui::field("other", &keys(config.extra.keys()));
  }
}

fn keys<'a>(keys: impl Iterator<Item = &'a String>) -> String {
  let list: Vec<&str> = keys.map(String::as_str).collect();
  if list.is_empty() { "-".to_string() } else { list.join(", ") }
}
