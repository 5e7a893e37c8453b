/* src/cli/core/src/head.rs */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mtr_web_core::{HeadMeta, Language, PageTitleConfig, RenderContext, RuntimeEnv};

use crate::lang::{open_preference, parse_language};
use crate::{Project, site, ui};

#[derive(Args)]
pub struct HeadArgs {
  /// Page key into page_titles / page_descriptions
  #[arg(short, long)]
  key: Option<String>,
  /// Title used when the key has no entry
  #[arg(long)]
  title: Option<String>,
  /// Replaces the city name after the dash
  #[arg(long)]
  suffix: Option<String>,
  /// Description used when the key has no entry
  #[arg(long)]
  description: Option<String>,
  /// Display language (defaults to the saved preference)
  #[arg(short, long)]
  lang: Option<String>,
  /// Skip the on-disk configuration sources
  #[arg(long)]
  client: bool,
  /// HTML document to inject the head into
  #[arg(long)]
  html: Option<PathBuf>,
  /// Write the injected document here instead of stdout
  #[arg(short, long, requires = "html")]
  out: Option<PathBuf>,
  /// Print the head as JSON
  #[arg(long, conflicts_with = "html")]
  json: bool,
}

impl HeadArgs {
  fn page(&self) -> PageTitleConfig {
    PageTitleConfig {
      key: self.key.clone(),
      default_title: self.title.clone(),
      suffix: self.suffix.clone(),
      description_key: self.key.clone(),
      default_description: self.description.clone(),
    }
  }
}

pub async fn run_head(project: &Project, env: RuntimeEnv, args: HeadArgs) -> Result<()> {
  let language = match args.lang.as_deref() {
    Some(input) => parse_language(input)?,
    None => open_preference(project).init_language(None),
  };
  let context = if args.client { RenderContext::Client } else { RenderContext::Server };
  let config = site::resolve(project, env, context).await?;
  let head = HeadMeta::for_page(&args.page(), Some(&config), language);

  if args.json {
    println!("{}", serde_json::to_string_pretty(&head).context("failed to serialize head")?);
    return Ok(());
  }

  let Some(html_path) = args.html else {
    print_head(&head, language);
    return Ok(());
  };

  let html = std::fs::read_to_string(&html_path)
    .with_context(|| format!("failed to read {}", html_path.display()))?;
  let rendered = head.apply(&html, language);
  match args.out {
    Some(out) => {
      std::fs::write(&out, rendered).with_context(|| format!("failed to write {}", out.display()))?;
      ui::ok(&format!("{} -> {}", html_path.display(), out.display()));
    }
    None => print!("{rendered}"),
  }
  Ok(())
}

fn print_head(head: &HeadMeta, language: Language) {
  ui::banner("head");
  ui::field("language", &format!("{language} ({})", language.html_lang()));
  ui::field("title", &head.title);
  ui::blank();
  for line in head.to_html().lines() {
    ui::detail(line);
  }
  ui::blank();
}
