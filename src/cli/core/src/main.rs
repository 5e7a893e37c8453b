/* src/cli/core/src/main.rs */

mod api;
mod config;
mod head;
mod lang;
mod preview;
mod site;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mtr_web_core::{RenderContext, RuntimeEnv};
use tracing_subscriber::EnvFilter;

use config::{ProjectConfig, find_project_config, load_project_config};

#[derive(Parser)]
#[command(name = "mtr-web", about = "MTR transit web front-end tools", version)]
struct Cli {
  /// Path to mtr-web.toml (auto-detected if omitted)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Resolve the site configuration through its fallback sources
  Config {
    /// Skip the on-disk sources, as a browser would
    #[arg(long)]
    client: bool,
    /// Print the resolved document as JSON
    #[arg(long)]
    json: bool,
  },
  /// Compute the page title and meta tags
  Head(head::HeadArgs),
  /// Show or change the saved display language
  Lang {
    #[command(subcommand)]
    action: lang::LangAction,
  },
  /// Call one simulation server endpoint and print the response envelope
  Api(api::ApiArgs),
  /// Serve the public directory on a local port
  Preview {
    #[arg(short, long)]
    port: Option<u16>,
    /// Directory to serve (defaults to preview.public_dir)
    #[arg(short, long)]
    dir: Option<PathBuf>,
  },
}

/// Loaded project config plus the directory it was found in.
pub struct Project {
  pub base_dir: PathBuf,
  pub config: ProjectConfig,
}

/// Resolve config path (explicit or auto-detected) and parse it. Without a
/// config file every section takes its default, rooted at the cwd.
fn load_project(explicit: Option<PathBuf>) -> Result<Project> {
  let cwd = std::env::current_dir().context("failed to get cwd")?;
  let path = match explicit {
    Some(p) => p,
    None => match find_project_config(&cwd) {
      Ok(p) => p,
      Err(e) => {
        tracing::debug!(error = %e, "no project config, using defaults");
        return Ok(Project { base_dir: cwd, config: ProjectConfig::default() });
      }
    },
  };
  let config = load_project_config(&path)?;
  let base_dir = match path.parent() {
    Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
    _ => cwd,
  };
  tracing::debug!(path = %path.display(), "loaded project config");
  Ok(Project { base_dir, config })
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();
  let env = RuntimeEnv::from_env();
  let project = load_project(cli.config)?;

  match cli.command {
    Command::Config { client, json } => {
      let context = if client { RenderContext::Client } else { RenderContext::Server };
      site::run_config(&project, env, context, json).await?;
    }
    Command::Head(args) => head::run_head(&project, env, args).await?,
    Command::Lang { action } => lang::run_lang(&project, action)?,
    Command::Api(args) => api::run_api(&project, args).await?,
    Command::Preview { port, dir } => {
      let port = port.unwrap_or(project.config.preview.port);
      let dir = dir.unwrap_or_else(|| project.config.public_dir(&project.base_dir));
      preview::run_preview(&dir, port).await?;
    }
  }

  Ok(())
}

