/* src/cli/core/src/preview.rs */

// Static preview server for the built site, including its configuration.json

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use axum::Router;
use tower_http::services::ServeDir;

use crate::ui;

fn router(public_dir: PathBuf) -> Router {
  Router::new().fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
}

pub async fn run_preview(public_dir: &Path, port: u16) -> Result<()> {
  if !public_dir.is_dir() {
    bail!("public directory not found: {}", public_dir.display());
  }
  if !public_dir.join("configuration.json").is_file() {
    ui::warn("configuration.json missing; pages will fall back to the network source");
  }

  ui::banner("preview");
  ui::arrow(&format!("serving {}", public_dir.display()));

  let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
    .await
    .with_context(|| format!("failed to bind port {port}"))?;
  ui::ok(&format!("http://localhost:{port}"));
  ui::blank();

  axum::serve(listener, router(public_dir.to_path_buf())).await?;
  Ok(())
}
