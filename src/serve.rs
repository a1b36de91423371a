//! Static file server for the visualization.
//!
//! Serves the working directory (artifacts, HTML and JS assets) with CORS
//! headers that let the page be opened from any origin.

use accident_viz_prep::output::require_artifacts;
use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, http::header, middleware};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tracing::{info, warn};

/// Serves `dir` on `port` until interrupted, optionally opening `page` in a browser.
#[tracing::instrument(skip(dir), fields(dir = %dir.display()))]
pub async fn serve(dir: &Path, port: u16, page: &str, open: bool) -> Result<()> {
    require_artifacts(dir)?;

    let root: PathBuf = dir.to_path_buf();
    let url = format!("http://localhost:{port}/{}", page.trim_start_matches('/'));

    info!(url = %url, "Server running, press Ctrl+C to stop");

    if open {
        let url = url.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let target = url.clone();
            match tokio::task::spawn_blocking(move || open_browser(&target)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(error = %e, url = %url, "Could not open browser"),
                Err(e) => warn!(error = %e, url = %url, "Browser opener task failed"),
            }
        });
    }

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .send_wildcard()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_header(header::CONTENT_TYPE);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .service(
                Files::new("/", root.clone())
                    .index_file("index.html")
                    .show_files_listing(),
            )
    })
    .bind(("0.0.0.0", port))
    .with_context(|| format!("failed to bind port {port}"))?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}

/// Hands `url` to the platform's default URL opener and waits for it to exit.
fn open_browser(url: &str) -> std::io::Result<()> {
    let mut cmd = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };

    let status = cmd.arg(url).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("opener exited with {status}")))
    }
}
