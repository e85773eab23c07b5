//! rsx-site: developer tool for the RSX static site.
//!
//! Runs the same loader, cache and search code the pages use in the browser.
//! Logging goes to stderr; stdout carries command output only.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rsx_core::SiteConfig;

mod commands;

#[derive(Parser)]
#[command(name = "rsx-site")]
#[command(about = "Assemble RSX pages with their shared header and footer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inject the header and footer fragments into a page
    Assemble {
        /// HTML file containing the placeholders
        page: PathBuf,

        /// URL path the page is served under, e.g. /rsx-store/index.html
        #[arg(long)]
        path: String,

        /// Write the result here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Drop cached fragments and fetch everything again
        #[arg(long)]
        reload: bool,
    },
    /// Search the store catalog
    Search {
        query: String,
    },
    /// Print the relative prefix from a page to the site root
    BasePath {
        path: String,
    },
    /// Manage the fragment cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Remove cached fragments and the version tag
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = SiteConfig::load()?;

    match cli.command {
        Command::Assemble { page, path, out, reload } => {
            let html = tokio::fs::read_to_string(&page).await?;
            let assembled = commands::assemble(&config, &html, &path, reload).await?;
            if !assembled.report.header.injected() && !assembled.report.footer.injected() {
                tracing::warn!(page = %page.display(), "no fragments injected");
            }
            match out {
                Some(out) => tokio::fs::write(&out, assembled.html).await?,
                None => println!("{}", assembled.html),
            }
        }
        Command::Search { query } => {
            for line in commands::search_lines(&config.catalog, &query) {
                println!("{line}");
            }
        }
        Command::BasePath { path } => println!("{}", commands::base_path(&config, &path)),
        Command::Cache { action: CacheAction::Clear } => commands::clear_cache(&config).await?,
    }

    Ok(())
}
