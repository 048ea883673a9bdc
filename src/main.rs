// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and the GitHub client
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod browser; // src/browser/ - navigation state, session, derived views
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - runtime settings
mod error; // src/error.rs - browsing errors
mod github; // src/github/ - URL parsing and the GitHub API client
mod shell; // src/shell.rs - terminal rendering and the interactive prompt

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use browser::{breadcrumbs, sorted, RepositorySession};
use cli::{Cli, Commands};
use config::Settings;
use github::GitHubClient;

type Session = RepositorySession<GitHubClient>;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::new(&cli.api_base, cli.timeout_secs, cli.user_agent.clone())?;
    let client = GitHubClient::new(&settings).context("Failed to create HTTP client")?;
    let session = RepositorySession::new(client);

    match cli.command {
        Commands::Info { repo, json } => handle_info(&session, &repo, json).await,
        Commands::Ls { repo, path, json } => {
            handle_ls(&session, &repo, path.as_deref().unwrap_or(""), json).await
        }
        Commands::Cat { repo, path } => handle_cat(&session, &repo, &path).await,
        Commands::Download { repo, path, output } => {
            handle_download(&session, &repo, &path, output.as_deref()).await
        }
        Commands::Browse { repo } => {
            shell::run_interactive(&session, repo.as_deref()).await?;
            Ok(0)
        }
    }
}

// Logs go to stderr; RUST_LOG overrides the -v level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("repo_browser={}", level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// Handles the 'info' subcommand: metadata plus the root listing
async fn handle_info(session: &Session, repo: &str, json: bool) -> Result<i32> {
    session.load_repository(repo).await?;
    let state = session.snapshot();

    if json {
        let output = json!({
            "repository": state.repository.as_ref().map(|r| &r.metadata),
            "entries": sorted(&state.listing),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        if let Some(repository) = &state.repository {
            println!("{}", shell::render_repository(repository));
        }
        print!("{}", shell::render_listing(&state));
    }
    Ok(0)
}

// Handles the 'ls' subcommand
async fn handle_ls(session: &Session, repo: &str, path: &str, json: bool) -> Result<i32> {
    session.load_repository(repo).await?;
    if !path.trim_matches('/').is_empty() {
        session.navigate_to(path).await?;
    }
    let state = session.snapshot();

    if json {
        let output = json!({
            "path": state.current_path,
            "breadcrumbs": breadcrumbs(&state.current_path),
            "entries": sorted(&state.listing),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", shell::render_listing(&state));
    }
    Ok(0)
}

// Handles the 'cat' subcommand: the raw content goes to stdout untouched
async fn handle_cat(session: &Session, repo: &str, path: &str) -> Result<i32> {
    session.load_repository(repo).await?;
    let file = shell::open_path(session, path).await?;
    print!("{}", file.content);
    Ok(0)
}

// Handles the 'download' subcommand
async fn handle_download(
    session: &Session,
    repo: &str,
    path: &str,
    output: Option<&Path>,
) -> Result<i32> {
    session.load_repository(repo).await?;
    let file = shell::open_path(session, path).await?;
    let target = shell::save_content(&file, output).await?;

    eprintln!(
        "💾 Saved {} ({}) to {}",
        file.file.path(),
        browser::format_size(file.content.len() as u64),
        target.display()
    );
    Ok(0)
}
