//! CLI administration tool for qrlink.
//!
//! Provides commands for managing short links, rendering QR images and
//! checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Create a link
//! cargo run --bin admin -- links create --name "Menu" --url https://cafe.example/menu
//!
//! # Point an existing link somewhere else
//! cargo run --bin admin -- links update 3 --url https://cafe.example/menu-winter
//!
//! # Render a QR image
//! cargo run --bin admin -- qr https://qr.example.com/r/AbCd1234 --format svg
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Uses the same configuration as the server (see `qrlink::config`).
//! Link and database commands require the `postgres` storage backend.
//! `qr` reads only the QR defaults and runs without a database.

use qrlink::api::dto::management::{CreateLinkInput, UpdateLinkInput};
use qrlink::application::services::LinkService;
use qrlink::config::{self, Config, StorageBackend};
use qrlink::domain::entities::ShortLink;
use qrlink::infrastructure::qr::{QrFormat, QrRenderer};
use qrlink::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::path::PathBuf;
use validator::Validate;

/// CLI tool for managing qrlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Public base URL used to print short URLs (defaults to BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Render a QR image to a file
    Qr {
        /// Text or URL to encode
        url: String,

        /// Output format: png, transparent or svg
        #[arg(short, long, default_value = "png")]
        format: QrFormat,

        /// Output file (defaults to the download name for the format)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Show a single link by short code
    Show {
        /// Short code (8 characters)
        code: String,
    },

    /// Create a new link
    Create {
        /// Display name (e.g., "Table menu")
        #[arg(short, long)]
        name: Option<String>,

        /// Target URL
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Change the target URL of a link
    Update {
        /// Link ID
        id: i64,

        /// New target URL
        #[arg(short, long)]
        url: String,
    },

    /// Delete a link
    Delete {
        /// Link ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match cli.command {
        Commands::Qr { .. } => config::load_without_storage(),
        _ => config::load_from_env(),
    }
    .context("Failed to load configuration")?;

    let base_url = cli
        .base_url
        .or_else(|| config.base_url.clone())
        .unwrap_or_else(|| "http://localhost:3000".to_string());

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &config, &base_url).await?,
        Commands::Qr {
            url,
            format,
            output,
        } => render_qr(&config, &url, format, output)?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

/// Link and database commands only make sense against PostgreSQL.
fn require_postgres(config: &Config) -> Result<()> {
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("admin commands require STORAGE_BACKEND=postgres");
    }
    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, config: &Config, base_url: &str) -> Result<()> {
    require_postgres(config)?;

    let service = LinkService::new(server::build_repository(config).await?)
        .with_code_generation_attempts(config.code_generation_attempts);

    match action {
        LinkAction::List => list_links(&service, base_url).await?,
        LinkAction::Show { code } => {
            let link = service.find_by_code(&code).await?;
            print_link(&link, base_url);
        }
        LinkAction::Create { name, url } => create_link(&service, base_url, name, url).await?,
        LinkAction::Update { id, url } => {
            let input = UpdateLinkInput::new(id, &url);
            input.validate().context("Invalid input")?;

            let link = service.update_target_url(input.id, &input.target_url).await?;

            println!("{}", "✅ Link updated".green().bold());
            println!();
            print_link(&link, base_url);
        }
        LinkAction::Delete { id, yes } => delete_link(&service, id, yes).await?,
    }

    Ok(())
}

/// Lists all links in a table.
///
/// # Output Format
///
/// ```text
/// 📋 Short Links
///
///   ID    Code      Clicks   Name                   Target
///   ───────────────────────────────────────────────────────────────────
///   2     q1w2e3r4  12       Table menu             https://cafe.example/menu
/// ```
async fn list_links(service: &LinkService, base_url: &str) -> Result<()> {
    println!("{}", "📋 Short Links".bright_blue().bold());
    println!();

    let links = service.list_all().await?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<9} {:<8} {:<22} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Name".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<5} {:<9} {:<8} {:<22} {}",
            link.id.to_string().bright_black(),
            link.short_code.cyan(),
            link.click_count.to_string().bright_green(),
            truncate(&link.name, 22),
            link.target_url
        );
    }

    println!();
    println!(
        "  Total: {}   Base URL: {}",
        links.len().to_string().bright_white().bold(),
        base_url.bright_black()
    );
    println!();

    Ok(())
}

/// Creates a link, prompting for missing fields.
async fn create_link(
    service: &LinkService,
    base_url: &str,
    name: Option<String>,
    url: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Target URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let input = CreateLinkInput::new(&name, &url);
    input.validate().context("Invalid input")?;

    let link = service.create(&input.name, &input.target_url).await?;

    println!("{}", "✅ Link created".green().bold());
    println!();
    print_link(&link, base_url);
    println!(
        "  Render it with: {} admin qr {}",
        "cargo run --bin".bright_cyan(),
        link.short_url(base_url)
    );
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &LinkService, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Short Link".bright_blue().bold());
    println!();

    let link = service.find_by_id(id).await?;

    println!("  Name:   {}", link.name.cyan());
    println!("  Code:   {}", link.short_code.bright_black());
    println!("  Clicks: {}", link.click_count);
    println!();
    println!(
        "{}",
        "⚠️  Printed QR codes for this link will stop working.".yellow()
    );

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service.delete(id).await?;

    println!();
    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Renders a QR image with the configured defaults and writes it to disk.
fn render_qr(
    config: &Config,
    url: &str,
    format: QrFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let renderer = QrRenderer::new(config.qr_options()?);
    let bytes = renderer
        .render(url.trim(), format)
        .with_context(|| format!("Failed to render QR code for '{url}'"))?;

    let output = output.unwrap_or_else(|| PathBuf::from(format.file_name()));
    std::fs::write(&output, &bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} {} ({} bytes)",
        "✅ Wrote".green().bold(),
        output.display().to_string().cyan(),
        bytes.len()
    );

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    require_postgres(config)?;
    let pool: PgPool = server::connect_pool(config).await?;

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(&pool)
                .await?;

            let (links, clicks): (i64, i64) = sqlx::query_as(
                "SELECT COUNT(*), COALESCE(SUM(click_count), 0)::BIGINT FROM short_links",
            )
            .fetch_one(&pool)
            .await
            .context("Failed to query short_links (have migrations run?)")?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Links:      {}", links.to_string().bright_green().bold());
            println!("  Clicks:     {}", clicks.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}

fn print_link(link: &ShortLink, base_url: &str) {
    println!("  ID:        {}", link.id.to_string().bright_black());
    println!("  Name:      {}", link.name.cyan());
    println!("  Short URL: {}", link.short_url(base_url).bright_yellow());
    println!("  Target:    {}", link.target_url);
    println!("  Clicks:    {}", link.click_count.to_string().bright_green());
    println!(
        "  Created:   {}",
        link.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    println!();
}

/// Shortens `s` to at most `max` characters for table output.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
