//! Leagues CLI
//!
//! Runs the league/team page lifecycle against a headless document:
//! - Render the page for a path (optionally following a league click)
//! - Print the default configuration

use clap::{Parser, Subcommand};
use leagues::browser::{HeadlessDocument, LEAGUES_CONTAINER, TEAMS_CONTAINER};
use leagues::config::{generate_default_config, Config, LoggingConfig};
use leagues::content::{preview_ref_from_cookies, PrismicClient};
use leagues::view::ViewController;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "leagues")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render league and team views from the content API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: searched in the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the page for a path
    Render {
        /// Browser path to load
        #[arg(short, long, default_value = "/")]
        path: String,
        /// Cookie string, e.g. to enable preview mode
        #[arg(long, default_value = "")]
        cookie: String,
        /// Click the league card with this slug after loading
        #[arg(long)]
        click: Option<String>,
        /// Output format (html, json)
        #[arg(short, long, default_value = "html")]
        format: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("leagues={}", config.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&config.logging);

    match cli.command {
        Commands::Render {
            path,
            cookie,
            click,
            format,
        } => {
            let page = HeadlessDocument::new(path).with_cookie(cookie);

            let preview_ref = preview_ref_from_cookies(page.cookie(), &config.content.repository);
            let gateway = Arc::new(PrismicClient::new(config.content.client_config(preview_ref))?);
            let controller = ViewController::new(
                gateway,
                config.render.view_options(&config.content.routes),
            );

            let mut view = controller.handle_event(page.load_event(), &page).await?;

            if let Some(slug) = click {
                match page.click_league(&slug) {
                    Some(event) => view = controller.handle_event(event, &page).await?,
                    None => anyhow::bail!("No league card with slug '{}'", slug),
                }
            }

            let leagues = page.inner_html(LEAGUES_CONTAINER).unwrap_or_default();
            let teams = page.inner_html(TEAMS_CONTAINER).unwrap_or_default();

            match format.as_str() {
                "json" => {
                    let mut containers = serde_json::Map::new();
                    containers.insert(LEAGUES_CONTAINER.to_string(), leagues.into());
                    containers.insert(TEAMS_CONTAINER.to_string(), teams.into());

                    let output = serde_json::json!({
                        "path": page.navigation().path(),
                        "state": view,
                        "leagues": page.league_links(),
                        "containers": containers,
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                _ => {
                    println!("<!-- path: {} -->", page.navigation().path());
                    println!("<div id=\"{}\">{}</div>", LEAGUES_CONTAINER, leagues);
                    println!("<div id=\"{}\">{}</div>", TEAMS_CONTAINER, teams);
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Wrote default config to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}
