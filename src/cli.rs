//! Command-line interface for glot.
//!
//! Handles CLI argument parsing and execution logic for generating language
//! cards as SVG files.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use crate::config::{CliOverrides, Config};
use crate::errors::Result;
use crate::github::GitHubClient;
use crate::options::Validator;
use crate::pipeline;

/// Command-line arguments for glot.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The GitHub username to generate a language card for.
    pub username: Option<String>,

    /// The output path for the generated card.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// GitHub token to use for API requests.
    #[arg(short, long)]
    pub token: Option<String>,

    /// Card layout: normal, compact, donut, donut-vertical or pie.
    #[arg(long)]
    pub layout: Option<String>,

    /// Locale for the card title.
    #[arg(long)]
    pub locale: Option<String>,

    /// Hide the card title.
    #[arg(long)]
    pub hide_title: bool,

    /// Card width in pixels.
    #[arg(long)]
    pub card_width: Option<u32>,

    /// Comma-separated list of languages to hide.
    #[arg(long)]
    pub hide: Option<String>,

    /// Number of languages to display.
    #[arg(long)]
    pub langs_count: Option<usize>,

    /// Per-language color overrides as a JSON object.
    #[arg(long)]
    pub lang_colors: Option<String>,

    /// Start the HTTP server.
    #[arg(
        short,
        long,
        value_name = "HOST:PORT",
        num_args = 0..=1,
        require_equals = false
    )]
    pub server: Option<Option<String>>,

    /// Set the logging level.
    #[arg(long, short = 'L', value_name = "LEVEL", default_value_t = if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO })]
    pub log_level: Level,

    /// Port to use for the server (defaults to 8080).
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Cli {
    /// Collects the card-affecting arguments into the query-parameter shape
    /// the validator consumes, so CLI and server requests take one path.
    pub fn to_query(&self) -> HashMap<String, String> {
        let mut query = HashMap::new();
        if let Some(username) = &self.username {
            query.insert("username".to_string(), username.clone());
        }
        if let Some(layout) = &self.layout {
            query.insert("layout".to_string(), layout.clone());
        }
        if let Some(locale) = &self.locale {
            query.insert("locale".to_string(), locale.clone());
        }
        if self.hide_title {
            query.insert("hide_title".to_string(), "true".to_string());
        }
        if let Some(width) = self.card_width {
            query.insert("card_width".to_string(), width.to_string());
        }
        if let Some(hide) = &self.hide {
            query.insert("hide".to_string(), hide.clone());
        }
        if let Some(count) = self.langs_count {
            query.insert("langs_count".to_string(), count.to_string());
        }
        if let Some(lang_colors) = &self.lang_colors {
            query.insert("lang_colors".to_string(), lang_colors.clone());
        }
        query
    }
}

/// Executes the CLI command to generate a language card.
pub async fn run(cli: Cli) -> Result<()> {
    let username = cli.username.as_ref().unwrap();

    let config = Config::load(Some(CliOverrides::from_cli_args(cli.token.clone(), cli.port)));
    let client = GitHubClient::with_token(config.github.token.clone());
    let validator = Validator::from_config(&config);

    let output_path = match &cli.output {
        Some(path) => path.clone(),
        None => PathBuf::from(format!("{}.svg", username)),
    };

    let start_time = std::time::Instant::now();

    let card = pipeline::respond(&client, &validator, &config.card, &cli.to_query()).await;

    let duration = start_time.elapsed();
    tracing::debug!(
        username = username,
        total_duration = ?duration,
        "CLI card generation completed"
    );

    if duration.as_millis() > 1000 {
        tracing::warn!(
            username = username,
            total_duration = ?duration,
            "Slow CLI card generation"
        );
    }

    fs::write(&output_path, card.body)?;

    tracing::info!("Successfully generated {}.", output_path.to_string_lossy());

    Ok(())
}
