//! Command-line interface for dlplay.
//!
//! Reconciles the catalog, picks entries by keyword or at random, prints
//! them and plays them one after another.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::adapters::MpvPlayer;
use crate::config::{self, ResolvedConfig};
use crate::core::{open_catalog, play_batch, report_candidates, StdinPrompter};
use crate::library::select::{self, SelectionRequest, DEFAULT_COUNT, MAX_COUNT, MIN_COUNT};

/// dlplay - pick entries from a media catalog and play them
#[derive(Parser, Debug)]
#[command(name = "dlplay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Keywords to filter by (every keyword must match)
    #[arg(value_name = "KEYWORD")]
    pub terms: Vec<String>,

    /// Keywords to filter by (same as bare words)
    #[arg(short, long, num_args = 1..)]
    pub keywords: Vec<String>,

    /// Number of entries to pick
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_COUNT as u8,
        value_parser = clap::value_parser!(u8).range(MIN_COUNT as i64..=MAX_COUNT as i64)
    )]
    pub number: u8,

    /// Catalog file (overrides config)
    #[arg(long, env = "DLPLAY_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Print the selected entries without playing them
    #[arg(long)]
    pub no_play: bool,

    /// Show resolved configuration and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Keywords from `-k` followed by bare words
    pub fn all_keywords(&self) -> Vec<String> {
        self.keywords
            .iter()
            .chain(self.terms.iter())
            .cloned()
            .collect()
    }

    pub fn selection_request(&self) -> SelectionRequest {
        SelectionRequest {
            keywords: self.all_keywords(),
            count: self.number as usize,
        }
    }

    /// Catalog from `--catalog`/`DLPLAY_CATALOG`, else from the configuration
    pub fn catalog_path(&self, cfg: &ResolvedConfig) -> Result<PathBuf> {
        self.catalog
            .clone()
            .or_else(|| cfg.catalog.clone())
            .context("No catalog path: pass --catalog, set DLPLAY_CATALOG or DLPLAY_HOME")
    }

    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let cfg = config::config()?;

        if self.show_config {
            show_config(cfg, self.catalog.as_ref());
            return Ok(());
        }

        let catalog_path = self.catalog_path(cfg)?;
        let mut stdout = io::stdout();

        let (catalog, _) = open_catalog(
            &catalog_path,
            &cfg.library.prune_policy(),
            &mut StdinPrompter,
            &mut stdout,
        )?;

        let selection = select::select(&catalog, &self.selection_request(), &mut rand::thread_rng());
        report_candidates(&selection, &mut stdout)?;

        let player = MpvPlayer::with_command(cfg.player.binary.clone(), cfg.player.args.clone());
        let player_ref: Option<&dyn crate::adapters::Player> =
            if self.no_play { None } else { Some(&player) };

        play_batch(
            &catalog,
            &selection.picked,
            &cfg.library,
            player_ref,
            &mut stdout,
        )
        .await?;

        Ok(())
    }
}

/// Print the resolved configuration
fn show_config(cfg: &ResolvedConfig, catalog_override: Option<&PathBuf>) {
    println!("dlplay configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:     {}", display_or_unknown(cfg.home.as_ref()));
    println!(
        "  Catalog:  {}",
        display_or_unknown(catalog_override.or(cfg.catalog.as_ref()))
    );
    println!();
    println!("Player:");
    println!("  Binary:   {}", cfg.player.binary);
    println!("  Args:     {}", cfg.player.args.join(" "));
    println!();
    println!("Library:");
    println!("  Auto-prune ratio:  {}", cfg.library.auto_prune_ratio);
    println!("  Media extensions:  {}", cfg.library.media_extensions.join(", "));
    println!("  Cover extensions:  {}", cfg.library.cover_extensions.join(", "));
    println!("  Hidden attributes: {}", cfg.library.hidden_attributes.join(", "));
}

fn display_or_unknown(path: Option<&PathBuf>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(unknown)".to_string())
}
