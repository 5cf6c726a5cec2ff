//! dlplay - media library browser and launcher
//!
//! Keeps a JSON catalog of library entries keyed by code, drops entries
//! whose directory has disappeared, picks entries by keyword or at random,
//! prints their metadata and plays them through an external player.
//!
//! # Flow
//!
//! - The catalog is loaded, reconciled against the filesystem and written
//!   back once at startup
//! - A selection is drawn from the reconciled catalog
//! - Each selected entry is printed, then played; the player is awaited
//!   before the next entry starts
//!
//! # Modules
//!
//! - `adapters`: External player integrations (mpv)
//! - `core`: Presentation, playback dispatch, run sequencing
//! - `library`: Catalog, selection, media discovery
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Five random entries
//! dlplay
//!
//! # Up to three entries matching both keywords
//! dlplay rain binaural -n 3
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod library;

// Re-export main types at crate root for convenience
pub use adapters::{MpvPlayer, PlaybackError, Player};
pub use library::{Catalog, CatalogError, CatalogStore, Entry, Selection, SelectionRequest};
