//! Media library catalog and entry lookup.
//!
//! The catalog is a single JSON file mapping entry codes to metadata.
//! Each entry's `Path` is relative to the catalog's `library_dir`.
//!
//! # Layout
//!
//! ```text
//! catalog.json                  # {"library_dir": "...", "<code>": {"Path": "...", ...}}
//! <library_dir>/
//!     └── <Path>/               # one directory per entry
//!         ├── cover.jpg         # largest image is the cover
//!         └── 01 track.mp3      # played in natural order
//! ```

pub mod catalog;
pub mod media;
pub mod natural;
pub mod select;
pub mod store;

pub use catalog::{
    Catalog, CatalogError, Entry, Prompter, PruneDecision, PrunePolicy, Reconciliation,
};
pub use select::{Selection, SelectionRequest};
pub use store::CatalogStore;
