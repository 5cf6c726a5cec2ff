//! Catalog of library entries keyed by entry code.
//!
//! The catalog is a single JSON object. The distinguished `library_dir` key
//! names the root under which every entry's media lives; every other key
//! whose value is an object with a string `Path` attribute is an entry.
//! Keys that are neither are carried through untouched on persist.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Top-level key holding the library root
pub const LIBRARY_DIR_KEY: &str = "library_dir";

/// Entry attribute holding the media directory, relative to `library_dir`
pub const PATH_ATTRIBUTE: &str = "Path";

/// Default fraction of stale entries that may be pruned without asking
pub const DEFAULT_AUTO_PRUNE_RATIO: f64 = 0.05;

/// Errors that can occur while loading or saving the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Corrupt catalog: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// In-memory catalog document
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    library_dir: PathBuf,

    /// The whole document, in file key order
    document: Map<String, Value>,
}

/// Borrowed view of a single entry
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    code: &'a str,
    attributes: &'a Map<String, Value>,
}

impl<'a> Entry<'a> {
    /// The entry code (top-level key)
    pub fn code(&self) -> &'a str {
        self.code
    }

    /// Media directory relative to the library root
    pub fn path(&self) -> &'a str {
        self.attributes
            .get(PATH_ATTRIBUTE)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// All attributes in document order
    pub fn attributes(&self) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.attributes.get(name)
    }

    /// Case-sensitive substring match against the code or any rendered attribute value
    pub fn matches(&self, keyword: &str) -> bool {
        self.code.contains(keyword)
            || self
                .attributes
                .values()
                .any(|value| render_value(value).contains(keyword))
    }
}

/// Render an attribute value for display and matching.
///
/// Strings are shown raw; everything else as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_entry(key: &str, value: &Value) -> bool {
    key != LIBRARY_DIR_KEY
        && value
            .as_object()
            .and_then(|attrs| attrs.get(PATH_ATTRIBUTE))
            .map(Value::is_string)
            .unwrap_or(false)
}

impl Catalog {
    /// Parse a catalog from JSON text
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| CatalogError::Corrupt(format!("invalid JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Build a catalog from an already-parsed JSON document
    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let Value::Object(document) = value else {
            return Err(CatalogError::Corrupt(
                "top-level value is not an object".to_string(),
            ));
        };

        let library_dir = match document.get(LIBRARY_DIR_KEY) {
            Some(Value::String(dir)) => PathBuf::from(dir),
            Some(_) => {
                return Err(CatalogError::Corrupt(format!(
                    "'{}' is not a string",
                    LIBRARY_DIR_KEY
                )))
            }
            None => {
                return Err(CatalogError::Corrupt(format!(
                    "missing '{}'",
                    LIBRARY_DIR_KEY
                )))
            }
        };

        for (key, value) in &document {
            if key != LIBRARY_DIR_KEY && !is_entry(key, value) {
                warn!(key = %key, "Catalog key has no string Path, keeping it but not as an entry");
            }
        }

        Ok(Self {
            library_dir,
            document,
        })
    }

    /// Serialize with 4-space indentation, non-ASCII kept verbatim
    pub fn to_pretty_json(&self) -> Result<String, CatalogError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.document.serialize(&mut serializer)?;

        // serde_json only ever emits UTF-8
        String::from_utf8(buf).map_err(|e| CatalogError::Corrupt(e.to_string()))
    }

    /// Root directory of the library
    pub fn library_dir(&self) -> &Path {
        &self.library_dir
    }

    /// Iterate entries in document order
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> {
        self.document.iter().filter_map(|(key, value)| {
            if !is_entry(key, value) {
                return None;
            }
            value.as_object().map(|attributes| Entry {
                code: key.as_str(),
                attributes,
            })
        })
    }

    /// All entry codes in document order
    pub fn codes(&self) -> Vec<&str> {
        self.entries().map(|e| e.code()).collect()
    }

    /// Look up an entry by code
    pub fn get(&self, code: &str) -> Option<Entry<'_>> {
        self.entries().find(|entry| entry.code() == code)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Absolute-or-relative media directory of an entry
    pub fn entry_dir(&self, entry: &Entry<'_>) -> PathBuf {
        self.library_dir.join(entry.path())
    }

    /// Codes of entries whose media directory does not exist
    pub fn stale_codes(&self) -> Vec<String> {
        self.entries()
            .filter(|entry| !self.entry_dir(entry).exists())
            .map(|entry| entry.code().to_string())
            .collect()
    }

    /// Remove the given entries, keeping the order of everything else.
    ///
    /// Returns how many were actually removed.
    pub fn remove_entries(&mut self, codes: &[String]) -> usize {
        let before = self.document.len();
        self.document
            .retain(|key, value| !(is_entry(key, value) && codes.iter().any(|c| c == key)));
        before - self.document.len()
    }

    /// Drop stale entries according to the prune policy.
    ///
    /// Up to `policy.auto_prune_ratio` of the catalog is pruned silently;
    /// beyond that the prompter is asked and any reply without an `n`
    /// (case-insensitive) counts as yes.
    pub fn reconcile(
        &mut self,
        policy: &PrunePolicy,
        prompter: &mut dyn Prompter,
    ) -> std::io::Result<Reconciliation> {
        let total = self.len();
        let stale = self.stale_codes();

        debug!(total, stale = stale.len(), "Reconciling catalog");

        if stale.is_empty() {
            return Ok(Reconciliation {
                total,
                stale,
                decision: PruneDecision::NothingStale,
            });
        }

        let decision = if policy.allows_auto_prune(stale.len(), total) {
            PruneDecision::AutoDeleted
        } else {
            let question = format!("Delete {} entries (Y/N)", stale.len());
            match prompter.ask(&question)? {
                Some(reply) if is_affirmative(&reply) => PruneDecision::Confirmed,
                Some(_) => PruneDecision::Declined,
                None => {
                    warn!("No reply to prune confirmation, keeping stale entries");
                    PruneDecision::Declined
                }
            }
        };

        if decision.deletes() {
            let removed = self.remove_entries(&stale);
            info!(removed, "Pruned stale catalog entries");
        }

        Ok(Reconciliation {
            total,
            stale,
            decision,
        })
    }
}

/// Thresholds governing stale-entry pruning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrunePolicy {
    /// Largest stale fraction pruned without confirmation (inclusive)
    pub auto_prune_ratio: f64,
}

impl Default for PrunePolicy {
    fn default() -> Self {
        Self {
            auto_prune_ratio: DEFAULT_AUTO_PRUNE_RATIO,
        }
    }
}

impl PrunePolicy {
    pub fn allows_auto_prune(&self, stale: usize, total: usize) -> bool {
        if total == 0 {
            return true;
        }
        (stale as f64 / total as f64) <= self.auto_prune_ratio
    }
}

/// What reconciliation did with the stale entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneDecision {
    /// Every entry's directory exists
    NothingStale,

    /// Under the threshold, deleted without asking
    AutoDeleted,

    /// Over the threshold, user agreed
    Confirmed,

    /// Over the threshold, user declined (or gave no reply)
    Declined,
}

impl PruneDecision {
    pub fn deletes(self) -> bool {
        matches!(self, PruneDecision::AutoDeleted | PruneDecision::Confirmed)
    }
}

/// Outcome of [`Catalog::reconcile`]
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Entry count before reconciliation
    pub total: usize,

    /// Codes found stale
    pub stale: Vec<String>,

    pub decision: PruneDecision,
}

impl Reconciliation {
    /// Codes actually removed from the catalog
    pub fn removed(&self) -> &[String] {
        if self.decision.deletes() {
            &self.stale
        } else {
            &[]
        }
    }
}

/// Source of yes/no answers for prune confirmation
pub trait Prompter {
    /// Ask a question; `None` means no reply is available (EOF)
    fn ask(&mut self, question: &str) -> std::io::Result<Option<String>>;
}

/// Any reply not containing the letter `n` (either case) is a yes.
pub fn is_affirmative(reply: &str) -> bool {
    !reply.to_lowercase().contains('n')
}
