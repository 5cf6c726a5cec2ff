//! One run of the tool: reconcile the catalog, then present and play a batch.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::adapters::Player;
use crate::config::LibrarySettings;
use crate::library::{
    Catalog, CatalogStore, Prompter, PruneDecision, PrunePolicy, Reconciliation, Selection,
};

use super::dispatch::{DispatchOutcome, Dispatcher};
use super::present::render_entry;

/// Reads confirmation replies from standard input
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", question)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Load, reconcile, persist and reload the catalog at `path`.
///
/// The file stays locked for the whole sequence.
pub fn open_catalog(
    path: &Path,
    policy: &PrunePolicy,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<(Catalog, Reconciliation)> {
    let mut store = CatalogStore::open(path)
        .with_context(|| format!("Failed to open catalog: {}", path.display()))?;

    let mut catalog = store
        .load()
        .with_context(|| format!("Failed to load catalog: {}", path.display()))?;

    writeln!(out, "{} entries detected.", catalog.len())?;

    let report = catalog
        .reconcile(policy, prompter)
        .context("Failed to confirm stale entry removal")?;

    match report.decision {
        PruneDecision::AutoDeleted => writeln!(out, "Deleted: {:?}", report.stale)?,
        PruneDecision::Confirmed => writeln!(out, "Deleted {} entries", report.stale.len())?,
        PruneDecision::Declined => debug!(stale = report.stale.len(), "Kept stale entries"),
        PruneDecision::NothingStale => {}
    }

    store
        .persist(&catalog)
        .with_context(|| format!("Failed to write catalog: {}", path.display()))?;

    let catalog = store
        .load()
        .with_context(|| format!("Failed to reload catalog: {}", path.display()))?;

    Ok((catalog, report))
}

/// Print the keyword-filtered candidates, if keywords were given
pub fn report_candidates(selection: &Selection, out: &mut dyn Write) -> io::Result<()> {
    if let Some(ref filtered) = selection.filtered {
        writeln!(out, "{} found: {:?}", filtered.len(), filtered)?;
    }
    Ok(())
}

/// Tally of a played batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub presented: usize,
    pub played: usize,
    pub without_media: usize,
    pub unsuccessful: usize,
}

/// Present each selected entry, then play it before moving to the next.
///
/// A player that cannot be launched aborts the batch; a player that exits
/// non-zero does not.
#[instrument(skip_all, fields(batch = codes.len()))]
pub async fn play_batch(
    catalog: &Catalog,
    codes: &[String],
    settings: &LibrarySettings,
    player: Option<&dyn Player>,
    out: &mut dyn Write,
) -> Result<BatchReport> {
    let mut report = BatchReport::default();
    let dispatcher = player.map(|p| Dispatcher::new(p, &settings.media_extensions));

    for code in codes {
        let Some(entry) = catalog.get(code) else {
            debug!(%code, "Selected code no longer in catalog");
            continue;
        };

        write!(out, "{}", render_entry(catalog, &entry, settings))?;
        out.flush()?;
        report.presented += 1;

        let Some(ref dispatcher) = dispatcher else {
            continue;
        };

        let dir = catalog.entry_dir(&entry);
        match dispatcher
            .dispatch(&dir)
            .await
            .with_context(|| format!("Playback of {} failed", code))?
        {
            DispatchOutcome::Played { outcome, .. } => {
                report.played += 1;
                if !outcome.success() {
                    report.unsuccessful += 1;
                }
            }
            DispatchOutcome::NoMedia => {
                writeln!(out, "No playable files in {}", dir.display())?;
                report.without_media += 1;
            }
        }
    }

    info!(played = report.played, presented = report.presented, "Batch finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_report_format() {
        let selection = Selection {
            filtered: Some(vec!["RJ01".to_string(), "RJ02".to_string()]),
            picked: vec!["RJ02".to_string()],
        };
        let mut out = Vec::<u8>::new();

        report_candidates(&selection, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2 found: [\"RJ01\", \"RJ02\"]\n"
        );
    }

    #[test]
    fn test_candidate_report_empty_match() {
        let selection = Selection {
            filtered: Some(Vec::new()),
            picked: Vec::new(),
        };
        let mut out = Vec::<u8>::new();

        report_candidates(&selection, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "0 found: []\n");
    }

    #[test]
    fn test_no_report_without_keywords() {
        let selection = Selection {
            filtered: None,
            picked: vec!["RJ01".to_string()],
        };
        let mut out = Vec::<u8>::new();

        report_candidates(&selection, &mut out).unwrap();

        assert!(out.is_empty());
    }
}
