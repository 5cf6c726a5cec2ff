//! Picking which entries to play.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::catalog::{Catalog, Entry};

/// Smallest allowed request
pub const MIN_COUNT: usize = 1;

/// Largest allowed request
pub const MAX_COUNT: usize = 12;

/// Default number of entries to pick
pub const DEFAULT_COUNT: usize = 5;

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    /// Keywords, all of which must match (possibly via different fields)
    pub keywords: Vec<String>,

    /// How many entries to pick
    pub count: usize,
}

impl Default for SelectionRequest {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            count: DEFAULT_COUNT,
        }
    }
}

/// Result of a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Filtered candidates, when keywords were given
    pub filtered: Option<Vec<String>>,

    /// Picked entry codes, distinct
    pub picked: Vec<String>,
}

/// Codes matching every keyword, in catalog order, without repeats.
///
/// Each keyword narrows the previous result.
pub fn filter_codes(catalog: &Catalog, keywords: &[String]) -> Vec<String> {
    let mut remaining: Vec<Entry<'_>> = catalog.entries().collect();

    for keyword in keywords {
        remaining.retain(|entry| entry.matches(keyword));
    }

    let mut seen = HashSet::new();
    remaining
        .into_iter()
        .map(|entry| entry.code())
        .filter(|code| seen.insert(*code))
        .map(str::to_string)
        .collect()
}

/// Uniform sample of `min(count, candidates.len())` distinct codes
pub fn sample<R: Rng + ?Sized>(candidates: &[String], count: usize, rng: &mut R) -> Vec<String> {
    let size = count.min(candidates.len());
    candidates
        .choose_multiple(rng, size)
        .cloned()
        .collect()
}

/// Run a selection request against the catalog
pub fn select<R: Rng + ?Sized>(
    catalog: &Catalog,
    request: &SelectionRequest,
    rng: &mut R,
) -> Selection {
    if request.keywords.is_empty() {
        let all: Vec<String> = catalog.codes().into_iter().map(str::to_string).collect();
        Selection {
            filtered: None,
            picked: sample(&all, request.count, rng),
        }
    } else {
        let filtered = filter_codes(catalog, &request.keywords);
        let picked = sample(&filtered, request.count, rng);
        Selection {
            filtered: Some(filtered),
            picked,
        }
    }
}
