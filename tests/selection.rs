//! Entry Selection Integration Tests
//!
//! Keyword filtering and random sampling over a parsed catalog.

use std::collections::HashSet;

use dlplay::library::select::{filter_codes, select, SelectionRequest};
use dlplay::Catalog;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn catalog() -> Catalog {
    Catalog::from_json(
        r#"{
            "library_dir": "/library",
            "RJ01001": {"Path": "a", "タイトル": "雨の夜", "サークル": "月光", "tags": ["ASMR"]},
            "RJ01002": {"Path": "b", "タイトル": "晴れの朝", "サークル": "月光"},
            "RJ01003": {"Path": "c", "タイトル": "雨音", "サークル": "陽だまり", "tags": ["ASMR", "環境音"]},
            "RJ02004": {"Path": "d", "タイトル": "静寂", "サークル": "陽だまり"},
            "BJ00005": {"Path": "e", "タイトル": "Rain Drops", "size": 300}
        }"#,
    )
    .unwrap()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_three_entries_five_requested() {
    let catalog = Catalog::from_json(
        r#"{"library_dir": "/l", "A": {"Path": "a"}, "B": {"Path": "b"}, "C": {"Path": "c"}}"#,
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    let selection = select(&catalog, &SelectionRequest::default(), &mut rng);

    let picked: HashSet<_> = selection.picked.iter().map(String::as_str).collect();
    assert_eq!(picked, HashSet::from(["A", "B", "C"]));
}

#[test]
fn test_conjunctive_filter_is_subset() {
    let catalog = catalog();
    let pairs = [("雨", "ASMR"), ("月光", "RJ01"), ("RJ", "陽だまり")];

    for (a, b) in pairs {
        let single = filter_codes(&catalog, &strings(&[a]));
        let both = filter_codes(&catalog, &strings(&[a, b]));
        assert!(both.iter().all(|c| single.contains(c)), "{} {}", a, b);
    }

    assert_eq!(
        filter_codes(&catalog, &strings(&["雨", "ASMR"])),
        strings(&["RJ01001", "RJ01003"])
    );
}

#[test]
fn test_numbers_match_by_rendering() {
    let catalog = catalog();
    assert_eq!(filter_codes(&catalog, &strings(&["300"])), strings(&["BJ00005"]));
}

#[test]
fn test_selection_size_and_membership() {
    let catalog = catalog();
    let mut rng = StdRng::seed_from_u64(11);

    for count in 1..=12 {
        let request = SelectionRequest {
            keywords: strings(&["RJ"]),
            count,
        };
        let selection = select(&catalog, &request, &mut rng);
        let filtered = selection.filtered.unwrap();

        assert_eq!(filtered.len(), 4);
        assert_eq!(selection.picked.len(), count.min(4));
        let unique: HashSet<_> = selection.picked.iter().collect();
        assert_eq!(unique.len(), selection.picked.len());
        assert!(selection.picked.iter().all(|c| filtered.contains(c)));
    }
}

#[test]
fn test_unmatched_keyword_selects_nothing() {
    let catalog = catalog();
    let mut rng = StdRng::seed_from_u64(5);
    let request = SelectionRequest {
        keywords: strings(&["雪"]),
        count: 5,
    };

    let selection = select(&catalog, &request, &mut rng);

    assert!(selection.picked.is_empty());
    assert_eq!(selection.filtered, Some(Vec::new()));
}
