//! Natural ("human") ordering for file names and paths.
//!
//! Runs of ASCII digits compare by numeric value, everything else compares
//! by character, so `track2` sorts before `track10`.

use std::cmp::Ordering;
use std::path::Path;

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits = None;

    for (idx, ch) in s.char_indices() {
        let is_digit = ch.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != is_digit => {
                out.push(make_chunk(&s[start..idx], prev));
                start = idx;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }
    if let Some(prev) = in_digits {
        out.push(make_chunk(&s[start..], prev));
    }
    out
}

fn make_chunk(s: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Digits(s)
    } else {
        Chunk::Text(s)
    }
}

fn compare_digits(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');

    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        // "01" after "1"
        .then_with(|| a.len().cmp(&b.len()))
}

/// Compare two strings in natural order
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_chunks = chunks(a);
    let b_chunks = chunks(b);

    for (x, y) in a_chunks.iter().zip(b_chunks.iter()) {
        let ord = match (x, y) {
            (Chunk::Digits(x), Chunk::Digits(y)) => compare_digits(x, y),
            // Numbers sort before text
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    a_chunks.len().cmp(&b_chunks.len())
}

/// Compare two paths component by component in natural order
pub fn natural_path_cmp(a: &Path, b: &Path) -> Ordering {
    let mut a_iter = a.components();
    let mut b_iter = b.components();

    loop {
        match (a_iter.next(), b_iter.next()) {
            (Some(x), Some(y)) => {
                let ord = natural_cmp(
                    &x.as_os_str().to_string_lossy(),
                    &y.as_os_str().to_string_lossy(),
                );
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_chunking() {
        assert_eq!(
            chunks("track10.flac"),
            vec![Chunk::Text("track"), Chunk::Digits("10"), Chunk::Text(".flac")]
        );
        assert_eq!(
            chunks("track10.mp3"),
            vec![
                Chunk::Text("track"),
                Chunk::Digits("10"),
                Chunk::Text(".mp"),
                Chunk::Digits("3")
            ]
        );
        assert!(chunks("").is_empty());
    }

    #[test]
    fn test_numeric_runs_compare_by_value() {
        let mut names = vec!["track10.mp3", "track2.mp3", "track1.mp3"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, vec!["track1.mp3", "track2.mp3", "track10.mp3"]);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(natural_cmp("01", "1"), Ordering::Greater);
        assert_eq!(natural_cmp("002", "10"), Ordering::Less);
        assert_eq!(natural_cmp("a5", "a5"), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("disc", "disc2"), Ordering::Less);
        assert_eq!(natural_cmp("1", "1a"), Ordering::Less);
    }

    #[test]
    fn test_path_components() {
        let mut paths = vec![
            PathBuf::from("/lib/work/disc10/01.flac"),
            PathBuf::from("/lib/work/disc2/10.flac"),
            PathBuf::from("/lib/work/disc2/9.flac"),
            PathBuf::from("/lib/work/bonus.flac"),
        ];
        paths.sort_by(|a, b| natural_path_cmp(a, b));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/lib/work/bonus.flac"),
                PathBuf::from("/lib/work/disc2/9.flac"),
                PathBuf::from("/lib/work/disc2/10.flac"),
                PathBuf::from("/lib/work/disc10/01.flac"),
            ]
        );
    }
}
