//! Human-readable rendering of catalog entries.

use std::fmt::Write as _;
use std::path::Path;

use url::Url;

use crate::config::LibrarySettings;
use crate::library::catalog::{render_value, Catalog, Entry};
use crate::library::media::find_cover;

/// `file://` URI for a path, made absolute against the working directory
pub fn file_uri(path: &Path) -> Option<String> {
    let absolute = std::path::absolute(path).ok()?;
    Url::from_file_path(absolute).ok().map(String::from)
}

/// Banner, visible attributes, directory URI and cover URI for one entry
pub fn render_entry(catalog: &Catalog, entry: &Entry<'_>, settings: &LibrarySettings) -> String {
    let mut out = String::new();
    let dir = catalog.entry_dir(entry);

    // Writing to a String cannot fail
    let _ = writeln!(out);
    let _ = writeln!(out, "========");
    let _ = writeln!(out, "{}", entry.code());
    let _ = writeln!(out, "========");

    for (name, value) in entry.attributes() {
        if settings.hidden_attributes.iter().any(|h| h == name) {
            continue;
        }
        let _ = writeln!(out, "  {}:  \t{}", name, render_value(value));
    }

    if let Some(uri) = file_uri(&dir) {
        let _ = writeln!(out, "{}", uri);
    }
    if let Some(uri) = find_cover(&dir, &settings.cover_extensions).and_then(|c| file_uri(&c)) {
        let _ = writeln!(out, "{}", uri);
    }

    let _ = writeln!(out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_file_uri_percent_encodes() {
        let uri = file_uri(Path::new("/lib/作品 1")).unwrap();
        assert!(uri.starts_with("file:///lib/"));
        assert!(uri.ends_with("%201"));
        assert!(!uri.contains(' '));
    }

    #[test]
    fn test_render_hides_fixed_attributes() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("work")).unwrap();
        std::fs::write(temp.path().join("work/cover.png"), vec![0u8; 64]).unwrap();

        let catalog = Catalog::from_value(json!({
            "library_dir": temp.path().to_string_lossy(),
            "RJ123": {
                "Path": "work",
                "title": "Night Walk",
                "img": "data:image/png;base64,AAAA",
                "ファイル容量": "120MB",
                "ファイル形式": "MP3",
                "tags": ["a", "b"]
            }
        }))
        .unwrap();
        let entry = catalog.get("RJ123").unwrap();

        let text = render_entry(&catalog, &entry, &LibrarySettings::default());

        assert!(text.starts_with("\n========\nRJ123\n========\n"));
        assert!(text.contains("  title:  \tNight Walk\n"));
        assert!(text.contains("  tags:  \t[\"a\",\"b\"]\n"));
        assert!(!text.contains("base64"));
        assert!(!text.contains("120MB"));
        assert!(!text.contains("MP3"));
        assert!(!text.contains("Path:"));
        assert!(text.contains("/work\n"));
        assert!(text.contains("/work/cover.png\n"));
    }

    #[test]
    fn test_render_without_cover() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("bare")).unwrap();

        let catalog = Catalog::from_value(json!({
            "library_dir": temp.path().to_string_lossy(),
            "RJ1": {"Path": "bare"}
        }))
        .unwrap();
        let entry = catalog.get("RJ1").unwrap();

        let text = render_entry(&catalog, &entry, &LibrarySettings::default());

        assert_eq!(text.matches("file://").count(), 1);
    }
}
