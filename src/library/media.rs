//! Media and cover-art discovery inside an entry's directory.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::natural::natural_path_cmp;

/// Extensions handed to the player, without the dot
pub const DEFAULT_MEDIA_EXTENSIONS: &[&str] = &["mp3", "mp4", "webm", "flac"];

/// Extensions considered cover art, without the dot
pub const DEFAULT_COVER_EXTENSIONS: &[&str] = &["jpg", "webp", "png"];

/// Matches on the file-name suffix so a file named just `.mp3` counts too
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
        return false;
    };
    let name = name.to_ascii_lowercase();

    extensions
        .iter()
        .any(|e| name.ends_with(&format!(".{}", e.trim_start_matches('.').to_ascii_lowercase())))
}

/// All files under `dir` (recursively) with one of the given extensions
pub fn find_files(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, extensions))
        .collect()
}

/// Media files under `dir`, in natural order
pub fn find_media_files(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut files = find_files(dir, extensions);
    files.sort_by(|a, b| natural_path_cmp(a, b));
    debug!(dir = %dir.display(), count = files.len(), "Found media files");
    files
}

/// The largest image under `dir`, if any.
///
/// On equal sizes the file found last wins.
pub fn find_cover(dir: &Path, extensions: &[String]) -> Option<PathBuf> {
    find_files(dir, extensions)
        .into_iter()
        .filter_map(|path| {
            let size = std::fs::metadata(&path).ok()?.len();
            Some((size, path))
        })
        .max_by_key(|(size, _)| *size)
        .map(|(_, path)| path)
}

/// Owned copy of a static extension list
pub fn extension_list(exts: &[&str]) -> Vec<String> {
    exts.iter().map(|e| e.to_string()).collect()
}
