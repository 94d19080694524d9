//
//  homebox-cli
//  util/mod.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Small shared helpers: filename sanitization, collision-free download
//! paths, the default download directory, and byte-size formatting.

use directories::UserDirs;
use std::path::{Path, PathBuf};

/// Longest filename we will produce, leaving headroom below common
/// filesystem limits for the ` (n)` suffix [`unique_path`] may add.
const MAX_FILENAME_LEN: usize = 250;

/// Characters that are unsafe in filenames on at least one supported
/// platform.
const UNSAFE_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Makes a string safe to use as a filename on any supported platform.
///
/// Unsafe punctuation and control characters become `_`, trailing dots and
/// spaces are trimmed (Windows rejects them), and overlong names are cut to
/// [`MAX_FILENAME_LEN`] bytes while keeping the extension intact. An input
/// that sanitizes to nothing becomes `"unnamed"`.
pub fn sanitize_filename(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| {
            if UNSAFE_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    while out.ends_with('.') || out.ends_with(' ') {
        out.pop();
    }

    if out.len() > MAX_FILENAME_LEN {
        out = truncate_preserving_extension(&out, MAX_FILENAME_LEN);
    }

    if out.is_empty() {
        out = "unnamed".to_string();
    }
    out
}

/// Cuts `name` down to at most `max` bytes, keeping the extension.
fn truncate_preserving_extension(name: &str, max: usize) -> String {
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.len() < 16 => {
            (stem, format!(".{ext}"))
        }
        _ => (name, String::new()),
    };

    let budget = max.saturating_sub(ext.len());
    let mut cut = budget.min(stem.len());
    // back off to a char boundary
    while cut > 0 && !stem.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}{}", &stem[..cut], ext)
}

/// Returns a path that does not exist yet, appending ` (1)`, ` (2)`, ...
/// before the extension until a free name is found.
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    for n in 1.. {
        let candidate = dir.join(format!("{stem} ({n}){ext}"));
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!()
}

/// The directory downloads land in when the caller does not pick one:
/// the platform Downloads directory, or the current directory as a last
/// resort.
pub fn default_download_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Formats a byte count for humans, e.g. `2.4 MB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("a/b:c*.txt"), "a_b_c_.txt");
        assert_eq!(sanitize_filename("report<draft>?.pdf"), "report_draft__.pdf");
    }

    #[test]
    fn sanitize_trims_trailing_dots_and_spaces() {
        assert_eq!(sanitize_filename("notes. . "), "notes");
        assert_eq!(sanitize_filename("..."), "unnamed");
    }

    #[test]
    fn sanitize_keeps_ordinary_names_untouched() {
        assert_eq!(sanitize_filename("vacuum manual.pdf"), "vacuum manual.pdf");
    }

    #[test]
    fn sanitize_caps_length_but_keeps_extension() {
        let long = format!("{}.pdf", "x".repeat(300));
        let out = sanitize_filename(&long);
        assert!(out.len() <= 250);
        assert!(out.ends_with(".pdf"));
    }

    #[test]
    fn unique_path_appends_counter() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("photo.png");

        assert_eq!(unique_path(&base), base);

        std::fs::write(&base, b"x").unwrap();
        let second = unique_path(&base);
        assert_eq!(second, dir.path().join("photo (1).png"));

        std::fs::write(&second, b"x").unwrap();
        assert_eq!(unique_path(&base), dir.path().join("photo (2).png"));
    }

    #[test]
    fn format_size_picks_sensible_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
