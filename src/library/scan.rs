use std::fs;
use std::path::{Path, PathBuf};

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::PlaylistError;

use super::display::display_from_fields;
use super::model::{Playlist, TrackInfo};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Read tags for `path`, falling back to the file stem when there are none.
fn read_info(path: &Path, settings: &LibrarySettings) -> TrackInfo {
    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist: Option<String> = None;
    let mut album: Option<String> = None;
    let mut duration = None;

    if let Ok(tagged) = lofty::read_from_path(path) {
        duration = Some(tagged.properties().duration());

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.title().filter(|v| !v.trim().is_empty()) {
                title = v.trim().to_string();
            }
            artist = tag
                .artist()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
            album = tag
                .album()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }
    }

    let display = display_from_fields(
        path,
        &title,
        artist.as_deref(),
        album.as_deref(),
        &settings.display_fields,
        &settings.display_separator,
    );

    TrackInfo {
        path: path.to_path_buf(),
        title,
        artist,
        album,
        duration,
        display,
    }
}

fn scan_dir(dir: &Path, settings: &LibrarySettings, playlist: &mut Playlist) {
    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the directory's own entries.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                let path = source.path().unwrap_or(dir).to_path_buf();
                playlist
                    .warnings
                    .push(PlaylistError::Unreadable { path, source });
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if is_audio_file(path, settings) {
            playlist.entries.push(read_info(path, settings));
        } else {
            playlist
                .warnings
                .push(PlaylistError::UnsupportedFileType(path.to_path_buf()));
        }
    }
}

/// Build the startup playlist from file and directory arguments, in argument order.
///
/// Directory contents are sorted by file name. Nothing here aborts the build:
/// unsupported, missing or unreadable items become warnings.
pub fn build_playlist(paths: &[PathBuf], settings: &LibrarySettings) -> Playlist {
    let mut playlist = Playlist::default();

    for path in paths {
        let root = match fs::canonicalize(path) {
            Ok(root) => root,
            Err(source) => {
                playlist.warnings.push(PlaylistError::NotFound {
                    path: path.clone(),
                    source,
                });
                continue;
            }
        };

        if root.is_dir() {
            scan_dir(&root, settings, &mut playlist);
        } else if is_audio_file(&root, settings) {
            playlist.entries.push(read_info(&root, settings));
        } else {
            playlist
                .warnings
                .push(PlaylistError::UnsupportedFileType(root));
        }
    }

    playlist
}
