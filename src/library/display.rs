use std::path::Path;
use std::time::Duration;

use crate::config::TrackDisplayField;

/// Build a label for a track from the configured `fields` and separator.
///
/// Falls back to `title` (the file stem when tags are missing) when no field
/// produced anything.
pub fn display_from_fields(
    path: &Path,
    title: &str,
    artist: Option<&str>,
    album: Option<&str>,
    fields: &[TrackDisplayField],
    sep: &str,
) -> String {
    let non_empty = |s: Option<&str>| s.map(str::trim).filter(|s| !s.is_empty()).map(String::from);

    let parts: Vec<String> = fields
        .iter()
        .filter_map(|f| match f {
            TrackDisplayField::Title => non_empty(Some(title)),
            TrackDisplayField::Artist => non_empty(artist),
            TrackDisplayField::Album => non_empty(album),
            TrackDisplayField::Filename => non_empty(path.file_stem().and_then(|s| s.to_str())),
            TrackDisplayField::Path => Some(path.display().to_string()),
        })
        .collect();

    if parts.is_empty() {
        title.to_string()
    } else {
        parts.join(sep)
    }
}

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
