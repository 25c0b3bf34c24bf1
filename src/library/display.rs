use std::path::Path;
use std::time::Duration;

/// Build the "Artist - Title" label for a song file.
///
/// The file stem has underscores turned into spaces and whitespace runs
/// collapsed. The cleaned name is split on its first `-`, or failing that on
/// its first space, and the two halves are rejoined with `joiner`. A name with
/// neither is returned whole.
pub fn format_name(path: &Path, joiner: &str) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let cleaned = stem
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let Some((artist, title)) = cleaned
        .split_once('-')
        .or_else(|| cleaned.split_once(' '))
    else {
        return cleaned;
    };

    match (artist.trim(), title.trim()) {
        ("", "") => cleaned,
        (artist, "") => artist.to_string(),
        ("", title) => title.to_string(),
        (artist, title) => format!("{artist}{joiner}{title}"),
    }
}

/// Format a duration as `M:SS`, rounding partial seconds up.
pub fn format_duration(d: Duration) -> String {
    let mut total_secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        total_secs = total_secs.saturating_add(1);
    }

    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
