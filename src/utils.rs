use std::{collections::HashSet, sync::LazyLock};

use deunicode::deunicode;
use regex::Regex;

use crate::types::{TrackArtist, TrackRow};

static PLAYLIST_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:open\.spotify\.com/playlist/|spotify:playlist:)([A-Za-z0-9]{22})")
        .expect("valid playlist reference pattern")
});

static PLAYLIST_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{22}$").expect("valid playlist id pattern"));

/// Extracts a playlist ID from a share URL, a `spotify:playlist:` URI or a raw ID.
///
/// Input that matches none of these is returned trimmed so the API can reject it.
pub fn extract_playlist_id(reference: &str) -> String {
    let reference = reference.trim();
    if let Some(caps) = PLAYLIST_REF.captures(reference) {
        return caps[1].to_string();
    }
    if PLAYLIST_ID.is_match(reference) {
        return reference.to_string();
    }
    reference.to_string()
}

/// Scores how well a playlist name matches a search term. Higher is better.
///
/// Both sides are normalized and case-folded first. An exact match scores 100,
/// a name containing the term scores 80 minus the length difference (which may
/// go negative), anything else scores the number of shared words.
pub fn playlist_match_score(name: &str, target: &str) -> i64 {
    let name_lc = normalize(name).to_lowercase();
    let target_lc = normalize(target).to_lowercase();

    if name_lc == target_lc {
        return 100;
    }
    if name_lc.contains(&target_lc) {
        let diff = name_lc.chars().count() as i64 - target_lc.chars().count() as i64;
        return 80 - diff.abs();
    }

    let target_words: HashSet<&str> = target_lc.split_whitespace().collect();
    let name_words: HashSet<&str> = name_lc.split_whitespace().collect();
    target_words.intersection(&name_words).count() as i64
}

/// Transliterates to ASCII and trims, so `"Beyoncé "` becomes `"Beyonce"`.
pub fn normalize(value: &str) -> String {
    deunicode(value).trim().to_string()
}

/// Joins artist names with `", "`, skipping unnamed entries.
pub fn artists_str(artists: &[TrackArtist]) -> String {
    artists
        .iter()
        .filter_map(|a| a.name.as_deref())
        .map(normalize)
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Drops exact duplicates by title, artists, album and URL, keeping the first.
pub fn remove_duplicate_rows(rows: &mut Vec<TrackRow>) {
    let mut seen = HashSet::new();
    rows.retain(|row| {
        seen.insert((
            row.title.clone(),
            row.artists.clone(),
            row.album.clone(),
            row.spotify_url.clone(),
        ))
    });
}
