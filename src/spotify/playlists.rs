use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use super::get_json;
use crate::{
    types::{PlaylistItemsResponse, PlaylistSummary, TrackRow, UserPlaylistsResponse},
    utils,
};

const PLAYLISTS_PAGE_LIMIT: u32 = 50;
const ITEMS_PAGE_LIMIT: u32 = 100;
const ITEM_FIELDS: &str = "items(added_at,track(is_local,name,duration_ms,external_urls.spotify,external_ids.isrc,artists(name),album(name))),next";

/// Fetches the name and ID of a playlist.
///
/// `base_url` is the API root, usually [`crate::config::spotify_apiurl`].
pub async fn get_playlist(
    client: &Client,
    token: &str,
    base_url: &str,
    playlist_id: &str,
) -> Result<PlaylistSummary, reqwest::Error> {
    let api_url = format!("{uri}/playlists/{id}", uri = base_url, id = playlist_id);
    get_json(client, token, &api_url, &[("fields", "name,id".to_string())]).await
}

/// Retrieves one page of the current user's playlists.
pub async fn get_user_playlists(
    client: &Client,
    token: &str,
    base_url: &str,
    limit: u32,
    offset: u32,
) -> Result<UserPlaylistsResponse, reqwest::Error> {
    let api_url = format!("{uri}/me/playlists", uri = base_url);
    get_json(
        client,
        token,
        &api_url,
        &[("limit", limit.to_string()), ("offset", offset.to_string())],
    )
    .await
}

/// Walks all of the user's playlists and returns the best name match.
///
/// Ties keep the playlist seen first. Only scores of zero or more are
/// accepted, so a name that merely contains the term but is far longer than
/// it never wins. Returns `None` when nothing qualifies.
pub async fn find_playlist_by_name(
    client: &Client,
    token: &str,
    base_url: &str,
    target: &str,
) -> Result<Option<PlaylistSummary>, reqwest::Error> {
    let mut best: Option<PlaylistSummary> = None;
    let mut best_score = -1;
    let mut offset = 0;

    loop {
        let page =
            get_user_playlists(client, token, base_url, PLAYLISTS_PAGE_LIMIT, offset).await?;
        for playlist in page.items {
            let score = utils::playlist_match_score(&playlist.name, target);
            if score > best_score {
                best_score = score;
                best = Some(playlist);
            }
        }

        if page.next.is_none() {
            break;
        }
        offset += PLAYLISTS_PAGE_LIMIT;
    }

    Ok(best)
}

/// Retrieves one page of playlist items.
pub async fn get_playlist_items(
    client: &Client,
    token: &str,
    base_url: &str,
    playlist_id: &str,
    market: Option<&str>,
    offset: u32,
) -> Result<PlaylistItemsResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = base_url,
        id = playlist_id
    );

    let mut query = vec![
        ("limit", ITEMS_PAGE_LIMIT.to_string()),
        ("offset", offset.to_string()),
        ("additional_types", "track".to_string()),
        ("fields", ITEM_FIELDS.to_string()),
    ];
    if let Some(market) = market {
        query.push(("market", market.to_string()));
    }

    get_json(client, token, &api_url, &query).await
}

/// Pages through a playlist and converts every track into a table row.
///
/// Items without a track are skipped, as are local files unless
/// `include_local` is set. Positions count emitted rows starting at 1.
pub async fn get_playlist_tracks(
    client: &Client,
    token: &str,
    base_url: &str,
    playlist: &PlaylistSummary,
    market: Option<&str>,
    include_local: bool,
) -> Result<Vec<TrackRow>, reqwest::Error> {
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching tracks of {}...", playlist.name));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let mut rows: Vec<TrackRow> = Vec::new();
    let mut offset = 0;

    loop {
        let page = match get_playlist_items(client, token, base_url, &playlist.id, market, offset)
            .await
        {
            Ok(page) => page,
            Err(err) => {
                pb.finish_and_clear();
                return Err(err);
            }
        };

        for item in page.items {
            let Some(track) = item.track else {
                continue;
            };
            if track.is_local && !include_local {
                continue;
            }

            rows.push(TrackRow {
                position: rows.len() as u32 + 1,
                title: utils::normalize(&track.name),
                artists: utils::artists_str(&track.artists),
                album: track
                    .album
                    .and_then(|a| a.name)
                    .map(|n| utils::normalize(&n))
                    .unwrap_or_default(),
                added_at: item.added_at.unwrap_or_default(),
                duration_ms: track.duration_ms,
                isrc: track
                    .external_ids
                    .and_then(|ids| ids.isrc)
                    .map(|isrc| isrc.trim().to_string())
                    .unwrap_or_default(),
                spotify_url: track
                    .external_urls
                    .and_then(|urls| urls.spotify)
                    .unwrap_or_default(),
                playlist_name: utils::normalize(&playlist.name),
                playlist_id: playlist.id.clone(),
            });
        }
        pb.set_message(format!("Fetched {} tracks...", rows.len()));

        if page.next.is_none() {
            break;
        }
        offset += ITEMS_PAGE_LIMIT;
    }

    pb.finish_and_clear();
    Ok(rows)
}
