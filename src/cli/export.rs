use std::path::Path;

use reqwest::Client;

use crate::{
    config, error, info, management::TrackTableManager, spotify, success, types::PlaylistSummary,
    utils,
};

/// How the playlist to export is identified.
#[derive(Debug, Clone)]
pub enum PlaylistSource {
    /// URL, URI or raw ID.
    Reference(String),
    /// Best match among the user's playlists.
    Name(String),
}

pub async fn export(source: PlaylistSource, out: &Path, market: Option<String>, include_local: bool) {
    let token = match config::spotify_access_token() {
        Ok(token) => token,
        Err(e) => error!("{}", e),
    };
    let market = market
        .map(|m| m.trim().to_uppercase())
        .filter(|m| !m.is_empty())
        .or_else(config::default_market);

    let client = Client::new();
    let base_url = config::spotify_apiurl();
    let playlist = match resolve_playlist(&client, &token, &base_url, &source).await {
        Ok(Some(playlist)) => playlist,
        Ok(None) => match source {
            PlaylistSource::Name(name) => {
                error!("Could not find a playlist matching name: {:?}", name)
            }
            PlaylistSource::Reference(reference) => {
                error!("Could not find playlist: {}", reference)
            }
        },
        Err(e) => error!("Failed to look up playlist. Err: {}", e),
    };

    info!("Exporting playlist {} ({})", playlist.name, playlist.id);

    let mut rows = match spotify::playlists::get_playlist_tracks(
        &client,
        &token,
        &base_url,
        &playlist,
        market.as_deref(),
        include_local,
    )
    .await
    {
        Ok(rows) => rows,
        Err(e) => error!("Failed to fetch playlist tracks. Err: {}", e),
    };

    utils::remove_duplicate_rows(&mut rows);

    let table = TrackTableManager::new(rows);
    if let Err(e) = table.persist(out).await {
        error!("Failed to write {}. Err: {}", out.display(), e);
    }

    success!("Wrote {} tracks to {}", table.count(), out.display());
}

async fn resolve_playlist(
    client: &Client,
    token: &str,
    base_url: &str,
    source: &PlaylistSource,
) -> Result<Option<PlaylistSummary>, reqwest::Error> {
    match source {
        PlaylistSource::Reference(reference) => {
            let playlist_id = utils::extract_playlist_id(reference);
            spotify::playlists::get_playlist(client, token, base_url, &playlist_id)
                .await
                .map(Some)
        }
        PlaylistSource::Name(name) => {
            spotify::playlists::find_playlist_by_name(client, token, base_url, name).await
        }
    }
}
