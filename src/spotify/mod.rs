//! # Spotify Integration Module
//!
//! Read-only access to the Spotify Web API needed by the playlist exporter:
//!
//! - `GET /me/playlists` - the user's playlists, for lookups by name
//! - `GET /playlists/{id}` - playlist name for a given ID
//! - `GET /playlists/{id}/tracks` - paged playlist items
//!
//! Every request goes through [`get_json`], which retries on `502 Bad Gateway`
//! and honours `Retry-After` on `429 Too Many Requests`. Authentication is a
//! bearer token taken from configuration, see [`crate::config::spotify_access_token`].

pub mod playlists;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::warning;

/// Longest `Retry-After` we are willing to sleep through.
const MAX_RETRY_AFTER_SECS: u64 = 120;
const BAD_GATEWAY_DELAY_SECS: u64 = 10;

/// Sends an authorized GET request and decodes the JSON body.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    token: &str,
    api_url: &str,
    query: &[(&str, String)],
) -> Result<T, reqwest::Error> {
    loop {
        let response = client
            .get(api_url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(1);
            if retry_after <= MAX_RETRY_AFTER_SECS {
                sleep(Duration::from_secs(retry_after)).await;
                continue; // retry
            }
            warning!(
                "Retry after has reached an abnormal high of {} seconds. Try again later.",
                retry_after
            );
        }

        let response = match response.error_for_status() {
            Ok(valid_response) => valid_response,
            Err(err) => {
                if err.status() == Some(StatusCode::BAD_GATEWAY) {
                    sleep(Duration::from_secs(BAD_GATEWAY_DELAY_SECS)).await;
                    continue; // retry
                }
                return Err(err); // propagate other errors
            }
        };

        return response.json::<T>().await;
    }
}
