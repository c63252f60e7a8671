//! Configuration for playlist-bingo.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory and then from the working directory.
//! Variables already present in the environment always win.

use std::{env, path::PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Loads `.env` files into the process environment.
///
/// Looks for `playlist-bingo/.env` in the platform data directory
/// (`~/.local/share` on Linux, `~/Library/Application Support` on macOS,
/// `%LOCALAPPDATA%` on Windows), creating the directory if needed, and then for
/// a `.env` in the current directory. Missing files are not an error.
///
/// # Errors
///
/// Fails if the data directory cannot be created or an existing `.env` file
/// cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Location of the user-level `.env` file.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playlist-bingo/.env");
    path
}

/// Base URL of the Spotify Web API, `SPOTIFY_API_URL` or the public endpoint.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Bearer token used for every API request.
///
/// The token must carry the `playlist-read-private` and
/// `playlist-read-collaborative` scopes.
pub fn spotify_access_token() -> Result<String, String> {
    match env::var("SPOTIFY_ACCESS_TOKEN") {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(format!(
            "SPOTIFY_ACCESS_TOKEN must be set (environment or {})",
            env_path().display()
        )),
    }
}

/// Market used when `--market` is not given, from `SPOTIFY_MARKET`.
pub fn default_market() -> Option<String> {
    env::var("SPOTIFY_MARKET")
        .ok()
        .map(|m| m.trim().to_uppercase())
        .filter(|m| !m.is_empty())
}
