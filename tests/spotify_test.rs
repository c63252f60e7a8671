use playlist_bingo::{
    spotify::{get_json, playlists},
    types::{PlaylistSummary, UserPlaylistsResponse},
};
use reqwest::{Client, StatusCode};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

const PLAYLIST_ID: &str = "37i9dQZF1DXcBWIGoYBM5M";

// Helper function to build a JSON response
fn json(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json")
}

fn test_playlist() -> PlaylistSummary {
    PlaylistSummary {
        id: PLAYLIST_ID.to_string(),
        name: "Café Classics".to_string(),
    }
}

fn item(name: &str, artist: &str, is_local: bool) -> String {
    format!(
        r#"{{
            "added_at": "2024-05-01T12:00:00Z",
            "track": {{
                "is_local": {is_local},
                "name": "{name}",
                "duration_ms": 200000,
                "artists": [{{"name": "{artist}"}}],
                "album": {{"name": "Album of {name}"}},
                "external_urls": {{"spotify": "https://open.spotify.com/track/{name}"}},
                "external_ids": {{"isrc": " GBAAA0000001 "}}
            }}
        }}"#
    )
}

fn page(items: &[String], next: Option<&str>) -> String {
    let next = match next {
        Some(url) => format!("\"{}\"", url),
        None => "null".to_string(),
    };
    format!(r#"{{"items": [{}], "next": {}}}"#, items.join(","), next)
}

async fn mount_items_page(server: &MockServer, offset: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/playlists/{}/tracks", PLAYLIST_ID)))
        .and(query_param("offset", offset))
        .respond_with(json(&body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_json_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/playlists"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(json(r#"{"items": [], "next": null, "total": 0}"#))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/me/playlists", server.uri());
    let page: UserPlaylistsResponse = get_json(&Client::new(), "secret", &url, &[]).await.unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total, Some(0));
}

#[tokio::test]
async fn test_get_json_waits_for_retry_after_then_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/playlists"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me/playlists"))
        .respond_with(json(
            r#"{"items": [{"id": "abc", "name": "Road Trip"}], "next": null}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/me/playlists", server.uri());
    let page: UserPlaylistsResponse = get_json(&Client::new(), "t", &url, &[]).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Road Trip");
}

#[tokio::test]
async fn test_get_json_gives_up_on_excessive_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/playlists"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "3600"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/me/playlists", server.uri());
    let result: Result<UserPlaylistsResponse, _> = get_json(&Client::new(), "t", &url, &[]).await;

    assert_eq!(
        result.unwrap_err().status(),
        Some(StatusCode::TOO_MANY_REQUESTS)
    );
}

#[tokio::test]
async fn test_get_json_retries_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/playlists"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me/playlists"))
        .respond_with(json(r#"{"items": [], "next": null}"#))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/me/playlists", server.uri());
    let result: Result<UserPlaylistsResponse, _> = get_json(&Client::new(), "t", &url, &[]).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_get_json_propagates_other_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/playlists"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/me/playlists", server.uri());
    let result: Result<UserPlaylistsResponse, _> = get_json(&Client::new(), "t", &url, &[]).await;

    assert_eq!(result.unwrap_err().status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_get_playlist_tracks_follows_next_and_skips_items() {
    let server = MockServer::start().await;
    let next = format!("{}/playlists/{}/tracks?offset=100", server.uri(), PLAYLIST_ID);

    mount_items_page(
        &server,
        "0",
        page(
            &[
                item("One", "Beyoncé", false),
                r#"{"added_at": null, "track": null}"#.to_string(),
                item("Local Demo", "Me", true),
                item("Two", "Daft Punk", false),
            ],
            Some(&next),
        ),
    )
    .await;
    mount_items_page(&server, "100", page(&[item("Three", "Air", false)], None)).await;

    let rows = playlists::get_playlist_tracks(
        &Client::new(),
        "t",
        &server.uri(),
        &test_playlist(),
        None,
        false,
    )
    .await
    .unwrap();

    let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Two", "Three"]);

    // Positions count emitted rows only
    let positions: Vec<u32> = rows.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);

    let first = &rows[0];
    assert_eq!(first.artists, "Beyonce");
    assert_eq!(first.album, "Album of One");
    assert_eq!(first.isrc, "GBAAA0000001");
    assert_eq!(first.duration_ms, 200_000);
    assert_eq!(first.playlist_name, "Cafe Classics");
    assert_eq!(first.playlist_id, PLAYLIST_ID);
}

#[tokio::test]
async fn test_get_playlist_tracks_includes_local_when_asked() {
    let server = MockServer::start().await;
    mount_items_page(
        &server,
        "0",
        page(
            &[item("Local Demo", "Me", true), item("One", "Air", false)],
            None,
        ),
    )
    .await;

    let rows = playlists::get_playlist_tracks(
        &Client::new(),
        "t",
        &server.uri(),
        &test_playlist(),
        Some("GB"),
        true,
    )
    .await
    .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "Local Demo");
    assert_eq!(rows[1].position, 2);
}

#[tokio::test]
async fn test_get_playlist_items_passes_market() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/playlists/{}/tracks", PLAYLIST_ID)))
        .and(query_param("market", "GB"))
        .and(query_param("limit", "100"))
        .respond_with(json(&page(&[], None)))
        .expect(1)
        .mount(&server)
        .await;

    let page = playlists::get_playlist_items(
        &Client::new(),
        "t",
        &server.uri(),
        PLAYLIST_ID,
        Some("GB"),
        0,
    )
    .await
    .unwrap();

    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_find_playlist_by_name_pages_and_picks_best() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/playlists"))
        .and(query_param("offset", "0"))
        .respond_with(json(
            r#"{"items": [
                {"id": "a", "name": "Workout"},
                {"id": "b", "name": "Friday Night Mix"}
            ], "next": "more"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me/playlists"))
        .and(query_param("offset", "50"))
        .respond_with(json(
            r#"{"items": [{"id": "c", "name": "friday night"}], "next": null}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let found = playlists::find_playlist_by_name(&Client::new(), "t", &server.uri(), "Friday Night")
        .await
        .unwrap();

    assert_eq!(found.map(|p| p.id), Some("c".to_string()));
}

#[tokio::test]
async fn test_find_playlist_by_name_rejects_far_longer_names() {
    let server = MockServer::start().await;
    let long_name = format!("Party {}", "x".repeat(90));
    Mock::given(method("GET"))
        .and(path("/me/playlists"))
        .respond_with(json(&format!(
            r#"{{"items": [{{"id": "a", "name": "{}"}}], "next": null}}"#,
            long_name
        )))
        .mount(&server)
        .await;

    let found = playlists::find_playlist_by_name(&Client::new(), "t", &server.uri(), "party")
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_get_playlist_reads_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/playlists/{}", PLAYLIST_ID)))
        .and(query_param("fields", "name,id"))
        .respond_with(json(&format!(
            r#"{{"id": "{}", "name": "Road Trip"}}"#,
            PLAYLIST_ID
        )))
        .expect(1)
        .mount(&server)
        .await;

    let playlist = playlists::get_playlist(&Client::new(), "t", &server.uri(), PLAYLIST_ID)
        .await
        .unwrap();

    assert_eq!(playlist.name, "Road Trip");
}
