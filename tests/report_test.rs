mod common;

use common::{MockConfig, MockSpotify, VALID_TOKEN};
use reqwest::StatusCode;
use sprofcli::{
    cli::{TokenSource, acquire_token},
    report::{collect_report, default_pipelines, default_prefix},
    spotify::tracks::TrackItems,
    types::{
        RecentlyPlayedResponse, SearchTracksResponse, TimeRange, TopTracksResponse, TrackSource,
    },
    utils::{AudioProperties, AudioProperty, DEFAULT_GENRE_LIMIT},
};

#[tokio::test]
async fn test_full_report() {
    let mock = MockSpotify::spawn().await;

    let report = collect_report(
        &mock.settings(),
        Some(VALID_TOKEN),
        &default_pipelines(),
        &AudioProperties::default(),
        DEFAULT_GENRE_LIMIT,
    )
    .await;

    let profile = report.profile.unwrap();
    assert_eq!(profile.first_name.as_deref(), Some("Ada"));
    assert_eq!(profile.email.as_deref(), Some("ada@example.com"));
    assert_eq!(profile.country.as_deref(), Some("GB"));
    assert_eq!(
        profile.avatar_url.as_deref(),
        Some("https://i.scdn.co/image/small")
    );

    let recent = report.recent_tracks.unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].track.name, "Only Shallow");

    assert_eq!(
        report.top_genres.unwrap(),
        vec!["shoegaze", "dream pop", "indie rock"]
    );

    let prefixes: Vec<&str> = report.features.iter().map(|f| f.prefix.as_str()).collect();
    assert_eq!(prefixes, vec!["recent", "topShort", "topLong"]);
    let counts: Vec<usize> = report.features.iter().map(|f| f.track_count).collect();
    assert_eq!(counts, vec![2, 3, 2]);
    for summary in &report.features {
        assert_eq!(summary.averages.get(AudioProperty::Energy), Some(0.5));
    }
}

#[tokio::test]
async fn test_report_genre_limit() {
    let mock = MockSpotify::spawn().await;

    let report = collect_report(
        &mock.settings(),
        Some(VALID_TOKEN),
        &[],
        &AudioProperties::default(),
        1,
    )
    .await;

    assert_eq!(report.top_genres.unwrap(), vec!["shoegaze"]);
    assert!(report.features.is_empty());
    assert!(mock.feature_requests().is_empty());
}

#[tokio::test]
async fn test_rejected_token_exchange_skips_everything() {
    let mock = MockSpotify::spawn_with(MockConfig {
        token_status: StatusCode::BAD_REQUEST,
        ..Default::default()
    })
    .await;
    let settings = mock.settings();

    let token = acquire_token(&settings, &TokenSource::Code("stale-code".to_string())).await;
    assert!(token.is_none());
    assert_eq!(mock.token_requests().len(), 1);

    let report = collect_report(
        &settings,
        token.as_deref(),
        &default_pipelines(),
        &AudioProperties::default(),
        DEFAULT_GENRE_LIMIT,
    )
    .await;

    assert!(report.profile.is_none());
    assert!(report.recent_tracks.is_none());
    assert!(report.top_genres.is_none());
    assert!(report.features.is_empty());
    assert!(mock.feature_requests().is_empty());
    assert!(mock.search_queries().is_empty());
}

#[tokio::test]
async fn test_invalid_token_fails_each_section_cleanly() {
    let mock = MockSpotify::spawn().await;

    let report = collect_report(
        &mock.settings(),
        Some("revoked"),
        &default_pipelines(),
        &AudioProperties::default(),
        DEFAULT_GENRE_LIMIT,
    )
    .await;

    assert!(report.profile.is_none());
    assert!(report.recent_tracks.is_none());
    assert!(report.top_genres.is_none());
    assert!(report.features.is_empty());
}

#[tokio::test]
async fn test_acquire_token_from_code() {
    let mock = MockSpotify::spawn().await;

    let token = acquire_token(
        &mock.settings(),
        &TokenSource::Code("auth-code".to_string()),
    )
    .await;

    assert_eq!(token.as_deref(), Some(VALID_TOKEN));
    assert_eq!(mock.token_requests()[0]["code"], "auth-code");
}

#[tokio::test]
async fn test_acquire_token_provided_makes_no_request() {
    let mock = MockSpotify::spawn().await;

    let token = acquire_token(&mock.settings(), &TokenSource::Provided("given".to_string())).await;

    assert_eq!(token.as_deref(), Some("given"));
    assert!(mock.token_requests().is_empty());
}

#[test]
fn test_default_prefixes() {
    assert_eq!(default_prefix(&TrackSource::RecentlyPlayed), "recent");
    assert_eq!(
        default_prefix(&TrackSource::TopTracks(TimeRange::Short)),
        "topShort"
    );
    assert_eq!(
        default_prefix(&TrackSource::TopTracks(TimeRange::Medium)),
        "topMedium"
    );
    assert_eq!(
        default_prefix(&TrackSource::TopTracks(TimeRange::Long)),
        "topLong"
    );
    assert_eq!(
        default_prefix(&TrackSource::GenreSearch("indie rock".to_string())),
        "genreIndieRock"
    );
    assert_eq!(
        default_prefix(&TrackSource::GenreSearch("post-rock".to_string())),
        "genrePostRock"
    );
}

#[test]
fn test_default_pipelines() {
    let sources: Vec<TrackSource> = default_pipelines().into_iter().map(|p| p.source).collect();
    assert_eq!(
        sources,
        vec![
            TrackSource::RecentlyPlayed,
            TrackSource::TopTracks(TimeRange::Short),
            TrackSource::TopTracks(TimeRange::Long),
        ]
    );
}

#[test]
fn test_track_ids_from_recently_played_shape() {
    let res: RecentlyPlayedResponse = serde_json::from_str(
        r#"{"items": [
            {"track": {"id": "t1", "name": "One", "artists": []}, "played_at": "2024-05-01T10:00:00Z"},
            {"track": {"id": null, "name": "Local", "artists": []}, "played_at": "2024-05-01T09:00:00Z"},
            {"track": {"id": "t2", "name": "Two", "artists": []}, "played_at": "2024-05-01T08:00:00Z"}
        ]}"#,
    )
    .unwrap();

    assert_eq!(res.track_ids(), vec!["t1", "t2"]);
}

#[test]
fn test_track_ids_from_top_tracks_shape() {
    let res: TopTracksResponse = serde_json::from_str(
        r#"{"items": [
            {"id": "t3", "name": "Three", "artists": [{"id": "a", "name": "A"}]},
            {"id": "t1", "name": "One"}
        ]}"#,
    )
    .unwrap();

    assert_eq!(res.track_ids(), vec!["t3", "t1"]);
}

#[test]
fn test_track_ids_from_search_shape() {
    let res: SearchTracksResponse = serde_json::from_str(
        r#"{"tracks": {"items": [{"id": "g1", "name": "G"}], "total": 1}}"#,
    )
    .unwrap();

    assert_eq!(res.track_ids(), vec!["g1"]);
    assert_eq!(res.tracks().len(), 1);
}
