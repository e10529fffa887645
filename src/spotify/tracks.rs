use reqwest::Client;

use crate::{
    config::Settings,
    error::ApiError,
    spotify::{artists::TOP_ITEMS_LIMIT, get_json},
    types::{
        RecentlyPlayedResponse, SearchTracksResponse, TimeRange, TopTracksResponse, Track,
        TrackSource,
    },
};

/// Uniform access to the tracks inside differently shaped list responses.
///
/// Recently played entries wrap their track one level deeper than top-track
/// entries, and search results nest the list under `tracks`. Implementors
/// expose their tracks in response order so that ids can be extracted the
/// same way for every source.
pub trait TrackItems {
    fn tracks(&self) -> Vec<&Track>;

    /// Ids of all tracks in order. Tracks without an id (local files) are skipped.
    fn track_ids(&self) -> Vec<String> {
        self.tracks()
            .into_iter()
            .filter_map(|t| t.id.clone())
            .collect()
    }
}

impl TrackItems for RecentlyPlayedResponse {
    fn tracks(&self) -> Vec<&Track> {
        self.items.iter().map(|item| &item.track).collect()
    }
}

impl TrackItems for TopTracksResponse {
    fn tracks(&self) -> Vec<&Track> {
        self.items.iter().collect()
    }
}

impl TrackItems for SearchTracksResponse {
    fn tracks(&self) -> Vec<&Track> {
        self.tracks.items.iter().collect()
    }
}

/// Retrieves the tracks the user played most recently.
///
/// Calls `GET {api}/me/player/recently-played?limit=50`, the largest page the
/// endpoint returns. Entries are ordered from most to least recent.
pub async fn get_recently_played(
    settings: &Settings,
    token: &str,
) -> Result<RecentlyPlayedResponse, ApiError> {
    let api_url = format!(
        "{uri}/me/player/recently-played?limit={limit}",
        uri = settings.api_url,
        limit = TOP_ITEMS_LIMIT
    );

    let client = Client::new();
    get_json(
        client.get(&api_url).bearer_auth(token),
        "/me/player/recently-played",
    )
    .await
}

/// Retrieves the user's top tracks for a time range (50 at most).
pub async fn get_top_tracks(
    settings: &Settings,
    token: &str,
    time_range: TimeRange,
) -> Result<TopTracksResponse, ApiError> {
    let api_url = format!(
        "{uri}/me/top/tracks?time_range={time_range}&limit={limit}",
        uri = settings.api_url,
        time_range = time_range,
        limit = TOP_ITEMS_LIMIT
    );

    let client = Client::new();
    get_json(client.get(&api_url).bearer_auth(token), "/me/top/tracks").await
}

/// Searches tracks tagged with a genre (50 at most).
///
/// The genre is sent as the `genre:"<genre>"` field filter so that genres
/// containing spaces match as a whole.
pub async fn search_genre_tracks(
    settings: &Settings,
    token: &str,
    genre: &str,
) -> Result<SearchTracksResponse, ApiError> {
    let api_url = format!("{uri}/search", uri = settings.api_url);
    let query = format!("genre:\"{}\"", genre);
    let limit = TOP_ITEMS_LIMIT.to_string();

    let client = Client::new();
    let request = client
        .get(&api_url)
        .query(&[("q", query.as_str()), ("type", "track"), ("limit", limit.as_str())])
        .bearer_auth(token);
    get_json(request, "/search").await
}

/// Fetches the listing behind a [`TrackSource`] and flattens it into track ids.
pub async fn get_track_ids(
    settings: &Settings,
    token: &str,
    source: &TrackSource,
) -> Result<Vec<String>, ApiError> {
    let ids = match source {
        TrackSource::RecentlyPlayed => get_recently_played(settings, token).await?.track_ids(),
        TrackSource::TopTracks(range) => get_top_tracks(settings, token, *range).await?.track_ids(),
        TrackSource::GenreSearch(genre) => {
            search_genre_tracks(settings, token, genre).await?.track_ids()
        }
    };
    Ok(ids)
}
