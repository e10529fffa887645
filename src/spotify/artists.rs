use reqwest::Client;

use crate::{
    config::Settings,
    error::ApiError,
    spotify::get_json,
    types::{Artist, TimeRange, TopArtistsResponse},
};

/// Largest page the top-items endpoints hand out.
pub const TOP_ITEMS_LIMIT: u32 = 50;

/// Retrieves the user's top artists for a time range.
///
/// Calls `GET {api}/me/top/artists?time_range=<term>&limit=<limit>`. The
/// limit is clamped to the 1-50 range the endpoint accepts. Artists are
/// returned in affinity order, which is the order their genres are ranked
/// in by [`crate::utils::distinct_genres`].
///
/// # Example
///
/// ```
/// let artists = get_top_artists(&settings, token, TimeRange::Long, 50).await?;
/// let genres = utils::distinct_genres(&artists, 15);
/// ```
pub async fn get_top_artists(
    settings: &Settings,
    token: &str,
    time_range: TimeRange,
    limit: u32,
) -> Result<Vec<Artist>, ApiError> {
    let api_url = format!(
        "{uri}/me/top/artists?time_range={time_range}&limit={limit}",
        uri = settings.api_url,
        time_range = time_range,
        limit = limit.clamp(1, TOP_ITEMS_LIMIT)
    );

    let client = Client::new();
    let res: TopArtistsResponse =
        get_json(client.get(&api_url).bearer_auth(token), "/me/top/artists").await?;

    Ok(res.items)
}
