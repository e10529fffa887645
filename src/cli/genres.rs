use crate::{
    cli::{TokenSource, auth::require_token, render, spinner},
    config::Settings,
    error, spotify,
    types::TimeRange,
    utils,
};

pub async fn genres(settings: &Settings, source: &TokenSource, term: TimeRange, limit: usize) {
    let token = require_token(settings, source).await;

    let pb = spinner("Fetching top artists...");
    let result = spotify::artists::get_top_artists(
        settings,
        &token,
        term,
        spotify::artists::TOP_ITEMS_LIMIT,
    )
    .await;
    pb.finish_and_clear();

    match result {
        Ok(artists) => render::print_genres(&utils::distinct_genres(&artists, limit)),
        Err(e) => error!("Failed to fetch top artists: {}", e),
    }
}
