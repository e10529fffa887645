use crate::{
    cli::{TokenSource, auth::require_token, render, spinner},
    config::Settings,
    error, spotify,
};

pub async fn recent(settings: &Settings, source: &TokenSource) {
    let token = require_token(settings, source).await;

    let pb = spinner("Fetching recently played tracks...");
    let result = spotify::tracks::get_recently_played(settings, &token).await;
    pb.finish_and_clear();

    match result {
        Ok(res) => render::print_recent_tracks(&res.items),
        Err(e) => error!("Failed to fetch recently played tracks: {}", e),
    }
}
