use crate::{
    cli::{TokenSource, auth::require_token, render, spinner},
    config::Settings,
    error, report, spotify,
};

pub async fn profile(settings: &Settings, source: &TokenSource) {
    let token = require_token(settings, source).await;

    let pb = spinner("Fetching profile...");
    let result = spotify::profile::get_profile(settings, &token).await;
    pb.finish_and_clear();

    match result {
        Ok(profile) => render::print_profile(&report::summarize_profile(&profile)),
        Err(e) => error!("Failed to fetch profile: {}", e),
    }
}
