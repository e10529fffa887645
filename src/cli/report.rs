use crate::{
    cli::{TokenSource, acquire_token, render},
    config::Settings,
    info, report, success,
    utils::AudioProperties,
    warning,
};

pub async fn report(
    settings: &Settings,
    source: &TokenSource,
    properties: &AudioProperties,
    genre_limit: usize,
) {
    let token = acquire_token(settings, source).await;
    let pipelines = report::default_pipelines();

    info!("Collecting report...");
    let report = report::collect_report(
        settings,
        token.as_deref(),
        &pipelines,
        properties,
        genre_limit,
    )
    .await;

    match &report.profile {
        Some(profile) => render::print_profile(profile),
        None => warning!("Profile unavailable."),
    }
    match &report.recent_tracks {
        Some(items) => render::print_recent_tracks(items),
        None => warning!("Recently played tracks unavailable."),
    }
    match &report.top_genres {
        Some(genres) => render::print_genres(genres),
        None => warning!("Top genres unavailable."),
    }
    for summary in &report.features {
        render::print_features(summary);
    }

    if report.features.len() == pipelines.len() {
        success!("Report complete.");
    }
}
