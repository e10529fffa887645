use crate::{
    cli::{TokenSource, auth::require_token, render, spinner},
    config::Settings,
    error, report,
    types::FeaturePipeline,
    utils::AudioProperties,
};

pub async fn features(
    settings: &Settings,
    source: &TokenSource,
    pipeline: &FeaturePipeline,
    properties: &AudioProperties,
) {
    let token = require_token(settings, source).await;

    let pb = spinner(&format!("Averaging audio features for {}...", pipeline.prefix));
    let result = report::run_pipeline(settings, &token, pipeline, properties).await;
    pb.finish_and_clear();

    match result {
        Ok(summary) => render::print_features(&summary),
        Err(e) => error!("Failed to average audio features: {}", e),
    }
}
