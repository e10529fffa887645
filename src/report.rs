//! The fetch → aggregate pipeline and the full profile report.
//!
//! Every feature section of the report is the same pipeline run with a
//! different [`FeaturePipeline`] record: where the track ids come from, and
//! which prefix names the output cells. [`collect_report`] runs the profile,
//! recent tracks, top genres and all feature pipelines one after another with
//! a single token.

use crate::{
    config::Settings,
    error::ApiError,
    spotify,
    types::{FeaturePipeline, FeatureSummary, Profile, ProfileSummary, Report, TimeRange, TrackSource},
    utils::{self, AudioProperties},
    warning,
};

impl FeaturePipeline {
    pub fn new(source: TrackSource) -> Self {
        let prefix = default_prefix(&source);
        Self { source, prefix }
    }

    pub fn with_prefix(source: TrackSource, prefix: impl Into<String>) -> Self {
        Self {
            source,
            prefix: prefix.into(),
        }
    }
}

/// Cell prefix used when a pipeline doesn't name its own.
pub fn default_prefix(source: &TrackSource) -> String {
    match source {
        TrackSource::RecentlyPlayed => "recent".to_string(),
        TrackSource::TopTracks(TimeRange::Short) => "topShort".to_string(),
        TrackSource::TopTracks(TimeRange::Medium) => "topMedium".to_string(),
        TrackSource::TopTracks(TimeRange::Long) => "topLong".to_string(),
        TrackSource::GenreSearch(genre) => {
            let words: String = genre
                .split(|c: char| !c.is_alphanumeric())
                .map(utils::capitalize)
                .collect();
            format!("genre{}", words)
        }
    }
}

/// Recently played, short term top tracks and long term top tracks.
pub fn default_pipelines() -> Vec<FeaturePipeline> {
    vec![
        FeaturePipeline::new(TrackSource::RecentlyPlayed),
        FeaturePipeline::new(TrackSource::TopTracks(TimeRange::Short)),
        FeaturePipeline::new(TrackSource::TopTracks(TimeRange::Long)),
    ]
}

/// Runs one pipeline: collect the track ids of its source, fetch their audio
/// features in batches and average the requested properties.
pub async fn run_pipeline(
    settings: &Settings,
    token: &str,
    pipeline: &FeaturePipeline,
    properties: &AudioProperties,
) -> Result<FeatureSummary, ApiError> {
    let ids = spotify::tracks::get_track_ids(settings, token, &pipeline.source).await?;
    let (track_count, averages) =
        spotify::features::get_average_features(settings, token, &ids, properties).await?;

    Ok(FeatureSummary {
        prefix: pipeline.prefix.clone(),
        track_count,
        averages,
    })
}

pub fn summarize_profile(profile: &Profile) -> ProfileSummary {
    ProfileSummary {
        first_name: utils::first_name(profile.display_name.as_deref()),
        email: profile.email.clone(),
        country: profile.country.clone(),
        avatar_url: utils::avatar_url(&profile.images),
    }
}

/// Collects every report section with one token.
///
/// Without a token nothing is requested and every section stays empty. A
/// section that fails is reported as a warning and left empty; the remaining
/// sections are still collected. Feature summaries keep the order of
/// `pipelines`, minus the ones that failed.
pub async fn collect_report(
    settings: &Settings,
    token: Option<&str>,
    pipelines: &[FeaturePipeline],
    properties: &AudioProperties,
    genre_limit: usize,
) -> Report {
    let Some(token) = token else {
        warning!("No access token available, skipping all requests.");
        return Report::default();
    };

    let mut report = Report::default();

    report.profile = match spotify::profile::get_profile(settings, token).await {
        Ok(profile) => Some(summarize_profile(&profile)),
        Err(e) => {
            warning!("Failed to fetch profile: {}", e);
            None
        }
    };

    report.recent_tracks = match spotify::tracks::get_recently_played(settings, token).await {
        Ok(res) => Some(res.items),
        Err(e) => {
            warning!("Failed to fetch recently played tracks: {}", e);
            None
        }
    };

    report.top_genres = match spotify::artists::get_top_artists(
        settings,
        token,
        TimeRange::Long,
        spotify::artists::TOP_ITEMS_LIMIT,
    )
    .await
    {
        Ok(artists) => Some(utils::distinct_genres(&artists, genre_limit)),
        Err(e) => {
            warning!("Failed to fetch top genres: {}", e);
            None
        }
    };

    for pipeline in pipelines {
        match run_pipeline(settings, token, pipeline, properties).await {
            Ok(summary) => report.features.push(summary),
            Err(e) => warning!("Failed to average features for {}: {}", pipeline.prefix, e),
        }
    }

    report
}
