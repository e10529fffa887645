use reqwest::Client;

use crate::{
    config::Settings,
    error::ApiError,
    spotify::get_json,
    types::{AudioFeaturesResponse, FeatureRecord},
    utils::{self, AUDIO_FEATURES_PAGE_LIMIT, AudioProperties, Averages},
};

/// Retrieves the audio features for a list of tracks.
///
/// # Batch Processing
///
/// - The ids are split into consecutive chunks of at most 100, the per-request
///   cap of `GET /audio-features`
/// - Each chunk is requested with its ids joined by commas, strictly one after
///   another and in input order
/// - The records of every chunk are concatenated in that same order
///
/// Entries Spotify returns as `null` (tracks without analysis) are left out,
/// so the result may be shorter than `ids`. An empty `ids` issues no request
/// and yields an empty list.
///
/// # Errors
///
/// The first chunk answered with a non-success status aborts the whole
/// operation with [`ApiError::Status`]. Records of chunks fetched before are
/// discarded; there is no partial result and no retry.
///
/// # Example
///
/// ```
/// let ids = vec!["4uLU6hMCjMI75M1A2tKUQC".to_string()];
/// let records = get_audio_features(&settings, token, &ids).await?;
/// ```
pub async fn get_audio_features(
    settings: &Settings,
    token: &str,
    ids: &[String],
) -> Result<Vec<FeatureRecord>, ApiError> {
    let client = Client::new();
    let mut records: Vec<FeatureRecord> = Vec::with_capacity(ids.len());

    for chunk in utils::chunk_track_ids(ids, AUDIO_FEATURES_PAGE_LIMIT) {
        let api_url = format!("{uri}/audio-features", uri = settings.api_url);
        let request = client
            .get(&api_url)
            .query(&[("ids", chunk.join(","))])
            .bearer_auth(token);

        let res: AudioFeaturesResponse = get_json(request, "/audio-features").await?;
        records.extend(res.audio_features.into_iter().flatten());
    }

    Ok(records)
}

/// Fetches the audio features of `ids` and averages the requested properties.
///
/// Returns the number of records that were averaged alongside the averages.
pub async fn get_average_features(
    settings: &Settings,
    token: &str,
    ids: &[String],
    properties: &AudioProperties,
) -> Result<(usize, Averages), ApiError> {
    let records = get_audio_features(settings, token, ids).await?;
    Ok((records.len(), utils::average_features(&records, properties)))
}
