use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fmt,
};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{
    Artist, FeatureCellRow, FeatureRecord, FeatureSummary, GenreRow, Image, PlayHistory,
    RecentTrackRow, Track,
};

/// Maximum number of ids the audio-features endpoint accepts per request.
pub const AUDIO_FEATURES_PAGE_LIMIT: usize = 100;

pub const DEFAULT_GENRE_LIMIT: usize = 15;

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_state() -> String {
    random_alphanumeric(16)
}

/// Splits ids into consecutive groups of at most `size`, keeping their order.
pub fn chunk_track_ids(ids: &[String], size: usize) -> Vec<&[String]> {
    ids.chunks(size.max(1)).collect()
}

pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AudioProperty {
    Acousticness,
    Danceability,
    Energy,
    Instrumentalness,
    Liveness,
    Loudness,
    Speechiness,
    Tempo,
    Valence,
}

impl AudioProperty {
    pub const ALL: [AudioProperty; 9] = [
        AudioProperty::Acousticness,
        AudioProperty::Danceability,
        AudioProperty::Energy,
        AudioProperty::Instrumentalness,
        AudioProperty::Liveness,
        AudioProperty::Loudness,
        AudioProperty::Speechiness,
        AudioProperty::Tempo,
        AudioProperty::Valence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioProperty::Acousticness => "acousticness",
            AudioProperty::Danceability => "danceability",
            AudioProperty::Energy => "energy",
            AudioProperty::Instrumentalness => "instrumentalness",
            AudioProperty::Liveness => "liveness",
            AudioProperty::Loudness => "loudness",
            AudioProperty::Speechiness => "speechiness",
            AudioProperty::Tempo => "tempo",
            AudioProperty::Valence => "valence",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for AudioProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FeatureRecord {
    pub fn value(&self, property: AudioProperty) -> Option<f64> {
        match property {
            AudioProperty::Acousticness => self.acousticness,
            AudioProperty::Danceability => self.danceability,
            AudioProperty::Energy => self.energy,
            AudioProperty::Instrumentalness => self.instrumentalness,
            AudioProperty::Liveness => self.liveness,
            AudioProperty::Loudness => self.loudness,
            AudioProperty::Speechiness => self.speechiness,
            AudioProperty::Tempo => self.tempo,
            AudioProperty::Valence => self.valence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioProperties(pub BTreeSet<AudioProperty>);

impl AudioProperties {
    pub fn iter(&self) -> impl Iterator<Item = AudioProperty> + '_ {
        self.0.iter().copied()
    }
}

impl Default for AudioProperties {
    fn default() -> Self {
        AudioProperties(AudioProperty::ALL.into_iter().collect())
    }
}

impl fmt::Display for AudioProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|p| p.as_str()).collect();
        f.write_str(&names.join(","))
    }
}

/// Parses a comma separated property list such as `tempo,energy` or `all`.
pub fn parse_audio_properties(input: &str) -> Result<AudioProperties, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("property list cannot be empty".to_string());
    }

    let mut set = BTreeSet::new();
    for segment in trimmed.split(',') {
        let name = segment.trim().to_lowercase();
        if name.is_empty() {
            return Err(format!("empty segment in '{}'", input));
        }
        if name == "all" {
            set.extend(AudioProperty::ALL);
            continue;
        }
        match AudioProperty::from_name(&name) {
            Some(p) => {
                set.insert(p);
            }
            None => {
                let valid: Vec<&str> = AudioProperty::ALL.iter().map(|p| p.as_str()).collect();
                return Err(format!(
                    "invalid value '{}' (expected one of: {}, all)",
                    name,
                    valid.join(", ")
                ));
            }
        }
    }

    Ok(AudioProperties(set))
}

/// Per-property mean over a set of feature records.
///
/// Keys are exactly the requested properties. A value is `None` when no
/// record carried that property, which covers the empty input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Averages(BTreeMap<AudioProperty, Option<f64>>);

impl Averages {
    pub fn get(&self, property: AudioProperty) -> Option<f64> {
        self.0.get(&property).copied().flatten()
    }

    pub fn contains(&self, property: AudioProperty) -> bool {
        self.0.contains_key(&property)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AudioProperty, Option<f64>)> + '_ {
        self.0.iter().map(|(p, v)| (*p, *v))
    }
}

pub fn average_features(records: &[FeatureRecord], properties: &AudioProperties) -> Averages {
    let values = properties
        .iter()
        .map(|property| {
            let avg = mean(records.iter().filter_map(|r| r.value(property)));
            (property, avg)
        })
        .collect();

    Averages(values)
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Output cell name for a property, e.g. `recent` + tempo = `recentTempo`.
pub fn cell_id(prefix: &str, property: AudioProperty) -> String {
    format!("{}{}", prefix, capitalize(property.as_str()))
}

pub fn first_name(display_name: Option<&str>) -> Option<String> {
    display_name
        .and_then(|name| name.split_whitespace().next())
        .map(str::to_string)
}

// Spotify lists the larger image first; the second entry is the avatar sized one.
pub fn avatar_url(images: &[Image]) -> Option<String> {
    images
        .get(1)
        .or_else(|| images.first())
        .map(|i| i.url.clone())
}

pub fn distinct_genres(artists: &[Artist], limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    artists
        .iter()
        .flat_map(|a| a.genres.iter())
        .filter(|g| seen.insert(g.as_str()))
        .take(limit)
        .cloned()
        .collect()
}

pub fn artist_names(track: &Track) -> String {
    track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn recent_track_rows(items: &[PlayHistory]) -> Vec<RecentTrackRow> {
    items
        .iter()
        .map(|item| RecentTrackRow {
            played_at: item.played_at.format("%Y-%m-%d %H:%M").to_string(),
            name: item.track.name.clone(),
            artists: artist_names(&item.track),
        })
        .collect()
}

pub fn genre_rows(genres: &[String]) -> Vec<GenreRow> {
    genres
        .iter()
        .enumerate()
        .map(|(i, genre)| GenreRow {
            rank: i + 1,
            genre: genre.clone(),
        })
        .collect()
}

pub fn format_average(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3}", v),
        None => "-".to_string(),
    }
}

pub fn feature_cell_rows(summary: &FeatureSummary) -> Vec<FeatureCellRow> {
    summary
        .averages
        .iter()
        .map(|(property, value)| FeatureCellRow {
            cell: cell_id(&summary.prefix, property),
            property: property.to_string(),
            average: format_average(value),
        })
        .collect()
}
