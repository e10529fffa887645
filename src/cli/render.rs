use tabled::Table;

use crate::{
    info,
    types::{FeatureSummary, PlayHistory, ProfileSummary},
    utils, warning,
};

pub fn print_profile(profile: &ProfileSummary) {
    info!(
        "Logged in as {}",
        profile.first_name.as_deref().unwrap_or("(no display name)")
    );
    if let Some(email) = &profile.email {
        info!("E-mail: {}", email);
    }
    if let Some(country) = &profile.country {
        info!("Country: {}", country);
    }
    if let Some(url) = &profile.avatar_url {
        info!("Avatar: {}", url);
    }
}

pub fn print_recent_tracks(items: &[PlayHistory]) {
    if items.is_empty() {
        warning!("No recently played tracks.");
        return;
    }
    let table = Table::new(utils::recent_track_rows(items));
    println!("{}", table);
}

pub fn print_genres(genres: &[String]) {
    if genres.is_empty() {
        warning!("No genres found for your top artists.");
        return;
    }
    let table = Table::new(utils::genre_rows(genres));
    println!("{}", table);
}

pub fn print_features(summary: &FeatureSummary) {
    info!(
        "Audio features for {} ({} tracks)",
        summary.prefix, summary.track_count
    );
    if summary.track_count == 0 {
        warning!("No audio features available, averages are absent.");
    }
    let table = Table::new(utils::feature_cell_rows(summary));
    println!("{}", table);
}
