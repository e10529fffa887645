use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sprofcli::{
    cli::{self, TokenSource},
    config, error,
    types::{FeaturePipeline, TimeRange, TrackSource},
    utils::{self, AudioProperties},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Access token to use instead of authorizing
    #[clap(long, global = true, env = "SPOTIFY_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Authorization code to exchange instead of opening the browser
    #[clap(long, global = true)]
    code: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API and print the access token
    Auth,

    /// Show your profile
    Profile,

    /// Show your recently played tracks
    Recent,

    /// Show your top genres
    Genres(GenresOptions),

    /// Average the audio features of a set of tracks
    Features(FeaturesOptions),

    /// Profile, recent tracks, top genres and audio features in one go
    Report(ReportOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct GenresOptions {
    /// Time range of the top artists the genres are taken from
    #[clap(long, value_enum, default_value = "long")]
    pub term: TimeRange,

    /// Maximum number of genres to show
    #[clap(long, default_value_t = utils::DEFAULT_GENRE_LIMIT)]
    pub limit: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SourceKind {
    Recent,
    TopShort,
    TopMedium,
    TopLong,
}

#[derive(Parser, Debug, Clone)]
pub struct FeaturesOptions {
    /// Where the tracks come from
    #[clap(long, value_enum, default_value = "recent", conflicts_with = "genre")]
    pub source: SourceKind,

    /// Use tracks of this genre instead
    #[clap(long)]
    pub genre: Option<String>,

    /// Prefix of the output cell names
    #[clap(long)]
    pub prefix: Option<String>,

    /// Properties to average, comma separated, or `all`
    #[clap(long, default_value = "all", value_parser = utils::parse_audio_properties)]
    pub properties: AudioProperties,
}

#[derive(Parser, Debug, Clone)]
pub struct ReportOptions {
    /// Properties to average, comma separated, or `all`
    #[clap(long, default_value = "all", value_parser = utils::parse_audio_properties)]
    pub properties: AudioProperties,

    /// Maximum number of genres to show
    #[clap(long, default_value_t = utils::DEFAULT_GENRE_LIMIT)]
    pub genre_limit: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn pipeline_for(opt: &FeaturesOptions) -> FeaturePipeline {
    let source = match (&opt.genre, opt.source) {
        (Some(genre), _) => TrackSource::GenreSearch(genre.clone()),
        (None, SourceKind::Recent) => TrackSource::RecentlyPlayed,
        (None, SourceKind::TopShort) => TrackSource::TopTracks(TimeRange::Short),
        (None, SourceKind::TopMedium) => TrackSource::TopTracks(TimeRange::Medium),
        (None, SourceKind::TopLong) => TrackSource::TopTracks(TimeRange::Long),
    };

    match &opt.prefix {
        Some(prefix) => FeaturePipeline::with_prefix(source, prefix.clone()),
        None => FeaturePipeline::new(source),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let settings = match config::Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };
    let source = TokenSource::from_args(cli.token, cli.code);

    match cli.command {
        Command::Auth => cli::auth(&settings, &source).await,
        Command::Profile => cli::profile(&settings, &source).await,
        Command::Recent => cli::recent(&settings, &source).await,
        Command::Genres(opt) => cli::genres(&settings, &source, opt.term, opt.limit).await,
        Command::Features(opt) => {
            let pipeline = pipeline_for(&opt);
            cli::features(&settings, &source, &pipeline, &opt.properties).await
        }
        Command::Report(opt) => {
            cli::report(&settings, &source, &opt.properties, opt.genre_limit).await
        }
        Command::Completions(_) => {}
    }
}
