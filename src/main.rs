use std::path::PathBuf;

use clap::{
    ArgGroup, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playlist_bingo::{
    bingo::{CardOptions, planner::DEFAULT_SHORT_POOL_THRESHOLD},
    cli::{self, PlaylistSource},
    config, warning,
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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Export a Spotify playlist you can access to CSV
    Export(ExportOptions),

    /// Generate 4x4 music bingo cards (PDF) from a CSV of songs
    Cards(CardsOptions),

    /// List the unique songs of a CSV
    Tracks(TracksOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(group(ArgGroup::new("source").required(true).args(["playlist", "name"])))]
pub struct ExportOptions {
    /// Playlist URL, URI or ID to export
    #[clap(long)]
    pub playlist: Option<String>,

    /// Playlist name to pick (best match among your playlists)
    #[clap(long)]
    pub name: Option<String>,

    /// Output CSV path
    #[clap(long, default_value = "playlist_tracks.csv")]
    pub out: PathBuf,

    /// Market code (e.g. GB, US) for track metadata
    #[clap(long)]
    pub market: Option<String>,

    /// Include local and unavailable tracks
    #[clap(long)]
    pub include_local: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CardsOptions {
    /// Input CSV with 'title' and 'artists' columns
    #[clap(long)]
    pub csv: PathBuf,

    /// Number of bingo cards to generate
    #[clap(long = "n", short = 'n', value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// Output PDF path
    #[clap(long, default_value = "bingo_cards.pdf")]
    pub out: PathBuf,

    /// Random seed for reproducible cards
    #[clap(long)]
    pub seed: Option<u64>,

    /// Do not reuse the same song across different cards
    #[clap(long)]
    pub no_repeat_across: bool,

    /// If the unique pool is smaller than this, allow repeats across cards
    #[clap(long, default_value_t = DEFAULT_SHORT_POOL_THRESHOLD)]
    pub allow_short: usize,

    /// Title printed on each card
    #[clap(long)]
    pub title: Option<String>,

    /// Subtitle printed on each card
    #[clap(long)]
    pub subtitle: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct TracksOptions {
    /// CSV with 'title' and 'artists' columns
    #[clap(long)]
    pub csv: PathBuf,

    /// Only show songs whose title or artist contains this text
    #[clap(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Export(opt) => {
            let source = match (opt.playlist, opt.name) {
                (Some(reference), _) => PlaylistSource::Reference(reference),
                (None, Some(name)) => PlaylistSource::Name(name),
                (None, None) => unreachable!("clap requires --playlist or --name"),
            };
            cli::export(source, &opt.out, opt.market, opt.include_local).await
        }
        Command::Cards(opt) => {
            let options = CardOptions {
                card_count: opt.count as usize,
                enforce_no_repeat: opt.no_repeat_across,
                short_pool_threshold: opt.allow_short,
                seed: opt.seed,
                title: opt.title,
                subtitle: opt.subtitle,
            };
            cli::cards(&opt.csv, &opt.out, options).await
        }
        Command::Tracks(opt) => cli::tracks(&opt.csv, opt.search).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
