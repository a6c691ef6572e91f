use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use songferry::{cli, config, error};

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
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search the catalog merged with the personal cloud library
    Search(SearchOptions),

    /// Deliver a track from the last search (by number) or by keyword
    Play(PlayOptions),

    /// Handle the personal cloud library
    Cloud(CloudOptions),

    /// Some helper information about region, credentials and caches
    Info(InfoOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search keyword (title, artist, or both)
    pub keyword: String,

    /// Conversation the result list is cached for
    #[clap(long, default_value = "local")]
    pub chat: String,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayOptions {
    /// List position from the last search, or a fresh keyword
    pub selection: String,

    /// Conversation whose cached list a numeric selection refers to
    #[clap(long, default_value = "local")]
    pub chat: String,

    /// Requester the download directory is scoped to
    #[clap(long, default_value = "local")]
    pub requester: String,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Handle the personal cloud library")]
pub struct CloudOptions {
    #[command(subcommand)]
    pub command: CloudSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CloudSubcommand {
    /// List the cached library snapshot
    List,

    /// Rebuild the library snapshot from the remote service
    Refresh,

    /// Drop the cached snapshot (next access re-fetches it)
    Clear,

    /// Upload an audio file named 'artist - title.ext'
    Upload(CloudUploadOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct CloudUploadOpts {
    /// File to upload
    pub path: PathBuf,

    /// Catalog song id to link the upload to (found by search otherwise)
    #[clap(long)]
    pub match_id: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
pub struct InfoOptions {
    #[clap(long)]
    region: bool,
    #[clap(long)]
    credentials: bool,
    #[clap(long)]
    library: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Search(opt) => cli::search(&opt.chat, &opt.keyword).await,
        Command::Play(opt) => cli::play(&opt.chat, &opt.selection, &opt.requester).await,
        Command::Cloud(opt) => match opt.command {
            CloudSubcommand::List => cli::cloud_list().await,
            CloudSubcommand::Refresh => cli::cloud_refresh().await,
            CloudSubcommand::Clear => cli::cloud_clear().await,
            CloudSubcommand::Upload(u) => cli::cloud_upload(u.path, u.match_id).await,
        },
        Command::Info(opt) => cli::info(opt.region, opt.credentials, opt.library).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
