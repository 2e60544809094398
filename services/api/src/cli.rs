use crate::commands::{run_moderate, run_settings, ModerateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use listing_moderation::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Listing Moderation Service",
    about = "Score marketplace listings and serve automated moderation decisions",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single moderation request from a JSON file or stdin
    Moderate(ModerateArgs),
    /// Print the effective moderation settings
    Settings,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Moderate(args) => run_moderate(args),
        Command::Settings => run_settings(),
    }
}
