use crate::demo::{run_demo, run_search, DemoArgs, SearchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use property_scout::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Property Scout",
    about = "Search, score and rank property listings from the command line or over HTTP",
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
    /// Run a single search and print the ranked table
    Search(SearchArgs),
    /// Walk through a canned search and refinement
    Demo(DemoArgs),
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
        Command::Search(args) => run_search(args),
        Command::Demo(args) => run_demo(args),
    }
}
