use crate::demo::{
    run_demo, run_leaderboard, run_persona, run_rank, DemoArgs, LeaderboardArgs, PersonaArgs,
    RankArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use concerto::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Concerto",
    about = "Serve and inspect Concerto's ranks, archetypes and unlock gates",
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
    /// Evaluate the rank for a set of profile counters
    Rank(RankArgs),
    /// Classify behavioural analytics into coordinates and an archetype
    Persona(PersonaArgs),
    /// Print a leaderboard from a CSV export of profile counters
    Leaderboard(LeaderboardArgs),
    /// Walk a sample profile through XP awards, rank changes and its archetype
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
        Command::Rank(args) => run_rank(args),
        Command::Persona(args) => run_persona(args),
        Command::Leaderboard(args) => run_leaderboard(args),
        Command::Demo(args) => run_demo(args),
    }
}
