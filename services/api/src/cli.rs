use crate::offline::{run_rank, run_score, RankArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use its_portal::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ITS Portal",
    about = "Run the IT Support Officer application portal or score applications offline",
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
    /// Score a single application submission stored as JSON
    Score(ScoreArgs),
    /// Rank a JSON export of stored applications by region
    Rank(RankArgs),
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
        Command::Score(args) => run_score(args),
        Command::Rank(args) => run_rank(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["its-portal-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_accepts_as_of_date() {
        let cli = Cli::try_parse_from([
            "its-portal-api",
            "score",
            "--input",
            "submission.json",
            "--as-of",
            "2025-01-31",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.input.to_string_lossy(), "submission.json");
                assert!(args.as_of.is_some());
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }
}
