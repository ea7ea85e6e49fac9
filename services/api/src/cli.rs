use crate::report::{run_questions, run_recommend, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use ib_advisor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "IB Math Advisor",
    about = "Recommend an IB Mathematics course and level from questionnaire answers",
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
    /// Score a set of answers and print the recommendation
    Recommend(RecommendArgs),
    /// List the questionnaire with its categories and option labels
    Questions,
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
        Command::Recommend(args) => run_recommend(args),
        Command::Questions => {
            run_questions();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["ib-advisor-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn recommend_collects_repeated_answers() {
        let cli = Cli::try_parse_from([
            "ib-advisor-api",
            "recommend",
            "--answer",
            "question1=A",
            "--answer",
            "question2=C",
            "--format",
            "json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Recommend(args)) => {
                assert_eq!(args.answers.len(), 2);
                assert_eq!(args.answers[1], ("question2".to_string(), "C".to_string()));
            }
            other => panic!("expected recommend, got {other:?}"),
        }
    }

    #[test]
    fn malformed_answer_flag_is_rejected() {
        let parsed = Cli::try_parse_from(["ib-advisor-api", "recommend", "--answer", "question1"]);
        assert!(parsed.is_err());
    }
}
