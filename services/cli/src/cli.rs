use crate::join::{run_join, JoinArgs};
use crate::score::{run_score, ScoreArgs};
use clap::{Parser, Subcommand};
use fit_score::error::AppError;
use fit_score::workflows::screening::ScoringConfig;

#[derive(Parser, Debug)]
#[command(
    name = "fit-score",
    about = "Score applicant survey exports and recover contact lists from scored tables",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a raw applicant export into a pseudonymous table
    Score(ScoreArgs),
    /// Rejoin a scored table to the raw applicant list by recomputed PID
    Join(JoinArgs),
    /// List the built-in scoring presets
    Presets,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Score(args) => run_score(args),
        Command::Join(args) => run_join(args),
        Command::Presets => {
            print_presets();
            Ok(())
        }
    }
}

fn print_presets() {
    for key in ScoringConfig::preset_keys() {
        let Some(config) = ScoringConfig::preset(key) else {
            continue;
        };
        println!("{key}: {}", config.name);
        if !config.description.is_empty() {
            println!("  {}", config.description);
        }
        println!(
            "  admit >= {}  priority >= {}  equity {} [{}, {}]{}",
            config.thresholds.admit,
            config.thresholds.priority,
            config.equity.sector,
            config.equity.lower,
            config.equity.upper,
            if config.equity.enabled { "" } else { " (disabled)" }
        );
        println!("  maximum fit score: {}", config.max_total());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn score_defaults_output_path() {
        let cli = Cli::try_parse_from(["fit-score", "score", "--input", "apps.csv"])
            .expect("arguments parse");
        match cli.command {
            Command::Score(args) => {
                assert_eq!(args.output, std::path::PathBuf::from("rfs_scored.csv"));
                assert!(args.keep.is_none());
                assert!(!args.no_equity);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn keep_flag_rejects_unknown_policy() {
        let result = Cli::try_parse_from([
            "fit-score",
            "score",
            "--input",
            "apps.csv",
            "--keep",
            "newest",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn join_defaults_match_contact_list_layout() {
        let cli = Cli::try_parse_from([
            "fit-score",
            "join",
            "--applications",
            "apps.csv",
            "--scored",
            "rfs_scored.csv",
        ])
        .expect("arguments parse");
        match cli.command {
            Command::Join(args) => {
                assert_eq!(args.output, std::path::PathBuf::from("contact_list.csv"));
                assert_eq!(args.email_column, "Email");
                assert_eq!(args.date_column, "ApplicationDate");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
