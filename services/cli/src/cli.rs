use crate::commands::{run_codes, run_handoff, run_project, CodesArgs, HandoffArgs, ProjectArgs};
use clap::{Parser, Subcommand};
use role_evaluation::config::AppConfig;
use role_evaluation::error::AppError;
use role_evaluation::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "role-evaluation",
    about = "Normalize Quebec assessment-roll documents into display-ready properties",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project raw roll documents into normalized properties
    Project(ProjectArgs),
    /// Emit the minimal hand-off subset of each projected property
    Handoff(HandoffArgs),
    /// List a code table or translate a single code
    Codes(CodesArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Project(args) => run_project(args, &config.projection),
        Command::Handoff(args) => run_handoff(args, &config.projection),
        Command::Codes(args) => run_codes(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::HandoffFormat;
    use std::path::PathBuf;

    #[test]
    fn parses_project_command() {
        let cli = Cli::try_parse_from([
            "role-evaluation",
            "project",
            "roll.json",
            "--municipality",
            "Kirkland",
            "--compact",
        ])
        .expect("valid arguments");
        match cli.command {
            Command::Project(args) => {
                assert_eq!(args.input, PathBuf::from("roll.json"));
                assert_eq!(args.municipality.as_deref(), Some("Kirkland"));
                assert!(args.compact);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn handoff_defaults_to_json() {
        let cli =
            Cli::try_parse_from(["role-evaluation", "handoff", "-"]).expect("valid arguments");
        match cli.command {
            Command::Handoff(args) => assert_eq!(args.format, HandoffFormat::Json),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn codes_accepts_optional_code() {
        let cli = Cli::try_parse_from(["role-evaluation", "codes", "street-type", "BO"])
            .expect("valid arguments");
        match cli.command {
            Command::Codes(args) => {
                assert_eq!(args.table, "street-type");
                assert_eq!(args.code.as_deref(), Some("BO"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
