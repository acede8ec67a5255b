//! `oblig`: generate compliance tasks and score task histories from the command line

mod commands;
mod render;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "oblig", version)]
#[command(about = "Recurring compliance obligations: task generation and scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate task instances for a business profile and print them as JSON
    Generate {
        /// Obligation catalog (.yaml, .yml or .json)
        #[arg(long, env = "OBLIG_CATALOG")]
        catalog: PathBuf,

        /// Business profile (JSON)
        #[arg(long)]
        profile: PathBuf,

        /// Tasks already materialized (JSON array); their occurrences are skipped
        #[arg(long)]
        tasks: Option<PathBuf>,

        /// First day of the window (defaults to today)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day of the window (defaults to one year from the start)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Only generate for this template id
        #[arg(long)]
        template: Option<String>,

        /// Override today's date
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Engine configuration (TOML)
        #[arg(long, env = "OBLIG_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print a compliance report for a task history
    Report {
        /// Task history (JSON array)
        #[arg(long)]
        tasks: PathBuf,

        /// Reporting date (defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Engine configuration (TOML)
        #[arg(long, env = "OBLIG_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Check a catalog for duplicate ids, empty titles and unsupported rules
    Validate {
        /// Obligation catalog (.yaml, .yml or .json)
        #[arg(long, env = "OBLIG_CATALOG")]
        catalog: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("oblig=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            catalog,
            profile,
            tasks,
            from,
            to,
            template,
            today,
            config,
        } => {
            let args = commands::GenerateArgs {
                catalog,
                profile,
                tasks,
                from,
                to,
                template,
                today,
                config,
            };
            let response = commands::generate(&args).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Report {
            tasks,
            as_of,
            json,
            config,
        } => {
            let report = commands::report(&tasks, as_of, config.as_deref()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render::report_text(&report));
            }
        }
        Commands::Validate { catalog } => {
            let issues = commands::validate(&catalog)?;
            println!("{}", render::issues_text(&catalog, &issues));
            std::process::exit(if issues.is_empty() { 0 } else { 1 });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_arguments() {
        let cli = Cli::try_parse_from([
            "oblig",
            "generate",
            "--catalog",
            "catalog.yaml",
            "--profile",
            "profile.json",
            "--from",
            "2025-01-01",
            "--to",
            "2025-03-31",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate { from, to, tasks, .. } => {
                assert_eq!(from, NaiveDate::from_ymd_opt(2025, 1, 1));
                assert_eq!(to, NaiveDate::from_ymd_opt(2025, 3, 31));
                assert!(tasks.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        let result = Cli::try_parse_from([
            "oblig", "report", "--tasks", "tasks.json", "--as-of", "2025-13-01",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn report_json_flag() {
        let cli = Cli::try_parse_from(["oblig", "report", "--tasks", "t.json", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Report { json: true, .. }));
    }
}
