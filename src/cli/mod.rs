//! Command-line front end: parses flags into a [`StatsQuery`], runs the
//! matching service call and renders the result as pretty JSON.

use std::{env, path::PathBuf};

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::{
    config::{Config, ConfigManager},
    core::services::{ServiceError, StatisticsService, StatsQuery},
    domain::CategoryKind,
    errors::StatsError,
    utils::{build_info, persistence},
};

pub const USAGE: &str = "\
Usage: ledger_stats_cli <command> [options]

Commands:
  tree        Category statistics tree with a trailing total item
  series      Monthly series per category (needs --from and --until)
  categories  Plain category tree without amounts
  version     Build information
  help        This message

Options:
  --snapshot <file>      Ledger snapshot JSON (categories and transactions)
  --kind <kind>          EXPENSE, INCOME or TRANSFER; RETURN_* map onto the base kind
  --from <YYYY-MM-DD>    Inclusive lower date bound
  --until <YYYY-MM-DD>   Inclusive upper date bound
  --show-hidden          Include inactive categories
  --exclude-returns      Leave return transactions out of typed queries
  --categories <ids>     Comma separated category ids for series";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] StatsError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<ServiceError> for CliError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Stats(inner) => CliError::Core(inner),
            ServiceError::Invalid(message) => CliError::Input(message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Tree,
    Series,
    Categories,
    Version,
    Help,
}

impl Command {
    fn parse(raw: &str) -> Result<Self, CliError> {
        match raw {
            "tree" => Ok(Command::Tree),
            "series" => Ok(Command::Series),
            "categories" => Ok(Command::Categories),
            "version" | "--version" => Ok(Command::Version),
            "help" | "--help" | "-h" => Ok(Command::Help),
            other => Err(CliError::Command(format!("unknown command `{}`", other))),
        }
    }

    fn needs_snapshot(self) -> bool {
        matches!(self, Command::Tree | Command::Series | Command::Categories)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub command: Command,
    pub snapshot: Option<PathBuf>,
    pub query: StatsQuery,
}

/// Parses everything after the program name. Flags left unset fall back to `defaults`.
pub fn parse_args<I>(args: I, defaults: &Config) -> Result<CliArgs, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let command = match args.next() {
        Some(raw) => Command::parse(&raw)?,
        None => Command::Help,
    };

    let mut snapshot = None;
    let mut query = StatsQuery {
        show_hidden: defaults.show_hidden,
        exclude_returns: defaults.exclude_returns,
        ..StatsQuery::default()
    };

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--snapshot" => snapshot = Some(PathBuf::from(value_for(&flag, args.next())?)),
            "--kind" => query.kind = Some(value_for(&flag, args.next())?.parse::<CategoryKind>()?),
            "--from" => query.from = Some(value_for(&flag, args.next())?),
            "--until" => query.until = Some(value_for(&flag, args.next())?),
            "--show-hidden" => query.show_hidden = true,
            "--exclude-returns" => query.exclude_returns = true,
            "--categories" => {
                query.category_ids = Some(parse_ids(&value_for(&flag, args.next())?)?)
            }
            other => return Err(CliError::Input(format!("unknown option `{}`", other))),
        }
    }

    if command.needs_snapshot() && snapshot.is_none() {
        return Err(CliError::Input("--snapshot <file> is required".into()));
    }

    Ok(CliArgs {
        command,
        snapshot,
        query,
    })
}

fn value_for(flag: &str, value: Option<String>) -> Result<String, CliError> {
    value.ok_or_else(|| CliError::Input(format!("{} expects a value", flag)))
}

fn parse_ids(raw: &str) -> Result<Vec<Uuid>, CliError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            Uuid::parse_str(part)
                .map_err(|err| CliError::Input(format!("category id `{}`: {}", part, err)))
        })
        .collect()
}

/// Runs one invocation and returns what should be printed on stdout.
pub fn run<I>(args: I, config: &Config) -> Result<String, CliError>
where
    I: IntoIterator<Item = String>,
{
    let parsed = parse_args(args, config)?;
    debug!(command = ?parsed.command, "running command");

    let snapshot = match (&parsed.snapshot, parsed.command.needs_snapshot()) {
        (Some(path), true) => Some(persistence::load_snapshot_from_file(path)?),
        _ => None,
    };

    match (parsed.command, snapshot) {
        (Command::Help, _) => Ok(USAGE.to_string()),
        (Command::Version, _) => Ok(build_info::current().summary()),
        (Command::Tree, Some(snapshot)) => render(&StatisticsService::category_stats(
            &snapshot,
            &parsed.query,
            config,
        )?),
        (Command::Series, Some(snapshot)) => {
            render(&StatisticsService::monthly_series(&snapshot, &parsed.query)?)
        }
        (Command::Categories, Some(snapshot)) => {
            render(&StatisticsService::category_tree(&snapshot, &parsed.query))
        }
        (command, None) => Err(CliError::Command(format!(
            "{:?} ran without a snapshot",
            command
        ))),
    }
}

fn render<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|err| CliError::Core(err.into()))
}

/// Entry point used by the binary: loads configuration and prints the output.
pub fn run_cli() -> Result<(), CliError> {
    let config = ConfigManager::new()?.load()?;
    let output = run(env::args().skip(1), &config)?;
    println!("{}", output);
    Ok(())
}
