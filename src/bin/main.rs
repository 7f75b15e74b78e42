//! Tempora CLI - resolve timeframes and compose filters
//!
//! Usage:
//!   tempora resolve "last week" --reference 2025-07-17
//!   tempora map VID --layer semantic.toml --columns vehicle_id,drive_date
//!   tempora filter --layer semantic.toml --data rows.json --context ctx.json \
//!       --reference 2025-07-17 --date-column drive_date
//!
//! Examples:
//!   tempora resolve "this quarter" --reference 2025-02-10
//!   tempora filter --layer fleet.toml --data trips.json --context intent.json \
//!       --reference 2025-05-20 --date-column drive_date --season-column season --dialect tsql

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use tempora::config::Settings;
use tempora::dataset::{Dataset, DatasetSchema};
use tempora::filter::{Dialect, FilterEngine, QueryContext};
use tempora::semantic::{self, SemanticLayer};
use tempora::temporal::{Resolution, TemporalResolver};

#[derive(Parser)]
#[command(name = "tempora")]
#[command(about = "Tempora - timeframe resolution and semantic filter composition")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a timeframe expression against a reference date
    Resolve {
        /// The free-text timeframe expression
        expression: String,

        /// Reference date (YYYY-MM-DD) the expression resolves against
        #[arg(short, long)]
        reference: NaiveDate,
    },

    /// Map a free-text entity key to a canonical dataset column
    Map {
        /// The free-text key ("VID", "vehicle", ...)
        key: String,

        /// Path to the semantic layer TOML file
        #[arg(short, long)]
        layer: PathBuf,

        /// Available dataset columns
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<String>,
    },

    /// Filter a JSON dataset with an extracted query context
    Filter {
        /// Path to the semantic layer TOML file
        #[arg(short, long)]
        layer: PathBuf,

        /// Path to the dataset (JSON array of objects)
        #[arg(short, long)]
        data: PathBuf,

        /// Path to the query context JSON ({entities, metrics, timeframes})
        #[arg(short, long)]
        context: PathBuf,

        /// Reference date (YYYY-MM-DD) for timeframe resolution
        #[arg(short, long)]
        reference: NaiveDate,

        /// Dataset column holding the record date
        #[arg(long)]
        date_column: String,

        /// Dataset column holding the season label, if any
        #[arg(long)]
        season_column: Option<String>,

        /// Query dialect (defaults to the configured one)
        #[arg(long)]
        dialect: Option<DialectArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    Duckdb,
    Postgres,
    Mysql,
    Tsql,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Duckdb => Dialect::DuckDb,
            DialectArg::Postgres => Dialect::Postgres,
            DialectArg::Mysql => Dialect::MySql,
            DialectArg::Tsql => Dialect::TSql,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Resolve {
            expression,
            reference,
        } => run_resolve(&settings, &expression, reference),
        Commands::Map {
            key,
            layer,
            columns,
        } => run_map(&key, &layer, &columns),
        Commands::Filter {
            layer,
            data,
            context,
            reference,
            date_column,
            season_column,
            dialect,
        } => run_filter(
            &settings,
            &layer,
            &data,
            &context,
            reference,
            &date_column,
            season_column.as_deref(),
            dialect.map(Dialect::from),
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_resolve(
    settings: &Settings,
    expression: &str,
    reference: NaiveDate,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = TemporalResolver::new(settings.resolver.options()?);
    let outcome = Resolution::from(resolver.resolve(expression, reference));
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn run_map(
    key: &str,
    layer_path: &PathBuf,
    columns: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let layer = SemanticLayer::from_file(layer_path)?;
    let column = semantic::resolve_column(key, &layer, columns)?;
    println!("{}", column);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_filter(
    settings: &Settings,
    layer_path: &PathBuf,
    data_path: &PathBuf,
    context_path: &PathBuf,
    reference: NaiveDate,
    date_column: &str,
    season_column: Option<&str>,
    dialect: Option<Dialect>,
) -> Result<(), Box<dyn std::error::Error>> {
    let layer = SemanticLayer::from_file(layer_path)?;
    let dataset = Dataset::from_json_records(&fs::read_to_string(data_path)?)?;
    let context: QueryContext = serde_json::from_str(&fs::read_to_string(context_path)?)?;

    let schema = match season_column {
        Some(season) => DatasetSchema::with_date_and_season(date_column, season),
        None => DatasetSchema::with_date(date_column),
    };
    let dialect = match dialect {
        Some(dialect) => dialect,
        None => settings.query.dialect()?,
    };

    let engine = FilterEngine::new(
        TemporalResolver::new(settings.resolver.options()?),
        settings.resolver.strictness,
    );
    let filter = engine.build(&context, &layer, &dataset, &schema, reference)?;

    for diagnostic in &filter.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }

    let subset = filter.apply(&dataset);
    println!("{}", serde_json::to_string_pretty(&subset.to_json_records())?);
    let clause = filter.where_clause(dialect);
    if !clause.is_empty() {
        println!("-- {}", clause);
    }
    Ok(())
}
