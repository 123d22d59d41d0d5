//! oxide-segment CLI
//!
//! Lowers a SQL-92 SELECT statement and prints its segments as JSON.

use std::io::{self, Read};

use anyhow::Context;
use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use oxide_sql_segment::SelectStatement;

/// Lower SQL-92 SELECT statements to position-annotated segments.
#[derive(Parser)]
#[command(name = "oxide-segment")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL text to lower (read from stdin if not specified).
    sql: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(short, long, env = "OXIDE_SEGMENT_PRETTY")]
    pretty: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn read_sql(&self) -> anyhow::Result<String> {
        match &self.sql {
            Some(sql) => Ok(sql.clone()),
            None => {
                let mut sql = String::new();
                io::stdin()
                    .read_to_string(&mut sql)
                    .context("Failed to read SQL from stdin")?;
                Ok(sql)
            }
        }
    }
}

fn render(statement: &SelectStatement, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(statement)
    } else {
        serde_json::to_string(statement)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let sql = cli.read_sql()?;
    let sql = sql.trim();
    debug!(sql = %sql, "Lowering");

    let statement = oxide_sql92::lower(sql).with_context(|| format!("Failed to lower: {sql}"))?;
    println!("{}", render(&statement, cli.pretty)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_inline_sql() {
        let cli = Cli::try_parse_from(["oxide-segment", "--pretty", "SELECT a FROM t"]).unwrap();
        assert_eq!(cli.sql.as_deref(), Some("SELECT a FROM t"));
        assert!(cli.pretty);
        assert!(!cli.verbose);
        assert_eq!(cli.read_sql().unwrap(), "SELECT a FROM t");
    }

    #[test]
    fn test_cli_sql_is_optional() {
        let cli = Cli::try_parse_from(["oxide-segment", "-v"]).unwrap();
        assert!(cli.sql.is_none());
        assert!(cli.verbose);
    }

    #[test]
    fn test_render_compact_json() {
        let statement = oxide_sql92::lower("SELECT a FROM t WHERE a = ?").unwrap();
        let json = render(&statement, false).unwrap();
        assert!(!json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["parameters_count"], 1);
        assert_eq!(
            value["tables"][0]["table_name"]["identifier"]["value"],
            "t"
        );
    }

    #[test]
    fn test_render_pretty_json() {
        let statement = oxide_sql92::lower("SELECT 1").unwrap();
        assert!(render(&statement, true).unwrap().contains('\n'));
    }
}
