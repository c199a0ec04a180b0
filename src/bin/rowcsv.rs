use clap::Parser;
use rowcsv::{Converter, CursorError, IterCursor, Timestamp, Value, config, logger};
use serde_json::Value as Json;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert newline-delimited JSON rows to CSV.
///
/// Each input line is one JSON object. Columns come from the first object's
/// keys in sorted order; later rows missing a key get an empty field.
#[derive(Debug, Parser)]
#[command(name = "rowcsv", version)]
struct Cli {
    /// Input file; stdin when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output file; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// TOML file with convert options.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    no_headers: bool,
    /// Header names replacing the column names.
    #[arg(long, value_delimiter = ',')]
    headers: Option<Vec<String>>,
    /// strftime pattern for timestamp columns.
    #[arg(long)]
    time_format: Option<String>,
    /// Columns whose RFC 3339 strings are parsed as timestamps.
    #[arg(long, value_delimiter = ',')]
    time_columns: Vec<String>,
    /// Single character, or `\t`.
    #[arg(long)]
    delimiter: Option<String>,
    /// Directory for the rolling `app.log`; falls back to ROWCSV_LOG_DIR.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace); overrides ROWCSV_LOG_LEVEL.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rowcsv: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.log_dir.is_some() {
        logger::configure_logging(cli.log_dir.as_deref(), cli.log_level.as_deref(), None)?;
    } else if std::env::var_os("ROWCSV_LOG_DIR").is_some() {
        logger::configure_from_env_with_level(cli.log_level.as_deref())?;
    } else if cli.log_level.is_some() {
        eprintln!("rowcsv: --log-level has no effect without --log-dir or ROWCSV_LOG_DIR");
    }

    let mut opts = config::load_options(cli.config.as_deref())?;
    if cli.no_headers {
        opts.write_headers = false;
    }
    if let Some(h) = cli.headers {
        opts.headers = Some(h);
    }
    if let Some(f) = cli.time_format {
        opts.time_format = Some(f);
    }
    if let Some(d) = cli.delimiter.as_deref() {
        opts.delimiter = config::parse_delimiter(d)?;
    }

    let input: Box<dyn Read> = match &cli.input {
        Some(p) => Box::new(File::open(p)?),
        None => Box::new(io::stdin().lock()),
    };
    let mut lines = BufReader::new(input)
        .lines()
        .filter(|l| !matches!(l, Ok(s) if s.trim().is_empty()));
    let Some(first) = lines.next().transpose()? else {
        log::info!("empty input, nothing to convert");
        return Ok(());
    };
    let columns: Vec<String> = match serde_json::from_str::<Json>(&first)? {
        Json::Object(obj) => obj.keys().cloned().collect(),
        _ => return Err("first line is not a JSON object".into()),
    };

    let time_columns: HashSet<String> = cli.time_columns.into_iter().collect();
    let cols = columns.clone();
    let rows = std::iter::once(Ok(first))
        .chain(lines)
        .map(move |line| parse_row(&line?, &cols, &time_columns));
    let mut cursor = IterCursor::new(columns, rows);
    let converter = Converter::with_options(&mut cursor, opts);
    let report = match &cli.output {
        Some(path) => converter.write_to_file(path)?,
        None => converter.write_to(io::stdout().lock())?,
    };
    log::info!("converted {} rows", report.written);
    Ok(())
}

fn parse_row(
    line: &str,
    columns: &[String],
    time_columns: &HashSet<String>,
) -> Result<Vec<Value>, CursorError> {
    let Json::Object(mut obj) = serde_json::from_str::<Json>(line)? else {
        return Err("row is not a JSON object".into());
    };
    columns
        .iter()
        .map(|c| json_to_value(obj.remove(c).unwrap_or(Json::Null), time_columns.contains(c)))
        .collect()
}

fn json_to_value(v: Json, as_time: bool) -> Result<Value, CursorError> {
    Ok(match v {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::UInt(u)
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Json::String(s) if as_time => Value::Timestamp(Timestamp::parse_rfc3339(&s)?),
        Json::String(s) => Value::Text(s),
        other => Value::Text(other.to_string()),
    })
}
