use clap::{Args, ValueEnum};
use role_evaluation::config::ProjectionConfig;
use role_evaluation::error::AppError;
use role_evaluation::roll::accessor::{get_or_empty, FieldPath};
use role_evaluation::roll::{
    write_csv, CodeTable, NormalizedProperty, PropertyHandoff, PropertyProjector,
};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(crate) struct ProjectArgs {
    /// Roll document as JSON (`-` reads stdin). A JSON array is a batch.
    pub(crate) input: PathBuf,
    /// Selected municipality for composed addresses
    #[arg(long)]
    pub(crate) municipality: Option<String>,
    /// Emit single-line JSON instead of pretty-printed output
    #[arg(long)]
    pub(crate) compact: bool,
}

#[derive(Args, Debug)]
pub(crate) struct HandoffArgs {
    /// Roll document as JSON (`-` reads stdin). A JSON array is a batch.
    pub(crate) input: PathBuf,
    /// Selected municipality for composed addresses
    #[arg(long)]
    pub(crate) municipality: Option<String>,
    /// Output encoding
    #[arg(long, value_enum, default_value_t = HandoffFormat::Json)]
    pub(crate) format: HandoffFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum HandoffFormat {
    /// One encoded hand-off per line
    Json,
    /// CSV with a header row
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct CodesArgs {
    /// Table name, e.g. `street-type` or `owner-status`
    pub(crate) table: String,
    /// Translate this code instead of listing the table
    pub(crate) code: Option<String>,
}

pub(crate) fn run_project(args: ProjectArgs, config: &ProjectionConfig) -> Result<(), AppError> {
    let ProjectArgs {
        input,
        municipality,
        compact,
    } = args;

    let batch = read_batch(&input)?;
    let properties = project_batch(&batch, municipality, config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match (batch.is_array, compact) {
        (true, true) => serde_json::to_writer(&mut out, &properties)?,
        (true, false) => serde_json::to_writer_pretty(&mut out, &properties)?,
        (false, compact) => {
            for property in &properties {
                if compact {
                    serde_json::to_writer(&mut out, property)?;
                } else {
                    serde_json::to_writer_pretty(&mut out, property)?;
                }
            }
        }
    }
    writeln!(out)?;
    Ok(())
}

pub(crate) fn run_handoff(args: HandoffArgs, config: &ProjectionConfig) -> Result<(), AppError> {
    let HandoffArgs {
        input,
        municipality,
        format,
    } = args;

    let batch = read_batch(&input)?;
    let handoffs: Vec<PropertyHandoff> = project_batch(&batch, municipality, config)
        .iter()
        .map(PropertyHandoff::from)
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        HandoffFormat::Json => {
            for handoff in &handoffs {
                writeln!(out, "{}", handoff.to_json()?)?;
            }
        }
        HandoffFormat::Csv => write_csv(&mut out, &handoffs)?,
    }
    Ok(())
}

pub(crate) fn run_codes(args: CodesArgs) -> Result<(), AppError> {
    let table: CodeTable = args.table.parse()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.code {
        Some(code) => writeln!(out, "{}", table.translate(&code))?,
        None => {
            writeln!(out, "{}", table.label())?;
            for (code, label) in table.entries() {
                writeln!(out, "  {code:<6} {label}")?;
            }
        }
    }
    Ok(())
}

/// Roll documents read from one input, remembering whether they arrived as
/// a JSON array.
#[derive(Debug)]
pub(crate) struct RecordBatch {
    pub(crate) records: Vec<Value>,
    pub(crate) is_array: bool,
}

fn read_batch(input: &Path) -> Result<RecordBatch, AppError> {
    if input.as_os_str() == "-" {
        return parse_batch(io::stdin().lock());
    }
    let file = File::open(input)?;
    parse_batch(BufReader::new(file))
}

pub(crate) fn parse_batch<R: Read>(reader: R) -> Result<RecordBatch, AppError> {
    let value: Value = serde_json::from_reader(reader)?;
    Ok(match value {
        Value::Array(records) => RecordBatch {
            records,
            is_array: true,
        },
        record => RecordBatch {
            records: vec![record],
            is_array: false,
        },
    })
}

fn project_batch(
    batch: &RecordBatch,
    municipality: Option<String>,
    config: &ProjectionConfig,
) -> Vec<NormalizedProperty> {
    let projector = match municipality {
        Some(municipality) => PropertyProjector::new(municipality),
        None => PropertyProjector::from_config(config),
    };

    let properties: Vec<_> = batch
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            if let Some(found) = municipality_mismatch(record, &config.municipality_code) {
                warn!(
                    index,
                    expected = %config.municipality_code,
                    found = %found,
                    "roll document belongs to another municipality"
                );
            }
            projector.project(record)
        })
        .collect();

    info!(
        count = properties.len(),
        municipality = projector.municipality(),
        "projected roll documents"
    );
    properties
}

/// The document's `RLM01A` when present and different from `expected`.
pub(crate) fn municipality_mismatch(record: &Value, expected: &str) -> Option<String> {
    let found = get_or_empty(record, FieldPath::new(&["RLM01A"]));
    let found = found.trim();
    if found.is_empty() || found == expected {
        None
    } else {
        Some(found.to_string())
    }
}
