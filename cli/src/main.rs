use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use masktab_core::{
    export_csv, import_csv, ColumnSchema, CoreConfig, MaskSelection, MaskingRun, ProgressUpdate,
    Record, RecordStore,
};

/// Sample personnel CSV, matching the records a fresh deployment ships with
const SAMPLE_CSV: &str = "\
氏名,正式部名称,正式室課名称,従業員性別,入社形態(新卒/キャリア/キャリアカムバック),年齢('26/1時点),ロケーション名称,入社年月日,住所
新規 典子,営業本部,首都圏営業課,女,キャリア,27,東京,2022-10-01,東京都品川区...
追加 祐介,マーケ本部,デジタル課,男,新卒,31,名古屋,2018-04-01,愛知県名古屋市...
";

#[derive(Parser, Debug)]
#[clap(author, version, about = "Masktab - reversible field masking for personnel CSV data")]
struct Args {
    /// Config file path
    #[clap(short, long, env = "MASKTAB_CONFIG")]
    config: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a CSV, mask the selected columns, and export the results
    Run {
        /// Input CSV file
        input: PathBuf,

        /// Output file for the masked CSV
        #[clap(short, long, default_value = "candidates_processed.csv")]
        output: PathBuf,

        /// Output file for the mapping table (.json for JSON, otherwise CSV)
        #[clap(short, long)]
        mapping: Option<PathBuf>,

        /// Column to mask; repeat for multiple columns
        #[clap(short = 'k', long = "mask-column", env = "MASKTAB_MASK_COLUMNS", value_delimiter = ',')]
        mask_columns: Vec<String>,

        /// Field delimiter
        #[clap(long, env = "MASKTAB_DELIMITER")]
        delimiter: Option<char>,

        /// Identifying column that must be non-empty for a row to import
        #[clap(long, env = "MASKTAB_MANDATORY_COLUMN")]
        mandatory_column: Option<String>,
    },

    /// Write the built-in sample CSV
    Sample {
        /// Output file; stdout when omitted
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let args = Args::parse();

    // Load configuration
    let mut core_config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Run {
            input,
            output,
            mapping,
            mask_columns,
            delimiter,
            mandatory_column,
        } => {
            // Override config with command-line arguments
            if let Some(delimiter) = delimiter {
                core_config.csv.delimiter = delimiter;
            }
            if let Some(mandatory_column) = mandatory_column {
                core_config.csv.mandatory_column = mandatory_column;
            }

            // Default mask selection: the name column
            let mask_columns = if mask_columns.is_empty() {
                vec!["氏名".to_string()]
            } else {
                mask_columns
            };

            run_pipeline(&core_config, &input, &output, mapping.as_deref(), &mask_columns)
        }
        Command::Sample { output } => write_sample(output.as_deref()),
    }
}

/// Load configuration from an optional file plus MASKTAB_* environment keys
fn load_config(path: Option<&str>) -> Result<CoreConfig> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::with_name(path));
    }
    builder = builder.add_source(config::Environment::with_prefix("MASKTAB").separator("__"));

    let settings = builder.build().context("Failed to load configuration")?;
    settings
        .try_deserialize()
        .context("Invalid configuration contents")
}

/// Import, mask, and export one CSV file
fn run_pipeline(
    core_config: &CoreConfig,
    input: &Path,
    output: &Path,
    mapping: Option<&Path>,
    mask_columns: &[String],
) -> Result<()> {
    let payload = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let schema = schema_from_header(&payload, core_config.csv.delimiter)?;
    info!("Schema: {} columns", schema.len());

    let (pending, report) = import_csv(&payload, &schema, &core_config.csv, |ratio| {
        debug!("Import progress: {:.0}%", ratio * 100.0);
    });
    info!("Imported {} rows ({} skipped)", report.imported, report.skipped);
    for warning in &report.warnings {
        warn!("Line {}: {}", warning.line, warning.reason);
    }

    let selection = MaskSelection::new(&schema, mask_columns.iter().cloned())
        .context("Invalid mask column selection")?;
    let run = MaskingRun::new(selection.clone(), core_config.masking.clone())
        .context("Cannot start masking")?;

    let mut store = RecordStore::empty(schema.clone());
    let mut observer = |update: ProgressUpdate| {
        info!(
            "Masking progress: {} / {} ({}%)",
            update.processed, update.total, update.percent
        );
    };
    let outcome = run.run(&mut store, pending, &mut observer)?;

    fs::write(output, export_csv(&outcome.masked, &schema, &core_config.csv))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Masked CSV written to {}", output.display());

    if let Some(mapping_path) = mapping {
        write_mapping(mapping_path, &outcome.mappings, core_config)?;
        info!("Mapping table written to {}", mapping_path.display());
    }

    Ok(())
}

/// Derive the column schema from the payload's header line
fn schema_from_header(payload: &str, delimiter: char) -> Result<ColumnSchema> {
    let header = match payload.lines().next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => bail!("Input CSV has no header line"),
    };
    let columns = header.split(delimiter).map(str::trim);
    ColumnSchema::new(columns).context("Invalid CSV header")
}

/// Write the mapping table as JSON or CSV, depending on the file extension
fn write_mapping(
    path: &Path,
    mappings: &[masktab_core::MappingEntry],
    core_config: &CoreConfig,
) -> Result<()> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let contents = if is_json {
        serde_json::to_string_pretty(mappings)?
    } else {
        mapping_csv(mappings, core_config)
    };

    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Render mapping entries with the same headers the mapping display uses
fn mapping_csv(mappings: &[masktab_core::MappingEntry], core_config: &CoreConfig) -> String {
    let schema = ColumnSchema::new(["カラム名", "マスク文字列", "元文字列"])
        .expect("mapping header columns are unique");
    let records: Vec<Record> = mappings
        .iter()
        .map(|entry| {
            Record::from_pairs([
                ("カラム名", entry.column.clone()),
                ("マスク文字列", entry.handle.clone()),
                ("元文字列", entry.original.clone()),
            ])
        })
        .collect();
    export_csv(&records, &schema, &core_config.csv)
}

/// Write the sample CSV to a file or stdout
fn write_sample(output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, SAMPLE_CSV)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Sample CSV written to {}", path.display());
        }
        None => print!("{}", SAMPLE_CSV),
    }
    Ok(())
}
