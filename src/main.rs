//! tablescript - Tabular data model and text templates

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::info;

use tablescript::config::{Config, TemplateSource};
use tablescript::output::{generate, DirectoryWriter, FileWriter, StdoutWriter, TemplateFactory};
use tablescript::parser::load_schema;
use tablescript::text::{StandardText, TextTransformer};

/// Generate text files from tabular data
#[derive(Parser, Debug)]
#[command(name = "tablescript")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Data files or directories (CSV, TSV, JSON, XLSX, ODS)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Built-in template (summary, character) or path to a Tera template
    #[arg(short, long, default_value = "summary")]
    template: String,

    /// Directory for generated files (prints to stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Reject rows whose columns differ from the first row, and duplicate tables
    #[arg(long)]
    strict: bool,

    /// For spreadsheets: only load this sheet
    #[arg(long)]
    sheet: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config {
        inputs: cli.inputs,
        template: TemplateSource::parse(&cli.template),
        output_dir: cli.output,
        strict: cli.strict,
        sheet_name: cli.sheet,
    };

    let schema = load_schema(&config)?;
    info!("Loaded {} table(s)", schema.table_count());

    let template = TemplateFactory::create(&config.template)?;
    let text: Arc<dyn TextTransformer> = Arc::new(StandardText);

    let mut writer: Box<dyn FileWriter> = match config.output_dir {
        Some(ref dir) => Box::new(DirectoryWriter::new(dir)),
        None => Box::new(StdoutWriter::new()),
    };

    let count = generate(&schema, template.as_ref(), &text, writer.as_mut())?;
    info!("Template {} produced {} file(s)", template.name(), count);

    Ok(())
}
