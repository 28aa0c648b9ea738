use bulk_import::cli;
use bulk_import::config::{DEFAULT_BOM_FILE, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use bulk_import::logging;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status when the files were written but a sheet was skipped or
/// expansion stopped early
const EXIT_DEGRADED: u8 = 2;

#[derive(Parser)]
#[command(name = "bulk-import")]
#[command(about = "Expand process sheets against a BOM into bulk import CSV files")]
#[command(long_about = "Bulk Import - process sheets × BOM → bulk import CSV files

Reads every .xlsx process sheet in the input directory, expands each one
per occurrence of its product code in the BOM workbook, and writes:

  production_prodProcess.csv       one row per expanded process
  production_prodProcessLine.csv   one row per expanded step

Running without a subcommand is the same as 'bulk-import expand'.

EXIT STATUS:
  0  all sheets read and the whole BOM expanded
  1  fatal error (missing input directory, write failure)
  2  files written, but a sheet was skipped or expansion stopped early

EXAMPLES:
  bulk-import                                   # fichas/ + data/bom.xlsx → bulk_import/
  bulk-import expand -i sheets -b bom.xlsx -o out
  bulk-import templates                         # export sheets without the BOM")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    expand: ExpandArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand process sheets against the BOM (default)
    Expand(ExpandArgs),

    #[command(long_about = "Export process sheets without BOM expansion.

Writes one process row per sheet and its step rows keyed by the
sheet's own process code. The BOM workbook is not read.")]
    /// Export process sheets as they are, without the BOM
    Templates(TemplateArgs),
}

#[derive(Args)]
struct ExpandArgs {
    /// Directory holding the process sheets
    #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
    input: PathBuf,

    /// BOM workbook
    #[arg(short, long, default_value = DEFAULT_BOM_FILE)]
    bom: PathBuf,

    /// Output directory (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Write a JSON run report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Show per-sheet details and debug diagnostics
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args)]
struct TemplateArgs {
    /// Directory holding the process sheets
    #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
    input: PathBuf,

    /// Output directory (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Write a JSON run report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Show per-sheet details and debug diagnostics
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Expand(cli.expand)) {
        Commands::Expand(args) => {
            logging::init(args.verbose);
            cli::expand(args.input, args.bom, args.output, args.report, args.verbose)
        }
        Commands::Templates(args) => {
            logging::init(args.verbose);
            cli::templates(args.input, args.output, args.report, args.verbose)
        }
    };

    match result {
        Ok(report) if report.is_degraded() => ExitCode::from(EXIT_DEGRADED),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "❌ Error:".bold().red(), e);
            ExitCode::FAILURE
        }
    }
}
