use crate::config::PipelineConfig;
use crate::error::ImportResult;
use crate::pipeline::{self, FileOutcome, RunReport};
use colored::Colorize;
use std::path::PathBuf;

/// Expand process sheets against the BOM workbook
pub fn expand(
    input: PathBuf,
    bom: PathBuf,
    output: PathBuf,
    report: Option<PathBuf>,
    verbose: bool,
) -> ImportResult<RunReport> {
    println!("{}", "🔥 Bulk Import - BOM Expansion".bold().green());
    println!("   Sheets: {}", input.display());
    println!("   BOM:    {}", bom.display());
    println!("   Output: {}\n", output.display());

    let config = PipelineConfig {
        input_dir: input,
        bom_path: bom,
        output_dir: output,
    };
    let run = pipeline::run_expand(&config)?;

    print_summary(&run, verbose);
    save_report(&run, report)?;
    Ok(run)
}

/// Export the process sheets without BOM expansion
pub fn templates(
    input: PathBuf,
    output: PathBuf,
    report: Option<PathBuf>,
    verbose: bool,
) -> ImportResult<RunReport> {
    println!("{}", "🔥 Bulk Import - Templates".bold().green());
    println!("   Sheets: {}", input.display());
    println!("   Output: {}\n", output.display());

    let config = PipelineConfig {
        input_dir: input,
        output_dir: output,
        ..PipelineConfig::default()
    };
    let run = pipeline::run_templates(&config)?;

    print_summary(&run, verbose);
    save_report(&run, report)?;
    Ok(run)
}

fn save_report(run: &RunReport, report: Option<PathBuf>) -> ImportResult<()> {
    if let Some(path) = report {
        pipeline::write_report(run, &path)?;
        println!("   Report: {}", path.display());
    }
    Ok(())
}

fn print_summary(run: &RunReport, verbose: bool) {
    let extracted = run.files.len() - run.skipped().count();
    println!("   {} process sheets read", extracted);

    if verbose {
        for outcome in &run.files {
            if let FileOutcome::Extracted {
                file,
                code,
                product_code,
                steps,
            } = outcome
            {
                println!(
                    "   📄 {} → {} ({}), {} steps",
                    file.display(),
                    code.bright_blue(),
                    product_code,
                    steps
                );
            }
        }
    }

    for outcome in run.skipped() {
        if let FileOutcome::Skipped { file, reason } = outcome {
            println!("   {} {}: {}", "⚠️  Skipped".yellow(), file.display(), reason);
        }
    }

    if run.bom_entries > 0 {
        println!("   {} BOM entries", run.bom_entries);
    }
    if let Some(fault) = &run.expansion_fault {
        println!("   {} {}", "⚠️  Expansion stopped:".yellow(), fault);
    }

    println!(
        "   {} processes → {}",
        run.processes_written,
        run.outputs.processes.display()
    );
    println!(
        "   {} steps     → {}\n",
        run.steps_written,
        run.outputs.process_lines.display()
    );

    if run.is_degraded() {
        println!("{}", "⚠️  Completed with problems".bold().yellow());
    } else {
        println!("{}", "✅ Bulk import files written".bold().green());
    }
}
