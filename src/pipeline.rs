//! End-to-end runs: directory scan → extraction → BOM scan → expansion → export
//!
//! Each stage hands its result to the next. Faults are contained at the
//! smallest scope that still lets the run finish:
//! - a bad process sheet is skipped and reported,
//! - a bad BOM (or an unmatched code) stops expansion but not the export,
//! - only a missing input directory or a failed write aborts the run.

use crate::config::{PipelineConfig, SHEET_EXTENSION};
use crate::core::{expand, Expansion, TemplateCatalog};
use crate::error::{ImportError, ImportResult};
use crate::excel::{BomScanner, SheetExtractor};
use crate::types::{BomEntry, SheetTemplate};
use crate::writer::{CsvExporter, ExportedFiles};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Which export a run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Templates expanded against the BOM
    Expand,
    /// Templates written as extracted
    Templates,
}

/// What happened to one process sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Extracted {
        file: PathBuf,
        code: String,
        product_code: String,
        steps: usize,
    },
    Skipped {
        file: PathBuf,
        reason: String,
    },
}

impl FileOutcome {
    pub fn file(&self) -> &Path {
        match self {
            FileOutcome::Extracted { file, .. } | FileOutcome::Skipped { file, .. } => file,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, FileOutcome::Skipped { .. })
    }
}

/// Summary of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub mode: RunMode,
    pub files: Vec<FileOutcome>,
    pub bom_entries: usize,
    pub processes_written: usize,
    pub steps_written: usize,
    /// Why expansion stopped early, if it did
    pub expansion_fault: Option<String>,
    pub outputs: ExportedFiles,
}

impl RunReport {
    /// True when a sheet was skipped or expansion stopped early
    pub fn is_degraded(&self) -> bool {
        self.expansion_fault.is_some() || self.files.iter().any(FileOutcome::is_skipped)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|outcome| outcome.is_skipped())
    }
}

//==============================================================================
// Stages
//==============================================================================

/// List candidate process sheets in file-name order.
///
/// Only names with the exact `.xlsx` extension are kept.
pub fn scan_directory(dir: &Path) -> ImportResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ImportError::InputDirMissing(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some(SHEET_EXTENSION) {
            paths.push(path);
        } else {
            debug!(file = %path.display(), "ignoring non-spreadsheet file");
        }
    }

    paths.sort();
    Ok(paths)
}

/// Extract every sheet, recording a per-file outcome.
///
/// Entries that are not regular files are ignored without an outcome.
pub fn extract_templates(paths: &[PathBuf]) -> (Vec<SheetTemplate>, Vec<FileOutcome>) {
    let mut sheets = Vec::new();
    let mut outcomes = Vec::new();

    for path in paths {
        match extract_one(path) {
            Ok(Some(sheet)) => {
                info!(file = %path.display(), steps = sheet.steps.len(), "process sheet found");
                outcomes.push(FileOutcome::Extracted {
                    file: path.clone(),
                    code: sheet.process.code.clone(),
                    product_code: sheet.process.product_code.clone(),
                    steps: sheet.steps.len(),
                });
                sheets.push(sheet);
            }
            Ok(None) => debug!(file = %path.display(), "ignoring non-file entry"),
            Err(e) => {
                error!(file = %path.display(), error = %e, "failed to process sheet, skipping");
                outcomes.push(FileOutcome::Skipped {
                    file: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (sheets, outcomes)
}

fn extract_one(path: &Path) -> ImportResult<Option<SheetTemplate>> {
    if !fs::metadata(path)?.is_file() {
        return Ok(None);
    }
    SheetExtractor::new(path).extract().map(Some)
}

/// Result of the BOM phase
#[derive(Debug, Default)]
pub struct BomPhase {
    pub entries: Vec<BomEntry>,
    pub expansion: Expansion,
    pub fault: Option<ImportError>,
}

/// Scan the BOM and expand it against the catalog.
///
/// A BOM read failure leaves the expansion empty; an unmatched code keeps
/// the groups expanded before it.
pub fn expand_bom(bom_path: &Path, catalog: &TemplateCatalog) -> BomPhase {
    let entries = match BomScanner::new(bom_path).scan() {
        Ok(entries) => entries,
        Err(e) => {
            error!(file = %bom_path.display(), error = %e, "failed to process BOM workbook");
            return BomPhase {
                fault: Some(e),
                ..BomPhase::default()
            };
        }
    };

    info!(entries = entries.len(), templates = catalog.len(), "expanding BOM");
    let expansion = expand(catalog, &entries);
    let fault = expansion
        .unmatched
        .as_ref()
        .map(|entry| ImportError::UnmatchedProductCode(entry.code.clone()));

    BomPhase {
        entries,
        expansion,
        fault,
    }
}

fn prepare_output_dir(dir: &Path) -> ImportResult<()> {
    if !dir.exists() {
        info!(dir = %dir.display(), "creating output directory");
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

//==============================================================================
// Runs
//==============================================================================

/// Expand the process sheets against the BOM and write both files
pub fn run_expand(config: &PipelineConfig) -> ImportResult<RunReport> {
    let paths = scan_directory(&config.input_dir)?;
    prepare_output_dir(&config.output_dir)?;

    let (sheets, files) = extract_templates(&paths);
    let catalog = TemplateCatalog::build(sheets);
    let phase = expand_bom(&config.bom_path, &catalog);

    if let Some(fault) = &phase.fault {
        warn!(error = %fault, "expansion incomplete, writing partial results");
    }

    let outputs = CsvExporter::new(&config.output_dir)
        .export_expansion(&phase.expansion.processes, &phase.expansion.steps)?;

    Ok(RunReport {
        mode: RunMode::Expand,
        files,
        bom_entries: phase.entries.len(),
        processes_written: phase.expansion.processes.len(),
        steps_written: phase.expansion.steps.len(),
        expansion_fault: phase.fault.map(|e| e.to_string()),
        outputs,
    })
}

/// Write the extracted templates as they are, without a BOM
pub fn run_templates(config: &PipelineConfig) -> ImportResult<RunReport> {
    let paths = scan_directory(&config.input_dir)?;
    prepare_output_dir(&config.output_dir)?;

    let (sheets, files) = extract_templates(&paths);
    let (templates, steps): (Vec<_>, Vec<_>) = sheets
        .into_iter()
        .map(|sheet| (sheet.process, sheet.steps))
        .unzip();
    let steps: Vec<_> = steps.into_iter().flatten().collect();

    let outputs = CsvExporter::new(&config.output_dir).export_templates(&templates, &steps)?;

    Ok(RunReport {
        mode: RunMode::Templates,
        files,
        bom_entries: 0,
        processes_written: templates.len(),
        steps_written: steps.len(),
        expansion_fault: None,
        outputs,
    })
}

/// Save a report as pretty JSON
pub fn write_report(report: &RunReport, path: &Path) -> ImportResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}
