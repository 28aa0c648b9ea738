//! Semicolon-delimited bulk import writer
//!
//! Column names and order are fixed by the downstream import format.
//! Records are separated by CRLF and the last record has no terminator.

use crate::error::{ImportError, ImportResult};
use crate::types::{ExpandedProcess, ExpandedStep, ProcessTemplate, StepTemplate};
use csv::{Terminator, WriterBuilder};
use serde::{Serialize, Serializer};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Process header file name
pub const PROCESS_FILE: &str = "production_prodProcess.csv";

/// Process step file name
pub const PROCESS_LINE_FILE: &str = "production_prodProcessLine.csv";

const DELIMITER: u8 = b';';

const RECORD_TERMINATOR: &[u8] = b"\r\n";

#[derive(Debug, Serialize)]
struct ProcessRow<'a> {
    #[serde(rename = "importId")]
    import_id: &'a str,
    name: &'a str,
    code: &'a str,
    #[serde(rename = "workshopStockLocation_name")]
    workshop_location_name: &'a str,
    company_code: &'a str,
    #[serde(rename = "statusSelect")]
    status: &'a str,
    product_code: &'a str,
}

impl<'a> From<&'a ExpandedProcess> for ProcessRow<'a> {
    fn from(process: &'a ExpandedProcess) -> Self {
        Self {
            import_id: "",
            name: &process.name,
            code: &process.code,
            workshop_location_name: &process.workshop_location_name,
            company_code: &process.company_code,
            status: &process.status,
            product_code: &process.product_code,
        }
    }
}

impl<'a> From<&'a ProcessTemplate> for ProcessRow<'a> {
    fn from(template: &'a ProcessTemplate) -> Self {
        Self {
            import_id: "",
            name: &template.name,
            code: &template.code,
            workshop_location_name: &template.workshop_location_name,
            company_code: &template.company_code,
            status: &template.status,
            product_code: &template.product_code,
        }
    }
}

#[derive(Debug, Serialize)]
struct ProcessLineRow<'a> {
    #[serde(rename = "importId")]
    import_id: &'a str,
    #[serde(rename = "prodProcess_code")]
    parent_process_code: &'a str,
    name: &'a str,
    priority: &'a str,
    #[serde(rename = "workCenter_code")]
    work_center_code: &'a str,
    description: &'a str,
    #[serde(rename = "minCapacityPerCycle", serialize_with = "plain_number")]
    min_capacity_per_cycle: f64,
    #[serde(rename = "maxCapacityPerCycle", serialize_with = "plain_number")]
    max_capacity_per_cycle: f64,
    #[serde(rename = "durationPerCycle_seconds", serialize_with = "plain_number")]
    duration_per_cycle_seconds: f64,
}

impl<'a> From<&'a ExpandedStep> for ProcessLineRow<'a> {
    fn from(step: &'a ExpandedStep) -> Self {
        Self {
            import_id: "",
            parent_process_code: &step.parent_process_code,
            name: &step.name,
            priority: &step.priority,
            work_center_code: &step.work_center_code,
            description: &step.description,
            min_capacity_per_cycle: step.min_capacity_per_cycle,
            max_capacity_per_cycle: step.max_capacity_per_cycle,
            duration_per_cycle_seconds: step.duration_per_cycle_seconds,
        }
    }
}

impl<'a> From<&'a StepTemplate> for ProcessLineRow<'a> {
    fn from(step: &'a StepTemplate) -> Self {
        Self {
            import_id: "",
            parent_process_code: &step.parent_process_code,
            name: &step.name,
            priority: &step.priority,
            work_center_code: &step.work_center_code,
            description: &step.description,
            min_capacity_per_cycle: step.min_capacity_per_cycle,
            max_capacity_per_cycle: step.max_capacity_per_cycle,
            duration_per_cycle_seconds: step.duration_per_cycle_seconds,
        }
    }
}

/// Numbers as `0` / `2.5` rather than `0.0`
fn plain_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Paths of the two files written by an export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedFiles {
    pub processes: PathBuf,
    pub process_lines: PathBuf,
}

/// Writes the process and process-line files into one directory
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Write expanded processes and their steps
    pub fn export_expansion(
        &self,
        processes: &[ExpandedProcess],
        steps: &[ExpandedStep],
    ) -> ImportResult<ExportedFiles> {
        self.export(
            processes.iter().map(ProcessRow::from),
            steps.iter().map(ProcessLineRow::from),
        )
    }

    /// Write un-expanded templates and their steps
    pub fn export_templates(
        &self,
        templates: &[ProcessTemplate],
        steps: &[StepTemplate],
    ) -> ImportResult<ExportedFiles> {
        self.export(
            templates.iter().map(ProcessRow::from),
            steps.iter().map(ProcessLineRow::from),
        )
    }

    fn export<'a>(
        &self,
        processes: impl Iterator<Item = ProcessRow<'a>>,
        lines: impl Iterator<Item = ProcessLineRow<'a>>,
    ) -> ImportResult<ExportedFiles> {
        let files = ExportedFiles {
            processes: self.output_dir.join(PROCESS_FILE),
            process_lines: self.output_dir.join(PROCESS_LINE_FILE),
        };

        let written = write_records(&files.processes, processes)?;
        info!(file = %files.processes.display(), records = written, "wrote process file");

        let written = write_records(&files.process_lines, lines)?;
        info!(file = %files.process_lines.display(), records = written, "wrote process line file");

        Ok(files)
    }
}

/// Serialize records and replace `path` in one rename.
///
/// No records means an empty file with no header row.
/// The terminator after the last record is dropped.
pub fn write_records<T: Serialize>(
    path: &Path,
    records: impl IntoIterator<Item = T>,
) -> ImportResult<usize> {
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    let mut count = 0;
    for record in records {
        writer.serialize(record)?;
        count += 1;
    }

    let mut bytes = writer
        .into_inner()
        .map_err(|e| ImportError::Io(e.into_error()))?;
    if bytes.ends_with(RECORD_TERMINATOR) {
        bytes.truncate(bytes.len() - RECORD_TERMINATOR.len());
    }

    let temp_file = temp_path(path);
    fs::write(&temp_file, &bytes)?;
    fs::rename(&temp_file, path)?;

    Ok(count)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("export"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn expanded_process() -> ExpandedProcess {
        ExpandedProcess {
            name: "PP P1-1 Widget".to_string(),
            code: "PP-P1-1".to_string(),
            workshop_location_name: "WS1".to_string(),
            company_code: "BASE".to_string(),
            status: "3".to_string(),
            product_code: "P1-1".to_string(),
        }
    }

    fn expanded_step(name: &str) -> ExpandedStep {
        StepTemplate::new(
            "FICHA-1".to_string(),
            name.to_string(),
            "10".to_string(),
            "WC-1".to_string(),
            String::new(),
        )
        .rekeyed("PP-P1-1")
    }

    #[test]
    fn test_export_expansion_layout() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = CsvExporter::new(temp_dir.path());

        let files = exporter
            .export_expansion(&[expanded_process()], &[expanded_step("Cut")])
            .unwrap();

        let processes = fs::read_to_string(&files.processes).unwrap();
        assert_eq!(
            processes,
            "importId;name;code;workshopStockLocation_name;company_code;statusSelect;product_code\r\n\
             ;PP P1-1 Widget;PP-P1-1;WS1;BASE;3;P1-1"
        );

        let lines = fs::read_to_string(&files.process_lines).unwrap();
        assert_eq!(
            lines,
            "importId;prodProcess_code;name;priority;workCenter_code;description;\
             minCapacityPerCycle;maxCapacityPerCycle;durationPerCycle_seconds\r\n\
             ;PP-P1-1;Cut;10;WC-1;;0;0;0"
        );
    }

    #[test]
    fn test_empty_export_writes_empty_files() {
        let temp_dir = TempDir::new().unwrap();
        let files = CsvExporter::new(temp_dir.path())
            .export_expansion(&[], &[])
            .unwrap();

        assert_eq!(fs::read_to_string(&files.processes).unwrap(), "");
        assert_eq!(fs::read_to_string(&files.process_lines).unwrap(), "");
    }

    #[test]
    fn test_fields_with_delimiter_are_quoted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lines.csv");

        write_records(&path, [ProcessLineRow::from(&expanded_step("Cut; then weld"))]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Cut; then weld\""));
    }

    #[test]
    fn test_overwrite_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = CsvExporter::new(temp_dir.path());

        exporter
            .export_expansion(&[expanded_process()], &[])
            .unwrap();
        let files = exporter.export_expansion(&[], &[]).unwrap();

        assert_eq!(fs::read_to_string(&files.processes).unwrap(), "");
        let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_export_templates() {
        let temp_dir = TempDir::new().unwrap();
        let template = ProcessTemplate::new(
            "Assembly".to_string(),
            "FICHA-1".to_string(),
            "P1".to_string(),
            "WS1".to_string(),
        );

        let files = CsvExporter::new(temp_dir.path())
            .export_templates(&[template], &[])
            .unwrap();

        let processes = fs::read_to_string(&files.processes).unwrap();
        assert!(processes.ends_with("\r\n;Assembly;FICHA-1;WS1;BASE;3;P1"));
    }

    #[test]
    fn test_records_use_crlf_without_trailing_terminator() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lines.csv");

        write_records(
            &path,
            [
                ProcessLineRow::from(&expanded_step("Cut")),
                ProcessLineRow::from(&expanded_step("Weld")),
            ],
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("\r\n").count(), 2);
        assert_eq!(content.matches('\n').count(), 2);
        assert!(content.ends_with(";PP-P1-1;Weld;10;WC-1;;0;0;0"));
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let path = Path::new("/out/production_prodProcess.csv");
        assert_eq!(
            temp_path(path),
            PathBuf::from("/out/production_prodProcess.csv.tmp")
        );
    }
}
