//! Expansion engine - one process-and-steps group per BOM entry
//!
//! Join path: BOM code → template (by product code) → steps (by template code).
//! Each group's steps are re-keyed to the expanded process code.

use crate::core::catalog::TemplateCatalog;
use crate::types::{BomEntry, ExpandedProcess, ExpandedStep};
use tracing::{debug, error};

/// Processes and steps produced by one expansion pass
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Expansion {
    pub processes: Vec<ExpandedProcess>,
    pub steps: Vec<ExpandedStep>,
    /// Entry whose code had no template; expansion stopped there
    pub unmatched: Option<BomEntry>,
}

impl Expansion {
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_none()
    }
}

/// Expand BOM entries in scan order.
///
/// Stops at the first entry whose code no template declares. Groups expanded
/// before that entry are kept.
pub fn expand(catalog: &TemplateCatalog, entries: &[BomEntry]) -> Expansion {
    let mut expansion = Expansion::default();

    for entry in entries {
        let Some(template) = catalog.lookup(&entry.code) else {
            error!(
                code = %entry.code,
                sequence_label = %entry.sequence_label,
                "BOM code has no matching process template"
            );
            expansion.unmatched = Some(entry.clone());
            break;
        };

        let process = ExpandedProcess::from_template(template, entry);
        let steps = catalog.steps_for(&template.code);

        debug!(
            code = %process.code,
            template = %template.code,
            steps = steps.len(),
            "expanded BOM entry"
        );

        expansion
            .steps
            .extend(steps.iter().map(|step| step.rekeyed(&process.code)));
        expansion.processes.push(process);
    }

    expansion
}
