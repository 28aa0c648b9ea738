//==============================================================================
// Extracted templates
//==============================================================================

/// Company every imported process belongs to
pub const COMPANY_CODE: &str = "BASE";

/// Status assigned to every imported process
pub const STATUS_SELECT: &str = "3";

/// Unexpanded process definition read from one process sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTemplate {
    pub name: String,
    /// Join key for the sheet's step rows
    pub code: String,
    pub workshop_location_name: String,
    pub company_code: String,
    pub status: String,
    /// Base product code, join key into the BOM
    pub product_code: String,
}

impl ProcessTemplate {
    pub fn new(
        name: String,
        code: String,
        product_code: String,
        workshop_location_name: String,
    ) -> Self {
        Self {
            name,
            code,
            workshop_location_name,
            company_code: COMPANY_CODE.to_string(),
            status: STATUS_SELECT.to_string(),
            product_code,
        }
    }
}

/// One step row of a process sheet
#[derive(Debug, Clone, PartialEq)]
pub struct StepTemplate {
    pub parent_process_code: String,
    pub name: String,
    pub priority: String,
    pub work_center_code: String,
    pub description: String,
    pub min_capacity_per_cycle: f64,
    pub max_capacity_per_cycle: f64,
    pub duration_per_cycle_seconds: f64,
}

impl StepTemplate {
    /// Build a step with zeroed capacity and duration
    pub fn new(
        parent_process_code: String,
        name: String,
        priority: String,
        work_center_code: String,
        description: String,
    ) -> Self {
        Self {
            parent_process_code,
            name,
            priority,
            work_center_code,
            description,
            min_capacity_per_cycle: 0.0,
            max_capacity_per_cycle: 0.0,
            duration_per_cycle_seconds: 0.0,
        }
    }

    /// A row is kept only when one of its text fields carries data
    pub fn is_blank(&self) -> bool {
        [
            &self.name,
            &self.priority,
            &self.work_center_code,
            &self.description,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }

    /// Copy this step under a new parent process
    pub fn rekeyed(&self, parent_process_code: &str) -> ExpandedStep {
        ExpandedStep {
            parent_process_code: parent_process_code.to_string(),
            name: self.name.clone(),
            priority: self.priority.clone(),
            work_center_code: self.work_center_code.clone(),
            description: self.description.clone(),
            min_capacity_per_cycle: self.min_capacity_per_cycle,
            max_capacity_per_cycle: self.max_capacity_per_cycle,
            duration_per_cycle_seconds: self.duration_per_cycle_seconds,
        }
    }
}

/// Everything read from one process sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTemplate {
    pub process: ProcessTemplate,
    pub steps: Vec<StepTemplate>,
}

//==============================================================================
// BOM
//==============================================================================

/// One populated column of the BOM product-code row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomEntry {
    pub code: String,
    /// `{code}-{n}`, n counting occurrences of `code` within one scan
    pub sequence_label: String,
    pub display_name: String,
}

impl BomEntry {
    pub fn new(code: String, occurrence: usize, display_name: String) -> Self {
        let sequence_label = format!("{}-{}", code, occurrence);
        Self {
            code,
            sequence_label,
            display_name,
        }
    }

    /// Code of the process expanded for this entry
    pub fn process_code(&self) -> String {
        format!("PP-{}", self.sequence_label)
    }

    /// Name of the process expanded for this entry
    pub fn process_name(&self) -> String {
        format!("PP {} {}", self.sequence_label, self.display_name)
    }
}

//==============================================================================
// Expansion results
//==============================================================================

/// Concrete process produced for one BOM entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedProcess {
    pub name: String,
    pub code: String,
    pub workshop_location_name: String,
    pub company_code: String,
    pub status: String,
    pub product_code: String,
}

impl ExpandedProcess {
    pub fn from_template(template: &ProcessTemplate, entry: &BomEntry) -> Self {
        Self {
            name: entry.process_name(),
            code: entry.process_code(),
            workshop_location_name: template.workshop_location_name.clone(),
            company_code: template.company_code.clone(),
            status: template.status.clone(),
            product_code: entry.sequence_label.clone(),
        }
    }
}

/// Template step re-keyed to an expanded process
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedStep {
    pub parent_process_code: String,
    pub name: String,
    pub priority: String,
    pub work_center_code: String,
    pub description: String,
    pub min_capacity_per_cycle: f64,
    pub max_capacity_per_cycle: f64,
    pub duration_per_cycle_seconds: f64,
}
