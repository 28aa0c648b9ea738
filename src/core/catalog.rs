//! Lookup tables over the extracted templates

use crate::types::{ProcessTemplate, SheetTemplate, StepTemplate};
use std::collections::HashMap;
use tracing::warn;

/// Templates indexed by product code, steps indexed by process code
#[derive(Debug, Default)]
pub struct TemplateCatalog {
    templates: Vec<ProcessTemplate>,
    /// product_code -> index into `templates` (first declaration wins)
    by_product_code: HashMap<String, usize>,
    /// process code -> steps in extraction order
    steps_by_code: HashMap<String, Vec<StepTemplate>>,
}

impl TemplateCatalog {
    /// Index sheets in extraction order
    pub fn build(sheets: Vec<SheetTemplate>) -> Self {
        let mut catalog = Self::default();

        for sheet in sheets {
            let index = catalog.templates.len();
            let product_code = sheet.process.product_code.clone();

            match catalog.by_product_code.get(&product_code) {
                Some(&first) => {
                    if !product_code.is_empty() {
                        warn!(
                            product_code = %product_code,
                            kept = %catalog.templates[first].code,
                            ignored = %sheet.process.code,
                            "product code declared by more than one template"
                        );
                    }
                }
                None => {
                    catalog.by_product_code.insert(product_code, index);
                }
            }

            for step in sheet.steps {
                catalog
                    .steps_by_code
                    .entry(step.parent_process_code.clone())
                    .or_default()
                    .push(step);
            }

            catalog.templates.push(sheet.process);
        }

        catalog
    }

    /// Template declaring `product_code`, if any
    pub fn lookup(&self, product_code: &str) -> Option<&ProcessTemplate> {
        self.by_product_code
            .get(product_code)
            .map(|&index| &self.templates[index])
    }

    /// Steps whose parent is the process `code`
    pub fn steps_for(&self, code: &str) -> &[StepTemplate] {
        self.steps_by_code
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn templates(&self) -> &[ProcessTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
