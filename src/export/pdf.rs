use super::world::ReportWorld;
use crate::error::{AppraisalError, Result};
use chrono::NaiveDate;
use log::{debug, warn};
use typst::diag::SourceDiagnostic;
use typst::model::Document;

const APPRAISAL_TEMPLATE: &str = include_str!("../../templates/appraisal.typ");

/// A compiled PDF and its page count.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Compiles Typst templates to PDF entirely in memory.
pub struct PdfRenderer {
    template: String,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new(APPRAISAL_TEMPLATE)
    }
}

impl PdfRenderer {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// `inputs` is exposed to the template as `sys.inputs`; `today` backs
    /// the document date.
    pub fn render(&self, inputs: &serde_json::Value, today: NaiveDate) -> Result<RenderedPdf> {
        let world = ReportWorld::new(&self.template, inputs, today);
        let warned = typst::compile(&world);

        if !warned.warnings.is_empty() {
            warn!("Template compiled with warnings: {}", join_messages(&warned.warnings));
        }

        let document: Document = warned
            .output
            .map_err(|diagnostics| AppraisalError::Render(join_messages(&diagnostics)))?;

        let bytes = typst_pdf::pdf(&document, &typst_pdf::PdfOptions::default())
            .map_err(|diagnostics| {
                AppraisalError::Render(format!("PDF export failed: {}", join_messages(&diagnostics)))
            })?;

        debug!(
            "Rendered {} page(s), {} bytes",
            document.pages.len(),
            bytes.len()
        );
        Ok(RenderedPdf {
            bytes,
            page_count: document.pages.len(),
        })
    }
}

fn join_messages(diagnostics: &[SourceDiagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.message.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
