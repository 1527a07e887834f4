//! Printable export of a finished appraisal.
//!
//! The PDF is compiled from a Typst template: centered title, a two-column
//! property table, one titled block per section, the appraiser block, and a
//! "Page i of n" footer on every page. A JSON export carries the same data.

mod pdf;
mod world;

pub use pdf::{PdfRenderer, RenderedPdf};

use crate::error::Result;
use crate::i18n::{features_list, Label, Locale, Localized};
use crate::schema::{AppraisalReport, PropertyCategory, PropertyRecord};
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Json => "application/json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("Unknown export format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub format: ExportFormat,
    pub data: Vec<u8>,
    pub page_count: usize,
}

impl ExportedDocument {
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.data)?;
        info!(
            "Exported appraisal to {} ({})",
            path.display(),
            self.format.mime_type()
        );
        Ok(path)
    }
}

/// `Property_Appraisal_2025-01-09.pdf` or the Greek equivalent.
pub fn export_file_name(locale: Locale, date: NaiveDate, format: ExportFormat) -> String {
    let stem = match locale {
        Locale::Greek => "Εκτίμηση_Ακινήτου",
        Locale::English => "Property_Appraisal",
    };
    format!("{}_{}.{}", stem, date.format("%Y-%m-%d"), format.extension())
}

/// Rows of the property table, in display order.
pub fn property_rows(record: &PropertyRecord, locale: Locale) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        (Label::Address.text(locale), record.address.clone()),
        (Label::Area.text(locale), record.area.clone()),
        (
            Label::PropertyType.text(locale),
            record.category.localized(locale).to_string(),
        ),
        (
            Label::Size.text(locale),
            format!("{} {}", record.size, Label::SquareMeters.text(locale)),
        ),
    ];

    if record.category.is_building() {
        rows.push((
            Label::ConstructionYear.text(locale),
            record.construction_year.map(|y| y.to_string()).unwrap_or_default(),
        ));
        rows.push((Label::Floor.text(locale), record.floor.clone().unwrap_or_default()));
        rows.push((
            Label::Condition.text(locale),
            record
                .condition
                .map(|c| c.localized(locale).to_string())
                .unwrap_or_default(),
        ));
        rows.push((
            Label::ResidentialPermit.text(locale),
            record
                .residential_permit
                .unwrap_or(false)
                .localized(locale)
                .to_string(),
        ));
    }

    if record.category != PropertyCategory::Other {
        rows.push((
            Label::Features.text(locale),
            features_list(&record.features, locale),
        ));
    }

    rows.push((
        Label::AppraisalPurpose.text(locale),
        record.appraisal_purpose.localized(locale).to_string(),
    ));

    if let Some(notes) = record.notes() {
        rows.push((Label::AdditionalNotes.text(locale), notes.to_string()));
    }

    rows
}

/// Everything the report template reads from `sys.inputs`, localized.
pub fn template_inputs(
    record: &PropertyRecord,
    report: &AppraisalReport,
    locale: Locale,
) -> serde_json::Value {
    let rows: Vec<_> = property_rows(record, locale)
        .into_iter()
        .map(|(label, value)| json!({ "label": label, "value": value }))
        .collect();
    let sections: Vec<_> = report
        .sections()
        .map(|(section, body)| json!({ "title": section.title(locale), "body": body }))
        .collect();

    json!({
        "lang": locale.tag(),
        "title": Label::ReportTitle.text(locale),
        "labels": {
            "property_details": Label::PropertyDetails.text(locale),
            "detail": Label::PropertyDetail.text(locale),
            "description": Label::Description.text(locale),
            "appraiser": Label::AppraiserInfo.text(locale),
            "phone": Label::Phone.text(locale),
            "date": Label::Date.text(locale),
            "page": Label::Page.text(locale),
            "of": Label::Of.text(locale),
        },
        "rows": rows,
        "sections": sections,
        "appraiser": {
            "name": report.appraiser.name,
            "title": report.appraiser.title,
            "contact": report.appraiser.contact,
            "date": report.appraiser.date,
        },
    })
}

pub fn render_pdf(
    record: &PropertyRecord,
    report: &AppraisalReport,
    locale: Locale,
    date: NaiveDate,
) -> Result<ExportedDocument> {
    let pdf = PdfRenderer::default().render(&template_inputs(record, report, locale), date)?;
    Ok(ExportedDocument {
        file_name: export_file_name(locale, date, ExportFormat::Pdf),
        format: ExportFormat::Pdf,
        data: pdf.bytes,
        page_count: pdf.page_count,
    })
}

#[derive(Serialize)]
struct JsonExport<'a> {
    locale: Locale,
    property: &'a PropertyRecord,
    report: &'a AppraisalReport,
}

pub fn render_json(
    record: &PropertyRecord,
    report: &AppraisalReport,
    locale: Locale,
    date: NaiveDate,
) -> Result<ExportedDocument> {
    let body = serde_json::to_string_pretty(&JsonExport {
        locale,
        property: record,
        report,
    })?;
    Ok(ExportedDocument {
        file_name: export_file_name(locale, date, ExportFormat::Json),
        format: ExportFormat::Json,
        data: body.into_bytes(),
        page_count: 1,
    })
}

pub fn export(
    record: &PropertyRecord,
    report: &AppraisalReport,
    locale: Locale,
    date: NaiveDate,
    format: ExportFormat,
) -> Result<ExportedDocument> {
    match format {
        ExportFormat::Pdf => render_pdf(record, report, locale, date),
        ExportFormat::Json => render_json(record, report, locale, date),
    }
}
