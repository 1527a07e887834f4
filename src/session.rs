//! The in-memory state behind one appraisal: the record being described,
//! the active locale and the most recent report.

use crate::error::Result;
use crate::i18n::Locale;
use crate::schema::{AppraisalReport, PropertyRecord, ReportSection};
use crate::validation::validate_record;
use log::debug;

#[cfg(feature = "openrouter")]
use crate::llm::{generator::AppraisalGenerator, types::GenerationEvent};
#[cfg(feature = "openrouter")]
use tokio::sync::mpsc::Sender;

#[derive(Debug, Clone)]
pub struct ReportSession {
    pub record: PropertyRecord,
    pub locale: Locale,
    report: Option<AppraisalReport>,
}

impl ReportSession {
    pub fn new(record: PropertyRecord, locale: Locale) -> Self {
        Self {
            record,
            locale,
            report: None,
        }
    }

    pub fn report(&self) -> Option<&AppraisalReport> {
        self.report.as_ref()
    }

    /// Install a report, replacing the current one.
    pub fn accept(&mut self, report: AppraisalReport) -> &AppraisalReport {
        self.report.insert(report)
    }

    /// Replace one section of the current report with user-edited text.
    /// Returns the previous text, or `None` when there is no report yet.
    pub fn edit_section(&mut self, section: ReportSection, text: impl Into<String>) -> Option<String> {
        let report = self.report.as_mut()?;
        debug!("Editing section {}", section.key());
        Some(report.replace_section(section, text))
    }

    /// Validate the record, generate a fresh report and install it.
    ///
    /// Taking `&mut self` means one generation per session at a time. On
    /// error the previous report is left untouched.
    #[cfg(feature = "openrouter")]
    pub async fn regenerate(
        &mut self,
        generator: &AppraisalGenerator,
        credential: &str,
        progress: Option<Sender<GenerationEvent>>,
    ) -> Result<&AppraisalReport> {
        validate_record(&self.record)?;
        let report = generator
            .generate(&self.record, self.locale, credential, progress)
            .await?;
        Ok(self.accept(report))
    }

    pub fn validate(&self) -> Result<()> {
        validate_record(&self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AppraisalPurpose, PropertyCategory};

    fn session() -> ReportSession {
        ReportSession::new(
            PropertyRecord::new("Αγίας Σοφίας 5", "Ξάνθη", PropertyCategory::Other, 40.0, AppraisalPurpose::Insurance),
            Locale::English,
        )
    }

    #[test]
    fn test_edit_without_report_is_noop() {
        let mut s = session();
        assert_eq!(s.edit_section(ReportSection::Conclusions, "x"), None);
        assert!(s.report().is_none());
    }

    #[test]
    fn test_edit_replaces_only_target_section() {
        let mut s = session();
        s.accept(AppraisalReport {
            conclusions: "old".to_string(),
            market_analysis: "market".to_string(),
            ..Default::default()
        });

        let previous = s.edit_section(ReportSection::Conclusions, "new");
        assert_eq!(previous.as_deref(), Some("old"));

        let report = s.report().unwrap();
        assert_eq!(report.conclusions, "new");
        assert_eq!(report.market_analysis, "market");
    }

    #[cfg(feature = "openrouter")]
    #[tokio::test]
    async fn test_failed_regeneration_keeps_previous_report() {
        let mut s = session();
        s.accept(AppraisalReport {
            property_details: "earlier".to_string(),
            ..Default::default()
        });

        let result = s.regenerate(&AppraisalGenerator::default(), "", None).await;
        assert!(result.is_err());
        assert_eq!(s.report().unwrap().property_details, "earlier");
    }
}
