//! # Property Appraisal
//!
//! Turns a description of a property into a narrative appraisal report
//! written by a hosted large language model, and exports it as a document.
//!
//! ## Core Concepts
//!
//! - **Property Record**: the attributes collected by the form (category, size, features, purpose)
//! - **Prompt**: a deterministic Greek or English instruction asking for six named sections as JSON
//! - **Recovery**: the model answer is free text; the JSON payload is located and decoded, and
//!   when that fails the whole answer is kept in the first section so nothing is lost
//! - **Report**: six narrative sections plus the appraiser block, always present as strings
//! - **Export**: a Typst template compiled to PDF in memory, or the raw data as JSON
//!
//! ## Example
//!
//! ```rust,ignore
//! use property_appraisal::*;
//!
//! let record = PropertyRecord::new(
//!     "Λεωφόρος Κύπρου 12",
//!     "Κομοτηνή",
//!     PropertyCategory::Residence,
//!     95.0,
//!     AppraisalPurpose::Sale,
//! )
//! .with_building(2004, "2", PropertyCondition::Good, true)
//! .with_features([PropertyFeature::Balcony, PropertyFeature::Parking]);
//!
//! validate_record(&record)?;
//!
//! let config = AppraisalConfig::from_env()?;
//! let report = AppraisalGenerator::from_config(&config)
//!     .generate(&record, Locale::English, config.credential(), None)
//!     .await?;
//!
//! println!("{}", report.value_estimation);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod i18n;
pub mod llm;
pub mod schema;
pub mod session;
pub mod validation;

pub use config::AppraisalConfig;
pub use error::{AppraisalError, Result};
pub use export::{
    export, export_file_name, render_json, render_pdf, template_inputs, ExportFormat,
    ExportedDocument, PdfRenderer, RenderedPdf,
};
pub use i18n::{Label, Locale, Localized, Notice};
pub use llm::prompts::build_prompt;
pub use llm::recovery::{recover, recover_at, recover_with_outcome, RecoveredReport, RecoveryOutcome};
pub use llm::types::GenerationEvent;
#[cfg(feature = "openrouter")]
pub use llm::{generate_appraisal_report, AppraisalGenerator, OpenRouterClient};
pub use schema::*;
pub use session::ReportSession;
pub use validation::{set_category, toggle_feature, validate_record, validate_step, FieldError, WizardStep};
