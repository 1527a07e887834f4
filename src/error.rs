use crate::i18n::{Label, Locale};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppraisalError {
    #[error("API key is missing")]
    MissingCredential,

    #[error("API request failed with status {status}: {body}")]
    UpstreamRequestFailed { status: u16, body: String },

    #[error("Unexpected response from the model endpoint: {0}")]
    InvalidResponse(String),

    #[error("Malformed structured payload: {0}")]
    MalformedPayload(String),

    #[error("Validation failed for field '{field}': {details}")]
    Validation { field: String, details: String },

    #[error("Feature '{feature}' is not allowed for property category '{category}'")]
    FeatureNotAllowed { feature: String, category: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Document rendering failed: {0}")]
    Render(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppraisalError {
    /// Message suitable for the user-facing notification channel.
    pub fn user_message(&self, locale: Locale) -> String {
        match (self, locale) {
            (Self::MissingCredential, Locale::Greek) => {
                "Παρακαλώ εισάγετε το κλειδί API του OpenRouter.".to_string()
            }
            (Self::MissingCredential, Locale::English) => {
                "Please enter your OpenRouter API key.".to_string()
            }
            (Self::Validation { .. }, _) => Label::EmptyFieldError.text(locale).to_string(),
            (Self::FeatureNotAllowed { feature, .. }, _) => {
                format!("{}: {}", Label::FeatureNotAllowed.text(locale), feature)
            }
            (other, Locale::Greek) => {
                format!("Σφάλμα κατά τη δημιουργία της έκθεσης: {}", other)
            }
            (other, Locale::English) => format!("Error generating the report: {}", other),
        }
    }
}

#[cfg(feature = "openrouter")]
impl From<reqwest::Error> for AppraisalError {
    fn from(err: reqwest::Error) -> Self {
        AppraisalError::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppraisalError>;
