use crate::config::AppraisalConfig;
use crate::error::{AppraisalError, Result};
use crate::i18n::{Locale, Notice};
use crate::llm::client::OpenRouterClient;
use crate::llm::prompts::build_prompt;
use crate::llm::recovery::recover_with_outcome;
use crate::llm::types::GenerationEvent;
use crate::schema::{AppraisalReport, PropertyRecord};
use chrono::Local;
use log::{error, info};
use tokio::sync::mpsc::Sender;

/// Prompt, one model call, recovery. Holds no state between calls.
#[derive(Clone, Default)]
pub struct AppraisalGenerator {
    client: OpenRouterClient,
}

impl AppraisalGenerator {
    pub fn new(client: OpenRouterClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &AppraisalConfig) -> Self {
        Self::new(OpenRouterClient::from_config(config))
    }

    /// Generate a report for `record`.
    ///
    /// Only transport failures (missing credential, upstream error) are
    /// returned as errors; an unparseable answer still yields a report.
    pub async fn generate(
        &self,
        record: &PropertyRecord,
        locale: Locale,
        credential: &str,
        progress: Option<Sender<GenerationEvent>>,
    ) -> Result<AppraisalReport> {
        self.send_event(&progress, GenerationEvent::Starting).await;

        match self.run(record, locale, credential, &progress).await {
            Ok(report) => {
                self.send_event(&progress, GenerationEvent::Success).await;
                Ok(report)
            }
            Err(e) => {
                error!("Error generating appraisal report: {}", e);
                self.send_event(
                    &progress,
                    GenerationEvent::Failed {
                        reason: e.user_message(locale),
                    },
                )
                .await;
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        record: &PropertyRecord,
        locale: Locale,
        credential: &str,
        progress: &Option<Sender<GenerationEvent>>,
    ) -> Result<AppraisalReport> {
        if credential.trim().is_empty() {
            return Err(AppraisalError::MissingCredential);
        }

        let prompt = build_prompt(record, locale);
        info!(
            "Requesting {} appraisal for {} ({}) from {}",
            locale.tag(),
            record.address,
            record.category.as_str(),
            self.client.model()
        );

        self.send_event(
            progress,
            GenerationEvent::RequestSent {
                model: self.client.model().to_string(),
            },
        )
        .await;

        let raw = self.client.complete(&prompt, credential).await?;

        self.send_event(progress, GenerationEvent::ProcessingResponse)
            .await;

        let recovered = recover_with_outcome(&raw, locale, Local::now().date_naive());
        if recovered.is_fallback() {
            self.send_event(
                progress,
                GenerationEvent::Notice {
                    message: Notice::ParseFallback.text(locale).to_string(),
                },
            )
            .await;
        }

        Ok(recovered.report)
    }

    async fn send_event(&self, sender: &Option<Sender<GenerationEvent>>, event: GenerationEvent) {
        if let Some(tx) = sender {
            let _ = tx.send(event).await;
        }
    }
}

/// One-shot helper using the default endpoint and model.
pub async fn generate_appraisal_report(
    record: &PropertyRecord,
    locale: Locale,
    credential: &str,
) -> Result<AppraisalReport> {
    AppraisalGenerator::default()
        .generate(record, locale, credential, None)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AppraisalPurpose, PropertyCategory};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_missing_credential_fails_before_network() {
        // Unroutable base URL: any request attempt would surface as Http, not MissingCredential.
        let generator =
            AppraisalGenerator::new(OpenRouterClient::new().with_base_url("http://127.0.0.1:9"));
        let record = PropertyRecord::new("a", "b", PropertyCategory::Other, 10.0, AppraisalPurpose::Tax);
        let (tx, mut rx) = mpsc::channel(8);

        let result = generator.generate(&record, Locale::Greek, "  ", Some(tx)).await;
        assert!(matches!(result, Err(AppraisalError::MissingCredential)));

        assert!(matches!(rx.recv().await, Some(GenerationEvent::Starting)));
        match rx.recv().await {
            Some(GenerationEvent::Failed { reason }) => {
                assert_eq!(reason, "Παρακαλώ εισάγετε το κλειδί API του OpenRouter.")
            }
            other => panic!("expected Failed event, got {:?}", other),
        }
        assert!(rx.recv().await.is_none());
    }
}
