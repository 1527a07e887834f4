use crate::error::{AppraisalError, Result};
use crate::i18n::{Locale, Notice};
use crate::schema::{AppraisalReport, AppraiserIdentity, ReportSection};
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use serde_json::{Map, Value};

pub const APPRAISER_NAME: &str = "Παπαδόπουλος Ιωάννης";
pub const APPRAISER_CONTACT: &str = "25410 67199";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryOutcome {
    /// A structured payload was found and mapped onto the report.
    Parsed,
    /// No usable payload; the raw text was kept in the first section.
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredReport {
    pub report: AppraisalReport,
    pub outcome: RecoveryOutcome,
}

impl RecoveredReport {
    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, RecoveryOutcome::Fallback { .. })
    }

    /// Localized notice to show the user, if any.
    pub fn notice(&self, locale: Locale) -> Option<&'static str> {
        self.is_fallback().then(|| Notice::ParseFallback.text(locale))
    }
}

/// The fixed appraiser block attached to every report.
pub fn appraiser_identity(locale: Locale, date: NaiveDate) -> AppraiserIdentity {
    let title = match locale {
        Locale::Greek => "Εκτιμητής ακινήτων με έδρα την Ελλάδα",
        Locale::English => "Property Appraiser based in Greece",
    };
    AppraiserIdentity {
        name: APPRAISER_NAME.to_string(),
        title: title.to_string(),
        contact: APPRAISER_CONTACT.to_string(),
        date: locale.format_date(date),
    }
}

/// Turn a raw completion into a report dated today. Never fails.
pub fn recover(raw: &str, locale: Locale) -> AppraisalReport {
    recover_at(raw, locale, Local::now().date_naive())
}

pub fn recover_at(raw: &str, locale: Locale, date: NaiveDate) -> AppraisalReport {
    recover_with_outcome(raw, locale, date).report
}

pub fn recover_with_outcome(raw: &str, locale: Locale, date: NaiveDate) -> RecoveredReport {
    let appraiser = appraiser_identity(locale, date);

    match extract_payload(raw) {
        Ok(payload) => {
            let mut report = AppraisalReport {
                appraiser,
                ..Default::default()
            };
            for section in ReportSection::ALL {
                *report.section_mut(section) = section_text(payload.get(section.key()));
            }
            debug!(
                "Recovered structured payload with {} of {} sections present",
                ReportSection::ALL
                    .iter()
                    .filter(|s| payload.contains_key(s.key()))
                    .count(),
                ReportSection::ALL.len()
            );
            RecoveredReport {
                report,
                outcome: RecoveryOutcome::Parsed,
            }
        }
        Err(e) => {
            warn!("Error parsing AI response, keeping raw text: {}", e);
            RecoveredReport {
                report: AppraisalReport {
                    property_details: raw.to_string(),
                    appraiser,
                    ..Default::default()
                },
                outcome: RecoveryOutcome::Fallback {
                    reason: e.to_string(),
                },
            }
        }
    }
}

/// Span from the first `{` to the last `}` inclusive, if the last comes after the first.
pub fn outer_brace_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Balanced `{...}` objects in order of their opening brace. Braces inside
/// JSON strings are ignored.
fn balanced_objects(raw: &str) -> impl Iterator<Item = &str> + '_ {
    raw.char_indices()
        .filter(|(_, ch)| *ch == '{')
        .filter_map(move |(start, _)| balanced_from(&raw[start..]))
}

fn balanced_from(candidate: &str) -> Option<&str> {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape = false;

    for (i, ch) in candidate.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        if ch == '\\' && in_string {
            escape = true;
            continue;
        }
        if ch == '"' {
            in_string = !in_string;
            continue;
        }
        if in_string {
            continue;
        }
        if ch == '{' {
            depth += 1;
        } else if ch == '}' {
            depth -= 1;
            if depth == 0 {
                return Some(&candidate[..=i]);
            }
        }
    }
    None
}

fn decode_object(span: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(span)? {
        Value::Object(map) => Ok(map),
        other => Err(AppraisalError::MalformedPayload(format!(
            "expected a JSON object, found {}",
            other
        ))),
    }
}

/// Locate and decode the structured payload.
///
/// The outer brace span is tried first. When it does not decode (stray
/// braces in surrounding prose), each balanced object is tried in turn, and
/// only one carrying at least one section key is accepted.
pub fn extract_payload(raw: &str) -> Result<Map<String, Value>> {
    let span = outer_brace_span(raw)
        .ok_or_else(|| AppraisalError::MalformedPayload("JSON not found in response".to_string()))?;

    let first_error = match decode_object(span) {
        Ok(map) => return Ok(map),
        Err(e) => e,
    };

    balanced_objects(raw)
        .filter_map(|candidate| decode_object(candidate).ok())
        .find(has_section_key)
        .ok_or_else(|| AppraisalError::MalformedPayload(first_error.to_string()))
}

fn has_section_key(map: &Map<String, Value>) -> bool {
    ReportSection::ALL.iter().any(|s| map.contains_key(s.key()))
}

fn section_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| section_text(Some(item)))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n"),
        Some(Value::Object(map)) => {
            serde_json::to_string_pretty(map).unwrap_or_default()
        }
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 9).unwrap()
    }

    fn full_payload() -> Value {
        json!({
            "propertyDetails": "S1",
            "appraisalPurpose": "S2",
            "appraisalMethod": "S3",
            "marketAnalysis": "S4",
            "valueEstimation": "S5",
            "conclusions": "S6"
        })
    }

    fn assert_identity(report: &AppraisalReport) {
        assert_eq!(report.appraiser.name, APPRAISER_NAME);
        assert_eq!(report.appraiser.contact, APPRAISER_CONTACT);
        assert!(!report.appraiser.title.is_empty());
        assert!(!report.appraiser.date.is_empty());
    }

    #[test]
    fn test_extracts_payload_between_commentary() {
        let raw = format!(
            "Here is the report you asked for:\n```json\n{}\n```\nLet me know if you need changes.",
            full_payload()
        );
        let recovered = recover_with_outcome(&raw, Locale::English, date());
        assert_eq!(recovered.outcome, RecoveryOutcome::Parsed);
        let values: Vec<_> = recovered.report.sections().map(|(_, t)| t.to_string()).collect();
        assert_eq!(values, vec!["S1", "S2", "S3", "S4", "S5", "S6"]);
        assert_eq!(recovered.notice(Locale::English), None);
        assert_identity(&recovered.report);
    }

    #[test]
    fn test_missing_key_becomes_empty() {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove("marketAnalysis");
        let report = recover_at(&payload.to_string(), Locale::Greek, date());
        assert_eq!(report.market_analysis, "");
        assert_eq!(report.property_details, "S1");
        assert_eq!(report.conclusions, "S6");
    }

    #[test]
    fn test_no_braces_falls_back_to_raw_text() {
        let raw = "Sorry, I cannot help.";
        let recovered = recover_with_outcome(raw, Locale::English, date());
        assert!(recovered.is_fallback());
        assert_eq!(recovered.report.property_details, raw);
        for section in &ReportSection::ALL[1..] {
            assert_eq!(recovered.report.section(*section), "");
        }
        assert_eq!(
            recovered.notice(Locale::English),
            Some("Error parsing AI response.")
        );
        assert_eq!(
            recovered.notice(Locale::Greek),
            Some("Σφάλμα κατά την ανάλυση της απάντησης AI.")
        );
        assert_identity(&recovered.report);
    }

    #[test]
    fn test_reversed_braces_fall_back() {
        let raw = "} nothing here {";
        let recovered = recover_with_outcome(raw, Locale::English, date());
        assert!(recovered.is_fallback());
        assert_eq!(recovered.report.property_details, raw);
    }

    #[test]
    fn test_malformed_json_keeps_whole_text() {
        let raw = "Report: {\"propertyDetails\": \"unterminated }";
        let recovered = recover_with_outcome(raw, Locale::English, date());
        assert!(recovered.is_fallback());
        assert_eq!(recovered.report.property_details, raw);
    }

    #[test]
    fn test_empty_input_is_total() {
        let report = recover_at("", Locale::English, date());
        assert_eq!(report.property_details, "");
        assert_identity(&report);
    }

    #[test]
    fn test_unrelated_json_yields_blank_sections() {
        let recovered = recover_with_outcome(r#"{"answer": 42}"#, Locale::English, date());
        assert_eq!(recovered.outcome, RecoveryOutcome::Parsed);
        assert!(recovered.report.sections().all(|(_, t)| t.is_empty()));
    }

    #[test]
    fn test_stray_brace_in_postamble_still_parses() {
        let raw = format!("{} Note: prices exclude VAT }}", full_payload());
        let recovered = recover_with_outcome(&raw, Locale::English, date());
        assert_eq!(recovered.outcome, RecoveryOutcome::Parsed);
        assert_eq!(recovered.report.conclusions, "S6");
    }

    #[test]
    fn test_braces_inside_section_text() {
        let payload = json!({ "propertyDetails": "Layout {2 bedrooms}", "conclusions": "ok" });
        let raw = format!("{{draft}} then {}", payload);
        let report = recover_at(&raw, Locale::English, date());
        assert_eq!(report.property_details, "Layout {2 bedrooms}");
        assert_eq!(report.conclusions, "ok");
    }

    #[test]
    fn test_quoted_object_in_broken_payload_keeps_whole_text() {
        let raw = r#"Here you go: {"propertyDetails": "The seller wrote {"note": "urgent"} on the listing", "conclusions": "Sell"} thanks"#;
        let recovered = recover_with_outcome(raw, Locale::English, date());
        assert!(recovered.is_fallback());
        assert_eq!(recovered.report.property_details, raw);
        assert_eq!(recovered.report.conclusions, "");
        assert_eq!(
            recovered.notice(Locale::English),
            Some("Error parsing AI response.")
        );
    }

    #[test]
    fn test_retry_skips_objects_without_section_keys() {
        let payload = json!({ "conclusions": "Sell" });
        let raw = format!("{{\"meta\": 1}} broken {{ then {}", payload);
        let map = extract_payload(&raw).unwrap();
        assert_eq!(map.get("conclusions"), Some(&json!("Sell")));
        assert!(!map.contains_key("meta"));
    }

    #[test]
    fn test_non_string_values_are_rendered() {
        let raw = json!({
            "valueEstimation": 185000,
            "marketAnalysis": ["First paragraph.", "Second paragraph."],
            "conclusions": null
        })
        .to_string();
        let report = recover_at(&raw, Locale::English, date());
        assert_eq!(report.value_estimation, "185000");
        assert_eq!(report.market_analysis, "First paragraph.\n\nSecond paragraph.");
        assert_eq!(report.conclusions, "");
    }

    #[test]
    fn test_identity_is_localized() {
        let el = appraiser_identity(Locale::Greek, date());
        let en = appraiser_identity(Locale::English, date());
        assert_eq!(el.date, "9/1/2025");
        assert_eq!(en.date, "1/9/2025");
        assert_eq!(el.title, "Εκτιμητής ακινήτων με έδρα την Ελλάδα");
        assert_eq!(en.title, "Property Appraiser based in Greece");
        assert_eq!(el.name, en.name);
    }

    #[test]
    fn test_outer_span() {
        assert_eq!(outer_brace_span("a {b} c {d} e"), Some("{b} c {d}"));
        assert_eq!(outer_brace_span("no braces"), None);
        assert_eq!(outer_brace_span("}{"), None);
    }
}
