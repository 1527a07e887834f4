// Prompt text for the appraisal request. Output is a pure function of the
// record and locale.

use crate::i18n::{features_list, Label, Locale, Localized};
use crate::schema::PropertyRecord;

const INSTRUCTIONS_EL: &str = r#"Είσαι ένας επαγγελματίας εκτιμητής ακινήτων στην Ελλάδα. Χρησιμοποίησε τις παρακάτω πληροφορίες για να δημιουργήσεις μια επαγγελματική έκθεση εκτίμησης ενός ακινήτου. Η έκθεση θα πρέπει να είναι γραμμένη στα Ελληνικά και με επαγγελματικό ύφος.

Πληροφορίες ακινήτου:
{property_info}

Παρακαλώ δημιούργησε μια έκθεση εκτίμησης που να περιλαμβάνει τα ακόλουθα μέρη (χρησιμοποίησε JSON μορφή για την απάντησή σου με τα ακόλουθα πεδία):

1. "propertyDetails": Περιγραφή του ακινήτου βασισμένη στα στοιχεία
2. "appraisalPurpose": Σκοπός της εκτίμησης
3. "appraisalMethod": Μέθοδος εκτίμησης που χρησιμοποιήθηκε (συγκριτική μέθοδος, μέθοδος εισοδήματος, ή άλλη κατάλληλη)
4. "marketAnalysis": Σύντομη ανάλυση της αγοράς ακινήτων στην περιοχή
5. "valueEstimation": Εκτίμηση της αξίας του ακινήτου (εύρος τιμών)
6. "conclusions": Συμπεράσματα και προτάσεις

Το JSON πρέπει να περιέχει αυτά τα πεδία, με περιεχόμενο 1-2 παραγράφους για κάθε τμήμα. Επίστρεψε ένα μόνο αντικείμενο JSON. Χρησιμοποίησε ρεαλιστικές εκτιμήσεις τιμών για την ελληνική αγορά ακινήτων."#;

const INSTRUCTIONS_EN: &str = r#"You are a professional property appraiser in Greece. Use the following information to create a professional property appraisal report. The report should be written in English with a professional tone.

Property Information:
{property_info}

Please create an appraisal report that includes the following sections (use JSON format for your response with these fields):

1. "propertyDetails": Description of the property based on the provided details
2. "appraisalPurpose": Purpose of the appraisal
3. "appraisalMethod": Appraisal method used (comparative method, income method, or other appropriate)
4. "marketAnalysis": Brief analysis of the real estate market in the area
5. "valueEstimation": Estimate of the property value (price range)
6. "conclusions": Conclusions and recommendations

The JSON should contain these fields, with 1-2 paragraphs of content for each section. Return a single JSON object. Use realistic price estimations for the Greek real estate market."#;

/// Labeled fact lines for the record, one `Label: value` per line.
///
/// Absent optional fields render as an empty value. Notes are only
/// included when non-blank.
pub fn property_info(record: &PropertyRecord, locale: Locale) -> String {
    let mut lines = vec![
        (Label::Address, record.address.clone()),
        (Label::Area, record.area.clone()),
        (Label::PropertyType, record.category.localized(locale).to_string()),
        (
            Label::Size,
            format!("{} {}", record.size, Label::SquareMeters.text(locale)),
        ),
        (
            Label::ConstructionYear,
            record
                .construction_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
        ),
        (Label::Floor, record.floor.clone().unwrap_or_default()),
        (
            Label::Condition,
            record
                .condition
                .map(|c| c.localized(locale).to_string())
                .unwrap_or_default(),
        ),
        (
            Label::ResidentialPermit,
            record
                .residential_permit
                .map(|p| p.localized(locale).to_string())
                .unwrap_or_default(),
        ),
        (Label::Features, features_list(&record.features, locale)),
        (
            Label::AppraisalPurpose,
            record.appraisal_purpose.localized(locale).to_string(),
        ),
    ];

    if let Some(notes) = record.notes() {
        lines.push((Label::AdditionalNotes, notes.to_string()));
    }

    lines
        .into_iter()
        .map(|(label, value)| format!("{}: {}", label.text(locale), value))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(record: &PropertyRecord, locale: Locale) -> String {
    let template = match locale {
        Locale::Greek => INSTRUCTIONS_EL,
        Locale::English => INSTRUCTIONS_EN,
    };
    template.replace("{property_info}", &property_info(record, locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;

    fn sample() -> PropertyRecord {
        PropertyRecord::new(
            "Ορφέως 3",
            "Κομοτηνή",
            PropertyCategory::Residence,
            82.5,
            AppraisalPurpose::Loan,
        )
        .with_building(1998, "3", PropertyCondition::Renovated, true)
        .with_features([PropertyFeature::Elevator, PropertyFeature::AirConditioning])
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let record = sample();
        for locale in [Locale::Greek, Locale::English] {
            assert_eq!(build_prompt(&record, locale), build_prompt(&record, locale));
        }
    }

    #[test]
    fn test_english_prompt_lists_facts_and_sections() {
        let prompt = build_prompt(&sample(), Locale::English);
        assert!(prompt.starts_with("You are a professional property appraiser in Greece."));
        assert!(prompt.contains("Address: Ορφέως 3\n"));
        assert!(prompt.contains("Size: 82.5 sq.m.\n"));
        assert!(prompt.contains("Construction Year: 1998\n"));
        assert!(prompt.contains("Condition: Renovated\n"));
        assert!(prompt.contains("Residential Permit: Yes\n"));
        assert!(prompt.contains("Special Features: Elevator, Air conditioning\n"));
        assert!(prompt.contains("Appraisal Purpose: Loan"));
        assert!(!prompt.contains("Additional Notes"));
        for section in ReportSection::ALL {
            assert!(prompt.contains(&format!("\"{}\":", section.key())));
        }
        assert!(prompt.contains("Greek real estate market"));
    }

    #[test]
    fn test_greek_prompt_uses_greek_labels() {
        let prompt = build_prompt(&sample().with_notes("Θέα στο βουνό"), Locale::Greek);
        assert!(prompt.starts_with("Είσαι ένας επαγγελματίας εκτιμητής ακινήτων"));
        assert!(prompt.contains("Διεύθυνση: Ορφέως 3\n"));
        assert!(prompt.contains("Έκταση: 82.5 τ.μ.\n"));
        assert!(prompt.contains("Άδεια κατοικίας: Ναι\n"));
        assert!(prompt.contains("Επιπλέον σημειώσεις: Θέα στο βουνό"));
    }

    #[test]
    fn test_absent_optionals_render_empty() {
        let land = PropertyRecord::new("Θέση Πλατανιά", "Ξυλαγανή", PropertyCategory::Land, 1200.0, AppraisalPurpose::Sale);
        let info = property_info(&land, Locale::English);
        assert!(info.contains("Construction Year: \n"));
        assert!(info.contains("Floor: \n"));
        assert!(info.contains("Condition: \n"));
        assert!(info.contains("Special Features: None\n"));
        assert!(info.contains("Size: 1200 sq.m."));
    }
}
