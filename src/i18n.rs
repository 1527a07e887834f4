//! Greek and English text tables used by prompts, notices and exports.

use crate::schema::{AppraisalPurpose, PropertyCategory, PropertyCondition, PropertyFeature};
use chrono::{Datelike, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema, Default)]
pub enum Locale {
    #[serde(rename = "el")]
    #[default]
    Greek,
    #[serde(rename = "en")]
    English,
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::Greek => "el",
            Locale::English => "en",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "el" | "el-gr" => Some(Locale::Greek),
            "en" | "en-us" => Some(Locale::English),
            _ => None,
        }
    }

    /// Short numeric date in the locale's convention: `d/m/yyyy` for Greek,
    /// `m/d/yyyy` for English. No zero padding.
    pub fn format_date(&self, date: NaiveDate) -> String {
        match self {
            Locale::Greek => format!("{}/{}/{}", date.day(), date.month(), date.year()),
            Locale::English => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        }
    }

    fn pick(&self, el: &'static str, en: &'static str) -> &'static str {
        match self {
            Locale::Greek => el,
            Locale::English => en,
        }
    }
}

/// Fixed UI and document labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    AppTitle,
    PropertyDetails,
    Address,
    Area,
    PropertyType,
    Size,
    ConstructionYear,
    Floor,
    Condition,
    ResidentialPermit,
    Features,
    AppraisalPurpose,
    AdditionalNotes,
    AppraisalReport,
    Yes,
    No,
    None,
    SquareMeters,
    AppraiserInfo,
    AppraisalMethod,
    MarketAnalysis,
    ValueEstimation,
    Conclusions,
    EmptyFieldError,
    FeatureNotAllowed,
    RequiredField,
    ReportTitle,
    PropertyDetail,
    Description,
    Phone,
    Date,
    Page,
    Of,
}

impl Label {
    pub fn text(&self, locale: Locale) -> &'static str {
        match self {
            Label::AppTitle => locale.pick("Εφαρμογή Εκτίμησης Ακινήτων", "Property Appraisal Application"),
            Label::PropertyDetails => locale.pick("Στοιχεία Ακινήτου", "Property Details"),
            Label::Address => locale.pick("Διεύθυνση", "Address"),
            Label::Area => locale.pick("Περιοχή", "Area"),
            Label::PropertyType => locale.pick("Τύπος ακινήτου", "Property Type"),
            Label::Size => locale.pick("Έκταση", "Size"),
            Label::ConstructionYear => locale.pick("Έτος κατασκευής", "Construction Year"),
            Label::Floor => locale.pick("Όροφος", "Floor"),
            Label::Condition => locale.pick("Κατάσταση", "Condition"),
            Label::ResidentialPermit => locale.pick("Άδεια κατοικίας", "Residential Permit"),
            Label::Features => locale.pick("Ειδικά χαρακτηριστικά", "Special Features"),
            Label::AppraisalPurpose => locale.pick("Σκοπός Εκτίμησης", "Appraisal Purpose"),
            Label::AdditionalNotes => locale.pick("Επιπλέον σημειώσεις", "Additional Notes"),
            Label::AppraisalReport => locale.pick("Έκθεση Εκτίμησης", "Appraisal Report"),
            Label::Yes => locale.pick("Ναι", "Yes"),
            Label::No => locale.pick("Όχι", "No"),
            Label::None => locale.pick("Κανένα", "None"),
            Label::SquareMeters => locale.pick("τ.μ.", "sq.m."),
            Label::AppraiserInfo => locale.pick("Στοιχεία Εκτιμητή", "Appraiser Information"),
            Label::AppraisalMethod => locale.pick("Μέθοδος Εκτίμησης", "Appraisal Method"),
            Label::MarketAnalysis => locale.pick("Ανάλυση Αγοράς", "Market Analysis"),
            Label::ValueEstimation => locale.pick("Εκτίμηση Αξίας", "Value Estimation"),
            Label::Conclusions => locale.pick("Συμπεράσματα", "Conclusions"),
            Label::EmptyFieldError => {
                locale.pick("Το πεδίο δεν μπορεί να είναι κενό", "This field cannot be empty")
            }
            Label::FeatureNotAllowed => locale.pick(
                "Το χαρακτηριστικό δεν είναι διαθέσιμο για αυτόν τον τύπο ακινήτου",
                "This feature is not available for this property type",
            ),
            Label::RequiredField => locale.pick("Υποχρεωτικό πεδίο", "Required field"),
            Label::ReportTitle => {
                locale.pick("ΕΚΘΕΣΗ ΕΚΤΙΜΗΣΗΣ ΑΚΙΝΗΤΟΥ", "PROPERTY APPRAISAL REPORT")
            }
            Label::PropertyDetail => locale.pick("Στοιχείο", "Property Detail"),
            Label::Description => locale.pick("Περιγραφή", "Description"),
            Label::Phone => locale.pick("Τηλέφωνο", "Phone"),
            Label::Date => locale.pick("Ημερομηνία", "Date"),
            Label::Page => locale.pick("Σελίδα", "Page"),
            Label::Of => locale.pick("από", "of"),
        }
    }
}

/// Messages pushed to the user-facing notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ParseFallback,
    GenerationFailed,
}

impl Notice {
    pub fn text(&self, locale: Locale) -> &'static str {
        match self {
            Notice::ParseFallback => locale.pick(
                "Σφάλμα κατά την ανάλυση της απάντησης AI.",
                "Error parsing AI response.",
            ),
            Notice::GenerationFailed => locale.pick(
                "Σφάλμα κατά τη δημιουργία της έκθεσης.",
                "Error generating the report.",
            ),
        }
    }
}

/// Display name of an enumerated value in a given locale.
pub trait Localized {
    fn localized(&self, locale: Locale) -> &'static str;
}

impl Localized for PropertyCategory {
    fn localized(&self, locale: Locale) -> &'static str {
        match self {
            PropertyCategory::Residence => locale.pick("Κατοικία", "Residence"),
            PropertyCategory::Office => locale.pick("Γραφείο", "Office"),
            PropertyCategory::Store => locale.pick("Κατάστημα", "Store"),
            PropertyCategory::Land => locale.pick("Οικόπεδο", "Land"),
            PropertyCategory::Other => locale.pick("Άλλο", "Other"),
        }
    }
}

impl Localized for PropertyCondition {
    fn localized(&self, locale: Locale) -> &'static str {
        match self {
            PropertyCondition::New => locale.pick("Νέα", "New"),
            PropertyCondition::Renovated => locale.pick("Ανακαινισμένη", "Renovated"),
            PropertyCondition::Good => locale.pick("Καλή", "Good"),
            PropertyCondition::NeedsRenovation => {
                locale.pick("Χρειάζεται ανακαίνιση", "Needs renovation")
            }
            PropertyCondition::Poor => locale.pick("Κακή", "Poor"),
        }
    }
}

impl Localized for PropertyFeature {
    fn localized(&self, locale: Locale) -> &'static str {
        match self {
            PropertyFeature::Parking => locale.pick("Πάρκινγκ", "Parking"),
            PropertyFeature::Balcony => locale.pick("Μπαλκόνι", "Balcony"),
            PropertyFeature::Garden => locale.pick("Κήπος", "Garden"),
            PropertyFeature::Elevator => locale.pick("Ανελκυστήρας", "Elevator"),
            PropertyFeature::Storage => locale.pick("Αποθήκη", "Storage"),
            PropertyFeature::SecurityDoor => locale.pick("Πόρτα ασφαλείας", "Security door"),
            PropertyFeature::Alarm => locale.pick("Συναγερμός", "Alarm"),
            PropertyFeature::SolarWaterHeater => {
                locale.pick("Ηλιακός θερμοσίφωνας", "Solar water heater")
            }
            PropertyFeature::Fireplace => locale.pick("Τζάκι", "Fireplace"),
            PropertyFeature::AirConditioning => locale.pick("Κλιματισμός", "Air conditioning"),
            PropertyFeature::View => locale.pick("Θέα", "View"),
            PropertyFeature::CornerPlot => locale.pick("Γωνιακό", "Corner Plot"),
            PropertyFeature::NearSea => locale.pick("Κοντά στη θάλασσα", "Near Sea"),
            PropertyFeature::Buildable => locale.pick("Οικοδομήσιμο", "Buildable"),
            PropertyFeature::UtilitiesConnected => {
                locale.pick("Συνδεδεμένες παροχές", "Utilities Connected")
            }
            PropertyFeature::Fenced => locale.pick("Περιφραγμένο", "Fenced"),
        }
    }
}

impl Localized for AppraisalPurpose {
    fn localized(&self, locale: Locale) -> &'static str {
        match self {
            AppraisalPurpose::Sale => locale.pick("Πώληση", "Sale"),
            AppraisalPurpose::Rent => locale.pick("Ενοικίαση", "Rent"),
            AppraisalPurpose::Loan => locale.pick("Δάνειο", "Loan"),
            AppraisalPurpose::Tax => locale.pick("Φορολογικοί σκοποί", "Tax purposes"),
            AppraisalPurpose::Insurance => locale.pick("Ασφάλιση", "Insurance"),
            AppraisalPurpose::Other => locale.pick("Άλλο", "Other"),
        }
    }
}

impl Localized for bool {
    fn localized(&self, locale: Locale) -> &'static str {
        if *self {
            Label::Yes.text(locale)
        } else {
            Label::No.text(locale)
        }
    }
}

/// Features rendered as a comma separated list, or the localized "None".
pub fn features_list(features: &[PropertyFeature], locale: Locale) -> String {
    if features.is_empty() {
        return Label::None.text(locale).to_string();
    }
    features
        .iter()
        .map(|f| f.localized(locale))
        .collect::<Vec<_>>()
        .join(", ")
}
