use crate::i18n::{Label, Locale};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    #[schemars(description = "Dwelling: apartment, house or maisonette")]
    Residence,
    #[schemars(description = "Office space in a commercial or mixed-use building")]
    Office,
    #[schemars(description = "Retail unit or shop")]
    Store,
    #[schemars(description = "Plot of land, with or without building rights")]
    Land,
    #[schemars(description = "Anything that fits none of the other categories")]
    Other,
}

impl PropertyCategory {
    pub const ALL: [PropertyCategory; 5] = [
        PropertyCategory::Residence,
        PropertyCategory::Office,
        PropertyCategory::Store,
        PropertyCategory::Land,
        PropertyCategory::Other,
    ];

    /// Buildings carry construction year, floor, condition and permit.
    pub fn is_building(&self) -> bool {
        !matches!(self, PropertyCategory::Land | PropertyCategory::Other)
    }

    /// Feature tags that may be attached to a record of this category.
    pub fn allowed_features(&self) -> &'static [PropertyFeature] {
        use PropertyFeature::*;
        match self {
            PropertyCategory::Land => &[
                View,
                CornerPlot,
                NearSea,
                Buildable,
                UtilitiesConnected,
                Fenced,
                Parking,
            ],
            PropertyCategory::Other => &[],
            PropertyCategory::Residence | PropertyCategory::Office | PropertyCategory::Store => &[
                Parking,
                Balcony,
                Garden,
                Elevator,
                Storage,
                SecurityDoor,
                Alarm,
                SolarWaterHeater,
                Fireplace,
                AirConditioning,
            ],
        }
    }

    pub fn allows(&self, feature: PropertyFeature) -> bool {
        self.allowed_features().contains(&feature)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyCategory::Residence => "residence",
            PropertyCategory::Office => "office",
            PropertyCategory::Store => "store",
            PropertyCategory::Land => "land",
            PropertyCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCondition {
    New,
    Renovated,
    Good,
    NeedsRenovation,
    Poor,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PropertyFeature {
    Parking,
    Balcony,
    Garden,
    Elevator,
    Storage,
    SecurityDoor,
    Alarm,
    SolarWaterHeater,
    Fireplace,
    AirConditioning,
    View,
    CornerPlot,
    NearSea,
    Buildable,
    UtilitiesConnected,
    Fenced,
}

impl PropertyFeature {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyFeature::Parking => "parking",
            PropertyFeature::Balcony => "balcony",
            PropertyFeature::Garden => "garden",
            PropertyFeature::Elevator => "elevator",
            PropertyFeature::Storage => "storage",
            PropertyFeature::SecurityDoor => "security_door",
            PropertyFeature::Alarm => "alarm",
            PropertyFeature::SolarWaterHeater => "solar_water_heater",
            PropertyFeature::Fireplace => "fireplace",
            PropertyFeature::AirConditioning => "air_conditioning",
            PropertyFeature::View => "view",
            PropertyFeature::CornerPlot => "corner_plot",
            PropertyFeature::NearSea => "near_sea",
            PropertyFeature::Buildable => "buildable",
            PropertyFeature::UtilitiesConnected => "utilities_connected",
            PropertyFeature::Fenced => "fenced",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppraisalPurpose {
    #[default]
    Sale,
    Rent,
    Loan,
    Tax,
    Insurance,
    Other,
}

/// Attributes of the subject property, collected across the form steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub address: String,

    #[schemars(description = "Neighbourhood, town or municipality")]
    pub area: String,

    #[serde(rename = "propertyType")]
    pub category: PropertyCategory,

    #[schemars(description = "Floor area (buildings) or plot size (land) in square metres")]
    pub size: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<PropertyCondition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residential_permit: Option<bool>,

    #[serde(default)]
    pub features: Vec<PropertyFeature>,

    pub appraisal_purpose: AppraisalPurpose,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl PropertyRecord {
    pub fn new(
        address: impl Into<String>,
        area: impl Into<String>,
        category: PropertyCategory,
        size: f64,
        appraisal_purpose: AppraisalPurpose,
    ) -> Self {
        Self {
            address: address.into(),
            area: area.into(),
            category,
            size,
            construction_year: None,
            floor: None,
            condition: None,
            residential_permit: None,
            features: Vec::new(),
            appraisal_purpose,
            additional_notes: None,
        }
    }

    pub fn with_building(
        mut self,
        construction_year: i32,
        floor: impl Into<String>,
        condition: PropertyCondition,
        residential_permit: bool,
    ) -> Self {
        self.construction_year = Some(construction_year);
        self.floor = Some(floor.into());
        self.condition = Some(condition);
        self.residential_permit = Some(residential_permit);
        self
    }

    pub fn with_features(mut self, features: impl IntoIterator<Item = PropertyFeature>) -> Self {
        self.features = features.into_iter().collect();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.additional_notes = Some(notes.into());
        self
    }

    /// Notes trimmed to `None` when blank.
    pub fn notes(&self) -> Option<&str> {
        self.additional_notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

/// The six narrative sections of a report. Closed set, in document order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ReportSection {
    PropertyDetails,
    AppraisalPurpose,
    AppraisalMethod,
    MarketAnalysis,
    ValueEstimation,
    Conclusions,
}

impl ReportSection {
    pub const ALL: [ReportSection; 6] = [
        ReportSection::PropertyDetails,
        ReportSection::AppraisalPurpose,
        ReportSection::AppraisalMethod,
        ReportSection::MarketAnalysis,
        ReportSection::ValueEstimation,
        ReportSection::Conclusions,
    ];

    /// Key of this section in the structured payload.
    pub fn key(&self) -> &'static str {
        match self {
            ReportSection::PropertyDetails => "propertyDetails",
            ReportSection::AppraisalPurpose => "appraisalPurpose",
            ReportSection::AppraisalMethod => "appraisalMethod",
            ReportSection::MarketAnalysis => "marketAnalysis",
            ReportSection::ValueEstimation => "valueEstimation",
            ReportSection::Conclusions => "conclusions",
        }
    }

    pub fn title(&self, locale: Locale) -> &'static str {
        let label = match self {
            ReportSection::PropertyDetails => Label::PropertyDetails,
            ReportSection::AppraisalPurpose => Label::AppraisalPurpose,
            ReportSection::AppraisalMethod => Label::AppraisalMethod,
            ReportSection::MarketAnalysis => Label::MarketAnalysis,
            ReportSection::ValueEstimation => Label::ValueEstimation,
            ReportSection::Conclusions => Label::Conclusions,
        };
        label.text(locale)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema, Default)]
pub struct AppraiserIdentity {
    pub name: String,
    pub title: String,
    #[schemars(description = "Phone number of the appraiser")]
    pub contact: String,
    #[schemars(description = "Report date, already formatted for the report locale")]
    pub date: String,
}

/// Generated appraisal. Every field is always a string, possibly empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppraisalReport {
    #[schemars(description = "Description of the property based on the provided details")]
    pub property_details: String,

    #[schemars(description = "Purpose of the appraisal")]
    pub appraisal_purpose: String,

    #[schemars(
        description = "Appraisal method used (comparative method, income method, or other appropriate)"
    )]
    pub appraisal_method: String,

    #[schemars(description = "Brief analysis of the real estate market in the area")]
    pub market_analysis: String,

    #[schemars(description = "Estimate of the property value (price range)")]
    pub value_estimation: String,

    #[schemars(description = "Conclusions and recommendations")]
    pub conclusions: String,

    pub appraiser: AppraiserIdentity,
}

impl AppraisalReport {
    pub fn section(&self, section: ReportSection) -> &str {
        match section {
            ReportSection::PropertyDetails => &self.property_details,
            ReportSection::AppraisalPurpose => &self.appraisal_purpose,
            ReportSection::AppraisalMethod => &self.appraisal_method,
            ReportSection::MarketAnalysis => &self.market_analysis,
            ReportSection::ValueEstimation => &self.value_estimation,
            ReportSection::Conclusions => &self.conclusions,
        }
    }

    pub fn section_mut(&mut self, section: ReportSection) -> &mut String {
        match section {
            ReportSection::PropertyDetails => &mut self.property_details,
            ReportSection::AppraisalPurpose => &mut self.appraisal_purpose,
            ReportSection::AppraisalMethod => &mut self.appraisal_method,
            ReportSection::MarketAnalysis => &mut self.market_analysis,
            ReportSection::ValueEstimation => &mut self.value_estimation,
            ReportSection::Conclusions => &mut self.conclusions,
        }
    }

    /// Replace the text of one section, returning the previous text.
    pub fn replace_section(&mut self, section: ReportSection, text: impl Into<String>) -> String {
        std::mem::replace(self.section_mut(section), text.into())
    }

    pub fn sections(&self) -> impl Iterator<Item = (ReportSection, &str)> + '_ {
        ReportSection::ALL.into_iter().map(move |s| (s, self.section(s)))
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AppraisalReport)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
