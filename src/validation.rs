//! Form-step validation for [`PropertyRecord`].
//!
//! The record is filled in over three steps (category, details, purpose).
//! Each step is checked before moving on, and the whole record is checked
//! again before a report is requested.

use crate::error::{AppraisalError, Result};
use crate::i18n::{Label, Locale, Localized};
use crate::schema::{PropertyCategory, PropertyFeature, PropertyRecord};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Category,
    Details,
    Purpose,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [WizardStep::Category, WizardStep::Details, WizardStep::Purpose];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn required(field: &'static str, locale: Locale) -> Self {
        Self {
            field,
            message: Label::RequiredField.text(locale).to_string(),
        }
    }
}

/// Check the fields owned by one step. An empty vector means the step is complete.
pub fn validate_step(record: &PropertyRecord, step: WizardStep, locale: Locale) -> Vec<FieldError> {
    let mut errors = Vec::new();

    match step {
        // Category and purpose are enums, so they are always populated.
        WizardStep::Category | WizardStep::Purpose => {}
        WizardStep::Details => {
            if record.address.trim().is_empty() {
                errors.push(FieldError::required("address", locale));
            }
            if record.area.trim().is_empty() {
                errors.push(FieldError::required("area", locale));
            }
            if !(record.size.is_finite() && record.size > 0.0) {
                errors.push(FieldError::required("size", locale));
            }

            if record.category.is_building() {
                if !record.construction_year.is_some_and(|y| y > 0) {
                    errors.push(FieldError::required("constructionYear", locale));
                }
                if record.floor.as_deref().map_or(true, |f| f.trim().is_empty()) {
                    errors.push(FieldError::required("floor", locale));
                }
                if record.condition.is_none() {
                    errors.push(FieldError::required("condition", locale));
                }
            }

            for feature in &record.features {
                if !record.category.allows(*feature) {
                    errors.push(FieldError {
                        field: "features",
                        message: format!(
                            "{}: {}",
                            Label::FeatureNotAllowed.text(locale),
                            feature.localized(locale)
                        ),
                    });
                }
            }
        }
    }

    if !errors.is_empty() {
        debug!("Step {:?} has {} invalid field(s)", step, errors.len());
    }

    errors
}

/// Validate every step and the feature-vocabulary invariant.
pub fn validate_record(record: &PropertyRecord) -> Result<()> {
    if let Some(feature) = record
        .features
        .iter()
        .find(|f| !record.category.allows(**f))
    {
        return Err(AppraisalError::FeatureNotAllowed {
            feature: feature.as_str().to_string(),
            category: record.category.as_str().to_string(),
        });
    }

    for step in WizardStep::ALL {
        if let Some(first) = validate_step(record, step, Locale::English).into_iter().next() {
            return Err(AppraisalError::Validation {
                field: first.field.to_string(),
                details: first.message,
            });
        }
    }

    Ok(())
}

/// Switch the record's category, dropping data the new category cannot carry.
///
/// Land and "other" lose the building fields (the permit becomes `false`).
/// Features outside the new vocabulary are removed.
pub fn set_category(record: &mut PropertyRecord, category: PropertyCategory) {
    record.category = category;

    if !category.is_building() {
        record.construction_year = None;
        record.floor = None;
        record.condition = None;
        record.residential_permit = Some(false);
    }

    record.features.retain(|f| category.allows(*f));
}

/// Add the feature if absent, remove it if present.
pub fn toggle_feature(record: &mut PropertyRecord, feature: PropertyFeature) -> Result<()> {
    if let Some(pos) = record.features.iter().position(|f| *f == feature) {
        record.features.remove(pos);
        return Ok(());
    }

    if !record.category.allows(feature) {
        return Err(AppraisalError::FeatureNotAllowed {
            feature: feature.as_str().to_string(),
            category: record.category.as_str().to_string(),
        });
    }

    record.features.push(feature);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AppraisalPurpose, PropertyCondition};

    fn apartment() -> PropertyRecord {
        PropertyRecord::new(
            "Λεωφόρος Κύπρου 12",
            "Κομοτηνή",
            PropertyCategory::Residence,
            95.0,
            AppraisalPurpose::Sale,
        )
        .with_building(2004, "2", PropertyCondition::Good, true)
        .with_features([PropertyFeature::Balcony, PropertyFeature::Parking])
    }

    #[test]
    fn test_complete_building_passes() {
        assert!(validate_record(&apartment()).is_ok());
    }

    #[test]
    fn test_details_step_reports_every_missing_field() {
        let mut record = apartment();
        record.address = "  ".to_string();
        record.size = 0.0;
        record.floor = None;

        let errors = validate_step(&record, WizardStep::Details, Locale::Greek);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["address", "size", "floor"]);
        assert_eq!(errors[0].message, "Υποχρεωτικό πεδίο");
    }

    #[test]
    fn test_land_does_not_need_building_fields() {
        let record = PropertyRecord::new(
            "Θέση Αγίου Γεωργίου",
            "Μαρώνεια",
            PropertyCategory::Land,
            4000.0,
            AppraisalPurpose::Sale,
        )
        .with_features([PropertyFeature::NearSea, PropertyFeature::Buildable]);
        assert!(validate_record(&record).is_ok());
    }

    #[test]
    fn test_land_with_building_feature_is_rejected() {
        let record = PropertyRecord::new("a", "b", PropertyCategory::Land, 10.0, AppraisalPurpose::Sale)
            .with_features([PropertyFeature::Elevator]);
        match validate_record(&record) {
            Err(AppraisalError::FeatureNotAllowed { feature, category }) => {
                assert_eq!(feature, "elevator");
                assert_eq!(category, "land");
            }
            other => panic!("expected FeatureNotAllowed, got {:?}", other),
        }
    }

    #[test]
    fn test_disallowed_feature_message_names_the_feature() {
        let record = PropertyRecord::new("a", "b", PropertyCategory::Land, 10.0, AppraisalPurpose::Sale)
            .with_features([PropertyFeature::Elevator]);

        let errors = validate_step(&record, WizardStep::Details, Locale::English);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "features");
        assert_eq!(
            errors[0].message,
            "This feature is not available for this property type: Elevator"
        );
        assert!(!errors[0].message.contains("cannot be empty"));
    }

    #[test]
    fn test_building_with_land_feature_is_rejected() {
        let record = apartment().with_features([PropertyFeature::CornerPlot]);
        assert!(matches!(
            validate_record(&record),
            Err(AppraisalError::FeatureNotAllowed { .. })
        ));
    }

    #[test]
    fn test_set_category_to_land_clears_building_fields() {
        let mut record = apartment();
        set_category(&mut record, PropertyCategory::Land);

        assert_eq!(record.construction_year, None);
        assert_eq!(record.floor, None);
        assert_eq!(record.condition, None);
        assert_eq!(record.residential_permit, Some(false));
        // parking is valid for land too
        assert_eq!(record.features, vec![PropertyFeature::Parking]);
        assert!(validate_record(&record).is_ok());
    }

    #[test]
    fn test_set_category_to_other_drops_all_features() {
        let mut record = apartment();
        set_category(&mut record, PropertyCategory::Other);
        assert!(record.features.is_empty());
    }

    #[test]
    fn test_toggle_feature_respects_vocabulary() {
        let mut record = apartment();
        toggle_feature(&mut record, PropertyFeature::Balcony).unwrap();
        assert_eq!(record.features, vec![PropertyFeature::Parking]);

        toggle_feature(&mut record, PropertyFeature::Fireplace).unwrap();
        assert!(record.features.contains(&PropertyFeature::Fireplace));

        assert!(toggle_feature(&mut record, PropertyFeature::Fenced).is_err());
        assert!(!record.features.contains(&PropertyFeature::Fenced));
    }
}
