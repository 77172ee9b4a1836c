use models::base::MergeIntoActiveModel;
use models::license_type;
use sea_orm::Set;
use serde_json::Value;

use super::{set_if_present, EntitySchema};
use crate::validation::rules::{integer, text, Integer, Text};
use crate::validation::{ValidationError, Validator};

pub struct LicenseTypes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLicenseType {
    pub code: String,
    pub display_name: String,
    pub description: Option<String>,
    pub renewal_period_months: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateLicenseType {
    pub code: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<Option<String>>,
    pub renewal_period_months: Option<Option<i32>>,
}

fn code() -> Text {
    text().len(2, 32)
}

fn display_name() -> Text {
    text().len(1, 128)
}

fn description() -> Text {
    text().max_len(512)
}

fn renewal_period_months() -> Integer {
    integer().non_negative().max(600)
}

impl EntitySchema for LicenseTypes {
    type Entity = license_type::Entity;
    type Create = CreateLicenseType;
    type Update = UpdateLicenseType;

    const RESOURCE: &'static str = "license_type";

    fn parse_create(raw: &Value) -> Result<CreateLicenseType, ValidationError> {
        let mut v = Validator::new(raw);
        let code = v.required("code", &code());
        let display_name = v.required("displayName", &display_name());
        let description = v.optional("description", &description());
        let renewal_period_months = v.optional("renewalPeriodMonths", &renewal_period_months());
        let (Some(code), Some(display_name), Some(description), Some(renewal_period_months)) =
            (code, display_name, description, renewal_period_months)
        else {
            return Err(v.into_error());
        };
        Ok(CreateLicenseType { code, display_name, description, renewal_period_months })
    }

    fn parse_update(raw: &Value) -> Result<UpdateLicenseType, ValidationError> {
        let mut v = Validator::new(raw);
        let code = v.patch("code", &code());
        let display_name = v.patch("displayName", &display_name());
        let description = v.patch_nullable("description", &description());
        let renewal_period_months = v.patch_nullable("renewalPeriodMonths", &renewal_period_months());
        let (Some(code), Some(display_name), Some(description), Some(renewal_period_months)) =
            (code, display_name, description, renewal_period_months)
        else {
            return Err(v.into_error());
        };
        Ok(UpdateLicenseType { code, display_name, description, renewal_period_months })
    }
}

impl MergeIntoActiveModel<license_type::ActiveModel> for CreateLicenseType {
    fn merge_into_active_model(self, am: &mut license_type::ActiveModel) {
        am.code = Set(self.code);
        am.display_name = Set(self.display_name);
        am.description = Set(self.description);
        am.renewal_period_months = Set(self.renewal_period_months);
    }
}

impl MergeIntoActiveModel<license_type::ActiveModel> for UpdateLicenseType {
    fn merge_into_active_model(self, am: &mut license_type::ActiveModel) {
        set_if_present(&mut am.code, self.code);
        set_if_present(&mut am.display_name, self.display_name);
        set_if_present(&mut am.description, self.description);
        set_if_present(&mut am.renewal_period_months, self.renewal_period_months);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requires_code_and_display_name() {
        let err = LicenseTypes::parse_create(&json!({ "description": "x" })).unwrap_err();
        assert_eq!(err.paths(), vec!["code", "displayName"]);
    }

    #[test]
    fn create_rejects_negative_renewal() {
        let err = LicenseTypes::parse_create(&json!({
            "code": "RN", "displayName": "Registered Nurse", "renewalPeriodMonths": -1
        }))
        .unwrap_err();
        assert_eq!(err.paths(), vec!["renewalPeriodMonths"]);
        assert_eq!(err.issues[0].message, "must not be negative");
    }

    #[test]
    fn update_with_empty_object_changes_nothing() {
        let patch = LicenseTypes::parse_update(&json!({})).unwrap();
        assert_eq!(patch, UpdateLicenseType::default());
    }

    #[test]
    fn update_keeps_null_distinct_from_absent() {
        let patch = LicenseTypes::parse_update(&json!({ "renewalPeriodMonths": null })).unwrap();
        assert_eq!(patch.renewal_period_months, Some(None));
        assert_eq!(patch.description, None);
    }
}
