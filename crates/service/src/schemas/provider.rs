use chrono::NaiveDate;
use models::base::MergeIntoActiveModel;
use models::provider;
use sea_orm::Set;
use serde_json::Value;
use uuid::Uuid;

use super::{set_if_present, EntitySchema};
use crate::validation::rules::{date, integer, text, uuid, DateRule, Integer, Text, UuidRule};
use crate::validation::{ValidationError, Validator};

pub struct Providers;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProvider {
    pub first_name: String,
    pub last_name: String,
    pub npi: String,
    pub license_type_id: Uuid,
    pub license_number: String,
    pub license_expires_on: Option<NaiveDate>,
    pub years_experience: Option<i32>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProvider {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub npi: Option<String>,
    pub license_type_id: Option<Uuid>,
    pub license_number: Option<String>,
    pub license_expires_on: Option<Option<NaiveDate>>,
    pub years_experience: Option<Option<i32>>,
    pub email: Option<Option<String>>,
}

fn name() -> Text {
    text().len(1, 100)
}

// National Provider Identifier: ten digits
fn npi() -> Text {
    text().exact_len(10).digits_only()
}

fn license_type_id() -> UuidRule {
    uuid()
}

fn license_number() -> Text {
    text().len(1, 64)
}

fn license_expires_on() -> DateRule {
    date()
}

fn years_experience() -> Integer {
    integer().non_negative().max(80)
}

fn email() -> Text {
    text().len(3, 254).must_contain('@')
}

impl EntitySchema for Providers {
    type Entity = provider::Entity;
    type Create = CreateProvider;
    type Update = UpdateProvider;

    const RESOURCE: &'static str = "provider";

    fn parse_create(raw: &Value) -> Result<CreateProvider, ValidationError> {
        let mut v = Validator::new(raw);
        let first_name = v.required("firstName", &name());
        let last_name = v.required("lastName", &name());
        let npi = v.required("npi", &npi());
        let license_type_id = v.required("licenseTypeId", &license_type_id());
        let license_number = v.required("licenseNumber", &license_number());
        let license_expires_on = v.optional("licenseExpiresOn", &license_expires_on());
        let years_experience = v.optional("yearsExperience", &years_experience());
        let email = v.optional("email", &email());
        let (
            Some(first_name),
            Some(last_name),
            Some(npi),
            Some(license_type_id),
            Some(license_number),
            Some(license_expires_on),
            Some(years_experience),
            Some(email),
        ) = (
            first_name,
            last_name,
            npi,
            license_type_id,
            license_number,
            license_expires_on,
            years_experience,
            email,
        )
        else {
            return Err(v.into_error());
        };
        Ok(CreateProvider {
            first_name,
            last_name,
            npi,
            license_type_id,
            license_number,
            license_expires_on,
            years_experience,
            email,
        })
    }

    fn parse_update(raw: &Value) -> Result<UpdateProvider, ValidationError> {
        let mut v = Validator::new(raw);
        let first_name = v.patch("firstName", &name());
        let last_name = v.patch("lastName", &name());
        let npi = v.patch("npi", &npi());
        let license_type_id = v.patch("licenseTypeId", &license_type_id());
        let license_number = v.patch("licenseNumber", &license_number());
        let license_expires_on = v.patch_nullable("licenseExpiresOn", &license_expires_on());
        let years_experience = v.patch_nullable("yearsExperience", &years_experience());
        let email = v.patch_nullable("email", &email());
        let (
            Some(first_name),
            Some(last_name),
            Some(npi),
            Some(license_type_id),
            Some(license_number),
            Some(license_expires_on),
            Some(years_experience),
            Some(email),
        ) = (
            first_name,
            last_name,
            npi,
            license_type_id,
            license_number,
            license_expires_on,
            years_experience,
            email,
        )
        else {
            return Err(v.into_error());
        };
        Ok(UpdateProvider {
            first_name,
            last_name,
            npi,
            license_type_id,
            license_number,
            license_expires_on,
            years_experience,
            email,
        })
    }
}

impl MergeIntoActiveModel<provider::ActiveModel> for CreateProvider {
    fn merge_into_active_model(self, am: &mut provider::ActiveModel) {
        am.first_name = Set(self.first_name);
        am.last_name = Set(self.last_name);
        am.npi = Set(self.npi);
        am.license_type_id = Set(self.license_type_id);
        am.license_number = Set(self.license_number);
        am.license_expires_on = Set(self.license_expires_on);
        am.years_experience = Set(self.years_experience);
        am.email = Set(self.email);
    }
}

impl MergeIntoActiveModel<provider::ActiveModel> for UpdateProvider {
    fn merge_into_active_model(self, am: &mut provider::ActiveModel) {
        set_if_present(&mut am.first_name, self.first_name);
        set_if_present(&mut am.last_name, self.last_name);
        set_if_present(&mut am.npi, self.npi);
        set_if_present(&mut am.license_type_id, self.license_type_id);
        set_if_present(&mut am.license_number, self.license_number);
        set_if_present(&mut am.license_expires_on, self.license_expires_on);
        set_if_present(&mut am.years_experience, self.years_experience);
        set_if_present(&mut am.email, self.email);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_dates_and_ids() {
        let lt = Uuid::new_v4();
        let p = Providers::parse_create(&json!({
            "firstName": "Grace",
            "lastName": "Hopper",
            "npi": "1234567893",
            "licenseTypeId": lt.to_string(),
            "licenseNumber": "MD-42",
            "licenseExpiresOn": "2027-01-31",
            "yearsExperience": 12
        }))
        .unwrap();
        assert_eq!(p.license_type_id, lt);
        assert_eq!(p.license_expires_on, NaiveDate::from_ymd_opt(2027, 1, 31));
        assert_eq!(p.years_experience, Some(12));
        assert_eq!(p.email, None);
    }

    #[test]
    fn missing_and_malformed_fields_are_all_reported() {
        let err = Providers::parse_create(&json!({
            "firstName": "Grace",
            "npi": "12",
            "licenseTypeId": "not-a-uuid",
            "licenseNumber": "MD-42",
            "licenseExpiresOn": "next year",
            "yearsExperience": -3,
            "email": "nope"
        }))
        .unwrap_err();
        assert_eq!(
            err.paths(),
            vec!["lastName", "npi", "licenseTypeId", "licenseExpiresOn", "yearsExperience", "email"]
        );
    }

    #[test]
    fn update_can_clear_email() {
        let patch = Providers::parse_update(&json!({ "email": null, "yearsExperience": 3 })).unwrap();
        assert_eq!(patch.email, Some(None));
        assert_eq!(patch.years_experience, Some(Some(3)));
        assert_eq!(patch.first_name, None);
    }
}
