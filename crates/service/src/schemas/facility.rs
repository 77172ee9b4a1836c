use chrono::NaiveDate;
use models::base::MergeIntoActiveModel;
use models::facility;
use sea_orm::Set;
use serde_json::Value;
use uuid::Uuid;

use super::{set_if_present, EntitySchema};
use crate::validation::rules::{date, integer, text, uuid, DateRule, Integer, Text, UuidRule};
use crate::validation::{ValidationError, Validator};

pub struct Facilities;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFacility {
    pub name: String,
    pub location_type_id: Uuid,
    pub address_line1: String,
    pub city: String,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub bed_count: Option<i32>,
    pub opened_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateFacility {
    pub name: Option<String>,
    pub location_type_id: Option<Uuid>,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub region: Option<Option<String>>,
    pub postal_code: Option<Option<String>>,
    pub bed_count: Option<Option<i32>>,
    pub opened_on: Option<Option<NaiveDate>>,
}

fn name() -> Text {
    text().len(1, 200)
}

fn location_type_id() -> UuidRule {
    uuid()
}

fn address_line1() -> Text {
    text().len(1, 200)
}

fn city() -> Text {
    text().len(1, 100)
}

fn region() -> Text {
    text().max_len(100)
}

fn postal_code() -> Text {
    text().max_len(20)
}

fn bed_count() -> Integer {
    integer().non_negative()
}

fn opened_on() -> DateRule {
    date()
}

impl EntitySchema for Facilities {
    type Entity = facility::Entity;
    type Create = CreateFacility;
    type Update = UpdateFacility;

    const RESOURCE: &'static str = "facility";

    fn parse_create(raw: &Value) -> Result<CreateFacility, ValidationError> {
        let mut v = Validator::new(raw);
        let name = v.required("name", &name());
        let location_type_id = v.required("locationTypeId", &location_type_id());
        let address_line1 = v.required("addressLine1", &address_line1());
        let city = v.required("city", &city());
        let region = v.optional("region", &region());
        let postal_code = v.optional("postalCode", &postal_code());
        let bed_count = v.optional("bedCount", &bed_count());
        let opened_on = v.optional("openedOn", &opened_on());
        let (
            Some(name),
            Some(location_type_id),
            Some(address_line1),
            Some(city),
            Some(region),
            Some(postal_code),
            Some(bed_count),
            Some(opened_on),
        ) = (name, location_type_id, address_line1, city, region, postal_code, bed_count, opened_on)
        else {
            return Err(v.into_error());
        };
        Ok(CreateFacility {
            name,
            location_type_id,
            address_line1,
            city,
            region,
            postal_code,
            bed_count,
            opened_on,
        })
    }

    fn parse_update(raw: &Value) -> Result<UpdateFacility, ValidationError> {
        let mut v = Validator::new(raw);
        let name = v.patch("name", &name());
        let location_type_id = v.patch("locationTypeId", &location_type_id());
        let address_line1 = v.patch("addressLine1", &address_line1());
        let city = v.patch("city", &city());
        let region = v.patch_nullable("region", &region());
        let postal_code = v.patch_nullable("postalCode", &postal_code());
        let bed_count = v.patch_nullable("bedCount", &bed_count());
        let opened_on = v.patch_nullable("openedOn", &opened_on());
        let (
            Some(name),
            Some(location_type_id),
            Some(address_line1),
            Some(city),
            Some(region),
            Some(postal_code),
            Some(bed_count),
            Some(opened_on),
        ) = (name, location_type_id, address_line1, city, region, postal_code, bed_count, opened_on)
        else {
            return Err(v.into_error());
        };
        Ok(UpdateFacility {
            name,
            location_type_id,
            address_line1,
            city,
            region,
            postal_code,
            bed_count,
            opened_on,
        })
    }
}

impl MergeIntoActiveModel<facility::ActiveModel> for CreateFacility {
    fn merge_into_active_model(self, am: &mut facility::ActiveModel) {
        am.name = Set(self.name);
        am.location_type_id = Set(self.location_type_id);
        am.address_line1 = Set(self.address_line1);
        am.city = Set(self.city);
        am.region = Set(self.region);
        am.postal_code = Set(self.postal_code);
        am.bed_count = Set(self.bed_count);
        am.opened_on = Set(self.opened_on);
    }
}

impl MergeIntoActiveModel<facility::ActiveModel> for UpdateFacility {
    fn merge_into_active_model(self, am: &mut facility::ActiveModel) {
        set_if_present(&mut am.name, self.name);
        set_if_present(&mut am.location_type_id, self.location_type_id);
        set_if_present(&mut am.address_line1, self.address_line1);
        set_if_present(&mut am.city, self.city);
        set_if_present(&mut am.region, self.region);
        set_if_present(&mut am.postal_code, self.postal_code);
        set_if_present(&mut am.bed_count, self.bed_count);
        set_if_present(&mut am.opened_on, self.opened_on);
    }
}
