use models::base::MergeIntoActiveModel;
use models::location_type;
use sea_orm::Set;
use serde_json::Value;

use super::{set_if_present, EntitySchema};
use crate::validation::rules::{text, Text};
use crate::validation::{ValidationError, Validator};

pub struct LocationTypes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLocationType {
    pub code: String,
    pub display_name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateLocationType {
    pub code: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<Option<String>>,
}

fn code() -> Text {
    text().one_of(location_type::CODES)
}

fn display_name() -> Text {
    text().len(1, 128)
}

fn description() -> Text {
    text().max_len(512)
}

impl EntitySchema for LocationTypes {
    type Entity = location_type::Entity;
    type Create = CreateLocationType;
    type Update = UpdateLocationType;

    const RESOURCE: &'static str = "location_type";

    fn parse_create(raw: &Value) -> Result<CreateLocationType, ValidationError> {
        let mut v = Validator::new(raw);
        let code = v.required("code", &code());
        let display_name = v.required("displayName", &display_name());
        let description = v.optional("description", &description());
        let (Some(code), Some(display_name), Some(description)) = (code, display_name, description) else {
            return Err(v.into_error());
        };
        Ok(CreateLocationType { code, display_name, description })
    }

    fn parse_update(raw: &Value) -> Result<UpdateLocationType, ValidationError> {
        let mut v = Validator::new(raw);
        let code = v.patch("code", &code());
        let display_name = v.patch("displayName", &display_name());
        let description = v.patch_nullable("description", &description());
        let (Some(code), Some(display_name), Some(description)) = (code, display_name, description) else {
            return Err(v.into_error());
        };
        Ok(UpdateLocationType { code, display_name, description })
    }
}

impl MergeIntoActiveModel<location_type::ActiveModel> for CreateLocationType {
    fn merge_into_active_model(self, am: &mut location_type::ActiveModel) {
        am.code = Set(self.code);
        am.display_name = Set(self.display_name);
        am.description = Set(self.description);
    }
}

impl MergeIntoActiveModel<location_type::ActiveModel> for UpdateLocationType {
    fn merge_into_active_model(self, am: &mut location_type::ActiveModel) {
        set_if_present(&mut am.code, self.code);
        set_if_present(&mut am.display_name, self.display_name);
        set_if_present(&mut am.description, self.description);
    }
}
