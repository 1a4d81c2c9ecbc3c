use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::farmers::models::Farmer;
use crate::features::locations::dtos::{AddressDto, AddressInputDto};
use crate::features::locations::models::LocationHierarchy;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::ListQuery;

/// Request DTO for creating or updating a farmer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct FarmerInputDto {
    #[validate(
        length(min = 1, max = 255, message = "The firstname must be 1-255 characters."),
        regex(
            path = *crate::shared::validation::NAME_REGEX,
            message = "The firstname may only contain letters, spaces and hyphens."
        )
    )]
    #[serde(default)]
    pub firstname: String,

    #[validate(
        length(max = 255, message = "The middlename may not be greater than 255 characters."),
        regex(
            path = *crate::shared::validation::NAME_REGEX,
            message = "The middlename may only contain letters, spaces and hyphens."
        )
    )]
    #[serde(
        default,
        deserialize_with = "crate::shared::types::blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub middlename: Option<String>,

    #[validate(
        length(min = 1, max = 255, message = "The lastname must be 1-255 characters."),
        regex(
            path = *crate::shared::validation::NAME_REGEX,
            message = "The lastname may only contain letters, spaces and hyphens."
        )
    )]
    #[serde(default)]
    pub lastname: String,

    #[validate(
        custom(
            function = "crate::shared::validation::not_blank",
            message = "The contact number field is required."
        ),
        length(min = 1, max = 20, message = "The contact number must be 1-20 characters."),
        regex(
            path = *crate::shared::validation::PHONE_REGEX,
            message = "The contact number may only contain digits, plus signs and spaces."
        )
    )]
    #[serde(default)]
    pub contact_number: String,

    /// Years of farming experience
    #[validate(
        required(message = "The farming experience field is required."),
        range(min = 0, max = 80, message = "The farming experience must be between 0 and 80.")
    )]
    #[serde(default)]
    pub farming_experience: Option<i32>,

    #[validate(nested)]
    #[serde(default)]
    pub location: AddressInputDto,
}

impl From<&Farmer> for FarmerInputDto {
    fn from(farmer: &Farmer) -> Self {
        Self {
            firstname: farmer.firstname.clone(),
            middlename: farmer.middlename.clone(),
            lastname: farmer.lastname.clone(),
            contact_number: farmer.contact_number.clone(),
            farming_experience: Some(farmer.farming_experience),
            location: AddressInputDto::from(&farmer.address),
        }
    }
}

/// Response DTO for farmer data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FarmerResponseDto {
    pub id: i64,
    pub firstname: String,
    pub middlename: Option<String>,
    pub lastname: String,
    pub full_name: String,
    pub contact_number: String,
    pub farming_experience: i32,
    pub location: AddressDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FarmerResponseDto {
    pub fn from_model(farmer: Farmer, hierarchy: &LocationHierarchy) -> Self {
        Self {
            id: farmer.id,
            full_name: farmer.full_name(),
            location: AddressDto::resolve(&farmer.address, hierarchy),
            firstname: farmer.firstname,
            middlename: farmer.middlename,
            lastname: farmer.lastname,
            contact_number: farmer.contact_number,
            farming_experience: farmer.farming_experience,
            created_at: farmer.created_at,
            updated_at: farmer.updated_at,
        }
    }
}

/// Query parameters for listing farmers
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct FarmerQueryParams {
    /// Case-insensitive match on name or contact number
    #[param(example = "juan")]
    pub search: Option<String>,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_per_page")]
    pub per_page: i64,

    /// Page number (1-indexed). Pages past the end are clamped.
    #[serde(default = "default_page")]
    pub page: i64,

    /// Only farmers living in this province
    pub province_id: Option<i64>,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for FarmerQueryParams {
    fn default() -> Self {
        Self {
            search: None,
            per_page: DEFAULT_PAGE_SIZE,
            page: 1,
            province_id: None,
        }
    }
}

impl FarmerQueryParams {
    pub fn list_query(&self) -> ListQuery {
        ListQuery {
            search: self.search.clone(),
            per_page: self.per_page,
            page: self.page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::flatten_errors;

    fn valid() -> FarmerInputDto {
        FarmerInputDto {
            firstname: "Juan".to_string(),
            middlename: None,
            lastname: "Dela Cruz".to_string(),
            contact_number: "+63 917 123 4567".to_string(),
            farming_experience: Some(12),
            location: AddressInputDto {
                province_id: Some(1),
                municipality_id: Some(10),
                barangay_id: Some(100),
                street: None,
            },
        }
    }

    #[test]
    fn test_valid_farmer_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_blank_middlename_deserializes_as_none() {
        let dto: FarmerInputDto = serde_json::from_value(serde_json::json!({
            "firstname": "Juan",
            "middlename": "  ",
            "lastname": "Dela Cruz",
            "contact_number": "0917",
            "farming_experience": 3,
            "location": {"province_id": 1, "municipality_id": 10, "barangay_id": 100}
        }))
        .unwrap();
        assert_eq!(dto.middlename, None);
    }

    #[test]
    fn test_invalid_fields_are_keyed() {
        let mut dto = valid();
        dto.firstname = "Juan3".to_string();
        dto.contact_number = "0917-123".to_string();
        dto.farming_experience = Some(81);
        dto.location.barangay_id = None;

        let errors = flatten_errors(&dto.validate().unwrap_err());
        assert!(errors.contains_key("firstname"));
        assert!(errors.contains_key("contact_number"));
        assert!(errors.contains_key("farming_experience"));
        assert!(errors.contains_key("location.barangay_id"));
        assert!(!errors.contains_key("lastname"));
    }

    #[test]
    fn test_missing_experience_is_required() {
        let mut dto = valid();
        dto.farming_experience = None;
        let errors = flatten_errors(&dto.validate().unwrap_err());
        assert_eq!(
            errors.get("farming_experience").map(String::as_str),
            Some("The farming experience field is required.")
        );
    }

    #[test]
    fn test_whitespace_contact_number_is_required() {
        let mut dto = valid();
        dto.contact_number = "   ".to_string();
        let errors = flatten_errors(&dto.validate().unwrap_err());
        assert_eq!(
            errors.get("contact_number").map(String::as_str),
            Some("The contact number field is required.")
        );
    }

    #[test]
    fn test_names_reject_periods_and_apostrophes() {
        let mut dto = valid();
        dto.firstname = "Ma. Lourdes".to_string();
        dto.lastname = "O'Neil".to_string();
        let errors = flatten_errors(&dto.validate().unwrap_err());
        assert!(errors.contains_key("firstname"));
        assert!(errors.contains_key("lastname"));

        dto.firstname = "   ".to_string();
        dto.lastname = "Santo-Niño".to_string();
        let errors = flatten_errors(&dto.validate().unwrap_err());
        assert!(errors.contains_key("firstname"));
        assert!(!errors.contains_key("lastname"));
    }
}
