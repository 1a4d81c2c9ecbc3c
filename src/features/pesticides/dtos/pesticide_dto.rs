use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::locations::dtos::{AddressDto, AddressInputDto};
use crate::features::locations::models::LocationHierarchy;
use crate::features::pesticides::models::{Pesticide, ToxicityCategory};
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::ListQuery;

/// Request DTO for creating or updating a pesticide
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct PesticideInputDto {
    #[validate(
        custom(
            function = "crate::shared::validation::not_blank",
            message = "The name field is required."
        ),
        length(min = 1, max = 255, message = "The name must be 1-255 characters.")
    )]
    #[serde(default)]
    pub name: String,

    #[validate(
        custom(
            function = "crate::shared::validation::not_blank",
            message = "The active ingredient field is required."
        ),
        length(min = 1, max = 255, message = "The active ingredient must be 1-255 characters.")
    )]
    #[serde(default)]
    pub active_ingredient: String,

    #[validate(required(message = "The toxicity field is required."))]
    #[serde(default)]
    pub toxicity: Option<ToxicityCategory>,

    #[validate(length(max = 500, message = "The target pests may not be greater than 500 characters."))]
    #[serde(
        default,
        deserialize_with = "crate::shared::types::blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_pests: Option<String>,

    /// Supplier location
    #[validate(nested)]
    #[serde(default)]
    pub location: AddressInputDto,
}

/// Response DTO for pesticide data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PesticideResponseDto {
    pub id: i64,
    pub name: String,
    pub active_ingredient: String,
    pub toxicity: ToxicityCategory,
    pub target_pests: Option<String>,
    pub location: AddressDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PesticideResponseDto {
    pub fn from_model(pesticide: Pesticide, hierarchy: &LocationHierarchy) -> Self {
        Self {
            id: pesticide.id,
            location: AddressDto::resolve(&pesticide.address, hierarchy),
            name: pesticide.name,
            active_ingredient: pesticide.active_ingredient,
            toxicity: pesticide.toxicity,
            target_pests: pesticide.target_pests,
            created_at: pesticide.created_at,
            updated_at: pesticide.updated_at,
        }
    }
}

/// Query parameters for listing pesticides
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PesticideQueryParams {
    /// Case-insensitive match on name, active ingredient or target pests
    pub search: Option<String>,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_per_page")]
    pub per_page: i64,

    /// Page number (1-indexed). Pages past the end are clamped.
    #[serde(default = "default_page")]
    pub page: i64,

    /// Only pesticides of this toxicity category
    pub toxicity: Option<ToxicityCategory>,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PesticideQueryParams {
    fn default() -> Self {
        Self {
            search: None,
            per_page: DEFAULT_PAGE_SIZE,
            page: 1,
            toxicity: None,
        }
    }
}

impl PesticideQueryParams {
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

    fn valid() -> PesticideInputDto {
        PesticideInputDto {
            name: "Decis".to_string(),
            active_ingredient: "Deltamethrin".to_string(),
            toxicity: Some(ToxicityCategory::II),
            target_pests: None,
            location: AddressInputDto {
                province_id: Some(1),
                municipality_id: Some(10),
                barangay_id: Some(100),
                street: None,
            },
        }
    }

    #[test]
    fn test_valid_pesticide_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_whitespace_name_and_ingredient_are_required() {
        let mut dto = valid();
        dto.name = "  ".to_string();
        dto.active_ingredient = "\t".to_string();
        let errors = flatten_errors(&dto.validate().unwrap_err());
        assert_eq!(
            errors.get("name").map(String::as_str),
            Some("The name field is required.")
        );
        assert_eq!(
            errors.get("active_ingredient").map(String::as_str),
            Some("The active ingredient field is required.")
        );
    }
}
