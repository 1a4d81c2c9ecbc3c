use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::farms::models::Farm;
use crate::features::locations::dtos::{AddressDto, AddressInputDto};
use crate::features::locations::models::LocationHierarchy;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::ListQuery;

/// Request DTO for creating or updating a farm.
///
/// `farmer_id` is required on the farm endpoints; inside a registration the
/// owner is the farmer created in the same request and the field is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct FarmInputDto {
    #[validate(
        custom(
            function = "crate::shared::validation::not_blank",
            message = "The farm name field is required."
        ),
        length(min = 1, max = 255, message = "The farm name must be 1-255 characters.")
    )]
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farmer_id: Option<i64>,

    /// Hectares
    #[validate(
        required(message = "The total area field is required."),
        range(min = 0.01, max = 1000.0, message = "The total area must be between 0.01 and 1000 hectares.")
    )]
    #[serde(default)]
    pub total_area: Option<f64>,

    #[validate(length(max = 100, message = "The soil type may not be greater than 100 characters."))]
    #[serde(
        default,
        deserialize_with = "crate::shared::types::blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub soil_type: Option<String>,

    #[validate(nested)]
    #[serde(default)]
    pub location: AddressInputDto,
}

impl From<&Farm> for FarmInputDto {
    fn from(farm: &Farm) -> Self {
        Self {
            name: farm.name.clone(),
            farmer_id: Some(farm.farmer_id),
            total_area: Some(farm.total_area),
            soil_type: farm.soil_type.clone(),
            location: AddressInputDto::from(&farm.address),
        }
    }
}

/// Response DTO for farm data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FarmResponseDto {
    pub id: i64,
    pub name: String,
    pub farmer_id: i64,
    /// Owner display name
    pub farmer_name: Option<String>,
    pub total_area: f64,
    pub soil_type: Option<String>,
    pub location: AddressDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FarmResponseDto {
    pub fn from_model(
        farm: Farm,
        farmer_name: Option<String>,
        hierarchy: &LocationHierarchy,
    ) -> Self {
        Self {
            id: farm.id,
            location: AddressDto::resolve(&farm.address, hierarchy),
            name: farm.name,
            farmer_id: farm.farmer_id,
            farmer_name,
            total_area: farm.total_area,
            soil_type: farm.soil_type,
            created_at: farm.created_at,
            updated_at: farm.updated_at,
        }
    }
}

/// Query parameters for listing farms
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct FarmQueryParams {
    /// Case-insensitive match on farm name or soil type
    pub search: Option<String>,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_per_page")]
    pub per_page: i64,

    /// Page number (1-indexed). Pages past the end are clamped.
    #[serde(default = "default_page")]
    pub page: i64,

    /// Only farms owned by this farmer
    pub farmer_id: Option<i64>,

    /// Only farms located in this province
    pub province_id: Option<i64>,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for FarmQueryParams {
    fn default() -> Self {
        Self {
            search: None,
            per_page: DEFAULT_PAGE_SIZE,
            page: 1,
            farmer_id: None,
            province_id: None,
        }
    }
}

impl FarmQueryParams {
    pub fn list_query(&self) -> ListQuery {
        ListQuery {
            search: self.search.clone(),
            per_page: self.per_page,
            page: self.page,
        }
    }

    /// Whether `farm` passes the facets and the lowercased search `term`
    pub fn keeps(&self, farm: &Farm, term: Option<&str>) -> bool {
        self.farmer_id.is_none_or(|id| farm.farmer_id == id)
            && self
                .province_id
                .is_none_or(|id| farm.address.province_id == id)
            && term.is_none_or(|t| farm.matches_search(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::flatten_errors;

    #[test]
    fn test_total_area_bounds() {
        let mut dto = FarmInputDto {
            name: "North Field".to_string(),
            farmer_id: Some(1),
            total_area: Some(0.0),
            soil_type: None,
            location: AddressInputDto {
                province_id: Some(1),
                municipality_id: Some(10),
                barangay_id: Some(100),
                street: None,
            },
        };
        let errors = flatten_errors(&dto.validate().unwrap_err());
        assert!(errors.contains_key("total_area"));

        dto.total_area = Some(1000.0);
        assert!(dto.validate().is_ok());

        dto.total_area = None;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_whitespace_name_is_required() {
        let dto = FarmInputDto {
            name: "   ".to_string(),
            farmer_id: Some(1),
            total_area: Some(2.5),
            soil_type: None,
            location: AddressInputDto {
                province_id: Some(1),
                municipality_id: Some(10),
                barangay_id: Some(100),
                street: None,
            },
        };
        let errors = flatten_errors(&dto.validate().unwrap_err());
        assert_eq!(
            errors.get("name").map(String::as_str),
            Some("The farm name field is required.")
        );
        assert_eq!(errors.len(), 1);
    }
}
