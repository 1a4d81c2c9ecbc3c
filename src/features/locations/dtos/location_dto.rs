use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::locations::models::{
    Address, Barangay, LocationHierarchy, Municipality, Province,
};

/// Query parameters for searching locations
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct LocationSearchQuery {
    /// Search by name (case-insensitive, partial match)
    #[param(example = "laoag")]
    pub search: Option<String>,
}

/// Response DTO for province data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProvinceResponseDto {
    pub id: i64,
    pub name: String,
    pub region_code: String,
}

impl From<Province> for ProvinceResponseDto {
    fn from(province: Province) -> Self {
        Self {
            id: province.id,
            name: province.name,
            region_code: province.region_code,
        }
    }
}

impl From<ProvinceResponseDto> for Province {
    fn from(dto: ProvinceResponseDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            region_code: dto.region_code,
        }
    }
}

/// Response DTO for municipality data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MunicipalityResponseDto {
    pub id: i64,
    pub name: String,
    pub province_id: i64,
}

impl From<Municipality> for MunicipalityResponseDto {
    fn from(municipality: Municipality) -> Self {
        Self {
            id: municipality.id,
            name: municipality.name,
            province_id: municipality.province_id,
        }
    }
}

impl From<MunicipalityResponseDto> for Municipality {
    fn from(dto: MunicipalityResponseDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            province_id: dto.province_id,
        }
    }
}

/// Response DTO for barangay data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BarangayResponseDto {
    pub id: i64,
    pub name: String,
    pub municipality_id: i64,
}

impl From<Barangay> for BarangayResponseDto {
    fn from(barangay: Barangay) -> Self {
        Self {
            id: barangay.id,
            name: barangay.name,
            municipality_id: barangay.municipality_id,
        }
    }
}

impl From<BarangayResponseDto> for Barangay {
    fn from(dto: BarangayResponseDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            municipality_id: dto.municipality_id,
        }
    }
}

/// Full reference tables for client-side cascading selects
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationTablesDto {
    pub provinces: Vec<ProvinceResponseDto>,
    pub municipalities: Vec<MunicipalityResponseDto>,
    pub barangays: Vec<BarangayResponseDto>,
}

impl From<LocationHierarchy> for LocationTablesDto {
    fn from(h: LocationHierarchy) -> Self {
        Self {
            provinces: h.provinces.into_iter().map(Into::into).collect(),
            municipalities: h.municipalities.into_iter().map(Into::into).collect(),
            barangays: h.barangays.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<LocationTablesDto> for LocationHierarchy {
    fn from(dto: LocationTablesDto) -> Self {
        Self {
            provinces: dto.provinces.into_iter().map(Into::into).collect(),
            municipalities: dto.municipalities.into_iter().map(Into::into).collect(),
            barangays: dto.barangays.into_iter().map(Into::into).collect(),
        }
    }
}

/// Location sub-object accepted by entity create/update requests.
///
/// Ids are optional so an unfinished cascading selection deserializes and
/// reports `required` per field instead of failing the whole body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddressInputDto {
    #[validate(required(message = "The province field is required."))]
    pub province_id: Option<i64>,

    #[validate(required(message = "The municipality field is required."))]
    pub municipality_id: Option<i64>,

    #[validate(required(message = "The barangay field is required."))]
    pub barangay_id: Option<i64>,

    #[validate(length(max = 255, message = "The street may not be greater than 255 characters."))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
}

impl From<&Address> for AddressInputDto {
    fn from(address: &Address) -> Self {
        Self {
            province_id: Some(address.province_id),
            municipality_id: Some(address.municipality_id),
            barangay_id: Some(address.barangay_id),
            street: address.street.clone(),
        }
    }
}

/// Location sub-object returned with entities, names resolved for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddressDto {
    pub province_id: i64,
    pub province_name: Option<String>,
    pub municipality_id: i64,
    pub municipality_name: Option<String>,
    pub barangay_id: i64,
    pub barangay_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
}

impl AddressDto {
    /// Resolve display names; ids that no longer resolve keep a `None` name
    pub fn resolve(address: &Address, hierarchy: &LocationHierarchy) -> Self {
        Self {
            province_id: address.province_id,
            province_name: hierarchy.province(address.province_id).map(|p| p.name.clone()),
            municipality_id: address.municipality_id,
            municipality_name: hierarchy
                .municipality(address.municipality_id)
                .map(|m| m.name.clone()),
            barangay_id: address.barangay_id,
            barangay_name: hierarchy.barangay(address.barangay_id).map(|b| b.name.clone()),
            street: address.street.clone(),
        }
    }
}
