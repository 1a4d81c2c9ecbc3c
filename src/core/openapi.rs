use utoipa::{Modify, OpenApi};

use crate::features::farmers::{dtos as farmers_dtos, handlers as farmers_handlers};
use crate::features::farms::{dtos as farms_dtos, handlers as farms_handlers};
use crate::features::locations::{dtos as locations_dtos, handlers as locations_handlers};
use crate::features::pesticides::{
    dtos as pesticides_dtos, handlers as pesticides_handlers, models as pesticides_models,
};
use crate::features::registrations::{
    dtos as registrations_dtos, handlers as registrations_handlers,
};
use crate::shared::types::{ApiResponse, PageMeta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Locations
        locations_handlers::get_reference_tables,
        locations_handlers::list_provinces,
        locations_handlers::get_province,
        locations_handlers::list_municipalities_by_province,
        locations_handlers::get_municipality,
        locations_handlers::list_barangays_by_municipality,
        locations_handlers::get_barangay,
        // Farmers
        farmers_handlers::list_farmers,
        farmers_handlers::get_farmer,
        farmers_handlers::create_farmer,
        farmers_handlers::update_farmer,
        // Farms
        farms_handlers::list_farms,
        farms_handlers::get_farm,
        farms_handlers::create_farm,
        farms_handlers::update_farm,
        // Pesticides
        pesticides_handlers::list_pesticides,
        pesticides_handlers::get_pesticide,
        pesticides_handlers::create_pesticide,
        pesticides_handlers::update_pesticide,
        // Registrations
        registrations_handlers::register,
    ),
    components(
        schemas(
            // Shared
            PageMeta,
            // Locations
            locations_dtos::AddressInputDto,
            locations_dtos::AddressDto,
            ApiResponse<locations_dtos::LocationTablesDto>,
            ApiResponse<Vec<locations_dtos::ProvinceResponseDto>>,
            ApiResponse<locations_dtos::ProvinceResponseDto>,
            ApiResponse<Vec<locations_dtos::MunicipalityResponseDto>>,
            ApiResponse<locations_dtos::MunicipalityResponseDto>,
            ApiResponse<Vec<locations_dtos::BarangayResponseDto>>,
            ApiResponse<locations_dtos::BarangayResponseDto>,
            // Farmers
            farmers_dtos::FarmerInputDto,
            ApiResponse<Vec<farmers_dtos::FarmerResponseDto>>,
            ApiResponse<farmers_dtos::FarmerResponseDto>,
            // Farms
            farms_dtos::FarmInputDto,
            ApiResponse<Vec<farms_dtos::FarmResponseDto>>,
            ApiResponse<farms_dtos::FarmResponseDto>,
            // Pesticides
            pesticides_models::ToxicityCategory,
            pesticides_dtos::PesticideInputDto,
            ApiResponse<Vec<pesticides_dtos::PesticideResponseDto>>,
            ApiResponse<pesticides_dtos::PesticideResponseDto>,
            // Registrations
            registrations_dtos::RegistrationDto,
            ApiResponse<registrations_dtos::RegistrationResponseDto>,
        )
    ),
    tags(
        (name = "locations", description = "Province, municipality and barangay reference data"),
        (name = "farmers", description = "Farmer registry"),
        (name = "farms", description = "Farms and their owners"),
        (name = "pesticides", description = "Pesticide catalogue"),
        (name = "registrations", description = "Farmer + farm registration wizard"),
    ),
    info(
        title = "Farmwise API",
        version = "0.1.0",
        description = "Farm management back office API",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_feature_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/locations",
            "/api/locations/provinces/{id}/municipalities",
            "/api/farmers",
            "/api/farms/{id}",
            "/api/pesticides",
            "/api/registrations",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Staging".to_string(),
            version: "9.9.9".to_string(),
            description: "staging build".to_string(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "Staging");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
