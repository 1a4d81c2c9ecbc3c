use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::farmers::services::LOCATION_KEY;
use crate::features::farmers::FarmerService;
use crate::features::farms::FarmService;
use crate::features::registrations::dtos::{RegistrationDto, RegistrationResponseDto};
use crate::shared::types::FieldErrors;
use crate::shared::validation::nest_errors;

/// Registers a farmer together with their first farm
#[derive(Debug)]
pub struct RegistrationService {
    farmers: Arc<FarmerService>,
    farms: Arc<FarmService>,
}

impl RegistrationService {
    pub fn new(farmers: Arc<FarmerService>, farms: Arc<FarmService>) -> Self {
        Self { farmers, farms }
    }

    /// Validate both sections, then create both records.
    ///
    /// Nothing is stored unless every field of both sections is valid.
    pub async fn register(&self, dto: RegistrationDto) -> Result<RegistrationResponseDto> {
        let farmer_address = self.farmers.check(&dto.farmer, LOCATION_KEY);
        let farm_address = self.farms.check(&dto.farm, LOCATION_KEY, false).await;

        let (farmer_address, farm_address) = match (farmer_address, farm_address) {
            (Ok(farmer), Ok(farm)) => (farmer, farm),
            (farmer, farm) => {
                let mut errors = FieldErrors::new();
                if let Err(e) = farmer {
                    errors.extend(nest_errors("farmer", e));
                }
                if let Err(e) = farm {
                    errors.extend(nest_errors("farm", e));
                }
                tracing::debug!("Registration rejected: {} field error(s)", errors.len());
                return Err(AppError::Validation(errors));
            }
        };

        let farmer = self.farmers.insert(dto.farmer, farmer_address).await;
        let farm = self.farms.insert(dto.farm, farmer.id, farm_address).await;

        tracing::info!(
            "Registration completed: farmer_id={}, farm_id={}",
            farmer.id,
            farm.id
        );

        Ok(RegistrationResponseDto {
            farmer: self.farmers.get(farmer.id).await?,
            farm: self.farms.get(farm.id).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::farmers::dtos::{FarmerInputDto, FarmerQueryParams};
    use crate::features::farms::dtos::FarmInputDto;
    use crate::features::locations::dtos::AddressInputDto;
    use crate::features::locations::LocationService;

    fn services() -> (RegistrationService, Arc<FarmerService>) {
        let locations = Arc::new(LocationService::load(None).unwrap());
        let farmers = Arc::new(FarmerService::new(locations.clone()));
        let farms = Arc::new(FarmService::new(farmers.clone(), locations));
        (RegistrationService::new(farmers.clone(), farms), farmers)
    }

    fn registration() -> RegistrationDto {
        let location = AddressInputDto {
            province_id: Some(2),
            municipality_id: Some(20),
            barangay_id: Some(111),
            street: None,
        };
        RegistrationDto {
            farmer: FarmerInputDto {
                firstname: "Juan".to_string(),
                middlename: None,
                lastname: "Dela Cruz".to_string(),
                contact_number: "09171234567".to_string(),
                farming_experience: Some(8),
                location: location.clone(),
            },
            farm: FarmInputDto {
                name: "Dela Cruz Ricefield".to_string(),
                farmer_id: None,
                total_area: Some(1.25),
                soil_type: None,
                location,
            },
        }
    }

    #[tokio::test]
    async fn test_register_links_farm_to_new_farmer() {
        let (service, _) = services();
        let result = tokio_test::assert_ok!(service.register(registration()).await);
        assert_eq!(result.farm.farmer_id, result.farmer.id);
        assert_eq!(result.farm.farmer_name.as_deref(), Some("Juan Dela Cruz"));
    }

    #[tokio::test]
    async fn test_errors_are_keyed_by_section_and_nothing_is_stored() {
        let (service, farmers) = services();
        let mut dto = registration();
        dto.farmer.contact_number = "phone".to_string();
        dto.farm.location.municipality_id = Some(10);

        match tokio_test::assert_err!(service.register(dto).await) {
            AppError::Validation(errors) => {
                assert!(errors.contains_key("farmer.contact_number"));
                assert!(errors.contains_key("farm.location.municipality_id"));
                assert!(!errors.keys().any(|k| k.starts_with("farmer.location")));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let (_, meta) = farmers.list(&FarmerQueryParams::default()).await;
        assert_eq!(meta.total, 0);
    }
}
