use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::farmers::dtos::{FarmerInputDto, FarmerQueryParams, FarmerResponseDto};
use crate::features::farmers::models::Farmer;
use crate::features::locations::models::Address;
use crate::features::locations::LocationService;
use crate::modules::storage::MemoryTable;
use crate::shared::types::{FieldErrors, PageMeta};

/// Key of the address sub-object in farmer payloads
pub const LOCATION_KEY: &str = "location";

#[derive(Debug)]
pub struct FarmerService {
    table: MemoryTable<Farmer>,
    locations: Arc<LocationService>,
}

impl FarmerService {
    pub fn new(locations: Arc<LocationService>) -> Self {
        Self {
            table: MemoryTable::new("farmers"),
            locations,
        }
    }

    fn to_dto(&self, farmer: Farmer) -> FarmerResponseDto {
        FarmerResponseDto::from_model(farmer, self.locations.hierarchy())
    }

    /// Validate a farmer payload, keying address errors under `location_key`
    pub fn check(
        &self,
        dto: &FarmerInputDto,
        location_key: &str,
    ) -> std::result::Result<Address, FieldErrors> {
        self.locations
            .validate_entity(dto, location_key, &dto.location)
    }

    /// List farmers with search, province facet and pagination
    pub async fn list(
        &self,
        params: &FarmerQueryParams,
    ) -> (Vec<FarmerResponseDto>, PageMeta) {
        let query = params.list_query();
        let term = query.search_term();

        let (farmers, meta) = self
            .table
            .page(&query, |f| {
                params
                    .province_id
                    .is_none_or(|p| f.address.province_id == p)
                    && term.as_deref().is_none_or(|t| f.matches_search(t))
            })
            .await;

        let dtos = farmers.into_iter().map(|f| self.to_dto(f)).collect();
        (dtos, meta)
    }

    pub async fn get(&self, id: i64) -> Result<FarmerResponseDto> {
        self.find(id).await.map(|f| self.to_dto(f))
    }

    pub async fn exists(&self, id: i64) -> bool {
        self.table.contains(id).await
    }

    /// Display name of a farmer, `None` for unknown ids
    pub async fn full_name(&self, id: i64) -> Option<String> {
        self.table.get(id).await.map(|f| f.full_name())
    }

    async fn find(&self, id: i64) -> Result<Farmer> {
        self.table
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Farmer with id '{}' not found", id)))
    }

    pub async fn create(&self, dto: FarmerInputDto) -> Result<FarmerResponseDto> {
        let address = self.check(&dto, LOCATION_KEY).map_err(AppError::Validation)?;
        let farmer = self.insert(dto, address).await;
        Ok(self.to_dto(farmer))
    }

    /// Store an already validated payload
    pub(crate) async fn insert(&self, dto: FarmerInputDto, address: Address) -> Farmer {
        let now = Utc::now();
        let farmer = self
            .table
            .insert_with(|id| Farmer {
                id,
                firstname: dto.firstname.trim().to_string(),
                middlename: dto.middlename.map(|m| m.trim().to_string()),
                lastname: dto.lastname.trim().to_string(),
                contact_number: dto.contact_number.trim().to_string(),
                farming_experience: dto.farming_experience.unwrap_or_default(),
                address,
                created_at: now,
                updated_at: now,
            })
            .await;

        tracing::info!("Farmer created: id={}", farmer.id);
        farmer
    }

    pub async fn update(&self, id: i64, dto: FarmerInputDto) -> Result<FarmerResponseDto> {
        // Unknown ids are a 404 before any field errors
        self.find(id).await?;
        let address = self.check(&dto, LOCATION_KEY).map_err(AppError::Validation)?;

        let farmer = self
            .table
            .update(id, |f| {
                f.firstname = dto.firstname.trim().to_string();
                f.middlename = dto.middlename.map(|m| m.trim().to_string());
                f.lastname = dto.lastname.trim().to_string();
                f.contact_number = dto.contact_number.trim().to_string();
                f.farming_experience = dto.farming_experience.unwrap_or_default();
                f.address = address;
                f.updated_at = Utc::now();
            })
            .await
            .ok_or_else(|| AppError::NotFound(format!("Farmer with id '{}' not found", id)))?;

        tracing::info!("Farmer updated: id={}", id);
        Ok(self.to_dto(farmer))
    }
}
