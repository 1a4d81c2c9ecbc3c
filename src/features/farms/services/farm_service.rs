use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::farmers::FarmerService;
use crate::features::farms::dtos::{FarmInputDto, FarmQueryParams, FarmResponseDto};
use crate::features::farms::models::Farm;
use crate::features::locations::models::Address;
use crate::features::locations::LocationService;
use crate::modules::storage::MemoryTable;
use crate::shared::types::{FieldErrors, PageMeta};

#[derive(Debug)]
pub struct FarmService {
    table: MemoryTable<Farm>,
    farmers: Arc<FarmerService>,
    locations: Arc<LocationService>,
}

impl FarmService {
    pub fn new(farmers: Arc<FarmerService>, locations: Arc<LocationService>) -> Self {
        Self {
            table: MemoryTable::new("farms"),
            farmers,
            locations,
        }
    }

    async fn to_dto(&self, farm: Farm) -> FarmResponseDto {
        let farmer_name = self.farmers.full_name(farm.farmer_id).await;
        FarmResponseDto::from_model(farm, farmer_name, self.locations.hierarchy())
    }

    /// Validate a farm payload.
    ///
    /// Address errors are keyed under `location_key`. The owner is checked
    /// only when `owner_required`; registrations assign it themselves.
    pub async fn check(
        &self,
        dto: &FarmInputDto,
        location_key: &str,
        owner_required: bool,
    ) -> std::result::Result<Address, FieldErrors> {
        let located = self
            .locations
            .validate_entity(dto, location_key, &dto.location);
        let mut errors = located.as_ref().err().cloned().unwrap_or_default();

        if owner_required {
            match dto.farmer_id {
                None => {
                    errors.insert(
                        "farmer_id".to_string(),
                        "The farmer field is required.".to_string(),
                    );
                }
                Some(id) if !self.farmers.exists(id).await => {
                    errors.insert(
                        "farmer_id".to_string(),
                        "The selected farmer is invalid.".to_string(),
                    );
                }
                Some(_) => {}
            }
        }

        if errors.is_empty() {
            located
        } else {
            Err(errors)
        }
    }

    /// List farms with search, owner / province facets and pagination
    pub async fn list(&self, params: &FarmQueryParams) -> (Vec<FarmResponseDto>, PageMeta) {
        let query = params.list_query();
        let term = query.search_term();

        let (farms, meta) = self
            .table
            .page(&query, |f| params.keeps(f, term.as_deref()))
            .await;

        let mut dtos = Vec::with_capacity(farms.len());
        for farm in farms {
            dtos.push(self.to_dto(farm).await);
        }
        (dtos, meta)
    }

    pub async fn get(&self, id: i64) -> Result<FarmResponseDto> {
        let farm = self.find(id).await?;
        Ok(self.to_dto(farm).await)
    }

    async fn find(&self, id: i64) -> Result<Farm> {
        self.table
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Farm with id '{}' not found", id)))
    }

    pub async fn create(&self, dto: FarmInputDto) -> Result<FarmResponseDto> {
        let address = self
            .check(&dto, "location", true)
            .await
            .map_err(AppError::Validation)?;
        let farmer_id = dto.farmer_id.unwrap_or_default();
        let farm = self.insert(dto, farmer_id, address).await;
        Ok(self.to_dto(farm).await)
    }

    /// Store an already validated payload under `farmer_id`
    pub(crate) async fn insert(&self, dto: FarmInputDto, farmer_id: i64, address: Address) -> Farm {
        let now = Utc::now();
        let farm = self
            .table
            .insert_with(|id| Farm {
                id,
                name: dto.name.trim().to_string(),
                farmer_id,
                total_area: dto.total_area.unwrap_or_default(),
                soil_type: dto.soil_type.map(|s| s.trim().to_string()),
                address,
                created_at: now,
                updated_at: now,
            })
            .await;

        tracing::info!("Farm created: id={}, farmer_id={}", farm.id, farmer_id);
        farm
    }

    pub async fn update(&self, id: i64, dto: FarmInputDto) -> Result<FarmResponseDto> {
        self.find(id).await?;
        let address = self
            .check(&dto, "location", true)
            .await
            .map_err(AppError::Validation)?;

        let farm = self
            .table
            .update(id, |f| {
                f.name = dto.name.trim().to_string();
                f.farmer_id = dto.farmer_id.unwrap_or(f.farmer_id);
                f.total_area = dto.total_area.unwrap_or(f.total_area);
                f.soil_type = dto.soil_type.map(|s| s.trim().to_string());
                f.address = address;
                f.updated_at = Utc::now();
            })
            .await
            .ok_or_else(|| AppError::NotFound(format!("Farm with id '{}' not found", id)))?;

        tracing::info!("Farm updated: id={}", id);
        Ok(self.to_dto(farm).await)
    }
}
