use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::locations::LocationService;
use crate::features::pesticides::dtos::{
    PesticideInputDto, PesticideQueryParams, PesticideResponseDto,
};
use crate::features::pesticides::models::{Pesticide, ToxicityCategory};
use crate::modules::storage::MemoryTable;
use crate::shared::types::PageMeta;

#[derive(Debug)]
pub struct PesticideService {
    table: MemoryTable<Pesticide>,
    locations: Arc<LocationService>,
}

impl PesticideService {
    pub fn new(locations: Arc<LocationService>) -> Self {
        Self {
            table: MemoryTable::new("pesticides"),
            locations,
        }
    }

    fn to_dto(&self, pesticide: Pesticide) -> PesticideResponseDto {
        PesticideResponseDto::from_model(pesticide, self.locations.hierarchy())
    }

    /// List pesticides with search, toxicity facet and pagination
    pub async fn list(
        &self,
        params: &PesticideQueryParams,
    ) -> (Vec<PesticideResponseDto>, PageMeta) {
        let query = params.list_query();
        let term = query.search_term();

        let (rows, meta) = self
            .table
            .page(&query, |p| {
                params.toxicity.is_none_or(|t| p.toxicity == t)
                    && term.as_deref().is_none_or(|t| p.matches_search(t))
            })
            .await;

        (rows.into_iter().map(|p| self.to_dto(p)).collect(), meta)
    }

    pub async fn get(&self, id: i64) -> Result<PesticideResponseDto> {
        self.table
            .get(id)
            .await
            .map(|p| self.to_dto(p))
            .ok_or_else(|| AppError::NotFound(format!("Pesticide with id '{}' not found", id)))
    }

    pub async fn create(&self, dto: PesticideInputDto) -> Result<PesticideResponseDto> {
        let address = self
            .locations
            .validate_entity(&dto, "location", &dto.location)
            .map_err(AppError::Validation)?;

        let now = Utc::now();
        let pesticide = self
            .table
            .insert_with(|id| Pesticide {
                id,
                name: dto.name.trim().to_string(),
                active_ingredient: dto.active_ingredient.trim().to_string(),
                toxicity: dto.toxicity.unwrap_or(ToxicityCategory::IV),
                target_pests: dto.target_pests.map(|p| p.trim().to_string()),
                address,
                created_at: now,
                updated_at: now,
            })
            .await;

        tracing::info!(
            "Pesticide created: id={}, toxicity={}",
            pesticide.id,
            pesticide.toxicity
        );
        Ok(self.to_dto(pesticide))
    }

    pub async fn update(&self, id: i64, dto: PesticideInputDto) -> Result<PesticideResponseDto> {
        if !self.table.contains(id).await {
            return Err(AppError::NotFound(format!("Pesticide with id '{}' not found", id)));
        }
        let address = self
            .locations
            .validate_entity(&dto, "location", &dto.location)
            .map_err(AppError::Validation)?;

        let pesticide = self
            .table
            .update(id, |p| {
                p.name = dto.name.trim().to_string();
                p.active_ingredient = dto.active_ingredient.trim().to_string();
                if let Some(toxicity) = dto.toxicity {
                    p.toxicity = toxicity;
                }
                p.target_pests = dto.target_pests.map(|t| t.trim().to_string());
                p.address = address;
                p.updated_at = Utc::now();
            })
            .await
            .ok_or_else(|| AppError::NotFound(format!("Pesticide with id '{}' not found", id)))?;

        tracing::info!("Pesticide updated: id={}", id);
        Ok(self.to_dto(pesticide))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::locations::dtos::AddressInputDto;

    fn dto(name: &str, toxicity: Option<ToxicityCategory>) -> PesticideInputDto {
        PesticideInputDto {
            name: name.to_string(),
            active_ingredient: "Cypermethrin".to_string(),
            toxicity,
            target_pests: Some("Rice stem borer".to_string()),
            location: AddressInputDto {
                province_id: Some(4),
                municipality_id: Some(40),
                barangay_id: Some(123),
                street: Some("Arellano St.".to_string()),
            },
        }
    }

    fn service() -> PesticideService {
        PesticideService::new(Arc::new(LocationService::load(None).unwrap()))
    }

    #[tokio::test]
    async fn test_toxicity_is_required() {
        match service().create(dto("Cymbush", None)).await.unwrap_err() {
            AppError::Validation(errors) => assert!(errors.contains_key("toxicity")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_by_toxicity_and_search() {
        let service = service();
        service.create(dto("Cymbush", Some(ToxicityCategory::II))).await.unwrap();
        service.create(dto("Karate", Some(ToxicityCategory::III))).await.unwrap();

        let params = PesticideQueryParams {
            toxicity: Some(ToxicityCategory::III),
            ..Default::default()
        };
        let (items, meta) = service.list(&params).await;
        assert_eq!(meta.total, 1);
        assert_eq!(items[0].name, "Karate");

        let params = PesticideQueryParams {
            search: Some("STEM BORER".to_string()),
            ..Default::default()
        };
        assert_eq!(service.list(&params).await.1.total, 2);
    }

    #[tokio::test]
    async fn test_update_changes_toxicity() {
        let service = service();
        let created = service.create(dto("Cymbush", Some(ToxicityCategory::II))).await.unwrap();
        let updated = service
            .update(created.id, dto("Cymbush 5EC", Some(ToxicityCategory::I)))
            .await
            .unwrap();
        assert_eq!(updated.toxicity, ToxicityCategory::I);
        assert_eq!(updated.name, "Cymbush 5EC");
    }
}
