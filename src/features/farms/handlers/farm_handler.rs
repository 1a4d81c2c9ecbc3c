use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::farms::dtos::{FarmInputDto, FarmQueryParams, FarmResponseDto};
use crate::features::farms::services::FarmService;
use crate::shared::types::ApiResponse;

/// List farms
#[utoipa::path(
    get,
    path = "/api/farms",
    params(FarmQueryParams),
    responses(
        (status = 200, description = "Page of farms", body = ApiResponse<Vec<FarmResponseDto>>),
        (status = 400, description = "Malformed query parameters")
    ),
    tag = "farms"
)]
pub async fn list_farms(
    State(service): State<Arc<FarmService>>,
    AppQuery(params): AppQuery<FarmQueryParams>,
) -> Result<Json<ApiResponse<Vec<FarmResponseDto>>>> {
    let (farms, meta) = service.list(&params).await;
    Ok(Json(ApiResponse::success(Some(farms), None, Some(meta))))
}

/// Get a farm by id
#[utoipa::path(
    get,
    path = "/api/farms/{id}",
    params(
        ("id" = i64, Path, description = "Farm id")
    ),
    responses(
        (status = 200, description = "Farm details", body = ApiResponse<FarmResponseDto>),
        (status = 404, description = "Farm not found")
    ),
    tag = "farms"
)]
pub async fn get_farm(
    State(service): State<Arc<FarmService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<FarmResponseDto>>> {
    let farm = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(farm), None, None)))
}

/// Create a farm for an existing farmer
#[utoipa::path(
    post,
    path = "/api/farms",
    request_body = FarmInputDto,
    responses(
        (status = 201, description = "Farm created", body = ApiResponse<FarmResponseDto>),
        (status = 422, description = "Field validation failed")
    ),
    tag = "farms"
)]
pub async fn create_farm(
    State(service): State<Arc<FarmService>>,
    AppJson(dto): AppJson<FarmInputDto>,
) -> Result<(StatusCode, Json<ApiResponse<FarmResponseDto>>)> {
    let farm = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(farm),
            Some("Farm created successfully.".to_string()),
            None,
        )),
    ))
}

/// Update a farm
#[utoipa::path(
    put,
    path = "/api/farms/{id}",
    params(
        ("id" = i64, Path, description = "Farm id")
    ),
    request_body = FarmInputDto,
    responses(
        (status = 200, description = "Farm updated", body = ApiResponse<FarmResponseDto>),
        (status = 404, description = "Farm not found"),
        (status = 422, description = "Field validation failed")
    ),
    tag = "farms"
)]
pub async fn update_farm(
    State(service): State<Arc<FarmService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<FarmInputDto>,
) -> Result<Json<ApiResponse<FarmResponseDto>>> {
    let farm = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(farm),
        Some("Farm updated successfully.".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::json;

    use super::*;
    use crate::features::farmers::FarmerService;
    use crate::features::farms::routes;
    use crate::features::locations::LocationService;

    fn server() -> TestServer {
        let locations = Arc::new(LocationService::load(None).unwrap());
        let farmers = Arc::new(FarmerService::new(locations.clone()));
        let service = Arc::new(FarmService::new(farmers, locations));
        TestServer::new(routes::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_create_without_owner_is_rejected() {
        let response = server()
            .post("/api/farms")
            .json(&json!({
                "name": "Riverside",
                "total_area": 3.0,
                "soil_type": "",
                "location": {"province_id": 1, "municipality_id": 10}
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json();
        assert!(body["field_errors"]["farmer_id"].is_string());
        assert!(body["field_errors"]["location.barangay_id"].is_string());
    }

    #[tokio::test]
    async fn test_empty_list_has_single_page() {
        let response = server().get("/api/farms").add_query_param("page", 4).await;
        response.assert_status_ok();

        let body: ApiResponse<Vec<FarmResponseDto>> = response.json();
        let meta = body.meta.unwrap();
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.last_page, 1);
        assert_eq!(meta.total, 0);
        assert!(body.data.unwrap().is_empty());
    }
}
