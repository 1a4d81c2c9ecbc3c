use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::pesticides::dtos::{
    PesticideInputDto, PesticideQueryParams, PesticideResponseDto,
};
use crate::features::pesticides::services::PesticideService;
use crate::shared::types::ApiResponse;

/// List pesticides
#[utoipa::path(
    get,
    path = "/api/pesticides",
    params(PesticideQueryParams),
    responses(
        (status = 200, description = "Page of pesticides", body = ApiResponse<Vec<PesticideResponseDto>>),
        (status = 400, description = "Malformed query parameters")
    ),
    tag = "pesticides"
)]
pub async fn list_pesticides(
    State(service): State<Arc<PesticideService>>,
    AppQuery(params): AppQuery<PesticideQueryParams>,
) -> Result<Json<ApiResponse<Vec<PesticideResponseDto>>>> {
    let (pesticides, meta) = service.list(&params).await;
    Ok(Json(ApiResponse::success(Some(pesticides), None, Some(meta))))
}

/// Get a pesticide by id
#[utoipa::path(
    get,
    path = "/api/pesticides/{id}",
    params(
        ("id" = i64, Path, description = "Pesticide id")
    ),
    responses(
        (status = 200, description = "Pesticide details", body = ApiResponse<PesticideResponseDto>),
        (status = 404, description = "Pesticide not found")
    ),
    tag = "pesticides"
)]
pub async fn get_pesticide(
    State(service): State<Arc<PesticideService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PesticideResponseDto>>> {
    let pesticide = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(pesticide), None, None)))
}

/// Create a pesticide
#[utoipa::path(
    post,
    path = "/api/pesticides",
    request_body = PesticideInputDto,
    responses(
        (status = 201, description = "Pesticide created", body = ApiResponse<PesticideResponseDto>),
        (status = 422, description = "Field validation failed")
    ),
    tag = "pesticides"
)]
pub async fn create_pesticide(
    State(service): State<Arc<PesticideService>>,
    AppJson(dto): AppJson<PesticideInputDto>,
) -> Result<(StatusCode, Json<ApiResponse<PesticideResponseDto>>)> {
    let pesticide = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(pesticide),
            Some("Pesticide created successfully.".to_string()),
            None,
        )),
    ))
}

/// Update a pesticide
#[utoipa::path(
    put,
    path = "/api/pesticides/{id}",
    params(
        ("id" = i64, Path, description = "Pesticide id")
    ),
    request_body = PesticideInputDto,
    responses(
        (status = 200, description = "Pesticide updated", body = ApiResponse<PesticideResponseDto>),
        (status = 404, description = "Pesticide not found"),
        (status = 422, description = "Field validation failed")
    ),
    tag = "pesticides"
)]
pub async fn update_pesticide(
    State(service): State<Arc<PesticideService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<PesticideInputDto>,
) -> Result<Json<ApiResponse<PesticideResponseDto>>> {
    let pesticide = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(pesticide),
        Some("Pesticide updated successfully.".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::json;

    use super::*;
    use crate::features::locations::LocationService;
    use crate::features::pesticides::routes;

    fn server() -> TestServer {
        let locations = Arc::new(LocationService::load(None).unwrap());
        TestServer::new(routes::routes(Arc::new(PesticideService::new(locations)))).unwrap()
    }

    #[tokio::test]
    async fn test_toxicity_facet_in_query_string() {
        let server = server();
        for (name, toxicity) in [("Cymbush", "II"), ("Karate", "III"), ("Decis", "II")] {
            server
                .post("/api/pesticides")
                .json(&json!({
                    "name": name,
                    "active_ingredient": "Deltamethrin",
                    "toxicity": toxicity,
                    "location": {"province_id": 1, "municipality_id": 10, "barangay_id": 101}
                }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server
            .get("/api/pesticides")
            .add_query_param("toxicity", "II")
            .await;
        let body: ApiResponse<Vec<PesticideResponseDto>> = response.json();
        let names: Vec<String> = body.data.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Decis", "Cymbush"]);
    }

    #[tokio::test]
    async fn test_unknown_toxicity_is_bad_request() {
        let response = server()
            .get("/api/pesticides")
            .add_query_param("toxicity", "V")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
