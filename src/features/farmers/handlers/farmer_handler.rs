use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::farmers::dtos::{FarmerInputDto, FarmerQueryParams, FarmerResponseDto};
use crate::features::farmers::services::FarmerService;
use crate::shared::types::ApiResponse;

/// List farmers
///
/// Pages are newest first. A page past the end is clamped to the last page
/// and `meta.current_page` reports the page actually returned.
#[utoipa::path(
    get,
    path = "/api/farmers",
    params(FarmerQueryParams),
    responses(
        (status = 200, description = "Page of farmers", body = ApiResponse<Vec<FarmerResponseDto>>),
        (status = 400, description = "Malformed query parameters")
    ),
    tag = "farmers"
)]
pub async fn list_farmers(
    State(service): State<Arc<FarmerService>>,
    AppQuery(params): AppQuery<FarmerQueryParams>,
) -> Result<Json<ApiResponse<Vec<FarmerResponseDto>>>> {
    let (farmers, meta) = service.list(&params).await;
    Ok(Json(ApiResponse::success(Some(farmers), None, Some(meta))))
}

/// Get a farmer by id
#[utoipa::path(
    get,
    path = "/api/farmers/{id}",
    params(
        ("id" = i64, Path, description = "Farmer id")
    ),
    responses(
        (status = 200, description = "Farmer details", body = ApiResponse<FarmerResponseDto>),
        (status = 404, description = "Farmer not found")
    ),
    tag = "farmers"
)]
pub async fn get_farmer(
    State(service): State<Arc<FarmerService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<FarmerResponseDto>>> {
    let farmer = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(farmer), None, None)))
}

/// Create a farmer
#[utoipa::path(
    post,
    path = "/api/farmers",
    request_body = FarmerInputDto,
    responses(
        (status = 201, description = "Farmer created", body = ApiResponse<FarmerResponseDto>),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Field validation failed")
    ),
    tag = "farmers"
)]
pub async fn create_farmer(
    State(service): State<Arc<FarmerService>>,
    AppJson(dto): AppJson<FarmerInputDto>,
) -> Result<(StatusCode, Json<ApiResponse<FarmerResponseDto>>)> {
    let farmer = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(farmer),
            Some("Farmer created successfully.".to_string()),
            None,
        )),
    ))
}

/// Update a farmer
#[utoipa::path(
    put,
    path = "/api/farmers/{id}",
    params(
        ("id" = i64, Path, description = "Farmer id")
    ),
    request_body = FarmerInputDto,
    responses(
        (status = 200, description = "Farmer updated", body = ApiResponse<FarmerResponseDto>),
        (status = 404, description = "Farmer not found"),
        (status = 422, description = "Field validation failed")
    ),
    tag = "farmers"
)]
pub async fn update_farmer(
    State(service): State<Arc<FarmerService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<FarmerInputDto>,
) -> Result<Json<ApiResponse<FarmerResponseDto>>> {
    let farmer = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(farmer),
        Some("Farmer updated successfully.".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::json;

    use super::*;
    use crate::features::farmers::routes;
    use crate::features::locations::LocationService;

    fn server() -> TestServer {
        let locations = Arc::new(LocationService::load(None).unwrap());
        let service = Arc::new(FarmerService::new(locations));
        TestServer::new(routes::routes(service)).unwrap()
    }

    fn payload(firstname: &str) -> serde_json::Value {
        json!({
            "firstname": firstname,
            "middlename": "",
            "lastname": "Dela Cruz",
            "contact_number": "09171234567",
            "farming_experience": 10,
            "location": {"province_id": 1, "municipality_id": 10, "barangay_id": 100}
        })
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let server = server();
        let response = server.post("/api/farmers").json(&payload("Juan")).await;
        response.assert_status(StatusCode::CREATED);

        let response = server.get("/api/farmers").add_query_param("search", "juan").await;
        response.assert_status_ok();
        let body: ApiResponse<Vec<FarmerResponseDto>> = response.json();
        let meta = body.meta.unwrap();
        assert_eq!(meta.total, 1);
        assert_eq!(meta.search.as_deref(), Some("juan"));
        assert_eq!(body.data.unwrap()[0].firstname, "Juan");
    }

    #[tokio::test]
    async fn test_invalid_contact_number_is_field_keyed() {
        let mut body = payload("Juan");
        body["contact_number"] = json!("call me");

        let response = server().post("/api/farmers").json(&body).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["field_errors"]["contact_number"].is_string());
        assert!(body["field_errors"].get("firstname").is_none());
    }

    #[tokio::test]
    async fn test_page_past_end_is_clamped() {
        let server = server();
        for name in ["Ana", "Ben", "Carlo"] {
            server.post("/api/farmers").json(&payload(name)).await;
        }

        let response = server
            .get("/api/farmers")
            .add_query_param("per_page", 2)
            .add_query_param("page", 9)
            .await;
        let body: ApiResponse<Vec<FarmerResponseDto>> = response.json();
        let meta = body.meta.unwrap();
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.last_page, 2);
        assert_eq!(body.data.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_page_is_bad_request() {
        let response = server()
            .get("/api/farmers")
            .add_query_param("page", "abc")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_unknown_farmer() {
        let response = server().put("/api/farmers/42").json(&payload("Juan")).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
