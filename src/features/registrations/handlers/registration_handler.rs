use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::registrations::dtos::{RegistrationDto, RegistrationResponseDto};
use crate::features::registrations::services::RegistrationService;
use crate::shared::types::ApiResponse;

/// Register a farmer and their farm in one request
///
/// Both sections are validated before anything is stored. Field errors are
/// keyed `farmer.<field>` and `farm.<field>`.
#[utoipa::path(
    post,
    path = "/api/registrations",
    request_body = RegistrationDto,
    responses(
        (status = 201, description = "Farmer and farm created", body = ApiResponse<RegistrationResponseDto>),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Field validation failed")
    ),
    tag = "registrations"
)]
pub async fn register(
    State(service): State<Arc<RegistrationService>>,
    AppJson(dto): AppJson<RegistrationDto>,
) -> Result<(StatusCode, Json<ApiResponse<RegistrationResponseDto>>)> {
    let registration = service.register(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(registration),
            Some("Farmer and farm registered successfully.".to_string()),
            None,
        )),
    ))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::json;

    use super::*;
    use crate::features::farmers::FarmerService;
    use crate::features::farms::FarmService;
    use crate::features::locations::LocationService;
    use crate::features::registrations::routes;

    fn server() -> TestServer {
        let locations = Arc::new(LocationService::load(None).unwrap());
        let farmers = Arc::new(FarmerService::new(locations.clone()));
        let farms = Arc::new(FarmService::new(farmers.clone(), locations));
        let service = Arc::new(RegistrationService::new(farmers, farms));
        TestServer::new(routes::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_contact_number_keyed_under_farmer() {
        let response = server()
            .post("/api/registrations")
            .json(&json!({
                "farmer": {
                    "firstname": "Juan",
                    "lastname": "Dela Cruz",
                    "contact_number": "0917-ABC",
                    "farming_experience": 4,
                    "location": {"province_id": 1, "municipality_id": 10, "barangay_id": 100}
                },
                "farm": {
                    "name": "North Field",
                    "total_area": 2.0,
                    "location": {"province_id": 1, "municipality_id": 10, "barangay_id": 100}
                }
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json();
        let field_errors = body["field_errors"].as_object().unwrap();
        assert_eq!(field_errors.len(), 1);
        assert!(field_errors.contains_key("farmer.contact_number"));
    }
}
