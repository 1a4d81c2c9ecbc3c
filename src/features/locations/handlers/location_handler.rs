use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::locations::dtos::{
    BarangayResponseDto, LocationSearchQuery, LocationTablesDto, MunicipalityResponseDto,
    ProvinceResponseDto,
};
use crate::features::locations::services::LocationService;
use crate::shared::types::ApiResponse;

/// Full reference tables for client-side cascading selects
#[utoipa::path(
    get,
    path = "/api/locations",
    responses(
        (status = 200, description = "Provinces, municipalities and barangays", body = ApiResponse<LocationTablesDto>)
    ),
    tag = "locations"
)]
pub async fn get_reference_tables(
    State(service): State<Arc<LocationService>>,
) -> Result<Json<ApiResponse<LocationTablesDto>>> {
    let tables = LocationTablesDto::from(service.hierarchy().clone());
    Ok(Json(ApiResponse::success(Some(tables), None, None)))
}

// ==================== Province Handlers ====================

/// List all provinces
#[utoipa::path(
    get,
    path = "/api/locations/provinces",
    params(LocationSearchQuery),
    responses(
        (status = 200, description = "List of provinces", body = ApiResponse<Vec<ProvinceResponseDto>>)
    ),
    tag = "locations"
)]
pub async fn list_provinces(
    State(service): State<Arc<LocationService>>,
    AppQuery(query): AppQuery<LocationSearchQuery>,
) -> Result<Json<ApiResponse<Vec<ProvinceResponseDto>>>> {
    let provinces = service.list_provinces(query.search.as_deref());
    let dtos: Vec<ProvinceResponseDto> = provinces.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get a province by id
#[utoipa::path(
    get,
    path = "/api/locations/provinces/{id}",
    params(
        ("id" = i64, Path, description = "Province id")
    ),
    responses(
        (status = 200, description = "Province details", body = ApiResponse<ProvinceResponseDto>),
        (status = 404, description = "Province not found")
    ),
    tag = "locations"
)]
pub async fn get_province(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProvinceResponseDto>>> {
    let province = service.get_province(id)?;
    Ok(Json(ApiResponse::success(Some(province.into()), None, None)))
}

/// List municipalities in a province
#[utoipa::path(
    get,
    path = "/api/locations/provinces/{id}/municipalities",
    params(
        ("id" = i64, Path, description = "Province id"),
        LocationSearchQuery
    ),
    responses(
        (status = 200, description = "List of municipalities in the province", body = ApiResponse<Vec<MunicipalityResponseDto>>),
        (status = 404, description = "Province not found")
    ),
    tag = "locations"
)]
pub async fn list_municipalities_by_province(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
    AppQuery(query): AppQuery<LocationSearchQuery>,
) -> Result<Json<ApiResponse<Vec<MunicipalityResponseDto>>>> {
    let municipalities = service.list_municipalities_by_province(id, query.search.as_deref())?;
    let dtos: Vec<MunicipalityResponseDto> = municipalities.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

// ==================== Municipality Handlers ====================

/// Get a municipality by id
#[utoipa::path(
    get,
    path = "/api/locations/municipalities/{id}",
    params(
        ("id" = i64, Path, description = "Municipality id")
    ),
    responses(
        (status = 200, description = "Municipality details", body = ApiResponse<MunicipalityResponseDto>),
        (status = 404, description = "Municipality not found")
    ),
    tag = "locations"
)]
pub async fn get_municipality(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MunicipalityResponseDto>>> {
    let municipality = service.get_municipality(id)?;
    Ok(Json(ApiResponse::success(
        Some(municipality.into()),
        None,
        None,
    )))
}

/// List barangays in a municipality
#[utoipa::path(
    get,
    path = "/api/locations/municipalities/{id}/barangays",
    params(
        ("id" = i64, Path, description = "Municipality id"),
        LocationSearchQuery
    ),
    responses(
        (status = 200, description = "List of barangays in the municipality", body = ApiResponse<Vec<BarangayResponseDto>>),
        (status = 404, description = "Municipality not found")
    ),
    tag = "locations"
)]
pub async fn list_barangays_by_municipality(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
    AppQuery(query): AppQuery<LocationSearchQuery>,
) -> Result<Json<ApiResponse<Vec<BarangayResponseDto>>>> {
    let barangays = service.list_barangays_by_municipality(id, query.search.as_deref())?;
    let dtos: Vec<BarangayResponseDto> = barangays.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

// ==================== Barangay Handlers ====================

/// Get a barangay by id
#[utoipa::path(
    get,
    path = "/api/locations/barangays/{id}",
    params(
        ("id" = i64, Path, description = "Barangay id")
    ),
    responses(
        (status = 200, description = "Barangay details", body = ApiResponse<BarangayResponseDto>),
        (status = 404, description = "Barangay not found")
    ),
    tag = "locations"
)]
pub async fn get_barangay(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BarangayResponseDto>>> {
    let barangay = service.get_barangay(id)?;
    Ok(Json(ApiResponse::success(Some(barangay.into()), None, None)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use super::*;
    use crate::features::locations::routes;

    fn server() -> TestServer {
        let service = Arc::new(LocationService::load(None).unwrap());
        TestServer::new(routes::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_reference_tables_are_served_whole() {
        let response = server().get("/api/locations").await;
        response.assert_status_ok();

        let body: ApiResponse<LocationTablesDto> = response.json();
        let tables = body.data.unwrap();
        assert!(tables.provinces.iter().any(|p| p.name == "Ilocos Norte"));
        assert!(tables.municipalities.iter().any(|m| m.name == "Laoag"));
        assert!(!tables.barangays.is_empty());
    }

    #[tokio::test]
    async fn test_municipalities_scoped_and_searchable() {
        let response = server()
            .get("/api/locations/provinces/1/municipalities")
            .add_query_param("search", "lao")
            .await;
        response.assert_status_ok();

        let body: ApiResponse<Vec<MunicipalityResponseDto>> = response.json();
        let names: Vec<String> = body.data.unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Laoag"]);
    }

    #[tokio::test]
    async fn test_unknown_municipality_is_not_found() {
        let response = server().get("/api/locations/municipalities/999/barangays").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }
}
