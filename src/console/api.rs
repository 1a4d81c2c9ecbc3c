//! HTTP adapters speaking the API envelope

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::console::error::{ClientError, ClientResult};
use crate::console::form::FormSink;
use crate::console::query::{DebouncedQueryState, ListSource, Page, SearchFilterState};
use crate::core::config::ConsoleConfig;
use crate::features::locations::dtos::LocationTablesDto;
use crate::features::locations::models::LocationHierarchy;
use crate::shared::types::ApiResponse;

/// Shared HTTP client rooted at the API base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Full location tables for the cascading selects
    pub async fn fetch_locations(&self) -> ClientResult<LocationHierarchy> {
        let response = self.http_client.get(self.url("/api/locations")).send().await?;
        let body: ApiResponse<LocationTablesDto> = read_envelope(response).await?;
        let tables = body.data.ok_or_else(|| missing_data("/api/locations"))?;
        Ok(tables.into())
    }

    pub fn list_source<T>(&self, path: &'static str) -> HttpListSource<T> {
        HttpListSource {
            client: self.clone(),
            path,
            _marker: PhantomData,
        }
    }

    /// List screen state for `path` with the configured quiet period and page size
    pub fn list_state<T>(&self, path: &'static str, config: &ConsoleConfig) -> DebouncedQueryState<T>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        DebouncedQueryState::new(
            Arc::new(self.list_source(path)),
            config.search_debounce_ms,
            SearchFilterState::with_per_page(config.default_per_page),
        )
    }

    pub fn form_sink<T, R>(&self, path: &'static str) -> HttpFormSink<T, R> {
        HttpFormSink {
            client: self.clone(),
            path,
            _marker: PhantomData,
        }
    }
}

fn missing_data(path: &str) -> ClientError {
    ClientError::Server {
        status: StatusCode::OK.as_u16(),
        message: format!("Response from {} carried no data", path),
    }
}

/// Decode the envelope and map failures.
///
/// `422` becomes [`ClientError::Validation`]; any other non-success status
/// becomes [`ClientError::Server`] with the envelope message, or the raw body
/// when it is not an envelope.
async fn read_envelope<T: DeserializeOwned>(response: Response) -> ClientResult<ApiResponse<T>> {
    let status = response.status();
    let bytes = response.bytes().await?;

    match serde_json::from_slice::<ApiResponse<T>>(&bytes) {
        Ok(body) if status.is_success() => Ok(body),
        Ok(body) if status == StatusCode::UNPROCESSABLE_ENTITY => {
            Err(ClientError::Validation(body.field_errors.unwrap_or_default()))
        }
        Ok(body) => Err(ClientError::Server {
            status: status.as_u16(),
            message: body
                .message
                .unwrap_or_else(|| format!("Request failed with HTTP {}", status)),
        }),
        Err(e) => {
            tracing::warn!("Unreadable API response (HTTP {}): {}", status, e);
            Err(ClientError::Server {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            })
        }
    }
}

/// Paginated collection endpoint such as `/api/farmers`
#[derive(Debug, Clone)]
pub struct HttpListSource<T> {
    client: ApiClient,
    path: &'static str,
    _marker: PhantomData<fn() -> T>,
}

#[async_trait]
impl<T> ListSource<T> for HttpListSource<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch(&self, filters: &SearchFilterState) -> ClientResult<Page<T>> {
        let response = self
            .client
            .http_client
            .get(self.client.url(self.path))
            .query(&filters.pairs())
            .send()
            .await?;

        let body: ApiResponse<Vec<T>> = read_envelope(response).await?;
        let meta = body.meta.ok_or_else(|| missing_data(self.path))?;
        Ok(Page {
            items: body.data.unwrap_or_default(),
            meta,
        })
    }
}

/// Create (`POST path`) and update (`PUT path/{id}`) endpoints of an entity
#[derive(Debug, Clone)]
pub struct HttpFormSink<T, R> {
    client: ApiClient,
    path: &'static str,
    _marker: PhantomData<fn(&T) -> R>,
}

#[async_trait]
impl<T, R> FormSink<T, R> for HttpFormSink<T, R>
where
    T: Serialize + Sync + 'static,
    R: DeserializeOwned + Send + 'static,
{
    async fn create(&self, values: &T) -> ClientResult<R> {
        let response = self
            .client
            .http_client
            .post(self.client.url(self.path))
            .json(values)
            .send()
            .await?;
        let body: ApiResponse<R> = read_envelope(response).await?;
        body.data.ok_or_else(|| missing_data(self.path))
    }

    async fn update(&self, id: i64, values: &T) -> ClientResult<R> {
        let path = format!("{}/{}", self.path, id);
        let response = self
            .client
            .http_client
            .put(self.client.url(&path))
            .json(values)
            .send()
            .await?;
        let body: ApiResponse<R> = read_envelope(response).await?;
        body.data.ok_or_else(|| missing_data(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::cascade::CascadingSelector;
    use crate::console::form::{self, FormMode, FormState};
    use crate::console::list_view::PaginatedListView;
    use crate::features::farmers::dtos::{FarmerInputDto, FarmerResponseDto};
    use crate::features::locations::dtos::AddressInputDto;
    use crate::features::registrations::dtos::{RegistrationDto, RegistrationResponseDto};
    use crate::shared::test_helpers::spawn_app;

    fn farmer(firstname: &str, selector: &CascadingSelector) -> FarmerInputDto {
        FarmerInputDto {
            firstname: firstname.to_string(),
            middlename: None,
            lastname: "Dela Cruz".to_string(),
            contact_number: "09171234567".to_string(),
            farming_experience: Some(4),
            location: selector.value().clone(),
        }
    }

    #[tokio::test]
    async fn test_form_and_list_against_running_api() {
        let client = ApiClient::new(spawn_app().await);
        let hierarchy = Arc::new(client.fetch_locations().await.unwrap());

        let mut selector = CascadingSelector::new(hierarchy);
        selector.set_province(1);
        selector.set_municipality(10);
        selector.set_barangay(selector.barangay_options()[0].id);

        let sink = client.form_sink::<FarmerInputDto, FarmerResponseDto>("/api/farmers");
        for name in ["Ana", "Ben", "Carlo"] {
            let mut form = FormState::new(farmer(name, &selector));
            let outcome = form::submit(&mut form, FormMode::Create, &sink, "Saved.")
                .await
                .unwrap();
            assert!(outcome.close);
        }

        let source: Arc<dyn ListSource<FarmerResponseDto>> =
            Arc::new(client.list_source("/api/farmers"));
        let mut view = PaginatedListView::new(DebouncedQueryState::new(
            source,
            300,
            SearchFilterState::with_per_page(2),
        ));
        view.on_page_change(5).await.unwrap();

        let pagination = view.pagination().unwrap();
        assert_eq!(pagination.current_page, 2);
        assert_eq!(pagination.total, 3);
        assert_eq!(view.rows()[0].firstname, "Ana");
    }

    #[tokio::test]
    async fn test_registration_failure_maps_to_field_errors() {
        let client = ApiClient::new(spawn_app().await);
        let sink = client.form_sink::<RegistrationDto, RegistrationResponseDto>("/api/registrations");

        let mut payload = RegistrationDto::default();
        payload.farmer.firstname = "Juan".to_string();

        match sink.create(&payload).await {
            Err(ClientError::Validation(errors)) => {
                assert!(errors.contains_key("farmer.contact_number"));
                assert!(errors.contains_key("farm.name"));
            }
            other => panic!("expected validation error, got {:?}", other.map(|r| r.farmer.id)),
        }
    }

    #[tokio::test]
    async fn test_unknown_entity_is_server_error() {
        let client = ApiClient::new(spawn_app().await);
        let sink = client.form_sink::<FarmerInputDto, FarmerResponseDto>("/api/farmers");
        let payload = FarmerInputDto {
            firstname: "Juan".to_string(),
            lastname: "Luna".to_string(),
            contact_number: "0917".to_string(),
            farming_experience: Some(1),
            location: AddressInputDto {
                province_id: Some(1),
                municipality_id: Some(10),
                barangay_id: Some(100),
                street: None,
            },
            ..Default::default()
        };

        match sink.update(404, &payload).await {
            Err(ClientError::Server { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected server error, got {:?}", other.map(|r| r.id)),
        }
    }

    #[tokio::test]
    async fn test_list_state_uses_console_config() {
        let config = ConsoleConfig {
            api_base_url: spawn_app().await,
            search_debounce_ms: 400,
            default_per_page: 5,
        };
        let client = ApiClient::from_config(&config);
        let mut state = client.list_state::<FarmerResponseDto>("/api/farmers", &config);
        assert_eq!(state.filters().per_page, 5);

        let receiver = state.subscribe();
        state.dispatch().await.unwrap();

        let snapshot = receiver.borrow().clone();
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.meta.map(|m| m.per_page), Some(5));
    }
}
