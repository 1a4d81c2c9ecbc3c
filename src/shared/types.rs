use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Field path (e.g. `farmer.contact_number`) to the first message reported for it
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<PageMeta>,
    pub errors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<PageMeta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
            field_errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
            field_errors: None,
        }
    }

    pub fn invalid(message: String, field_errors: FieldErrors) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message),
            meta: None,
            errors: None,
            field_errors: Some(field_errors),
        }
    }
}

/// Deserialize `""` and whitespace-only strings as `None`.
///
/// Forms post untouched optional inputs as empty strings.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Pagination and search shared by every list endpoint.
///
/// Built from each feature's query params; facets are applied by the feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Case-insensitive substring search
    pub search: Option<String>,
    /// Rows per page, clamped to `1..=MAX_PAGE_SIZE`
    pub per_page: i64,
    /// 1-indexed page; pages past the end are clamped
    pub page: i64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            per_page: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

impl ListQuery {
    /// Clamped per_page (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }

    /// Trimmed, lowercased search term, `None` when blank
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Authoritative pagination state echoed back with every page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    pub current_page: i64,
    pub last_page: i64,
    pub total: i64,
    /// 1-based index of the first row on this page, absent when the page is empty
    pub from: Option<i64>,
    /// 1-based index of the last row on this page, absent when the page is empty
    pub to: Option<i64>,
    pub per_page: i64,
    /// Search term the page was computed for
    #[serde(default)]
    pub search: Option<String>,
}

impl PageMeta {
    /// Build the meta for `query` against `total` matching rows.
    ///
    /// The requested page is clamped into `1..=last_page`; `last_page` is at
    /// least 1 so an empty collection still reports page 1 of 1.
    pub fn for_query(query: &ListQuery, total: i64) -> Self {
        let per_page = query.limit();
        let last_page = ((total + per_page - 1) / per_page).max(1);
        let current_page = query.page.clamp(1, last_page);
        let offset = (current_page - 1) * per_page;
        let (from, to) = if total == 0 {
            (None, None)
        } else {
            (Some(offset + 1), Some((offset + per_page).min(total)))
        };

        Self {
            current_page,
            last_page,
            total,
            from,
            to,
            per_page,
            search: query.search.clone().filter(|s| !s.trim().is_empty()),
        }
    }

    /// Row offset of the first item on `current_page`
    pub fn offset(&self) -> usize {
        ((self.current_page - 1) * self.per_page) as usize
    }
}
