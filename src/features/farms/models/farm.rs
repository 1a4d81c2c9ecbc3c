use chrono::{DateTime, Utc};

use crate::features::locations::models::Address;

/// Stored farm record
#[derive(Debug, Clone)]
pub struct Farm {
    pub id: i64,
    pub name: String,
    pub farmer_id: i64,
    /// Hectares
    pub total_area: f64,
    pub soil_type: Option<String>,
    pub address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Farm {
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
            || self
                .soil_type
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(term))
    }
}
