use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::locations::models::Address;

/// WHO acute toxicity class printed on the label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ToxicityCategory {
    /// Extremely / highly hazardous
    I,
    /// Moderately hazardous
    II,
    /// Slightly hazardous
    III,
    /// Unlikely to present acute hazard
    IV,
}

impl ToxicityCategory {
    pub const ALL: [ToxicityCategory; 4] = [Self::I, Self::II, Self::III, Self::IV];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
        }
    }
}

impl std::fmt::Display for ToxicityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored pesticide record; `address` is the supplier location
#[derive(Debug, Clone)]
pub struct Pesticide {
    pub id: i64,
    pub name: String,
    pub active_ingredient: String,
    pub toxicity: ToxicityCategory,
    pub target_pests: Option<String>,
    pub address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pesticide {
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
            || self.active_ingredient.to_lowercase().contains(term)
            || self
                .target_pests
                .as_deref()
                .is_some_and(|p| p.to_lowercase().contains(term))
    }
}
