use serde::{Deserialize, Serialize};

/// Stored location sub-object of an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub province_id: i64,
    pub municipality_id: i64,
    pub barangay_id: i64,
    pub street: Option<String>,
}
