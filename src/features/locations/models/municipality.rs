use serde::{Deserialize, Serialize};

/// Municipality or component city, owned by exactly one province
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipality {
    pub id: i64,
    pub name: String,
    pub province_id: i64,
}
