use serde::{Deserialize, Serialize};

/// Province (lalawigan), top of the location hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub id: i64,
    pub name: String,
    pub region_code: String,
}
