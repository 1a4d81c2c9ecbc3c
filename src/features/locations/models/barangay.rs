use serde::{Deserialize, Serialize};

/// Barangay, the smallest administrative unit, owned by exactly one municipality
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barangay {
    pub id: i64,
    pub name: String,
    pub municipality_id: i64,
}
