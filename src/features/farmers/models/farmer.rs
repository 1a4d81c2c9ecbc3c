use chrono::{DateTime, Utc};

use crate::features::locations::models::Address;

/// Stored farmer record
#[derive(Debug, Clone)]
pub struct Farmer {
    pub id: i64,
    pub firstname: String,
    pub middlename: Option<String>,
    pub lastname: String,
    pub contact_number: String,
    pub farming_experience: i32,
    pub address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Farmer {
    /// "Firstname M. Lastname", middle initial only when a middle name is set
    pub fn full_name(&self) -> String {
        match self.middlename.as_deref().and_then(|m| m.chars().next()) {
            Some(initial) => format!("{} {}. {}", self.firstname, initial, self.lastname),
            None => format!("{} {}", self.firstname, self.lastname),
        }
    }

    /// Case-insensitive match of an already-lowercased term against name and contact
    pub fn matches_search(&self, term: &str) -> bool {
        [
            Some(self.firstname.as_str()),
            self.middlename.as_deref(),
            Some(self.lastname.as_str()),
            Some(self.contact_number.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(term))
            || self.full_name().to_lowercase().contains(term)
    }
}
