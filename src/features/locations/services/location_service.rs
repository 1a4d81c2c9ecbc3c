use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::locations::dtos::AddressInputDto;
use crate::features::locations::models::{
    Address, Barangay, LocationHierarchy, Municipality, Province,
};
use crate::shared::types::FieldErrors;
use crate::shared::validation::flatten_errors;

/// Built-in reference data used when no seed file is configured
const DEFAULT_SEED: &str = include_str!("../../../../data/locations.json");

/// Service over the province / municipality / barangay reference tables
#[derive(Debug)]
pub struct LocationService {
    hierarchy: LocationHierarchy,
}

fn matches(name: &str, term: Option<&str>) -> bool {
    match term.map(str::trim) {
        Some(t) if !t.is_empty() => name.to_lowercase().contains(&t.to_lowercase()),
        _ => true,
    }
}

impl LocationService {
    pub fn new(hierarchy: LocationHierarchy) -> Self {
        Self { hierarchy }
    }

    /// Load reference data from `seed_path`, or the built-in tables when `None`
    pub fn load(seed_path: Option<&str>) -> std::result::Result<Self, String> {
        let raw = match seed_path {
            Some(path) => std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read location seed {}: {}", path, e))?,
            None => DEFAULT_SEED.to_string(),
        };
        let hierarchy = LocationHierarchy::from_json(&raw)?;

        tracing::info!(
            "Location reference data loaded: provinces={}, municipalities={}, barangays={}",
            hierarchy.provinces.len(),
            hierarchy.municipalities.len(),
            hierarchy.barangays.len()
        );

        Ok(Self::new(hierarchy))
    }

    pub fn hierarchy(&self) -> &LocationHierarchy {
        &self.hierarchy
    }

    // ==================== Province Methods ====================

    /// List all provinces with optional search
    pub fn list_provinces(&self, search: Option<&str>) -> Vec<Province> {
        self.hierarchy
            .provinces
            .iter()
            .filter(|p| matches(&p.name, search))
            .cloned()
            .collect()
    }

    pub fn get_province(&self, id: i64) -> Result<Province> {
        self.hierarchy
            .province(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Province with id '{}' not found", id)))
    }

    // ==================== Municipality Methods ====================

    /// List municipalities of a province with optional search
    pub fn list_municipalities_by_province(
        &self,
        province_id: i64,
        search: Option<&str>,
    ) -> Result<Vec<Municipality>> {
        // First verify the province exists
        self.get_province(province_id)?;

        Ok(self
            .hierarchy
            .municipalities_of(province_id)
            .filter(|m| matches(&m.name, search))
            .cloned()
            .collect())
    }

    pub fn get_municipality(&self, id: i64) -> Result<Municipality> {
        self.hierarchy
            .municipality(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Municipality with id '{}' not found", id)))
    }

    // ==================== Barangay Methods ====================

    /// List barangays of a municipality with optional search
    pub fn list_barangays_by_municipality(
        &self,
        municipality_id: i64,
        search: Option<&str>,
    ) -> Result<Vec<Barangay>> {
        self.get_municipality(municipality_id)?;

        Ok(self
            .hierarchy
            .barangays_of(municipality_id)
            .filter(|b| matches(&b.name, search))
            .cloned()
            .collect())
    }

    pub fn get_barangay(&self, id: i64) -> Result<Barangay> {
        self.hierarchy
            .barangay(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Barangay with id '{}' not found", id)))
    }

    // ==================== Address Validation ====================

    /// Resolve a validated address input into a stored [`Address`].
    ///
    /// Field errors are keyed under `prefix` (e.g. `location` or
    /// `farm.location`). Required-field checks are the caller's `validate()`;
    /// missing ids here are reported as required again so the method is safe
    /// to call on unvalidated input.
    pub fn resolve_address(
        &self,
        prefix: &str,
        input: &AddressInputDto,
    ) -> std::result::Result<Address, FieldErrors> {
        let key = |field: &str| format!("{}.{}", prefix, field);

        let (province_id, municipality_id, barangay_id) =
            match (input.province_id, input.municipality_id, input.barangay_id) {
                (Some(p), Some(m), Some(b)) => (p, m, b),
                (p, m, b) => {
                    let mut errors = FieldErrors::new();
                    for (field, value) in [
                        ("province_id", p),
                        ("municipality_id", m),
                        ("barangay_id", b),
                    ] {
                        if value.is_none() {
                            errors.insert(key(field), "This field is required.".to_string());
                        }
                    }
                    return Err(errors);
                }
            };

        let issues = self
            .hierarchy
            .check(province_id, municipality_id, barangay_id);
        if !issues.is_empty() {
            return Err(issues
                .into_iter()
                .map(|(field, issue)| (key(field), issue.to_string()))
                .collect());
        }

        Ok(Address {
            province_id,
            municipality_id,
            barangay_id,
            street: input
                .street
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
    }

    /// Validate `dto` and resolve its address in one pass.
    ///
    /// Reference checks on the address only run when its own fields passed
    /// `validate()`, so a missing province is reported once as required rather
    /// than also as unknown. All errors are returned together.
    pub fn validate_entity<T: Validate>(
        &self,
        dto: &T,
        address_key: &str,
        address: &AddressInputDto,
    ) -> std::result::Result<Address, FieldErrors> {
        let mut errors = dto
            .validate()
            .err()
            .map(|e| flatten_errors(&e))
            .unwrap_or_default();

        let address_prefix = format!("{}.", address_key);
        if !errors.keys().any(|k| k.starts_with(&address_prefix)) {
            match self.resolve_address(address_key, address) {
                Ok(resolved) if errors.is_empty() => return Ok(resolved),
                Ok(_) => {}
                Err(address_errors) => errors.extend(address_errors),
            }
        }

        Err(errors)
    }
}
