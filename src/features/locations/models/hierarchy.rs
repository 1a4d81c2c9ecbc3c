use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Barangay, Municipality, Province};

/// Why a location reference failed to resolve
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationIssue {
    #[error("The selected province does not exist")]
    UnknownProvince,

    #[error("The selected municipality does not exist")]
    UnknownMunicipality,

    #[error("The selected municipality is not in the selected province")]
    MunicipalityOutsideProvince,

    #[error("The selected barangay does not exist")]
    UnknownBarangay,

    #[error("The selected barangay is not in the selected municipality")]
    BarangayOutsideMunicipality,
}

/// Full province / municipality / barangay reference tables.
///
/// Rows keep the order they were loaded in; filtered views preserve it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationHierarchy {
    pub provinces: Vec<Province>,
    pub municipalities: Vec<Municipality>,
    pub barangays: Vec<Barangay>,
}

impl LocationHierarchy {
    /// Parse reference tables from JSON and reject dangling parent ids
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let hierarchy: Self =
            serde_json::from_str(raw).map_err(|e| format!("Invalid location data: {}", e))?;

        if let Some(m) = hierarchy
            .municipalities
            .iter()
            .find(|m| hierarchy.province(m.province_id).is_none())
        {
            return Err(format!(
                "Municipality {} references missing province {}",
                m.id, m.province_id
            ));
        }

        if let Some(b) = hierarchy
            .barangays
            .iter()
            .find(|b| hierarchy.municipality(b.municipality_id).is_none())
        {
            return Err(format!(
                "Barangay {} references missing municipality {}",
                b.id, b.municipality_id
            ));
        }

        Ok(hierarchy)
    }

    pub fn province(&self, id: i64) -> Option<&Province> {
        self.provinces.iter().find(|p| p.id == id)
    }

    pub fn municipality(&self, id: i64) -> Option<&Municipality> {
        self.municipalities.iter().find(|m| m.id == id)
    }

    pub fn barangay(&self, id: i64) -> Option<&Barangay> {
        self.barangays.iter().find(|b| b.id == id)
    }

    pub fn municipalities_of(&self, province_id: i64) -> impl Iterator<Item = &Municipality> {
        self.municipalities
            .iter()
            .filter(move |m| m.province_id == province_id)
    }

    pub fn barangays_of(&self, municipality_id: i64) -> impl Iterator<Item = &Barangay> {
        self.barangays
            .iter()
            .filter(move |b| b.municipality_id == municipality_id)
    }

    /// Check a selected triple for existence and containment.
    ///
    /// Returns every failing field with its issue. A municipality is only checked
    /// against the province when both exist, likewise for the barangay.
    pub fn check(
        &self,
        province_id: i64,
        municipality_id: i64,
        barangay_id: i64,
    ) -> Vec<(&'static str, LocationIssue)> {
        let mut issues = Vec::new();

        let province = self.province(province_id);
        if province.is_none() {
            issues.push(("province_id", LocationIssue::UnknownProvince));
        }

        let municipality = self.municipality(municipality_id);
        match municipality {
            None => issues.push(("municipality_id", LocationIssue::UnknownMunicipality)),
            Some(m) if province.is_some() && m.province_id != province_id => {
                issues.push(("municipality_id", LocationIssue::MunicipalityOutsideProvince))
            }
            Some(_) => {}
        }

        match self.barangay(barangay_id) {
            None => issues.push(("barangay_id", LocationIssue::UnknownBarangay)),
            Some(b) if municipality.is_some() && b.municipality_id != municipality_id => {
                issues.push(("barangay_id", LocationIssue::BarangayOutsideMunicipality))
            }
            Some(_) => {}
        }

        issues
    }
}
