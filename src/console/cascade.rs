//! Cascading province → municipality → barangay selection

use std::sync::Arc;

use crate::features::locations::dtos::AddressInputDto;
use crate::features::locations::models::{Barangay, LocationHierarchy, Municipality};

/// Municipalities of `province_id`, in table order. Empty when no province is selected.
pub fn available_municipalities(
    all: &[Municipality],
    province_id: Option<i64>,
) -> Vec<&Municipality> {
    match province_id {
        Some(id) => all.iter().filter(|m| m.province_id == id).collect(),
        None => Vec::new(),
    }
}

/// Barangays of `municipality_id`, in table order. Empty when no municipality is selected.
pub fn available_barangays(all: &[Barangay], municipality_id: Option<i64>) -> Vec<&Barangay> {
    match municipality_id {
        Some(id) => all.iter().filter(|b| b.municipality_id == id).collect(),
        None => Vec::new(),
    }
}

/// Three dependent selects kept consistent with each other.
///
/// The selector never validates membership itself; screens only offer the
/// options returned by [`Self::municipality_options`] and
/// [`Self::barangay_options`].
#[derive(Debug, Clone)]
pub struct CascadingSelector {
    hierarchy: Arc<LocationHierarchy>,
    value: AddressInputDto,
    /// Label of a stored municipality that is no longer offered under its province
    pinned_municipality: Option<String>,
    /// Label of a stored barangay that is no longer offered under its municipality
    pinned_barangay: Option<String>,
}

impl CascadingSelector {
    pub fn new(hierarchy: Arc<LocationHierarchy>) -> Self {
        Self {
            hierarchy,
            value: AddressInputDto::default(),
            pinned_municipality: None,
            pinned_barangay: None,
        }
    }

    /// Selector pre-filled from a stored entity.
    ///
    /// A stored municipality or barangay missing from the filtered options is
    /// kept and shown under its own or a placeholder label. A drifted
    /// municipality stays until the province is changed, a drifted barangay
    /// until the municipality is changed.
    pub fn for_edit(hierarchy: Arc<LocationHierarchy>, value: AddressInputDto) -> Self {
        let pinned_municipality = value.municipality_id.and_then(|id| {
            let offered = available_municipalities(&hierarchy.municipalities, value.province_id)
                .iter()
                .any(|m| m.id == id);
            if offered {
                return None;
            }
            tracing::debug!("Stored municipality {} not under province {:?}", id, value.province_id);
            Some(match hierarchy.municipality(id) {
                Some(m) => m.name.clone(),
                None => format!("Municipality #{}", id),
            })
        });
        let pinned_barangay = value.barangay_id.and_then(|id| {
            let offered = available_barangays(&hierarchy.barangays, value.municipality_id)
                .iter()
                .any(|b| b.id == id);
            if offered {
                return None;
            }
            tracing::debug!("Stored barangay {} not under municipality {:?}", id, value.municipality_id);
            Some(match hierarchy.barangay(id) {
                Some(b) => b.name.clone(),
                None => format!("Barangay #{}", id),
            })
        });

        Self {
            hierarchy,
            value,
            pinned_municipality,
            pinned_barangay,
        }
    }

    pub fn value(&self) -> &AddressInputDto {
        &self.value
    }

    pub fn hierarchy(&self) -> &LocationHierarchy {
        &self.hierarchy
    }

    pub fn set_province(&mut self, id: i64) {
        self.value.province_id = Some(id);
        self.value.municipality_id = None;
        self.value.barangay_id = None;
        self.pinned_municipality = None;
        self.pinned_barangay = None;
    }

    pub fn set_municipality(&mut self, id: i64) {
        self.value.municipality_id = Some(id);
        self.value.barangay_id = None;
        self.pinned_municipality = None;
        self.pinned_barangay = None;
    }

    pub fn set_barangay(&mut self, id: i64) {
        self.value.barangay_id = Some(id);
        self.pinned_barangay = None;
    }

    pub fn set_street(&mut self, street: impl Into<String>) {
        let street = street.into();
        self.value.street = if street.trim().is_empty() {
            None
        } else {
            Some(street)
        };
    }

    /// Overwrite the whole selection, e.g. when mirroring another address
    pub fn replace(&mut self, value: AddressInputDto) {
        self.value = value;
        self.pinned_municipality = None;
        self.pinned_barangay = None;
    }

    pub fn municipality_options(&self) -> Vec<&Municipality> {
        available_municipalities(&self.hierarchy.municipalities, self.value.province_id)
    }

    pub fn barangay_options(&self) -> Vec<&Barangay> {
        available_barangays(&self.hierarchy.barangays, self.value.municipality_id)
    }

    /// Text shown in the municipality select
    pub fn municipality_label(&self) -> Option<String> {
        if let Some(pinned) = &self.pinned_municipality {
            return Some(pinned.clone());
        }
        let id = self.value.municipality_id?;
        self.municipality_options()
            .into_iter()
            .find(|m| m.id == id)
            .map(|m| m.name.clone())
    }

    /// Text shown in the barangay select
    pub fn barangay_label(&self) -> Option<String> {
        if let Some(pinned) = &self.pinned_barangay {
            return Some(pinned.clone());
        }
        let id = self.value.barangay_id?;
        self.barangay_options()
            .into_iter()
            .find(|b| b.id == id)
            .map(|b| b.name.clone())
    }

    pub fn is_drifted(&self) -> bool {
        self.pinned_municipality.is_some() || self.pinned_barangay.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.value.province_id.is_some()
            && self.value.municipality_id.is_some()
            && self.value.barangay_id.is_some()
    }
}

/// "Same as farmer address" toggle between two selectors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressMirror {
    enabled: bool,
}

impl AddressMirror {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn mirroring on and copy the source immediately
    pub fn enable(&mut self, source: &CascadingSelector, target: &mut CascadingSelector) {
        self.enabled = true;
        target.replace(source.value().clone());
    }

    /// Turn mirroring off; the target keeps its last mirrored values
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Propagate a change of the source selector
    pub fn on_source_change(&self, source: &CascadingSelector, target: &mut CascadingSelector) {
        if self.enabled {
            target.replace(source.value().clone());
        }
    }
}
