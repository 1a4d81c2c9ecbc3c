//! Two-step farmer + farm registration

use std::sync::Arc;

use validator::Validate;

use crate::console::cascade::{AddressMirror, CascadingSelector};
use crate::console::form::{self, FormMode, FormSink, FormState, SubmitOutcome};
use crate::features::locations::models::LocationHierarchy;
use crate::features::registrations::dtos::{RegistrationDto, RegistrationResponseDto};
use crate::shared::validation::{flatten_errors, nest_errors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Farmer,
    Farm,
}

/// Which address a location edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Farmer,
    Farm,
}

/// Farmer details on step 1, farm details on step 2, one request at the end.
///
/// Moving to step 2 is a local check of the farmer section only.
#[derive(Debug, Clone)]
pub struct RegistrationWizard {
    step: WizardStep,
    form: FormState<RegistrationDto>,
    farmer_location: CascadingSelector,
    farm_location: CascadingSelector,
    same_address: AddressMirror,
}

impl RegistrationWizard {
    pub fn new(hierarchy: Arc<LocationHierarchy>) -> Self {
        Self {
            step: WizardStep::Farmer,
            form: FormState::default(),
            farmer_location: CascadingSelector::new(Arc::clone(&hierarchy)),
            farm_location: CascadingSelector::new(hierarchy),
            same_address: AddressMirror::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &FormState<RegistrationDto> {
        &self.form
    }

    pub fn location(&self, section: Section) -> &CascadingSelector {
        match section {
            Section::Farmer => &self.farmer_location,
            Section::Farm => &self.farm_location,
        }
    }

    /// Change a non-location value; `field` is the dotted path whose error is cleared
    pub fn set(&mut self, field: &str, change: impl FnOnce(&mut RegistrationDto)) {
        self.form = std::mem::take(&mut self.form).set(field, change);
    }

    /// Change one of the two addresses through its cascading selector.
    ///
    /// Farmer address changes are mirrored to the farm while "same address"
    /// is on. Editing the farm address directly leaves mirroring as it is.
    pub fn edit_location(&mut self, section: Section, change: impl FnOnce(&mut CascadingSelector)) {
        match section {
            Section::Farmer => {
                change(&mut self.farmer_location);
                self.same_address
                    .on_source_change(&self.farmer_location, &mut self.farm_location);
                if self.same_address.is_enabled() {
                    self.sync_locations(&[Section::Farmer, Section::Farm]);
                } else {
                    self.sync_locations(&[Section::Farmer]);
                }
            }
            Section::Farm => {
                change(&mut self.farm_location);
                self.sync_locations(&[Section::Farm]);
            }
        }
    }

    pub fn same_address(&self) -> bool {
        self.same_address.is_enabled()
    }

    pub fn set_same_address(&mut self, enabled: bool) {
        if enabled {
            self.same_address
                .enable(&self.farmer_location, &mut self.farm_location);
            self.sync_locations(&[Section::Farm]);
        } else {
            self.same_address.disable();
        }
    }

    /// Copy both selectors into the form and clear the location errors of `edited`
    fn sync_locations(&mut self, edited: &[Section]) {
        self.form.values.farmer.location = self.farmer_location.value().clone();
        self.form.values.farm.location = self.farm_location.value().clone();
        for section in edited {
            let prefix = match section {
                Section::Farmer => "farmer.location.",
                Section::Farm => "farm.location.",
            };
            self.form.errors.retain(|k, _| !k.starts_with(prefix));
        }
    }

    /// Advance to the farm step if the farmer section passes local checks.
    ///
    /// Otherwise the farmer errors are shown and the wizard stays on step 1.
    /// Never contacts the server.
    pub fn next(&mut self) -> bool {
        match self.form.values.farmer.validate() {
            Ok(()) => {
                self.form.errors.retain(|k, _| !k.starts_with("farmer."));
                self.step = WizardStep::Farm;
                true
            }
            Err(e) => {
                self.form.errors.retain(|k, _| !k.starts_with("farmer."));
                self.form
                    .errors
                    .extend(nest_errors("farmer", flatten_errors(&e)));
                false
            }
        }
    }

    pub fn back(&mut self) {
        self.step = WizardStep::Farmer;
    }

    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::Farm
            && !self.form.submitting
            && self.form.values.farmer.validate().is_ok()
            && self.form.values.farm.validate().is_ok()
    }

    /// Send the combined `{farmer, farm}` payload.
    ///
    /// On success the wizard starts over. On failure the input is kept and,
    /// when the farmer section has errors, the wizard returns to step 1.
    pub async fn submit(
        &mut self,
        sink: &dyn FormSink<RegistrationDto, RegistrationResponseDto>,
    ) -> Option<SubmitOutcome<RegistrationResponseDto>> {
        if !self.can_submit() {
            return None;
        }

        let outcome = form::submit(
            &mut self.form,
            FormMode::Create,
            sink,
            "Farmer and farm registered successfully.",
        )
        .await?;

        if outcome.saved.is_some() {
            let hierarchy = Arc::new(self.farmer_location.hierarchy().clone());
            *self = Self::new(hierarchy);
        } else if !self.form.section_errors("farmer").is_empty() {
            self.step = WizardStep::Farmer;
        }
        Some(outcome)
    }
}
