//! Create / edit form lifecycle

use async_trait::async_trait;
use validator::Validate;

use crate::console::error::{ClientError, ClientResult};
use crate::shared::types::FieldErrors;
use crate::shared::validation::flatten_errors;

/// Create and update endpoints of an entity
#[async_trait]
pub trait FormSink<T, R>: Send + Sync {
    async fn create(&self, values: &T) -> ClientResult<R>;
    async fn update(&self, id: i64, values: &T) -> ClientResult<R>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Failure(String),
}

/// Side effects of a finished submission for the screen to carry out
#[derive(Debug)]
pub struct SubmitOutcome<R> {
    /// Persisted entity on success
    pub saved: Option<R>,
    pub notification: Notification,
    /// Whether the dialog or sheet presenting the form should close
    pub close: bool,
}

/// Values, field errors and in-flight flag of one form
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<T> {
    pub values: T,
    pub errors: FieldErrors,
    pub submitting: bool,
}

impl<T: Default> Default for FormState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> FormState<T> {
    pub fn new(values: T) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    /// Change a value; the error shown for `field` is cleared
    pub fn set(mut self, field: &str, change: impl FnOnce(&mut T)) -> Self {
        change(&mut self.values);
        self.errors.remove(field);
        self
    }

    /// Error shown under `field` (dotted path, e.g. `farmer.contact_number`)
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Errors whose path starts with `section.`
    pub fn section_errors(&self, section: &str) -> FieldErrors {
        let prefix = format!("{}.", section);
        self.errors
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<T: Validate> FormState<T> {
    /// Constraints checkable without the server (required, ranges, patterns)
    pub fn local_errors(&self) -> FieldErrors {
        self.values
            .validate()
            .err()
            .map(|e| flatten_errors(&e))
            .unwrap_or_default()
    }

    /// Submit is offered only when idle and locally valid. The server has the final say.
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.values.validate().is_ok()
    }
}

impl<T: Validate + Default> FormState<T> {
    /// Mark the form in flight. The flag is `false` when submission is gated.
    pub fn begin_submit(mut self) -> (Self, bool) {
        if !self.can_submit() {
            return (self, false);
        }
        self.submitting = true;
        (self, true)
    }

    /// Apply the server's answer.
    ///
    /// Create forms are cleared on success, edit forms keep their values.
    /// Failures never touch the values.
    pub fn finish<R>(
        mut self,
        mode: FormMode,
        result: ClientResult<R>,
        success_message: &str,
    ) -> (Self, SubmitOutcome<R>) {
        self.submitting = false;
        match result {
            Ok(saved) => {
                self.errors.clear();
                if mode == FormMode::Create {
                    self.values = T::default();
                }
                (
                    self,
                    SubmitOutcome {
                        saved: Some(saved),
                        notification: Notification::Success(success_message.to_string()),
                        close: true,
                    },
                )
            }
            Err(err) => {
                tracing::debug!("Form submission failed: {}", err);
                let notification = Notification::Failure(err.notification());
                if let ClientError::Validation(errors) = err {
                    self.errors = errors;
                }
                (
                    self,
                    SubmitOutcome {
                        saved: None,
                        notification,
                        close: false,
                    },
                )
            }
        }
    }
}

/// Run one submission round trip against `sink`.
///
/// Returns `None` without calling the server when the form is gated.
pub async fn submit<T, R>(
    form: &mut FormState<T>,
    mode: FormMode,
    sink: &dyn FormSink<T, R>,
    success_message: &str,
) -> Option<SubmitOutcome<R>>
where
    T: Validate + Default + Send + Sync,
{
    let (state, started) = std::mem::take(form).begin_submit();
    *form = state;
    if !started {
        return None;
    }

    let result = match mode {
        FormMode::Create => sink.create(&form.values).await,
        FormMode::Edit(id) => sink.update(id, &form.values).await,
    };

    let (state, outcome) = std::mem::take(form).finish(mode, result, success_message);
    *form = state;
    Some(outcome)
}
