use std::fmt::Display;
use std::future::Future;
use std::marker::PhantomData;

use crate::domain::form::{messages_from, EntityForm, FieldMessages, FieldValues};
use crate::entities::Resource;

/// Where every successful submission lands.
pub const LANDING_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

impl FormMode {
    fn past_tense(&self) -> &'static str {
        match self {
            FormMode::Create => "added",
            FormMode::Edit { .. } => "updated",
        }
    }

    fn infinitive(&self) -> &'static str {
        match self {
            FormMode::Create => "add",
            FormMode::Edit { .. } => "update",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Invalid,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// One-shot message shown to the user after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Success, title: title.into() }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Error, title: title.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(FieldMessages),
    /// The same submission is already in flight.
    Busy,
    Succeeded { notification: Notification, redirect_to: &'static str },
    /// Sending failed. The entered values are kept for a retry.
    Failed { notification: Notification },
}

/// Holds the state of one create/edit form.
///
/// `Idle -> Validating -> Invalid -> Idle`, or
/// `Idle -> Validating -> Submitting -> Succeeded | Failed -> Idle`.
#[derive(Debug)]
pub struct FormController<E> {
    mode: FormMode,
    values: FieldValues,
    errors: FieldMessages,
    phase: FormPhase,
    _entity: PhantomData<E>,
}

impl<E> FormController<E>
where
    E: EntityForm + Resource,
{
    /// Empty form for the create view.
    pub fn create() -> Self {
        Self::with_values(FormMode::Create, FieldValues::new())
    }

    /// Form pre-filled from an existing record.
    pub fn edit(id: impl Into<String>, record: &E) -> Self {
        Self::with_values(FormMode::Edit { id: id.into() }, record.to_values())
    }

    /// Form holding values exactly as the browser posted them.
    pub fn with_values(mode: FormMode, mut values: FieldValues) -> Self {
        E::normalise(&mut values);
        Self {
            mode,
            values,
            errors: FieldMessages::new(),
            phase: FormPhase::Idle,
            _entity: PhantomData,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldMessages {
        &self.errors
    }

    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn submit_disabled(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Stores a new value and re-derives that field's validity.
    ///
    /// Returns the field's error message, if any. Unknown keys are stored
    /// without validation.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) -> Option<&str> {
        self.values.set(key, value);
        match E::schema().field(key).map(|field| field.check(self.values.get(key))) {
            Some(Err(error)) => {
                let message = error
                    .message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string());
                self.errors.insert(key.to_string(), message);
            }
            _ => {
                self.errors.remove(key);
            }
        }
        self.error(key)
    }

    /// Validates everything and, when valid, enters `Submitting`.
    ///
    /// The caller must hand the send result to [`FormController::complete`].
    pub fn begin_submit(&mut self) -> Result<E, SubmitOutcome> {
        if self.phase == FormPhase::Submitting {
            tracing::debug!("Ignoring duplicate {} submission", E::NAME);
            return Err(SubmitOutcome::Busy);
        }

        self.phase = FormPhase::Validating;
        match E::from_values(&self.values) {
            Ok(record) => {
                self.errors.clear();
                self.phase = FormPhase::Submitting;
                Ok(record)
            }
            Err(errors) => {
                self.phase = FormPhase::Invalid;
                self.errors = messages_from(&errors);
                tracing::debug!("{} form invalid: {:?}", E::NAME, self.errors);
                let outcome = SubmitOutcome::Invalid(self.errors.clone());
                self.phase = FormPhase::Idle;
                Err(outcome)
            }
        }
    }

    /// Turns the send result into the user-facing outcome and returns to `Idle`.
    pub fn complete<Err: Display>(&mut self, result: Result<(), Err>) -> SubmitOutcome {
        let outcome = match result {
            Ok(()) => {
                self.phase = FormPhase::Succeeded;
                tracing::info!("{} {}", E::NAME, self.mode.past_tense());
                SubmitOutcome::Succeeded {
                    notification: Notification::success(format!(
                        "Successfully {} {}",
                        self.mode.past_tense(),
                        E::NAME
                    )),
                    redirect_to: LANDING_PATH,
                }
            }
            Err(e) => {
                self.phase = FormPhase::Failed;
                tracing::warn!("Failed to {} {}: {}", self.mode.infinitive(), E::NAME, e);
                SubmitOutcome::Failed {
                    notification: Notification::error(format!(
                        "Failed to {} {}",
                        self.mode.infinitive(),
                        E::NAME
                    )),
                }
            }
        };
        self.phase = FormPhase::Idle;
        outcome
    }

    /// Validates, sends the record with `send` when valid, and reports the outcome.
    pub async fn submit<F, Fut, Err>(&mut self, send: F) -> SubmitOutcome
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = Result<(), Err>>,
        Err: Display,
    {
        let record = match self.begin_submit() {
            Ok(record) => record,
            Err(outcome) => return outcome,
        };
        let result = send(record).await;
        self.complete(result)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::entities::skill::Skill;

    fn valid_skill() -> FieldValues {
        FieldValues::new()
            .with("name", "Go")
            .with("proficiency", "80%")
            .with("logo", "https://x.test/g.png")
    }

    #[test]
    fn set_value_tracks_field_validity() {
        let mut form = FormController::<Skill>::create();
        assert_eq!(form.set_value("proficiency", "abc"), Some("Invalid proficiency"));
        assert_eq!(form.error("proficiency"), Some("Invalid proficiency"));
        assert_eq!(form.set_value("proficiency", "55.25%"), None);
        assert!(form.errors().is_empty());
    }

    #[actix_rt::test]
    async fn invalid_form_never_calls_send() {
        let calls = Cell::new(0);
        let mut form = FormController::<Skill>::with_values(
            FormMode::Create,
            valid_skill().with("name", ""),
        );

        let outcome = form
            .submit(|_| {
                calls.set(calls.get() + 1);
                async { Ok::<(), String>(()) }
            })
            .await;

        assert_eq!(calls.get(), 0);
        match outcome {
            SubmitOutcome::Invalid(errors) => assert_eq!(errors["name"], "Name is required"),
            other => panic!("expected invalid outcome, got {other:?}"),
        }
        assert_eq!(form.phase(), FormPhase::Idle);
    }

    #[test]
    fn submit_is_disabled_while_in_flight() {
        let mut form = FormController::<Skill>::with_values(FormMode::Create, valid_skill());

        let record = form.begin_submit().unwrap();
        assert_eq!(record.name, "Go");
        assert!(form.submit_disabled());
        assert_eq!(form.begin_submit().unwrap_err(), SubmitOutcome::Busy);

        form.complete(Ok::<(), String>(()));
        assert!(!form.submit_disabled());
        assert_eq!(form.phase(), FormPhase::Idle);
    }

    #[actix_rt::test]
    async fn success_redirects_to_landing_with_notification() {
        let mut form = FormController::<Skill>::with_values(FormMode::Create, valid_skill());
        let outcome = form.submit(|_| async { Ok::<(), String>(()) }).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Succeeded {
                notification: Notification::success("Successfully added skill"),
                redirect_to: "/",
            }
        );
    }

    #[actix_rt::test]
    async fn failure_keeps_entered_values() {
        let mut form = FormController::<Skill>::with_values(
            FormMode::Edit { id: "3".into() },
            valid_skill(),
        );
        let outcome = form
            .submit(|_| async { Err::<(), _>("status 500") })
            .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed { notification: Notification::error("Failed to update skill") }
        );
        assert_eq!(form.values(), &valid_skill());
        assert_eq!(form.phase(), FormPhase::Idle);
    }
}
