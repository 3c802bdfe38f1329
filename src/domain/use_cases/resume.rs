use std::collections::HashSet;

use parking_lot::Mutex;

use crate::{
    domain::form::{EntityForm, FieldValues},
    entities::{education::Education, experience::Experience, skill::Skill, Resource, Stored},
    errors::{AppError, GatewayError},
    repositories::resume::ResumeGateway,
    use_cases::form_controller::{FormController, FormMode, SubmitOutcome},
};

/// What a list section shows once its request has settled.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<R> {
    Failed(String),
    Empty,
    Populated(Vec<Stored<R>>),
}

impl<R: Resource> ListState<R> {
    pub fn from_result(result: Result<Vec<Stored<R>>, GatewayError>) -> Self {
        match result {
            Ok(records) if records.is_empty() => ListState::Empty,
            Ok(records) => ListState::Populated(records),
            Err(e) => {
                if e.is_transport() {
                    tracing::error!("Backend unreachable while listing {}: {}", R::PLURAL, e);
                } else {
                    tracing::warn!("Listing {} failed: {}", R::PLURAL, e);
                }
                ListState::Failed(format!("Failed to fetch {}", R::PLURAL))
            }
        }
    }
}

/// Every section of the landing page.
#[derive(Debug, Clone, PartialEq)]
pub struct Landing {
    pub experiences: ListState<Experience>,
    pub educations: ListState<Education>,
    pub skills: ListState<Skill>,
}

type SubmissionKey = (&'static str, FormMode, FieldValues);

/// Submissions currently waiting on the backend.
#[derive(Default)]
struct InFlight(Mutex<HashSet<SubmissionKey>>);

impl InFlight {
    /// Marks `key` as pending, or returns `None` if an identical one already is.
    fn claim(&self, key: SubmissionKey) -> Option<Claim<'_>> {
        if self.0.lock().insert(key.clone()) {
            Some(Claim { in_flight: self, key })
        } else {
            None
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.0.lock().len()
    }
}

/// Releases its key when the submission settles, however it ends.
struct Claim<'a> {
    in_flight: &'a InFlight,
    key: SubmissionKey,
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.in_flight.0.lock().remove(&self.key);
    }
}

pub struct ResumeHandler<G>
where
    G: ResumeGateway,
{
    pub gateway: G,
    in_flight: InFlight,
}

impl<G> ResumeHandler<G>
where
    G: ResumeGateway,
{
    pub fn new(gateway: G) -> Self {
        ResumeHandler {
            gateway,
            in_flight: InFlight::default(),
        }
    }

    /// Loads one collection.
    pub async fn list<R: Resource>(&self) -> ListState<R> {
        ListState::from_result(self.gateway.list::<R>().await)
    }

    /// Loads all sections concurrently; each settles on its own.
    pub async fn landing(&self) -> Landing {
        let (experiences, educations, skills) = futures::join!(
            self.list::<Experience>(),
            self.list::<Education>(),
            self.list::<Skill>(),
        );

        Landing { experiences, educations, skills }
    }

    /// Fetches a stored record and prepares the edit form for it.
    pub async fn load_edit<R>(&self, id: &str) -> Result<FormController<R>, AppError>
    where
        R: Resource + EntityForm,
    {
        let record = self.gateway.get::<R>(id).await.map_err(|e| match e {
            GatewayError::NotFound(msg) => AppError::NotFound(msg),
            other => {
                tracing::warn!("Fetching {} {} failed: {}", R::NAME, id, other);
                AppError::BadGateway(format!("Failed to fetch the {}", R::NAME))
            }
        })?;

        Ok(FormController::edit(id, &record))
    }

    /// Runs a create or edit submission through the form controller.
    ///
    /// The controller is returned so a failed or invalid form can be shown
    /// again with everything the user typed. A second identical submission
    /// arriving before the first settles is answered with `Busy` and never
    /// reaches the backend.
    pub async fn submit<R>(
        &self,
        mode: FormMode,
        values: FieldValues,
    ) -> (FormController<R>, SubmitOutcome)
    where
        R: Resource + EntityForm,
    {
        let mut form = FormController::<R>::with_values(mode.clone(), values);

        let key = (R::NAME, mode.clone(), form.values().clone());
        let Some(_claim) = self.in_flight.claim(key) else {
            tracing::info!("Refusing duplicate {} submission", R::NAME);
            return (form, SubmitOutcome::Busy);
        };

        let gateway = &self.gateway;

        let outcome = form
            .submit(move |record: R| async move {
                match &mode {
                    FormMode::Create => gateway.create(&record).await,
                    FormMode::Edit { id } => gateway.update(id, &record).await,
                }
            })
            .await;

        (form, outcome)
    }
}
