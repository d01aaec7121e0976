use bmi_client::Client;
use bmi_model::{
    field::{Field, RawFormInput},
    measurement::BmiResult,
    record::{Record, RECORDS_TABLE},
    validation::{self, ErrorMap, Stage},
};
use log::{debug, error, info, warn};
use strum::IntoEnumIterator;

/// Banner shown when the record could not be stored. The backend error is
/// only logged.
pub const SAVE_FAILED_MESSAGE: &str = "There was an error saving the record; please try again";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Calculated,
    ReadyToRegister,
    Submitting,
    Submitted,
    SubmitFailed,
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("{} field(s) failed validation", .0.len())]
    Validation(ErrorMap),
    #[error("registration fields are not open")]
    NotReady,
    #[error("a submission is already in progress")]
    InFlight,
    #[error("{}", SAVE_FAILED_MESSAGE)]
    Persistence,
}

type Result<T> = std::result::Result<T, FormError>;

#[mockall::automock]
pub trait SuccessListener: Send + Sync {
    fn on_success(&self, record: &Record);
}

impl<F> SuccessListener for F
where
    F: Fn(&Record) + Send + Sync,
{
    fn on_success(&self, record: &Record) {
        self(record)
    }
}

/// State shared by both form variants: the typed input, inline errors, the
/// computed result and the server error banner.
#[derive(Debug)]
pub struct FormSession {
    input: RawFormInput,
    errors: ErrorMap,
    result: Option<BmiResult>,
    state: FormState,
    server_error: Option<&'static str>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self {
            input: RawFormInput::default(),
            errors: ErrorMap::new(),
            result: None,
            state: FormState::Editing,
            server_error: None,
        }
    }

    pub fn input(&self) -> &RawFormInput {
        &self.input
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn result(&self) -> Option<BmiResult> {
        self.result
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn server_error(&self) -> Option<&'static str> {
        self.server_error
    }

    pub fn submit_enabled(&self) -> bool {
        self.state != FormState::Submitting
    }

    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        self.input.set(field, value);
        self.errors.clear(field);
        if field.is_measurement() {
            self.invalidate();
        }
    }

    pub fn fill(&mut self, input: &RawFormInput) {
        for field in Field::iter() {
            self.edit(field, input.get(field));
        }
    }

    // A result computed from old measurements must never outlive them.
    fn invalidate(&mut self) {
        if self.result.take().is_some() {
            debug!("Measurements changed, discarding computed BMI");
        }
        self.server_error = None;
        self.state = FormState::Editing;
    }

    /// Runs the given passes, keeping earlier errors of fields not checked
    /// this time.
    pub fn validate(&mut self, stages: &[Stage]) -> Result<()> {
        let errors = validation::validate(stages, &self.input);
        if errors.is_empty() {
            Ok(())
        } else {
            self.errors.merge(errors.clone());
            Err(FormError::Validation(errors))
        }
    }

    pub fn calculate(&mut self) -> Result<BmiResult> {
        self.server_error = None;
        let measurement = validation::parse_measurement(&self.input).map_err(|errors| {
            self.errors.merge(errors.clone());
            FormError::Validation(errors)
        })?;

        let result = measurement.bmi();
        info!("Calculated BMI {:.2} ({})", result.bmi, result.category);
        self.result = Some(result);
        self.state = FormState::Calculated;
        Ok(result)
    }

    pub(crate) fn set_state(&mut self, state: FormState) {
        self.state = state;
    }

    /// Validates every field and builds the record to store.
    pub(crate) fn assemble(&mut self) -> Result<Record> {
        self.validate(&[Stage::Measurement, Stage::Contact])?;
        let measurement =
            validation::parse_measurement(&self.input).map_err(FormError::Validation)?;
        let contact = validation::parse_contact(&self.input).map_err(FormError::Validation)?;

        let result = *self.result.get_or_insert_with(|| measurement.bmi());
        Ok(Record::new(contact, measurement, result))
    }

    pub(crate) async fn persist(&mut self, client: &dyn Client, record: Record) -> Result<Record> {
        let mut submission = Submission::start(self);

        debug!("Storing record {:?}", record);
        match client.insert_record(RECORDS_TABLE, &record).await {
            Ok(()) => {
                info!("Record stored in {}", RECORDS_TABLE);
                submission.session.state = FormState::Submitted;
                Ok(record)
            }
            Err(e) => {
                error!("Failed to store record in {}: {}", RECORDS_TABLE, e);
                submission.session.fail();
                Err(FormError::Persistence)
            }
        }
    }

    fn fail(&mut self) {
        self.state = FormState::SubmitFailed;
        self.server_error = Some(SAVE_FAILED_MESSAGE);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Holds the session in `Submitting` while a write is pending. If the write
/// is dropped before it completes, the session ends up in `SubmitFailed`.
struct Submission<'a> {
    session: &'a mut FormSession,
}

impl<'a> Submission<'a> {
    fn start(session: &'a mut FormSession) -> Self {
        session.state = FormState::Submitting;
        session.server_error = None;
        Self { session }
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        if self.session.state == FormState::Submitting {
            warn!("Write to {} abandoned before completing", RECORDS_TABLE);
            self.session.fail();
        }
    }
}
