use bmi_client::Client;
use bmi_model::{field::Field, measurement::BmiResult, record::Record};
use log::info;

use crate::session::{FormError, FormSession, FormState, SuccessListener};

/// Side panel with two steps: calculate the BMI first, then optionally
/// register the participant.
///
/// After a successful submission the panel stays open in
/// [`FormState::Submitted`] until [`PanelForm::dismiss`] is called.
pub struct PanelForm {
    session: FormSession,
    client: Box<dyn Client>,
    listener: Box<dyn SuccessListener>,
}

impl PanelForm {
    pub fn new(client: Box<dyn Client>, listener: Box<dyn SuccessListener>) -> Self {
        Self {
            session: FormSession::new(),
            client,
            listener,
        }
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn state(&self) -> FormState {
        self.session.state()
    }

    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        self.session.edit(field, value)
    }

    /// Computes the BMI. Once computed, the result is kept until a
    /// measurement changes.
    pub fn calculate(&mut self) -> Result<BmiResult, FormError> {
        match self.session.result() {
            Some(result) => Ok(result),
            None => self.session.calculate(),
        }
    }

    pub fn contact_fields_visible(&self) -> bool {
        matches!(
            self.state(),
            FormState::ReadyToRegister
                | FormState::Submitting
                | FormState::Submitted
                | FormState::SubmitFailed
        )
    }

    pub fn open_registration(&mut self) -> Result<(), FormError> {
        match self.state() {
            FormState::Calculated => {
                self.session.set_state(FormState::ReadyToRegister);
                Ok(())
            }
            FormState::Editing => Err(FormError::NotReady),
            _ => Ok(()),
        }
    }

    pub fn submit_enabled(&self) -> bool {
        self.contact_fields_visible() && self.session.submit_enabled()
    }

    pub async fn submit(&mut self) -> Result<Record, FormError> {
        match self.state() {
            FormState::Submitting => return Err(FormError::InFlight),
            FormState::Editing | FormState::Calculated => return Err(FormError::NotReady),
            _ => {}
        }

        let record = self.session.assemble()?;
        let record = self.session.persist(self.client.as_ref(), record).await?;
        info!("Participant registered");
        self.listener.on_success(&record);
        Ok(record)
    }

    /// Closes the panel, discarding everything entered.
    pub fn dismiss(&mut self) {
        self.session.reset()
    }
}
