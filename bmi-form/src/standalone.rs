use bmi_client::Client;
use bmi_model::{
    field::{Field, RawFormInput},
    measurement::BmiResult,
    record::Record,
};
use log::info;

use crate::session::{FormError, FormSession, FormState, SuccessListener};

/// Single-step form showing every field at once. A successful submission
/// clears the form for the next entry.
pub struct StandaloneForm {
    session: FormSession,
    client: Box<dyn Client>,
    listener: Box<dyn SuccessListener>,
}

impl StandaloneForm {
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

    pub fn fill(&mut self, input: &RawFormInput) {
        self.session.fill(input)
    }

    /// Previews the BMI. Contact fields are always shown, so a successful
    /// calculation goes straight to registration.
    pub fn calculate(&mut self) -> Result<BmiResult, FormError> {
        let result = self.session.calculate()?;
        self.session.set_state(FormState::ReadyToRegister);
        Ok(result)
    }

    pub fn submit_enabled(&self) -> bool {
        self.session.submit_enabled()
    }

    pub async fn submit(&mut self) -> Result<Record, FormError> {
        if self.state() == FormState::Submitting {
            return Err(FormError::InFlight);
        }

        let record = self.session.assemble()?;
        let record = self.session.persist(self.client.as_ref(), record).await?;
        info!("Registration stored, clearing form");
        self.listener.on_success(&record);
        self.session.reset();
        Ok(record)
    }

    pub fn reset(&mut self) {
        self.session.reset()
    }
}

#[cfg(test)]
mod tests {
    use bmi_client::MockClient;

    use super::*;
    use crate::session::MockSuccessListener;

    #[tokio::test]
    async fn submit_while_submitting_is_rejected() {
        let mut client = MockClient::new();
        client.expect_insert_record().never();
        let mut listener = MockSuccessListener::new();
        listener.expect_on_success().never();

        let mut form = StandaloneForm::new(Box::new(client), Box::new(listener));
        form.session.set_state(FormState::Submitting);

        assert!(!form.submit_enabled());
        assert!(matches!(form.submit().await, Err(FormError::InFlight)));
        assert_eq!(form.state(), FormState::Submitting);
    }
}
