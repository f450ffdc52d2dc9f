use folio_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, ContactValidationError,
};
use folio_models::contact::{
    ContactField, ContactMessage, ContactMessageEmail, ContactMessageName, ContactMessageText,
    ContactSubmission,
};
use folio_persistence_contracts::contact::ContactMessageRepository;
use folio_shared_contracts::time::TimeService;
use folio_utils::trace_instrument;
use tracing::{debug, info};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Default)]
pub struct ContactFeatureServiceImpl<Time, ContactRepo> {
    time: Time,
    contact_repo: ContactRepo,
}

impl<Time, ContactRepo> ContactFeatureServiceImpl<Time, ContactRepo> {
    pub fn new(time: Time, contact_repo: ContactRepo) -> Self {
        Self { time, contact_repo }
    }
}

impl<Time, ContactRepo> ContactFeatureService for ContactFeatureServiceImpl<Time, ContactRepo>
where
    Time: TimeService,
    ContactRepo: ContactMessageRepository,
{
    #[trace_instrument(skip(self, submission))]
    async fn submit_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactMessage, ContactSubmitError> {
        let (name, email, message) = validate(submission).inspect_err(|err| {
            debug!("rejecting contact submission: {err}");
        })?;

        let message = ContactMessage {
            name,
            email,
            message,
            submitted_at: self.time.now(),
        };

        self.contact_repo
            .create(&message)
            .await
            .map_err(ContactSubmitError::Persistence)?;

        info!(submitted_at = %message.submitted_at, "stored contact message");

        Ok(message)
    }
}

type ValidatedFields = (ContactMessageName, ContactMessageEmail, ContactMessageText);

fn validate(submission: ContactSubmission) -> Result<ValidatedFields, ContactValidationError> {
    let name = submission
        .name
        .and_then(|x| ContactMessageName::try_from(x).ok());
    let email = submission
        .email
        .and_then(|x| ContactMessageEmail::try_from(x).ok());
    let message = submission
        .message
        .and_then(|x| ContactMessageText::try_from(x).ok());

    match (name, email, message) {
        (Some(name), Some(email), Some(message)) => Ok((name, email, message)),
        (name, email, message) => {
            let missing = [
                (ContactField::Name, name.is_none()),
                (ContactField::Email, email.is_none()),
                (ContactField::Message, message.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, missing)| missing.then_some(field))
            .collect();
            Err(ContactValidationError::MissingFields(missing))
        }
    }
}
