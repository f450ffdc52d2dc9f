use std::future::Future;

use folio_models::contact::{ContactField, ContactMessage, ContactSubmission};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a contact form submission and persist it.
    ///
    /// Returns the stored message, including the timestamp assigned by the
    /// server.
    fn submit_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<ContactMessage, ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error(transparent)]
    Validation(#[from] ContactValidationError),
    #[error("Failed to persist contact message: {0:#}")]
    Persistence(#[source] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    /// One or more required fields were absent or blank.
    #[error("All fields are required (missing: {})", display_fields(.0))]
    MissingFields(Vec<ContactField>),
}

fn display_fields(fields: &[ContactField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit_message(
        mut self,
        submission: ContactSubmission,
        result: Result<ContactMessage, ContactSubmitError>,
    ) -> Self {
        self.expect_submit_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
