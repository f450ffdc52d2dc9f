use std::future::Future;

use folio_models::contact::ContactMessage;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactMessageRepository: Send + Sync + 'static {
    /// Persist a new contact message.
    ///
    /// Resolves only after the database has acknowledged the write.
    fn create(&self, message: &ContactMessage) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockContactMessageRepository {
    pub fn with_create(mut self, message: ContactMessage, result: anyhow::Result<()>) -> Self {
        self.expect_create()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
