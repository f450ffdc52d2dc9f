use std::future::Future;

pub mod contact;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait Database: Send + Sync + 'static {
    /// Verify the connection to the database.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockDatabase {
    pub fn with_ping(mut self, result: anyhow::Result<()>) -> Self {
        self.expect_ping()
            .once()
            .return_once(|| Box::pin(std::future::ready(result)));
        self
    }
}
