use anyhow::Context;
use bson::DateTime;
use folio_models::contact::ContactMessage;
use folio_persistence_contracts::contact::ContactMessageRepository;
use folio_utils::trace_instrument;
use mongodb::Collection;
use serde::Serialize;

use crate::MongoDatabase;

pub const DEFAULT_COLLECTION: &str = "messages";

#[derive(Debug, Clone)]
pub struct MongoContactMessageRepository {
    collection: Collection<ContactMessageDocument>,
}

impl MongoContactMessageRepository {
    pub fn new(db: &MongoDatabase, collection: &str) -> Self {
        Self {
            collection: db.database().collection(collection),
        }
    }
}

impl ContactMessageRepository for MongoContactMessageRepository {
    #[trace_instrument(skip(self, message))]
    async fn create(&self, message: &ContactMessage) -> anyhow::Result<()> {
        self.collection
            .insert_one(ContactMessageDocument::from(message))
            .await
            .context("Failed to insert contact message")?;
        Ok(())
    }
}

/// Stored representation of a [`ContactMessage`]. `_id` is assigned by the
/// server on insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContactMessageDocument {
    name: String,
    email: String,
    message: String,
    submitted_at: DateTime,
}

impl From<&ContactMessage> for ContactMessageDocument {
    fn from(value: &ContactMessage) -> Self {
        Self {
            name: (*value.name).clone(),
            email: (*value.email).clone(),
            message: (*value.message).clone(),
            submitted_at: DateTime::from_chrono(value.submitted_at),
        }
    }
}
