use folio_core_contact_impl::ContactFeatureServiceImpl;
use folio_core_health_impl::HealthFeatureServiceImpl;
use folio_persistence_mongodb::{contact::MongoContactMessageRepository, MongoDatabase};
use folio_shared_impl::time::TimeServiceImpl;

// API
pub type RestServer = folio_api_rest::RestServer<HealthFeature, ContactFeature>;

// Persistence
pub type Database = MongoDatabase;

// Shared
pub type Time = TimeServiceImpl;

// Repositories
pub type ContactRepo = MongoContactMessageRepository;

// Core
pub type HealthFeature = HealthFeatureServiceImpl<Time, Database>;
pub type ContactFeature = ContactFeatureServiceImpl<Time, ContactRepo>;
