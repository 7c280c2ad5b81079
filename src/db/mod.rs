pub mod mongo;

#[cfg(test)]
pub mod memory;

use log::{error, info};
use mongodb::bson::oid::ObjectId;
use mongodb::error::Result;
use rocket::fairing::AdHoc;

use crate::config::AppConfig;
use crate::models::{
    Booking, BookingParty, DeleteOutcome, InsertOutcome, Service, ServiceUpdate, UpdateOutcome,
};

pub use mongo::MongoStore;

/// One method per persistence operation the routes perform.
#[rocket::async_trait]
pub trait Store: Send + Sync {
    async fn insert_service(&self, service: Service) -> Result<InsertOutcome>;

    /// Every service, or only those of one provider.
    async fn services(&self, provider_email: Option<&str>) -> Result<Vec<Service>>;

    async fn service(&self, id: ObjectId) -> Result<Option<Service>>;

    /// Sets the editable fields, inserting a document with this id if none exists.
    async fn upsert_service(&self, id: ObjectId, update: &ServiceUpdate) -> Result<UpdateOutcome>;

    async fn delete_service(&self, id: ObjectId) -> Result<DeleteOutcome>;

    async fn insert_booking(&self, booking: Booking) -> Result<InsertOutcome>;

    async fn bookings(&self, party: BookingParty<'_>) -> Result<Vec<Booking>>;

    async fn set_booking_status(&self, id: ObjectId, status: &str) -> Result<UpdateOutcome>;
}

pub type DbConn = Box<dyn Store>;

pub fn init() -> AdHoc {
    AdHoc::try_on_ignite("MongoDB", |rocket| async {
        let Some(config) = rocket.state::<AppConfig>().cloned() else {
            error!("✗ MongoDB needs AppConfig to be managed first");
            return Err(rocket);
        };

        match MongoStore::connect(&config).await {
            Ok(store) => {
                info!("✓ MongoDB connected successfully");
                Ok(rocket.manage::<DbConn>(Box::new(store)))
            }
            Err(e) => {
                error!("✗ Failed to connect to MongoDB: {}", e);
                Err(rocket)
            }
        }
    })
}
