use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::error::Result;
use mongodb::options::UpdateOptions;
use mongodb::{Client, Collection};
use rocket::futures::TryStreamExt;

use super::Store;
use crate::config::AppConfig;
use crate::models::{
    Booking, BookingParty, DeleteOutcome, InsertOutcome, Service, ServiceUpdate, UpdateOutcome,
};

pub struct MongoStore {
    services: Collection<Service>,
    bookings: Collection<Booking>,
}

impl MongoStore {
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.mongodb_uri()).await?;

        // Test connection
        client
            .database("admin")
            .run_command(doc! {"ping": 1}, None)
            .await?;

        let database = client.database(&config.db_name);
        Ok(MongoStore {
            services: database.collection("services"),
            bookings: database.collection("bookings"),
        })
    }
}

#[rocket::async_trait]
impl Store for MongoStore {
    async fn insert_service(&self, service: Service) -> Result<InsertOutcome> {
        let result = self.services.insert_one(&service, None).await?;
        Ok(result.into())
    }

    async fn services(&self, provider_email: Option<&str>) -> Result<Vec<Service>> {
        let filter = provider_email.map(|email| doc! { "providerEmail": email });

        self.services.find(filter, None).await?.try_collect().await
    }

    async fn service(&self, id: ObjectId) -> Result<Option<Service>> {
        self.services.find_one(doc! { "_id": id }, None).await
    }

    async fn upsert_service(&self, id: ObjectId, update: &ServiceUpdate) -> Result<UpdateOutcome> {
        let options = UpdateOptions::builder().upsert(true).build();

        let result = self
            .services
            .update_one(doc! { "_id": id }, update.to_set_document(), options)
            .await?;
        Ok(result.into())
    }

    async fn delete_service(&self, id: ObjectId) -> Result<DeleteOutcome> {
        let result = self.services.delete_one(doc! { "_id": id }, None).await?;
        Ok(result.into())
    }

    async fn insert_booking(&self, booking: Booking) -> Result<InsertOutcome> {
        let result = self.bookings.insert_one(&booking, None).await?;
        Ok(result.into())
    }

    async fn bookings(&self, party: BookingParty<'_>) -> Result<Vec<Booking>> {
        let mut filter = Document::new();
        filter.insert(party.field(), party.email());

        self.bookings.find(filter, None).await?.try_collect().await
    }

    async fn set_booking_status(&self, id: ObjectId, status: &str) -> Result<UpdateOutcome> {
        let result = self
            .bookings
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "status": status } },
                None,
            )
            .await?;
        Ok(result.into())
    }
}
