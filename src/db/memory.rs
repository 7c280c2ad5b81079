use mongodb::bson::Bson;
use mongodb::bson::oid::ObjectId;
use mongodb::error::Result;
use tokio::sync::RwLock;

use super::Store;
use crate::models::{
    Booking, BookingParty, DeleteOutcome, InsertOutcome, Service, ServiceUpdate, UpdateOutcome,
};
use crate::utils::hex_object_ids;

/// In-process stand-in for the MongoDB collections.
#[derive(Default)]
pub struct MemoryStore {
    services: RwLock<Vec<Service>>,
    bookings: RwLock<Vec<Booking>>,
}

fn inserted(id: ObjectId) -> InsertOutcome {
    InsertOutcome {
        acknowledged: true,
        inserted_id: hex_object_ids(Bson::ObjectId(id)),
    }
}

/// Applies an update the way `$set` would. Returns whether anything changed.
fn apply(service: &mut Service, update: &ServiceUpdate) -> bool {
    let before = service.clone();

    service.service_name = update.service_name.clone();
    service.service_image = update.service_image.clone();
    service.service_area = update.service_area.clone();
    service.price = update.price.clone();
    service.description = update.description.clone();

    *service != before
}

fn involves(party: BookingParty<'_>, booking: &Booking) -> bool {
    let email = match party {
        BookingParty::Booker(_) => &booking.booker_email,
        BookingParty::Provider(_) => &booking.provider_email,
    };
    email.as_deref() == Some(party.email())
}

fn updated(matched: bool, modified: bool, upserted_id: Option<ObjectId>) -> UpdateOutcome {
    UpdateOutcome {
        acknowledged: true,
        matched_count: u64::from(matched),
        modified_count: u64::from(modified),
        upserted_count: u64::from(upserted_id.is_some()),
        upserted_id: upserted_id.map(|id| hex_object_ids(Bson::ObjectId(id))),
    }
}

#[rocket::async_trait]
impl Store for MemoryStore {
    async fn insert_service(&self, mut service: Service) -> Result<InsertOutcome> {
        let id = *service.id.get_or_insert_with(ObjectId::new);
        self.services.write().await.push(service);
        Ok(inserted(id))
    }

    async fn services(&self, provider_email: Option<&str>) -> Result<Vec<Service>> {
        let services = self.services.read().await;
        Ok(services
            .iter()
            .filter(|s| provider_email.is_none() || s.provider_email.as_deref() == provider_email)
            .cloned()
            .collect())
    }

    async fn service(&self, id: ObjectId) -> Result<Option<Service>> {
        let services = self.services.read().await;
        Ok(services.iter().find(|s| s.id == Some(id)).cloned())
    }

    async fn upsert_service(&self, id: ObjectId, update: &ServiceUpdate) -> Result<UpdateOutcome> {
        let mut services = self.services.write().await;

        if let Some(existing) = services.iter_mut().find(|s| s.id == Some(id)) {
            let modified = apply(existing, update);
            return Ok(updated(true, modified, None));
        }

        let mut service = Service {
            id: Some(id),
            ..Default::default()
        };
        apply(&mut service, update);
        services.push(service);
        Ok(updated(false, false, Some(id)))
    }

    async fn delete_service(&self, id: ObjectId) -> Result<DeleteOutcome> {
        let mut services = self.services.write().await;
        let before = services.len();
        if let Some(index) = services.iter().position(|s| s.id == Some(id)) {
            services.remove(index);
        }

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: (before - services.len()) as u64,
        })
    }

    async fn insert_booking(&self, mut booking: Booking) -> Result<InsertOutcome> {
        let id = *booking.id.get_or_insert_with(ObjectId::new);
        self.bookings.write().await.push(booking);
        Ok(inserted(id))
    }

    async fn bookings(&self, party: BookingParty<'_>) -> Result<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .iter()
            .filter(|b| involves(party, b))
            .cloned()
            .collect())
    }

    async fn set_booking_status(&self, id: ObjectId, status: &str) -> Result<UpdateOutcome> {
        let mut bookings = self.bookings.write().await;

        match bookings.iter_mut().find(|b| b.id == Some(id)) {
            Some(booking) => {
                let modified = booking.status.as_deref() != Some(status);
                booking.status = Some(status.to_string());
                Ok(updated(true, modified, None))
            }
            None => Ok(updated(false, false, None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_reports_whether_the_document_changed() {
        let update = ServiceUpdate {
            service_name: Some("Boat trip".to_string()),
            price: Some(Bson::Double(10.0)),
            ..Default::default()
        };
        let mut service = Service::default();

        assert!(apply(&mut service, &update));
        assert!(!apply(&mut service, &update));
        assert_eq!(service.price, Some(Bson::Double(10.0)));
    }

    #[rocket::async_test]
    async fn listings_survive_a_price_stored_as_text() {
        let store = MemoryStore::default();
        let service: Service = mongodb::bson::from_document(mongodb::bson::doc! {
            "providerEmail": "a@x.com",
            "price": "25",
        })
        .unwrap();
        store.insert_service(service).await.unwrap();

        let listed = store.services(Some("a@x.com")).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].price, Some(Bson::String("25".to_string())));
    }

    #[rocket::async_test]
    async fn write_outcomes_carry_hex_ids() {
        let store = MemoryStore::default();
        let id = ObjectId::new();

        let outcome = store
            .upsert_service(id, &ServiceUpdate::default())
            .await
            .unwrap();
        assert_eq!(outcome.upserted_id, Some(Bson::String(id.to_hex())));

        let outcome = store.insert_booking(Booking::default()).await.unwrap();
        assert!(matches!(outcome.inserted_id, Bson::String(ref hex) if hex.len() == 24));
    }

    #[rocket::async_test]
    async fn booking_listings_match_one_side_only() {
        let store = MemoryStore::default();
        store
            .insert_booking(Booking {
                booker_email: Some("b@x.com".to_string()),
                provider_email: Some("a@x.com".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(store.bookings(BookingParty::Booker("b@x.com")).await.unwrap().len(), 1);
        assert_eq!(store.bookings(BookingParty::Provider("a@x.com")).await.unwrap().len(), 1);
        assert!(store.bookings(BookingParty::Booker("a@x.com")).await.unwrap().is_empty());
    }
}
