use mongodb::bson::Document;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// The customer who made the booking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booker_email: Option<String>,

    /// The provider of the booked service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_email: Option<String>,

    /// pending / accepted / rejected, as the client chooses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(flatten)]
    pub extra: Document,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// Which side of a booking a listing is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingParty<'a> {
    Booker(&'a str),
    Provider(&'a str),
}

impl<'a> BookingParty<'a> {
    pub fn field(&self) -> &'static str {
        match self {
            BookingParty::Booker(_) => "bookerEmail",
            BookingParty::Provider(_) => "providerEmail",
        }
    }

    pub fn email(&self) -> &'a str {
        match self {
            BookingParty::Booker(email) | BookingParty::Provider(email) => email,
        }
    }
}
