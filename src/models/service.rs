use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use serde::{Deserialize, Serialize};

/// A service listed by a provider. Fields the client sends beyond the known
/// ones are kept in `extra` and stored as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_area: Option<String>,

    /// Whatever the client sent: a number, or text such as "25".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Bson>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: Document,
}

/// Body of `PUT /myService/<id>`. Every field is written, so an omitted
/// field is stored as null.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    pub service_name: Option<String>,
    pub service_image: Option<String>,
    pub service_area: Option<String>,
    pub price: Option<Bson>,
    pub description: Option<String>,
}

impl ServiceUpdate {
    pub fn to_set_document(&self) -> Document {
        doc! {
            "$set": {
                "serviceName": self.service_name.clone(),
                "serviceImage": self.service_image.clone(),
                "serviceArea": self.service_area.clone(),
                "price": self.price.clone(),
                "description": self.description.clone(),
            }
        }
    }
}
