use mongodb::bson::oid::ObjectId;
use rocket::request::{self, FromRequest, Outcome, Request};

use super::reject;
use crate::utils::{ApiError, is_resource_id};

/// Segment of the routed path that holds the id in every `/<name>/<_>` route.
const ID_SEGMENT: usize = 1;

/// The `<id>` path segment, checked before any other guard runs.
///
/// Declared first in a handler's signature so a malformed id is answered with
/// 404 before authentication or storage are consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    raw: String,
    oid: ObjectId,
}

impl ResourceId {
    pub fn parse(raw: &str) -> Option<Self> {
        if !is_resource_id(raw) {
            return None;
        }

        ObjectId::parse_str(raw).ok().map(|oid| ResourceId {
            raw: raw.to_string(),
            oid,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn object_id(&self) -> ObjectId {
        self.oid
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ResourceId {
    type Error = ApiError;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let parsed = req
            .routed_segment(ID_SEGMENT)
            .and_then(ResourceId::parse);

        match parsed {
            Some(id) => Outcome::Success(id),
            None => reject(req, ApiError::invalid_identifier()),
        }
    }
}
