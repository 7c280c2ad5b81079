use log::error;
use mongodb::bson::{self, Bson};
use rocket::Request;
use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder, Response};
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// -----------------------------
/// Generic API response
/// -----------------------------
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok() -> Self {
        ApiResponse {
            success: true,
            message: None,
            data: None,
        }
    }

    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            message: None,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn error(message: String) -> Self {
        ApiResponse {
            success: false,
            message: Some(message),
            data: None,
        }
    }
}

/// -----------------------------
/// API Error
/// -----------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: Status,
    pub message: String,
}

impl ApiError {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(Status::BadRequest, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(Status::Unauthorized, "Unauthorized Access")
    }

    pub fn forbidden() -> Self {
        Self::new(Status::Forbidden, "Forbidden Access")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Status::NotFound, message)
    }

    /// A path id that can never name a stored document.
    pub fn invalid_identifier() -> Self {
        Self::not_found("invalid id")
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(Status::InternalServerError, message)
    }

    /// The driver's message stays in the log; clients get a generic 500.
    pub fn persistence(e: mongodb::error::Error) -> Self {
        error!("Database error: {}", e);
        Self::internal_error("Internal Server Error")
    }
}

/// -----------------------------
/// Rocket Responder
/// -----------------------------
impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let body = serde_json::to_string(&ApiResponse::error(self.message))
            .unwrap_or_else(|_| r#"{"success":false,"message":"Internal error"}"#.to_string());

        Response::build()
            .status(self.status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

/// -----------------------------
/// Stored documents as JSON
/// -----------------------------
/// Body for documents read from the store. ObjectIds go out as plain hex
/// strings so a client can put them straight back into an id route.
#[derive(Debug)]
pub struct DocumentJson<T>(pub T);

impl<'r, T: Serialize> Responder<'r, 'static> for DocumentJson<T> {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let value = to_client_json(&self.0).map_err(|e| {
            error!("Failed to encode response document: {}", e);
            Status::InternalServerError
        })?;

        Json(value).respond_to(req)
    }
}

pub fn to_client_json<T: Serialize>(value: &T) -> bson::ser::Result<serde_json::Value> {
    Ok(hex_object_ids(bson::to_bson(value)?).into_relaxed_extjson())
}

/// Replaces every ObjectId, nested ones included, with its hex string.
pub fn hex_object_ids(value: Bson) -> Bson {
    match value {
        Bson::ObjectId(id) => Bson::String(id.to_hex()),
        Bson::Document(doc) => Bson::Document(
            doc.into_iter()
                .map(|(key, value)| (key, hex_object_ids(value)))
                .collect(),
        ),
        Bson::Array(items) => Bson::Array(items.into_iter().map(hex_object_ids).collect()),
        other => other,
    }
}
