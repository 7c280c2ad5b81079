use log::debug;
use rocket::State;
use rocket::serde::json::Json;

use crate::db::DbConn;
use crate::guards::{AuthGuard, OwnerScope, ResourceId, ensure_owner};
use crate::models::{Booking, BookingParty, InsertOutcome, StatusUpdate};
use crate::utils::{ApiError, ApiResponse, DocumentJson};

#[post("/bookings", data = "<dto>")]
pub async fn create_booking(
    auth: AuthGuard,
    db: &State<DbConn>,
    dto: Json<Booking>,
) -> Result<Json<InsertOutcome>, ApiError> {
    let booking = dto.into_inner();
    ensure_owner(&auth.email, booking.booker_email.as_deref())?;

    let result = db
        .insert_booking(booking)
        .await
        .map_err(ApiError::persistence)?;

    Ok(Json(result))
}

/// Bookings the caller made
#[get("/myBookings")]
pub async fn get_my_bookings(
    owner: OwnerScope,
    db: &State<DbConn>,
) -> Result<DocumentJson<Vec<Booking>>, ApiError> {
    let bookings = db
        .bookings(BookingParty::Booker(owner.email()))
        .await
        .map_err(ApiError::persistence)?;

    Ok(DocumentJson(bookings))
}

/// Bookings made against the caller's services
#[get("/myPendingWorks")]
pub async fn get_my_pending_works(
    owner: OwnerScope,
    db: &State<DbConn>,
) -> Result<DocumentJson<Vec<Booking>>, ApiError> {
    let bookings = db
        .bookings(BookingParty::Provider(owner.email()))
        .await
        .map_err(ApiError::persistence)?;

    Ok(DocumentJson(bookings))
}

#[patch("/updateStatus/<_>", data = "<dto>")]
pub async fn update_status(
    id: ResourceId,
    _auth: AuthGuard,
    db: &State<DbConn>,
    dto: Json<StatusUpdate>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let result = db
        .set_booking_status(id.object_id(), &dto.status)
        .await
        .map_err(ApiError::persistence)?;

    if result.matched_count == 1 {
        Ok(Json(ApiResponse::message("Status updated successfully")))
    } else {
        debug!("No booking matched id {}", id.as_str());
        Err(ApiError::not_found("Booking not found"))
    }
}
