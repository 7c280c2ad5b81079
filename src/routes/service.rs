use rocket::State;
use rocket::serde::json::Json;

use crate::db::DbConn;
use crate::guards::{AuthGuard, OwnerScope, ResourceId, ensure_owner};
use crate::models::{DeleteOutcome, InsertOutcome, Service, ServiceUpdate, UpdateOutcome};
use crate::utils::{ApiError, DocumentJson};

/// Create a service; only on one's own behalf
#[post("/services", data = "<dto>")]
pub async fn create_service(
    auth: AuthGuard,
    db: &State<DbConn>,
    dto: Json<Service>,
) -> Result<Json<InsertOutcome>, ApiError> {
    let service = dto.into_inner();
    ensure_owner(&auth.email, service.provider_email.as_deref())?;

    let result = db
        .insert_service(service)
        .await
        .map_err(ApiError::persistence)?;

    Ok(Json(result))
}

/// Get all services
#[get("/services")]
pub async fn get_all_services(
    db: &State<DbConn>,
) -> Result<DocumentJson<Vec<Service>>, ApiError> {
    let services = db.services(None).await.map_err(ApiError::persistence)?;

    Ok(DocumentJson(services))
}

/// Services of any provider, for signed-in browsing
#[get("/otherServices?<email>")]
pub async fn get_other_services(
    email: Option<&str>,
    _auth: AuthGuard,
    db: &State<DbConn>,
) -> Result<DocumentJson<Vec<Service>>, ApiError> {
    let email = email.ok_or_else(|| ApiError::bad_request("missing query parameter: email"))?;

    let services = db
        .services(Some(email))
        .await
        .map_err(ApiError::persistence)?;

    Ok(DocumentJson(services))
}

#[get("/myServices")]
pub async fn get_my_services(
    owner: OwnerScope,
    db: &State<DbConn>,
) -> Result<DocumentJson<Vec<Service>>, ApiError> {
    let services = db
        .services(Some(owner.email()))
        .await
        .map_err(ApiError::persistence)?;

    Ok(DocumentJson(services))
}

async fn find_service(
    db: &DbConn,
    id: &ResourceId,
) -> Result<DocumentJson<Option<Service>>, ApiError> {
    let service = db
        .service(id.object_id())
        .await
        .map_err(ApiError::persistence)?;

    Ok(DocumentJson(service))
}

#[get("/myService/<_>")]
pub async fn get_my_service(
    id: ResourceId,
    _auth: AuthGuard,
    db: &State<DbConn>,
) -> Result<DocumentJson<Option<Service>>, ApiError> {
    find_service(db, &id).await
}

#[get("/serviceDetails/<_>")]
pub async fn get_service_details(
    id: ResourceId,
    _auth: AuthGuard,
    db: &State<DbConn>,
) -> Result<DocumentJson<Option<Service>>, ApiError> {
    find_service(db, &id).await
}

/// Update a service, creating it under this id if it does not exist
#[put("/myService/<_>", data = "<dto>")]
pub async fn update_service(
    id: ResourceId,
    _auth: AuthGuard,
    db: &State<DbConn>,
    dto: Json<ServiceUpdate>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let result = db
        .upsert_service(id.object_id(), &dto)
        .await
        .map_err(ApiError::persistence)?;

    Ok(Json(result))
}

#[delete("/myService/<_>")]
pub async fn delete_service(
    id: ResourceId,
    _auth: AuthGuard,
    db: &State<DbConn>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    let result = db
        .delete_service(id.object_id())
        .await
        .map_err(ApiError::persistence)?;

    Ok(Json(result))
}
