//! End-to-end tests through Rocket's local client against the in-memory store.


use rocket::figment::Figment;
use rocket::http::{ContentType, Cookie, Status};
use rocket::local::asynchronous::{Client, LocalResponse};
use serde_json::Value;

use crate::db::DbConn;
use crate::db::memory::MemoryStore;

pub(crate) const SECRET: &str = "test-signing-secret";

pub(crate) fn figment() -> Figment {
    Figment::from(rocket::Config::debug_default())
        .merge(("log_level", "off"))
        .merge(("access_token_secret", SECRET))
}

pub(crate) async fn client_with(figment: Figment) -> Client {
    let rocket = crate::build(figment).manage::<DbConn>(Box::new(MemoryStore::default()));
    Client::untracked(rocket).await.expect("valid rocket instance")
}

pub(crate) async fn client() -> Client {
    client_with(figment()).await
}

/// Signs in through `/jwt` and returns the issued cookie.
pub(crate) async fn login(client: &Client, email: &str) -> Cookie<'static> {
    let response = client
        .post("/jwt")
        .json(&serde_json::json!({ "email": email }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    response
        .cookies()
        .get("token")
        .cloned()
        .expect("token cookie is set")
}

pub(crate) async fn json(response: LocalResponse<'_>) -> Value {
    assert_eq!(response.content_type(), Some(ContentType::JSON));
    response.into_json::<Value>().await.expect("JSON body")
}

/// An id as clients receive it: a 24-hex string.
pub(crate) fn oid(value: &Value) -> String {
    let id = value.as_str().expect("id is a string");
    assert!(crate::utils::is_resource_id(id), "{} is not a resource id", id);
    id.to_string()
}

pub(crate) async fn create_service(client: &Client, cookie: &Cookie<'static>, body: Value) -> String {
    let response = client
        .post("/services")
        .cookie(cookie.clone())
        .json(&body)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    oid(&json(response).await["insertedId"])
}

pub(crate) async fn create_booking(client: &Client, cookie: &Cookie<'static>, body: Value) -> String {
    let response = client
        .post("/bookings")
        .cookie(cookie.clone())
        .json(&body)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    oid(&json(response).await["insertedId"])
}
