#[macro_use]
extern crate rocket;

mod config;
mod db;
mod guards;
mod models;
mod routes;
mod services;
mod utils;

#[cfg(test)]
mod tests;

use dotenvy::dotenv;
use log::info;
use rocket::fairing::{AdHoc, Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::http::{Header, Status};
use rocket::{Build, Request, Response, Rocket};

use crate::config::{AppConfig, Config};
use crate::utils::ApiError;

/* ----------------------------- CORS ----------------------------- */

pub struct CORS;

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let Some(config) = request.rocket().state::<AppConfig>() else {
            return;
        };

        // Credentialed requests need the exact origin echoed back, never `*`.
        if let Some(origin) = request.headers().get_one("Origin") {
            if config.allows_origin(origin) {
                response.set_header(Header::new("Access-Control-Allow-Origin", origin.to_string()));
                response.set_header(Header::new("Vary", "Origin"));
            }
        }

        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, PATCH, DELETE, OPTIONS",
        ));

        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "Content-Type, Authorization",
        ));

        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

/* ----------------------------- OPTIONS ----------------------------- */

#[options("/<_..>")]
fn options_handler() {}

#[get("/")]
fn index() -> &'static str {
    "Service marketplace server running"
}

/* ----------------------------- ERRORS ----------------------------- */

#[catch(default)]
fn default_catcher(status: Status, request: &Request<'_>) -> ApiError {
    guards::rejection(request).unwrap_or_else(|| {
        ApiError::new(status, status.reason().unwrap_or("Request failed"))
    })
}

/* ----------------------------- LAUNCH ----------------------------- */

/// Everything except the database, which callers attach or manage.
pub fn build(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(AdHoc::config::<AppConfig>())
        .attach(services::jwt::init())
        .attach(CORS)
        .mount("/", routes![options_handler, index])
        .mount(
            "/",
            routes![
                // Auth
                routes::auth::issue_token,
                routes::auth::logout,
                // Services
                routes::service::create_service,
                routes::service::get_all_services,
                routes::service::get_other_services,
                routes::service::get_my_services,
                routes::service::get_my_service,
                routes::service::get_service_details,
                routes::service::update_service,
                routes::service::delete_service,
                // Bookings
                routes::booking::create_booking,
                routes::booking::get_my_bookings,
                routes::booking::get_my_pending_works,
                routes::booking::update_status,
            ],
        )
        .register("/", catchers![default_catcher])
}

#[launch]
fn rocket() -> Rocket<Build> {
    dotenv().ok();
    env_logger::init();
    info!("🚀 Marketplace API starting");

    build(Config::figment()).attach(db::init())
}
