use log::error;
use rocket::State;
use rocket::http::{Cookie, CookieJar, SameSite};
use rocket::serde::json::Json;
use serde::Deserialize;

use crate::config::{AppConfig, TokenSource};
use crate::services::JwtService;
use crate::utils::{ApiError, ApiResponse};

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

/// --------------------
/// Issue identity token
/// --------------------
#[post("/jwt", data = "<dto>")]
pub fn issue_token(
    jwt: &State<JwtService>,
    config: &State<AppConfig>,
    jar: &CookieJar<'_>,
    dto: Json<TokenRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let token = jwt.issue(&dto.email).map_err(|e| {
        error!("Failed to sign token: {}", e);
        ApiError::internal_error("Internal Server Error")
    })?;

    match config.token_source {
        TokenSource::Cookie => {
            // API and client live on different origins.
            jar.add(
                Cookie::build((config.token_cookie.clone(), token))
                    .http_only(true)
                    .secure(true)
                    .same_site(SameSite::None),
            );
            Ok(Json(ApiResponse::ok()))
        }
        TokenSource::Bearer => Ok(Json(ApiResponse::success(serde_json::json!({
            "token": token
        })))),
    }
}

/// --------------------
/// Logout
/// --------------------
#[post("/logout")]
pub fn logout(config: &State<AppConfig>, jar: &CookieJar<'_>) -> Json<ApiResponse<()>> {
    jar.remove(
        Cookie::build((config.token_cookie.clone(), ""))
            .secure(true)
            .same_site(SameSite::None),
    );

    Json(ApiResponse::ok())
}
