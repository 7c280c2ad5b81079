use log::{debug, error};
use rocket::Request;
use rocket::http::Status;
use rocket::request::{self, FromRequest, Outcome};

use super::reject;
use crate::services::JwtService;
use crate::utils::ApiError;

/// Where a request carries its identity token.
pub trait CredentialSource: Send + Sync {
    fn extract(&self, req: &Request<'_>) -> Option<String>;
}

/// Reads the token from a named cookie.
pub struct CookieCredential {
    name: String,
}

impl CookieCredential {
    pub fn new(name: impl Into<String>) -> Self {
        CookieCredential { name: name.into() }
    }
}

impl CredentialSource for CookieCredential {
    fn extract(&self, req: &Request<'_>) -> Option<String> {
        req.cookies()
            .get(&self.name)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    }
}

/// Reads the token from `Authorization: Bearer <token>`.
pub struct BearerCredential;

impl CredentialSource for BearerCredential {
    fn extract(&self, req: &Request<'_>) -> Option<String> {
        req.headers()
            .get_one("Authorization")
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    }
}

/// JWT-based authentication guard
pub struct AuthGuard {
    pub email: String,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthGuard {
    type Error = ApiError;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let rocket = req.rocket();
        let (Some(source), Some(jwt)) = (
            rocket.state::<Box<dyn CredentialSource>>(),
            rocket.state::<JwtService>(),
        ) else {
            error!("Auth guard used without a token codec; is the jwt fairing attached?");
            return Outcome::Error((
                Status::InternalServerError,
                ApiError::internal_error("Internal Server Error"),
            ));
        };

        let Some(token) = source.extract(req) else {
            return reject(req, ApiError::unauthorized());
        };

        match jwt.verify(&token) {
            Ok(claims) => Outcome::Success(AuthGuard {
                email: claims.email,
            }),
            Err(e) => {
                debug!("Rejected identity token: {}", e);
                reject(req, ApiError::unauthorized())
            }
        }
    }
}
