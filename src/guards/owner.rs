use rocket::outcome::try_outcome;
use rocket::request::{self, FromRequest, Outcome, Request};

use super::{AuthGuard, reject};
use crate::utils::ApiError;

/// Fails with 403 unless `requested` is exactly the authenticated email.
/// A missing email never matches.
pub fn ensure_owner(identity: &str, requested: Option<&str>) -> Result<(), ApiError> {
    match requested {
        Some(email) if email == identity => Ok(()),
        _ => Err(ApiError::forbidden()),
    }
}

/// An authenticated caller whose `?email=` query names themselves.
pub struct OwnerScope {
    pub auth: AuthGuard,
}

impl OwnerScope {
    pub fn email(&self) -> &str {
        &self.auth.email
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for OwnerScope {
    type Error = ApiError;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let auth = try_outcome!(req.guard::<AuthGuard>().await);

        let requested = req
            .query_value::<&str>("email")
            .and_then(|value| value.ok());

        match ensure_owner(&auth.email, requested) {
            Ok(()) => Outcome::Success(OwnerScope { auth }),
            Err(e) => reject(req, e),
        }
    }
}
