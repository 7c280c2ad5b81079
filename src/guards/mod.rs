pub mod auth;
pub mod owner;
pub mod resource_id;

pub use auth::{AuthGuard, BearerCredential, CookieCredential, CredentialSource};
pub use owner::{OwnerScope, ensure_owner};
pub use resource_id::ResourceId;

use rocket::Request;
use rocket::request::Outcome;

use crate::utils::ApiError;

/// Fails a guard and leaves the error where the catcher can find it.
/// The first rejection of a request wins.
pub(crate) fn reject<T>(req: &Request<'_>, error: ApiError) -> Outcome<T, ApiError> {
    let status = error.status;
    req.local_cache(|| Some(error.clone()));
    Outcome::Error((status, error))
}

/// The rejection recorded by `reject`, if any guard failed on this request.
pub(crate) fn rejection(req: &Request<'_>) -> Option<ApiError> {
    req.local_cache(|| None::<ApiError>).clone()
}
