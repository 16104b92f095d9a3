//! Caller identity.
//!
//! Token issuance lives outside this service; whatever sits in front of it
//! forwards the authenticated user id in the `x-user-id` header.

use axum::http::HeaderMap;

use super::response::ApiError;
use crate::model::User;
use crate::{CollectionsExt, DocumentStore};

pub const USER_HEADER: &str = "x-user-id";

/// The caller's user id from the request headers.
pub(crate) fn caller_id(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Could not validate credentials".into()))
}

/// The calling user. Unknown ids are treated like missing credentials.
pub(crate) fn current_user<S>(store: &S, headers: &HeaderMap) -> Result<User, ApiError>
where
    S: DocumentStore + ?Sized,
{
    let id = caller_id(headers)?;
    store
        .entities::<User>()
        .get(id)?
        .ok_or_else(|| ApiError::Unauthorized("Could not validate credentials".into()))
}
