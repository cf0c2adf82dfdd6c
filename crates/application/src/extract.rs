//! JSON field extraction helpers.
//!
//! The target API is loose about response shapes, so extraction is
//! tolerant: ids may live under `id` or `<singular>_id`, list bodies
//! may or may not be plain arrays.

use fincheck_domain::{BearerToken, EntityId, Resource, ResponseSpec};

use crate::error::{ApplicationError, ApplicationResult};

/// Extracts the bearer token from a login response body.
///
/// # Errors
///
/// Returns an error if the body is not JSON, the `access_token` field
/// is absent or not a string, or the token is empty.
pub fn bearer_token(response: &ResponseSpec) -> ApplicationResult<BearerToken> {
    let body = response
        .body_as_json()
        .ok_or_else(|| ApplicationError::InvalidResponse("login body is not JSON".to_string()))?;

    let token = body
        .get("access_token")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| ApplicationError::MissingField("access_token".to_string()))?;

    Ok(BearerToken::new(token)?)
}

/// Extracts the created entity id from a create response body, if
/// one is present.
#[must_use]
pub fn created_id(resource: Resource, response: &ResponseSpec) -> Option<EntityId> {
    response
        .body_as_json()
        .and_then(|body| resource.extract_id(&body))
}

/// Returns the element count of a JSON-array list body.
#[must_use]
pub fn list_len(response: &ResponseSpec) -> Option<usize> {
    response
        .body_as_json()
        .and_then(|body| body.as_array().map(Vec::len))
}

/// Checks whether a previously captured id appears in a list body.
///
/// Returns `None` when the body is not a JSON array, in which case
/// reflection cannot be judged.
#[must_use]
pub fn id_reflected(resource: Resource, response: &ResponseSpec, id: &EntityId) -> Option<bool> {
    let body = response.body_as_json()?;
    let items = body.as_array()?;
    Some(
        items
            .iter()
            .any(|item| resource.extract_id(item).as_ref() == Some(id)),
    )
}
