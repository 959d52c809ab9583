use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::domains::auth::JwtService;
use crate::domains::user::models::User;
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// The authenticated caller, resolved from a verified session token
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// JWT authentication middleware for protected routes
///
/// Extracts the bearer token, verifies signature and expiry, resolves the
/// subject to a user record, and adds CurrentUser to request extensions.
/// Requests without a valid token are rejected before the handler runs.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = resolve_current_user(request.headers(), &state.jwt_service, &state.db_pool).await?;

    debug!("Authenticated user: {}", user.id);
    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Resolve the caller from the Authorization header
///
/// Distinguishes a missing/malformed header (Unauthenticated) from a token
/// that fails verification or points at a deleted user (InvalidCredentials).
pub async fn resolve_current_user(
    headers: &HeaderMap,
    jwt_service: &JwtService,
    pool: &PgPool,
) -> Result<User, ApiError> {
    let token = extract_bearer_token(headers).ok_or(ApiError::Unauthenticated)?;

    let claims = jwt_service
        .verify_token(token)
        .map_err(|_| ApiError::InvalidCredentials)?;

    let user_id: Uuid = claims
        .sub
        .parse()
        .map_err(|_| ApiError::InvalidCredentials)?;

    // Stale-token case: the subject may have been deleted since issuance
    User::find_by_id(user_id, pool)
        .await?
        .ok_or(ApiError::InvalidCredentials)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;
    auth_str.strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_token_with_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));

        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_no_auth_header() {
        let headers = HeaderMap::new();
        assert!(extract_bearer_token(&headers).is_none());
    }

    #[test]
    fn test_header_without_bearer_prefix_is_malformed() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("abc.def.ghi"));

        assert!(extract_bearer_token(&headers).is_none());
    }
}
