use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{common::error::AppError, config::AppState, models::auth::User};

/// Requires a valid bearer token and stows the resolved user in the request
/// extensions. API-flavoured: missing/invalid credentials answer 401.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::InvalidToken)?;
    let user = app_state.auth_service.validate_token(bearer.token()).await?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Resolves the bearer token to a user without rejecting: the routing guards
/// treat a missing or stale token as "unauthenticated" and redirect instead.
pub async fn resolve_user(
    app_state: &AppState,
    bearer: Option<&TypedHeader<Authorization<Bearer>>>,
) -> Option<User> {
    let TypedHeader(Authorization(bearer)) = bearer?;
    app_state
        .auth_service
        .validate_token(bearer.token())
        .await
        .ok()
}

/// Pulls the authenticated user out of the extensions inside handlers.
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}
