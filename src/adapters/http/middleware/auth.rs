//! Bearer-token authentication for the `/api` routes.
//!
//! `auth_middleware` resolves `Authorization: Bearer <token>` through the
//! `SessionValidator` port and stores the account in request extensions.
//! Handlers take `RequireAuth` to read it back; a request that never
//! presented a token fails there with 401.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::adapters::http::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Validator shared by every authenticated route.
pub type AuthState = Arc<dyn SessionValidator>;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolves the bearer token, if any, before the handler runs.
///
/// A rejected token is answered here with 401 (or 503 when the token store
/// is down). Requests without a token continue untouched.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let outcome = match bearer_token(request.headers()) {
        Some(token) => validator.validate(token).await,
        None => return next.run(request).await,
    };

    match outcome {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(AuthError::ServiceUnavailable(reason)) => {
            error!(%reason, "Token validation unavailable");
            let body = ErrorResponse::new("AUTH_UNAVAILABLE", "Authentication is unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
        Err(e @ AuthError::InvalidToken) => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("AUTH_ERROR", e.to_string())),
        )
            .into_response(),
    }
}

/// The caller's account; rejects with 401 when the middleware found none.
///
/// ```ignore
/// async fn list(RequireAuth(user): RequireAuth) -> String {
///     user.id.to_string()
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = match self {
            AuthRejection::Unauthenticated => {
                ErrorResponse::new("UNAUTHENTICATED", "Authentication required")
            }
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}
