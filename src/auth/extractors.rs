use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::{cookies::cookie_value, jwt::JwtKeys};
use crate::{error::AppError, state::AppState};

/// Verified identity from the session cookie.
///
/// No cookie is `401`; a cookie that fails signature, expiry, issuer or
/// audience checks is `403`.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = cookie_value(parts, &state.config.cookie.name)
            .ok_or(AppError::NotAuthenticated)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "session token rejected");
            AppError::Forbidden("Token is not valid".into())
        })?;

        Ok(AuthUser(claims.sub))
    }
}
