//! Authentication middleware
//!
//! Each route declares an [`AuthGuard`] in the router. The guard runs before
//! the handler and, for guarded routes, attaches the verified [`Claims`] to
//! the request extensions.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use crate::services::identity::{Claims, MISSING_TOKEN};
use crate::state::AppState;
use crate::utils::errors::{ApiError, Result};
use crate::utils::helpers::bearer_token;

/// Access requirement of a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthGuard {
    /// Public route
    None,
    /// Any caller holding a valid token
    Authenticated,
    /// Valid token whose role list contains the role
    Role(String),
}

impl AuthGuard {
    /// Guard for administrative routes, using the configured role name
    pub fn admin(state: &AppState) -> Self {
        AuthGuard::Role(state.settings.auth.admin_role.clone())
    }

    /// Verify the request against this guard.
    /// Returns the caller's claims for every guard except `None`.
    pub async fn check(&self, state: &AppState, headers: &HeaderMap) -> Result<Option<Claims>> {
        match self {
            AuthGuard::None => Ok(None),
            AuthGuard::Authenticated => authenticate(state, headers).await.map(Some),
            AuthGuard::Role(role) => {
                let claims = authenticate(state, headers).await?;
                if !claims.has_role(role) {
                    warn!(subject = %claims.sub, role = %role, "Caller lacks required role");
                    return Err(ApiError::Unauthorized(format!(
                        "Not authorized for {} access",
                        role
                    )));
                }
                Ok(Some(claims))
            }
        }
    }
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Claims> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthenticated(MISSING_TOKEN.to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthenticated("Invalid authorization header".to_string()))?;

    let token = bearer_token(header).ok_or_else(|| {
        ApiError::Unauthenticated("Format is Authorization: Bearer [token]".to_string())
    })?;

    state.identity.verify(token).await
}

/// Middleware enforcing a route's guard, see [`AuthGuard`]
pub async fn enforce_guard(
    State((state, guard)): State<(AppState, AuthGuard)>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    if let Some(claims) = guard.check(&state, request.headers()).await? {
        debug!(subject = %claims.sub, guard = ?guard, "Request authorized");
        request.extensions_mut().insert(claims);
    }

    Ok(next.run(request).await)
}
