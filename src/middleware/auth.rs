// src/middleware/auth.rs

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
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{Claims, Role},
};

/// Quem fez a requisição, extraído de um token válido.
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self { id: claims.sub, role: claims.role }
    }
}

async fn principal_from_request(
    app_state: &AppState,
    request: Request,
) -> Result<(Principal, Request), AppError> {
    let (mut parts, body) = request.into_parts();

    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(&mut parts, &())
            .await
            .map_err(|_| AppError::InvalidToken)?;

    let claims = app_state.auth_service.validate_token(bearer.token())?;
    Ok((claims.into(), Request::from_parts(parts, body)))
}

// Qualquer token válido (cliente ou admin)
pub async fn auth_guard(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (principal, mut request) = principal_from_request(&app_state, request).await?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

// Só tokens com role = admin
pub async fn admin_guard(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (principal, mut request) = principal_from_request(&app_state, request).await?;

    if principal.role != Role::Admin {
        tracing::warn!("🚫 Acesso de admin negado para {}", principal.id);
        return Err(AppError::Forbidden);
    }

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub Principal);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}
