// src/handlers/auth.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    common::extract::{ApiJson, ApiPath},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{
        Admin, AdminAuthResponse, AdminSignupPayload, ForgetPasswordPayload, LoginPayload,
        MessageResponse, User, UserAuthResponse, UserSignupPayload,
    },
};

// =============================================================================
//  ÁREA 1: CLIENTES
// =============================================================================

// POST /api/users/signup
#[utoipa::path(
    post,
    path = "/api/users/signup",
    tag = "Users",
    request_body = UserSignupPayload,
    responses(
        (status = 201, description = "Cliente cadastrado", body = UserAuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn signup(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<UserSignupPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let response = app_state.auth_service.signup_user(payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

// POST /api/users/login
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Users",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login efetuado", body = UserAuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let response = app_state.auth_service.login_user(payload).await?;
    Ok(Json(response))
}

// POST /api/users/logout
// Tokens não têm estado no servidor: o cliente só descarta o seu.
#[utoipa::path(
    post,
    path = "/api/users/logout",
    tag = "Users",
    responses(
        (status = 200, description = "Logout efetuado", body = MessageResponse),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn logout(AuthenticatedUser(principal): AuthenticatedUser) -> impl IntoResponse {
    tracing::debug!("Logout de {}", principal.id);
    Json(MessageResponse::new("Logged out successfully"))
}

// POST /api/users/forget-password
#[utoipa::path(
    post,
    path = "/api/users/forget-password",
    tag = "Users",
    request_body = ForgetPasswordPayload,
    responses(
        (status = 200, description = "Senha redefinida", body = MessageResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn forget_password(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<ForgetPasswordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state.auth_service.reset_password(payload).await?;
    Ok(Json(MessageResponse::new("Password reset successfully")))
}

// GET /api/users/get-user-info
#[utoipa::path(
    get,
    path = "/api/users/get-user-info",
    tag = "Users",
    responses(
        (status = 200, description = "Dados do cliente logado", body = User),
        (status = 401, description = "Token ausente ou inválido"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user_info(
    State(app_state): State<AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state.auth_service.get_user(principal.id).await?;
    Ok(Json(user))
}

// GET /api/users/get-all-users
#[utoipa::path(
    get,
    path = "/api/users/get-all-users",
    tag = "Users",
    responses(
        (status = 200, description = "Todos os clientes", body = Vec<User>),
        (status = 403, description = "Requer admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_all_users(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = app_state.auth_service.list_users().await?;
    Ok(Json(users))
}

// DELETE /api/users/{id}
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente removido", body = MessageResponse),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.auth_service.delete_user(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

// =============================================================================
//  ÁREA 2: ADMINISTRADORES
// =============================================================================

// POST /api/admin/signup
#[utoipa::path(
    post,
    path = "/api/admin/signup",
    tag = "Admin",
    request_body = AdminSignupPayload,
    responses(
        (status = 201, description = "Administrador cadastrado", body = Admin),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn admin_signup(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<AdminSignupPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let admin = app_state.auth_service.signup_admin(payload).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

// POST /api/admin/login
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "Admin",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login efetuado", body = AdminAuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn admin_login(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let response = app_state.auth_service.login_admin(payload).await?;
    Ok(Json(response))
}
