// src/handlers/employees.rs

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
    models::{
        auth::MessageResponse,
        payroll::{
            CreateEmployeePayload, Employee, MonthlyResetPayload, MonthlyResetResponse,
            RecordPaymentPayload, UpdateEmployeePayload,
        },
    },
};

// =============================================================================
//  ÁREA 1: CADASTRO
// =============================================================================

// POST /api/employees
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Employees",
    request_body = CreateEmployeePayload,
    responses(
        (status = 201, description = "Funcionário cadastrado", body = Employee),
        (status = 400, description = "Dados inválidos ou employeeId/aadhaar repetido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<CreateEmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let employee = app_state.payroll_service.create_employee(payload).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

// GET /api/employees
#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Employees",
    responses((status = 200, description = "Todos os funcionários", body = Vec<Employee>)),
    security(("api_jwt" = []))
)]
pub async fn list_employees(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let employees = app_state.payroll_service.list_employees().await?;
    Ok(Json(employees))
}

// GET /api/employees/{id}
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Funcionário", body = Employee),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_employee(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let employee = app_state.payroll_service.get_employee(id).await?;
    Ok(Json(employee))
}

// PUT /api/employees/{id}
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    request_body = UpdateEmployeePayload,
    responses(
        (status = 200, description = "Funcionário atualizado", body = Employee),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_employee(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateEmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let employee = app_state.payroll_service.update_employee(id, payload).await?;
    Ok(Json(employee))
}

// DELETE /api/employees/{id}
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Removido", body = MessageResponse),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_employee(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.payroll_service.delete_employee(id).await?;
    Ok(Json(MessageResponse::new("Employee deleted successfully")))
}

// =============================================================================
//  ÁREA 2: FOLHA DE PAGAMENTO
// =============================================================================

// POST /api/employees/{id}/payments
#[utoipa::path(
    post,
    path = "/api/employees/{id}/payments",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    request_body = RecordPaymentPayload,
    responses(
        (status = 200, description = "Pagamento registrado", body = Employee),
        (status = 400, description = "Valor inválido ou acima do saldo"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn record_payment(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<RecordPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let employee = app_state.payroll_service.record_payment(id, payload.amount).await?;
    Ok(Json(employee))
}

// PUT /api/employees/reset
#[utoipa::path(
    put,
    path = "/api/employees/reset",
    tag = "Employees",
    request_body = MonthlyResetPayload,
    responses(
        (status = 200, description = "Zeragem aplicada (repetir no mesmo mês não altera nada)", body = MonthlyResetResponse),
        (status = 400, description = "Mês/ano inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn monthly_reset(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<MonthlyResetPayload>,
) -> Result<impl IntoResponse, AppError> {
    let response = app_state
        .payroll_service
        .monthly_reset(&payload.current_month_year)
        .await?;
    Ok(Json(response))
}
