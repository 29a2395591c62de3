// src/handlers/catalog.rs

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    common::extract::{ApiMultipart, ApiPath},
    config::AppState,
    models::{auth::MessageResponse, catalog::Service},
    services::catalog_service::{ServiceUpload, UploadedImage},
};

// Só para a documentação: formato do multipart aceito em POST/PUT
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ServiceMultipart {
    #[schema(example = "Deep Home Cleaning")]
    title: Option<String>,
    description: Option<String>,
    #[schema(example = "1499.00")]
    price: Option<String>,
    #[schema(example = "cleaning")]
    category: Option<String>,
    duration: Option<String>,
    #[schema(example = "active")]
    status: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
}

/// Lê todos os campos do formulário. O arquivo vem no campo `image`.
async fn read_upload(mut multipart: Multipart) -> Result<ServiceUpload, AppError> {
    let mut upload = ServiceUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid_field("form", e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::invalid_field("image", e.body_text()))?;

                // Input de arquivo vazio chega sem conteúdo
                if name == "image" && !bytes.is_empty() {
                    upload.image = Some(UploadedImage { file_name, bytes });
                }
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::invalid_field("form", e.body_text()))?;
                upload.fields.insert(name, value);
            }
        }
    }

    Ok(upload)
}

// POST /api/services
#[utoipa::path(
    post,
    path = "/api/services",
    tag = "Services",
    request_body(content = ServiceMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Serviço criado", body = Service),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_service(
    State(app_state): State<AppState>,
    ApiMultipart(multipart): ApiMultipart,
) -> Result<impl IntoResponse, AppError> {
    let upload = read_upload(multipart).await?;

    let service = app_state.catalog_service.create_service(upload).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

// GET /api/services
#[utoipa::path(
    get,
    path = "/api/services",
    tag = "Services",
    responses((status = 200, description = "Todos os serviços", body = Vec<Service>))
)]
pub async fn list_services(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let services = app_state.catalog_service.list_services().await?;
    Ok(Json(services))
}

// GET /api/services/category/{category}
#[utoipa::path(
    get,
    path = "/api/services/category/{category}",
    tag = "Services",
    params(("category" = String, Path, description = "Categoria")),
    responses((status = 200, description = "Serviços da categoria", body = Vec<Service>))
)]
pub async fn list_services_by_category(
    State(app_state): State<AppState>,
    ApiPath(category): ApiPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let services = app_state.catalog_service.list_by_category(&category).await?;
    Ok(Json(services))
}

// GET /api/services/{id}
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "Services",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço", body = Service),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn get_service(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let service = app_state.catalog_service.get_service(id).await?;
    Ok(Json(service))
}

// PUT /api/services/{id}
#[utoipa::path(
    put,
    path = "/api/services/{id}",
    tag = "Services",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    request_body(content = ServiceMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Serviço atualizado", body = Service),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_service(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiMultipart(multipart): ApiMultipart,
) -> Result<impl IntoResponse, AppError> {
    let upload = read_upload(multipart).await?;

    let service = app_state.catalog_service.update_service(id, upload).await?;
    Ok(Json(service))
}

// DELETE /api/services/{id}
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = "Services",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Removido", body = MessageResponse),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_service(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_service(id).await?;
    Ok(Json(MessageResponse::new("Service deleted successfully")))
}
