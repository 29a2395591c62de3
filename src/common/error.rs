// src/common/error.rs

use std::collections::HashMap;
use std::sync::OnceLock;

use axum::{
    extract::multipart::MultipartRejection,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Definido uma única vez no boot. Em produção os detalhes dos erros 500 não saem na resposta.
static EXPOSE_INTERNAL_ERRORS: OnceLock<bool> = OnceLock::new();

pub fn expose_internal_errors(enabled: bool) {
    let _ = EXPOSE_INTERNAL_ERRORS.set(enabled);
}

fn internal_details_enabled() -> bool {
    *EXPOSE_INTERNAL_ERRORS.get().unwrap_or(&false)
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    // Erro de validação de um campo só, decidido fora do derive (ex: saldo, status)
    #[error("Invalid value for '{field}': {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    // Corpo, rota ou query que nem chegou a ser desserializado
    #[error("Malformed request ({field}): {message}")]
    MalformedRequest {
        field: String,
        message: String,
    },

    #[error("{0} must be unique")]
    DuplicateKey(String),

    #[error("E-mail already registered")]
    EmailAlreadyExists,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid signature")]
    SignatureMismatch,

    #[error("Payment gateway error: {0}")]
    PaymentGateway(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        AppError::InvalidField { field, message: message.into() }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Todos os detalhes da validação, campo a campo
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(api_field_name(&field), messages);
                }
                let body = Json(json!({
                    "error": "Validation failed",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidField { field, message } => {
                let mut details = serde_json::Map::new();
                details.insert(field.to_string(), json!([message]));
                let body = Json(json!({
                    "error": "Validation failed",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::MalformedRequest { field, message } => {
                let mut details = serde_json::Map::new();
                details.insert(field, json!([message]));
                let body = Json(json!({
                    "error": "Validation failed",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::DuplicateKey(field) => {
                let body = Json(json!({
                    "error": format!("{} must be unique", field),
                    "field": field,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::NotFound(entity) => {
                let body = Json(json!({ "error": format!("{} not found", entity) }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "User already exists".to_string()),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Unauthorized - invalid or missing token".to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden - admin access required".to_string()),
            AppError::SignatureMismatch => (StatusCode::BAD_REQUEST, "Invalid signature".to_string()),
            AppError::PaymentGateway(ref msg) => {
                tracing::error!("Falha no gateway de pagamento: {}", msg);
                (StatusCode::BAD_GATEWAY, "Payment gateway unavailable".to_string())
            }

            // O resto (banco, bcrypt, jwt, io, anyhow) vira 500.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                if internal_details_enabled() {
                    let body = Json(json!({
                        "error": "Something went wrong!",
                        "details": e.to_string(),
                    }));
                    return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
                }
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong!".to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

// Campos que o cliente já envia em snake_case (checkout do Razorpay)
const SNAKE_CASE_WIRE_PREFIXES: &[&str] = &["razorpay_"];

/// Nome do campo como o cliente o envia: `phone_number` -> `phoneNumber`.
/// Chaves internas do validator (`__all__`) ficam como estão.
fn api_field_name(field: &str) -> String {
    if field.starts_with('_') || SNAKE_CASE_WIRE_PREFIXES.iter().any(|p| field.starts_with(p)) {
        return field.to_string();
    }

    let mut name = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            name.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            name.push(c);
        }
    }
    name
}

const JSON_DATA_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Tira do texto da rejeição o campo culpado e uma mensagem curta.
/// O texto vem como "<prefixo>: <caminho>: <erro do serde> at line L column C".
fn describe_json_data_error(text: &str) -> (String, String) {
    let detail = text.strip_prefix(JSON_DATA_PREFIX).unwrap_or(text);
    let detail = match detail.rfind(" at line ") {
        Some(idx) => &detail[..idx],
        None => detail,
    };

    if let Some(rest) = detail.split("missing field `").nth(1) {
        let field = rest.split('`').next().unwrap_or_default();
        return (field.to_string(), "This field is required".to_string());
    }

    if let Some((path, inner)) = detail.split_once(": ") {
        if !path.is_empty() && !path.contains(' ') {
            let field = path.split(['.', '[']).next().unwrap_or(path);
            return (field.to_string(), inner.to_string());
        }
    }

    ("body".to_string(), detail.to_string())
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let (field, message) = match &rejection {
            JsonRejection::JsonDataError(e) => describe_json_data_error(&e.body_text()),
            JsonRejection::JsonSyntaxError(_) => {
                ("body".to_string(), "Request body is not valid JSON".to_string())
            }
            JsonRejection::MissingJsonContentType(_) => (
                "body".to_string(),
                "Expected a JSON body with Content-Type: application/json".to_string(),
            ),
            other => ("body".to_string(), other.body_text()),
        };
        AppError::MalformedRequest { field, message }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        // Todas as rotas com parâmetro usam um único `{id}` (ou `{category}`, que é texto livre)
        let message = match &rejection {
            PathRejection::FailedToDeserializePathParams(_) => "Invalid id".to_string(),
            other => other.body_text(),
        };
        AppError::MalformedRequest { field: "id".to_string(), message }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::MalformedRequest {
            field: "query".to_string(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::MalformedRequest {
            field: "form".to_string(),
            message: rejection.body_text(),
        }
    }
}
