// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use utoipa::ToSchema;

use crate::common::validators::{validate_not_blank, validate_phone};

// Cliente do site, vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[schema(example = "Asha Verma")]
    pub name: String,
    #[schema(example = "asha@example.com")]
    pub email: String,
    #[schema(example = "9876543210")]
    pub phone: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Administrador do back office
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,
    pub name: String,
    pub email: String,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSignupPayload {
    #[validate(custom(function = "validate_not_blank", message = "Name is required"))]
    #[schema(example = "Asha Verma")]
    pub name: String,

    #[validate(email(message = "Invalid e-mail address"))]
    #[schema(example = "asha@example.com")]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "9876543210")]
    pub phone: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[validate(email(message = "Invalid e-mail address"))]
    #[schema(example = "asha@example.com")]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForgetPasswordPayload {
    #[validate(email(message = "Invalid e-mail address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub new_password: String,

    #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSignupPayload {
    #[serde(default)]
    pub name: String,

    #[validate(email(message = "Invalid e-mail address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

// --- Respostas ---

#[derive(Debug, Serialize, ToSchema)]
pub struct UserAuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminAuthResponse {
    pub jwt_token: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário ou do admin)
    pub role: Role,
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

/// Normaliza o e-mail antes de buscar/gravar (trim + minúsculas).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(password: &str, confirm: &str, phone: &str) -> UserSignupPayload {
        UserSignupPayload {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: phone.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn signup_requires_matching_passwords() {
        assert!(signup("secret1", "secret1", "9876543210").validate().is_ok());

        let errors = signup("secret1", "secret2", "9876543210").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("confirm_password"));
    }

    #[test]
    fn signup_rejects_short_phone() {
        let errors = signup("secret1", "secret1", "12345").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  Asha@Example.COM "), "asha@example.com");
    }
}
