// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;
use utoipa::ToSchema;

use crate::common::validators::{validate_non_negative, validate_not_blank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "service_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Active,
    Inactive,
}

impl ServiceStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "active" => Some(ServiceStatus::Active),
            "inactive" => Some(ServiceStatus::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    #[schema(example = "Deep Home Cleaning")]
    pub title: String,
    #[schema(example = "Full house cleaning including kitchen and bathrooms")]
    pub description: String,
    #[schema(example = "1499.00")]
    pub price: Decimal,
    #[schema(example = "cleaning")]
    pub category: String,
    #[schema(example = "3 hours")]
    pub duration: Option<String>,
    pub status: ServiceStatus,
    #[schema(example = "uploads/1718000000000-cleaning.jpg")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Campos de texto do formulário multipart de criação
#[derive(Debug, Clone, Validate)]
pub struct ServiceForm {
    #[validate(length(min = 3, message = "Title must be at least 3 characters long"))]
    pub title: String,

    #[validate(length(min = 10, message = "Description must be at least 10 characters long"))]
    pub description: String,

    #[validate(custom(function = "validate_non_negative"))]
    pub price: Decimal,

    #[validate(custom(function = "validate_not_blank", message = "Category is required"))]
    pub category: String,

    pub duration: Option<String>,
    pub status: ServiceStatus,
    pub image: Option<String>,
}

// Atualização parcial: só o que veio no formulário é alterado
#[derive(Debug, Clone, Default, Validate)]
pub struct ServicePatch {
    #[validate(length(min = 3, message = "Title must be at least 3 characters long"))]
    pub title: Option<String>,

    #[validate(length(min = 10, message = "Description must be at least 10 characters long"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_non_negative"))]
    pub price: Option<Decimal>,

    #[validate(custom(function = "validate_not_blank", message = "Category is required"))]
    pub category: Option<String>,

    pub duration: Option<String>,
    pub status: Option<ServiceStatus>,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ServiceForm {
        ServiceForm {
            title: "Plumbing".into(),
            description: "Leak repair and pipe fitting".into(),
            price: Decimal::new(49900, 2),
            category: "repairs".into(),
            duration: None,
            status: ServiceStatus::Active,
            image: None,
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn negative_price_and_short_description_are_reported_together() {
        let mut f = form();
        f.price = Decimal::new(-1, 0);
        f.description = "short".into();

        let errors = f.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("description"));
    }

    #[test]
    fn empty_patch_is_valid() {
        assert!(ServicePatch::default().validate().is_ok());
    }
}
