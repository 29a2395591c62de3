// src/models/intake.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;
use utoipa::ToSchema;

use crate::common::validators::validate_not_blank;

// =============================================================================
//  DEPOIMENTOS
// =============================================================================

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: Uuid,
    #[schema(example = 5)]
    pub rating: i16,
    #[schema(example = "Meera")]
    pub name: String,
    #[schema(example = "Pune")]
    pub city: String,
    #[schema(example = "Quick and tidy work!")]
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTestimonialPayload {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,

    #[validate(custom(function = "validate_not_blank", message = "Name is required"))]
    pub name: String,

    #[validate(custom(function = "validate_not_blank", message = "City is required"))]
    pub city: String,

    #[validate(custom(function = "validate_not_blank", message = "Message is required"))]
    pub message: String,
}

// =============================================================================
//  PEDIDOS DE RETORNO (CALLBACK)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "query_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Pending,
    Resolved,
}

impl QueryStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "pending" => Some(QueryStatus::Pending),
            "resolved" => Some(QueryStatus::Resolved),
            _ => None,
        }
    }

    /// `attended` é sempre derivado daqui.
    pub fn is_attended(&self) -> bool {
        matches!(self, QueryStatus::Resolved)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct UserQuery {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub query: String,
    pub status: QueryStatus,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// O que sai na API: o registro + o `attended` calculado
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserQueryView {
    pub id: Uuid,
    #[schema(example = "Karan")]
    pub name: String,
    #[schema(example = "9876543210")]
    pub phone_number: String,
    #[schema(example = "Need an AC service this weekend")]
    pub query: String,
    pub status: QueryStatus,
    pub attended: bool,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserQuery> for UserQueryView {
    fn from(q: UserQuery) -> Self {
        Self {
            attended: q.status.is_attended(),
            id: q.id,
            name: q.name,
            phone_number: q.phone_number,
            query: q.query,
            status: q.status,
            resolved_at: q.resolved_at,
            created_at: q.created_at,
            updated_at: q.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQueryPayload {
    #[validate(custom(function = "validate_not_blank", message = "Name is required"))]
    pub name: String,

    #[validate(custom(function = "validate_not_blank", message = "Phone number is required"))]
    pub phone_number: String,

    #[validate(custom(function = "validate_not_blank", message = "Query is required"))]
    pub query: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQueryStatusPayload {
    #[schema(example = "resolved")]
    pub status: String,
}
