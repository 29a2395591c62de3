// src/models/booking.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;
use validator::Validate;
use utoipa::{IntoParams, ToSchema};

use crate::common::validators::{
    validate_address, validate_phone, validate_pincode, validate_reference_ids,
};

// Conjunto canônico de status (o mesmo do schema do banco).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [
        BookingStatus::Pending,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value.trim())
    }

    pub fn allowed_values() -> String {
        Self::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    #[schema(example = "Ravi Kumar")]
    pub name: String,
    #[schema(example = "ravi@example.com")]
    pub email: String,
    #[schema(example = "9876543210")]
    pub phone_number: String,
    #[schema(example = "12, MG Road, Indiranagar, Bengaluru")]
    pub address: String,
    #[schema(example = "560038")]
    pub pincode: String,
    pub additional_message: String,
    pub service_ids: Vec<Uuid>,
    pub status: BookingStatus,
    pub status_changed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Campos mínimos do serviço que acompanham a listagem
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookedService {
    pub id: Uuid,
    #[schema(example = "Deep Home Cleaning")]
    pub title: String,
    #[schema(example = "1499.00")]
    pub price: Decimal,
    #[schema(example = "3 hours")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithServices {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub booking: Booking,

    #[schema(value_type = Vec<BookedService>)]
    pub services: Json<Vec<BookedService>>,
}

// Resposta do POST /api/book-service
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreated {
    pub booking_id: Uuid,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingCreated {
    fn from(b: Booking) -> Self {
        Self {
            booking_id: b.id,
            status: b.status,
            created_at: b.created_at,
        }
    }
}

/// Dados já validados para gravar um novo agendamento.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub pincode: String,
    pub additional_message: String,
    pub service_ids: Vec<Uuid>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub service_id: Option<Uuid>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingPayload {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    #[schema(example = "Ravi Kumar")]
    pub name: String,

    #[validate(email(message = "Please provide a valid email address"))]
    #[schema(example = "ravi@example.com")]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "9876543210")]
    pub phone_number: String,

    #[validate(custom(function = "validate_address"))]
    pub address: String,

    #[validate(custom(function = "validate_pincode"))]
    #[schema(example = "560038")]
    pub pincode: String,

    #[validate(length(max = 500, message = "Additional message cannot exceed 500 characters"))]
    pub additional_message: Option<String>,

    #[validate(
        length(min = 1, message = "At least one service must be selected"),
        custom(function = "validate_reference_ids")
    )]
    #[serde(default)]
    pub service_ids: Vec<String>,
}

impl CreateBookingPayload {
    /// Converte o payload (já validado) no registro a gravar.
    pub fn into_new_booking(self) -> Option<NewBooking> {
        let service_ids = self
            .service_ids
            .iter()
            .map(|id| Uuid::parse_str(id.trim()).ok())
            .collect::<Option<Vec<_>>>()?;

        Some(NewBooking {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone_number: self.phone_number,
            address: self.address.trim().to_string(),
            pincode: self.pincode,
            additional_message: self.additional_message.unwrap_or_default().trim().to_string(),
            service_ids,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingStatusPayload {
    #[schema(example = "completed")]
    pub status: String,
}

// Filtros de GET /api/bookings, ainda como texto cru
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    pub status: Option<String>,
    pub service_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_only_accepts_canonical_set() {
        assert_eq!(BookingStatus::parse("pending"), Some(BookingStatus::Pending));
        assert_eq!(BookingStatus::parse(" completed "), Some(BookingStatus::Completed));
        assert_eq!(BookingStatus::parse("cancelled"), Some(BookingStatus::Cancelled));
        assert_eq!(BookingStatus::parse("confirmed"), None);
        assert_eq!(BookingStatus::parse("PENDING"), None);
    }

    #[test]
    fn allowed_values_lists_every_status() {
        assert_eq!(BookingStatus::allowed_values(), "pending, completed, cancelled");
    }

    fn payload() -> CreateBookingPayload {
        CreateBookingPayload {
            name: "Ravi Kumar".into(),
            email: "  Ravi@Example.com ".into(),
            phone_number: "9876543210".into(),
            address: "12, MG Road, Indiranagar".into(),
            pincode: "560038".into(),
            additional_message: None,
            service_ids: vec![Uuid::new_v4().to_string()],
        }
    }

    #[test]
    fn valid_payload_converts_with_normalized_email() {
        let p = payload();
        assert!(p.validate().is_ok());

        let booking = p.into_new_booking().unwrap();
        assert_eq!(booking.email, "ravi@example.com");
        assert_eq!(booking.additional_message, "");
        assert_eq!(booking.service_ids.len(), 1);
    }

    #[test]
    fn every_violation_is_reported_together() {
        let mut p = payload();
        p.phone_number = "98765".into();
        p.pincode = "012345".into();
        p.address = "short".into();
        p.service_ids.clear();

        let errors = p.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["phone_number", "pincode", "address", "service_ids"] {
            assert!(fields.contains_key(field), "missing {field}");
        }
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn malformed_service_id_fails_validation() {
        let mut p = payload();
        p.service_ids.push("not-an-id".into());
        let errors = p.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("service_ids"));
    }
}
