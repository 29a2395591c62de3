// src/services/booking_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::BookingRepository,
    models::booking::{
        Booking, BookingCreated, BookingFilter, BookingListQuery, BookingStatus, BookingWithServices,
        CreateBookingPayload,
    },
};

#[derive(Clone)]
pub struct BookingService {
    repo: BookingRepository,
}

impl BookingService {
    pub fn new(repo: BookingRepository) -> Self {
        Self { repo }
    }

    /// Payload já passou pelo `validate()` no handler. Sempre nasce 'pending'.
    pub async fn create_booking(&self, payload: CreateBookingPayload) -> Result<BookingCreated, AppError> {
        let new_booking = payload
            .into_new_booking()
            .ok_or_else(|| AppError::invalid_field("serviceIds", "Every service id must be a valid id"))?;

        let booking = self.repo.create_booking(self.repo.pool(), &new_booking).await?;

        tracing::info!(
            "📅 Novo agendamento {} ({} serviço(s))",
            booking.id,
            booking.service_ids.len()
        );
        Ok(booking.into())
    }

    pub async fn list_bookings(&self, query: BookingListQuery) -> Result<Vec<BookingWithServices>, AppError> {
        let filter = parse_filter(query)?;
        self.repo.list_bookings(self.repo.pool(), filter).await
    }

    pub async fn get_booking(&self, id: Uuid) -> Result<BookingWithServices, AppError> {
        self.repo
            .find_booking(self.repo.pool(), id)
            .await?
            .ok_or(AppError::NotFound("Booking"))
    }

    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Booking, AppError> {
        let status = parse_status(status)?;

        let booking = self.repo
            .update_status(self.repo.pool(), id, status)
            .await?
            .ok_or(AppError::NotFound("Booking"))?;

        tracing::info!("🔄 Agendamento {} agora está '{}'", id, status.as_str());
        Ok(booking)
    }

    pub async fn delete_booking(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_booking(self.repo.pool(), id).await? {
            return Err(AppError::NotFound("Booking"));
        }
        Ok(())
    }
}

fn parse_status(value: &str) -> Result<BookingStatus, AppError> {
    BookingStatus::parse(value).ok_or_else(|| {
        AppError::invalid_field(
            "status",
            format!("Invalid status. Allowed values: {}", BookingStatus::allowed_values()),
        )
    })
}

// Filtros vazios (?status=) contam como ausentes
fn parse_filter(query: BookingListQuery) -> Result<BookingFilter, AppError> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(parse_status(value)?),
    };

    let service_id = match query.service_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(
            Uuid::parse_str(value)
                .map_err(|_| AppError::invalid_field("serviceId", "Invalid service id"))?,
        ),
    };

    Ok(BookingFilter { status, service_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlisted_status_is_a_validation_error() {
        for value in ["confirmed", "done", "", "Pending"] {
            match parse_status(value) {
                Err(AppError::InvalidField { field, .. }) => assert_eq!(field, "status"),
                other => panic!("expected InvalidField for {value:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn listed_status_parses() {
        assert_eq!(parse_status("cancelled").unwrap(), BookingStatus::Cancelled);
    }

    #[test]
    fn empty_filters_are_ignored() {
        let filter = parse_filter(BookingListQuery {
            status: Some("".into()),
            service_id: Some("  ".into()),
        })
        .unwrap();
        assert!(filter.status.is_none());
        assert!(filter.service_id.is_none());
    }

    #[test]
    fn filters_are_parsed() {
        let id = Uuid::new_v4();
        let filter = parse_filter(BookingListQuery {
            status: Some("completed".into()),
            service_id: Some(id.to_string()),
        })
        .unwrap();
        assert_eq!(filter.status, Some(BookingStatus::Completed));
        assert_eq!(filter.service_id, Some(id));
    }

    #[test]
    fn malformed_service_filter_fails() {
        let result = parse_filter(BookingListQuery {
            status: None,
            service_id: Some("abc".into()),
        });
        assert!(matches!(result, Err(AppError::InvalidField { field: "serviceId", .. })));
    }
}
