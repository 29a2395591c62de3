// src/db/booking_repo.rs

use sqlx::{PgPool, Postgres, Executor};
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::booking::{Booking, BookingFilter, BookingStatus, BookingWithServices, NewBooking},
};

const BOOKING_COLUMNS: &str = r#"
    b.id, b.name, b.email, b.phone_number, b.address, b.pincode,
    b.additional_message, b.service_ids, b.status, b.status_changed_at,
    b.created_at, b.updated_at
"#;

// Agrega os campos mínimos dos serviços referenciados. Serviço apagado simplesmente some da lista.
const SERVICES_AGG: &str = r#"
    COALESCE(
        jsonb_agg(
            jsonb_build_object('id', s.id, 'title', s.title, 'price', s.price, 'duration', s.duration)
        ) FILTER (WHERE s.id IS NOT NULL),
        '[]'::jsonb
    ) AS services
"#;

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn create_booking<'e, E>(
        &self,
        executor: E,
        input: &NewBooking,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings AS b (
                name, email, phone_number, address, pincode, additional_message, service_ids
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone_number)
            .bind(&input.address)
            .bind(&input.pincode)
            .bind(&input.additional_message)
            .bind(&input.service_ids)
            .fetch_one(executor)
            .await?;

        Ok(booking)
    }

    /// Lista com filtros opcionais, mais recentes primeiro.
    pub async fn list_bookings<'e, E>(
        &self,
        executor: E,
        filter: BookingFilter,
    ) -> Result<Vec<BookingWithServices>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let bookings = sqlx::query_as::<_, BookingWithServices>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}, {SERVICES_AGG}
            FROM bookings b
            LEFT JOIN services s ON s.id = ANY(b.service_ids)
            WHERE ($1::booking_status IS NULL OR b.status = $1)
              AND ($2::uuid IS NULL OR $2 = ANY(b.service_ids))
            GROUP BY b.id
            ORDER BY b.created_at DESC
            "#
        ))
            .bind(filter.status)
            .bind(filter.service_id)
            .fetch_all(executor)
            .await?;

        Ok(bookings)
    }

    pub async fn find_booking<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<BookingWithServices>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, BookingWithServices>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}, {SERVICES_AGG}
            FROM bookings b
            LEFT JOIN services s ON s.id = ANY(b.service_ids)
            WHERE b.id = $1
            GROUP BY b.id
            "#
        ))
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(booking)
    }

    /// Troca o status e carimba status_changed_at. None se o id não existe.
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings AS b
            SET status = $1, status_changed_at = NOW(), updated_at = NOW()
            WHERE b.id = $2
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
            .bind(status)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(booking)
    }

    pub async fn delete_booking<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
