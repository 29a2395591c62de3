// src/db/intake_repo.rs

use sqlx::PgPool;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::intake::{QueryStatus, Testimonial, UserQuery},
};

const TESTIMONIAL_COLUMNS: &str = "id, rating, name, city, message, created_at";
const QUERY_COLUMNS: &str =
    "id, name, phone_number, query, status, resolved_at, created_at, updated_at";

// Depoimentos públicos e pedidos de retorno (callback)
#[derive(Clone)]
pub struct IntakeRepository {
    pool: PgPool,
}

impl IntakeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  DEPOIMENTOS
    // =========================================================================

    pub async fn create_testimonial(
        &self,
        rating: i16,
        name: &str,
        city: &str,
        message: &str,
    ) -> Result<Testimonial, AppError> {
        let testimonial = sqlx::query_as::<_, Testimonial>(&format!(
            "INSERT INTO testimonials (rating, name, city, message) VALUES ($1, $2, $3, $4) RETURNING {TESTIMONIAL_COLUMNS}"
        ))
            .bind(rating)
            .bind(name)
            .bind(city)
            .bind(message)
            .fetch_one(&self.pool)
            .await?;
        Ok(testimonial)
    }

    pub async fn list_testimonials(&self) -> Result<Vec<Testimonial>, AppError> {
        let testimonials = sqlx::query_as::<_, Testimonial>(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials ORDER BY created_at DESC"
        ))
            .fetch_all(&self.pool)
            .await?;
        Ok(testimonials)
    }

    // =========================================================================
    //  PEDIDOS DE RETORNO
    // =========================================================================

    pub async fn create_query(
        &self,
        name: &str,
        phone_number: &str,
        query: &str,
    ) -> Result<UserQuery, AppError> {
        let created = sqlx::query_as::<_, UserQuery>(&format!(
            "INSERT INTO user_queries (name, phone_number, query) VALUES ($1, $2, $3) RETURNING {QUERY_COLUMNS}"
        ))
            .bind(name)
            .bind(phone_number)
            .bind(query)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    pub async fn list_queries(&self) -> Result<Vec<UserQuery>, AppError> {
        let queries = sqlx::query_as::<_, UserQuery>(&format!(
            "SELECT {QUERY_COLUMNS} FROM user_queries ORDER BY created_at DESC"
        ))
            .fetch_all(&self.pool)
            .await?;
        Ok(queries)
    }

    /// 'resolved' carimba resolved_at; voltar para 'pending' limpa o carimbo.
    pub async fn update_query_status(
        &self,
        id: Uuid,
        status: QueryStatus,
    ) -> Result<Option<UserQuery>, AppError> {
        let updated = sqlx::query_as::<_, UserQuery>(&format!(
            r#"
            UPDATE user_queries SET
                status = $2,
                resolved_at = CASE WHEN $2 = 'resolved'::query_status THEN NOW() ELSE NULL END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {QUERY_COLUMNS}
            "#
        ))
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }
}
