// src/db/service_repo.rs

use sqlx::PgPool;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::catalog::{Service, ServiceForm, ServicePatch},
};

const SERVICE_COLUMNS: &str =
    "id, title, description, price, category, duration, status, image, created_at, updated_at";

#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_service(&self, form: &ServiceForm) -> Result<Service, AppError> {
        let service = sqlx::query_as::<_, Service>(&format!(
            r#"
            INSERT INTO services (title, description, price, category, duration, status, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
            .bind(form.title.trim())
            .bind(form.description.trim())
            .bind(form.price)
            .bind(form.category.trim())
            .bind(&form.duration)
            .bind(form.status)
            .bind(&form.image)
            .fetch_one(&self.pool)
            .await?;

        Ok(service)
    }

    pub async fn list_services(&self) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services ORDER BY created_at DESC"
        ))
            .fetch_all(&self.pool)
            .await?;
        Ok(services)
    }

    // Comparação sem diferenciar maiúsculas ("Cleaning" == "cleaning")
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE LOWER(category) = LOWER($1) ORDER BY created_at DESC"
        ))
            .bind(category.trim())
            .fetch_all(&self.pool)
            .await?;
        Ok(services)
    }

    pub async fn find_service(&self, id: Uuid) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1"
        ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(service)
    }

    /// Atualização parcial: campos None mantêm o valor atual (COALESCE).
    pub async fn update_service(
        &self,
        id: Uuid,
        patch: &ServicePatch,
    ) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>(&format!(
            r#"
            UPDATE services SET
                title       = COALESCE($2, title),
                description = COALESCE($3, description),
                price       = COALESCE($4, price),
                category    = COALESCE($5, category),
                duration    = COALESCE($6, duration),
                status      = COALESCE($7, status),
                image       = COALESCE($8, image),
                updated_at  = NOW()
            WHERE id = $1
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
            .bind(id)
            .bind(patch.title.as_deref().map(str::trim))
            .bind(patch.description.as_deref().map(str::trim))
            .bind(patch.price)
            .bind(patch.category.as_deref().map(str::trim))
            .bind(&patch.duration)
            .bind(patch.status)
            .bind(&patch.image)
            .fetch_optional(&self.pool)
            .await?;

        Ok(service)
    }

    pub async fn delete_service(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
