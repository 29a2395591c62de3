// src/services/intake_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::IntakeRepository,
    models::intake::{
        CreateTestimonialPayload, QueryStatus, SubmitQueryPayload, Testimonial, UserQueryView,
    },
};

#[derive(Clone)]
pub struct IntakeService {
    repo: IntakeRepository,
}

impl IntakeService {
    pub fn new(repo: IntakeRepository) -> Self {
        Self { repo }
    }

    // Sem moderação: entra no ar na hora
    pub async fn submit_testimonial(&self, payload: CreateTestimonialPayload) -> Result<Testimonial, AppError> {
        self.repo
            .create_testimonial(
                payload.rating,
                payload.name.trim(),
                payload.city.trim(),
                payload.message.trim(),
            )
            .await
    }

    pub async fn list_testimonials(&self) -> Result<Vec<Testimonial>, AppError> {
        self.repo.list_testimonials().await
    }

    pub async fn submit_query(&self, payload: SubmitQueryPayload) -> Result<UserQueryView, AppError> {
        let query = self.repo
            .create_query(
                payload.name.trim(),
                payload.phone_number.trim(),
                payload.query.trim(),
            )
            .await?;

        tracing::info!("📞 Novo pedido de retorno {}", query.id);
        Ok(query.into())
    }

    pub async fn list_queries(&self) -> Result<Vec<UserQueryView>, AppError> {
        let queries = self.repo.list_queries().await?;
        Ok(queries.into_iter().map(UserQueryView::from).collect())
    }

    pub async fn update_query_status(&self, id: Uuid, status: &str) -> Result<UserQueryView, AppError> {
        let status = QueryStatus::parse(status).ok_or_else(|| {
            AppError::invalid_field("status", "Status must be either 'pending' or 'resolved'")
        })?;

        let query = self.repo
            .update_query_status(id, status)
            .await?
            .ok_or(AppError::NotFound("Query"))?;

        Ok(query.into())
    }
}
