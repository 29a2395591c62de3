// src/services/catalog_service.rs

use std::{collections::HashMap, path::PathBuf, str::FromStr};

use axum::body::Bytes;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::ServiceRepository,
    models::catalog::{Service, ServiceForm, ServicePatch, ServiceStatus},
};

// Prefixo público dos arquivos servidos em /uploads
const UPLOADS_PUBLIC_PREFIX: &str = "uploads";

/// Arquivo de imagem recebido no formulário.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Conteúdo bruto de um formulário multipart de serviço.
#[derive(Debug, Clone, Default)]
pub struct ServiceUpload {
    pub fields: HashMap<String, String>,
    pub image: Option<UploadedImage>,
}

impl ServiceUpload {
    fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Imagem já gravada em disco, com o caminho que vai para o banco.
#[derive(Debug)]
struct StoredImage {
    disk_path: PathBuf,
    public_path: String,
}

#[derive(Clone)]
pub struct CatalogService {
    repo: ServiceRepository,
    uploads_dir: PathBuf,
}

impl CatalogService {
    pub fn new(repo: ServiceRepository, uploads_dir: PathBuf) -> Self {
        Self { repo, uploads_dir }
    }

    pub async fn create_service(&self, upload: ServiceUpload) -> Result<Service, AppError> {
        let mut form = build_form(&upload)?;
        form.validate()?;

        // Só grava o arquivo depois que o resto do formulário passou
        let stored = self.store_image(upload.image.as_ref()).await?;
        if let Some(image) = &stored {
            form.image = Some(image.public_path.clone());
        }

        let service = match self.repo.create_service(&form).await {
            Ok(service) => service,
            Err(e) => {
                self.discard_image(stored).await;
                return Err(e);
            }
        };
        tracing::info!("🧰 Serviço '{}' criado ({})", service.title, service.id);
        Ok(service)
    }

    pub async fn list_services(&self) -> Result<Vec<Service>, AppError> {
        self.repo.list_services().await
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Service>, AppError> {
        self.repo.list_by_category(category).await
    }

    pub async fn get_service(&self, id: Uuid) -> Result<Service, AppError> {
        self.repo
            .find_service(id)
            .await?
            .ok_or(AppError::NotFound("Service"))
    }

    pub async fn update_service(&self, id: Uuid, upload: ServiceUpload) -> Result<Service, AppError> {
        let mut patch = build_patch(&upload)?;
        patch.validate()?;

        if self.repo.find_service(id).await?.is_none() {
            return Err(AppError::NotFound("Service"));
        }

        let stored = self.store_image(upload.image.as_ref()).await?;
        if let Some(image) = &stored {
            patch.image = Some(image.public_path.clone());
        }

        match self.repo.update_service(id, &patch).await {
            Ok(Some(service)) => Ok(service),
            Ok(None) => {
                self.discard_image(stored).await;
                Err(AppError::NotFound("Service"))
            }
            Err(e) => {
                self.discard_image(stored).await;
                Err(e)
            }
        }
    }

    pub async fn delete_service(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_service(id).await? {
            return Err(AppError::NotFound("Service"));
        }
        tracing::info!("🗑️ Serviço {} removido", id);
        Ok(())
    }

    async fn store_image(&self, image: Option<&UploadedImage>) -> Result<Option<StoredImage>, AppError> {
        match image {
            Some(image) => Ok(Some(self.save_image(image).await?)),
            None => Ok(None),
        }
    }

    /// Grava em `<uploads>/<millis>-<nome>`; o caminho público fica "uploads/<arquivo>".
    async fn save_image(&self, image: &UploadedImage) -> Result<StoredImage, AppError> {
        let file_name = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(&image.file_name)
        );

        tokio::fs::create_dir_all(&self.uploads_dir).await?;
        let disk_path = self.uploads_dir.join(&file_name);
        tokio::fs::write(&disk_path, &image.bytes).await?;

        tracing::debug!("Imagem salva: {}", file_name);
        Ok(StoredImage {
            disk_path,
            public_path: format!("{UPLOADS_PUBLIC_PREFIX}/{file_name}"),
        })
    }

    // Imagem gravada para uma escrita que falhou não pode ficar órfã em uploads/
    async fn discard_image(&self, stored: Option<StoredImage>) {
        let Some(image) = stored else { return };
        if let Err(e) = tokio::fs::remove_file(&image.disk_path).await {
            tracing::warn!("⚠️ Não foi possível remover {}: {}", image.disk_path.display(), e);
        }
    }
}

fn parse_price(raw: &str) -> Result<Decimal, AppError> {
    Decimal::from_str(raw).map_err(|_| AppError::invalid_field("price", "Price must be a number"))
}

fn parse_service_status(raw: &str) -> Result<ServiceStatus, AppError> {
    ServiceStatus::parse(raw).ok_or_else(|| {
        AppError::invalid_field("status", "Status must be either 'active' or 'inactive'")
    })
}

pub(crate) fn build_form(upload: &ServiceUpload) -> Result<ServiceForm, AppError> {
    let price = match upload.text("price") {
        Some(raw) => parse_price(&raw)?,
        None => return Err(AppError::invalid_field("price", "Price is required")),
    };

    let status = match upload.text("status") {
        Some(raw) => parse_service_status(&raw)?,
        None => ServiceStatus::Active,
    };

    Ok(ServiceForm {
        title: upload.text("title").unwrap_or_default(),
        description: upload.text("description").unwrap_or_default(),
        price,
        category: upload.text("category").unwrap_or_default(),
        duration: upload.text("duration"),
        status,
        image: upload.text("image"),
    })
}

pub(crate) fn build_patch(upload: &ServiceUpload) -> Result<ServicePatch, AppError> {
    Ok(ServicePatch {
        title: upload.text("title"),
        description: upload.text("description"),
        price: upload.text("price").map(|raw| parse_price(&raw)).transpose()?,
        category: upload.text("category"),
        duration: upload.text("duration"),
        status: upload.text("status").map(|raw| parse_service_status(&raw)).transpose()?,
        image: upload.text("image"),
    })
}

/// Mantém só o nome do arquivo, sem diretórios, trocando o que não for seguro por '_'.
pub(crate) fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() { "image".to_string() } else { cleaned }
}
