// src/config.rs

use crate::{
    db::{BookingRepository, EmployeeRepository, IntakeRepository, ServiceRepository, UserRepository},
    services::{
        auth::AuthService, booking_service::BookingService, catalog_service::CatalogService,
        intake_service::IntakeService, payment_service::PaymentService,
        payroll_service::PayrollService,
    },
};
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, path::PathBuf, sync::Arc, time::Duration};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_GATEWAY_URL: &str = "https://api.razorpay.com";

/// Configuração lida do ambiente (.env é carregado antes).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub razorpay_key_id: String,
    pub razorpay_key_secret: String,
    pub razorpay_base_url: String,
    pub port: u16,
    pub uploads_dir: PathBuf,
    pub client_dist: PathBuf,
    pub environment: String,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().with_context(|| format!("PORT inválida: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            razorpay_key_id: required("RAZORPAY_API_KEY")?,
            razorpay_key_secret: required("RAZORPAY_API_SECRET")?,
            razorpay_base_url: optional("RAZORPAY_BASE_URL", DEFAULT_GATEWAY_URL),
            port,
            uploads_dir: optional("UPLOADS_DIR", "uploads").into(),
            client_dist: optional("CLIENT_DIST", "../client/dist").into(),
            environment: optional("APP_ENV", "development"),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{key} deve ser definida"))
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<AppConfig>,
    pub auth_service: AuthService,
    pub booking_service: BookingService,
    pub catalog_service: CatalogService,
    pub payroll_service: PayrollService,
    pub intake_service: IntakeService,
    pub payment_service: PaymentService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar no banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Self::from_parts(config, db_pool)
    }

    /// Monta o gráfico de dependências a partir de um pool já criado.
    pub fn from_parts(config: AppConfig, db_pool: PgPool) -> anyhow::Result<Self> {
        let auth_service = AuthService::new(
            UserRepository::new(db_pool.clone()),
            config.jwt_secret.clone(),
        );
        let booking_service = BookingService::new(BookingRepository::new(db_pool.clone()));
        let catalog_service = CatalogService::new(
            ServiceRepository::new(db_pool.clone()),
            config.uploads_dir.clone(),
        );
        let payroll_service = PayrollService::new(EmployeeRepository::new(db_pool.clone()));
        let intake_service = IntakeService::new(IntakeRepository::new(db_pool.clone()));
        let payment_service = PaymentService::new(
            config.razorpay_base_url.clone(),
            config.razorpay_key_id.clone(),
            config.razorpay_key_secret.clone(),
        )
        .map_err(|e| anyhow::anyhow!("{e}"))?;

        Ok(Self {
            db_pool,
            config: Arc::new(config),
            auth_service,
            booking_service,
            catalog_service,
            payroll_service,
            intake_service,
            payment_service,
        })
    }
}
