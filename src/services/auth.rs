// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{
        normalize_email, Admin, AdminAuthResponse, AdminSignupPayload, Claims, ForgetPasswordPayload,
        LoginPayload, Role, User, UserAuthResponse, UserSignupPayload,
    },
};

// Validade dos tokens
const USER_TOKEN_TTL_DAYS: i64 = 1;
const ADMIN_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self { user_repo, jwt_secret }
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

    pub async fn signup_user(&self, payload: UserSignupPayload) -> Result<UserAuthResponse, AppError> {
        let email = normalize_email(&payload.email);

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        let password_hash = hash_password(payload.password).await?;
        let user = self.user_repo
            .create_user(payload.name.trim(), &email, &payload.phone, &password_hash)
            .await?;

        tracing::info!("👤 Novo cliente cadastrado: {}", user.id);

        let token = self.create_token(user.id, Role::User, Duration::days(USER_TOKEN_TTL_DAYS))?;
        Ok(UserAuthResponse { token, user })
    }

    pub async fn login_user(&self, payload: LoginPayload) -> Result<UserAuthResponse, AppError> {
        let user = self.user_repo
            .find_by_email(&normalize_email(&payload.email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(payload.password, user.password_hash.clone()).await? {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(user.id, Role::User, Duration::days(USER_TOKEN_TTL_DAYS))?;
        Ok(UserAuthResponse { token, user })
    }

    pub async fn reset_password(&self, payload: ForgetPasswordPayload) -> Result<(), AppError> {
        let password_hash = hash_password(payload.new_password).await?;
        let updated = self.user_repo
            .update_password(&normalize_email(&payload.email), &password_hash)
            .await?;

        if !updated {
            return Err(AppError::NotFound("User"));
        }
        Ok(())
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("User"))
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list_users().await
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        if !self.user_repo.delete_user(id).await? {
            return Err(AppError::NotFound("User"));
        }
        tracing::info!("🗑️ Cliente {} removido", id);
        Ok(())
    }

    // =========================================================================
    //  ADMINISTRADORES
    // =========================================================================

    pub async fn signup_admin(&self, payload: AdminSignupPayload) -> Result<Admin, AppError> {
        let email = normalize_email(&payload.email);

        if self.user_repo.find_admin_by_email(&email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        let password_hash = hash_password(payload.password).await?;
        let admin = self.user_repo
            .create_admin(payload.name.trim(), &email, &password_hash)
            .await?;

        tracing::info!("🛡️ Novo administrador cadastrado: {}", admin.id);
        Ok(admin)
    }

    pub async fn login_admin(&self, payload: LoginPayload) -> Result<AdminAuthResponse, AppError> {
        let admin = self.user_repo
            .find_admin_by_email(&normalize_email(&payload.email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(payload.password, admin.password_hash.clone()).await? {
            return Err(AppError::InvalidCredentials);
        }

        let jwt_token =
            self.create_token(admin.id, Role::Admin, Duration::hours(ADMIN_TOKEN_TTL_HOURS))?;

        Ok(AdminAuthResponse {
            jwt_token,
            email: admin.email,
            name: admin.name,
        })
    }

    // =========================================================================
    //  TOKENS
    // =========================================================================

    /// Decodifica e valida assinatura + expiração. Não consulta o banco.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    pub fn create_token(&self, subject: Uuid, role: Role, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + ttl;

        let claims = Claims {
            sub: subject,
            role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

// bcrypt é CPU-bound: roda fora do runtime async
async fn hash_password(password: String) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
    let valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
    Ok(valid)
}
