// src/services/payment_service.rs
//
// Ponte com o gateway de pagamento (Razorpay): criação de ordens via HTTPS
// e verificação da assinatura HMAC-SHA256 devolvida pelo checkout.

use std::time::Duration;

use chrono::Utc;
use hmac::{Hmac, Mac};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use sha2::Sha256;

use crate::{
    common::error::AppError,
    models::payment::{GatewayOrder, GatewayOrderRequest, VerifyPaymentPayload, VerifyPaymentResponse},
};

type HmacSha256 = Hmac<Sha256>;

const CURRENCY: &str = "INR";
const GATEWAY_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct PaymentService {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl PaymentService {
    pub fn new(base_url: String, key_id: String, key_secret: String) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(GATEWAY_TIMEOUT)
            .build()
            .map_err(|e| anyhow::anyhow!("Falha ao criar o cliente HTTP do gateway: {}", e))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            key_id,
            key_secret,
        })
    }

    /// Chave pública usada pelo checkout no navegador.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Cria a ordem no gateway. Sem retry: qualquer falha volta direto para quem chamou.
    pub async fn create_order(&self, amount_rupees: Decimal) -> Result<GatewayOrder, AppError> {
        let amount = rupees_to_paise(amount_rupees)?;

        let body = GatewayOrderRequest {
            amount,
            currency: CURRENCY.to_string(),
            receipt: format!("receipt_order_{}", Utc::now().timestamp_millis()),
        };

        let response = self.http
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("❌ Gateway inacessível: {}", e);
                AppError::PaymentGateway(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!("❌ Gateway recusou a ordem ({}): {}", status, detail);
            return Err(AppError::PaymentGateway(format!("gateway returned {status}")));
        }

        let order = response
            .json::<GatewayOrder>()
            .await
            .map_err(|e| AppError::PaymentGateway(format!("invalid gateway response: {e}")))?;

        tracing::info!("🧾 Ordem {} criada ({} paise)", order.id, order.amount);
        Ok(order)
    }

    /// Confere a assinatura do checkout. Não marca o agendamento como pago.
    pub fn verify_payment(&self, payload: &VerifyPaymentPayload) -> Result<VerifyPaymentResponse, AppError> {
        let valid = verify_signature(
            &self.key_secret,
            &payload.razorpay_order_id,
            &payload.razorpay_payment_id,
            &payload.razorpay_signature,
        )?;

        if !valid {
            tracing::warn!(
                "⚠️ Assinatura inválida para a ordem {} (booking {:?})",
                payload.razorpay_order_id,
                payload.booking_id
            );
            return Err(AppError::SignatureMismatch);
        }

        tracing::info!(
            "✅ Pagamento {} verificado (ordem {}, booking {:?})",
            payload.razorpay_payment_id,
            payload.razorpay_order_id,
            payload.booking_id
        );

        Ok(VerifyPaymentResponse {
            success: true,
            message: "Payment verified successfully".to_string(),
            booking_id: payload.booking_id.clone(),
        })
    }
}

/// Rúpias para paise (x100). Frações de paise são recusadas.
pub fn rupees_to_paise(amount: Decimal) -> Result<i64, AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::invalid_field("amount", "Amount must be greater than 0"));
    }

    let paise = amount * Decimal::ONE_HUNDRED;
    if !paise.fract().is_zero() {
        return Err(AppError::invalid_field("amount", "Amount cannot have more than 2 decimal places"));
    }

    paise
        .to_i64()
        .ok_or_else(|| AppError::invalid_field("amount", "Amount is too large"))
}

fn mac_for(secret: &str, order_id: &str, payment_id: &str) -> Result<HmacSha256, AppError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("Chave HMAC inválida: {}", e))?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Ok(mac)
}

/// hex minúsculo de HMAC-SHA256(secret, "orderId|paymentId")
pub fn compute_signature(secret: &str, order_id: &str, payment_id: &str) -> Result<String, AppError> {
    let mac = mac_for(secret, order_id, payment_id)?;
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Comparação exata (hex minúsculo) e em tempo constante.
pub fn verify_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> Result<bool, AppError> {
    // hex::decode aceitaria maiúsculas; a assinatura precisa bater byte a byte
    if !signature.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return Ok(false);
    }
    let Ok(expected) = hex::decode(signature) else {
        return Ok(false);
    };

    let mac = mac_for(secret, order_id, payment_id)?;
    Ok(mac.verify_slice(&expected).is_ok())
}
