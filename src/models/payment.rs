// src/models/payment.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;
use utoipa::ToSchema;

use crate::common::validators::{validate_not_blank, validate_positive};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderPayload {
    // Em rúpias. O gateway recebe em paise.
    #[validate(custom(function = "validate_positive"))]
    #[schema(example = "1499.00")]
    pub amount: Decimal,
}

// Corpo enviado para POST /v1/orders do Razorpay
#[derive(Debug, Serialize)]
pub struct GatewayOrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}

// Ordem como o Razorpay devolve
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GatewayOrder {
    #[schema(example = "order_NY1a2b3c4d5e6f")]
    pub id: String,
    #[serde(default)]
    pub entity: String,
    #[schema(example = 149900)]
    pub amount: i64,
    #[serde(default)]
    pub amount_paid: i64,
    #[serde(default)]
    pub amount_due: i64,
    pub currency: String,
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order: GatewayOrder,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentKeyResponse {
    pub success: bool,
    pub key: String,
}

// Os nomes razorpay_* vêm direto do checkout do Razorpay
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyPaymentPayload {
    #[validate(custom(function = "validate_not_blank", message = "Order id is required"))]
    pub razorpay_order_id: String,

    #[validate(custom(function = "validate_not_blank", message = "Payment id is required"))]
    pub razorpay_payment_id: String,

    #[validate(custom(function = "validate_not_blank", message = "Signature is required"))]
    pub razorpay_signature: String,

    #[serde(rename = "bookingId")]
    pub booking_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    pub booking_id: Option<String>,
}
