// src/models/payroll.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;
use validator::Validate;
use utoipa::ToSchema;

use crate::common::time::LedgerStamp;
use crate::common::validators::{
    validate_aadhaar, validate_non_negative, validate_not_blank, validate_phone, validate_positive,
};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "salary_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SalaryStatus {
    Paid,
    PartiallyPaid,
    Unpaid,
}

impl SalaryStatus {
    /// Status derivado: nunca é gravado a partir do que o cliente manda.
    pub fn derive(salary: Decimal, paid_amount: Decimal) -> Self {
        if paid_amount >= salary {
            SalaryStatus::Paid
        } else if paid_amount > Decimal::ZERO {
            SalaryStatus::PartiallyPaid
        } else {
            SalaryStatus::Unpaid
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Payment,
    Reset, // Marcador de zeragem mensal (amount = 0)
}

// Lançamento no histórico de pagamentos (guardado em JSONB na linha do funcionário)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEntry {
    #[schema(example = "16-10-2026")]
    pub date: String,
    #[schema(example = "02:05 pm")]
    pub time: String,
    pub timestamp: DateTime<Utc>,
    #[schema(example = "10-2026")]
    pub month_year: String,
    #[schema(example = "5000.00")]
    pub amount: Decimal,
    #[serde(default)]
    pub kind: EntryKind,
}

impl PaymentEntry {
    pub fn payment(stamp: &LedgerStamp, amount: Decimal) -> Self {
        Self {
            date: stamp.date.clone(),
            time: stamp.time.clone(),
            timestamp: stamp.timestamp,
            month_year: stamp.month_year.clone(),
            amount,
            kind: EntryKind::Payment,
        }
    }

    pub fn reset_marker(stamp: &LedgerStamp, month_year: &str) -> Self {
        Self {
            date: stamp.date.clone(),
            time: stamp.time.clone(),
            timestamp: stamp.timestamp,
            month_year: month_year.to_string(),
            amount: Decimal::ZERO,
            kind: EntryKind::Reset,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    #[schema(example = "EMP-7K2QX9AB")]
    pub employee_id: String,
    #[schema(example = "Suresh Naik")]
    pub name: String,
    #[schema(example = "9876543210")]
    pub phone: String,
    #[schema(example = "123412341234")]
    pub aadhaar: String,
    #[schema(example = "Electrician")]
    pub role: String,
    pub address: String,
    #[schema(example = "18000.00")]
    pub salary: Decimal,
    #[schema(example = "5000.00")]
    pub paid_amount: Decimal,
    pub salary_status: SalaryStatus,
    pub last_payment: Option<DateTime<Utc>>,
    #[schema(value_type = Vec<PaymentEntry>)]
    pub payment_history: Json<Vec<PaymentEntry>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn remaining_balance(&self) -> Decimal {
        (self.salary - self.paid_amount).max(Decimal::ZERO)
    }
}

/// Registro pronto para inserir: status e histórico já calculados pelo serviço.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub employee_id: String,
    pub name: String,
    pub phone: String,
    pub aadhaar: String,
    pub role: String,
    pub address: String,
    pub salary: Decimal,
    pub paid_amount: Decimal,
    pub salary_status: SalaryStatus,
    pub last_payment: Option<DateTime<Utc>>,
    pub payment_history: Vec<PaymentEntry>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeePayload {
    // Se não vier, o serviço gera um "EMP-XXXXXXXX"
    #[validate(custom(function = "validate_not_blank", message = "Employee id cannot be blank"))]
    pub employee_id: Option<String>,

    #[validate(length(min = 3, message = "Name must be at least 3 characters long"))]
    pub name: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(custom(function = "validate_aadhaar"))]
    pub aadhaar: String,

    #[validate(custom(function = "validate_not_blank", message = "Role is required"))]
    pub role: String,

    #[validate(custom(function = "validate_positive"))]
    pub salary: Decimal,

    #[validate(length(min = 5, message = "Address must be at least 5 characters long"))]
    pub address: Option<String>,

    // Pagamento já feito no ato do cadastro (opcional)
    #[validate(custom(function = "validate_non_negative"))]
    pub paid_amount: Option<Decimal>,
}

// salaryStatus, paidAmount e paymentHistory ficam de fora: são do livro-caixa
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeePayload {
    #[validate(length(min = 3, message = "Name must be at least 3 characters long"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(length(min = 5, message = "Address must be at least 5 characters long"))]
    pub address: Option<String>,

    #[validate(custom(function = "validate_not_blank", message = "Role cannot be blank"))]
    pub role: Option<String>,

    #[validate(custom(function = "validate_positive"))]
    pub salary: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordPaymentPayload {
    #[validate(custom(function = "validate_positive"))]
    #[schema(example = "5000.00")]
    pub amount: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyResetPayload {
    #[schema(example = "10-2026")]
    pub current_month_year: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyResetResponse {
    pub message: String,
    pub month_year: String,
    pub modified_count: u64,
}
