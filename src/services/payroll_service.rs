// src/services/payroll_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        time::{ledger_stamp, parse_month_year},
    },
    db::EmployeeRepository,
    models::payroll::{
        CreateEmployeePayload, Employee, MonthlyResetResponse, NewEmployee, PaymentEntry,
        SalaryStatus, UpdateEmployeePayload,
    },
};

#[derive(Clone)]
pub struct PayrollService {
    repo: EmployeeRepository,
}

impl PayrollService {
    pub fn new(repo: EmployeeRepository) -> Self {
        Self { repo }
    }

    pub async fn create_employee(&self, payload: CreateEmployeePayload) -> Result<Employee, AppError> {
        let new_employee = prepare_employee(payload, Utc::now())?;
        let employee = self.repo.create_employee(&new_employee).await?;

        tracing::info!("👷 Funcionário {} cadastrado ({})", employee.employee_id, employee.id);
        Ok(employee)
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        self.repo.list_employees().await
    }

    pub async fn get_employee(&self, id: Uuid) -> Result<Employee, AppError> {
        self.repo
            .find_employee(id)
            .await?
            .ok_or(AppError::NotFound("Employee"))
    }

    /// Dados cadastrais. Se o salário mudar, o status é recalculado sob o lock da linha.
    pub async fn update_employee(
        &self,
        id: Uuid,
        patch: UpdateEmployeePayload,
    ) -> Result<Employee, AppError> {
        let mut tx = self.repo.pool().begin().await?;

        let current = self.repo
            .lock_employee(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Employee"))?;

        let salary = patch.salary.unwrap_or(current.salary);
        let status = SalaryStatus::derive(salary, current.paid_amount);

        let updated = self.repo
            .update_profile(&mut *tx, id, &patch, status)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Pagamento parcial ou total. Leitura, regra e escrita acontecem na mesma transação
    /// com a linha travada, então dois pagamentos simultâneos não se perdem.
    pub async fn record_payment(&self, id: Uuid, amount: Decimal) -> Result<Employee, AppError> {
        let mut tx = self.repo.pool().begin().await?;

        let current = self.repo
            .lock_employee(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Employee"))?;

        let paid_amount = apply_payment_rule(current.salary, current.paid_amount, amount)?;
        let status = SalaryStatus::derive(current.salary, paid_amount);

        let now = Utc::now();
        let entry = PaymentEntry::payment(&ledger_stamp(now), amount);

        let updated = self.repo
            .apply_payment(&mut *tx, id, paid_amount, status, now, &entry)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "💰 Pagamento de {} para {} (total pago: {})",
            amount,
            updated.employee_id,
            updated.paid_amount
        );
        Ok(updated)
    }

    pub async fn monthly_reset(&self, month_year: &str) -> Result<MonthlyResetResponse, AppError> {
        let month_year = parse_month_year(month_year).ok_or_else(|| {
            AppError::invalid_field("currentMonthYear", "Month-year must be in the format M-YYYY")
        })?;

        let marker = PaymentEntry::reset_marker(&ledger_stamp(Utc::now()), &month_year);
        let modified_count = self.repo.monthly_reset(&marker).await?;

        tracing::info!("🗓️ Zeragem mensal {}: {} funcionário(s) afetado(s)", month_year, modified_count);

        Ok(MonthlyResetResponse {
            message: format!("Monthly reset completed for {month_year}"),
            month_year,
            modified_count,
        })
    }

    pub async fn delete_employee(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_employee(id).await? {
            return Err(AppError::NotFound("Employee"));
        }
        Ok(())
    }
}

/// Novo total pago, desde que não ultrapasse o salário.
pub(crate) fn apply_payment_rule(
    salary: Decimal,
    paid_amount: Decimal,
    amount: Decimal,
) -> Result<Decimal, AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::invalid_field("amount", "Amount must be greater than 0"));
    }

    let remaining = (salary - paid_amount).max(Decimal::ZERO);
    if amount > remaining {
        return Err(AppError::invalid_field(
            "amount",
            format!("Amount exceeds the remaining balance of {remaining}"),
        ));
    }

    Ok(paid_amount + amount)
}

// "EMP-" + 8 caracteres maiúsculos
fn generate_employee_id() -> String {
    let raw = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("EMP-{}", &raw[..8])
}

pub(crate) fn prepare_employee(
    payload: CreateEmployeePayload,
    now: chrono::DateTime<Utc>,
) -> Result<NewEmployee, AppError> {
    let paid_amount = payload.paid_amount.unwrap_or(Decimal::ZERO);
    if paid_amount > payload.salary {
        return Err(AppError::invalid_field(
            "paidAmount",
            "Paid amount cannot exceed the salary",
        ));
    }

    let (last_payment, payment_history) = if paid_amount > Decimal::ZERO {
        (Some(now), vec![PaymentEntry::payment(&ledger_stamp(now), paid_amount)])
    } else {
        (None, Vec::new())
    };

    // Id em branco já foi barrado na validação do payload
    let employee_id = match payload.employee_id {
        Some(id) => id.trim().to_string(),
        None => generate_employee_id(),
    };

    Ok(NewEmployee {
        employee_id,
        name: payload.name.trim().to_string(),
        phone: payload.phone,
        aadhaar: payload.aadhaar,
        role: payload.role.trim().to_string(),
        address: payload.address.unwrap_or_default().trim().to_string(),
        salary: payload.salary,
        salary_status: SalaryStatus::derive(payload.salary, paid_amount),
        paid_amount,
        last_payment,
        payment_history,
    })
}
