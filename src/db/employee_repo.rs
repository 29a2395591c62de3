// src/db/employee_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{types::Json, Executor, PgPool, Postgres};
use uuid::Uuid;
use crate::{
    common::{db_utils::map_unique_violation, error::AppError},
    models::payroll::{Employee, NewEmployee, PaymentEntry, SalaryStatus, UpdateEmployeePayload},
};

const EMPLOYEE_COLUMNS: &str = r#"
    id, employee_id, name, phone, aadhaar, role, address, salary, paid_amount,
    salary_status, last_payment, payment_history, created_at, updated_at
"#;

const UNIQUE_FIELDS: &[(&str, &str)] = &[
    ("employees_employee_id_key", "employeeId"),
    ("employees_aadhaar_key", "aadhaar"),
];

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn create_employee(&self, input: &NewEmployee) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>(&format!(
            r#"
            INSERT INTO employees (
                employee_id, name, phone, aadhaar, role, address,
                salary, paid_amount, salary_status, last_payment, payment_history
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
            .bind(&input.employee_id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.aadhaar)
            .bind(&input.role)
            .bind(&input.address)
            .bind(input.salary)
            .bind(input.paid_amount)
            .bind(input.salary_status)
            .bind(input.last_payment)
            .bind(Json(&input.payment_history))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, UNIQUE_FIELDS))
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY created_at DESC"
        ))
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    pub async fn find_employee(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1"
        ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    /// Lê a linha com `FOR UPDATE`. Só faz sentido dentro de uma transação.
    pub async fn lock_employee<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Employee>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1 FOR UPDATE"
        ))
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(employee)
    }

    /// Atualiza os dados cadastrais. paid_amount e payment_history não são tocados.
    pub async fn update_profile<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        patch: &UpdateEmployeePayload,
        salary_status: SalaryStatus,
    ) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            UPDATE employees SET
                name          = COALESCE($2, name),
                phone         = COALESCE($3, phone),
                address       = COALESCE($4, address),
                role          = COALESCE($5, role),
                salary        = COALESCE($6, salary),
                salary_status = $7,
                updated_at    = NOW()
            WHERE id = $1
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
            .bind(id)
            .bind(patch.name.as_deref().map(str::trim))
            .bind(&patch.phone)
            .bind(patch.address.as_deref().map(str::trim))
            .bind(patch.role.as_deref().map(str::trim))
            .bind(patch.salary)
            .bind(salary_status)
            .fetch_one(executor)
            .await?;
        Ok(employee)
    }

    /// Grava um pagamento: novo total, status derivado, carimbo e um lançamento no histórico.
    pub async fn apply_payment<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        paid_amount: Decimal,
        salary_status: SalaryStatus,
        paid_at: DateTime<Utc>,
        entry: &PaymentEntry,
    ) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            UPDATE employees SET
                paid_amount     = $2,
                salary_status   = $3,
                last_payment    = $4,
                payment_history = payment_history || $5,
                updated_at      = NOW()
            WHERE id = $1
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
            .bind(id)
            .bind(paid_amount)
            .bind(salary_status)
            .bind(paid_at)
            .bind(Json([entry]))
            .fetch_one(executor)
            .await?;
        Ok(employee)
    }

    /// Zeragem mensal em um único UPDATE. Quem já tem o marcador do mês fica de fora,
    /// então repetir a chamada não altera nada. Retorna quantas linhas mudaram.
    pub async fn monthly_reset(&self, marker: &PaymentEntry) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE employees SET
                paid_amount     = 0,
                salary_status   = 'unpaid',
                last_payment    = NULL,
                payment_history = payment_history || $2,
                updated_at      = NOW()
            WHERE NOT payment_history @> jsonb_build_array(
                jsonb_build_object('monthYear', $1::text, 'kind', 'reset')
            )
            "#,
        )
            .bind(&marker.month_year)
            .bind(Json([marker]))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_employee(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
